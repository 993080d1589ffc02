use std::ops::{Add, Mul, Neg, Sub};

use super::Sign;

/// Bounded value: an `f64` interval that encloses the exact result.
///
/// Every operation rounds its bounds outward by one ulp, so the enclosure
/// survives the rounding of the underlying `f64` arithmetic. Operations that
/// would produce NaN widen to the whole real line instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    lo: f64,
    hi: f64,
}

impl Interval {
    /// The interval `(-inf, +inf)`; its sign is never certain.
    pub const ENTIRE: Self = Self {
        lo: f64::NEG_INFINITY,
        hi: f64::INFINITY,
    };

    /// Creates the degenerate interval `[value, value]`.
    ///
    /// A NaN input yields [`Interval::ENTIRE`].
    #[must_use]
    pub fn point(value: f64) -> Self {
        if value.is_nan() {
            return Self::ENTIRE;
        }
        Self {
            lo: value,
            hi: value,
        }
    }

    /// Creates `[lo, hi]`, or [`Interval::ENTIRE`] if the bounds are not ordered.
    #[must_use]
    pub fn new(lo: f64, hi: f64) -> Self {
        if lo <= hi {
            Self { lo, hi }
        } else {
            Self::ENTIRE
        }
    }

    /// Lower bound.
    #[must_use]
    pub fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound.
    #[must_use]
    pub fn hi(&self) -> f64 {
        self.hi
    }

    /// Returns whether `value` lies inside the interval.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.lo <= value && value <= self.hi
    }

    /// Returns the sign when the bound decides it, `None` otherwise.
    ///
    /// A degenerate `[0, 0]` is certainly zero. Any other interval touching
    /// zero is uncertain.
    #[must_use]
    pub fn sign(&self) -> Option<Sign> {
        if self.lo > 0.0 {
            Some(Sign::Positive)
        } else if self.hi < 0.0 {
            Some(Sign::Negative)
        } else if self.lo == 0.0 && self.hi == 0.0 {
            Some(Sign::Zero)
        } else {
            None
        }
    }

    fn outward(lo: f64, hi: f64) -> Self {
        if lo.is_nan() || hi.is_nan() {
            return Self::ENTIRE;
        }
        Self {
            lo: lo.next_down(),
            hi: hi.next_up(),
        }
    }

    /// Exact sums and products with a zero operand need no widening.
    fn exact_or_outward(lo: f64, hi: f64, exact: bool) -> Self {
        if exact {
            Self { lo, hi }
        } else {
            Self::outward(lo, hi)
        }
    }

    fn is_finite(&self) -> bool {
        self.lo.is_finite() && self.hi.is_finite()
    }

    fn is_zero(&self) -> bool {
        self.lo == 0.0 && self.hi == 0.0
    }
}

impl From<f64> for Interval {
    fn from(value: f64) -> Self {
        Self::point(value)
    }
}

impl Add for Interval {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let exact = self.is_zero() || rhs.is_zero();
        Self::exact_or_outward(self.lo + rhs.lo, self.hi + rhs.hi, exact)
    }
}

impl Sub for Interval {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl Neg for Interval {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            lo: -self.hi,
            hi: -self.lo,
        }
    }
}

impl Mul for Interval {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        if (self.is_zero() && rhs.is_finite()) || (rhs.is_zero() && self.is_finite()) {
            return Self::point(0.0);
        }
        let products = [
            self.lo * rhs.lo,
            self.lo * rhs.hi,
            self.hi * rhs.lo,
            self.hi * rhs.hi,
        ];
        if products.iter().any(|p| p.is_nan()) {
            return Self::ENTIRE;
        }
        let lo = products.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = products.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Self::outward(lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sum_encloses_exact_value() {
        // 0.1 + 0.2 is not exactly representable.
        let sum = Interval::point(0.1) + Interval::point(0.2);
        assert!(sum.lo() < sum.hi());
        assert!(sum.contains(0.1 + 0.2));
        assert_eq!(sum.sign(), Some(Sign::Positive));
    }

    #[test]
    fn cancellation_is_uncertain() {
        let a = Interval::point(1.0) + Interval::point(1e-17);
        let b = Interval::point(1.0);
        assert_eq!((a - b).sign(), None);
    }

    #[test]
    fn exact_zero_is_certain() {
        let zero = Interval::point(0.0) * Interval::point(3.0);
        assert_eq!(zero.sign(), Some(Sign::Zero));
        let shifted = Interval::point(0.0) + Interval::point(-2.0);
        assert_eq!(shifted.sign(), Some(Sign::Negative));
    }

    #[test]
    fn product_of_mixed_signs() {
        let a = Interval::new(-1.0, 2.0);
        let b = Interval::new(3.0, 4.0);
        let p = a * b;
        assert!(p.lo() <= -4.0);
        assert!(p.hi() >= 8.0);
        assert_eq!(p.sign(), None);
    }

    #[test]
    fn nan_widens_to_entire() {
        let inf = Interval::point(f64::INFINITY);
        assert_eq!(inf - inf, Interval::ENTIRE);
        assert_eq!(Interval::point(f64::NAN), Interval::ENTIRE);
        assert_eq!(Interval::ENTIRE.sign(), None);
    }

    #[test]
    fn zero_times_infinity_is_entire() {
        let p = Interval::point(0.0) * Interval::point(f64::INFINITY);
        assert_eq!(p, Interval::ENTIRE);
    }

    #[test]
    fn negation_swaps_bounds() {
        let a = -Interval::new(1.0, 2.0);
        assert_eq!(a.lo(), -2.0);
        assert_eq!(a.hi(), -1.0);
    }
}
