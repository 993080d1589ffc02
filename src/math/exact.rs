use std::cmp::Ordering;
use std::ops::{Add, Mul, Neg, Sub};

use num_rational::BigRational;
use num_traits::{ToPrimitive, Zero};

use super::Sign;
use crate::error::NumericError;

/// Exact value: an arbitrary-precision rational.
///
/// Every finite `f64` converts exactly. Arithmetic never rounds, so signs and
/// comparisons are always decided.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Exact(BigRational);

impl Exact {
    /// Converts a finite `f64` without loss.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NonFinite`] for NaN and infinities.
    pub fn from_f64(value: f64) -> Result<Self, NumericError> {
        BigRational::from_float(value)
            .map(Self)
            .ok_or(NumericError::NonFinite { value })
    }

    /// Returns zero.
    #[must_use]
    pub fn zero() -> Self {
        Self(BigRational::zero())
    }

    /// Returns the exact sign.
    #[must_use]
    pub fn sign(&self) -> Sign {
        Sign::from(self.0.cmp(&BigRational::zero()))
    }

    /// Exact division.
    ///
    /// Returns `None` when `rhs` is zero.
    #[must_use]
    pub fn checked_div(&self, rhs: &Self) -> Option<Self> {
        if rhs.0.is_zero() {
            return None;
        }
        Some(Self(&self.0 / &rhs.0))
    }

    /// Rounds to the nearest `f64`.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::Unrepresentable`] when the value overflows `f64`.
    pub fn to_f64(&self, what: &'static str) -> Result<f64, NumericError> {
        self.0
            .to_f64()
            .filter(|v| v.is_finite())
            .ok_or(NumericError::Unrepresentable { what })
    }

    /// Compares with another exact value.
    #[must_use]
    pub fn compare(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl Add for Exact {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Exact {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Mul for Exact {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(self.0 * rhs.0)
    }
}

impl Neg for Exact {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}
