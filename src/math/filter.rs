//! Two-tier predicate evaluation.
//!
//! A [`Predicate`] is written once, generically over [`PredicateNumber`]. The
//! evaluator first runs it with [`Interval`] arithmetic; if the enclosure
//! cannot decide the outcome it runs the identical expression again with
//! [`Exact`] arithmetic. The transitions are an explicit state machine:
//!
//! ```text
//! Fast ──certain──▶ Certain
//!   │                  ▲
//!   └─ambiguous─▶ Ambiguous ──exact──┘
//! ```

use std::ops::{Add, Mul, Neg, Sub};

use tracing::{debug, trace};

use super::{Exact, Interval, Sign};
use crate::error::NumericError;

/// Arithmetic a predicate expression can be evaluated with.
pub trait PredicateNumber:
    Sized + Clone + Add<Output = Self> + Sub<Output = Self> + Mul<Output = Self> + Neg<Output = Self>
{
    /// Path this arithmetic belongs to.
    const PATH: EvaluationPath;

    /// Lifts a scalar coordinate into this arithmetic.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be represented.
    fn lift(value: f64) -> Result<Self, NumericError>;

    /// Returns the sign if it is certain.
    fn sign(&self) -> Option<Sign>;
}

impl PredicateNumber for Interval {
    const PATH: EvaluationPath = EvaluationPath::Fast;

    fn lift(value: f64) -> Result<Self, NumericError> {
        if !value.is_finite() {
            return Err(NumericError::NonFinite { value });
        }
        Ok(Interval::point(value))
    }

    fn sign(&self) -> Option<Sign> {
        Interval::sign(self)
    }
}

impl PredicateNumber for Exact {
    const PATH: EvaluationPath = EvaluationPath::Exact;

    fn lift(value: f64) -> Result<Self, NumericError> {
        Exact::from_f64(value)
    }

    fn sign(&self) -> Option<Sign> {
        Some(Sign::from(self.compare(&Exact::zero())))
    }
}

/// A qualitative geometric fact computed from coordinates.
pub trait Predicate {
    /// Decided outcome: a sign, a boolean, an ordering, or a classification.
    type Output;

    /// Name used in diagnostics.
    const NAME: &'static str;

    /// Evaluates the predicate with arithmetic `N`.
    ///
    /// Returns `Ok(None)` when `N` cannot decide the outcome. With exact
    /// arithmetic the outcome must always be decided.
    ///
    /// # Errors
    ///
    /// Returns an error if an operand cannot be represented in `N`.
    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Self::Output>, NumericError>;
}

/// Which arithmetic decided a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EvaluationPath {
    Fast,
    Exact,
}

/// Evaluation strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterPolicy {
    /// Interval arithmetic first, exact arithmetic only when ambiguous.
    #[default]
    Filtered,
    /// Skip the fast path.
    ExactOnly,
}

/// A decided predicate outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision<T> {
    pub value: T,
    pub path: EvaluationPath,
}

/// State of a single predicate evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterState<T> {
    Fast,
    Ambiguous,
    Certain(Decision<T>),
}

impl<T> FilterState<T> {
    /// Returns whether the state is terminal.
    #[must_use]
    pub fn is_certain(&self) -> bool {
        matches!(self, FilterState::Certain(_))
    }
}

/// An in-progress evaluation of one predicate.
pub struct FilteredEvaluation<'p, P: Predicate> {
    predicate: &'p P,
    state: FilterState<P::Output>,
}

impl<'p, P: Predicate> FilteredEvaluation<'p, P> {
    /// Starts an evaluation under `policy`.
    #[must_use]
    pub fn new(predicate: &'p P, policy: FilterPolicy) -> Self {
        let state = match policy {
            FilterPolicy::Filtered => FilterState::Fast,
            FilterPolicy::ExactOnly => FilterState::Ambiguous,
        };
        Self { predicate, state }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &FilterState<P::Output> {
        &self.state
    }

    /// Performs one transition. A certain evaluation stays certain.
    ///
    /// # Errors
    ///
    /// Returns an error if the exact path cannot represent an operand or
    /// fails to decide.
    pub fn step(&mut self) -> Result<&FilterState<P::Output>, NumericError> {
        match self.state {
            FilterState::Fast => {
                self.state = match self.predicate.evaluate::<Interval>()? {
                    Some(value) => FilterState::Certain(Decision {
                        value,
                        path: EvaluationPath::Fast,
                    }),
                    None => {
                        trace!(predicate = P::NAME, "interval filter ambiguous, using exact arithmetic");
                        FilterState::Ambiguous
                    }
                };
            }
            FilterState::Ambiguous => {
                let value = self
                    .predicate
                    .evaluate::<Exact>()
                    .inspect_err(|error| debug!(predicate = P::NAME, %error, "exact evaluation failed"))?
                    .ok_or(NumericError::Undecided { predicate: P::NAME })?;
                self.state = FilterState::Certain(Decision {
                    value,
                    path: EvaluationPath::Exact,
                });
            }
            FilterState::Certain(_) => {}
        }
        Ok(&self.state)
    }

    /// Runs the evaluation to completion.
    ///
    /// # Errors
    ///
    /// See [`step`](Self::step).
    pub fn run(mut self) -> Result<Decision<P::Output>, NumericError> {
        loop {
            if let FilterState::Certain(decision) = self.state {
                return Ok(decision);
            }
            self.step()?;
        }
    }
}

/// Evaluates a predicate under `policy`, reporting which path decided it.
///
/// # Errors
///
/// Returns an error if the exact path cannot represent an operand.
pub fn decide<P: Predicate>(
    predicate: &P,
    policy: FilterPolicy,
) -> Result<Decision<P::Output>, NumericError> {
    FilteredEvaluation::new(predicate, policy).run()
}

/// Evaluates a predicate with the interval filter and exact fallback.
///
/// # Errors
///
/// Returns an error if the exact path cannot represent an operand.
pub fn filtered<P: Predicate>(predicate: &P) -> Result<P::Output, NumericError> {
    decide(predicate, FilterPolicy::Filtered).map(|d| d.value)
}

/// Evaluates a predicate with exact arithmetic only.
///
/// # Errors
///
/// Returns an error if an operand cannot be represented exactly.
pub fn exact<P: Predicate>(predicate: &P) -> Result<P::Output, NumericError> {
    decide(predicate, FilterPolicy::ExactOnly).map(|d| d.value)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Sign of `a * b - c`.
    struct ProductMinus {
        a: f64,
        b: f64,
        c: f64,
    }

    impl Predicate for ProductMinus {
        type Output = Sign;
        const NAME: &'static str = "product_minus";

        fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
            let value = N::lift(self.a)? * N::lift(self.b)? - N::lift(self.c)?;
            Ok(value.sign())
        }
    }

    /// Claims every arithmetic is undecided.
    struct NeverDecides;

    impl Predicate for NeverDecides {
        type Output = ();
        const NAME: &'static str = "never_decides";

        fn evaluate<N: PredicateNumber>(&self) -> Result<Option<()>, NumericError> {
            Ok(None)
        }
    }

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("geofilter=trace")
            .with_test_writer()
            .try_init();
    }

    #[test]
    fn clear_cases_stay_on_fast_path() {
        init_tracing();
        let p = ProductMinus { a: 2.0, b: 3.0, c: 1.0 };
        let decision = decide(&p, FilterPolicy::Filtered).unwrap();
        assert_eq!(decision.value, Sign::Positive);
        assert_eq!(decision.path, EvaluationPath::Fast);
    }

    #[test]
    fn near_degenerate_cases_fall_back() {
        init_tracing();
        // The product rounds in f64, so the enclosure straddles zero.
        let p = ProductMinus { a: 0.1, b: 3.0, c: 0.1 * 3.0 };
        let mut evaluation = FilteredEvaluation::new(&p, FilterPolicy::Filtered);
        assert_eq!(evaluation.state(), &FilterState::Fast);
        assert_eq!(evaluation.step().unwrap(), &FilterState::Ambiguous);
        let state = evaluation.step().unwrap().clone();
        let FilterState::Certain(decision) = state else {
            panic!("exact step must decide");
        };
        assert_eq!(decision.path, EvaluationPath::Exact);
        assert_eq!(decision.value, exact(&p).unwrap());
    }

    #[test]
    fn certain_state_is_terminal() {
        let p = ProductMinus { a: 1.0, b: 1.0, c: 5.0 };
        let mut evaluation = FilteredEvaluation::new(&p, FilterPolicy::Filtered);
        evaluation.step().unwrap();
        assert!(evaluation.state().is_certain());
        let before = evaluation.state().clone();
        assert_eq!(evaluation.step().unwrap(), &before);
    }

    #[test]
    fn exact_only_skips_fast_path() {
        let p = ProductMinus { a: 2.0, b: 3.0, c: 1.0 };
        let decision = decide(&p, FilterPolicy::ExactOnly).unwrap();
        assert_eq!(decision.path, EvaluationPath::Exact);
        assert_eq!(decision.value, Sign::Positive);
    }

    #[test]
    fn exact_zero_is_decided() {
        let p = ProductMinus { a: 0.5, b: 4.0, c: 2.0 };
        assert_eq!(filtered(&p).unwrap(), Sign::Zero);
    }

    #[test]
    fn non_finite_input_is_a_hard_error() {
        init_tracing();
        let p = ProductMinus {
            a: f64::INFINITY,
            b: 0.0,
            c: 1.0,
        };
        assert!(matches!(
            filtered(&p),
            Err(NumericError::NonFinite { .. })
        ));
    }

    #[test]
    fn fast_path_rejects_what_exact_path_rejects() {
        // inf * 1 - 1 has a certain interval sign; it must still be an error.
        let p = ProductMinus {
            a: f64::INFINITY,
            b: 1.0,
            c: 1.0,
        };
        let expected = Err(NumericError::NonFinite {
            value: f64::INFINITY,
        });
        assert_eq!(decide(&p, FilterPolicy::Filtered).map(|d| d.value), expected);
        assert_eq!(exact(&p), expected);
        assert!(<Interval as PredicateNumber>::lift(f64::NAN).is_err());
    }

    #[test]
    fn undecided_exact_path_is_reported() {
        assert_eq!(
            filtered(&NeverDecides),
            Err(NumericError::Undecided {
                predicate: "never_decides"
            })
        );
    }
}
