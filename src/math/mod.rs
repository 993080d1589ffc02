pub mod construct;
pub mod coordinate_view;
pub mod exact;
pub mod filter;
pub mod interval;
pub mod predicates;

use std::cmp::Ordering;
use std::ops::Neg;

pub use coordinate_view::{Cartesian, CoordinateView, CoordinateView2, CoordinateView3, Coordinates};
pub use exact::Exact;
pub use filter::{
    exact, filtered, Decision, EvaluationPath, FilterPolicy, FilterState, FilteredEvaluation,
    Predicate, PredicateNumber,
};
pub use interval::Interval;

/// 2D point type.
pub type Point2 = nalgebra::Point2<f64>;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 2D vector type.
pub type Vector2 = nalgebra::Vector2<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// Sign of a real quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    #[must_use]
    pub fn is_positive(self) -> bool {
        self == Sign::Positive
    }

    #[must_use]
    pub fn is_negative(self) -> bool {
        self == Sign::Negative
    }

    #[must_use]
    pub fn is_zero(self) -> bool {
        self == Sign::Zero
    }

}

impl From<Ordering> for Sign {
    fn from(ordering: Ordering) -> Self {
        match ordering {
            Ordering::Less => Sign::Negative,
            Ordering::Equal => Sign::Zero,
            Ordering::Greater => Sign::Positive,
        }
    }
}

impl Neg for Sign {
    type Output = Self;

    fn neg(self) -> Self {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }
}
