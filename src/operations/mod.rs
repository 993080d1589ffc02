pub mod intersect;

pub use intersect::{do_intersect, intersection, Intersect, IntersectionResult};
