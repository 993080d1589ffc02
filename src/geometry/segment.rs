use crate::math::predicates::Direction;
use crate::math::{Point2, Vector2};

/// A directed line segment from `source` to `target`.
///
/// Zero-length segments are allowed; intersections treat them as points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    source: Point2,
    target: Point2,
}

impl Segment {
    /// Creates a segment between two points.
    #[must_use]
    pub fn new(source: Point2, target: Point2) -> Self {
        Self { source, target }
    }

    /// Returns the start point.
    #[must_use]
    pub fn source(&self) -> &Point2 {
        &self.source
    }

    /// Returns the end point.
    #[must_use]
    pub fn target(&self) -> &Point2 {
        &self.target
    }

    /// Returns the exact direction `target - source`.
    #[must_use]
    pub fn direction(&self) -> Direction<'_> {
        Direction::Between(&self.source, &self.target)
    }

    /// Returns `target - source`, rounded to `f64`.
    #[must_use]
    pub fn to_vector(&self) -> Vector2 {
        self.target - self.source
    }

    /// Returns whether both endpoints coincide.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.source == self.target
    }

    /// Returns the segment with its endpoints swapped.
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self::new(self.target, self.source)
    }

    /// Returns whether both segments cover the same point set.
    #[must_use]
    pub fn has_same_points(&self, other: &Self) -> bool {
        self == other || *self == other.reversed()
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn degenerate_segment() {
        let p = Point2::new(1.0, 2.0);
        assert!(Segment::new(p, p).is_degenerate());
        assert!(!Segment::new(p, Point2::origin()).is_degenerate());
    }

    #[test]
    fn reversed_covers_same_points() {
        let s = Segment::new(Point2::new(0.0, 0.0), Point2::new(2.0, 1.0));
        let r = s.reversed();
        assert_eq!(r.source(), s.target());
        assert!(s.has_same_points(&r));
        assert_ne!(s, r);
    }
}
