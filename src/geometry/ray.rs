use crate::error::Result;
use crate::math::predicates::Direction;
use crate::math::{Point2, Vector2};

use super::line::{Line, Support};

/// A half-line starting at `source`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    source: Point2,
    support: Support,
}

impl Ray {
    /// Creates a ray from a source point and a direction vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero.
    pub fn new(source: Point2, direction: Vector2) -> Result<Self> {
        Self::with_support(source, Support::Vector(direction))
    }

    /// Creates the ray from `source` passing through `p`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(source: Point2, p: Point2) -> Result<Self> {
        Self::with_support(source, Support::Through(p))
    }

    fn with_support(source: Point2, support: Support) -> Result<Self> {
        support.validate(&source)?;
        Ok(Self { source, support })
    }

    /// Returns the start point.
    #[must_use]
    pub fn source(&self) -> &Point2 {
        &self.source
    }

    /// Returns how the direction is stored.
    #[must_use]
    pub fn support(&self) -> &Support {
        &self.support
    }

    /// Returns the exact direction.
    #[must_use]
    pub fn direction(&self) -> Direction<'_> {
        self.support.direction(&self.source)
    }

    /// Returns the direction rounded to `f64`.
    #[must_use]
    pub fn to_vector(&self) -> Vector2 {
        self.direction().to_vector()
    }

    /// Returns the supporting line.
    #[must_use]
    pub fn supporting_line(&self) -> Line {
        Line::from_parts(self.source, self.support)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn zero_direction_is_rejected() {
        assert!(Ray::new(Point2::origin(), Vector2::zeros()).is_err());
        assert!(Ray::through(Point2::origin(), Point2::origin()).is_err());
    }

    #[test]
    fn supporting_line_keeps_direction() {
        let ray = Ray::through(Point2::new(1.0, 1.0), Point2::new(2.0, 3.0)).unwrap();
        let line = ray.supporting_line();
        assert_eq!(line.point(), ray.source());
        assert_eq!(line.to_vector(), Vector2::new(1.0, 2.0));
    }
}
