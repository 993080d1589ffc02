use crate::error::{GeometryError, Result};
use crate::math::predicates::Direction;
use crate::math::{Point2, Vector2};

/// How a line or ray fixes its direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Support {
    /// A free direction vector.
    Vector(Vector2),
    /// A second point; the direction is the exact difference to it.
    Through(Point2),
}

impl Support {
    pub(crate) fn validate(&self, origin: &Point2) -> Result<()> {
        let zero = match self {
            Support::Vector(v) => *v == Vector2::zeros(),
            Support::Through(q) => q == origin,
        };
        if zero {
            return Err(GeometryError::ZeroVector.into());
        }
        Ok(())
    }

    pub(crate) fn direction<'a>(&'a self, origin: &'a Point2) -> Direction<'a> {
        match self {
            Support::Vector(v) => Direction::Vector(v),
            Support::Through(q) => Direction::Between(origin, q),
        }
    }
}

/// An infinite directed line through `point`.
///
/// The parametric form is: `P(t) = point + t * direction`. The direction is
/// kept as given, never normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    point: Point2,
    support: Support,
}

impl Line {
    /// Creates a line from a point and a direction vector.
    ///
    /// # Errors
    ///
    /// Returns an error if the direction vector is zero.
    pub fn new(point: Point2, direction: Vector2) -> Result<Self> {
        Self::with_support(point, Support::Vector(direction))
    }

    /// Creates the line through `p` directed towards `q`.
    ///
    /// # Errors
    ///
    /// Returns an error if the points coincide.
    pub fn through(p: Point2, q: Point2) -> Result<Self> {
        Self::with_support(p, Support::Through(q))
    }

    fn with_support(point: Point2, support: Support) -> Result<Self> {
        support.validate(&point)?;
        Ok(Self { point, support })
    }

    /// Assembles a line from an already validated support.
    pub(crate) fn from_parts(point: Point2, support: Support) -> Self {
        Self { point, support }
    }

    /// Returns the reference point.
    #[must_use]
    pub fn point(&self) -> &Point2 {
        &self.point
    }

    /// Returns how the direction is stored.
    #[must_use]
    pub fn support(&self) -> &Support {
        &self.support
    }

    /// Returns the exact direction.
    #[must_use]
    pub fn direction(&self) -> Direction<'_> {
        self.support.direction(&self.point)
    }

    /// Returns the direction rounded to `f64`.
    #[must_use]
    pub fn to_vector(&self) -> Vector2 {
        self.direction().to_vector()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeofilterError;

    #[test]
    fn zero_direction_is_rejected() {
        let p = Point2::new(1.0, 1.0);
        assert!(matches!(
            Line::new(p, Vector2::zeros()),
            Err(GeofilterError::Geometry(GeometryError::ZeroVector))
        ));
        assert!(Line::through(p, p).is_err());
    }

    #[test]
    fn direction_is_not_normalized() {
        let line = Line::new(Point2::origin(), Vector2::new(3.0, 4.0)).unwrap();
        assert_eq!(line.to_vector(), Vector2::new(3.0, 4.0));
    }
}
