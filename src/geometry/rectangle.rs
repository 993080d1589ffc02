use crate::error::{GeometryError, NumericError, Result};
use crate::math::predicates::ensure_finite;
use crate::math::Point2;

use super::Bbox;

/// A closed axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    min: Point2,
    max: Point2,
}

impl Rectangle {
    /// Creates a rectangle from its lower-left and upper-right corners.
    ///
    /// # Errors
    ///
    /// Returns an error if `min` exceeds `max` in either coordinate.
    pub fn new(min: Point2, max: Point2) -> Result<Self> {
        if !(min.x <= max.x && min.y <= max.y) {
            return Err(GeometryError::InvalidBounds {
                min_x: min.x,
                min_y: min.y,
                max_x: max.x,
                max_y: max.y,
            }
            .into());
        }
        Ok(Self { min, max })
    }

    /// Creates the rectangle spanned by two opposite corners in any order.
    #[must_use]
    pub fn from_corners(p: Point2, q: Point2) -> Self {
        Self {
            min: Point2::new(p.x.min(q.x), p.y.min(q.y)),
            max: Point2::new(p.x.max(q.x), p.y.max(q.y)),
        }
    }

    #[must_use]
    pub fn min(&self) -> &Point2 {
        &self.min
    }

    #[must_use]
    pub fn max(&self) -> &Point2 {
        &self.max
    }

    /// Corners in counterclockwise order, starting at `min`.
    #[must_use]
    pub fn vertices(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Returns whether the rectangle has zero width or height.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.min.x == self.max.x || self.min.y == self.max.y
    }

    /// Returns whether `p` lies in the closed rectangle.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate of `p` or of a corner is not finite.
    pub fn contains(&self, p: &Point2) -> std::result::Result<bool, NumericError> {
        self.ensure_finite()?;
        ensure_finite(p)?;
        Ok(self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y)
    }

    /// Rejects a rectangle with an infinite corner.
    ///
    /// # Errors
    ///
    /// Returns [`NumericError::NonFinite`] for the first infinite coordinate.
    pub fn ensure_finite(&self) -> std::result::Result<(), NumericError> {
        ensure_finite(&self.min)?;
        ensure_finite(&self.max)
    }

    #[must_use]
    pub fn bbox(&self) -> Bbox {
        Bbox::enclosing(&[self.min, self.max])
    }
}

impl From<Bbox> for Rectangle {
    fn from(b: Bbox) -> Self {
        Self {
            min: b.min(),
            max: b.max(),
        }
    }
}
