use crate::error::{GeometryError, Result};
use crate::math::Point2;

/// An axis-aligned bounding box given by its extreme coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bbox {
    xmin: f64,
    ymin: f64,
    xmax: f64,
    ymax: f64,
}

impl Bbox {
    /// Creates a box from its bounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a minimum exceeds its maximum or a bound is NaN.
    pub fn new(xmin: f64, ymin: f64, xmax: f64, ymax: f64) -> Result<Self> {
        if !(xmin <= xmax && ymin <= ymax) {
            return Err(GeometryError::InvalidBounds {
                min_x: xmin,
                min_y: ymin,
                max_x: xmax,
                max_y: ymax,
            }
            .into());
        }
        Ok(Self {
            xmin,
            ymin,
            xmax,
            ymax,
        })
    }

    /// Smallest box containing every point of a non-empty slice.
    pub(crate) fn enclosing(points: &[Point2]) -> Self {
        points.iter().fold(
            Self {
                xmin: f64::INFINITY,
                ymin: f64::INFINITY,
                xmax: f64::NEG_INFINITY,
                ymax: f64::NEG_INFINITY,
            },
            |b, p| Self {
                xmin: b.xmin.min(p.x),
                ymin: b.ymin.min(p.y),
                xmax: b.xmax.max(p.x),
                ymax: b.ymax.max(p.y),
            },
        )
    }

    #[must_use]
    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    #[must_use]
    pub fn ymin(&self) -> f64 {
        self.ymin
    }

    #[must_use]
    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    #[must_use]
    pub fn ymax(&self) -> f64 {
        self.ymax
    }

    /// Lower-left corner.
    #[must_use]
    pub fn min(&self) -> Point2 {
        Point2::new(self.xmin, self.ymin)
    }

    /// Upper-right corner.
    #[must_use]
    pub fn max(&self) -> Point2 {
        Point2::new(self.xmax, self.ymax)
    }

    /// Returns whether the two closed boxes share at least one point.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.xmin <= other.xmax
            && other.xmin <= self.xmax
            && self.ymin <= other.ymax
            && other.ymin <= self.ymax
    }
}
