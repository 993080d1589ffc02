use crate::error::{GeometryError, NumericError, Result};
use crate::math::predicates::circle_side;
use crate::math::Point2;

use super::Bbox;

/// A closed disk given by center and radius.
///
/// A zero radius is allowed and denotes a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    center: Point2,
    radius: f64,
}

impl Circle {
    /// Creates a circle.
    ///
    /// # Errors
    ///
    /// Returns an error if the radius is negative or not finite.
    pub fn new(center: Point2, radius: f64) -> Result<Self> {
        if !radius.is_finite() {
            return Err(GeometryError::NonFinite {
                parameter: "radius",
                value: radius,
            }
            .into());
        }
        if radius < 0.0 {
            return Err(GeometryError::Degenerate(format!("negative radius {radius}")).into());
        }
        Ok(Self { center, radius })
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> &Point2 {
        &self.center
    }

    /// Returns the radius.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Returns whether the circle collapses to its center.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.radius == 0.0
    }

    /// Returns whether `point` lies in the closed disk.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite.
    pub fn contains(&self, point: &Point2) -> std::result::Result<bool, NumericError> {
        Ok(!circle_side(&self.center, self.radius, point)?.is_positive())
    }

    /// Returns a box enclosing the disk, widened by one ulp per side.
    #[must_use]
    pub fn bbox(&self) -> Bbox {
        let lo = self.center.map(|c| (c - self.radius).next_down());
        let hi = self.center.map(|c| (c + self.radius).next_up());
        Bbox::enclosing(&[lo, hi])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::GeofilterError;

    #[test]
    fn invalid_radius_is_rejected() {
        assert!(matches!(
            Circle::new(Point2::origin(), -1.0),
            Err(GeofilterError::Geometry(GeometryError::Degenerate(_)))
        ));
        assert!(matches!(
            Circle::new(Point2::origin(), f64::NAN),
            Err(GeofilterError::Geometry(GeometryError::NonFinite { .. }))
        ));
        assert!(Circle::new(Point2::origin(), 0.0).unwrap().is_degenerate());
    }

    #[test]
    fn boundary_points_are_contained() {
        let c = Circle::new(Point2::new(1.0, 1.0), 2.0).unwrap();
        assert!(c.contains(&Point2::new(3.0, 1.0)).unwrap());
        assert!(c.contains(&Point2::new(1.0, 1.0)).unwrap());
        assert!(!c.contains(&Point2::new(3.0, 1.5)).unwrap());
    }

    #[test]
    fn bbox_encloses_disk() {
        let b = Circle::new(Point2::new(0.1, 0.2), 0.3).unwrap().bbox();
        assert!(b.xmin() <= 0.1 - 0.3 && b.xmax() >= 0.1 + 0.3);
        assert!(b.ymin() <= 0.2 - 0.3 && b.ymax() >= 0.2 + 0.3);
    }
}
