use crate::error::NumericError;
use crate::math::predicates::{orientation, Orientation};
use crate::math::Point2;

use super::Bbox;

/// A closed triangle. Vertices may come in either orientation or be collinear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    vertices: [Point2; 3],
}

impl Triangle {
    #[must_use]
    pub fn new(a: Point2, b: Point2, c: Point2) -> Self {
        Self {
            vertices: [a, b, c],
        }
    }

    /// Returns vertex `i`, taken modulo 3.
    #[must_use]
    pub fn vertex(&self, i: usize) -> &Point2 {
        &self.vertices[i % 3]
    }

    #[must_use]
    pub fn vertices(&self) -> &[Point2; 3] {
        &self.vertices
    }

    /// Returns the orientation of the vertex sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite.
    pub fn orientation(&self) -> Result<Orientation, NumericError> {
        let [a, b, c] = &self.vertices;
        orientation(a, b, c)
    }

    /// Returns whether the vertices are collinear.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite.
    pub fn is_degenerate(&self) -> Result<bool, NumericError> {
        Ok(self.orientation()? == Orientation::Collinear)
    }

    #[must_use]
    pub fn bbox(&self) -> Bbox {
        Bbox::enclosing(&self.vertices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn vertex_index_wraps() {
        let t = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_eq!(t.vertex(3), t.vertex(0));
        assert_eq!(t.vertex(5), &Point2::new(0.0, 1.0));
    }

    #[test]
    fn orientation_and_degeneracy() {
        let ccw = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
        );
        assert_eq!(ccw.orientation().unwrap(), Orientation::CounterClockwise);
        let exact = Triangle::new(
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(3.0, 3.0),
        );
        assert!(exact.is_degenerate().unwrap());
    }
}
