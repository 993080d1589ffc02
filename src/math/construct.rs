//! Constructions used by the intersection catalog.
//!
//! Rational constructions are evaluated in [`Exact`] arithmetic and rounded
//! once. Constructions that need a square root run in `f64`; only their
//! qualitative classification comes from exact predicates.

use super::coordinate_view::CoordinateView2;
use super::exact::Exact;
use super::predicates::{lift2, Direction};
use super::{Point2, Sign};
use crate::error::NumericError;

fn exact_point(p: &Point2) -> Result<(Exact, Exact), NumericError> {
    lift2::<Exact>(CoordinateView2::point(p))
}

fn round_point(x: &Exact, y: &Exact) -> Result<Point2, NumericError> {
    Ok(Point2::new(
        x.to_f64("constructed x coordinate")?,
        y.to_f64("constructed y coordinate")?,
    ))
}

/// A point with rational coordinates, for constructions that feed further
/// constructions before anything is rounded.
///
/// Ordered lexicographically by `x`, then `y`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct ExactPoint {
    x: Exact,
    y: Exact,
}

impl ExactPoint {
    pub(crate) fn new(p: &Point2) -> Result<Self, NumericError> {
        let (x, y) = exact_point(p)?;
        Ok(Self { x, y })
    }

    fn delta(&self, other: &Self) -> (Exact, Exact) {
        (other.x.clone() - self.x.clone(), other.y.clone() - self.y.clone())
    }

    /// Sign of the turn `a → b → c`, positive when counterclockwise.
    pub(crate) fn orientation(a: &Self, b: &Self, c: &Self) -> Sign {
        let (ux, uy) = a.delta(b);
        let (vx, vy) = a.delta(c);
        (ux * vy - uy * vx).sign()
    }

    /// Where the segment `self → end` meets the line through `a` and `b`.
    ///
    /// Returns `None` when they are parallel.
    pub(crate) fn crossing(&self, end: &Self, a: &Self, b: &Self) -> Option<Self> {
        let (dx, dy) = self.delta(end);
        let (ex, ey) = a.delta(b);
        let (wx, wy) = self.delta(a);
        let denom = dx.clone() * ey.clone() - dy.clone() * ex.clone();
        let t = (wx * ey - wy * ex).checked_div(&denom)?;
        Some(Self {
            x: self.x.clone() + t.clone() * dx,
            y: self.y.clone() + t * dy,
        })
    }

    /// Rounds to the nearest representable point.
    pub(crate) fn round(&self) -> Result<Point2, NumericError> {
        round_point(&self.x, &self.y)
    }
}

/// Crossing point of the lines `o1 + t * d1` and `o2 + u * d2`.
///
/// Returns `None` when the lines are parallel.
///
/// # Errors
///
/// Returns an error if an input is not finite or the result overflows.
pub fn line_crossing(
    o1: &Point2,
    d1: Direction<'_>,
    o2: &Point2,
    d2: Direction<'_>,
) -> Result<Option<Point2>, NumericError> {
    let (ax, ay) = exact_point(o1)?;
    let (bx, by) = exact_point(o2)?;
    let (ux, uy) = d1.lift::<Exact>()?;
    let (vx, vy) = d2.lift::<Exact>()?;
    let denom = ux.clone() * vy.clone() - uy.clone() * vx.clone();
    let numer = (bx - ax.clone()) * vy - (by - ay.clone()) * vx;
    let Some(t) = numer.checked_div(&denom) else {
        return Ok(None);
    };
    round_point(&(ax + t.clone() * ux), &(ay + t * uy)).map(Some)
}

/// Orthogonal projection of `point` onto the line `origin + t * direction`.
///
/// Returns `None` for a zero direction.
///
/// # Errors
///
/// Returns an error if an input is not finite or the result overflows.
pub fn project(
    origin: &Point2,
    direction: Direction<'_>,
    point: &Point2,
) -> Result<Option<Point2>, NumericError> {
    let (ox, oy) = exact_point(origin)?;
    let (px, py) = exact_point(point)?;
    let (dx, dy) = direction.lift::<Exact>()?;
    let len2 = dx.clone() * dx.clone() + dy.clone() * dy.clone();
    let numer = (px - ox.clone()) * dx.clone() + (py - oy.clone()) * dy.clone();
    let Some(t) = numer.checked_div(&len2) else {
        return Ok(None);
    };
    round_point(&(ox + t.clone() * dx), &(oy + t * dy)).map(Some)
}

/// The point where two externally tangent circles touch.
///
/// Divides `center_a → center_b` in the ratio `radius_a : radius_b`. Returns
/// `None` when both radii are zero.
///
/// # Errors
///
/// Returns an error if an input is not finite or the result overflows.
pub fn external_tangency(
    center_a: &Point2,
    radius_a: f64,
    center_b: &Point2,
    radius_b: f64,
) -> Result<Option<Point2>, NumericError> {
    let (ax, ay) = exact_point(center_a)?;
    let (bx, by) = exact_point(center_b)?;
    let ra = Exact::from_f64(radius_a)?;
    let rb = Exact::from_f64(radius_b)?;
    let Some(t) = ra.checked_div(&(ra.clone() + rb)) else {
        return Ok(None);
    };
    let x = ax.clone() + t.clone() * (bx - ax);
    let y = ay.clone() + t * (by - ay);
    round_point(&x, &y).map(Some)
}

/// The two points where a secant line crosses a circle, ordered along `direction`.
///
/// The caller must already know the line is secant; a tangent or missing
/// line collapses both points onto the foot of the perpendicular.
///
/// # Errors
///
/// Returns an error if an input is not finite, the direction is zero, or the
/// result overflows.
pub fn secant_points(
    origin: &Point2,
    direction: Direction<'_>,
    center: &Point2,
    radius: f64,
) -> Result<[Point2; 2], NumericError> {
    let foot = project(origin, direction, center)?.ok_or(NumericError::Unrepresentable {
        what: "secant of a zero direction",
    })?;

    let (ox, oy) = exact_point(origin)?;
    let (cx, cy) = exact_point(center)?;
    let (dx, dy) = direction.lift::<Exact>()?;
    let r = Exact::from_f64(radius)?;
    let len2 = dx.clone() * dx.clone() + dy.clone() * dy.clone();
    let cross = dx * (cy - oy) - dy * (cx - ox);
    let disc = r.clone() * r * len2.clone() - cross.clone() * cross;

    // Half-chord offset along the direction: sqrt(disc) / |d|^2 * d.
    let disc = disc.to_f64("secant discriminant")?.max(0.0);
    let len2 = len2.to_f64("squared direction length")?;
    let offset = direction.to_vector() * (disc.sqrt() / len2);
    Ok([foot - offset, foot + offset])
}

/// The two points where the boundaries of two crossing circles meet.
///
/// The first point lies to the left of `center_a → center_b`. The circles
/// must have distinct centers.
#[must_use]
pub fn circle_crossings(
    center_a: &Point2,
    radius_a: f64,
    center_b: &Point2,
    radius_b: f64,
) -> [Point2; 2] {
    let delta = center_b - center_a;
    let dist_sq = delta.norm_squared();
    let dist = dist_sq.sqrt();

    // Distance from center_a along the center line to the radical line.
    let a = (radius_a * radius_a - radius_b * radius_b + dist_sq) / (2.0 * dist);
    let h = (radius_a * radius_a - a * a).max(0.0).sqrt();

    let mid = center_a + delta * (a / dist);
    let perp = nalgebra::Vector2::new(-delta.y, delta.x) / dist;
    [mid + perp * h, mid - perp * h]
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::math::Vector2;

    #[test]
    fn crossing_of_diagonals() {
        let a0 = Point2::new(0.0, 0.0);
        let a1 = Point2::new(2.0, 2.0);
        let b0 = Point2::new(0.0, 2.0);
        let b1 = Point2::new(2.0, 0.0);
        let p = line_crossing(
            &a0,
            Direction::Between(&a0, &a1),
            &b0,
            Direction::Between(&b0, &b1),
        )
        .unwrap()
        .unwrap();
        assert_eq!(p, Point2::new(1.0, 1.0));
    }

    #[test]
    fn crossing_of_parallel_lines_is_none() {
        let o1 = Point2::new(0.0, 0.0);
        let o2 = Point2::new(0.0, 1.0);
        let d = Vector2::new(3.0, 1.0);
        let p = line_crossing(&o1, Direction::Vector(&d), &o2, Direction::Vector(&d)).unwrap();
        assert!(p.is_none());
    }

    #[test]
    fn crossing_is_rounded_once() {
        // The exact crossing is (1/3, 1/3).
        let o1 = Point2::new(0.0, 0.0);
        let d1 = Vector2::new(1.0, 1.0);
        let o2 = Point2::new(1.0, 0.0);
        let d2 = Vector2::new(-2.0, 1.0);
        let p = line_crossing(&o1, Direction::Vector(&d1), &o2, Direction::Vector(&d2))
            .unwrap()
            .unwrap();
        assert_relative_eq!(p, Point2::new(1.0 / 3.0, 1.0 / 3.0), max_relative = f64::EPSILON);
    }

    #[test]
    fn exact_crossing_stays_on_its_line() {
        let p = |x, y| ExactPoint::new(&Point2::new(x, y)).unwrap();
        let (a, b) = (p(1.0, 0.0), p(-1.0, 1.0));
        // The crossing (1/3, 1/3) lies on x + 2y = 1; its rounding does not.
        let x = p(0.0, 0.0).crossing(&p(1.0, 1.0), &a, &b).unwrap();
        assert_eq!(ExactPoint::orientation(&a, &b, &x), Sign::Zero);
        let rounded = x.round().unwrap();
        assert_eq!(rounded, Point2::new(1.0 / 3.0, 1.0 / 3.0));
        assert_ne!(ExactPoint::orientation(&a, &b, &p(rounded.x, rounded.y)), Sign::Zero);
        assert!(p(0.0, 0.0).crossing(&p(2.0, -1.0), &a, &b).is_none());
    }

    #[test]
    fn projection_onto_line() {
        let o = Point2::new(0.0, 0.0);
        let d = Vector2::new(2.0, 0.0);
        let p = project(&o, Direction::Vector(&d), &Point2::new(3.0, 5.0))
            .unwrap()
            .unwrap();
        assert_eq!(p, Point2::new(3.0, 0.0));
        let zero = Vector2::zeros();
        assert!(project(&o, Direction::Vector(&zero), &p).unwrap().is_none());
    }

    #[test]
    fn tangency_point_divides_centers() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 0.0);
        let p = external_tangency(&a, 1.0, &b, 2.0).unwrap().unwrap();
        assert_eq!(p, Point2::new(1.0, 0.0));
        assert!(external_tangency(&a, 0.0, &a, 0.0).unwrap().is_none());
    }

    #[test]
    fn secant_through_unit_circle() {
        let o = Point2::new(-5.0, 0.0);
        let d = Vector2::new(1.0, 0.0);
        let [p0, p1] = secant_points(&o, Direction::Vector(&d), &Point2::origin(), 1.0).unwrap();
        assert_relative_eq!(p0, Point2::new(-1.0, 0.0));
        assert_relative_eq!(p1, Point2::new(1.0, 0.0));
    }

    #[test]
    fn crossings_of_unit_circles() {
        let [p, q] = circle_crossings(&Point2::origin(), 1.0, &Point2::new(1.0, 0.0), 1.0);
        let half_sqrt3 = 3.0_f64.sqrt() / 2.0;
        assert_relative_eq!(p, Point2::new(0.5, half_sqrt3), epsilon = 1e-12);
        assert_relative_eq!(q, Point2::new(0.5, -half_sqrt3), epsilon = 1e-12);
    }
}
