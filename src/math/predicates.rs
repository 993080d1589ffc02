//! Filtered geometric predicates.
//!
//! Every predicate reads its operands through [`CoordinateView`]s and is
//! written once over [`PredicateNumber`], so the interval filter and the
//! exact fallback evaluate the same expression.

use super::coordinate_view::{CoordinateView2, CoordinateView3};
use super::filter::{filtered, Predicate, PredicateNumber};
use super::{Interval, Point2, Point3, Sign, Vector2};
use crate::error::NumericError;

/// Orientation of an ordered triple of points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl From<Sign> for Orientation {
    fn from(sign: Sign) -> Self {
        match sign {
            Sign::Negative => Orientation::Clockwise,
            Sign::Zero => Orientation::Collinear,
            Sign::Positive => Orientation::CounterClockwise,
        }
    }
}

/// A 2D direction, either a free vector or the difference of two points.
///
/// The point-pair form keeps directions of segments exact: the difference is
/// formed inside the predicate arithmetic, never rounded in `f64`.
#[derive(Debug, Clone, Copy)]
pub enum Direction<'a> {
    Vector(&'a Vector2),
    Between(&'a Point2, &'a Point2),
}

impl Direction<'_> {
    /// Lifts the direction's components into `N`.
    pub(crate) fn lift<N: PredicateNumber>(&self) -> Result<(N, N), NumericError> {
        match *self {
            Direction::Vector(v) => lift2(CoordinateView2::vector(v)),
            Direction::Between(from, to) => {
                let (fx, fy) = lift2::<N>(CoordinateView2::point(from))?;
                let (tx, ty) = lift2::<N>(CoordinateView2::point(to))?;
                Ok((tx - fx, ty - fy))
            }
        }
    }

    /// Rounded `f64` components, for constructions that are approximate anyway.
    #[must_use]
    pub fn to_vector(&self) -> Vector2 {
        match *self {
            Direction::Vector(v) => *v,
            Direction::Between(from, to) => to - from,
        }
    }
}

/// Lifts both coordinates of a 2D point or vector.
pub(crate) fn lift2<N: PredicateNumber>(view: CoordinateView2<'_>) -> Result<(N, N), NumericError> {
    Ok((N::lift(view.get())?, N::lift(view.at(1))?))
}

fn lift_point<N: PredicateNumber>(p: &Point2) -> Result<(N, N), NumericError> {
    lift2(CoordinateView2::point(p))
}

/// Rejects a point with a NaN or infinite coordinate, as any predicate on it would.
pub(crate) fn ensure_finite(p: &Point2) -> Result<(), NumericError> {
    lift_point::<Interval>(p).map(drop)
}

fn cross<N: PredicateNumber>(ux: N, uy: N, vx: N, vy: N) -> N {
    ux * vy - uy * vx
}

fn dot<N: PredicateNumber>(ux: N, uy: N, vx: N, vy: N) -> N {
    ux * vx + uy * vy
}

/// Orientation of `c` with respect to the directed line `a → b`.
#[derive(Debug, Clone, Copy)]
pub struct Orient2<'a> {
    pub a: &'a Point2,
    pub b: &'a Point2,
    pub c: &'a Point2,
}

impl Predicate for Orient2<'_> {
    type Output = Orientation;
    const NAME: &'static str = "orient_2";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Orientation>, NumericError> {
        let (ax, ay) = lift_point::<N>(self.a)?;
        let (bx, by) = lift_point::<N>(self.b)?;
        let (cx, cy) = lift_point::<N>(self.c)?;
        let det = cross(bx - ax.clone(), by - ay.clone(), cx - ax, cy - ay);
        Ok(det.sign().map(Orientation::from))
    }
}

/// Side of `point` relative to the directed line through `origin` along `direction`.
///
/// Positive on the left, negative on the right, zero on the line.
#[derive(Debug, Clone, Copy)]
pub struct Side<'a> {
    pub origin: &'a Point2,
    pub direction: Direction<'a>,
    pub point: &'a Point2,
}

impl Predicate for Side<'_> {
    type Output = Sign;
    const NAME: &'static str = "side";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (dx, dy) = self.direction.lift::<N>()?;
        let (ox, oy) = lift_point::<N>(self.origin)?;
        let (px, py) = lift_point::<N>(self.point)?;
        Ok(cross(dx, dy, px - ox, py - oy).sign())
    }
}

/// Sign of `direction · (to - from)`: whether `to` lies ahead of `from`.
#[derive(Debug, Clone, Copy)]
pub struct AlongSign<'a> {
    pub direction: Direction<'a>,
    pub from: &'a Point2,
    pub to: &'a Point2,
}

impl Predicate for AlongSign<'_> {
    type Output = Sign;
    const NAME: &'static str = "along_sign";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (dx, dy) = self.direction.lift::<N>()?;
        let (fx, fy) = lift_point::<N>(self.from)?;
        let (tx, ty) = lift_point::<N>(self.to)?;
        Ok(dot(dx, dy, tx - fx, ty - fy).sign())
    }
}

/// Sign of the cross product `u × v`; zero iff the directions are parallel.
#[derive(Debug, Clone, Copy)]
pub struct DirectionCross<'a> {
    pub u: Direction<'a>,
    pub v: Direction<'a>,
}

impl Predicate for DirectionCross<'_> {
    type Output = Sign;
    const NAME: &'static str = "direction_cross";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (ux, uy) = self.u.lift::<N>()?;
        let (vx, vy) = self.v.lift::<N>()?;
        Ok(cross(ux, uy, vx, vy).sign())
    }
}

/// Sign of the dot product `u · v`.
#[derive(Debug, Clone, Copy)]
pub struct DirectionDot<'a> {
    pub u: Direction<'a>,
    pub v: Direction<'a>,
}

impl Predicate for DirectionDot<'_> {
    type Output = Sign;
    const NAME: &'static str = "direction_dot";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (ux, uy) = self.u.lift::<N>()?;
        let (vx, vy) = self.v.lift::<N>()?;
        Ok(dot(ux, uy, vx, vy).sign())
    }
}

/// Sign of `|point - center|² - radius²`: negative inside the circle.
#[derive(Debug, Clone, Copy)]
pub struct CircleSide<'a> {
    pub center: &'a Point2,
    pub radius: f64,
    pub point: &'a Point2,
}

impl Predicate for CircleSide<'_> {
    type Output = Sign;
    const NAME: &'static str = "circle_side";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (cx, cy) = lift_point::<N>(self.center)?;
        let (px, py) = lift_point::<N>(self.point)?;
        let r = N::lift(self.radius)?;
        let (dx, dy) = (px - cx, py - cy);
        Ok((dot(dx.clone(), dy.clone(), dx, dy) - r.clone() * r).sign())
    }
}

/// Distance class of a line against a circle.
///
/// Sign of `(d × (c - o))² - r²|d|²`, which is the squared distance from the
/// center to the line minus the squared radius, scaled by `|d|²`: positive
/// when the line misses the disk, zero when tangent, negative when secant.
#[derive(Debug, Clone, Copy)]
pub struct LineCircle<'a> {
    pub origin: &'a Point2,
    pub direction: Direction<'a>,
    pub center: &'a Point2,
    pub radius: f64,
}

impl Predicate for LineCircle<'_> {
    type Output = Sign;
    const NAME: &'static str = "line_circle";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let (dx, dy) = self.direction.lift::<N>()?;
        let (ox, oy) = lift_point::<N>(self.origin)?;
        let (cx, cy) = lift_point::<N>(self.center)?;
        let r = N::lift(self.radius)?;
        let c = cross(dx.clone(), dy.clone(), cx - ox, cy - oy);
        let len2 = dot(dx.clone(), dy.clone(), dx, dy);
        Ok((c.clone() * c - r.clone() * r * len2).sign())
    }
}

/// Relative position of two circles.
///
/// Returns `(outer, inner)`: the signs of `d² - (r1 + r2)²` and
/// `d² - (r1 - r2)²` where `d` is the distance between the centers.
#[derive(Debug, Clone, Copy)]
pub struct CirclePair<'a> {
    pub center_a: &'a Point2,
    pub radius_a: f64,
    pub center_b: &'a Point2,
    pub radius_b: f64,
}

impl Predicate for CirclePair<'_> {
    type Output = (Sign, Sign);
    const NAME: &'static str = "circle_pair";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<(Sign, Sign)>, NumericError> {
        let (ax, ay) = lift_point::<N>(self.center_a)?;
        let (bx, by) = lift_point::<N>(self.center_b)?;
        let ra = N::lift(self.radius_a)?;
        let rb = N::lift(self.radius_b)?;
        let (dx, dy) = (bx - ax, by - ay);
        let d2 = dot(dx.clone(), dy.clone(), dx, dy);
        let sum = ra.clone() + rb.clone();
        let diff = ra - rb;
        let outer = (d2.clone() - sum.clone() * sum).sign();
        let inner = (d2 - diff.clone() * diff).sign();
        Ok(outer.zip(inner))
    }
}

/// Sign of the determinant `[b - a, c - a, d - a]`.
///
/// Positive when `a, b, c` appear counterclockwise seen from `d`.
#[derive(Debug, Clone, Copy)]
pub struct Orient3<'a> {
    pub a: &'a Point3,
    pub b: &'a Point3,
    pub c: &'a Point3,
    pub d: &'a Point3,
}

impl Predicate for Orient3<'_> {
    type Output = Sign;
    const NAME: &'static str = "orient_3";

    fn evaluate<N: PredicateNumber>(&self) -> Result<Option<Sign>, NumericError> {
        let a = lift_coordinates::<N>(CoordinateView3::point(self.a))?;
        let relative = |p: &Point3| -> Result<Vec<N>, NumericError> {
            Ok(lift_coordinates::<N>(CoordinateView3::point(p))?
                .into_iter()
                .zip(a.iter().cloned())
                .map(|(x, o)| x - o)
                .collect())
        };
        let (u, v, w) = (relative(self.b)?, relative(self.c)?, relative(self.d)?);
        let m0 = v[1].clone() * w[2].clone() - v[2].clone() * w[1].clone();
        let m1 = v[0].clone() * w[2].clone() - v[2].clone() * w[0].clone();
        let m2 = v[0].clone() * w[1].clone() - v[1].clone() * w[0].clone();
        let det = u[0].clone() * m0 - u[1].clone() * m1 + u[2].clone() * m2;
        Ok(det.sign())
    }
}

/// Lifts every coordinate of a 3D point or vector, in order.
fn lift_coordinates<N: PredicateNumber>(view: CoordinateView3<'_>) -> Result<Vec<N>, NumericError> {
    view.coordinates().map(N::lift).collect()
}

/// Orientation of `c` with respect to the directed line `a → b`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn orientation(a: &Point2, b: &Point2, c: &Point2) -> Result<Orientation, NumericError> {
    filtered(&Orient2 { a, b, c })
}

/// Side of `point` relative to the directed line `origin + t * direction`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn side(origin: &Point2, direction: Direction<'_>, point: &Point2) -> Result<Sign, NumericError> {
    filtered(&Side {
        origin,
        direction,
        point,
    })
}

/// Sign of `direction · (to - from)`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn along(direction: Direction<'_>, from: &Point2, to: &Point2) -> Result<Sign, NumericError> {
    filtered(&AlongSign {
        direction,
        from,
        to,
    })
}

/// Sign of `u × v`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn cross_sign(u: Direction<'_>, v: Direction<'_>) -> Result<Sign, NumericError> {
    filtered(&DirectionCross { u, v })
}

/// Sign of `u · v`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn dot_sign(u: Direction<'_>, v: Direction<'_>) -> Result<Sign, NumericError> {
    filtered(&DirectionDot { u, v })
}

/// Sign of `|point - center|² - radius²`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn circle_side(center: &Point2, radius: f64, point: &Point2) -> Result<Sign, NumericError> {
    filtered(&CircleSide {
        center,
        radius,
        point,
    })
}

/// Distance class of a line against a circle, see [`LineCircle`].
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn line_circle(
    origin: &Point2,
    direction: Direction<'_>,
    center: &Point2,
    radius: f64,
) -> Result<Sign, NumericError> {
    filtered(&LineCircle {
        origin,
        direction,
        center,
        radius,
    })
}

/// Relative position of two circles, see [`CirclePair`].
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn circle_pair(
    center_a: &Point2,
    radius_a: f64,
    center_b: &Point2,
    radius_b: f64,
) -> Result<(Sign, Sign), NumericError> {
    filtered(&CirclePair {
        center_a,
        radius_a,
        center_b,
        radius_b,
    })
}

/// Orientation of `d` against the plane through `a`, `b`, `c`.
///
/// # Errors
///
/// Returns an error if a coordinate is not finite.
pub fn orientation_3(a: &Point3, b: &Point3, c: &Point3, d: &Point3) -> Result<Sign, NumericError> {
    filtered(&Orient3 { a, b, c, d })
}
