//! Lines, rays and segments as ranges on a directed line.

use crate::error::{NumericError, Result};
use crate::geometry::{Line, Ray, Segment};
use crate::math::construct::line_crossing;
use crate::math::predicates::{along, cross_sign, dot_sign, side, Direction};
use crate::math::{Point2, Sign};

use super::result::{LineIntersection, LineRayIntersection, RayRayIntersection, SegmentIntersection};
use super::Intersect;

/// A range `origin + t * direction` bounded below and above by input points.
#[derive(Debug, Clone, Copy)]
pub(super) struct Linear<'a> {
    pub(super) origin: &'a Point2,
    pub(super) direction: Direction<'a>,
    pub(super) lower: Option<&'a Point2>,
    pub(super) upper: Option<&'a Point2>,
}

impl<'a> Linear<'a> {
    pub(super) fn line(line: &'a Line) -> Self {
        Self {
            origin: line.point(),
            direction: line.direction(),
            lower: None,
            upper: None,
        }
    }

    pub(super) fn ray(ray: &'a Ray) -> Self {
        Self {
            origin: ray.source(),
            direction: ray.direction(),
            lower: Some(ray.source()),
            upper: None,
        }
    }

    /// The segment `a → b`; the points must differ.
    pub(super) fn edge(a: &'a Point2, b: &'a Point2) -> Self {
        Self {
            origin: a,
            direction: Direction::Between(a, b),
            lower: Some(a),
            upper: Some(b),
        }
    }

    /// Returns whether `p` lies on the range.
    pub(super) fn contains(&self, p: &Point2) -> Result<bool> {
        if side(self.origin, self.direction, p)? != Sign::Zero {
            return Ok(false);
        }
        if let Some(lower) = self.lower {
            if along(self.direction, lower, p)?.is_negative() {
                return Ok(false);
            }
        }
        if let Some(upper) = self.upper {
            if along(self.direction, p, upper)?.is_negative() {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// The bounding points, lower first.
    pub(super) fn bounds(&self) -> impl Iterator<Item = &'a Point2> {
        self.lower.into_iter().chain(self.upper)
    }
}

/// A linear primitive, or the point a zero-length segment collapses to.
#[derive(Debug, Clone, Copy)]
pub(super) enum Span<'a> {
    Point(&'a Point2),
    Linear(Linear<'a>),
}

impl<'a> Span<'a> {
    pub(super) fn segment(segment: &'a Segment) -> Self {
        if segment.is_degenerate() {
            Span::Point(segment.source())
        } else {
            Span::Linear(Linear::edge(segment.source(), segment.target()))
        }
    }

    /// Returns whether `p` lies on the span.
    pub(super) fn contains(&self, p: &Point2) -> Result<bool> {
        match self {
            Span::Point(q) => Ok(*q == p),
            Span::Linear(range) => range.contains(p),
        }
    }
}

/// Primitives that reduce to a [`Span`].
pub(super) trait Spanned {
    fn span(&self) -> Span<'_>;
}

impl Spanned for Line {
    fn span(&self) -> Span<'_> {
        Span::Linear(Linear::line(self))
    }
}

impl Spanned for Ray {
    fn span(&self) -> Span<'_> {
        Span::Linear(Linear::ray(self))
    }
}

impl Spanned for Segment {
    fn span(&self) -> Span<'_> {
        Span::segment(self)
    }
}

/// Which operand an overlap was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Operand {
    First,
    Second,
}

/// Intersection of two ranges.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Overlap {
    Empty,
    Point(Point2),
    /// Endpoints ordered along the first range.
    Segment(Point2, Point2),
    /// An unbounded overlap equal to one of the operands, which is a ray.
    Ray(Operand),
    /// Both operands are lines and coincide.
    Line,
}

#[derive(Clone, Copy)]
struct Bound<'a> {
    point: &'a Point2,
    operand: Operand,
}

impl<'a> Bound<'a> {
    fn tag(point: Option<&'a Point2>, operand: Operand) -> Option<Self> {
        point.map(|point| Self { point, operand })
    }
}

/// Intersects two ranges.
pub(super) fn overlap(a: &Linear<'_>, b: &Linear<'_>) -> Result<Overlap> {
    match cross_sign(a.direction, b.direction)? {
        Sign::Zero => collinear_overlap(a, b),
        turn => crossing(a, b, turn),
    }
}

/// Ranges on crossing lines meet at most at the crossing point.
///
/// Walking along `a`, the side of `b`'s line changes from `turn` to `-turn`;
/// walking along `b`, the side of `a`'s line changes from `-turn` to `turn`.
/// A bound on the wrong side cuts the crossing off.
fn crossing(a: &Linear<'_>, b: &Linear<'_>, turn: Sign) -> Result<Overlap> {
    let mut on_crossing = None;
    for (range, other, lower_side, upper_side) in [(a, b, turn, -turn), (b, a, -turn, turn)] {
        for (bound, expected) in [(range.lower, lower_side), (range.upper, upper_side)] {
            let Some(p) = bound else { continue };
            let s = side(other.origin, other.direction, p)?;
            if s == Sign::Zero {
                on_crossing.get_or_insert(*p);
            } else if s != expected {
                return Ok(Overlap::Empty);
            }
        }
    }
    let point = match on_crossing {
        Some(p) => p,
        None => line_crossing(a.origin, a.direction, b.origin, b.direction)?
            .ok_or(NumericError::Undecided {
                predicate: "line_crossing",
            })?,
    };
    Ok(Overlap::Point(point))
}

fn collinear_overlap(a: &Linear<'_>, b: &Linear<'_>) -> Result<Overlap> {
    if side(a.origin, a.direction, b.origin)? != Sign::Zero {
        return Ok(Overlap::Empty);
    }
    let d = a.direction;
    let (b_lower, b_upper) = if dot_sign(d, b.direction)?.is_positive() {
        (b.lower, b.upper)
    } else {
        (b.upper, b.lower)
    };
    let lower = later(
        d,
        Bound::tag(a.lower, Operand::First),
        Bound::tag(b_lower, Operand::Second),
    )?;
    let upper = earlier(
        d,
        Bound::tag(a.upper, Operand::First),
        Bound::tag(b_upper, Operand::Second),
    )?;

    Ok(match (lower, upper) {
        (None, None) => Overlap::Line,
        (Some(bound), None) | (None, Some(bound)) => Overlap::Ray(bound.operand),
        (Some(lo), Some(hi)) => match along(d, lo.point, hi.point)? {
            Sign::Negative => Overlap::Empty,
            Sign::Zero => Overlap::Point(*lo.point),
            Sign::Positive => Overlap::Segment(*lo.point, *hi.point),
        },
    })
}

/// The bound further along `d`; ties keep `x`.
fn later<'a>(d: Direction<'_>, x: Option<Bound<'a>>, y: Option<Bound<'a>>) -> Result<Option<Bound<'a>>> {
    Ok(match (x, y) {
        (Some(x), Some(y)) => Some(if along(d, x.point, y.point)?.is_positive() { y } else { x }),
        (x, y) => x.or(y),
    })
}

/// The bound earlier along `d`; ties keep `x`.
fn earlier<'a>(d: Direction<'_>, x: Option<Bound<'a>>, y: Option<Bound<'a>>) -> Result<Option<Bound<'a>>> {
    Ok(match (x, y) {
        (Some(x), Some(y)) => Some(if along(d, y.point, x.point)?.is_positive() { y } else { x }),
        (x, y) => x.or(y),
    })
}

/// Intersects two spans where at least one is bounded on both sides.
pub(super) fn bounded(a: Span<'_>, b: Span<'_>) -> Result<SegmentIntersection> {
    let (range, p) = match (a, b) {
        (Span::Linear(a), Span::Linear(b)) => {
            return Ok(match overlap(&a, &b)? {
                Overlap::Empty => SegmentIntersection::Empty,
                Overlap::Point(p) => SegmentIntersection::Point(p),
                Overlap::Segment(p, q) => SegmentIntersection::Segment(Segment::new(p, q)),
                Overlap::Ray(_) | Overlap::Line => {
                    unreachable!("a segment bounds every collinear overlap")
                }
            });
        }
        (Span::Point(p), span) | (span, Span::Point(p)) => (span, p),
    };
    Ok(if range.contains(p)? {
        SegmentIntersection::Point(*p)
    } else {
        SegmentIntersection::Empty
    })
}

impl Intersect for Line {
    type Output = LineIntersection;

    fn intersection(&self, other: &Line) -> Result<LineIntersection> {
        Ok(match overlap(&Linear::line(self), &Linear::line(other))? {
            Overlap::Empty => LineIntersection::Empty,
            Overlap::Point(p) => LineIntersection::Point(p),
            Overlap::Line | Overlap::Ray(_) | Overlap::Segment(..) => LineIntersection::Line(*self),
        })
    }
}

impl Intersect<Ray> for Line {
    type Output = LineRayIntersection;

    fn intersection(&self, other: &Ray) -> Result<LineRayIntersection> {
        Ok(line_ray(overlap(&Linear::line(self), &Linear::ray(other))?, other))
    }
}

impl Intersect<Line> for Ray {
    type Output = LineRayIntersection;

    fn intersection(&self, other: &Line) -> Result<LineRayIntersection> {
        Ok(line_ray(overlap(&Linear::ray(self), &Linear::line(other))?, self))
    }
}

fn line_ray(overlap: Overlap, ray: &Ray) -> LineRayIntersection {
    match overlap {
        Overlap::Empty => LineRayIntersection::Empty,
        Overlap::Point(p) => LineRayIntersection::Point(p),
        Overlap::Ray(_) | Overlap::Line | Overlap::Segment(..) => LineRayIntersection::Ray(*ray),
    }
}

impl Intersect for Ray {
    type Output = RayRayIntersection;

    fn intersection(&self, other: &Ray) -> Result<RayRayIntersection> {
        Ok(match overlap(&Linear::ray(self), &Linear::ray(other))? {
            Overlap::Empty => RayRayIntersection::Empty,
            Overlap::Point(p) => RayRayIntersection::Point(p),
            Overlap::Segment(p, q) => RayRayIntersection::Segment(Segment::new(p, q)),
            Overlap::Ray(Operand::First) | Overlap::Line => RayRayIntersection::Ray(*self),
            Overlap::Ray(Operand::Second) => RayRayIntersection::Ray(*other),
        })
    }
}

impl Intersect<Segment> for Line {
    type Output = SegmentIntersection;

    fn intersection(&self, other: &Segment) -> Result<SegmentIntersection> {
        bounded(self.span(), other.span())
    }
}

impl Intersect<Segment> for Ray {
    type Output = SegmentIntersection;

    fn intersection(&self, other: &Segment) -> Result<SegmentIntersection> {
        bounded(self.span(), other.span())
    }
}

impl Intersect<Line> for Segment {
    type Output = SegmentIntersection;

    fn intersection(&self, other: &Line) -> Result<SegmentIntersection> {
        bounded(self.span(), other.span())
    }
}

impl Intersect<Ray> for Segment {
    type Output = SegmentIntersection;

    fn intersection(&self, other: &Ray) -> Result<SegmentIntersection> {
        bounded(self.span(), other.span())
    }
}

impl Intersect for Segment {
    type Output = SegmentIntersection;

    fn intersection(&self, other: &Segment) -> Result<SegmentIntersection> {
        bounded(self.span(), other.span())
    }
}
