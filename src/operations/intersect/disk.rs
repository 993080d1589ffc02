//! Circles as closed disks.

use crate::error::{NumericError, Result};
use crate::geometry::{Bbox, Circle, Line, Ray, Rectangle, Segment, Triangle};
use crate::math::construct::{circle_crossings, external_tangency, project, secant_points};
use crate::math::predicates::{along, circle_pair, circle_side, ensure_finite, line_circle, Direction};
use crate::math::{Point2, Sign};

use super::convex::{edges, polygon_contains, Convex, Region};
use super::linear::{Linear, Span, Spanned};
use super::result::{CircleIntersection, DiskRegionIntersection, SegmentIntersection};
use super::Intersect;

fn foot(origin: &Point2, direction: Direction<'_>, center: &Point2) -> Result<Point2> {
    project(origin, direction, center)?
        .ok_or_else(|| NumericError::Undecided { predicate: "project" }.into())
}

/// Where a point of a secant line lies relative to the chord.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chord {
    Before,
    AtStart,
    Inside,
    AtEnd,
    After,
}

fn chord_position(direction: Direction<'_>, circle: &Circle, p: &Point2) -> Result<Chord> {
    let ahead = along(direction, p, circle.center())?.is_positive();
    Ok(match circle_side(circle.center(), circle.radius(), p)? {
        Sign::Negative => Chord::Inside,
        Sign::Zero if ahead => Chord::AtStart,
        Sign::Zero => Chord::AtEnd,
        Sign::Positive if ahead => Chord::Before,
        Sign::Positive => Chord::After,
    })
}

/// Intersects a line, ray or segment with a disk.
fn span_disk(span: Span<'_>, circle: &Circle) -> Result<SegmentIntersection> {
    let center = circle.center();
    let range = match span {
        Span::Point(p) => return point_in(circle.contains(p)?, p),
        Span::Linear(range) if circle.is_degenerate() => return point_in(range.contains(center)?, center),
        Span::Linear(range) => range,
    };
    match line_circle(range.origin, range.direction, center, circle.radius())? {
        Sign::Positive => Ok(SegmentIntersection::Empty),
        Sign::Zero => tangent(&range, circle),
        Sign::Negative => secant(&range, circle),
    }
}

fn point_in(inside: bool, p: &Point2) -> Result<SegmentIntersection> {
    Ok(if inside {
        SegmentIntersection::Point(*p)
    } else {
        SegmentIntersection::Empty
    })
}

/// The touching point is the foot of the center, if the range reaches it.
fn tangent(range: &Linear<'_>, circle: &Circle) -> Result<SegmentIntersection> {
    let (d, center) = (range.direction, circle.center());
    if let Some(lower) = range.lower {
        if along(d, lower, center)?.is_negative() {
            return Ok(SegmentIntersection::Empty);
        }
    }
    if let Some(upper) = range.upper {
        if along(d, center, upper)?.is_negative() {
            return Ok(SegmentIntersection::Empty);
        }
    }
    for p in range.bounds() {
        if circle_side(center, circle.radius(), p)? == Sign::Zero {
            return Ok(SegmentIntersection::Point(*p));
        }
    }
    Ok(SegmentIntersection::Point(foot(range.origin, d, center)?))
}

/// Clamps the chord of a secant line to the range.
fn secant(range: &Linear<'_>, circle: &Circle) -> Result<SegmentIntersection> {
    let d = range.direction;
    let classify = |bound: Option<&Point2>| -> Result<Option<Chord>> {
        bound.map(|p| chord_position(d, circle, p)).transpose()
    };
    let lower = range.lower.zip(classify(range.lower)?);
    let upper = range.upper.zip(classify(range.upper)?);

    match (lower, upper) {
        (Some((_, Chord::After)), _) | (_, Some((_, Chord::Before))) => {
            return Ok(SegmentIntersection::Empty);
        }
        (Some((p, Chord::AtEnd)), _) | (_, Some((p, Chord::AtStart))) => {
            return Ok(SegmentIntersection::Point(*p));
        }
        _ => {}
    }

    let [chord_start, chord_end] = secant_points(range.origin, d, circle.center(), circle.radius())?;
    let start = match lower {
        Some((p, Chord::AtStart | Chord::Inside)) => *p,
        _ => chord_start,
    };
    let end = match upper {
        Some((p, Chord::AtEnd | Chord::Inside)) => *p,
        _ => chord_end,
    };
    Ok(if start == end {
        SegmentIntersection::Point(start)
    } else {
        SegmentIntersection::Segment(Segment::new(start, end))
    })
}

/// Closest point of a polygon edge to a disk center.
enum Closest<'a> {
    Vertex(&'a Point2),
    Foot(&'a Point2, Direction<'a>),
}

fn disk_convex<R: Copy>(
    circle: &Circle,
    region: &R,
    convex: &Convex,
) -> Result<DiskRegionIntersection<R>> {
    match convex {
        Convex::Point(p) => Ok(if circle.contains(p)? {
            DiskRegionIntersection::Point(*p)
        } else {
            DiskRegionIntersection::Empty
        }),
        Convex::Segment(a, b) => span_disk(Span::Linear(Linear::edge(a, b)), circle).map(Into::into),
        Convex::Polygon(vertices) => disk_polygon(circle, region, vertices),
    }
}

/// A convex polygon lies in a disk exactly when all its vertices do.
fn polygon_in_disk(circle: &Circle, vertices: &[Point2]) -> Result<bool> {
    for v in vertices {
        if !circle.contains(v)? {
            return Ok(false);
        }
    }
    Ok(true)
}

/// A disk centered inside a polygon stays inside unless an edge line cuts it.
fn disk_in_polygon(circle: &Circle, vertices: &[Point2]) -> Result<bool> {
    for (a, b) in edges(vertices) {
        if line_circle(a, Direction::Between(a, b), circle.center(), circle.radius())?.is_negative() {
            return Ok(false);
        }
    }
    Ok(true)
}

fn disk_polygon<R: Copy>(
    circle: &Circle,
    region: &R,
    vertices: &[Point2],
) -> Result<DiskRegionIntersection<R>> {
    let (center, radius) = (circle.center(), circle.radius());
    if polygon_in_disk(circle, vertices)? {
        return Ok(DiskRegionIntersection::Region(*region));
    }
    if polygon_contains(vertices, center)? {
        return Ok(if circle.is_degenerate() {
            DiskRegionIntersection::Point(*center)
        } else if disk_in_polygon(circle, vertices)? {
            DiskRegionIntersection::Circle(*circle)
        } else {
            DiskRegionIntersection::Overlap
        });
    }

    let mut touching = None;
    for (a, b) in edges(vertices) {
        let d = Direction::Between(a, b);
        let (closest, sign) = if !along(d, a, center)?.is_positive() {
            (Closest::Vertex(a), circle_side(center, radius, a)?)
        } else if !along(d, center, b)?.is_positive() {
            (Closest::Vertex(b), circle_side(center, radius, b)?)
        } else {
            (Closest::Foot(a, d), line_circle(a, d, center, radius)?)
        };
        match sign {
            Sign::Negative => return Ok(DiskRegionIntersection::Overlap),
            Sign::Zero => {
                touching.get_or_insert(closest);
            }
            Sign::Positive => {}
        }
    }

    Ok(match touching {
        None => DiskRegionIntersection::Empty,
        Some(Closest::Vertex(p)) => DiskRegionIntersection::Point(*p),
        Some(Closest::Foot(a, d)) => DiskRegionIntersection::Point(foot(a, d, center)?),
    })
}

impl Intersect for Circle {
    type Output = CircleIntersection;

    fn intersection(&self, other: &Circle) -> Result<CircleIntersection> {
        let (ca, ra) = (self.center(), self.radius());
        let (cb, rb) = (other.center(), other.radius());
        let (outer, inner) = circle_pair(ca, ra, cb, rb)?;
        if outer.is_positive() {
            return Ok(CircleIntersection::Empty);
        }
        if !inner.is_positive() {
            let smaller = if rb < ra { other } else { self };
            return Ok(if smaller.is_degenerate() {
                CircleIntersection::Point(*smaller.center())
            } else {
                CircleIntersection::Circle(*smaller)
            });
        }
        if outer.is_zero() {
            let touching = external_tangency(ca, ra, cb, rb)?.ok_or(NumericError::Undecided {
                predicate: "external_tangency",
            })?;
            return Ok(CircleIntersection::Point(touching));
        }
        Ok(CircleIntersection::Lens(circle_crossings(ca, ra, cb, rb)))
    }
}

macro_rules! linear_disk {
    ($($linear:ty),* $(,)?) => {
        $(
            impl Intersect<Circle> for $linear {
                type Output = SegmentIntersection;

                fn intersection(&self, other: &Circle) -> Result<SegmentIntersection> {
                    span_disk(self.span(), other)
                }
            }

            mirrored!($linear => Circle);
        )*
    };
}

linear_disk!(Line, Ray, Segment);

macro_rules! disk_region {
    ($($region:ty),* $(,)?) => {
        $(
            impl Intersect<$region> for Circle {
                type Output = DiskRegionIntersection<$region>;

                fn intersection(&self, other: &$region) -> Result<Self::Output> {
                    let convex = other.convex()?;
                    ensure_finite(self.center())?;
                    if !self.bbox().overlaps(&other.bounds()) {
                        return Ok(DiskRegionIntersection::Empty);
                    }
                    disk_convex(self, other, &convex)
                }
            }

            mirrored!(Circle => $region);
        )*
    };
}

disk_region!(Triangle, Rectangle, Bbox);
