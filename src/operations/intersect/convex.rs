//! Boxes and triangles as convex regions.

use std::cmp::Ordering;

use tracing::trace;

use crate::error::{NumericError, Result};
use crate::geometry::{Bbox, Line, Ray, Rectangle, Segment, Triangle};
use crate::math::construct::ExactPoint;
use crate::math::predicates::{along, ensure_finite, orientation, Orientation};
use crate::math::{Point2, Sign};

use super::linear::{bounded, overlap, Linear, Overlap, Span, Spanned};
use super::result::{BoxIntersection, PolygonIntersection, SegmentIntersection};
use super::Intersect;

/// A closed convex region after collapsing degenerate shapes.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Convex {
    Point(Point2),
    Segment(Point2, Point2),
    /// Counterclockwise vertices enclosing a positive area.
    Polygon(Vec<Point2>),
}

impl Convex {
    fn triangle(triangle: &Triangle) -> Result<Self> {
        let [a, b, c] = *triangle.vertices();
        Ok(match triangle.orientation()? {
            Orientation::CounterClockwise => Convex::Polygon(vec![a, b, c]),
            Orientation::Clockwise => Convex::Polygon(vec![a, c, b]),
            Orientation::Collinear => Convex::collinear(a, &[b, c]),
        })
    }

    fn rectangle(rectangle: &Rectangle) -> Self {
        if rectangle.is_degenerate() {
            Convex::collinear(*rectangle.min(), &[*rectangle.max()])
        } else {
            Convex::Polygon(rectangle.vertices().to_vec())
        }
    }

    /// Collinear points reduce to their lexicographic extremes.
    fn collinear(first: Point2, rest: &[Point2]) -> Self {
        let (lo, hi) = rest.iter().fold((first, first), |(lo, hi), p| {
            (
                if lexicographic(p, &lo).is_lt() { *p } else { lo },
                if lexicographic(p, &hi).is_gt() { *p } else { hi },
            )
        });
        if lo == hi {
            Convex::Point(lo)
        } else {
            Convex::Segment(lo, hi)
        }
    }

    /// Returns whether `p` lies in the closed region.
    pub(super) fn contains(&self, p: &Point2) -> Result<bool> {
        match self {
            Convex::Point(q) => {
                ensure_finite(p)?;
                Ok(q == p)
            }
            Convex::Segment(a, b) => Linear::edge(a, b).contains(p),
            Convex::Polygon(vertices) => polygon_contains(vertices, p),
        }
    }
}

/// Primitives that reduce to a [`Convex`] region.
pub(super) trait Region {
    fn convex(&self) -> Result<Convex>;

    /// Axis-aligned box enclosing the region.
    fn bounds(&self) -> Bbox;
}

impl Region for Triangle {
    fn convex(&self) -> Result<Convex> {
        Convex::triangle(self)
    }

    fn bounds(&self) -> Bbox {
        self.bbox()
    }
}

impl Region for Rectangle {
    fn convex(&self) -> Result<Convex> {
        self.ensure_finite()?;
        Ok(Convex::rectangle(self))
    }

    fn bounds(&self) -> Bbox {
        self.bbox()
    }
}

impl Region for Bbox {
    fn convex(&self) -> Result<Convex> {
        Rectangle::from(*self).convex()
    }

    fn bounds(&self) -> Bbox {
        *self
    }
}

fn lexicographic(a: &Point2, b: &Point2) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

/// Edges of a closed polygon, the last one wrapping around.
pub(super) fn edges<T>(vertices: &[T]) -> impl Iterator<Item = (&T, &T)> {
    vertices.iter().zip(vertices.iter().cycle().skip(1))
}

/// Point in a counterclockwise convex polygon, boundary included.
pub(super) fn polygon_contains(vertices: &[Point2], p: &Point2) -> Result<bool> {
    for (a, b) in edges(vertices) {
        if orientation(a, b, p)? == Orientation::Clockwise {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Intersects a line, ray or segment with a convex region.
pub(super) fn span_convex(span: Span<'_>, region: &Convex) -> Result<SegmentIntersection> {
    let range = match span {
        Span::Point(p) => {
            return Ok(if region.contains(p)? {
                SegmentIntersection::Point(*p)
            } else {
                SegmentIntersection::Empty
            });
        }
        Span::Linear(range) => range,
    };
    match region {
        Convex::Point(p) => Ok(if range.contains(p)? {
            SegmentIntersection::Point(*p)
        } else {
            SegmentIntersection::Empty
        }),
        Convex::Segment(a, b) => bounded(span, Span::Linear(Linear::edge(a, b))),
        Convex::Polygon(vertices) => range_polygon(&range, vertices),
    }
}

/// The part of a range inside a polygon runs between its extreme boundary
/// hits and the range's own bounds that lie inside.
fn range_polygon(range: &Linear<'_>, vertices: &[Point2]) -> Result<SegmentIntersection> {
    let mut hits = Vec::new();
    for (a, b) in edges(vertices) {
        match overlap(range, &Linear::edge(a, b))? {
            Overlap::Point(p) => hits.push(p),
            Overlap::Segment(p, q) => hits.extend([p, q]),
            Overlap::Empty | Overlap::Ray(_) | Overlap::Line => {}
        }
    }
    for p in range.bounds() {
        if polygon_contains(vertices, p)? {
            hits.push(*p);
        }
    }

    let d = range.direction;
    let Some((first, rest)) = hits.split_first() else {
        return Ok(SegmentIntersection::Empty);
    };
    let (mut lo, mut hi) = (first, first);
    for p in rest {
        if along(d, p, lo)?.is_positive() {
            lo = p;
        }
        if along(d, hi, p)?.is_positive() {
            hi = p;
        }
    }
    Ok(if along(d, lo, hi)?.is_positive() {
        SegmentIntersection::Segment(Segment::new(*lo, *hi))
    } else {
        SegmentIntersection::Point(*lo)
    })
}

/// Intersects two convex regions.
fn clip(subject: &Convex, clipper: &Convex) -> Result<PolygonIntersection> {
    match (subject, clipper) {
        (Convex::Polygon(s), Convex::Polygon(c)) => clip_polygons(s, c),
        (Convex::Point(p), region) | (region, Convex::Point(p)) => Ok(if region.contains(p)? {
            PolygonIntersection::Point(*p)
        } else {
            PolygonIntersection::Empty
        }),
        (Convex::Segment(a, b), region) | (region, Convex::Segment(a, b)) => {
            span_convex(Span::Linear(Linear::edge(a, b)), region).map(Into::into)
        }
    }
}

/// Sutherland-Hodgman clipping against each edge of `clipper`.
///
/// Runs on exact coordinates: a crossing built by one clip edge is tested
/// against the next without rounding, so the result does not depend on which
/// operand is clipped.
fn clip_polygons(subject: &[Point2], clipper: &[Point2]) -> Result<PolygonIntersection> {
    let mut output = exact_vertices(subject)?;
    let clipper = exact_vertices(clipper)?;
    for (e0, e1) in edges(&clipper) {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let sides: Vec<Sign> = input.iter().map(|p| ExactPoint::orientation(e0, e1, p)).collect();

        for (i, (p, sp)) in input.iter().zip(&sides).enumerate() {
            let j = (i + 1) % input.len();
            let (q, sq) = (&input[j], sides[j]);
            if !sp.is_negative() {
                output.push(p.clone());
            }
            if *sp == -sq && !sq.is_zero() {
                let x = p.crossing(q, e0, e1).ok_or(NumericError::Undecided {
                    predicate: "clip_crossing",
                })?;
                output.push(x);
            }
        }
    }
    simplify(output)
}

fn exact_vertices(points: &[Point2]) -> Result<Vec<ExactPoint>> {
    Ok(points.iter().map(ExactPoint::new).collect::<std::result::Result<_, _>>()?)
}

/// Classifies a clipped vertex list by the shape it encloses, rounding only
/// the vertices that survive.
fn simplify(mut points: Vec<ExactPoint>) -> Result<PolygonIntersection> {
    points.dedup();
    while points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    let Some(first) = points.first() else {
        return Ok(PolygonIntersection::Empty);
    };
    let Some(second) = points.iter().find(|p| *p != first) else {
        return Ok(PolygonIntersection::Point(first.round()?));
    };

    if points.iter().all(|p| ExactPoint::orientation(first, second, p).is_zero()) {
        trace!(vertices = points.len(), "clipped region collapsed to a line");
        let (lo, hi) = points
            .iter()
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        return Ok(rounded(vec![lo.round()?, hi.round()?]));
    }

    // Drop vertices lying inside an edge.
    'scan: while points.len() > 3 {
        let n = points.len();
        for i in 0..n {
            let (prev, next) = (&points[(i + n - 1) % n], &points[(i + 1) % n]);
            if ExactPoint::orientation(prev, &points[i], next).is_zero() {
                points.remove(i);
                continue 'scan;
            }
        }
        break;
    }

    let vertices = points
        .iter()
        .map(ExactPoint::round)
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rounded(vertices))
}

/// Shape of rounded vertices, merging neighbours that rounded together.
fn rounded(mut vertices: Vec<Point2>) -> PolygonIntersection {
    vertices.dedup();
    while vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices.pop();
    }
    match vertices.as_slice() {
        [] => PolygonIntersection::Empty,
        [p] => PolygonIntersection::Point(*p),
        [a, b] => PolygonIntersection::Segment(Segment::new(*a, *b)),
        [a, b, c] => PolygonIntersection::Triangle(Triangle::new(*a, *b, *c)),
        _ => PolygonIntersection::Polygon(vertices),
    }
}

fn boxes(a: &Rectangle, b: &Rectangle) -> Result<BoxIntersection> {
    a.ensure_finite()?;
    b.ensure_finite()?;
    let min = Point2::new(a.min().x.max(b.min().x), a.min().y.max(b.min().y));
    let max = Point2::new(a.max().x.min(b.max().x), a.max().y.min(b.max().y));
    Ok(if min.x > max.x || min.y > max.y {
        BoxIntersection::Empty
    } else if min == max {
        BoxIntersection::Point(min)
    } else if min.x == max.x || min.y == max.y {
        BoxIntersection::Segment(Segment::new(min, max))
    } else {
        BoxIntersection::Rectangle(Rectangle::from_corners(min, max))
    })
}

macro_rules! box_pairs {
    ($($a:ty, $b:ty);* $(;)?) => {
        $(
            impl Intersect<$b> for $a {
                type Output = BoxIntersection;

                fn intersection(&self, other: &$b) -> Result<BoxIntersection> {
                    boxes(&Rectangle::from(*self), &Rectangle::from(*other))
                }
            }
        )*
    };
}

box_pairs!(
    Rectangle, Rectangle;
    Rectangle, Bbox;
    Bbox, Rectangle;
    Bbox, Bbox;
);

macro_rules! triangle_pairs {
    ($($other:ty),* $(,)?) => {
        $(
            impl Intersect<$other> for Triangle {
                type Output = PolygonIntersection;

                fn intersection(&self, other: &$other) -> Result<PolygonIntersection> {
                    let (subject, clipper) = (self.convex()?, other.convex()?);
                    if !self.bounds().overlaps(&other.bounds()) {
                        return Ok(PolygonIntersection::Empty);
                    }
                    clip(&subject, &clipper)
                }
            }
        )*
    };
}

triangle_pairs!(Triangle, Rectangle, Bbox);

mirrored!(Triangle => Rectangle, Triangle => Bbox);

macro_rules! linear_region {
    ($($linear:ty => $($region:ty),+);* $(;)?) => {
        $($(
            impl Intersect<$region> for $linear {
                type Output = SegmentIntersection;

                fn intersection(&self, other: &$region) -> Result<SegmentIntersection> {
                    span_convex(self.span(), &other.convex()?)
                }
            }

            mirrored!($linear => $region);
        )+)*
    };
}

linear_region!(
    Line => Triangle, Rectangle, Bbox;
    Ray => Triangle, Rectangle, Bbox;
    Segment => Triangle, Rectangle, Bbox;
);
