use crate::geometry::{Circle, Line, Ray, Rectangle, Segment, Triangle};
use crate::math::Point2;

/// Common interface of every intersection result.
pub trait IntersectionResult {
    /// Returns whether the operands are disjoint.
    fn is_empty(&self) -> bool;
}

/// Result of intersecting a point with anything.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointIntersection {
    Empty,
    Point(Point2),
}

/// Result of intersecting two lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineIntersection {
    Empty,
    Point(Point2),
    /// The lines coincide; holds the first operand.
    Line(Line),
}

/// Result of intersecting a line with a ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LineRayIntersection {
    Empty,
    Point(Point2),
    /// The ray lies on the line.
    Ray(Ray),
}

/// Result of intersecting two rays.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RayRayIntersection {
    Empty,
    Point(Point2),
    /// Opposite collinear rays overlapping between their sources.
    Segment(Segment),
    /// Collinear rays pointing the same way; holds the one starting later.
    Ray(Ray),
}

/// Result of intersecting a line, ray or segment with a segment or a region.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentIntersection {
    Empty,
    Point(Point2),
    /// Directed like the first linear operand.
    Segment(Segment),
}

/// Result of intersecting two axis-aligned boxes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxIntersection {
    Empty,
    Point(Point2),
    Segment(Segment),
    Rectangle(Rectangle),
}

/// Result of intersecting a triangle with a triangle or a box.
#[derive(Debug, Clone, PartialEq)]
pub enum PolygonIntersection {
    Empty,
    Point(Point2),
    Segment(Segment),
    /// Counterclockwise triangle.
    Triangle(Triangle),
    /// Counterclockwise convex polygon with at least four vertices.
    Polygon(Vec<Point2>),
}

/// Result of intersecting two disks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleIntersection {
    Empty,
    Point(Point2),
    /// One disk lies inside the other; holds the inner one.
    Circle(Circle),
    /// The boundaries cross twice. The first point lies to the left of the
    /// line from the first center to the second.
    Lens([Point2; 2]),
}

/// Result of intersecting a disk with a region `R`, a box or a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiskRegionIntersection<R> {
    Empty,
    Point(Point2),
    /// The region is flat and crosses the disk.
    Segment(Segment),
    /// The disk lies inside the region.
    Circle(Circle),
    /// The region lies inside the disk; holds the region operand.
    Region(R),
    /// The interiors overlap and neither operand contains the other.
    Overlap,
}

macro_rules! intersection_result {
    ($($ty:ident),* $(,)?) => {
        $(
            impl IntersectionResult for $ty {
                fn is_empty(&self) -> bool {
                    matches!(self, $ty::Empty)
                }
            }
        )*
    };
}

intersection_result!(
    PointIntersection,
    LineIntersection,
    LineRayIntersection,
    RayRayIntersection,
    SegmentIntersection,
    BoxIntersection,
    PolygonIntersection,
    CircleIntersection,
);

impl<R> IntersectionResult for DiskRegionIntersection<R> {
    fn is_empty(&self) -> bool {
        matches!(self, DiskRegionIntersection::Empty)
    }
}

macro_rules! from_point_intersection {
    ($($ty:ident),* $(,)?) => {
        $(
            impl From<PointIntersection> for $ty {
                fn from(value: PointIntersection) -> Self {
                    match value {
                        PointIntersection::Empty => $ty::Empty,
                        PointIntersection::Point(p) => $ty::Point(p),
                    }
                }
            }
        )*
    };
}

from_point_intersection!(
    LineIntersection,
    LineRayIntersection,
    RayRayIntersection,
    SegmentIntersection,
    BoxIntersection,
    PolygonIntersection,
    CircleIntersection,
);

impl From<SegmentIntersection> for PolygonIntersection {
    fn from(value: SegmentIntersection) -> Self {
        match value {
            SegmentIntersection::Empty => PolygonIntersection::Empty,
            SegmentIntersection::Point(p) => PolygonIntersection::Point(p),
            SegmentIntersection::Segment(s) => PolygonIntersection::Segment(s),
        }
    }
}

impl<R> From<SegmentIntersection> for DiskRegionIntersection<R> {
    fn from(value: SegmentIntersection) -> Self {
        match value {
            SegmentIntersection::Empty => DiskRegionIntersection::Empty,
            SegmentIntersection::Point(p) => DiskRegionIntersection::Point(p),
            SegmentIntersection::Segment(s) => DiskRegionIntersection::Segment(s),
        }
    }
}
