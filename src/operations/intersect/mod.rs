//! Pairwise intersection of the 2D primitives.
//!
//! Every ordered pair of [`Point2`](crate::math::Point2), [`Line`], [`Ray`],
//! [`Segment`], [`Triangle`], [`Rectangle`], [`Bbox`] and [`Circle`]
//! implements [`Intersect`], so dispatch is resolved at compile time. Each
//! pair has its own result enum listing the shapes it can produce.
//!
//! Every qualitative decision (disjoint, touching, collinear, inside) comes
//! from a filtered predicate, so it is exact. Constructed points are computed
//! exactly and rounded once, except on circle boundaries where a square root
//! is involved. When an input point coincides with a result point it is
//! returned as is.
//!
//! [`Line`]: crate::geometry::Line
//! [`Ray`]: crate::geometry::Ray
//! [`Segment`]: crate::geometry::Segment
//! [`Triangle`]: crate::geometry::Triangle
//! [`Rectangle`]: crate::geometry::Rectangle
//! [`Bbox`]: crate::geometry::Bbox
//! [`Circle`]: crate::geometry::Circle

/// Implements `Intersect<$a> for $b` by swapping the operands of `$a × $b`.
macro_rules! mirrored {
    ($($a:ty => $b:ty),* $(,)?) => {
        $(
            impl $crate::operations::intersect::Intersect<$a> for $b {
                type Output = <$a as $crate::operations::intersect::Intersect<$b>>::Output;

                fn intersection(&self, other: &$a) -> $crate::error::Result<Self::Output> {
                    $crate::operations::intersect::Intersect::intersection(other, self)
                }
            }
        )*
    };
}

mod convex;
mod disk;
mod linear;
mod point;
mod result;

pub use result::{
    BoxIntersection, CircleIntersection, DiskRegionIntersection, IntersectionResult,
    LineIntersection, LineRayIntersection, PointIntersection, PolygonIntersection,
    RayRayIntersection, SegmentIntersection,
};

use crate::error::Result;

/// Intersection with a primitive of type `Rhs`.
pub trait Intersect<Rhs: ?Sized = Self> {
    /// Shapes this pair can produce.
    type Output: IntersectionResult;

    /// Computes the intersection of `self` and `other`.
    ///
    /// Direction-carrying results follow `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or a constructed point
    /// does not fit in an `f64`.
    fn intersection(&self, other: &Rhs) -> Result<Self::Output>;

    /// Returns whether `self` and `other` share at least one point.
    ///
    /// # Errors
    ///
    /// See [`intersection`](Self::intersection).
    fn do_intersect(&self, other: &Rhs) -> Result<bool> {
        Ok(!self.intersection(other)?.is_empty())
    }
}

/// Computes the intersection of `a` and `b`.
///
/// # Errors
///
/// See [`Intersect::intersection`].
pub fn intersection<A, B>(a: &A, b: &B) -> Result<A::Output>
where
    A: Intersect<B> + ?Sized,
    B: ?Sized,
{
    a.intersection(b)
}

/// Returns whether `a` and `b` intersect.
///
/// # Errors
///
/// See [`Intersect::intersection`].
pub fn do_intersect<A, B>(a: &A, b: &B) -> Result<bool>
where
    A: Intersect<B> + ?Sized,
    B: ?Sized,
{
    a.do_intersect(b)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::geometry::{Bbox, Circle, Line, Ray, Rectangle, Segment, Triangle};
    use crate::math::{Point2, Vector2};

    fn seg(ax: f64, ay: f64, bx: f64, by: f64) -> Segment {
        Segment::new(Point2::new(ax, ay), Point2::new(bx, by))
    }

    #[test]
    fn diagonals_cross_at_center() {
        assert_eq!(
            intersection(&seg(0.0, 0.0, 2.0, 2.0), &seg(0.0, 2.0, 2.0, 0.0)).unwrap(),
            SegmentIntersection::Point(Point2::new(1.0, 1.0))
        );
    }

    #[test]
    fn disjoint_collinear_segments() {
        let (a, b) = (seg(0.0, 0.0, 1.0, 0.0), seg(2.0, 0.0, 3.0, 0.0));
        assert_eq!(intersection(&a, &b).unwrap(), SegmentIntersection::Empty);
        assert!(!do_intersect(&a, &b).unwrap());
    }

    #[test]
    fn overlapping_collinear_segments() {
        assert_eq!(
            intersection(&seg(0.0, 0.0, 2.0, 0.0), &seg(1.0, 0.0, 3.0, 0.0)).unwrap(),
            SegmentIntersection::Segment(seg(1.0, 0.0, 2.0, 0.0))
        );
    }

    #[test]
    fn non_finite_input_is_an_error() {
        let a = seg(0.0, 0.0, f64::NAN, 1.0);
        assert!(intersection(&a, &seg(0.0, 1.0, 1.0, 0.0)).is_err());
    }

    /// Asserts `do_intersect` agrees in both orders for every pair of the listed values.
    macro_rules! assert_symmetric {
        ($($x:ident),* $(,)?) => {
            assert_symmetric!(@rows [$($x),*] [$($x),*]);
        };
        (@rows [$($a:ident),*] $all:tt) => {
            $( assert_symmetric!(@row $a $all); )*
        };
        (@row $a:ident [$($b:ident),*]) => {
            $(
                assert_eq!(
                    do_intersect(&$a, &$b).unwrap(),
                    do_intersect(&$b, &$a).unwrap(),
                    "{} vs {}",
                    stringify!($a),
                    stringify!($b),
                );
            )*
        };
    }

    #[test]
    fn every_pair_dispatches_symmetrically() {
        let point = Point2::new(1.0, 1.0);
        let line = Line::new(Point2::new(0.0, 0.5), Vector2::new(1.0, 0.0)).unwrap();
        let ray = Ray::new(Point2::new(3.0, 3.0), Vector2::new(-1.0, -1.0)).unwrap();
        let segment = seg(-1.0, 2.0, 2.0, -1.0);
        let triangle = Triangle::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(0.0, 2.0));
        let rectangle = Rectangle::new(Point2::new(1.0, 1.0), Point2::new(3.0, 2.0)).unwrap();
        let bbox = Bbox::new(2.5, -1.0, 4.0, 0.0).unwrap();
        let circle = Circle::new(Point2::new(4.0, 1.0), 1.0).unwrap();

        assert_symmetric!(point, line, ray, segment, triangle, rectangle, bbox, circle);
    }

    #[test]
    fn mirrored_results_match() {
        let triangle = Triangle::new(Point2::new(0.0, 0.0), Point2::new(2.0, 0.0), Point2::new(0.0, 2.0));
        let bbox = Bbox::new(-1.0, -1.0, 1.0, 1.0).unwrap();
        assert_eq!(triangle.intersection(&bbox).unwrap(), bbox.intersection(&triangle).unwrap());

        let circle = Circle::new(Point2::new(0.0, 3.0), 1.0).unwrap();
        assert_eq!(
            circle.intersection(&triangle).unwrap(),
            triangle.intersection(&circle).unwrap()
        );
    }

    fn coordinate() -> impl Strategy<Value = f64> {
        prop_oneof![(-4i32..=4).prop_map(f64::from), -4.0..4.0f64]
    }

    fn segment() -> impl Strategy<Value = Segment> {
        (coordinate(), coordinate(), coordinate(), coordinate())
            .prop_map(|(ax, ay, bx, by)| seg(ax, ay, bx, by))
    }

    fn small_point() -> impl Strategy<Value = Point2> {
        ((-3i32..=3), (-3i32..=3)).prop_map(|(x, y)| Point2::new(x.into(), y.into()))
    }

    fn small_vector() -> impl Strategy<Value = Vector2> {
        ((-2i32..=2), (-2i32..=2))
            .prop_filter("zero direction", |&(x, y)| (x, y) != (0, 0))
            .prop_map(|(x, y)| Vector2::new(x.into(), y.into()))
    }

    fn line() -> impl Strategy<Value = Line> {
        prop_oneof![
            (small_point(), small_vector()).prop_filter_map("zero direction", |(p, d)| Line::new(p, d).ok()),
            (small_point(), small_point()).prop_filter_map("coincident points", |(p, q)| Line::through(p, q).ok()),
        ]
    }

    fn ray() -> impl Strategy<Value = Ray> {
        prop_oneof![
            (small_point(), small_vector()).prop_filter_map("zero direction", |(p, d)| Ray::new(p, d).ok()),
            (small_point(), small_point()).prop_filter_map("coincident points", |(p, q)| Ray::through(p, q).ok()),
        ]
    }

    fn triangle() -> impl Strategy<Value = Triangle> {
        (small_point(), small_point(), small_point()).prop_map(|(a, b, c)| Triangle::new(a, b, c))
    }

    fn circle() -> impl Strategy<Value = Circle> {
        (small_point(), 0i32..=3).prop_map(|(c, r)| Circle::new(c, r.into()).unwrap())
    }

    fn sorted(mut points: Vec<Point2>) -> Vec<Point2> {
        points.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        points
    }

    /// Result kind and point set, independent of which operand came first.
    ///
    /// Unbounded results are reduced to their finite anchor: rays to their
    /// source, coincident lines to nothing.
    trait Shape {
        fn shape(&self) -> (&'static str, Vec<Point2>);
    }

    impl Shape for SegmentIntersection {
        fn shape(&self) -> (&'static str, Vec<Point2>) {
            match self {
                SegmentIntersection::Empty => ("empty", vec![]),
                SegmentIntersection::Point(p) => ("point", vec![*p]),
                SegmentIntersection::Segment(s) => ("segment", sorted(vec![*s.source(), *s.target()])),
            }
        }
    }

    impl Shape for LineIntersection {
        fn shape(&self) -> (&'static str, Vec<Point2>) {
            match self {
                LineIntersection::Empty => ("empty", vec![]),
                LineIntersection::Point(p) => ("point", vec![*p]),
                LineIntersection::Line(_) => ("line", vec![]),
            }
        }
    }

    impl Shape for LineRayIntersection {
        fn shape(&self) -> (&'static str, Vec<Point2>) {
            match self {
                LineRayIntersection::Empty => ("empty", vec![]),
                LineRayIntersection::Point(p) => ("point", vec![*p]),
                LineRayIntersection::Ray(r) => ("ray", vec![*r.source()]),
            }
        }
    }

    impl Shape for RayRayIntersection {
        fn shape(&self) -> (&'static str, Vec<Point2>) {
            match self {
                RayRayIntersection::Empty => ("empty", vec![]),
                RayRayIntersection::Point(p) => ("point", vec![*p]),
                RayRayIntersection::Segment(s) => ("segment", sorted(vec![*s.source(), *s.target()])),
                RayRayIntersection::Ray(r) => ("ray", vec![*r.source()]),
            }
        }
    }

    impl<R> Shape for DiskRegionIntersection<R> {
        fn shape(&self) -> (&'static str, Vec<Point2>) {
            match self {
                DiskRegionIntersection::Empty => ("empty", vec![]),
                DiskRegionIntersection::Point(p) => ("point", vec![*p]),
                DiskRegionIntersection::Segment(s) => ("segment", sorted(vec![*s.source(), *s.target()])),
                DiskRegionIntersection::Circle(c) => ("circle", vec![*c.center()]),
                DiskRegionIntersection::Region(_) => ("region", vec![]),
                DiskRegionIntersection::Overlap => ("overlap", vec![]),
            }
        }
    }

    /// Asserts both operand orders produce the same shape.
    macro_rules! prop_assert_symmetric {
        ($a:expr, $b:expr) => {{
            let (a, b) = (&$a, &$b);
            prop_assert_eq!(
                a.intersection(b).unwrap().shape(),
                b.intersection(a).unwrap().shape(),
                "{:?} vs {:?}",
                a,
                b
            );
        }};
    }

    proptest! {
        #[test]
        fn segment_intersection_is_symmetric(a in segment(), b in segment()) {
            let forward = a.intersection(&b).unwrap();
            let backward = b.intersection(&a).unwrap();
            match (forward, backward) {
                (SegmentIntersection::Empty, SegmentIntersection::Empty) => {}
                (SegmentIntersection::Point(p), SegmentIntersection::Point(q)) => prop_assert_eq!(p, q),
                (SegmentIntersection::Segment(s), SegmentIntersection::Segment(t)) => {
                    prop_assert!(s.has_same_points(&t), "{:?} vs {:?}", s, t);
                }
                (f, g) => prop_assert!(false, "shapes differ: {:?} vs {:?}", f, g),
            }
        }

        #[test]
        fn endpoint_results_lie_on_both_segments(a in segment(), b in segment()) {
            if let SegmentIntersection::Point(p) = a.intersection(&b).unwrap() {
                let on_a = *a.source() == p || *a.target() == p;
                let on_b = *b.source() == p || *b.target() == p;
                if on_a || on_b {
                    prop_assert!(p.do_intersect(&a).unwrap());
                    prop_assert!(p.do_intersect(&b).unwrap());
                }
            }
        }

        #[test]
        fn linear_pairs_are_symmetric(a in line(), b in line(), r in ray(), q in ray(), s in segment()) {
            prop_assert_symmetric!(a, b);
            prop_assert_symmetric!(a, r);
            prop_assert_symmetric!(r, q);
            prop_assert_symmetric!(a, s);
            prop_assert_symmetric!(r, s);
        }

        #[test]
        fn linear_region_pairs_are_symmetric(a in line(), r in ray(), t in triangle(), c in circle()) {
            let s = Segment::new(*r.source(), *a.point());
            prop_assert_symmetric!(a, t);
            prop_assert_symmetric!(r, t);
            prop_assert_symmetric!(s, t);
            prop_assert_symmetric!(a, c);
            prop_assert_symmetric!(s, c);
        }

        #[test]
        fn disk_pairs_are_symmetric(a in circle(), b in circle(), t in triangle()) {
            prop_assert_symmetric!(a, t);
            let bbox = Bbox::new(-1.0, -1.0, 1.0, 2.0).unwrap();
            prop_assert_symmetric!(a, bbox);
            match (a.intersection(&b).unwrap(), b.intersection(&a).unwrap()) {
                (CircleIntersection::Lens(p), CircleIntersection::Lens(q)) => {
                    // Same crossings, seen from the other center.
                    for x in p {
                        prop_assert!(
                            q.iter().any(|y| approx::abs_diff_eq!(x, *y, epsilon = 1e-9)),
                            "{:?} vs {:?}",
                            p,
                            q
                        );
                    }
                }
                (forward, backward) => prop_assert_eq!(forward, backward),
            }
        }
    }
}
