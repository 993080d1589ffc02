//! A point against every primitive.

use crate::error::Result;
use crate::geometry::{Bbox, Circle, Line, Ray, Rectangle, Segment, Triangle};
use crate::math::predicates::ensure_finite;
use crate::math::Point2;

use super::convex::Region;
use super::linear::Spanned;
use super::result::PointIntersection;
use super::Intersect;

fn hit(p: &Point2, inside: bool) -> PointIntersection {
    if inside {
        PointIntersection::Point(*p)
    } else {
        PointIntersection::Empty
    }
}

impl Intersect for Point2 {
    type Output = PointIntersection;

    fn intersection(&self, other: &Point2) -> Result<PointIntersection> {
        ensure_finite(self)?;
        ensure_finite(other)?;
        Ok(hit(self, self == other))
    }
}

macro_rules! point_against {
    ($($other:ty => $contains:expr),* $(,)?) => {
        $(
            impl Intersect<$other> for Point2 {
                type Output = PointIntersection;

                fn intersection(&self, other: &$other) -> Result<PointIntersection> {
                    let contains: fn(&$other, &Point2) -> Result<bool> = $contains;
                    Ok(hit(self, contains(other, self)?))
                }
            }

            mirrored!(Point2 => $other);
        )*
    };
}

point_against!(
    Line => |line, p| line.span().contains(p),
    Ray => |ray, p| ray.span().contains(p),
    Segment => |segment, p| segment.span().contains(p),
    Triangle => |triangle, p| triangle.convex()?.contains(p),
    Rectangle => |rectangle, p| Ok(rectangle.contains(p)?),
    Bbox => |bbox, p| Ok(Rectangle::from(*bbox).contains(p)?),
    Circle => |circle, p| Ok(circle.contains(p)?),
);
