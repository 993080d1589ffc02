mod bbox;
mod circle;
mod line;
mod ray;
mod rectangle;
mod segment;
mod triangle;

pub use bbox::Bbox;
pub use circle::Circle;
pub use line::{Line, Support};
pub use ray::Ray;
pub use rectangle::Rectangle;
pub use segment::Segment;
pub use triangle::Triangle;
