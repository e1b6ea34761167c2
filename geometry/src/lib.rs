mod axes;
mod point;
mod vector;

pub use axes::{restrict, extend, DropsOneAxis};
pub use point::Point;
pub use vector::Vector;
