#![forbid(unsafe_code)]

//! Layout-space geometry. The y axis points up: a larger `y` is higher on the figure.

pub type Unit = euclid::UnknownUnit;

pub type Point = euclid::Point2D<f64, Unit>;
pub type Size = euclid::Size2D<f64, Unit>;

pub fn point(x: f64, y: f64) -> Point {
    euclid::point2(x, y)
}

pub fn size(width: f64, height: f64) -> Size {
    euclid::size2(width, height)
}
