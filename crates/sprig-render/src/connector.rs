//! Parent -> child connection curves.

use sprig_core::geom::{Point, point};

pub const DEFAULT_SAMPLES: usize = 100;

/// Cubic Bezier with horizontal tangents at both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub from: Point,
    pub ctrl1: Point,
    pub ctrl2: Point,
    pub to: Point,
}

/// Connection from a parent's right anchor to a child's left anchor.
///
/// The control points sit at 40% and 60% of the horizontal distance, level with the start and
/// the end respectively.
pub fn connector(start: Point, end: Point) -> CubicBezier {
    let dx = end.x - start.x;
    CubicBezier {
        from: start,
        ctrl1: point(start.x + dx * 0.4, start.y),
        ctrl2: point(start.x + dx * 0.6, end.y),
        to: end,
    }
}

impl CubicBezier {
    pub fn eval(&self, t: f64) -> Point {
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        point(
            a * self.from.x + b * self.ctrl1.x + c * self.ctrl2.x + d * self.to.x,
            a * self.from.y + b * self.ctrl1.y + c * self.ctrl2.y + d * self.to.y,
        )
    }

    /// `n` evenly spaced samples in `t`, endpoints included. `n` is raised to at least 2.
    pub fn sample(&self, n: usize) -> Vec<Point> {
        let n = n.max(2);
        let last = n - 1;
        (0..n)
            .map(|i| match i {
                0 => self.from,
                i if i == last => self.to,
                i => self.eval(i as f64 / last as f64),
            })
            .collect()
    }
}
