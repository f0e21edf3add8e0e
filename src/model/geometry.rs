use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2 {
        x: (a.x + b.x) / 2.0,
        y: (a.y + b.y) / 2.0,
    }
}

/// Angle at `vertex` between the rays towards `p1` and `p3`, in degrees.
///
/// Computed as the absolute difference of the two rays' atan2 headings. That
/// difference spans [0, 360); reflex values are folded back so the result is
/// always the interior angle in [0, 180].
pub fn angle_between(p1: Point2, vertex: Point2, p3: Point2) -> f64 {
    let a = (p3.y - vertex.y).atan2(p3.x - vertex.x);
    let b = (p1.y - vertex.y).atan2(p1.x - vertex.x);
    let raw = (a - b).to_degrees().abs();
    if raw > 180.0 { 360.0 - raw } else { raw }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/geometry.rs"]
mod tests;
