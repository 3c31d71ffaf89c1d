//! Closed primitives: rectangles, rounded rectangles and ellipses.

use crate::math::{Point, Size, Vector};
use crate::style::ShapeStyle;

/// An axis-aligned rectangle with its top-left corner at `origin`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
    pub style: ShapeStyle,
}

/// A rectangle with circular corners.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RoundedRect {
    pub origin: Point,
    pub size: Size,
    pub radius: f32,
    /// Arc steps per corner.
    pub arc_quality: u32,
    pub style: ShapeStyle,
}

impl RoundedRect {
    /// The corner radius, clamped so that opposite corners never overlap.
    #[inline]
    pub fn clamped_radius(&self) -> f32 {
        let max = self.size.width.abs().min(self.size.height.abs()) * 0.5;
        self.radius.max(0.0).min(max)
    }
}

/// An axis-aligned ellipse.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub radii: Vector,
    /// Number of boundary samples.
    pub quality: u32,
    pub style: ShapeStyle,
}

#[test]
fn radius_clamping() {
    use crate::math::{point, size};
    use crate::style::Style;

    let mut rr = RoundedRect {
        origin: point(0.0, 0.0),
        size: size(10.0, 4.0),
        radius: 3.0,
        arc_quality: 8,
        style: Style::DEFAULT.shape_style(),
    };
    assert_eq!(rr.clamped_radius(), 2.0);
    rr.radius = 1.0;
    assert_eq!(rr.clamped_radius(), 1.0);
    rr.radius = -1.0;
    assert_eq!(rr.clamped_radius(), 0.0);
}
