//! Axis-aligned ellipses and circles.
//!
//! The outline is sampled `quality` times at evenly spaced angles. Offsets are applied along
//! the direction of the sample angle, which is the exact normal for circles.

use crate::error::TessellationResult;
use crate::geometry_builder::{with_geometry, Count, GeometryBuilder};
use crate::math::{vector, Box2D, Point};
use crate::path::Ellipse;
use crate::ring::{
    add_closed_shape, closed_shape_count, outer_extent, ClosedShape, Interior, SequentialRing,
    UvBox,
};

use core::f32::consts::PI;

/// Vertex and index counts of an ellipse.
pub fn ellipse_count(ellipse: &Ellipse) -> Count {
    closed_shape_count(ellipse.quality, Interior::Fan, &ellipse.style)
}

pub fn tessellate_ellipse(
    ellipse: &Ellipse,
    output: &mut dyn GeometryBuilder,
) -> TessellationResult<Count> {
    log::trace!(
        "ellipse {:?} {:?}, {} samples",
        ellipse.center,
        ellipse.radii,
        ellipse.quality
    );

    let center = ellipse.center;
    let radii = vector(ellipse.radii.x.abs(), ellipse.radii.y.abs());
    let step = 2.0 * PI / ellipse.quality as f32;
    // Insetting further than the smallest radius would cross the center.
    let min_offset = -radii.x.min(radii.y);

    let position = |slot: u32, d: f32| -> Point {
        let (sin, cos) = (slot as f32 * step).sin_cos();
        center + vector(radii.x * cos, radii.y * sin) + vector(cos, sin) * d.max(min_offset)
    };

    let extent = radii + vector(1.0, 1.0) * outer_extent(&ellipse.style);
    let shape = ClosedShape {
        ring: &SequentialRing {
            len: ellipse.quality,
        },
        interior: Interior::Fan,
        center,
        style: &ellipse.style,
        uvs: UvBox::new(Box2D::new(center - extent, center + extent)),
        position: &position,
    };

    let count = with_geometry(output, |output| add_closed_shape(output, &shape))?;
    debug_assert_eq!(count, ellipse_count(ellipse));

    Ok(count)
}
