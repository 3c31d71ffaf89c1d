//! Rectangles with circular corners.
//!
//! Each corner is an arc of `arc_quality` steps around a corner center inset by the radius.
//! Corners are visited clockwise from the top-left one (y pointing down), and the straight
//! sides connect the end of one arc to the start of the next.
//!
//! Samples are not emitted in outline order. The two ends of every arc, which are shared
//! with the straight sides, go first into a base block of eight samples. The interior arc
//! samples follow, corner after corner. [`CornerRing`] is the only place that knows about
//! this layout.
//!
//! When both stroked and filled, the interior fan ends on the opaque inner rail of the
//! stroke instead of a ring of its own.

use crate::error::TessellationResult;
use crate::geometry_builder::{with_geometry, Count, GeometryBuilder};
use crate::math::{point, vector, Point, Vector};
use crate::path::RoundedRect;
use crate::rect::normalized_bounds;
use crate::ring::{
    add_closed_shape, closed_shape_count, outer_extent, ClosedShape, Interior, RingLayout, UvBox,
};

use core::f32::consts::{FRAC_PI_2, PI};

const DIAGONALS: [Vector; 4] = [
    Vector::new(-1.0, -1.0),
    Vector::new(1.0, -1.0),
    Vector::new(1.0, 1.0),
    Vector::new(-1.0, 1.0),
];

/// Number of samples in the block holding the arc end points.
const BASE_BLOCK: u32 = 8;

/// Sample layout of a rounded rectangle outline.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CornerRing {
    arc_quality: u32,
}

impl CornerRing {
    pub fn new(arc_quality: u32) -> Self {
        debug_assert!(arc_quality >= 1);
        CornerRing { arc_quality }
    }

    /// Samples per corner, both arc ends included.
    #[inline]
    fn corner_len(&self) -> u32 {
        self.arc_quality + 1
    }

    /// Emission slot of step `step` (from 0 to `arc_quality`) of corner `corner`.
    pub fn sample(&self, corner: u32, step: u32) -> u32 {
        debug_assert!(corner < 4 && step <= self.arc_quality);
        if step == 0 {
            2 * corner
        } else if step == self.arc_quality {
            2 * corner + 1
        } else {
            BASE_BLOCK + corner * (self.arc_quality - 1) + step - 1
        }
    }

    /// Corner and step of the sample emitted at `slot`.
    pub fn corner_step(&self, slot: u32) -> (u32, u32) {
        if slot < BASE_BLOCK {
            let step = if slot % 2 == 0 { 0 } else { self.arc_quality };
            return (slot / 2, step);
        }

        let arc = slot - BASE_BLOCK;
        let interior = self.arc_quality - 1;
        (arc / interior, arc % interior + 1)
    }
}

impl RingLayout for CornerRing {
    #[inline]
    fn len(&self) -> u32 {
        4 * self.corner_len()
    }

    #[inline]
    fn slot(&self, index: u32) -> u32 {
        self.sample(index / self.corner_len(), index % self.corner_len())
    }
}

/// Vertex and index counts of a rounded rectangle.
pub fn rounded_rect_count(rounded_rect: &RoundedRect) -> Count {
    let ring = CornerRing::new(rounded_rect.arc_quality);
    closed_shape_count(ring.len(), Interior::SharedFan, &rounded_rect.style)
}

pub fn tessellate_rounded_rect(
    rounded_rect: &RoundedRect,
    output: &mut dyn GeometryBuilder,
) -> TessellationResult<Count> {
    log::trace!(
        "rounded rect {:?} {:?} radius {}, {} steps per corner",
        rounded_rect.origin,
        rounded_rect.size,
        rounded_rect.radius,
        rounded_rect.arc_quality
    );

    let ring = CornerRing::new(rounded_rect.arc_quality);
    let radius = rounded_rect.clamped_radius();
    let bounds = normalized_bounds(
        rounded_rect.origin,
        rounded_rect.size.width,
        rounded_rect.size.height,
    );
    let centers = [
        point(bounds.min.x + radius, bounds.min.y + radius),
        point(bounds.max.x - radius, bounds.min.y + radius),
        point(bounds.max.x - radius, bounds.max.y - radius),
        point(bounds.min.x + radius, bounds.max.y - radius),
    ];
    let step_angle = FRAC_PI_2 / rounded_rect.arc_quality as f32;
    let min_offset = -0.5 * bounds.width().min(bounds.height());

    let position = |slot: u32, d: f32| -> Point {
        let (corner, step) = ring.corner_step(slot);
        let center = centers[corner as usize];
        let distance = radius + d.max(min_offset);
        if distance < 0.0 {
            // Inset past the corner center: the outline is a sharp rectangle.
            return center + DIAGONALS[corner as usize] * distance;
        }

        let angle = PI + corner as f32 * FRAC_PI_2 + step as f32 * step_angle;
        let (sin, cos) = angle.sin_cos();
        center + vector(cos, sin) * distance
    };

    let outer = outer_extent(&rounded_rect.style);
    let shape = ClosedShape {
        ring: &ring,
        interior: Interior::SharedFan,
        center: bounds.center(),
        style: &rounded_rect.style,
        uvs: UvBox::new(bounds.inflate(outer, outer)),
        position: &position,
    };

    let count = with_geometry(output, |output| add_closed_shape(output, &shape))?;
    debug_assert_eq!(count, rounded_rect_count(rounded_rect));

    Ok(count)
}
