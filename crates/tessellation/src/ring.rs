//! Rails, bands and fans shared by the stroke and shape tessellators.
//!
//! Strokes and antialiased edges are built out of *rails*: copies of an outline offset by a
//! signed distance along its outward direction. Every sample of the outline emits one
//! vertex per rail, consecutively, and consecutive samples are connected by *bands* of two
//! triangles between each pair of adjacent rails.

use crate::error::GeometryBuilderError;
use crate::geometry_builder::{Count, GeometryBuilder, MeshVertex, VertexId};
use crate::math::{Box2D, Point};
use crate::path::{Color, ShapeStyle};

use arrayvec::ArrayVec;

/// One offset copy of an outline.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Rail {
    /// Signed distance along the outward direction.
    pub offset: f32,
    /// Multiplies the alpha of the vertex color.
    pub alpha: f32,
    /// Texture coordinate across the rails, from 0 to 1.
    pub v: f32,
}

pub(crate) type Rails = ArrayVec<Rail, 4>;

/// Rails of a stroke centered on its outline.
///
/// Hard strokes have two opaque rails. Soft strokes have two transparent outer rails at
/// `±half_width` and two opaque inner rails `penumbra` inside of them.
pub(crate) fn stroke_rails(half_width: f32, penumbra: f32) -> Rails {
    let mut rails = Rails::new();
    if penumbra > 0.0 {
        let inner = (half_width - penumbra).max(0.0);
        let ratio = if half_width > 0.0 { inner / half_width } else { 0.0 };
        rails.push(Rail { offset: half_width, alpha: 0.0, v: 0.0 });
        rails.push(Rail { offset: inner, alpha: 1.0, v: 0.5 - ratio * 0.5 });
        rails.push(Rail { offset: -inner, alpha: 1.0, v: 0.5 + ratio * 0.5 });
        rails.push(Rail { offset: -half_width, alpha: 0.0, v: 1.0 });
    } else {
        rails.push(Rail { offset: half_width, alpha: 1.0, v: 0.0 });
        rails.push(Rail { offset: -half_width, alpha: 1.0, v: 1.0 });
    }

    rails
}

/// Rails of the boundary of a fill that is not stroked.
///
/// Soft fills fade from transparent on the outline to opaque `penumbra` inside of it.
pub(crate) fn fill_rails(penumbra: f32) -> Rails {
    let mut rails = Rails::new();
    if penumbra > 0.0 {
        rails.push(Rail { offset: 0.0, alpha: 0.0, v: 0.0 });
        rails.push(Rail { offset: -penumbra, alpha: 1.0, v: 1.0 });
    } else {
        rails.push(Rail { offset: 0.0, alpha: 1.0, v: 1.0 });
    }

    rails
}

/// A single opaque rail, used for fills bounded by a stroke.
pub(crate) fn inset_rail(offset: f32) -> Rails {
    let mut rails = Rails::new();
    rails.push(Rail { offset, alpha: 1.0, v: 1.0 });

    rails
}

#[inline]
pub(crate) fn rail_color(color: Color, rail: &Rail) -> Color {
    color.with_alpha(color.a * rail.alpha)
}

/// Connects the rails of two samples whose first vertices are `a` and `b`.
pub(crate) fn add_bands(
    output: &mut dyn GeometryBuilder,
    a: VertexId,
    b: VertexId,
    rails: u32,
) -> Result<(), GeometryBuilderError> {
    for r in 0..rails.saturating_sub(1) {
        output.add_triangle(a + r, a + r + 1, b + r + 1)?;
        output.add_triangle(a + r, b + r + 1, b + r)?;
    }

    Ok(())
}

/// Order in which the samples of a closed ring are emitted.
///
/// Samples are visited in ring order `0..len()`, but they do not have to be emitted in that
/// order. `slot` maps a ring position to the rank at which that sample's vertices were
/// emitted.
pub(crate) trait RingLayout {
    fn len(&self) -> u32;

    fn slot(&self, index: u32) -> u32;

    /// Calls `f` with the slots of both ends of every segment of the ring, closing segment
    /// included.
    fn for_each_segment(
        &self,
        f: &mut dyn FnMut(u32, u32) -> Result<(), GeometryBuilderError>,
    ) -> Result<(), GeometryBuilderError> {
        let len = self.len();
        for i in 0..len {
            f(self.slot(i), self.slot((i + 1) % len))?;
        }

        Ok(())
    }
}

/// Samples emitted in ring order.
pub(crate) struct SequentialRing {
    pub len: u32,
}

impl RingLayout for SequentialRing {
    #[inline]
    fn len(&self) -> u32 {
        self.len
    }

    #[inline]
    fn slot(&self, index: u32) -> u32 {
        index
    }
}

/// Maps positions to texture coordinates relative to a bounding box.
#[derive(Copy, Clone, Debug)]
pub(crate) struct UvBox {
    min: Point,
    scale: [f32; 2],
}

impl UvBox {
    pub fn new(bounds: Box2D) -> Self {
        let inv = |extent: f32| if extent > 0.0 { 1.0 / extent } else { 0.0 };
        UvBox {
            min: bounds.min,
            scale: [inv(bounds.width()), inv(bounds.height())],
        }
    }

    #[inline]
    pub fn uv(&self, p: Point) -> [f32; 2] {
        [
            (p.x - self.min.x) * self.scale[0],
            (p.y - self.min.y) * self.scale[1],
        ]
    }
}

/// Emits `count` samples with one vertex per rail and returns the first vertex.
///
/// `position` receives the emission slot and the rail offset.
pub(crate) fn add_ring_vertices(
    output: &mut dyn GeometryBuilder,
    count: u32,
    rails: &[Rail],
    color: Color,
    uvs: &UvBox,
    position: &dyn Fn(u32, f32) -> Point,
) -> Result<VertexId, GeometryBuilderError> {
    let mut first = VertexId::INVALID;
    for slot in 0..count {
        for rail in rails {
            let position = position(slot, rail.offset);
            let id = output.add_vertex(MeshVertex {
                position,
                color: rail_color(color, rail),
                uv: uvs.uv(position),
            })?;
            if first == VertexId::INVALID {
                first = id;
            }
        }
    }

    Ok(first)
}

/// Emits a stroke ring: `rails.len() * ring.len()` vertices and bands all around.
///
/// Returns the first vertex of the ring.
pub(crate) fn add_stroke_ring(
    output: &mut dyn GeometryBuilder,
    ring: &dyn RingLayout,
    rails: &[Rail],
    color: Color,
    uvs: &UvBox,
    position: &dyn Fn(u32, f32) -> Point,
) -> Result<VertexId, GeometryBuilderError> {
    let first = add_ring_vertices(output, ring.len(), rails, color, uvs, position)?;
    let stride = rails.len() as u32;

    ring.for_each_segment(&mut |a, b| {
        add_bands(output, first + a * stride, first + b * stride, stride)
    })?;

    Ok(first)
}

/// Emits the interior fan of a shape onto rail `rail` of a ring that was already emitted
/// starting at `first`, with `stride` rails.
fn add_shared_fan(
    output: &mut dyn GeometryBuilder,
    shape: &ClosedShape,
    first: VertexId,
    stride: u32,
    rail: u32,
) -> Result<(), GeometryBuilderError> {
    let center = output.add_vertex(MeshVertex {
        position: shape.center,
        color: shape.style.fill_color,
        uv: shape.uvs.uv(shape.center),
    })?;

    shape.ring.for_each_segment(&mut |a, b| {
        output.add_triangle(center, first + a * stride + rail, first + b * stride + rail)
    })
}

/// Emits a filled ring.
///
/// With a `center`, the interior is a fan around an extra vertex emitted first. Without one
/// the ring must have four samples and the interior is a quad. When there is more than one
/// rail the rails are connected by bands and the interior is bounded by the last rail.
pub(crate) fn add_fill_ring(
    output: &mut dyn GeometryBuilder,
    ring: &dyn RingLayout,
    rails: &[Rail],
    center: Option<Point>,
    color: Color,
    uvs: &UvBox,
    position: &dyn Fn(u32, f32) -> Point,
) -> Result<(), GeometryBuilderError> {
    let center = match center {
        Some(center) => Some(output.add_vertex(MeshVertex {
            position: center,
            color,
            uv: uvs.uv(center),
        })?),
        None => None,
    };

    let first = add_ring_vertices(output, ring.len(), rails, color, uvs, position)?;
    let stride = rails.len() as u32;
    let interior = stride - 1;

    if stride > 1 {
        ring.for_each_segment(&mut |a, b| {
            add_bands(output, first + a * stride, first + b * stride, stride)
        })?;
    }

    match center {
        Some(center) => ring.for_each_segment(&mut |a, b| {
            output.add_triangle(
                center,
                first + a * stride + interior,
                first + b * stride + interior,
            )
        }),
        None => {
            debug_assert_eq!(ring.len(), 4);
            let corner = |i: u32| first + ring.slot(i) * stride + interior;
            output.add_triangle(corner(0), corner(1), corner(2))?;
            output.add_triangle(corner(0), corner(2), corner(3))
        }
    }
}

/// How the interior of a closed shape is triangulated.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Interior {
    /// Two triangles over a ring of four samples, bounded by their own vertices.
    Quad,
    /// A fan around the center, bounded by its own ring of vertices.
    Fan,
    /// A fan around the center. When the shape is stroked, the fan is bounded by the
    /// opaque inner rail of the stroke instead of new vertices.
    SharedFan,
}

/// A closed outline as seen by [`add_closed_shape`].
pub(crate) struct ClosedShape<'l> {
    pub ring: &'l dyn RingLayout,
    pub interior: Interior,
    /// Center of the interior fans.
    pub center: Point,
    pub style: &'l ShapeStyle,
    pub uvs: UvBox,
    /// Position of the sample emitted at a given slot, offset outwards by a distance.
    pub position: &'l dyn Fn(u32, f32) -> Point,
}

/// Emits the stroke and interior of a closed shape, according to its style.
///
/// The interior of a stroked shape is always hard-edged and stops at the opaque core of the
/// stroke, either on vertices of its own or on the stroke's own core rail for
/// [`Interior::SharedFan`]. An unstroked interior gets its own antialiasing fringe.
pub(crate) fn add_closed_shape(
    output: &mut dyn GeometryBuilder,
    shape: &ClosedShape,
) -> Result<(), GeometryBuilderError> {
    let style = shape.style;
    let mode = style.mode();
    let half_width = style.half_width();

    if mode.stroke {
        let rails = stroke_rails(half_width, style.penumbra);
        let first = add_stroke_ring(
            output,
            shape.ring,
            &rails,
            style.stroke_color,
            &shape.uvs,
            shape.position,
        )?;

        if mode.fill && shape.interior == Interior::SharedFan {
            return add_shared_fan(output, shape, first, rails.len() as u32, core_rail(style));
        }
    }

    if mode.fill {
        let rails = if mode.stroke {
            let core = if style.is_soft() {
                (half_width - style.penumbra).max(0.0)
            } else {
                half_width
            };
            inset_rail(-core)
        } else {
            fill_rails(style.penumbra)
        };
        let center = match shape.interior {
            Interior::Quad => None,
            Interior::Fan | Interior::SharedFan => Some(shape.center),
        };
        add_fill_ring(
            output,
            shape.ring,
            &rails,
            center,
            style.fill_color,
            &shape.uvs,
            shape.position,
        )?;
    }

    Ok(())
}

/// Index of the stroke rail that bounds a shared interior fan.
fn core_rail(style: &ShapeStyle) -> u32 {
    if style.is_soft() {
        2
    } else {
        1
    }
}

/// Counts of `rails` rails of `samples` samples connected all around.
fn ring_count(rails: u32, samples: u32) -> Count {
    Count::new(
        rails.saturating_mul(samples),
        (6 * (rails - 1)).saturating_mul(samples),
    )
}

/// Vertex and index counts of [`add_closed_shape`] for a ring of `samples` samples.
///
/// Saturates at `u32::MAX`.
pub(crate) fn closed_shape_count(samples: u32, interior: Interior, style: &ShapeStyle) -> Count {
    let mode = style.mode();
    let mut count = Count::ZERO;

    if mode.stroke {
        let rails = if style.is_soft() { 4 } else { 2 };
        count += ring_count(rails, samples);
    }

    if mode.fill {
        let fan = Count::new(1, samples.saturating_mul(3));
        if mode.stroke && interior == Interior::SharedFan {
            return count + fan;
        }

        let rails = if !mode.stroke && style.is_soft() { 2 } else { 1 };
        count += ring_count(rails, samples);
        count += match interior {
            Interior::Quad => Count::new(0, 6),
            Interior::Fan | Interior::SharedFan => fan,
        };
    }

    count
}

/// Outward distance of the outermost rail of a shape.
pub(crate) fn outer_extent(style: &ShapeStyle) -> f32 {
    if style.mode().stroke {
        style.half_width()
    } else {
        0.0
    }
}
