//! Tessellation of a whole canvas.

use crate::ellipse::tessellate_ellipse;
use crate::error::{GeometryBuilderError, TessellationError, TessellationResult};
use crate::estimate::MeshEstimator;
use crate::geometry_builder::{Count, GeometryBuilder};
use crate::mesh_writer::{IndexFormat, MeshDescriptor, MeshWriter};
use crate::path::{Allocator, Canvas};
use crate::rect::tessellate_rect;
use crate::rounded_rect::tessellate_rounded_rect;
use crate::stroke::stroke_path;

/// Tessellates every primitive of a canvas into `output`.
///
/// Primitives are emitted by kind, in insertion order: paths, rectangles, rounded
/// rectangles, then ellipses. Each primitive is a separate geometry.
pub fn tessellate<A: Allocator>(
    canvas: &Canvas<A>,
    output: &mut dyn GeometryBuilder,
) -> TessellationResult<Count> {
    #[cfg(debug_assertions)]
    let estimate = MeshEstimator::from_canvas(canvas);

    let mut paths = Count::ZERO;
    for path in canvas.paths() {
        paths += stroke_path(path, output)?;
    }

    let mut rects = Count::ZERO;
    for rect in canvas.rects() {
        rects += tessellate_rect(rect, output)?;
    }

    let mut rounded_rects = Count::ZERO;
    for rounded_rect in canvas.rounded_rects() {
        rounded_rects += tessellate_rounded_rect(rounded_rect, output)?;
    }

    let mut ellipses = Count::ZERO;
    for ellipse in canvas.ellipses() {
        ellipses += tessellate_ellipse(ellipse, output)?;
    }

    #[cfg(debug_assertions)]
    {
        debug_assert_eq!(paths, estimate.paths(), "path size mismatch");
        debug_assert_eq!(rects, estimate.rects(), "rect size mismatch");
        debug_assert_eq!(rounded_rects, estimate.rounded_rects(), "rounded rect size mismatch");
        debug_assert_eq!(ellipses, estimate.ellipses(), "ellipse size mismatch");
    }

    Ok(paths + rects + rounded_rects + ellipses)
}

/// Writes the mesh of a canvas into the buffers of `mesh`.
///
/// The mesh must have room for [`mesh_size`](crate::mesh_size) vertices and indices. This is
/// checked before anything is written. Any geometry previously written in `mesh` is
/// overwritten, and on error the mesh reports zero vertices and indices.
///
/// # Example
///
/// ```
/// use quill_tessellation::{render, mesh_size, MeshDescriptor, VertexLayout, IndexLayout, IndexFormat};
/// use quill_tessellation::path::Canvas;
///
/// let mut canvas = Canvas::new();
/// canvas.move_to(0.0, 0.0).unwrap();
/// canvas.line_to(100.0, 0.0).unwrap();
/// canvas.circle(50.0, 50.0, 10.0).unwrap();
///
/// let size = mesh_size(&canvas);
/// let mut vertices = vec![0u8; size.vertices as usize * 20];
/// let mut indices = vec![0u8; size.indices as usize * 4];
///
/// let mut mesh = MeshDescriptor::interleaved(
///     &mut vertices,
///     VertexLayout::PACKED_INTERLEAVED,
///     &mut indices,
///     IndexLayout::packed(IndexFormat::U32),
/// ).unwrap();
///
/// let count = render(&canvas, &mut mesh).unwrap();
/// assert_eq!(count, size);
///
/// canvas.clear();
/// ```
pub fn render<A: Allocator>(
    canvas: &Canvas<A>,
    mesh: &mut MeshDescriptor,
) -> TessellationResult<Count> {
    mesh.reset();

    let required = MeshEstimator::from_canvas(canvas).total();
    let available = mesh.capacity();
    if !available.contains(required) {
        log::warn!(
            "mesh too small: {:?} required, {:?} available",
            required,
            available
        );
        return Err(TessellationError::InsufficientCapacity {
            required,
            available,
        });
    }

    if mesh.index_layout().format == IndexFormat::U16 && required.vertices > u16::MAX as u32 + 1
    {
        log::warn!("{} vertices do not fit in 16 bits indices", required.vertices);
        return Err(GeometryBuilderError::TooManyVertices.into());
    }

    let result = tessellate(canvas, &mut MeshWriter::new(mesh));
    match result {
        Ok(count) => {
            debug_assert_eq!(count, required);
            log::debug!(
                "rendered {} vertices and {} indices",
                count.vertices,
                count.indices
            );
        }
        Err(_) => mesh.reset(),
    }

    result
}
