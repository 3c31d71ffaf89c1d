//! Scenes shared by the integration tests and the benchmarks.

#[cfg(test)]
mod allocator;
#[cfg(test)]
mod end_to_end;
#[cfg(test)]
mod sizes;

use quill::path::{Allocator, Canvas, CanvasResult, Color};
use quill::tessellation::{IndexFormat, IndexLayout, MeshDescriptor, MeshError, VertexLayout};

/// Size in bytes of a vertex with the packed interleaved layout.
pub const VERTEX_SIZE: usize = 20;

/// A deterministic scene with `n` of each primitive kind and varying styles.
pub fn build_scene<A: Allocator>(canvas: &mut Canvas<A>, n: u32) -> CanvasResult<()> {
    for i in 0..n {
        let f = i as f32;
        let soft = i % 2 == 1;

        canvas.set_penumbra(if soft { 1.0 } else { 0.0 })?;
        canvas.set_stroke_width(1.0 + (i % 4) as f32)?;
        canvas.set_stroke_color(Color::new(f / n as f32, 0.5, 0.2, 1.0));
        canvas.set_fill_color(Color::new(0.1, 0.2, f / n as f32, 0.9));
        canvas.set_curve_quality(4 + i % 13)?;
        canvas.set_ellipse_quality(8 + i % 25)?;

        canvas.move_to(f, 0.0)?;
        canvas.line_to(f + 10.0, 5.0)?;
        canvas.quadratic_curve_to(f + 20.0, 30.0, f + 30.0, 5.0)?;
        canvas.bezier_curve_to(f + 40.0, -20.0, f + 50.0, 40.0, f + 60.0, 0.0)?;

        if i % 3 == 0 {
            canvas.begin_fill();
        }
        canvas.rect(f, 50.0, 20.0, 10.0)?;
        canvas.rounded_rect(f, 70.0, 30.0, 20.0, 4.0)?;
        canvas.ellipse(f, 100.0, 10.0, 6.0)?;
        canvas.end_fill();
    }

    Ok(())
}

/// Owned buffers sized for a given number of vertices and indices.
pub struct MeshBuffers {
    pub vertices: Vec<u8>,
    pub indices: Vec<u8>,
}

impl MeshBuffers {
    pub fn new(vertices: u32, indices: u32) -> Self {
        MeshBuffers {
            vertices: vec![0; vertices as usize * VERTEX_SIZE],
            indices: vec![0; indices as usize * 4],
        }
    }

    /// Packed interleaved vertices and 32 bits indices.
    pub fn descriptor(&mut self) -> Result<MeshDescriptor, MeshError> {
        MeshDescriptor::interleaved(
            &mut self.vertices,
            VertexLayout::PACKED_INTERLEAVED,
            &mut self.indices,
            IndexLayout::packed(IndexFormat::U32),
        )
    }

    pub fn index(&self, i: usize) -> u32 {
        let bytes = &self.indices[i * 4..i * 4 + 4];
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn position(&self, i: usize) -> [f32; 2] {
        let at = i * VERTEX_SIZE;
        [read_f32(&self.vertices, at), read_f32(&self.vertices, at + 4)]
    }

    pub fn color(&self, i: usize) -> u32 {
        let at = i * VERTEX_SIZE + 8;
        let bytes = &self.vertices[at..at + 4];
        u32::from_ne_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
    }

    pub fn uv(&self, i: usize) -> [f32; 2] {
        let at = i * VERTEX_SIZE + 12;
        [read_f32(&self.vertices, at), read_f32(&self.vertices, at + 4)]
    }
}

fn read_f32(bytes: &[u8], at: usize) -> f32 {
    f32::from_ne_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

#[cfg(test)]
pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
