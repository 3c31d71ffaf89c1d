//! Writes vertices and indices into caller-owned byte buffers.
//!
//! Each vertex attribute lives in one of up to three byte buffers at a given byte offset,
//! with a given byte stride between consecutive vertices. Attributes can be interleaved in a
//! single buffer, spread over separate buffers, or any mix of the two. Values are written in
//! native endianness.
//!
//! | attribute | type |
//! |---|---|
//! | position | `[f32; 2]` |
//! | color | `u32`, `0xAARRGGBB` |
//! | uv | `[f32; 2]` |
//!
//! ```
//! use quill_tessellation::{MeshDescriptor, VertexLayout, IndexLayout, IndexFormat};
//!
//! let mut vertices = vec![0u8; 20 * 64];
//! let mut indices = vec![0u8; 2 * 128];
//! let mesh = MeshDescriptor::interleaved(
//!     &mut vertices,
//!     VertexLayout::PACKED_INTERLEAVED,
//!     &mut indices,
//!     IndexLayout::packed(IndexFormat::U16),
//! ).unwrap();
//!
//! assert_eq!(mesh.vertex_capacity(), 64);
//! assert_eq!(mesh.index_capacity(), 128);
//! ```

use crate::error::{GeometryBuilderError, MeshError};
use crate::geometry_builder::{Count, GeometryBuilder, MeshVertex, VertexId};
use crate::path::Color;

use arrayvec::ArrayVec;

pub const POSITION_SIZE: usize = 8;
pub const COLOR_SIZE: usize = 4;
pub const UV_SIZE: usize = 8;

/// Maximum number of vertex buffers a mesh can write to.
pub const MAX_VERTEX_BUFFERS: usize = 3;

/// Where an attribute lives: which vertex buffer, at which byte offset, with which byte
/// stride.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct AttributeLayout {
    pub buffer: usize,
    pub offset: usize,
    pub stride: usize,
}

impl AttributeLayout {
    #[inline]
    pub const fn new(buffer: usize, offset: usize, stride: usize) -> Self {
        AttributeLayout {
            buffer,
            offset,
            stride,
        }
    }

    /// Number of whole `size`-byte slots available in a buffer of `len` bytes.
    fn capacity(&self, len: usize, size: usize) -> usize {
        self.offset
            .checked_add(size)
            .and_then(|end| len.checked_sub(end))
            .map_or(0, |remaining| remaining / self.stride + 1)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexLayout {
    pub position: AttributeLayout,
    pub color: AttributeLayout,
    pub uv: AttributeLayout,
}

impl VertexLayout {
    /// `position, color, uv` packed in a single 20 bytes vertex.
    pub const PACKED_INTERLEAVED: Self = VertexLayout::interleaved(20, 0, 8, 12);

    /// One tightly packed buffer per attribute, in `position, color, uv` order.
    pub const PACKED_SEPARATE: Self = VertexLayout {
        position: AttributeLayout::new(0, 0, POSITION_SIZE),
        color: AttributeLayout::new(1, 0, COLOR_SIZE),
        uv: AttributeLayout::new(2, 0, UV_SIZE),
    };

    /// All attributes in buffer 0, sharing the same stride.
    pub const fn interleaved(
        stride: usize,
        position_offset: usize,
        color_offset: usize,
        uv_offset: usize,
    ) -> Self {
        VertexLayout {
            position: AttributeLayout::new(0, position_offset, stride),
            color: AttributeLayout::new(0, color_offset, stride),
            uv: AttributeLayout::new(0, uv_offset, stride),
        }
    }

    fn attributes(&self) -> [(AttributeLayout, usize); 3] {
        [
            (self.position, POSITION_SIZE),
            (self.color, COLOR_SIZE),
            (self.uv, UV_SIZE),
        ]
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum IndexFormat {
    U16,
    U32,
}

impl IndexFormat {
    #[inline]
    pub const fn size(self) -> usize {
        match self {
            IndexFormat::U16 => 2,
            IndexFormat::U32 => 4,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct IndexLayout {
    pub offset: usize,
    pub stride: usize,
    pub format: IndexFormat,
}

impl IndexLayout {
    /// Tightly packed indices starting at byte 0.
    #[inline]
    pub const fn packed(format: IndexFormat) -> Self {
        IndexLayout {
            offset: 0,
            stride: format.size(),
            format,
        }
    }

    fn as_attribute(&self) -> AttributeLayout {
        AttributeLayout::new(0, self.offset, self.stride)
    }
}

/// The output of a render: borrowed vertex and index buffers, their layouts, the tint and
/// the number of vertices and indices written so far.
pub struct MeshDescriptor<'a> {
    vertex_buffers: ArrayVec<&'a mut [u8], MAX_VERTEX_BUFFERS>,
    vertex_layout: VertexLayout,
    index_buffer: &'a mut [u8],
    index_layout: IndexLayout,
    tint: Color,
    count: Count,
}

impl<'a> MeshDescriptor<'a> {
    /// A mesh with all vertex attributes in one buffer.
    pub fn interleaved(
        vertices: &'a mut [u8],
        layout: VertexLayout,
        indices: &'a mut [u8],
        index_layout: IndexLayout,
    ) -> Result<Self, MeshError> {
        let mut buffers = ArrayVec::new();
        buffers.push(vertices);

        MeshDescriptor::from_parts(buffers, layout, indices, index_layout)
    }

    /// A mesh with up to one buffer per vertex attribute.
    ///
    /// The `buffer` field of each attribute layout indexes into `[positions, colors, uvs]`.
    pub fn separate(
        positions: &'a mut [u8],
        colors: &'a mut [u8],
        uvs: &'a mut [u8],
        layout: VertexLayout,
        indices: &'a mut [u8],
        index_layout: IndexLayout,
    ) -> Result<Self, MeshError> {
        let mut buffers = ArrayVec::new();
        buffers.push(positions);
        buffers.push(colors);
        buffers.push(uvs);

        MeshDescriptor::from_parts(buffers, layout, indices, index_layout)
    }

    fn from_parts(
        vertex_buffers: ArrayVec<&'a mut [u8], MAX_VERTEX_BUFFERS>,
        vertex_layout: VertexLayout,
        index_buffer: &'a mut [u8],
        index_layout: IndexLayout,
    ) -> Result<Self, MeshError> {
        for (attribute, size) in vertex_layout.attributes() {
            check_stride(attribute.stride, size)?;
            if attribute.buffer >= vertex_buffers.len() {
                return Err(MeshError::MissingBuffer(attribute.buffer));
            }
        }
        check_stride(index_layout.stride, index_layout.format.size())?;

        Ok(MeshDescriptor {
            vertex_buffers,
            vertex_layout,
            index_buffer,
            index_layout,
            tint: Color::WHITE,
            count: Count::ZERO,
        })
    }

    /// Color every vertex color is multiplied with. Opaque white by default.
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = tint;
        self
    }

    pub fn set_tint(&mut self, tint: Color) {
        self.tint = tint;
    }

    #[inline]
    pub fn tint(&self) -> Color {
        self.tint
    }

    #[inline]
    pub fn vertex_layout(&self) -> &VertexLayout {
        &self.vertex_layout
    }

    #[inline]
    pub fn index_layout(&self) -> &IndexLayout {
        &self.index_layout
    }

    /// Number of vertices written by the last render.
    #[inline]
    pub fn vertex_count(&self) -> u32 {
        self.count.vertices
    }

    /// Number of indices written by the last render.
    #[inline]
    pub fn index_count(&self) -> u32 {
        self.count.indices
    }

    #[inline]
    pub fn count(&self) -> Count {
        self.count
    }

    /// Forgets the written geometry. The buffers are left as they are.
    pub fn reset(&mut self) {
        self.count = Count::ZERO;
    }

    /// Number of vertices every attribute has room for.
    pub fn vertex_capacity(&self) -> u32 {
        self.vertex_layout
            .attributes()
            .iter()
            .map(|(attribute, size)| {
                attribute.capacity(self.vertex_buffers[attribute.buffer].len(), *size)
            })
            .min()
            .unwrap_or(0)
            .min(u32::MAX as usize) as u32
    }

    pub fn index_capacity(&self) -> u32 {
        let capacity = self
            .index_layout
            .as_attribute()
            .capacity(self.index_buffer.len(), self.index_layout.format.size());

        capacity.min(u32::MAX as usize) as u32
    }

    #[inline]
    pub fn capacity(&self) -> Count {
        Count::new(self.vertex_capacity(), self.index_capacity())
    }

    fn write_vertex(&mut self, vertex: &MeshVertex) -> Result<(), GeometryBuilderError> {
        let slot = self.count.vertices as usize;
        let color = (self.tint * vertex.color).to_argb();
        let layout = self.vertex_layout;

        let position = [vertex.position.x, vertex.position.y];
        let buffers = &mut self.vertex_buffers;
        let written = write_pod(&mut buffers[layout.position.buffer], layout.position, slot, &position)
            .and(write_pod(&mut buffers[layout.color.buffer], layout.color, slot, &color))
            .and(write_pod(&mut buffers[layout.uv.buffer], layout.uv, slot, &vertex.uv));

        written.ok_or(GeometryBuilderError::VertexCapacity)
    }

    fn write_index(&mut self, id: VertexId) -> Result<(), GeometryBuilderError> {
        let slot = self.count.indices as usize;
        let layout = self.index_layout.as_attribute();
        let written = match self.index_layout.format {
            IndexFormat::U16 => {
                let index =
                    u16::try_from(id.0).map_err(|_| GeometryBuilderError::TooManyVertices)?;
                write_pod(&mut *self.index_buffer, layout, slot, &index)
            }
            IndexFormat::U32 => write_pod(&mut *self.index_buffer, layout, slot, &id.0),
        };

        written.ok_or(GeometryBuilderError::IndexCapacity)?;
        self.count.indices += 1;

        Ok(())
    }
}

impl<'a> core::fmt::Debug for MeshDescriptor<'a> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("MeshDescriptor")
            .field("vertex_layout", &self.vertex_layout)
            .field("index_layout", &self.index_layout)
            .field("tint", &self.tint)
            .field("count", &self.count)
            .field("capacity", &self.capacity())
            .finish()
    }
}

fn check_stride(stride: usize, size: usize) -> Result<(), MeshError> {
    if stride == 0 {
        return Err(MeshError::ZeroStride);
    }
    if stride < size {
        return Err(MeshError::StrideTooSmall { stride, size });
    }

    Ok(())
}

/// Copies the bytes of `value` into slot `slot` of a strided buffer.
fn write_pod<T: bytemuck::Pod>(
    buffer: &mut [u8],
    layout: AttributeLayout,
    slot: usize,
    value: &T,
) -> Option<()> {
    let bytes = bytemuck::bytes_of(value);
    let start = slot.checked_mul(layout.stride)?.checked_add(layout.offset)?;
    let end = start.checked_add(bytes.len())?;
    buffer.get_mut(start..end)?.copy_from_slice(bytes);

    Some(())
}

/// A [`GeometryBuilder`] writing into a [`MeshDescriptor`].
pub struct MeshWriter<'l, 'a> {
    mesh: &'l mut MeshDescriptor<'a>,
    geometry_start: Count,
}

impl<'l, 'a> MeshWriter<'l, 'a> {
    /// Appends after the geometry already written in `mesh`.
    pub fn new(mesh: &'l mut MeshDescriptor<'a>) -> Self {
        let geometry_start = mesh.count;
        MeshWriter {
            mesh,
            geometry_start,
        }
    }

    #[inline]
    pub fn mesh(&self) -> &MeshDescriptor<'a> {
        self.mesh
    }
}

impl<'l, 'a> GeometryBuilder for MeshWriter<'l, 'a> {
    fn begin_geometry(&mut self) {
        self.geometry_start = self.mesh.count;
    }

    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<VertexId, GeometryBuilderError> {
        let id = VertexId(self.mesh.count.vertices);
        if self.mesh.index_layout.format == IndexFormat::U16 && id.0 > u16::MAX as u32 {
            return Err(GeometryBuilderError::TooManyVertices);
        }

        self.mesh.write_vertex(&vertex)?;
        self.mesh.count.vertices += 1;

        Ok(id)
    }

    fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<(), GeometryBuilderError> {
        debug_assert!(a.0 < self.mesh.count.vertices);
        debug_assert!(b.0 < self.mesh.count.vertices);
        debug_assert!(c.0 < self.mesh.count.vertices);

        if self.mesh.count.indices as usize + 3 > self.mesh.index_capacity() as usize {
            return Err(GeometryBuilderError::IndexCapacity);
        }
        self.mesh.write_index(a)?;
        self.mesh.write_index(b)?;
        self.mesh.write_index(c)
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: self.mesh.count.vertices - self.geometry_start.vertices,
            indices: self.mesh.count.indices - self.geometry_start.indices,
        }
    }

    fn abort_geometry(&mut self) {
        self.mesh.count = self.geometry_start;
    }
}
