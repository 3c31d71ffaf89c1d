//! Tools to help with generating vertex and index buffers.
//!
//! ## Overview
//!
//! The tessellators do not own the memory their triangles end up in. They describe the
//! geometry to a [`GeometryBuilder`] one vertex and one triangle at a time:
//!
//! ```ignore
//! output.begin_geometry();
//! let a = output.add_vertex(vertex_a)?;
//! // ...
//! output.add_triangle(a, b, c)?;
//! let count = output.end_geometry();
//! ```
//!
//! Two builders are provided:
//!
//! * [`MeshWriter`](crate::MeshWriter) writes vertices and indices into the caller-owned,
//!   arbitrarily strided byte buffers of a [`MeshDescriptor`](crate::MeshDescriptor).
//! * [`Counter`] writes nothing and only counts. Since it goes through the exact same code
//!   as the writer it is the reference the closed-form size estimates are checked against.
//!
//! Vertex ids are allocated sequentially in the order vertices are added, and are
//! absolute: the first vertex of the second primitive follows the last vertex of the
//! first one.

use crate::error::{GeometryBuilderError, TessellationError, TessellationResult};
use crate::math::Point;
use crate::path::Color;

use core::ops::{Add, AddAssign};

/// A vertex as produced by the tessellators, before it is packed into the output buffers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MeshVertex {
    pub position: Point,
    /// Straight alpha color, multiplied by the mesh tint when written.
    pub color: Color,
    pub uv: [f32; 2],
}

/// A virtual vertex offset in a geometry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct VertexId(pub u32);

impl VertexId {
    pub const INVALID: VertexId = VertexId(u32::MAX);

    #[inline]
    pub fn offset(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn to_usize(self) -> usize {
        self.0 as usize
    }
}

impl Add<u32> for VertexId {
    type Output = Self;
    #[inline]
    fn add(self, rhs: u32) -> Self {
        VertexId(self.0 + rhs)
    }
}

impl From<u32> for VertexId {
    fn from(v: u32) -> Self {
        VertexId(v)
    }
}

impl From<VertexId> for u32 {
    fn from(v: VertexId) -> Self {
        v.0
    }
}

/// Number of vertices and indices of some geometry.
///
/// Additions saturate at `u32::MAX`. Such a count is larger than any mesh can hold.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Count {
    pub vertices: u32,
    pub indices: u32,
}

impl Count {
    pub const ZERO: Count = Count {
        vertices: 0,
        indices: 0,
    };

    #[inline]
    pub const fn new(vertices: u32, indices: u32) -> Self {
        Count { vertices, indices }
    }

    /// True if `other` fits in `self`.
    #[inline]
    pub fn contains(&self, other: Count) -> bool {
        other.vertices <= self.vertices && other.indices <= self.indices
    }
}

impl Add for Count {
    type Output = Count;
    #[inline]
    fn add(self, other: Count) -> Count {
        Count {
            vertices: self.vertices.saturating_add(other.vertices),
            indices: self.indices.saturating_add(other.indices),
        }
    }
}

impl AddAssign for Count {
    #[inline]
    fn add_assign(&mut self, other: Count) {
        *self = *self + other;
    }
}

impl core::iter::Sum for Count {
    fn sum<I: Iterator<Item = Count>>(iter: I) -> Count {
        iter.fold(Count::ZERO, Add::add)
    }
}

/// An interface separating tessellators and other geometry generation algorithms from the
/// actual vertex construction.
///
/// See the [`geometry_builder`](index.html) documentation for more detailed explanation.
pub trait GeometryBuilder {
    /// Called at the beginning of a generation.
    ///
    /// end_geometry must be called before begin_geometry is called again.
    fn begin_geometry(&mut self) {}

    /// Inserts a vertex and returns its id.
    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<VertexId, GeometryBuilderError>;

    /// Insert a triangle made of vertices that were added after the last call to
    /// begin_geometry.
    fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<(), GeometryBuilderError>;

    /// Called at the end of a generation.
    ///
    /// Returns the number of vertices and indices added since the last time begin_geometry
    /// was called.
    fn end_geometry(&mut self) -> Count;

    /// abort_geometry is called instead of end_geometry if an error occurred while producing
    /// the geometry and we won't be able to finish.
    ///
    /// The implementation is expected to discard the geometry that was generated since the
    /// last time begin_geometry was called, and to remain in a usable state.
    fn abort_geometry(&mut self) {}
}

/// Runs `f` between `begin_geometry` and `end_geometry`, aborting the geometry on error.
pub(crate) fn with_geometry<F>(output: &mut dyn GeometryBuilder, f: F) -> TessellationResult<Count>
where
    F: FnOnce(&mut dyn GeometryBuilder) -> Result<(), GeometryBuilderError>,
{
    output.begin_geometry();
    match f(output) {
        Ok(()) => Ok(output.end_geometry()),
        Err(err) => {
            output.abort_geometry();
            Err(TessellationError::GeometryBuilder(err))
        }
    }
}

/// A geometry builder that does not output any geometry and only counts vertices and
/// indices.
#[derive(Clone, Debug, Default)]
pub struct Counter {
    total: Count,
    geometry_start: Count,
}

impl Counter {
    pub fn new() -> Self {
        Counter::default()
    }

    /// Everything counted so far, across geometries.
    #[inline]
    pub fn count(&self) -> Count {
        self.total
    }

    pub fn reset(&mut self) {
        *self = Counter::default();
    }
}

impl GeometryBuilder for Counter {
    fn begin_geometry(&mut self) {
        self.geometry_start = self.total;
    }

    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<VertexId, GeometryBuilderError> {
        debug_assert!(vertex.position.x.is_finite() && vertex.position.y.is_finite());
        if self.total.vertices == u32::MAX {
            return Err(GeometryBuilderError::TooManyVertices);
        }
        self.total.vertices += 1;

        Ok(VertexId(self.total.vertices - 1))
    }

    fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<(), GeometryBuilderError> {
        debug_assert!(a.0 < self.total.vertices);
        debug_assert!(b.0 < self.total.vertices);
        debug_assert!(c.0 < self.total.vertices);
        self.total.indices += 3;

        Ok(())
    }

    fn end_geometry(&mut self) -> Count {
        Count {
            vertices: self.total.vertices - self.geometry_start.vertices,
            indices: self.total.indices - self.geometry_start.indices,
        }
    }

    fn abort_geometry(&mut self) {
        self.total = self.geometry_start;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::point;

    fn vertex() -> MeshVertex {
        MeshVertex {
            position: point(0.0, 0.0),
            color: Color::BLACK,
            uv: [0.0, 0.0],
        }
    }

    #[test]
    fn counter() {
        let mut counter = Counter::new();

        let count = with_geometry(&mut counter, |output| {
            let a = output.add_vertex(vertex())?;
            let b = output.add_vertex(vertex())?;
            let c = output.add_vertex(vertex())?;
            assert_eq!((a, b, c), (VertexId(0), VertexId(1), VertexId(2)));
            output.add_triangle(a, b, c)
        })
        .unwrap();
        assert_eq!(count, Count::new(3, 3));

        let count = with_geometry(&mut counter, |output| {
            let a = output.add_vertex(vertex())?;
            assert_eq!(a, VertexId(3));
            Ok(())
        })
        .unwrap();
        assert_eq!(count, Count::new(1, 0));
        assert_eq!(counter.count(), Count::new(4, 3));
    }

    #[test]
    fn abort_rolls_back() {
        let mut counter = Counter::new();
        let result = with_geometry(&mut counter, |output| {
            output.add_vertex(vertex())?;
            output.add_vertex(vertex())?;
            Err(GeometryBuilderError::IndexCapacity)
        });

        assert_eq!(
            result,
            Err(TessellationError::GeometryBuilder(GeometryBuilderError::IndexCapacity))
        );
        assert_eq!(counter.count(), Count::ZERO);
    }

    #[test]
    fn count_sum() {
        let total: Count = [Count::new(1, 2), Count::new(3, 4)].iter().copied().sum();
        assert_eq!(total, Count::new(4, 6));
        assert!(total.contains(Count::new(4, 5)));
        assert!(!total.contains(Count::new(5, 0)));

        let mut big = Count::new(u32::MAX - 1, 7);
        big += Count::new(3, 1);
        assert_eq!(big, Count::new(u32::MAX, 8));
    }
}

/// Keeps everything in memory, for inspection in tests.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct Recorder {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
    geometry_start: Count,
}

#[cfg(test)]
impl GeometryBuilder for Recorder {
    fn begin_geometry(&mut self) {
        self.geometry_start = Count::new(self.vertices.len() as u32, self.indices.len() as u32);
    }

    fn add_vertex(&mut self, vertex: MeshVertex) -> Result<VertexId, GeometryBuilderError> {
        self.vertices.push(vertex);
        Ok(VertexId(self.vertices.len() as u32 - 1))
    }

    fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<(), GeometryBuilderError> {
        self.indices.extend_from_slice(&[a.0, b.0, c.0]);
        Ok(())
    }

    fn end_geometry(&mut self) -> Count {
        Count::new(
            self.vertices.len() as u32 - self.geometry_start.vertices,
            self.indices.len() as u32 - self.geometry_start.indices,
        )
    }

    fn abort_geometry(&mut self) {
        self.vertices.truncate(self.geometry_start.vertices as usize);
        self.indices.truncate(self.geometry_start.indices as usize);
    }
}
