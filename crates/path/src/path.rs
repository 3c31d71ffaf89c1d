//! Open paths made of line and Bézier edges.

use crate::allocator::Allocator;
use crate::error::AllocError;
use crate::list::RawList;
use crate::math::Point;
use crate::style::EdgeStyle;

/// The geometric kind of an edge, with its control points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum EdgeKind {
    Line,
    Quadratic { ctrl: Point },
    Cubic { ctrl1: Point, ctrl2: Point },
}

/// One segment of a path, ending at the path point of the same index plus one.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Edge {
    pub kind: EdgeKind,
    pub style: EdgeStyle,
}

impl Edge {
    /// Number of points this edge adds to the flattened path.
    ///
    /// A line adds its end point. A curve adds its `quality` samples, from its start point
    /// (which repeats the end of the previous edge) to its end point.
    #[inline]
    pub fn flattened_len(&self) -> u32 {
        match self.kind {
            EdgeKind::Line => 1,
            EdgeKind::Quadratic { .. } | EdgeKind::Cubic { .. } => self.style.quality,
        }
    }
}

/// A path started by `move_to`.
///
/// `points()[0]` is the starting point, `points()[i + 1]` is the end of `edges()[i]`.
pub struct Path {
    points: RawList<Point>,
    edges: RawList<Edge>,
    penumbra: f32,
}

impl Path {
    pub(crate) fn begin<A: Allocator>(
        alloc: &mut A,
        at: Point,
        penumbra: f32,
    ) -> Result<Self, AllocError> {
        let mut points = RawList::new();
        points.push(alloc, at)?;

        Ok(Path {
            points,
            edges: RawList::new(),
            penumbra,
        })
    }

    /// Appends an edge and its end point, leaving the path untouched on failure.
    pub(crate) fn push_edge<A: Allocator>(
        &mut self,
        alloc: &mut A,
        edge: Edge,
        to: Point,
    ) -> Result<(), AllocError> {
        self.points.reserve(alloc, 1)?;
        self.edges.reserve(alloc, 1)?;
        self.points.push(alloc, to)?;
        self.edges.push(alloc, edge)
    }

    pub(crate) fn release<A: Allocator>(&mut self, alloc: &mut A) {
        self.points.release(alloc);
        self.edges.release(alloc);
    }

    #[inline]
    pub fn points(&self) -> &[Point] {
        self.points.as_slice()
    }

    #[inline]
    pub fn edges(&self) -> &[Edge] {
        self.edges.as_slice()
    }

    #[inline]
    pub fn first(&self) -> Point {
        self.points()[0]
    }

    #[inline]
    pub fn last(&self) -> Point {
        self.points()[self.points.len() - 1]
    }

    /// Antialiasing width of the whole path, captured by `move_to`.
    #[inline]
    pub fn penumbra(&self) -> f32 {
        self.penumbra
    }

    /// True when the path has no edge and produces no geometry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Number of points of the flattened path, zero for an empty path.
    ///
    /// Saturates at `u32::MAX`, which no mesh can hold.
    pub fn flattened_len(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }

        self.edges()
            .iter()
            .fold(1u32, |len, edge| len.saturating_add(edge.flattened_len()))
    }
}

impl core::fmt::Debug for Path {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("Path")
            .field("points", &self.points)
            .field("edges", &self.edges)
            .field("penumbra", &self.penumbra)
            .finish()
    }
}
