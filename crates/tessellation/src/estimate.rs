//! Exact mesh sizes, computed without generating any geometry.
//!
//! The counts are closed-form functions of the primitives and their style snapshots. They
//! are what `render` needs to fit in the caller's buffers, and are checked against the
//! tessellators in debug builds.

use crate::ellipse::ellipse_count;
use crate::geometry_builder::Count;
use crate::path::{Allocator, Canvas, Ellipse, Path, Rect, RoundedRect};
use crate::rect::rect_count;
use crate::rounded_rect::rounded_rect_count;
use crate::stroke::path_count;

/// Accumulates the mesh size of primitives, per primitive kind.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MeshEstimator {
    paths: Count,
    rects: Count,
    rounded_rects: Count,
    ellipses: Count,
}

impl MeshEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sizes everything in a canvas.
    pub fn from_canvas<A: Allocator>(canvas: &Canvas<A>) -> Self {
        let mut estimator = MeshEstimator::new();
        estimator.count_canvas(canvas);

        estimator
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn count_canvas<A: Allocator>(&mut self, canvas: &Canvas<A>) {
        for path in canvas.paths() {
            self.count_path(path);
        }
        for rect in canvas.rects() {
            self.count_rect(rect);
        }
        for rounded_rect in canvas.rounded_rects() {
            self.count_rounded_rect(rounded_rect);
        }
        for ellipse in canvas.ellipses() {
            self.count_ellipse(ellipse);
        }
    }

    /// Empty paths count for nothing.
    pub fn count_path(&mut self, path: &Path) {
        self.paths += path_count(path);
    }

    pub fn count_rect(&mut self, rect: &Rect) {
        self.rects += rect_count(rect);
    }

    pub fn count_rounded_rect(&mut self, rounded_rect: &RoundedRect) {
        self.rounded_rects += rounded_rect_count(rounded_rect);
    }

    pub fn count_ellipse(&mut self, ellipse: &Ellipse) {
        self.ellipses += ellipse_count(ellipse);
    }

    #[inline]
    pub fn paths(&self) -> Count {
        self.paths
    }

    #[inline]
    pub fn rects(&self) -> Count {
        self.rects
    }

    #[inline]
    pub fn rounded_rects(&self) -> Count {
        self.rounded_rects
    }

    #[inline]
    pub fn ellipses(&self) -> Count {
        self.ellipses
    }

    #[inline]
    pub fn total(&self) -> Count {
        self.paths + self.rects + self.rounded_rects + self.ellipses
    }
}

/// The number of vertices and indices `render` writes for this canvas.
pub fn mesh_size<A: Allocator>(canvas: &Canvas<A>) -> Count {
    MeshEstimator::from_canvas(canvas).total()
}
