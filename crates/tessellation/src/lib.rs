#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::new_without_default)]

//! Tessellation of paths and closed shapes into antialiased triangle meshes.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! ## Overview
//!
//! The input is a [`Canvas`](path::Canvas) full of paths, rectangles, rounded rectangles and
//! ellipses. The output is a triangle mesh made of positions, packed ARGB colors and texture
//! coordinates, plus a triangle index list, written directly into byte buffers the caller
//! owns, with arbitrary offsets and strides.
//!
//! The most interesting items of this crate are:
//!
//! * [`mesh_size`] - the exact number of vertices and indices a canvas needs, computed
//!   without generating anything.
//! * [`render`] - writes the mesh of a canvas into a [`MeshDescriptor`].
//! * [`GeometryBuilder`](geometry_builder::GeometryBuilder) - the interface between the
//!   tessellators and their output. [`MeshWriter`] and [`Counter`] implement it.
//!
//! A typical frame looks like:
//!
//! ```
//! use quill_tessellation::{mesh_size, render, IndexFormat, IndexLayout, MeshDescriptor, VertexLayout};
//! use quill_tessellation::path::{Canvas, Color};
//!
//! let mut canvas = Canvas::new();
//! canvas.set_penumbra(1.0).unwrap();
//! canvas.set_stroke_width(2.0).unwrap();
//! canvas.move_to(10.0, 10.0).unwrap();
//! canvas.quadratic_curve_to(50.0, 0.0, 90.0, 10.0).unwrap();
//! canvas.set_fill_color(Color::new(0.2, 0.4, 0.8, 1.0));
//! canvas.begin_fill();
//! canvas.rounded_rect(10.0, 20.0, 80.0, 40.0, 6.0).unwrap();
//! canvas.end_fill();
//!
//! // Size, allocate, render.
//! let size = mesh_size(&canvas);
//! let mut vertices = vec![0u8; size.vertices as usize * 20];
//! let mut indices = vec![0u8; size.indices as usize * 2];
//! let mut mesh = MeshDescriptor::interleaved(
//!     &mut vertices,
//!     VertexLayout::PACKED_INTERLEAVED,
//!     &mut indices,
//!     IndexLayout::packed(IndexFormat::U16),
//! ).unwrap();
//! render(&canvas, &mut mesh).unwrap();
//! assert_eq!(mesh.count(), size);
//!
//! // Upload the buffers, then start the next frame.
//! canvas.clear();
//! ```
//!
//! ## Antialiasing
//!
//! Strokes and fills with a non-zero penumbra get an antialiasing fringe: extra vertices
//! whose color alpha fades to zero over the penumbra width. With a zero penumbra edges are
//! hard and use fewer vertices.
//!
//! ## Tessellation quality
//!
//! There is no adaptive subdivision. Curves are sampled `curve_quality` times, ellipses
//! `ellipse_quality` times, and each rounded corner `ceil(ellipse_quality / 4)` times, as
//! configured in the [`Style`](path::Style) at the time the primitive was added.

pub use quill_path as path;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod ellipse;
mod error;
mod estimate;
pub mod geometry_builder;
mod mesh_writer;
mod rect;
mod render;
mod ring;
mod rounded_rect;
mod stroke;

#[doc(inline)]
pub use crate::ellipse::{ellipse_count, tessellate_ellipse};
#[doc(inline)]
pub use crate::error::*;
#[doc(inline)]
pub use crate::estimate::{mesh_size, MeshEstimator};
#[doc(inline)]
pub use crate::geometry_builder::{Count, Counter, GeometryBuilder, MeshVertex, VertexId};
#[doc(inline)]
pub use crate::mesh_writer::{
    AttributeLayout, IndexFormat, IndexLayout, MeshDescriptor, MeshWriter, VertexLayout,
    COLOR_SIZE, MAX_VERTEX_BUFFERS, POSITION_SIZE, UV_SIZE,
};
#[doc(inline)]
pub use crate::rect::{rect_count, tessellate_rect};
#[doc(inline)]
pub use crate::render::{render, tessellate};
#[doc(inline)]
pub use crate::rounded_rect::{rounded_rect_count, tessellate_rounded_rect, CornerRing};
#[doc(inline)]
pub use crate::stroke::{
    flatten, miter_offset, path_count, stroke_path, Flattened, FlattenedPoint,
};

pub use crate::path::geom;
pub use crate::path::math;
