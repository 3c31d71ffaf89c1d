#![deny(bare_trait_objects)]

//! Retained-mode 2D vector graphics tessellation in Rust.
//!
//! Describe a frame with paths, rectangles, rounded rectangles and ellipses on a
//! [`Canvas`](path::Canvas), ask for the exact size of its mesh, and have the mesh written into
//! vertex and index buffers you own, with whatever layout your renderer expects.
//!
//! # Crates
//!
//! This meta-crate (`quill`) reexports the following sub-crates for convenience:
//!
//!   **quill_tessellation** - Tessellators, size estimation and mesh output.
//!   **quill_path** - The canvas, its primitives, styles and allocator.
//!   **quill_geom** - Bézier evaluation, line intersection and vector helpers.
//!
//! ```ignore
//! use quill_tessellation::render;
//! ```
//!
//! Is equivalent to:
//!
//! ```ignore
//! use quill::tessellation::render;
//! ```
//!
//! # Feature flags
//!
//! serialization of the value types (colors, styles, counts and layouts) using serde can be
//! enabled on each crate using the `serialization` feature flag (disabled by default).
//!
//! # Examples
//!
//! ## Rendering into separate buffers
//!
//! ```
//! use quill::path::{Canvas, Color};
//! use quill::tessellation::{
//!     mesh_size, render, IndexFormat, IndexLayout, MeshDescriptor, VertexLayout,
//! };
//!
//! let mut canvas = Canvas::new();
//!
//! // A thick antialiased curve.
//! canvas.set_stroke_width(4.0).unwrap();
//! canvas.set_penumbra(1.0).unwrap();
//! canvas.set_stroke_color(Color::new(0.9, 0.3, 0.1, 1.0));
//! canvas.move_to(0.0, 100.0).unwrap();
//! canvas.bezier_curve_to(30.0, 0.0, 70.0, 200.0, 100.0, 100.0).unwrap();
//!
//! // A filled circle without outline.
//! canvas.set_stroke_width(0.0).unwrap();
//! canvas.begin_fill();
//! canvas.circle(50.0, 50.0, 20.0).unwrap();
//! canvas.end_fill();
//!
//! let size = mesh_size(&canvas);
//! let mut positions = vec![0u8; size.vertices as usize * 8];
//! let mut colors = vec![0u8; size.vertices as usize * 4];
//! let mut uvs = vec![0u8; size.vertices as usize * 8];
//! let mut indices = vec![0u8; size.indices as usize * 4];
//!
//! let mut mesh = MeshDescriptor::separate(
//!     &mut positions,
//!     &mut colors,
//!     &mut uvs,
//!     VertexLayout::PACKED_SEPARATE,
//!     &mut indices,
//!     IndexLayout::packed(IndexFormat::U32),
//! )
//! .unwrap()
//! .with_tint(Color::new(1.0, 1.0, 1.0, 0.8));
//!
//! render(&canvas, &mut mesh).unwrap();
//! assert_eq!(mesh.vertex_count(), size.vertices);
//! assert_eq!(mesh.index_count(), size.indices);
//!
//! canvas.clear();
//! ```
//!
//! ## Rendering the tessellated geometry
//!
//! quill does not provide any GPU abstraction or rendering backend. The buffers contain
//! `[f32; 2]` positions, `0xAARRGGBB` colors and `[f32; 2]` texture coordinates in native
//! endianness, ready to be uploaded with any graphics API.

pub extern crate quill_tessellation;

pub use quill_tessellation as tessellation;
pub use tessellation::geom;
pub use tessellation::path;

pub use path::math;
