#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::new_without_default)]
#![allow(clippy::too_many_arguments)]

//! Paths, closed shapes and the canvas that collects them.
//!
//! A [`Canvas`] holds a current [`Style`] (the "pen") and four lists of pending primitives:
//! [paths](Path), [rectangles](Rect), [rounded rectangles](RoundedRect) and
//! [ellipses](Ellipse). Every primitive captures the relevant part of the style when it is
//! added, so later style changes never modify existing geometry.
//!
//! The primitives are turned into triangles by the `quill_tessellation` crate.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Examples
//!
//! ```
//! use quill_path::{Canvas, Style};
//!
//! let mut canvas = Canvas::with_style(Style::DEFAULT.with_penumbra(1.0)).unwrap();
//!
//! canvas.move_to(0.0, 0.0).unwrap();
//! canvas.line_to(1.0, 2.0).unwrap();
//! canvas.bezier_curve_to(2.0, 2.0, 3.0, 1.0, 3.0, 0.0).unwrap();
//!
//! canvas.begin_fill();
//! canvas.rounded_rect(10.0, 10.0, 40.0, 20.0, 5.0).unwrap();
//! canvas.end_fill();
//!
//! let path = &canvas.paths()[0];
//! assert_eq!(path.points().len(), 3);
//! assert_eq!(path.penumbra(), 1.0);
//!
//! // Frame done, start over.
//! canvas.clear();
//! assert!(canvas.is_empty());
//! ```

pub use quill_geom as geom;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod allocator;
mod canvas;
mod color;
mod error;
mod list;
mod path;
mod shapes;
mod style;

#[doc(inline)]
pub use crate::allocator::{Allocator, CallbackAllocator, SystemAllocator};
#[doc(inline)]
pub use crate::canvas::Canvas;
#[doc(inline)]
pub use crate::color::Color;
#[doc(inline)]
pub use crate::error::{AllocError, CanvasError, CanvasResult};
#[doc(inline)]
pub use crate::path::{Edge, EdgeKind, Path};
#[doc(inline)]
pub use crate::shapes::{Ellipse, Rect, RoundedRect};
#[doc(inline)]
pub use crate::style::{EdgeStyle, ShapeMode, ShapeStyle, Style};

pub mod math {
    //! f32 version of the quill_geom types used everywhere. Most other quill crates
    //! reexport them.

    pub use crate::geom::{point, size, vector, Box2D, Point, Size, Vector};
}
