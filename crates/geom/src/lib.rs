#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]

//! Curve math shared by the quill tessellators.
//!
//! This crate is reexported in [quill](https://docs.rs/quill/).
//!
//! # Overview
//!
//! The tessellators only need a handful of closed-form tools:
//!
//! - [`bezier_point`] evaluates a point on a linear, quadratic or cubic Bézier segment using
//!   the Bernstein (binomial) expansion. There is no adaptive error control, the caller picks
//!   the parameter values.
//! - [`line_intersect`] intersects the infinite lines supporting two segments. Miter joins
//!   are built out of it.
//! - [`utils`] contains the perpendicular and normalization helpers used to offset strokes.
//!
//! Points and vectors are the [euclid](https://docs.rs/euclid/) types with `f32` components.

// Reexport dependencies.
pub use euclid;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

mod bezier;
mod line;
pub mod utils;

#[doc(inline)]
pub use crate::bezier::{bezier_point, binomial, factorial};
#[doc(inline)]
pub use crate::line::{line_intersect, LineEquation, LineSegment, PARALLEL_EPSILON};

/// Alias for `euclid::default::Point2D<f32>`.
pub type Point = euclid::default::Point2D<f32>;

/// Alias for `euclid::default::Vector2D<f32>`.
pub type Vector = euclid::default::Vector2D<f32>;

/// Alias for `euclid::default::Size2D<f32>`.
pub type Size = euclid::default::Size2D<f32>;

/// Alias for `euclid::default::Box2D<f32>`.
pub type Box2D = euclid::default::Box2D<f32>;

/// Shorthand for `Vector::new(x, y)`.
#[inline]
pub fn vector(x: f32, y: f32) -> Vector {
    Vector::new(x, y)
}

/// Shorthand for `Point::new(x, y)`.
#[inline]
pub fn point(x: f32, y: f32) -> Point {
    Point::new(x, y)
}

/// Shorthand for `Size::new(w, h)`.
#[inline]
pub fn size(w: f32, h: f32) -> Size {
    Size::new(w, h)
}
