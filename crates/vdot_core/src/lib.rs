//! vdot Core
//!
//! Foundational types shared by the vdot crates:
//!
//! - **Geometry**: points, sizes, rectangles and 2D affine transforms
//! - **Color**: RGBA colors with hex parsing
//! - **Draw Context**: the rendering sink trait glyphs draw into, plus a
//!   recording implementation
//!
//! # Example
//!
//! ```rust
//! use vdot_core::{Color, DrawContext, DrawContextExt, Point, RecordingContext, Size};
//!
//! let mut ctx = RecordingContext::new(Size::new(800.0, 600.0));
//! ctx.fill_viewport(Color::from_hex(0xBDBDBD));
//! ctx.translate(400.0, 300.0);
//! ctx.fill_circle(Point::ZERO, 12.0, Color::from_hex(0x311B92));
//! ctx.pop_transform();
//!
//! assert_eq!(ctx.commands().len(), 4);
//! ```

pub mod color;
pub mod draw;
pub mod geometry;

pub use color::Color;
pub use draw::{
    DrawCommand, DrawContext, DrawContextExt, LineCap, RecordingContext, Stroke, Transform,
};
pub use geometry::{Affine2D, Point, Rect, Size};
