//! Draw context - the rendering sink
//!
//! Glyph code never talks to a concrete canvas. It draws through the
//! [`DrawContext`] trait, which any backend can implement: the
//! [`RecordingContext`] here records commands for inspection or replay, other
//! crates provide sinks that produce files or pixels.

use smallvec::{smallvec, SmallVec};

use crate::color::Color;
use crate::geometry::{Affine2D, Point, Rect, Size};

// ─────────────────────────────────────────────────────────────────────────────
// Transform Types
// ─────────────────────────────────────────────────────────────────────────────

/// Local coordinate transform pushed onto a draw context
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Transform(Affine2D);

impl Transform {
    pub fn identity() -> Self {
        Transform(Affine2D::IDENTITY)
    }

    /// Create a 2D translation
    pub fn translate(x: f32, y: f32) -> Self {
        Transform(Affine2D::translation(x, y))
    }

    pub fn as_affine(&self) -> &Affine2D {
        &self.0
    }

    /// Compose: the result applies `other` first, then `self`
    pub fn then(&self, other: &Transform) -> Transform {
        Transform(self.0.then(&other.0))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Stroke Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Line cap style
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineCap {
    /// Flat cap at the endpoint
    #[default]
    Butt,
    /// Rounded cap extending past the endpoint
    Round,
    /// Square cap extending past the endpoint
    Square,
}

impl LineCap {
    /// Name used by SVG and HTML canvas
    pub fn as_str(&self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
            LineCap::Square => "square",
        }
    }
}

/// Stroke style configuration
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    /// Line width
    pub width: f32,
    /// Line cap style
    pub cap: LineCap,
}

impl Default for Stroke {
    fn default() -> Self {
        Self {
            width: 1.0,
            cap: LineCap::Butt,
        }
    }
}

impl Stroke {
    /// Create a new stroke with the given width
    pub fn new(width: f32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    /// Set line cap style
    pub fn with_cap(mut self, cap: LineCap) -> Self {
        self.cap = cap;
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Draw Context Trait
// ─────────────────────────────────────────────────────────────────────────────

/// The rendering sink
///
/// Coordinates passed to the drawing methods are local: they are mapped
/// through every transform currently pushed on the context. Transforms are
/// the save/restore mechanism, every `push_transform` is paired with a
/// `pop_transform`.
pub trait DrawContext {
    /// Size of the drawing surface
    fn viewport(&self) -> Size;

    /// Push a local transform (composed with the current one)
    fn push_transform(&mut self, transform: Transform);

    /// Restore the transform that was current before the last push
    fn pop_transform(&mut self);

    /// The composed transform currently in effect
    fn current_transform(&self) -> Transform;

    /// Fill a rectangle
    fn fill_rect(&mut self, rect: Rect, brush: Color);

    /// Stroke a straight line between two points
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Color);

    /// Fill a circle
    fn fill_circle(&mut self, center: Point, radius: f32, brush: Color);
}

/// Convenience methods layered on top of [`DrawContext`]
pub trait DrawContextExt: DrawContext {
    /// Push a translation transform
    fn translate(&mut self, x: f32, y: f32) {
        self.push_transform(Transform::translate(x, y));
    }

    /// Fill the whole surface, ignoring local transforms' extent
    fn fill_viewport(&mut self, brush: Color) {
        let rect = self.viewport().to_rect();
        self.fill_rect(rect, brush);
    }

    /// Run `f` with `transform` pushed, popping it afterwards
    fn with_transform<F>(&mut self, transform: Transform, f: F)
    where
        F: FnOnce(&mut Self),
        Self: Sized,
    {
        self.push_transform(transform);
        f(self);
        self.pop_transform();
    }
}

impl<T: DrawContext + ?Sized> DrawContextExt for T {}

// ─────────────────────────────────────────────────────────────────────────────
// Recording Draw Context
// ─────────────────────────────────────────────────────────────────────────────

/// A draw command that can be recorded and replayed
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    // State
    PushTransform(Transform),
    PopTransform,

    // 2D Drawing
    FillRect {
        rect: Rect,
        brush: Color,
    },
    StrokeLine {
        from: Point,
        to: Point,
        stroke: Stroke,
        brush: Color,
    },
    FillCircle {
        center: Point,
        radius: f32,
        brush: Color,
    },
}

/// A draw context that records commands for later execution
#[derive(Debug)]
pub struct RecordingContext {
    commands: Vec<DrawCommand>,
    transform_stack: SmallVec<[Transform; 8]>,
    viewport: Size,
}

impl RecordingContext {
    /// Create a new recording context
    pub fn new(viewport: Size) -> Self {
        Self {
            commands: Vec::new(),
            transform_stack: smallvec![Transform::identity()],
            viewport,
        }
    }

    /// Get the recorded commands
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded commands
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Replay the recorded commands into another context
    pub fn replay(&self, target: &mut dyn DrawContext) {
        for command in &self.commands {
            match command {
                DrawCommand::PushTransform(t) => target.push_transform(*t),
                DrawCommand::PopTransform => target.pop_transform(),
                DrawCommand::FillRect { rect, brush } => target.fill_rect(*rect, *brush),
                DrawCommand::StrokeLine {
                    from,
                    to,
                    stroke,
                    brush,
                } => target.stroke_line(*from, *to, stroke, *brush),
                DrawCommand::FillCircle {
                    center,
                    radius,
                    brush,
                } => target.fill_circle(*center, *radius, *brush),
            }
        }
    }
}

impl Default for RecordingContext {
    fn default() -> Self {
        Self::new(Size::ZERO)
    }
}

impl DrawContext for RecordingContext {
    fn viewport(&self) -> Size {
        self.viewport
    }

    fn push_transform(&mut self, transform: Transform) {
        self.commands.push(DrawCommand::PushTransform(transform));
        let composed = self.current_transform().then(&transform);
        self.transform_stack.push(composed);
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
        if self.transform_stack.len() > 1 {
            self.transform_stack.pop();
        } else {
            tracing::warn!("RecordingContext: pop_transform without matching push");
        }
    }

    fn current_transform(&self) -> Transform {
        self.transform_stack.last().copied().unwrap_or_default()
    }

    fn fill_rect(&mut self, rect: Rect, brush: Color) {
        self.commands.push(DrawCommand::FillRect { rect, brush });
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &Stroke, brush: Color) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            stroke: *stroke,
            brush,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f32, brush: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            brush,
        });
    }
}
