//! Glyph nodes
//!
//! Each node of the sequence draws one glyph: a fan of strokes from the
//! node's origin converging into a filled circle. Strokes grow and shrink on
//! a sine envelope while the circle tracks the node's scale directly.

use vdot_core::{Color, DrawContext, LineCap, Point, Stroke, Transform};

use crate::easing::{envelope, segment_share};
use crate::progress::{Progress, ProgressState};

/// Direction the sequence advances in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    /// 1 for forward, -1 for backward
    pub fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

/// Result of looking up a node's neighbor
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Neighbor {
    /// Index of the adjacent node
    Step(usize),
    /// No node on that side; this node is an endpoint
    Boundary,
}

/// Resolved layout and paint for drawing glyphs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GlyphStyle {
    /// Horizontal distance between glyph centers
    pub gap: f32,
    /// Vertical position of every glyph center
    pub baseline: f32,
    /// Length of a fully grown stroke
    pub size: f32,
    /// Circle radius at scale 1 is `size / radius_factor`
    pub radius_factor: f32,
    /// Number of strokes per glyph
    pub lines: usize,
    pub stroke_width: f32,
    pub color: Color,
}

impl GlyphStyle {
    pub fn stroke(&self) -> Stroke {
        Stroke::new(self.stroke_width).with_cap(LineCap::Round)
    }

    /// Center of the glyph at `index`
    pub fn origin(&self, index: usize) -> Point {
        Point::new(self.gap * (index + 1) as f32, self.baseline)
    }
}

/// One element of the glyph sequence
#[derive(Clone, Debug)]
pub struct GlyphNode {
    index: usize,
    state: ProgressState,
}

impl GlyphNode {
    pub fn new(index: usize, state: ProgressState) -> Self {
        Self { index, state }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> &ProgressState {
        &self.state
    }

    pub fn update(&mut self) -> Progress {
        self.state.update()
    }

    pub fn start_updating(&mut self) -> bool {
        self.state.start_updating()
    }

    /// Neighbor in `direction` within a sequence of `len` nodes
    pub fn neighbor(&self, direction: Direction, len: usize) -> Neighbor {
        match direction {
            Direction::Backward if self.index > 0 => Neighbor::Step(self.index - 1),
            Direction::Forward if self.index + 1 < len => Neighbor::Step(self.index + 1),
            _ => Neighbor::Boundary,
        }
    }

    /// Draw this node's glyph at its slot
    pub fn draw(&self, ctx: &mut dyn DrawContext, style: &GlyphStyle) {
        let scale = self.state.scale();
        let origin = style.origin(self.index);
        let stroke = style.stroke();
        let reach = envelope(scale);

        ctx.push_transform(Transform::translate(origin.x, origin.y));
        for i in 0..style.lines {
            let share = segment_share(reach, i, style.lines);
            let side = 1.0 - 2.0 * i as f32;
            let tip = Point::new(style.size * share * side, -style.size * share);
            ctx.stroke_line(Point::ZERO, tip, &stroke, style.color);
        }
        ctx.fill_circle(
            Point::ZERO,
            (style.size / style.radius_factor) * scale,
            style.color,
        );
        ctx.pop_transform();

        tracing::trace!("GlyphNode {}: drawn at scale {:.3}", self.index, scale);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vdot_core::{DrawCommand, RecordingContext, Size};

    fn style() -> GlyphStyle {
        GlyphStyle {
            gap: 100.0,
            baseline: 50.0,
            size: 30.0,
            radius_factor: 3.0,
            lines: 2,
            stroke_width: 4.0,
            color: Color::BLACK,
        }
    }

    #[test]
    fn test_neighbor_lookup() {
        let state = ProgressState::new();
        let first = GlyphNode::new(0, state);
        let middle = GlyphNode::new(2, state);
        let last = GlyphNode::new(4, state);
        assert_eq!(middle.index(), 2);

        assert_eq!(first.neighbor(Direction::Backward, 5), Neighbor::Boundary);
        assert_eq!(first.neighbor(Direction::Forward, 5), Neighbor::Step(1));
        assert_eq!(middle.neighbor(Direction::Backward, 5), Neighbor::Step(1));
        assert_eq!(middle.neighbor(Direction::Forward, 5), Neighbor::Step(3));
        assert_eq!(last.neighbor(Direction::Forward, 5), Neighbor::Boundary);
        assert_eq!(last.neighbor(Direction::Backward, 5), Neighbor::Step(3));

        let only = GlyphNode::new(0, state);
        assert_eq!(only.neighbor(Direction::Forward, 1), Neighbor::Boundary);
        assert_eq!(only.neighbor(Direction::Backward, 1), Neighbor::Boundary);
    }

    #[test]
    fn test_direction_reversal() {
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
        assert_eq!(Direction::Backward.reversed().sign(), 1);
        assert_eq!(Direction::default().sign(), 1);
    }

    #[test]
    fn test_draw_at_rest_collapses_glyph() {
        let node = GlyphNode::new(1, ProgressState::new());
        let mut ctx = RecordingContext::new(Size::new(600.0, 100.0));
        node.draw(&mut ctx, &style());

        let commands = ctx.commands();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[0],
            DrawCommand::PushTransform(Transform::translate(200.0, 50.0))
        );
        for command in &commands[1..3] {
            match command {
                DrawCommand::StrokeLine { from, to, stroke, .. } => {
                    assert_eq!(*from, Point::ZERO);
                    assert_eq!(*to, Point::ZERO);
                    assert_eq!(stroke.cap, LineCap::Round);
                }
                other => panic!("expected stroke, got {other:?}"),
            }
        }
        assert!(matches!(
            commands[3],
            DrawCommand::FillCircle { radius, .. } if radius == 0.0
        ));
        assert_eq!(commands[4], DrawCommand::PopTransform);
    }

    #[test]
    fn test_draw_mid_toggle_extends_strokes() {
        let mut state = ProgressState::with_gap(0.25);
        state.start_updating();
        state.update();
        state.update();
        let node = GlyphNode::new(0, state);

        let mut ctx = RecordingContext::new(Size::new(600.0, 100.0));
        node.draw(&mut ctx, &style());

        // scale 0.5: envelope is 1, both strokes fully grown, circle at half radius
        let tips: Vec<Point> = ctx
            .commands()
            .iter()
            .filter_map(|c| match c {
                DrawCommand::StrokeLine { to, .. } => Some(*to),
                _ => None,
            })
            .collect();
        assert_eq!(tips.len(), 2);
        assert!((tips[0].x - 30.0).abs() < 1e-3 && (tips[0].y + 30.0).abs() < 1e-3);
        assert!((tips[1].x + 30.0).abs() < 1e-3 && (tips[1].y + 30.0).abs() < 1e-3);

        let radius = ctx.commands().iter().find_map(|c| match c {
            DrawCommand::FillCircle { radius, .. } => Some(*radius),
            _ => None,
        });
        assert_eq!(radius, Some(5.0));
    }
}
