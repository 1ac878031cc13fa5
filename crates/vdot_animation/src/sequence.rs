//! Sequence controller
//!
//! Owns the fixed row of glyph nodes and decides which one animates next.
//! The active node finishes its own 0↔1 toggle before control passes to its
//! neighbor. At either end of the row there is no neighbor: the traversal
//! direction reverses and the same node stays active, so it toggles back
//! before the walk heads into the row again.

use vdot_core::DrawContext;

use crate::glyph::{Direction, GlyphNode, GlyphStyle, Neighbor};
use crate::progress::{Progress, ProgressState, DEFAULT_SCALE_GAP};

/// Row of glyph nodes plus the traversal cursor
#[derive(Clone, Debug)]
pub struct SequenceController {
    nodes: Vec<GlyphNode>,
    current: usize,
    direction: Direction,
}

impl SequenceController {
    /// Create a row of `count` nodes (at least one) with the default gap
    pub fn new(count: usize) -> Self {
        Self::with_gap(count, DEFAULT_SCALE_GAP)
    }

    /// Create a row of `count` nodes (at least one) advancing `gap` per tick
    pub fn with_gap(count: usize, gap: f32) -> Self {
        let nodes = (0..count.max(1))
            .map(|index| GlyphNode::new(index, ProgressState::with_gap(gap)))
            .collect();
        Self {
            nodes,
            current: 0,
            direction: Direction::Forward,
        }
    }

    pub fn nodes(&self) -> &[GlyphNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Never true; a sequence always holds at least one node
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Index of the node that animates on the next start
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn current_node(&self) -> &GlyphNode {
        &self.nodes[self.current]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_animating(&self) -> bool {
        self.current_node().state().is_animating()
    }

    /// Resting value of every node, head first
    pub fn settled_values(&self) -> Vec<f32> {
        self.nodes.iter().map(|n| n.state().settled()).collect()
    }

    /// Draw every node, head to tail
    pub fn draw(&self, ctx: &mut dyn DrawContext, style: &GlyphStyle) {
        for node in &self.nodes {
            node.draw(ctx, style);
        }
    }

    /// Start toggling the current node; `false` if it is already moving
    pub fn start_updating(&mut self) -> bool {
        let started = self.nodes[self.current].start_updating();
        if started {
            tracing::debug!(
                "SequenceController: node {} toggling (direction {})",
                self.current,
                self.current_node().state().direction()
            );
        }
        started
    }

    /// Advance the current node one tick
    ///
    /// When its toggle completes, the cursor moves to the neighbor in the
    /// traversal direction, or, at an end of the row, the direction reverses
    /// and the cursor stays put.
    pub fn update(&mut self) -> Progress {
        let progress = self.nodes[self.current].update();
        if progress.is_completed() {
            let finished = self.current;
            match self.nodes[finished].neighbor(self.direction, self.nodes.len()) {
                Neighbor::Step(next) => self.current = next,
                Neighbor::Boundary => {
                    self.direction = self.direction.reversed();
                    tracing::debug!(
                        "SequenceController: boundary at node {}, now {:?}",
                        finished,
                        self.direction
                    );
                }
            }
            tracing::debug!(
                "SequenceController: node {} settled at {}, current -> {}",
                finished,
                self.nodes[finished].state().settled(),
                self.current
            );
        }
        progress
    }
}
