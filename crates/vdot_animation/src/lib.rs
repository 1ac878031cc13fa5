//! vdot Animation System
//!
//! The state machine behind the glyph row.
//!
//! # Features
//!
//! - **Easing**: per-segment shares of a sine envelope
//! - **Progress**: per-glyph toggle between resting values 0 and 1
//! - **Loop Driver**: fixed-period tick loop, at most one callback installed
//! - **Glyph Nodes**: neighbor lookup and glyph drawing through a `DrawContext`
//! - **Sequence Controller**: one-at-a-time traversal with boundary bounce

pub mod driver;
pub mod easing;
pub mod glyph;
pub mod progress;
pub mod sequence;

pub use driver::{LoopControl, LoopDriver, TickCallback, DEFAULT_TICK_PERIOD};
pub use easing::{clamped_remainder, envelope, segment_share};
pub use glyph::{Direction, GlyphNode, GlyphStyle, Neighbor};
pub use progress::{Progress, ProgressState, DEFAULT_SCALE_GAP};
pub use sequence::SequenceController;
