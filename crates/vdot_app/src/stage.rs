//! Stage - render coordination
//!
//! The stage ties the glyph sequence to the tick loop. A tap starts the
//! current glyph's toggle and the loop; every tick redraws and advances the
//! sequence; the tick that completes the toggle redraws once more and stops
//! the loop. Taps landing while a toggle is in flight are ignored.
//!
//! ```
//! use std::time::Duration;
//! use vdot_app::{Stage, StageConfig};
//!
//! let mut stage = Stage::new(StageConfig::default()).unwrap();
//! assert!(stage.handle_tap(|_frame| {}));
//! while stage.is_animating() {
//!     stage.advance(Duration::from_millis(30));
//! }
//! assert_eq!(stage.sequence().current(), 1);
//! ```

use std::time::Duration;

use vdot_animation::{GlyphStyle, LoopControl, LoopDriver, Progress, SequenceController};
use vdot_core::{Color, DrawContext, DrawContextExt, Size};

use crate::config::StageConfig;
use crate::error::Result;

/// Everything needed to paint one frame
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    pub sequence: &'a SequenceController,
    pub style: &'a GlyphStyle,
    pub background: Color,
}

impl Frame<'_> {
    /// Paint the background, then every glyph
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        ctx.fill_viewport(self.background);
        self.sequence.draw(ctx, self.style);
    }
}

/// Glyph row plus the loop that animates it
pub struct Stage {
    config: StageConfig,
    style: GlyphStyle,
    background: Color,
    sequence: SequenceController,
    driver: LoopDriver<SequenceController>,
}

impl Stage {
    /// Validate `config` and build the row at rest
    pub fn new(config: StageConfig) -> Result<Self> {
        config.validate()?;
        let style = config.glyph_style()?;
        let background = config.back()?;
        let sequence = SequenceController::with_gap(config.nodes, config.scale_gap);
        let driver = LoopDriver::new(config.tick_period());

        tracing::debug!(
            "Stage: {} glyphs on {}x{}, tick {:?}",
            config.nodes,
            config.width,
            config.height,
            config.tick_period()
        );

        Ok(Self {
            config,
            style,
            background,
            sequence,
            driver,
        })
    }

    pub fn config(&self) -> &StageConfig {
        &self.config
    }

    pub fn viewport(&self) -> Size {
        self.config.size()
    }

    pub fn style(&self) -> &GlyphStyle {
        &self.style
    }

    pub fn sequence(&self) -> &SequenceController {
        &self.sequence
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            sequence: &self.sequence,
            style: &self.style,
            background: self.background,
        }
    }

    /// True while the tick loop is running
    pub fn is_animating(&self) -> bool {
        self.driver.is_running()
    }

    /// Paint the current state
    pub fn render(&self, ctx: &mut dyn DrawContext) {
        self.frame().render(ctx);
    }

    /// React to a tap
    ///
    /// Starts the current glyph's toggle and the tick loop. `redraw` is
    /// called on every tick and once more when the toggle completes. Returns
    /// `false` (and drops `redraw`) if a toggle is already in flight.
    pub fn handle_tap<R>(&mut self, mut redraw: R) -> bool
    where
        R: FnMut(&Frame<'_>) + 'static,
    {
        if !self.sequence.start_updating() {
            tracing::debug!(
                "Stage: tap ignored, node {} still animating",
                self.sequence.current()
            );
            return false;
        }

        let style = self.style;
        let background = self.background;
        self.driver.start(move |sequence: &mut SequenceController| {
            tick(sequence, &style, background, &mut redraw)
        });
        true
    }

    /// Feed `elapsed` time to the tick loop; returns ticks fired
    pub fn advance(&mut self, elapsed: Duration) -> usize {
        self.driver.advance(elapsed, &mut self.sequence)
    }

    /// Tick without sleeping until the current toggle completes
    pub fn fast_forward(&mut self) -> usize {
        let period = self.driver.period();
        let mut fired = 0;
        while self.driver.is_running() {
            fired += self.driver.advance(period, &mut self.sequence);
        }
        fired
    }

    /// Tick in real time until the current toggle completes
    pub fn run_until_idle(&mut self) -> usize {
        self.driver.run_blocking(&mut self.sequence)
    }
}

/// One loop tick: redraw, advance the sequence, redraw again on completion
///
/// A tick that finds no toggle in flight stops the loop without touching
/// the sequence.
pub(crate) fn tick<R>(
    sequence: &mut SequenceController,
    style: &GlyphStyle,
    background: Color,
    redraw: &mut R,
) -> LoopControl
where
    R: FnMut(&Frame<'_>),
{
    let mut paint = |sequence: &SequenceController| {
        redraw(&Frame {
            sequence,
            style,
            background,
        })
    };

    paint(&*sequence);
    match sequence.update() {
        Progress::Running => LoopControl::Continue,
        Progress::Completed => {
            paint(&*sequence);
            LoopControl::Break
        }
        Progress::Idle => {
            tracing::warn!("Stage: tick with no toggle in flight, stopping loop");
            LoopControl::Break
        }
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("config", &self.config)
            .field("current", &self.sequence.current())
            .field("direction", &self.sequence.direction())
            .field("driver", &self.driver)
            .finish()
    }
}
