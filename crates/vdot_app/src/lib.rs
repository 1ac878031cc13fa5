//! vdot Application
//!
//! Runs the glyph row: configuration, the tap-driven render coordinator and
//! frame export.
//!
//! # Example
//!
//! ```ignore
//! use vdot_app::{Stage, StageConfig, SvgCanvas};
//!
//! let mut stage = Stage::new(StageConfig::default())?;
//! stage.handle_tap(|_frame| {});
//! stage.run_until_idle();
//!
//! let mut canvas = SvgCanvas::new(stage.viewport());
//! stage.render(&mut canvas);
//! canvas.write_to("frame.svg".as_ref())?;
//! ```

pub mod config;
pub mod error;
pub mod stage;
pub mod svg;


pub use config::StageConfig;
pub use error::{Result, VdotError};
pub use stage::{Frame, Stage};
pub use svg::SvgCanvas;
