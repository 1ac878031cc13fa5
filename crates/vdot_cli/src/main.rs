//! vdot CLI
//!
//! Drive the glyph row headlessly: simulate taps, run the tick loop and
//! export frames.

use std::cell::Cell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{debug, info, trace};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use vdot_app::{Stage, StageConfig, SvgCanvas};
use vdot_core::RecordingContext;

#[derive(Parser)]
#[command(name = "vdot")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Animated glyph row driven by taps", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Stage config file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate taps and animate them in real time
    Run {
        /// Number of taps to simulate
        #[arg(short, long, default_value = "5")]
        taps: usize,

        /// Write the final frame as SVG
        #[arg(long)]
        svg_out: Option<PathBuf>,
    },

    /// Render the frame after a number of completed toggles, without waiting
    Frame {
        /// Number of taps to apply before rendering
        #[arg(short, long, default_value = "0")]
        taps: usize,

        /// Output SVG path
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Run { taps, svg_out } => cmd_run(config, taps, svg_out.as_deref()),
        Commands::Frame { taps, out } => cmd_frame(config, taps, &out),
        Commands::Config => cmd_config(&config),
    }
}

fn load_config(path: Option<&Path>) -> Result<StageConfig> {
    match path {
        Some(path) => StageConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(StageConfig::default()),
    }
}

fn cmd_run(config: StageConfig, taps: usize, svg_out: Option<&Path>) -> Result<()> {
    let mut stage = Stage::new(config).context("Invalid stage config")?;
    let viewport = stage.viewport();

    let mut ctx = RecordingContext::new(viewport);
    stage.render(&mut ctx);
    info!(
        "Stage ready: {} glyphs, {} draw commands per frame",
        stage.sequence().len(),
        ctx.commands().len()
    );

    for tap in 1..=taps {
        let node = stage.sequence().current();
        let frames = Rc::new(Cell::new(0usize));
        let commands = Rc::new(Cell::new(0usize));

        let frame_counter = Rc::clone(&frames);
        let command_counter = Rc::clone(&commands);
        let started = stage.handle_tap(move |frame| {
            let mut ctx = RecordingContext::new(viewport);
            frame.render(&mut ctx);
            frame_counter.set(frame_counter.get() + 1);
            command_counter.set(command_counter.get() + ctx.commands().len());
            trace!(
                "Frame {}: {} draw commands",
                frame_counter.get(),
                ctx.commands().len()
            );
        });
        if !started {
            debug!("Tap {} ignored", tap);
            continue;
        }

        let ticks = stage.run_until_idle();
        info!(
            "Tap {}: node {} settled at {} after {} ticks ({} frames, {} draw commands), next node {} going {:?}",
            tap,
            node,
            stage.sequence().nodes()[node].state().settled(),
            ticks,
            frames.get(),
            commands.get(),
            stage.sequence().current(),
            stage.sequence().direction()
        );
    }

    if let Some(path) = svg_out {
        export_svg(&stage, path)?;
    }
    Ok(())
}

fn cmd_frame(config: StageConfig, taps: usize, out: &Path) -> Result<()> {
    let mut stage = Stage::new(config).context("Invalid stage config")?;
    for _ in 0..taps {
        if stage.handle_tap(|_| {}) {
            stage.fast_forward();
        }
    }
    info!(
        "Applied {} taps, settled values {:?}",
        taps,
        stage.sequence().settled_values()
    );
    export_svg(&stage, out)
}

fn cmd_config(config: &StageConfig) -> Result<()> {
    config.validate().context("Invalid stage config")?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

fn export_svg(stage: &Stage, path: &Path) -> Result<()> {
    let mut canvas = SvgCanvas::new(stage.viewport());
    stage.render(&mut canvas);
    canvas
        .write_to(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
