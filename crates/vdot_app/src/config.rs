//! Stage configuration
//!
//! Every layout constant of the glyph row lives in [`StageConfig`]. Values
//! come from a TOML file such as:
//!
//! ```toml
//! width = 1280.0
//! height = 720.0
//! nodes = 5
//! fore_color = "#311B92"
//! ```
//!
//! Missing keys fall back to the defaults below.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use vdot_animation::GlyphStyle;
use vdot_core::{Color, Size};

use crate::error::{Result, VdotError};

/// Most glyphs a row may hold
pub const MAX_NODES: usize = 1024;

/// Most strokes a glyph may have
pub const MAX_LINES: usize = 64;

/// Layout constants for the glyph row
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StageConfig {
    /// Surface width
    pub width: f32,
    /// Surface height
    pub height: f32,
    /// Number of glyphs in the row
    pub nodes: usize,
    /// Strokes per glyph
    pub lines: usize,
    /// Scale increment per tick
    pub scale_gap: f32,
    /// Stroke width is `min(width, height) / stroke_factor`
    pub stroke_factor: f32,
    /// Stroke length is `gap / size_factor`
    pub size_factor: f32,
    /// Full circle radius is `size / r_factor`
    pub r_factor: f32,
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Glyph color, `#RRGGBB`
    pub fore_color: String,
    /// Background color, `#RRGGBB`
    pub back_color: String,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            nodes: 5,
            lines: 2,
            scale_gap: 0.02,
            stroke_factor: 90.0,
            size_factor: 2.9,
            r_factor: 3.0,
            tick_ms: 30,
            fore_color: "#311B92".to_string(),
            back_color: "#BDBDBD".to_string(),
        }
    }
}

impl StageConfig {
    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| VdotError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded stage config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the stage cannot run with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("scale_gap", self.scale_gap),
            ("stroke_factor", self.stroke_factor),
            ("size_factor", self.size_factor),
            ("r_factor", self.r_factor),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(VdotError::InvalidConfig(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if !(1..=MAX_NODES).contains(&self.nodes) {
            return Err(VdotError::InvalidConfig(format!(
                "nodes must be between 1 and {MAX_NODES}, got {}",
                self.nodes
            )));
        }
        if !(1..=MAX_LINES).contains(&self.lines) {
            return Err(VdotError::InvalidConfig(format!(
                "lines must be between 1 and {MAX_LINES}, got {}",
                self.lines
            )));
        }
        if self.tick_ms == 0 {
            return Err(VdotError::InvalidConfig("tick_ms must be at least 1".into()));
        }
        self.fore()?;
        self.back()?;
        Ok(())
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Horizontal distance between glyph centers
    pub fn gap(&self) -> f32 {
        self.width / (self.nodes + 1) as f32
    }

    /// Length of a fully grown stroke
    pub fn glyph_size(&self) -> f32 {
        self.gap() / self.size_factor
    }

    pub fn stroke_width(&self) -> f32 {
        self.size().min_side() / self.stroke_factor
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    pub fn fore(&self) -> Result<Color> {
        parse_color("fore_color", &self.fore_color)
    }

    pub fn back(&self) -> Result<Color> {
        parse_color("back_color", &self.back_color)
    }

    /// Resolve the drawing style for every glyph
    pub fn glyph_style(&self) -> Result<GlyphStyle> {
        Ok(GlyphStyle {
            gap: self.gap(),
            baseline: self.height / 2.0,
            size: self.glyph_size(),
            radius_factor: self.r_factor,
            lines: self.lines,
            stroke_width: self.stroke_width(),
            color: self.fore()?,
        })
    }
}

fn parse_color(name: &str, value: &str) -> Result<Color> {
    Color::parse_hex(value).ok_or_else(|| {
        VdotError::InvalidConfig(format!("{name} must be #RRGGBB, got '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = StageConfig::default();
        config.validate().unwrap();
        assert_eq!(config.tick_period(), Duration::from_millis(30));
        assert_eq!(config.fore().unwrap(), Color::from_hex(0x311B92));
    }

    #[test]
    fn test_derived_layout() {
        let config = StageConfig {
            width: 600.0,
            height: 300.0,
            ..Default::default()
        };
        assert_eq!(config.gap(), 100.0);
        assert!((config.glyph_size() - 100.0 / 2.9).abs() < 1e-4);
        assert!((config.stroke_width() - 300.0 / 90.0).abs() < 1e-4);

        let style = config.glyph_style().unwrap();
        assert_eq!(style.baseline, 150.0);
        assert_eq!(style.lines, 2);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = StageConfig::from_toml_str("width = 1200.0\nnodes = 7\n").unwrap();
        assert_eq!(config.width, 1200.0);
        assert_eq!(config.nodes, 7);
        assert_eq!(config.height, 600.0);
        assert_eq!(config.back_color, "#BDBDBD");
    }

    #[test]
    fn test_toml_round_trip() {
        let config = StageConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(StageConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero_nodes = StageConfig {
            nodes: 0,
            ..Default::default()
        };
        assert!(matches!(
            zero_nodes.validate(),
            Err(VdotError::InvalidConfig(_))
        ));

        let bad_color = StageConfig {
            fore_color: "purple".into(),
            ..Default::default()
        };
        assert!(bad_color.validate().is_err());

        let negative_gap = StageConfig {
            scale_gap: -0.1,
            ..Default::default()
        };
        assert!(negative_gap.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_counts() {
        let huge = StageConfig::from_toml_str("nodes = 9223372036854775807").unwrap();
        assert!(matches!(huge.validate(), Err(VdotError::InvalidConfig(_))));

        let at_limit = StageConfig {
            nodes: MAX_NODES,
            ..Default::default()
        };
        at_limit.validate().unwrap();

        let too_many_lines = StageConfig {
            lines: MAX_LINES + 1,
            ..Default::default()
        };
        assert!(too_many_lines.validate().is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = StageConfig::load(Path::new("/nonexistent/vdot.toml")).unwrap_err();
        assert!(matches!(err, VdotError::ConfigRead { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = StageConfig::from_toml_str("nodes = \"five\"").unwrap_err();
        assert!(matches!(err, VdotError::ConfigParse(_)));
    }
}
