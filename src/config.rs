use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::color::ColorScheme;
use crate::renderer::DEFAULT_FILL;
use crate::spiral::DEFAULT_GRANULARITY;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    pub spiral: SpiralConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpiralConfig {
    pub circulation_factor: f64,
    pub granularity: f64,
    /// Columns taken off the radius
    pub inset: f64,
    /// Fixed reference width; None = ask the terminal
    pub width: Option<u16>,
}

impl Default for SpiralConfig {
    fn default() -> Self {
        Self {
            circulation_factor: 3.0,
            granularity: DEFAULT_GRANULARITY,
            inset: 0.0,
            width: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    pub fill: char,
    pub prefix: String,
    pub line_numbers: bool,
    /// Columns of empty space left of the drawing
    pub margin: u16,
    pub color_scheme: Option<ColorScheme>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            fill: DEFAULT_FILL,
            prefix: String::new(),
            line_numbers: false,
            margin: 0,
            color_scheme: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))?;
        Ok(config)
    }

    /// Get the default XDG config path (~/.config/spiral-ascii/config.toml)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("spiral-ascii").join("config.toml"))
    }

    /// Load config from the default XDG path if it exists
    /// Returns None if file doesn't exist, logs warning on parse errors
    pub fn load_from_default_path() -> Option<Self> {
        let path = Self::default_path()?;
        if path.exists() {
            match Self::load(&path) {
                Ok(config) => Some(config),
                Err(e) => {
                    tracing::warn!("{:#}. Using defaults.", e);
                    None
                }
            }
        } else {
            None
        }
    }

    /// Initialize default config file at XDG path, returns the path
    pub fn init_default_config() -> Result<PathBuf> {
        let path = Self::default_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&path, Self::generate_config_template())?;

        Ok(path)
    }

    /// Generate a commented TOML config template
    pub fn generate_config_template() -> String {
        r#"# spiral-ascii configuration
# This file is auto-generated. Edit as needed.

[spiral]
# Number of full revolutions
circulation_factor = 3.0
# Degrees between sampled points (smaller = denser curve)
granularity = 0.2
# Columns taken off the radius
inset = 0.0
# Fixed reference width in columns (omit to use the terminal width)
# width = 80

[render]
# Character drawn at occupied positions
fill = "*"
# Text written at the start of every line
prefix = ""
# Prefix every line with its zero-padded row number
line_numbers = false
# Columns of empty space left of the drawing
margin = 0
# Color scheme: "spectrum", "rainbow", "fire", "ocean", "forest", "purple", "monochrome"
# Omit for plain text
# color_scheme = "spectrum"
"#
        .to_string()
    }

    /// Merge CLI arguments into config (CLI takes priority)
    pub fn merge_args(&mut self, args: &crate::Args) {
        if let Some(factor) = args.circulation {
            self.spiral.circulation_factor = factor;
        }
        if let Some(granularity) = args.granularity {
            self.spiral.granularity = granularity;
        }
        if let Some(inset) = args.inset {
            self.spiral.inset = inset;
        }
        if let Some(width) = args.width {
            self.spiral.width = Some(width);
        }

        if let Some(fill) = args.fill {
            self.render.fill = fill;
        }
        if let Some(ref prefix) = args.prefix {
            self.render.prefix = prefix.clone();
        }
        if args.line_numbers {
            self.render.line_numbers = true;
        }
        if let Some(margin) = args.margin {
            self.render.margin = margin;
        }
        if let Some(scheme) = args.colors {
            self.render.color_scheme = Some(scheme);
        }
    }
}
