//! Scoreboard configuration
//!
//! One JSON document describes the roster, the layout dimensions, the colour
//! scheme and the fonts. It is parsed once into typed structs; a missing
//! required field or a value of the wrong type fails the whole load.

use serde::{Deserialize, Serialize};

use crate::consts::POINTS_PER_PIXEL;
use crate::error::LoadError;
use crate::renderer::Colour;

/// One athlete as written in the config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AthleteEntry {
    /// Unique display name (also the lookup key between snapshots)
    pub name: String,
    pub colour: Colour,
    /// Score going into this round
    pub current_score: u32,
    /// Points awarded this round (ignored for eliminated athletes)
    #[serde(default)]
    pub points_to_add: i32,
    #[serde(default)]
    pub is_eliminated: bool,
}

/// Layout dimensions, all in pixels except the aspect ratio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dimensions {
    /// Window width / window height
    pub aspect_ratio: f32,
    pub bar_height: u32,
    pub distance_between_bars: u32,
    /// Length of a bar for a score of zero
    pub min_score_bar_length: i32,
    pub sidebar_width: i32,
    pub distance_between_bar_and_score_text: i32,
    pub distance_between_score_text_and_window_right: i32,
    pub distance_between_score_text_and_eliminated_text: i32,
    pub distance_between_name_and_sidebar: i32,
    pub distance_between_ordinal_numbers_and_window_left: i32,
}

/// Colour scheme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Colours {
    pub background: Colour,
    pub sidebar: Colour,
    pub ordinal_text: Colour,
    pub score_text: Colour,
    pub eliminated_text: Colour,
}

/// Font sources, resolved by the host (file path natively, CSS family on the web)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fonts {
    pub athletes: String,
    pub eliminated: String,
}

impl Fonts {
    /// Font size in points for text that fills a bar of `bar_height` pixels
    pub fn point_size(bar_height: u32) -> u32 {
        (bar_height as f32 * POINTS_PER_PIXEL) as u32
    }
}

/// Complete scoreboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScoreboardConfig {
    pub athletes: Vec<AthleteEntry>,
    pub dimensions: Dimensions,
    pub colours: Colours,
    pub fonts: Fonts,
}

impl ScoreboardConfig {
    /// Parse and validate a JSON config document
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        log::info!("Loaded config with {} athletes", config.athletes.len());
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        log::info!("Reading config from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values the layout cannot work with
    pub fn validate(&self) -> Result<(), LoadError> {
        let dims = &self.dimensions;

        if !dims.aspect_ratio.is_finite() || dims.aspect_ratio <= 0.0 {
            return Err(LoadError::Invalid(format!(
                "aspect_ratio must be a positive number, got {}",
                dims.aspect_ratio
            )));
        }
        if dims.bar_height == 0 {
            return Err(LoadError::Invalid("bar_height must be positive".into()));
        }
        if self.athletes.is_empty() {
            return Err(LoadError::Invalid("no athletes configured".into()));
        }
        if let Some(index) = self.athletes.iter().position(|a| a.name.trim().is_empty()) {
            return Err(LoadError::Invalid(format!(
                "athlete #{} has an empty name",
                index + 1
            )));
        }

        Ok(())
    }
}
