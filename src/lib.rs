//! Athlete Scoreboard - animated standings board
//!
//! Core modules:
//! - `sim`: Deterministic ranking and animation state (snapshots, phases, tick)
//! - `renderer`: Drawing capabilities plus the WebGPU bar renderer
//! - `settings`: Typed scoreboard configuration loaded from JSON
//! - `scoreboard`: Host-facing facade tying the pieces together

pub mod error;
pub mod ordinal;
pub mod renderer;
pub mod scoreboard;
pub mod settings;
pub mod sim;

pub use error::{AssetError, LoadError};
pub use ordinal::ordinal;
pub use scoreboard::Scoreboard;
pub use settings::ScoreboardConfig;

/// Scoreboard timing and text constants
pub mod consts {
    /// Seconds for one full before -> after transition (interpolation 0 -> 1)
    pub const SECONDS_PER_FULL_TRANSITION: f32 = 7.5;

    /// Label drawn next to eliminated athletes
    pub const ELIMINATED_LABEL: &str = "ELIMINATED";

    /// Default config location for native hosts (relative to the working dir)
    pub const DEFAULT_CONFIG_PATH: &str = "data/athletes.json";

    /// Points per pixel factor used to derive a font size from the bar height
    pub const POINTS_PER_PIXEL: f32 = 72.0 / 96.0;
}

/// Linear interpolation that lands exactly on both endpoints.
///
/// `t` is clamped to [0, 1] so a stalled frame can never overshoot `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    if t >= 1.0 {
        b
    } else if t <= 0.0 {
        a
    } else {
        a + (b - a) * t
    }
}
