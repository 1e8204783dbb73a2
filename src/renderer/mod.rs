//! Rendering module
//!
//! The scoreboard only talks to the capability traits defined here
//! (`TextMeasurer`, `Canvas`). Concrete backends:
//! - `pipeline`: WebGPU bar renderer used by the browser host
//! - `headless`: in-memory recorder used by the native host and tests

pub mod headless;
pub mod pipeline;
pub mod shapes;
pub mod text_cache;
pub mod vertex;

use serde::{Deserialize, Serialize};

pub use headless::{DrawCommand, HeadlessCanvas};
pub use pipeline::RenderState;
pub use text_cache::TextCache;

/// An RGBA colour with 8-bit channels.
///
/// Deserializes from `[r, g, b]` (opaque) or `[r, g, b, a]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ColourRepr", into = "[u8; 4]")]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0, 0, 0);
    pub const WHITE: Colour = Colour::rgb(0xFF, 0xFF, 0xFF);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Normalized channels for GPU vertex colours
    pub fn to_f32_array(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// CSS `rgba(...)` string for 2D canvas styles
    pub fn to_css(self) -> String {
        format!(
            "rgba({}, {}, {}, {:.3})",
            self.r,
            self.g,
            self.b,
            self.a as f32 / 255.0
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ColourRepr {
    Rgb([u8; 3]),
    Rgba([u8; 4]),
}

impl From<ColourRepr> for Colour {
    fn from(repr: ColourRepr) -> Self {
        match repr {
            ColourRepr::Rgb([r, g, b]) => Colour::rgb(r, g, b),
            ColourRepr::Rgba([r, g, b, a]) => Colour::rgba(r, g, b, a),
        }
    }
}

impl From<Colour> for [u8; 4] {
    fn from(c: Colour) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}

/// Axis-aligned pixel rectangle (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive)
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.w)
    }
}

/// Which font a label is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    /// Names, scores and ordinal numbers
    Athlete,
    /// The "ELIMINATED" label
    Eliminated,
}

/// Rendered size of a piece of text, in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextExtent {
    pub width: u32,
    pub height: u32,
}

impl TextExtent {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Measures text as the host will draw it.
pub trait TextMeasurer {
    /// `None` when the font for `role` is not available.
    fn measure_text(&self, role: FontRole, text: &str) -> Option<TextExtent>;
}

/// Drawing surface the scoreboard renders into.
pub trait Canvas: TextMeasurer {
    /// Fill the whole surface
    fn clear(&mut self, colour: Colour);

    fn fill_rect(&mut self, area: Rect, colour: Colour);

    /// Draw `text` stretched into `area`. `tint` carries colour and alpha;
    /// `None` draws untinted and opaque.
    fn draw_text(&mut self, role: FontRole, text: &str, area: Rect, tint: Option<Colour>);

    /// Finish the frame
    fn present(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colour_from_rgb_is_opaque() {
        let c: Colour = serde_json::from_str("[10, 20, 30]").unwrap();
        assert_eq!(c, Colour::rgba(10, 20, 30, 255));
    }

    #[test]
    fn test_colour_from_rgba() {
        let c: Colour = serde_json::from_str("[10, 20, 30, 40]").unwrap();
        assert_eq!(c.a, 40);
        assert_eq!(serde_json::to_string(&c).unwrap(), "[10,20,30,40]");
    }

    #[test]
    fn test_colour_rejects_bad_arity() {
        assert!(serde_json::from_str::<Colour>("[1, 2]").is_err());
        assert!(serde_json::from_str::<Colour>("[1, 2, 300]").is_err());
    }

    #[test]
    fn test_colour_css() {
        assert_eq!(Colour::rgb(255, 0, 0).to_css(), "rgba(255, 0, 0, 1.000)");
        assert_eq!(Colour::WHITE.with_alpha(0).to_css(), "rgba(255, 255, 255, 0.000)");
    }
}
