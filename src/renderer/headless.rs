//! Headless canvas
//!
//! Records draw calls instead of rasterizing them and measures text with a
//! fixed per-character advance. Used by the native playback host and by tests.

use super::{Canvas, Colour, FontRole, Rect, TextExtent, TextMeasurer};

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Colour),
    FillRect { area: Rect, colour: Colour },
    Text {
        role: FontRole,
        text: String,
        area: Rect,
        tint: Option<Colour>,
    },
}

#[derive(Debug, Clone)]
pub struct HeadlessCanvas {
    /// Horizontal advance of every glyph
    pub glyph_width: u32,
    /// Height of every line of text
    pub line_height: u32,
    /// Fonts this canvas can measure
    pub available_fonts: Vec<FontRole>,
    /// Commands of the frame being drawn
    pub commands: Vec<DrawCommand>,
    /// Commands of the last presented frame
    pub last_frame: Vec<DrawCommand>,
    pub frames_presented: u64,
}

impl HeadlessCanvas {
    pub fn new(glyph_width: u32, line_height: u32) -> Self {
        Self {
            glyph_width,
            line_height,
            available_fonts: vec![FontRole::Athlete, FontRole::Eliminated],
            commands: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
        }
    }

    /// Pretend the font for `role` failed to load
    pub fn without_font(mut self, role: FontRole) -> Self {
        self.available_fonts.retain(|r| *r != role);
        self
    }

    /// Text commands of the last presented frame
    pub fn texts(&self) -> impl Iterator<Item = (&str, Rect, Option<Colour>)> {
        self.last_frame.iter().filter_map(|c| match c {
            DrawCommand::Text {
                text, area, tint, ..
            } => Some((text.as_str(), *area, *tint)),
            _ => None,
        })
    }

    /// Rectangles of the last presented frame
    pub fn rects(&self) -> impl Iterator<Item = (Rect, Colour)> {
        self.last_frame.iter().filter_map(|c| match c {
            DrawCommand::FillRect { area, colour } => Some((*area, *colour)),
            _ => None,
        })
    }
}

impl TextMeasurer for HeadlessCanvas {
    fn measure_text(&self, role: FontRole, text: &str) -> Option<TextExtent> {
        if !self.available_fonts.contains(&role) {
            return None;
        }
        let glyphs = text.chars().count() as u32;
        Some(TextExtent::new(glyphs * self.glyph_width, self.line_height))
    }
}

impl Canvas for HeadlessCanvas {
    fn clear(&mut self, colour: Colour) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(colour));
    }

    fn fill_rect(&mut self, area: Rect, colour: Colour) {
        self.commands.push(DrawCommand::FillRect { area, colour });
    }

    fn draw_text(&mut self, role: FontRole, text: &str, area: Rect, tint: Option<Colour>) {
        self.commands.push(DrawCommand::Text {
            role,
            text: text.to_string(),
            area,
            tint,
        });
    }

    fn present(&mut self) {
        self.last_frame = std::mem::take(&mut self.commands);
        self.frames_presented += 1;
    }
}
