//! Bar layout and score scaling
//!
//! Rank rows are stacked top to bottom:
//! `offset = rank_index * (bar_height + distance_between_bars) + distance_between_bars`.
//! Bar length is `current_score * pixels_per_point + min_score_bar_length`, where
//! pixels per point spreads the widest bar across the pixels left over once the
//! sidebar, margins and the widest score label are accounted for.

use crate::renderer::TextExtent;
use crate::settings::Dimensions;

/// Vertical stacking of rank rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowLayout {
    pub bar_height: u32,
    pub distance_between_bars: u32,
}

impl RowLayout {
    pub fn new(dims: &Dimensions) -> Self {
        Self {
            bar_height: dims.bar_height,
            distance_between_bars: dims.distance_between_bars,
        }
    }

    /// Pixel offset of the row at 0-based `rank_index`
    pub fn offset_for_rank(&self, rank_index: usize) -> i32 {
        let stride = (self.bar_height + self.distance_between_bars) as i64;
        (rank_index as i64 * stride + self.distance_between_bars as i64) as i32
    }

    /// Window height needed to show `rows` bars
    pub fn window_height(&self, rows: usize) -> f32 {
        self.offset_for_rank(rows) as f32
    }
}

/// Width a label gets when its glyphs are scaled to fill a bar's height
pub fn proportional_width(extent: TextExtent, bar_height: u32) -> i32 {
    if extent.height == 0 {
        return 0;
    }
    let ratio = extent.height as f32 / bar_height as f32;
    (extent.width as f32 / ratio) as i32
}

/// Horizontal pixels available to the longest bar (beyond its minimum length)
pub fn available_bar_pixels(dims: &Dimensions, window_width: i32, max_score_text_width: i32) -> i32 {
    let available = [
        dims.sidebar_width,
        max_score_text_width,
        dims.min_score_bar_length,
        dims.distance_between_bar_and_score_text,
        dims.distance_between_score_text_and_window_right,
    ]
    .into_iter()
    .fold(window_width, i32::saturating_sub);

    if available < 0 {
        log::warn!(
            "Window too narrow for bars ({available}px available), bars will show at minimum length"
        );
        return 0;
    }
    available
}

/// Score to pixel scaling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarScale {
    pub pixels_per_point: f32,
    pub min_bar_length: i32,
}

impl BarScale {
    /// Spread `available_pixels` over `max_score` points.
    ///
    /// A zero max score yields zero pixels per point, so every bar
    /// renders at its minimum length.
    pub fn new(max_score: u32, available_pixels: i32, min_bar_length: i32) -> Self {
        let pixels_per_point = if max_score == 0 {
            log::warn!("Maximum score is zero, bars will show at minimum length");
            0.0
        } else {
            available_pixels.max(0) as f32 / max_score as f32
        };

        log::debug!("Bar scale: {pixels_per_point} px/point over {available_pixels}px");

        Self {
            pixels_per_point,
            min_bar_length,
        }
    }

    /// Scaled length of a score, without the minimum length
    pub fn score_length(&self, score: f32) -> i32 {
        (score * self.pixels_per_point) as i32
    }

    /// Full bar length for `score`
    pub fn bar_length(&self, score: f32) -> i32 {
        self.score_length(score).saturating_add(self.min_bar_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> Dimensions {
        Dimensions {
            aspect_ratio: 2.0,
            bar_height: 40,
            distance_between_bars: 10,
            min_score_bar_length: 5,
            sidebar_width: 200,
            distance_between_bar_and_score_text: 8,
            distance_between_score_text_and_window_right: 12,
            distance_between_score_text_and_eliminated_text: 16,
            distance_between_name_and_sidebar: 6,
            distance_between_ordinal_numbers_and_window_left: 4,
        }
    }

    #[test]
    fn test_offset_for_rank() {
        let rows = RowLayout::new(&dims());
        assert_eq!(rows.offset_for_rank(0), 10);
        assert_eq!(rows.offset_for_rank(1), 60);
        assert_eq!(rows.offset_for_rank(4), 210);
    }

    #[test]
    fn test_window_height() {
        let rows = RowLayout::new(&dims());
        // 3 rows of 40 + 4 gaps of 10
        assert_eq!(rows.window_height(3), 160.0);
    }

    #[test]
    fn test_proportional_width() {
        // Label rendered 20px tall, scaled to a 40px bar doubles its width
        assert_eq!(proportional_width(TextExtent::new(30, 20), 40), 60);
        assert_eq!(proportional_width(TextExtent::new(30, 40), 40), 30);
        assert_eq!(proportional_width(TextExtent::new(30, 0), 40), 0);
    }

    #[test]
    fn test_available_bar_pixels() {
        // 1000 - 200 - 40 - 5 - 8 - 12
        assert_eq!(available_bar_pixels(&dims(), 1000, 40), 735);
        assert_eq!(available_bar_pixels(&dims(), 100, 40), 0);
    }

    #[test]
    fn test_available_bar_pixels_extreme_dimensions() {
        let mut extreme = dims();
        extreme.sidebar_width = i32::MAX;
        assert_eq!(available_bar_pixels(&extreme, 0, 40), 0);

        extreme.sidebar_width = i32::MIN;
        extreme.min_score_bar_length = i32::MIN;
        assert_eq!(available_bar_pixels(&extreme, i32::MAX, 0), i32::MAX);
    }

    #[test]
    fn test_bar_length() {
        let scale = BarScale::new(100, 500, 5);
        assert_eq!(scale.pixels_per_point, 5.0);
        assert_eq!(scale.bar_length(0.0), 5);
        assert_eq!(scale.bar_length(100.0), 505);
        assert_eq!(scale.bar_length(10.5), 57);
    }

    #[test]
    fn test_zero_max_score_is_finite() {
        let scale = BarScale::new(0, 500, 5);
        assert_eq!(scale.pixels_per_point, 0.0);
        assert!(scale.pixels_per_point.is_finite());
        assert_eq!(scale.bar_length(0.0), 5);
        assert_eq!(scale.bar_length(12.0), 5);
    }
}
