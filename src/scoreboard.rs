//! Scoreboard facade
//!
//! What a host drives: load once, prepare text assets once, then per frame
//! `tick` + `render`, forwarding the advance key to `handle_advance_signal`.

use crate::consts::ELIMINATED_LABEL;
use crate::error::{AssetError, LoadError};
use crate::ordinal::ordinal;
use crate::renderer::{Canvas, FontRole, Rect, TextCache, TextExtent, TextMeasurer};
use crate::settings::ScoreboardConfig;
use crate::sim::{
    Athlete, BarScale, Phase, RowLayout, ScoreboardState, TickEvents, available_bar_pixels,
    compute, handle_advance, proportional_width, tick,
};

pub struct Scoreboard {
    config: ScoreboardConfig,
    rows: RowLayout,
    state: ScoreboardState,
    window_height: f32,
    text: TextCache,
    ordinal_labels: Vec<String>,
    /// Set by `prepare_visual_assets`
    scale: Option<BarScale>,
}

impl Scoreboard {
    /// Build the scoreboard and compute both standings snapshots
    pub fn from_config(config: ScoreboardConfig) -> Result<Self, LoadError> {
        config.validate()?;

        let rows = RowLayout::new(&config.dimensions);
        let transition = compute(&config.athletes, rows)?;
        let window_height = rows.window_height(transition.athletes.len());
        let ordinal_labels = (1..=transition.athletes.len() as u32).map(ordinal).collect();

        log::info!(
            "Scoreboard ready: {} athletes, {}x{} window",
            transition.athletes.len(),
            (window_height * config.dimensions.aspect_ratio) as i32,
            window_height
        );

        Ok(Self {
            config,
            rows,
            state: ScoreboardState::new(transition),
            window_height,
            text: TextCache::new(),
            ordinal_labels,
            scale: None,
        })
    }

    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Self::from_config(ScoreboardConfig::from_json_str(json)?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: impl AsRef<std::path::Path>) -> Result<Self, LoadError> {
        Self::from_config(ScoreboardConfig::load(path)?)
    }

    /// Measure every fixed label and derive the bar scale.
    ///
    /// Must succeed before `render` draws anything.
    pub fn prepare_visual_assets(
        &mut self,
        measurer: &impl TextMeasurer,
    ) -> Result<(), AssetError> {
        let bar_height = self.config.dimensions.bar_height;

        self.measure_required(measurer, FontRole::Eliminated, ELIMINATED_LABEL)?;

        let max_score_label = self.state.max_score.to_string();
        let max_score_extent = self.measure_required(measurer, FontRole::Athlete, &max_score_label)?;

        for label in self.ordinal_labels.clone() {
            self.measure_required(measurer, FontRole::Athlete, &label)?;
        }
        let names: Vec<String> = self.state.athletes.iter().map(|a| a.name.clone()).collect();
        for name in names {
            self.measure_required(measurer, FontRole::Athlete, &name)?;
        }

        let max_score_text_width = proportional_width(max_score_extent, bar_height);
        let available = available_bar_pixels(
            &self.config.dimensions,
            self.window_width(),
            max_score_text_width,
        );
        self.scale = Some(BarScale::new(
            self.state.max_score,
            available,
            self.config.dimensions.min_score_bar_length,
        ));

        log::info!("Prepared {} text labels", self.text.len());
        Ok(())
    }

    fn measure_required(
        &mut self,
        measurer: &impl TextMeasurer,
        role: FontRole,
        text: &str,
    ) -> Result<TextExtent, AssetError> {
        let Some(extent) = self.text.get_or_measure(measurer, role, text) else {
            let font = match role {
                FontRole::Athlete => &self.config.fonts.athletes,
                FontRole::Eliminated => &self.config.fonts.eliminated,
            };
            return Err(AssetError::FontUnavailable {
                role,
                font: font.clone(),
            });
        };

        if extent.height == 0 {
            return Err(AssetError::Unmeasurable {
                role,
                text: text.to_string(),
            });
        }
        Ok(extent)
    }

    /// Advance the animation by `elapsed_seconds`
    pub fn tick(&mut self, elapsed_seconds: f32) -> TickEvents {
        tick(&mut self.state, elapsed_seconds)
    }

    /// Forward the advance key. Returns true if a new phase started.
    pub fn handle_advance_signal(&mut self) -> bool {
        handle_advance(&mut self.state)
    }

    /// Draw one frame
    pub fn render(&mut self, canvas: &mut impl Canvas) {
        let Some(scale) = self.scale else {
            log::warn!("render called before visual assets were prepared");
            return;
        };

        let Self {
            config,
            rows,
            state,
            window_height,
            text,
            ordinal_labels,
            ..
        } = self;
        let dims = &config.dimensions;
        let colours = &config.colours;
        let bar_height = dims.bar_height as i32;

        canvas.clear(colours.background);

        canvas.fill_rect(
            Rect::new(0, 0, dims.sidebar_width, *window_height as i32),
            colours.sidebar,
        );

        for (index, label) in ordinal_labels.iter().enumerate() {
            let Some(width) = label_width(text, &*canvas, FontRole::Athlete, label, dims.bar_height)
            else {
                continue;
            };
            let area = Rect::new(
                dims.distance_between_ordinal_numbers_and_window_left,
                rows.offset_for_rank(index),
                width,
                bar_height,
            );
            canvas.draw_text(FontRole::Athlete, label, area, Some(colours.ordinal_text));
        }

        for athlete in &state.athletes {
            let y = athlete.current_position as i32;

            // Bar
            canvas.fill_rect(
                Rect::new(
                    dims.sidebar_width,
                    y,
                    scale.bar_length(athlete.current_score),
                    bar_height,
                ),
                athlete.colour,
            );

            // Name, right-aligned against the sidebar
            if let Some(width) =
                label_width(text, &*canvas, FontRole::Athlete, &athlete.name, dims.bar_height)
            {
                let area = Rect::new(
                    dims.sidebar_width
                        .saturating_sub(width)
                        .saturating_sub(dims.distance_between_name_and_sidebar),
                    y,
                    width,
                    bar_height,
                );
                canvas.draw_text(FontRole::Athlete, &athlete.name, area, Some(athlete.colour));
            }

            // Score, just past the end of the bar
            let shown_score = if state.scores_revealed() {
                athlete.projected_score
            } else if state.phase == Phase::Idle {
                athlete.original_score
            } else {
                athlete.current_score as u32
            };
            let score_label = shown_score.to_string();
            let Some(score_width) =
                label_width(text, &*canvas, FontRole::Athlete, &score_label, dims.bar_height)
            else {
                continue;
            };
            let score_area = Rect::new(
                scale
                    .bar_length(athlete.current_score)
                    .saturating_add(dims.distance_between_bar_and_score_text)
                    .saturating_add(dims.sidebar_width),
                y,
                score_width,
                bar_height,
            );
            canvas.draw_text(
                FontRole::Athlete,
                &score_label,
                score_area,
                Some(colours.score_text),
            );

            if athlete.is_eliminated {
                draw_eliminated_label(canvas, text, state, athlete, score_area, config);
            }
        }

        canvas.present();
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.config.dimensions.aspect_ratio
    }

    pub fn window_height(&self) -> f32 {
        self.window_height
    }

    pub fn window_width(&self) -> i32 {
        (self.window_height * self.config.dimensions.aspect_ratio) as i32
    }

    pub fn config(&self) -> &ScoreboardConfig {
        &self.config
    }

    pub fn state(&self) -> &ScoreboardState {
        &self.state
    }

    pub fn athletes(&self) -> &[Athlete] {
        &self.state.athletes
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn is_ready_to_advance(&self) -> bool {
        self.state.ready_to_advance && self.state.phase.accepts_advance()
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    /// Bar scale, once assets are prepared
    pub fn scale(&self) -> Option<BarScale> {
        self.scale
    }
}

/// Width of `label` once scaled to the bar height
fn label_width(
    cache: &mut TextCache,
    measurer: &impl TextMeasurer,
    role: FontRole,
    label: &str,
    bar_height: u32,
) -> Option<i32> {
    let extent = cache.get_or_measure(measurer, role, label)?;
    Some(proportional_width(extent, bar_height))
}

fn draw_eliminated_label(
    canvas: &mut impl Canvas,
    text: &mut TextCache,
    state: &ScoreboardState,
    athlete: &Athlete,
    score_area: Rect,
    config: &ScoreboardConfig,
) {
    let dims = &config.dimensions;
    let Some(width) = label_width(
        text,
        &*canvas,
        FontRole::Eliminated,
        ELIMINATED_LABEL,
        dims.bar_height,
    ) else {
        return;
    };

    let area = Rect::new(
        score_area
            .right()
            .saturating_add(dims.distance_between_score_text_and_eliminated_text),
        score_area.y,
        width,
        dims.bar_height as i32,
    );
    let tint = config
        .colours
        .eliminated_text
        .with_alpha(state.eliminated_label_alpha(athlete));

    canvas.draw_text(FontRole::Eliminated, ELIMINATED_LABEL, area, Some(tint));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{Colour, DrawCommand, HeadlessCanvas};
    use crate::settings::tests::{SAMPLE, sample};

    /// 10px glyphs, 20px lines: labels scale 2x onto the 40px bars
    fn canvas() -> HeadlessCanvas {
        HeadlessCanvas::new(10, 20)
    }

    fn prepared() -> (Scoreboard, HeadlessCanvas) {
        let mut board = Scoreboard::from_config(sample()).unwrap();
        let canvas = canvas();
        board.prepare_visual_assets(&canvas).unwrap();
        (board, canvas)
    }

    fn text_area(canvas: &HeadlessCanvas, label: &str) -> Option<(Rect, Option<Colour>)> {
        canvas
            .texts()
            .find(|(t, _, _)| *t == label)
            .map(|(_, area, tint)| (area, tint))
    }

    #[test]
    fn test_window_geometry() {
        let board = Scoreboard::from_config(sample()).unwrap();
        // 3 * (40 + 10) + 10
        assert_eq!(board.window_height(), 160.0);
        assert_eq!(board.aspect_ratio(), 2.0);
        assert_eq!(board.window_width(), 320);
    }

    #[test]
    fn test_invalid_json_is_load_error() {
        assert!(matches!(
            Scoreboard::from_json_str("{ not json"),
            Err(LoadError::Parse(_))
        ));
        assert!(Scoreboard::from_json_str(SAMPLE).is_ok());
    }

    #[test]
    fn test_prepare_computes_scale() {
        let (board, _) = prepared();
        let scale = board.scale().unwrap();
        // "13" is 20px wide at 20px tall, 40px once scaled to the bar;
        // 320 - 200 - 40 - 5 - 8 - 12 = 55 pixels over 13 points
        assert!((scale.pixels_per_point - 55.0 / 13.0).abs() < 1e-5);
        assert_eq!(scale.min_bar_length, 5);
    }

    #[test]
    fn test_prepare_fails_without_font() {
        let mut board = Scoreboard::from_config(sample()).unwrap();
        let canvas = canvas().without_font(FontRole::Eliminated);
        let err = board.prepare_visual_assets(&canvas).unwrap_err();
        assert_eq!(
            err,
            AssetError::FontUnavailable {
                role: FontRole::Eliminated,
                font: "fonts/eliminated.ttf".into()
            }
        );
        assert!(board.scale().is_none());
    }

    #[test]
    fn test_prepare_fails_on_zero_height_text() {
        let mut board = Scoreboard::from_config(sample()).unwrap();
        let canvas = HeadlessCanvas::new(10, 0);
        assert!(matches!(
            board.prepare_visual_assets(&canvas),
            Err(AssetError::Unmeasurable { .. })
        ));
    }

    #[test]
    fn test_render_before_prepare_draws_nothing() {
        let mut board = Scoreboard::from_config(sample()).unwrap();
        let mut canvas = canvas();
        board.render(&mut canvas);
        assert_eq!(canvas.frames_presented, 0);
    }

    #[test]
    fn test_render_layout() {
        let (mut board, mut canvas) = prepared();
        board.render(&mut canvas);
        let config = sample();

        assert_eq!(canvas.frames_presented, 1);
        assert_eq!(
            canvas.last_frame[0],
            DrawCommand::Clear(config.colours.background)
        );

        let rects: Vec<_> = canvas.rects().collect();
        assert_eq!(rects[0], (Rect::new(0, 0, 200, 160), config.colours.sidebar));
        // Alice leads on 10: 10 * 55/13 = 42.3 -> 42, plus 5 minimum
        assert_eq!(rects[1].0, Rect::new(200, 10, 47, 40));

        // Ordinals stacked at fixed rows, 3 glyphs -> 60px wide
        assert_eq!(
            text_area(&canvas, "1st"),
            Some((Rect::new(4, 10, 60, 40), Some(config.colours.ordinal_text)))
        );
        assert_eq!(text_area(&canvas, "3rd").unwrap().0, Rect::new(4, 110, 60, 40));

        // "Alice" is 100px once scaled, right-aligned 6px left of the sidebar
        let (name_area, _) = text_area(&canvas, "Alice").unwrap();
        assert_eq!(name_area, Rect::new(94, 10, 100, 40));

        // Score text sits 8px past the bar end
        let (score_area, tint) = text_area(&canvas, "5").unwrap();
        assert_eq!(tint, Some(config.colours.score_text));
        // Zoe: 5 * 55/13 = 21.1 -> 21, + 5 + 8 + 200
        assert_eq!(score_area, Rect::new(234, 110, 20, 40));
    }

    #[test]
    fn test_only_eliminated_athletes_get_label() {
        let (mut board, mut canvas) = prepared();
        board.render(&mut canvas);

        let labels: Vec<_> = canvas
            .texts()
            .filter(|(t, _, _)| *t == ELIMINATED_LABEL)
            .collect();
        assert_eq!(labels.len(), 1);
        let (_, area, tint) = labels[0];
        // Zoe's score text ends at 254, then a 16px gap
        assert_eq!(area, Rect::new(270, 110, 200, 40));
        assert_eq!(tint, Some(Colour::rgb(255, 0, 0)));
    }

    #[test]
    fn test_full_playback() {
        let (mut board, mut canvas) = prepared();

        let mut frames = 0;
        while !board.is_finished() {
            board.handle_advance_signal();
            board.tick(1.0 / 60.0);
            board.render(&mut canvas);
            frames += 1;
            assert!(frames < 10_000, "playback never finished");
        }

        assert_eq!(board.phase(), Phase::Done);
        let standings: Vec<_> = board
            .state()
            .standings()
            .iter()
            .map(|a| (a.name.clone(), a.current_score, a.is_eliminated))
            .collect();
        assert_eq!(
            standings,
            [
                ("Bob".to_string(), 13.0, false),
                ("Alice".to_string(), 10.0, true),
                ("Zoe".to_string(), 5.0, true),
            ]
        );

        // Bob moved to the top row, Alice down one
        let bob = board.athletes().iter().find(|a| a.name == "Bob").unwrap();
        assert_eq!(bob.current_position, 10.0);

        // Both eliminated labels fully opaque at the end
        let alphas: Vec<_> = canvas
            .texts()
            .filter(|(t, _, _)| *t == ELIMINATED_LABEL)
            .map(|(_, _, tint)| tint.unwrap().a)
            .collect();
        assert_eq!(alphas, [255, 255]);
    }

    #[test]
    fn test_newly_eliminated_label_fades_in() {
        let (mut board, mut canvas) = prepared();
        board.handle_advance_signal();
        board.tick(100.0);
        board.handle_advance_signal();
        board.tick(100.0);
        assert!(board.handle_advance_signal());
        assert_eq!(board.phase(), Phase::EliminationReveal);

        board.tick(0.0);
        board.render(&mut canvas);

        let alphas: Vec<_> = canvas
            .texts()
            .filter(|(t, _, _)| *t == ELIMINATED_LABEL)
            .map(|(_, _, tint)| tint.unwrap().a)
            .collect();
        // Alice (newly out) starts transparent, Zoe stays opaque
        assert!(alphas.contains(&0));
        assert!(alphas.contains(&255));
    }

    #[test]
    fn test_large_scores_shown_and_ranked_exactly() {
        let mut config = sample();
        // Bob and Alice collapse to the same f32
        config.athletes[0].current_score = 16_777_216;
        config.athletes[0].points_to_add = 0;
        config.athletes[1].current_score = 16_777_217;
        let mut board = Scoreboard::from_config(config).unwrap();
        let mut canvas = canvas();
        board.prepare_visual_assets(&canvas).unwrap();

        board.render(&mut canvas);
        assert!(text_area(&canvas, "16777217").is_some());
        assert!(text_area(&canvas, "16777216").is_some());

        while !board.is_finished() {
            board.handle_advance_signal();
            board.tick(1.0);
        }
        board.render(&mut canvas);
        assert!(text_area(&canvas, "16777217").is_some());

        let names: Vec<_> = board
            .state()
            .standings()
            .iter()
            .map(|a| (a.name.clone(), a.is_eliminated))
            .collect();
        assert_eq!(
            names,
            [
                ("Alice".to_string(), false),
                ("Bob".to_string(), true),
                ("Zoe".to_string(), true),
            ]
        );
    }

    #[test]
    fn test_zero_scores_render_minimum_bars() {
        let mut config = sample();
        for athlete in &mut config.athletes {
            athlete.current_score = 0;
            athlete.points_to_add = 0;
        }
        let mut board = Scoreboard::from_config(config).unwrap();
        let mut canvas = canvas();
        board.prepare_visual_assets(&canvas).unwrap();
        board.render(&mut canvas);

        assert_eq!(board.scale().unwrap().pixels_per_point, 0.0);
        let bar_widths: Vec<_> = canvas.rects().skip(1).map(|(r, _)| r.w).collect();
        assert_eq!(bar_widths, [5, 5, 5]);
    }
}
