//! Athlete scoreboard entry point
//!
//! On the web, bars are drawn with WebGPU and text on a 2D overlay canvas;
//! Enter advances the reveal and Escape stops it. Natively, the reveal is
//! played back headless and the final standings are printed.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Keys the browser host reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
enum HostKey {
    Advance,
    Quit,
}

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn host_key(key: &str) -> Option<HostKey> {
    match key {
        "Enter" => Some(HostKey::Advance),
        "Escape" => Some(HostKey::Quit),
        _ => None,
    }
}

#[cfg(target_arch = "wasm32")]
mod web_host {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{CanvasRenderingContext2d, FontFaceSet, HtmlCanvasElement, Response};

    use athlete_scoreboard::Scoreboard;
    use athlete_scoreboard::consts::DEFAULT_CONFIG_PATH;
    use athlete_scoreboard::renderer::{
        Canvas, Colour, FontRole, Rect, RenderState, TextExtent, TextMeasurer,
    };
    use athlete_scoreboard::settings::Fonts;

    /// Frame time assumed for the very first frame
    const FIRST_FRAME_DT: f32 = 1.0 / 60.0;

    /// WebGPU bars under a 2D text overlay
    struct WebCanvas {
        gpu: RenderState,
        overlay: CanvasRenderingContext2d,
        font_set: FontFaceSet,
        athlete_font: String,
        eliminated_font: String,
    }

    impl WebCanvas {
        fn css_font(&self, role: FontRole) -> &str {
            match role {
                FontRole::Athlete => &self.athlete_font,
                FontRole::Eliminated => &self.eliminated_font,
            }
        }
    }

    impl TextMeasurer for WebCanvas {
        fn measure_text(&self, role: FontRole, text: &str) -> Option<TextExtent> {
            let font = self.css_font(role);
            if !self.font_set.check(font).unwrap_or(false) {
                return None;
            }

            self.overlay.set_font(font);
            let metrics = self.overlay.measure_text(text).ok()?;
            let height = metrics.font_bounding_box_ascent() + metrics.font_bounding_box_descent();
            Some(TextExtent::new(metrics.width() as u32, height as u32))
        }
    }

    impl Canvas for WebCanvas {
        fn clear(&mut self, colour: Colour) {
            self.gpu.begin_frame(colour);
            let (w, h) = self.gpu.size;
            self.overlay.clear_rect(0.0, 0.0, w as f64, h as f64);
        }

        fn fill_rect(&mut self, area: Rect, colour: Colour) {
            self.gpu.push_rect(area, colour);
        }

        fn draw_text(&mut self, role: FontRole, text: &str, area: Rect, tint: Option<Colour>) {
            let Some(extent) = self.measure_text(role, text) else {
                return;
            };
            if extent.width == 0 || extent.height == 0 {
                return;
            }

            // Stretch the rendered glyphs onto the target area
            let sx = area.w as f64 / extent.width as f64;
            let sy = area.h as f64 / extent.height as f64;

            self.overlay.set_font(self.css_font(role));
            self.overlay
                .set_fill_style_str(&tint.unwrap_or(Colour::WHITE).to_css());
            self.overlay.set_text_baseline("top");
            if self
                .overlay
                .set_transform(sx, 0.0, 0.0, sy, area.x as f64, area.y as f64)
                .is_err()
            {
                return;
            }
            let _ = self.overlay.fill_text(text, 0.0, 0.0);
            let _ = self.overlay.reset_transform();
        }

        fn present(&mut self) {
            match self.gpu.flush() {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    self.gpu.resize(self.gpu.size.0, self.gpu.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }
    }

    struct App {
        board: Scoreboard,
        canvas: WebCanvas,
        last_time: f64,
        /// Cleared by the quit key; the frame loop stops scheduling itself
        running: bool,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FIRST_FRAME_DT
            };
            self.last_time = time;

            let events = self.board.tick(dt);
            if let Some(phase) = events.completed {
                log::debug!("{} finished", phase.as_str());
            }
            self.board.render(&mut self.canvas);
        }
    }

    fn js_error(err: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&err.to_string())
    }

    async fn fetch_text(window: &web_sys::Window, url: &str) -> Result<String, JsValue> {
        let response: Response = JsFuture::from(window.fetch_with_str(url))
            .await?
            .dyn_into()?;
        if !response.ok() {
            return Err(JsValue::from_str(&format!(
                "fetching {url} failed with status {}",
                response.status()
            )));
        }
        JsFuture::from(response.text()?)
            .await?
            .as_string()
            .ok_or_else(|| JsValue::from_str("config response was not text"))
    }

    fn canvas_by_id(document: &web_sys::Document, id: &str) -> Result<HtmlCanvasElement, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no #{id} element")))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("#{id} is not a canvas")))
    }

    pub async fn run() -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let json = fetch_text(&window, DEFAULT_CONFIG_PATH).await?;
        let mut board = Scoreboard::from_json_str(&json).map_err(js_error)?;

        let width = board.window_width().max(1) as u32;
        let height = (board.window_height() as u32).max(1);

        let bars: HtmlCanvasElement = canvas_by_id(&document, "canvas")?;
        let text: HtmlCanvasElement = canvas_by_id(&document, "text-overlay")?;
        for canvas in [&bars, &text] {
            canvas.set_width(width);
            canvas.set_height(height);
        }

        let overlay: CanvasRenderingContext2d = text
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(bars.clone()))
            .map_err(js_error)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(js_error)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let gpu = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(js_error)?;

        let fonts = &board.config().fonts;
        let points = Fonts::point_size(board.config().dimensions.bar_height);
        let font_set = document.fonts();
        // Wait for web fonts declared in the page to finish loading
        JsFuture::from(font_set.ready()?).await?;

        let canvas = WebCanvas {
            gpu,
            overlay,
            font_set,
            athlete_font: format!("{points}pt \"{}\"", fonts.athletes),
            eliminated_font: format!("{points}pt \"{}\"", fonts.eliminated),
        };

        board.prepare_visual_assets(&canvas).map_err(js_error)?;

        let app = Rc::new(RefCell::new(App {
            board,
            canvas,
            last_time: 0.0,
            running: true,
        }));

        setup_input_handlers(app.clone())?;
        request_animation_frame(app);

        log::info!("Scoreboard running, press Enter to advance, Escape to quit");
        Ok(())
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if event.repeat() {
                return;
            }
            match super::host_key(&event.key()) {
                Some(super::HostKey::Advance) => {
                    app.borrow_mut().board.handle_advance_signal();
                }
                Some(super::HostKey::Quit) => {
                    app.borrow_mut().running = false;
                    log::info!("Scoreboard stopped");
                }
                None => {}
            }
        });
        window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            app_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn app_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();
            if !a.running {
                return;
            }
            a.frame(time);
        }
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }

    log::info!("Athlete scoreboard starting...");

    if let Err(err) = web_host::run().await {
        log::error!("Scoreboard failed to start: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| athlete_scoreboard::consts::DEFAULT_CONFIG_PATH.to_string());

    if let Err(err) = play_headless(&path) {
        log::error!("Scoreboard failed: {err}");
        return Err(err);
    }
    Ok(())
}

/// Native playback: run every phase to completion and print the result
#[cfg(not(target_arch = "wasm32"))]
fn play_headless(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    use athlete_scoreboard::Scoreboard;
    use athlete_scoreboard::renderer::HeadlessCanvas;

    const FRAME_DT: f32 = 1.0 / 60.0;

    let mut board = Scoreboard::load(path)?;

    // Half-height glyphs, roughly what a proportional font averages
    let line_height = board.config().dimensions.bar_height;
    let mut canvas = HeadlessCanvas::new((line_height / 2).max(1), line_height);
    board.prepare_visual_assets(&canvas)?;

    println!("Before:");
    print_standings(&board);

    let mut frames: u64 = 0;
    while !board.is_finished() {
        board.handle_advance_signal();
        board.tick(FRAME_DT);
        board.render(&mut canvas);
        frames += 1;
    }

    log::info!(
        "Playback finished after {frames} frames ({:.1}s)",
        frames as f32 * FRAME_DT
    );

    println!("\nAfter:");
    print_standings(&board);
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_standings(board: &athlete_scoreboard::Scoreboard) {
    use athlete_scoreboard::consts::ELIMINATED_LABEL;
    use athlete_scoreboard::ordinal;

    for (index, athlete) in board.state().standings().iter().enumerate() {
        println!(
            "{:>6}  {:<24}{:>6}  {}",
            ordinal(index as u32 + 1),
            athlete.name,
            athlete.current_score as u32,
            if athlete.is_eliminated {
                ELIMINATED_LABEL
            } else {
                ""
            }
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
