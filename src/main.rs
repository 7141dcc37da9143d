//! Star Collector entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent};

    use star_collector::Settings;
    use star_collector::driver::{Key, Session};
    use star_collector::renderer::RenderState;
    use star_collector::sim::GamePhase;

    /// Everything the browser callbacks share
    struct App {
        session: Session,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
    }

    impl App {
        /// Mouse event offset (CSS pixels) to canvas coordinates
        fn pointer_pos(&self, event: &MouseEvent) -> Option<Vec2> {
            let render_state = self.render_state.as_ref()?;
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0) as f32;
            let css = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
            render_state.viewport.surface_to_canvas(css * dpr)
        }

        fn frame(&mut self, time: f64) {
            self.session.advance(time);
            let vertices = self.session.frame();
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn resize_to_canvas(&mut self) {
            let (width, height) = physical_size(&self.canvas);
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
        }

        /// Pause when the page loses attention
        fn auto_pause(&mut self, reason: &str) {
            self.session.input.release_all();
            if self.session.game.phase() == GamePhase::Playing {
                self.session.input.key_down(Key::Pause);
                log::info!("Auto-paused ({})", reason);
            }
        }
    }

    fn physical_size(canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = web_sys::window()
            .map(|w| w.device_pixel_ratio())
            .unwrap_or(1.0);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let query = window.location().search().unwrap_or_default();
        let settings = Settings::from_query(&query);
        log::info!("Star Collector starting ({})", settings.variant.title());

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let (width, height) = physical_size(&canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let canvas_size = settings.variant.canvas_size();
        let session = match Session::new(settings, seed) {
            Ok(session) => session,
            Err(e) => {
                log::error!("{}", e);
                return;
            }
        };
        let app = Rc::new(RefCell::new(App {
            session,
            render_state: None,
            canvas: canvas.clone(),
        }));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("Failed to create surface: {}", e);
                return;
            }
        };

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => adapter,
            Err(e) => {
                log::error!("No suitable GPU adapter: {}", e);
                return;
            }
        };
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        match RenderState::new(surface, &adapter, width, height, canvas_size).await {
            Ok(render_state) => app.borrow_mut().render_state = Some(render_state),
            Err(e) => {
                log::error!("Failed to create device: {}", e);
                return;
            }
        }

        setup_input_handlers(&canvas, app.clone());
        setup_auto_pause(app.clone());

        request_animation_frame(app);
        log::info!("Star Collector running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Pointer move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                match a.pointer_pos(&event) {
                    Some(pos) => a.session.input.pointer_moved(pos),
                    None => a.session.input.pointer_left(),
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.button() != 0 {
                    return;
                }
                let mut a = app.borrow_mut();
                if let Some(pos) = a.pointer_pos(&event) {
                    a.session.input.pointer_down(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer leaves the canvas
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().session.input.pointer_left();
            });
            let _ = canvas
                .add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    if !event.repeat() {
                        app.borrow_mut().session.input.key_down(key);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom(&event.key()) {
                    app.borrow_mut().session.input.key_up(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().resize_to_canvas();
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    app.borrow_mut().auto_pause("tab hidden");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().auto_pause("window blur");
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

/// Headless run length: two minutes of simulated play
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_FRAMES: u64 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_collector::Settings;
    use star_collector::driver::{Session, autopilot_input};

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path).unwrap_or_else(|e| {
            log::warn!("{}; using default settings", e);
            Settings::default()
        }),
        None => Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    log::info!(
        "Star Collector (native) running {} headless with the autopilot",
        settings.variant.title()
    );

    let mut session = match Session::new(settings, seed) {
        Ok(session) => session,
        Err(e) => {
            log::error!("{}", e);
            return;
        }
    };
    let mut peak_vertices = 0;
    for frame in 1..=HEADLESS_FRAMES {
        let input = autopilot_input(&session.game);
        session.step(&input);

        // Build frames to exercise the renderer without a window
        if frame % 10 == 0 {
            peak_vertices = peak_vertices.max(session.frame().len());
        }
        if frame % 600 == 0 {
            log::info!(
                "t={}s phase={} level={} score={}",
                frame / 60,
                session.game.phase().as_str(),
                session.game.level(),
                session.game.score()
            );
        }
    }

    log::info!(
        "Finished {} steps, peak frame {} vertices",
        session.steps,
        peak_vertices
    );
    for (i, entry) in session.high_scores.entries.iter().enumerate() {
        log::info!("#{:>2} {:>6} (level {})", i + 1, entry.score, entry.level);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
