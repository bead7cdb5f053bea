//! Browser host embedding
//!
//! `mount` attaches the game to a canvas and returns a [`GameHandle`]. All
//! callbacks reach the game through a shared slot; teardown empties the slot,
//! cancels the pending animation frame and removes every listener, so a
//! callback that still fires afterwards finds nothing and returns.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec2;
use js_sys::Function;
use wasm_bindgen::prelude::*;
use web_sys::{Event, HtmlCanvasElement, KeyboardEvent, PointerEvent, Window};

use crate::game::{Flow, Game};
use crate::persistence::LocalStore;
use crate::platform::{Action, Viewport, action_for_key};
use crate::renderer::CanvasPainter;
use crate::settings::Settings;
use crate::tuning::Tuning;

type Slot = Rc<RefCell<Option<Runtime>>>;

fn to_js(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

/// JS views of the callbacks, used to schedule frames and remove listeners
struct Callbacks {
    frame: Function,
    keydown: Function,
    pointerdown: Function,
    resize: Function,
}

/// Everything a mounted game owns. Lives in the slot until teardown.
struct Runtime {
    game: Game,
    painter: CanvasPainter,
    window: Window,
    canvas: HtmlCanvasElement,
    callbacks: Callbacks,
    on_exit: Function,
    raf_id: Option<i32>,
}

impl Runtime {
    fn schedule(&mut self) {
        if self.raf_id.is_some() {
            return;
        }
        match self.window.request_animation_frame(&self.callbacks.frame) {
            Ok(id) => self.raf_id = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {e:?}"),
        }
    }

    fn paint(&self, commands: &[crate::renderer::DrawCommand]) {
        if let Err(e) = self.painter.paint(commands) {
            log::error!("Paint failed: {e:#}");
        }
    }

    /// Size the canvas to its container and rescale the context
    fn fit_canvas(&mut self) {
        let viewport = measure(&self.window, &self.canvas, self.game.settings());
        let (w, h) = viewport.backing_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
        let style = self.canvas.style();
        let css_w = format!("{}px", viewport.css_width);
        let css_h = format!("{}px", viewport.css_height);
        if style.set_property("width", &css_w).is_err()
            || style.set_property("height", &css_h).is_err()
        {
            log::warn!("Could not set canvas CSS size");
        }
        if let Err(e) = self.painter.reset_transform(viewport.pixel_ratio) {
            log::warn!("Could not reset canvas transform: {e:#}");
        }
        self.game.resize(viewport.size());
    }

    fn detach(&mut self) {
        if let Some(id) = self.raf_id.take() {
            if let Err(e) = self.window.cancel_animation_frame(id) {
                log::warn!("cancelAnimationFrame failed: {e:?}");
            }
        }
        let removals = [
            self.window
                .remove_event_listener_with_callback("keydown", &self.callbacks.keydown),
            self.window
                .remove_event_listener_with_callback("resize", &self.callbacks.resize),
            self.canvas
                .remove_event_listener_with_callback("pointerdown", &self.callbacks.pointerdown),
        ];
        if removals.iter().any(Result::is_err) {
            log::warn!("Some listeners could not be removed");
        }
    }
}

/// Container size (parent element, else the canvas itself) at the current pixel ratio
fn measure(window: &Window, canvas: &HtmlCanvasElement, settings: &Settings) -> Viewport {
    let (w, h) = match canvas.parent_element() {
        Some(parent) => (parent.client_width(), parent.client_height()),
        None => (canvas.client_width(), canvas.client_height()),
    };
    Viewport::from_container(
        w as f64,
        h as f64,
        window.device_pixel_ratio(),
        settings.pixel_ratio_cap(),
    )
}

fn attach(slot: &Slot) -> Result<(), JsValue> {
    let guard = slot.borrow();
    let Some(runtime) = guard.as_ref() else {
        return Ok(());
    };
    let callbacks = &runtime.callbacks;
    runtime
        .window
        .add_event_listener_with_callback("keydown", &callbacks.keydown)?;
    runtime
        .window
        .add_event_listener_with_callback("resize", &callbacks.resize)?;
    runtime
        .canvas
        .add_event_listener_with_callback("pointerdown", &callbacks.pointerdown)?;
    Ok(())
}

/// Take the runtime out of the slot and unhook it from the page
fn teardown(slot: &Slot) -> Option<Runtime> {
    let mut runtime = slot.borrow_mut().take()?;
    runtime.detach();
    Some(runtime)
}

/// Run `f` against the mounted game and act on the resulting flow
fn deliver(slot: &Slot, f: impl FnOnce(&mut Game) -> Flow) {
    let flow = {
        let mut guard = slot.borrow_mut();
        let Some(runtime) = guard.as_mut() else {
            return;
        };
        let flow = f(&mut runtime.game);
        if flow == Flow::Wake {
            runtime.schedule();
        }
        flow
    };

    if flow == Flow::Exit {
        if let Some(runtime) = teardown(slot) {
            let on_exit = runtime.on_exit.clone();
            drop(runtime);
            // Notify outside the current event dispatch
            wasm_bindgen_futures::spawn_local(async move {
                if let Err(e) = on_exit.call0(&JsValue::NULL) {
                    log::warn!("on_exit callback threw: {e:?}");
                }
            });
        }
    }
}

/// Closures backing the registered callbacks. Dropped with the handle.
struct Bindings {
    _frame: Closure<dyn FnMut(f64)>,
    _keydown: Closure<dyn FnMut(KeyboardEvent)>,
    _pointerdown: Closure<dyn FnMut(PointerEvent)>,
    _resize: Closure<dyn FnMut(Event)>,
}

fn as_function<T: ?Sized>(closure: &Closure<T>) -> Function {
    closure.as_ref().unchecked_ref::<Function>().clone()
}

/// A mounted game. Call `unmount()` or drop it to stop the game.
#[wasm_bindgen]
pub struct GameHandle {
    slot: Slot,
    _bindings: Bindings,
}

#[wasm_bindgen]
impl GameHandle {
    /// Stop the loop and remove all listeners. Idempotent.
    pub fn unmount(&self) {
        if teardown(&self.slot).is_some() {
            log::info!("Unmounted");
        }
    }
}

impl Drop for GameHandle {
    fn drop(&mut self) {
        teardown(&self.slot);
    }
}

fn init_logging() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        log::debug!("Logger already initialized");
    }
}

/// Attach a new game to `canvas`. `on_exit` is called once, with no
/// arguments, after the player picks Exit.
#[wasm_bindgen]
pub fn mount(canvas: HtmlCanvasElement, on_exit: Function) -> Result<GameHandle, JsValue> {
    init_logging();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let painter = CanvasPainter::new(&canvas).map_err(to_js)?;
    let seed = js_sys::Date::now() as u64;
    let arena = measure(&window, &canvas, &Settings::default()).size();
    let game = Game::new(seed, arena, Tuning::default(), Box::new(LocalStore));

    let slot: Slot = Rc::new(RefCell::new(None));

    let frame = {
        let slot = slot.clone();
        Closure::<dyn FnMut(f64)>::new(move |_time: f64| {
            let mut guard = slot.borrow_mut();
            let Some(runtime) = guard.as_mut() else {
                return;
            };
            runtime.raf_id = None;
            let out = runtime.game.frame();
            runtime.paint(&out.commands);
            if out.keep_running {
                runtime.schedule();
            }
        })
    };

    let keydown = {
        let slot = slot.clone();
        Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let Some(action) = action_for_key(&event.code()) else {
                return;
            };
            if action == Action::Flap {
                // Keep Space / ArrowUp from scrolling the page
                event.prevent_default();
            }
            deliver(&slot, |game| game.handle(action));
        })
    };

    let pointerdown = {
        let slot = slot.clone();
        let canvas = canvas.clone();
        Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let rect = canvas.get_bounding_client_rect();
            let point = Vec2::new(
                (event.client_x() as f64 - rect.left()) as f32,
                (event.client_y() as f64 - rect.top()) as f32,
            );
            deliver(&slot, |game| game.pointer(point));
        })
    };

    let resize = {
        let slot = slot.clone();
        Closure::<dyn FnMut(_)>::new(move |_event: Event| {
            let mut guard = slot.borrow_mut();
            let Some(runtime) = guard.as_mut() else {
                return;
            };
            runtime.fit_canvas();
            if runtime.game.is_suspended() {
                let commands = runtime.game.redraw();
                runtime.paint(&commands);
            }
        })
    };

    let callbacks = Callbacks {
        frame: as_function(&frame),
        keydown: as_function(&keydown),
        pointerdown: as_function(&pointerdown),
        resize: as_function(&resize),
    };

    let mut runtime = Runtime {
        game,
        painter,
        window,
        canvas,
        callbacks,
        on_exit,
        raf_id: None,
    };
    runtime.fit_canvas();
    *slot.borrow_mut() = Some(runtime);

    if let Err(e) = attach(&slot) {
        teardown(&slot);
        return Err(e);
    }
    if let Some(runtime) = slot.borrow_mut().as_mut() {
        runtime.schedule();
    }

    log::info!("Neo Flappy mounted (seed {seed})");

    Ok(GameHandle {
        slot,
        _bindings: Bindings {
            _frame: frame,
            _keydown: keydown,
            _pointerdown: pointerdown,
            _resize: resize,
        },
    })
}
