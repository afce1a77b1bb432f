#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod ambience;
mod audio;
mod constants;
mod cursor;
mod dom;
mod events;
mod field;
mod frame;
mod render;
mod reveal;
mod sched;
mod veil;

use cursor::CursorFollow;
use field::FieldState;

/// Live handles for everything that must stop with the page. Dropping it
/// cancels the frame loop, the pending veil lift and the observer; the
/// audio control closes its context via `shutdown`.
struct App {
    _frame: Option<sched::FrameLoop>,
    _veil: Option<sched::Timeout>,
    _reveal: Option<reveal::RevealHandle>,
    audio: Rc<RefCell<audio::AudioControl>>,
}

impl Drop for App {
    fn drop(&mut self) {
        // The click closure keeps its own Rc to the control, so the graph
        // has to be shut down explicitly rather than by refcount.
        self.audio.borrow_mut().shutdown();
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("atmo starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let seed = js_sys::Date::now() as u64;

    let veil = veil::arm(&document);
    let reveal = reveal::wire(&document);

    // Cursor chrome: the dot snaps on pointermove, the glow eases toward it
    // once per frame.
    let cursor_state = Rc::new(RefCell::new(CursorFollow::default()));
    let dot = dom::html_element_by_id(&document, "cursor-dot");
    let glow = dom::html_element_by_id(&document, "cursor-glow");
    events::wire_pointermove(cursor_state.clone(), dot);

    // Particle layer; a page without the canvas keeps everything else.
    let painter = document
        .get_element_by_id("particle-canvas")
        .and_then(|el| el.dyn_into::<web::HtmlCanvasElement>().ok())
        .and_then(|canvas| {
            events::wire_resize(&canvas);
            let ctx = render::context_2d(&canvas)?;
            let field = FieldState::new(canvas.width() as f32, canvas.height() as f32, seed);
            Some(frame::FieldPainter { canvas, ctx, field })
        });
    if painter.is_none() {
        log::info!("no particle canvas; field disabled");
    }

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        painter,
        cursor: cursor_state,
        glow,
    }));
    let frame_loop = frame::start_loop(frame_ctx);

    // Audio builds lazily on the first toggle click; until then only the
    // variant choice and a decorrelated seed are held.
    let variant = audio::variant_from_dom(&document);
    let control = Rc::new(RefCell::new(audio::AudioControl::new(
        variant,
        seed ^ 0x9E37_79B9_7F4A_7C15,
    )));
    audio::wire_toggle(&document, control.clone());

    APP.with(|slot| {
        *slot.borrow_mut() = Some(App {
            _frame: frame_loop,
            _veil: veil,
            _reveal: reveal,
            audio: control,
        })
    });
    wire_pagehide();

    log::info!("atmo ready ({:?})", variant);
    Ok(())
}

fn wire_pagehide() {
    let closure = Closure::wrap(Box::new(move || {
        APP.with(|slot| slot.borrow_mut().take());
    }) as Box<dyn FnMut()>);
    if let Some(w) = web::window() {
        _ = w.add_event_listener_with_callback("pagehide", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
