use crate::cursor::CursorFollow;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Track the pointer. The shared cursor state records every move as the new
/// target, and the dot element (when present) snaps to it immediately; the
/// eased glow element is moved by the frame loop instead.
pub fn wire_pointermove(cursor: Rc<RefCell<CursorFollow>>, dot: Option<web::HtmlElement>) {
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        cursor.borrow_mut().set_target(x, y);
        if let Some(el) = &dot {
            dom::set_position_px(el, x, y);
        }
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Keep the canvas backing store matched to the viewport across resizes.
pub fn wire_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_to_viewport(canvas);
    let canvas = canvas.clone();
    let closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_to_viewport(&canvas);
    }) as Box<dyn FnMut()>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
