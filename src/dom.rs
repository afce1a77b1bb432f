use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn html_element_by_id(document: &web::Document, element_id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(element_id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Move an absolutely-positioned element, in viewport pixels.
#[inline]
pub fn set_position_px(el: &web::HtmlElement, x: f32, y: f32) {
    let style = el.style();
    _ = style.set_property("left", &format!("{}px", x));
    _ = style.set_property("top", &format!("{}px", y));
}

#[inline]
pub fn set_display(el: &web::HtmlElement, value: &str) {
    _ = el.style().set_property("display", value);
}

/// Size the canvas backing store to the current viewport. Existing particle
/// positions are not rescaled; they drift back into frame on their own.
pub fn sync_canvas_to_viewport(canvas: &web::HtmlCanvasElement) {
    if let Some(w) = web::window() {
        let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));
    }
}
