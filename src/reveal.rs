use crate::constants::{REVEAL_ROOT_MARGIN, REVEAL_THRESHOLD};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// Keeps the observer and its callback alive; dropping disconnects.
pub struct RevealHandle {
    observer: web::IntersectionObserver,
    _closure: Closure<dyn FnMut(js_sys::Array, web::IntersectionObserver)>,
}

impl Drop for RevealHandle {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

/// Observe every `.reveal` element and add `visible` once it scrolls far
/// enough into view. Elements stay observed afterwards; re-entering the
/// viewport just re-adds a class that is already present.
pub fn wire(document: &web::Document) -> Option<RevealHandle> {
    let targets = document.query_selector_all(".reveal").ok()?;
    if targets.length() == 0 {
        return None;
    }

    let closure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, _observer: web::IntersectionObserver| {
            for entry in entries.iter() {
                let entry: web::IntersectionObserverEntry = entry.unchecked_into();
                if entry.is_intersecting() {
                    _ = entry.target().class_list().add_1("visible");
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, web::IntersectionObserver)>);

    let options = web::IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from(REVEAL_THRESHOLD));
    options.set_root_margin(REVEAL_ROOT_MARGIN);

    let observer =
        web::IntersectionObserver::new_with_options(closure.as_ref().unchecked_ref(), &options)
            .map_err(|e| log::error!("IntersectionObserver error: {:?}", e))
            .ok()?;

    for i in 0..targets.length() {
        if let Some(el) = targets.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
            observer.observe(&el);
        }
    }

    Some(RevealHandle {
        observer,
        _closure: closure,
    })
}
