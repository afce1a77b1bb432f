use crate::constants::VEIL_LIFT_DELAY_MS;
use crate::sched;
use web_sys as web;

/// Arm the entry veil: shortly after startup the `#veil` overlay gains its
/// `lifted` class and the stylesheet fades it out. Returns the timeout
/// handle so teardown can cancel a lift that has not fired yet.
pub fn arm(document: &web::Document) -> Option<sched::Timeout> {
    let document = document.clone();
    sched::Timeout::once(VEIL_LIFT_DELAY_MS, move || lift(&document))
}

/// Add the `lifted` class; a page without the overlay is left alone.
pub fn lift(document: &web::Document) {
    if let Some(el) = document.get_element_by_id("veil") {
        _ = el.class_list().add_1("lifted");
    }
}
