//! Cancellable wrappers around the host timer and animation-frame
//! primitives. Loops hold their own closure through an `Rc` slot and re-arm
//! themselves each tick; cancelling clears the pending id and empties the
//! slot, which breaks the self-reference and lets the closure free.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// One-shot timeout. Dropping the handle before it fires cancels it.
pub struct Timeout {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn once(delay_ms: i32, mut f: impl FnMut() + 'static) -> Option<Timeout> {
        let window = web::window()?;
        let closure = Closure::wrap(Box::new(move || f()) as Box<dyn FnMut()>);
        let id = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.as_ref().unchecked_ref(),
                delay_ms,
            )
            .ok()?;
        Some(Timeout {
            id,
            _closure: closure,
        })
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        // Clearing an id that already fired is a no-op in the host.
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.id);
        }
    }
}

/// Self-rescheduling timeout loop. The callback returns the delay until its
/// next run, or `None` to end the loop.
pub struct TimerLoop {
    pending: Rc<Cell<i32>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl TimerLoop {
    pub fn start(
        initial_delay_ms: u32,
        mut f: impl FnMut() -> Option<u32> + 'static,
    ) -> Option<TimerLoop> {
        let window = web::window()?;
        let pending: Rc<Cell<i32>> = Rc::new(Cell::new(0));
        let closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let pending_tick = pending.clone();
        let closure_tick = closure.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if let Some(delay_ms) = f() {
                let slot = closure_tick.borrow();
                if let (Some(w), Some(cb)) = (web::window(), slot.as_ref()) {
                    if let Ok(id) = w.set_timeout_with_callback_and_timeout_and_arguments_0(
                        cb.as_ref().unchecked_ref(),
                        delay_ms as i32,
                    ) {
                        pending_tick.set(id);
                    }
                }
            }
        }) as Box<dyn FnMut()>));

        let first = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                closure.borrow().as_ref()?.as_ref().unchecked_ref(),
                initial_delay_ms as i32,
            )
            .ok()?;
        pending.set(first);
        Some(TimerLoop { pending, closure })
    }

    pub fn cancel(&self) {
        if let Some(w) = web::window() {
            w.clear_timeout_with_handle(self.pending.get());
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for TimerLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// requestAnimationFrame loop in the same shape, re-arming itself every
/// frame until cancelled.
pub struct FrameLoop {
    raf_id: Rc<Cell<i32>>,
    closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>>,
}

impl FrameLoop {
    pub fn start(mut f: impl FnMut() + 'static) -> Option<FrameLoop> {
        let window = web::window()?;
        let raf_id: Rc<Cell<i32>> = Rc::new(Cell::new(0));
        let closure: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));

        let raf_tick = raf_id.clone();
        let closure_tick = closure.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            f();
            let slot = closure_tick.borrow();
            if let (Some(w), Some(cb)) = (web::window(), slot.as_ref()) {
                if let Ok(id) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_tick.set(id);
                }
            }
        }) as Box<dyn FnMut()>));

        let first = window
            .request_animation_frame(closure.borrow().as_ref()?.as_ref().unchecked_ref())
            .ok()?;
        raf_id.set(first);
        Some(FrameLoop { raf_id, closure })
    }

    pub fn cancel(&self) {
        if let Some(w) = web::window() {
            _ = w.cancel_animation_frame(self.raf_id.get());
        }
        self.closure.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
