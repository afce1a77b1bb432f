use crate::cursor::CursorFollow;
use crate::field::FieldState;
use crate::{dom, render, sched};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

/// Canvas, context and simulation state for the particle layer. Absent when
/// the page carries no `#particle-canvas`.
pub struct FieldPainter {
    pub canvas: web::HtmlCanvasElement,
    pub ctx: web::CanvasRenderingContext2d,
    pub field: FieldState,
}

pub struct FrameContext {
    pub painter: Option<FieldPainter>,
    pub cursor: Rc<RefCell<CursorFollow>>,
    pub glow: Option<web::HtmlElement>,
}

impl FrameContext {
    /// One animation frame: ease the glow toward the pointer, advance the
    /// field one tick, repaint. Field bounds come from the canvas backing
    /// store, which the resize listener keeps matched to the viewport.
    pub fn frame(&mut self) {
        {
            let mut cur = self.cursor.borrow_mut();
            cur.step();
            if let Some(el) = &self.glow {
                dom::set_position_px(el, cur.eased.x, cur.eased.y);
            }
        }
        if let Some(p) = &mut self.painter {
            let width = p.canvas.width().max(1) as f32;
            let height = p.canvas.height().max(1) as f32;
            p.field.tick(width, height);
            render::draw_field(&p.ctx, &p.field, width as f64, height as f64);
        }
    }
}

/// Drive `FrameContext::frame` from the animation-frame loop until the
/// returned handle is dropped.
pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext>>) -> Option<sched::FrameLoop> {
    sched::FrameLoop::start(move || frame_ctx.borrow_mut().frame())
}
