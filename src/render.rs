use crate::field::{FieldState, ParticleKind};
use wasm_bindgen::JsCast;
use web_sys as web;

/// Grab the 2d context for the particle canvas.
pub fn context_2d(canvas: &web::HtmlCanvasElement) -> Option<web::CanvasRenderingContext2d> {
    canvas
        .get_context("2d")
        .ok()
        .flatten()
        .and_then(|obj| obj.dyn_into::<web::CanvasRenderingContext2d>().ok())
}

/// Clear the surface and paint every slot in slot order. Mist particles are
/// a radial glow that fades to transparent at four radii; fine particles are
/// flat discs. Per-slot alpha is remaining life times base opacity.
pub fn draw_field(
    ctx: &web::CanvasRenderingContext2d,
    field: &FieldState,
    width: f64,
    height: f64,
) {
    ctx.clear_rect(0.0, 0.0, width, height);
    for p in &field.particles {
        let x = p.pos.x as f64;
        let y = p.pos.y as f64;
        let alpha = p.alpha();
        match p.kind {
            ParticleKind::Mist => {
                let outer = p.draw_radius() as f64;
                if let Ok(gradient) = ctx.create_radial_gradient(x, y, 0.0, x, y, outer) {
                    _ = gradient.add_color_stop(0.0, &p.tint.css(alpha));
                    _ = gradient.add_color_stop(1.0, &p.tint.css(0.0));
                    ctx.begin_path();
                    _ = ctx.arc(x, y, outer, 0.0, std::f64::consts::TAU);
                    ctx.set_fill_style_canvas_gradient(&gradient);
                    ctx.fill();
                }
            }
            ParticleKind::Fine => {
                ctx.begin_path();
                _ = ctx.arc(x, y, p.radius as f64, 0.0, std::f64::consts::TAU);
                ctx.set_fill_style_str(&p.tint.css(alpha));
                ctx.fill();
            }
        }
    }
}
