//! Canvas2D overlay renderer.
//!
//! Draws widget shadows and attachment buttons onto an HTML `<canvas>`
//! layered over the DOM widgets. Native hosts use the Vello painter in
//! `sheet-render` instead.

use sheet_core::camera::Camera;
use sheet_core::overlay::{AttachButton, BUTTON_RADIUS, ButtonAction, CornerRadii, ShadowShape};
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the overlay.
pub struct CanvasTheme {
    pub shadow: &'static str,
    pub shadow_blur: &'static str,
    pub attach: &'static str,
    pub detach: &'static str,
    pub glyph: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            shadow: "rgba(0, 0, 0, 0.10)",
            shadow_blur: "rgba(0, 0, 0, 0.18)",
            attach: "#007AFF",
            detach: "#FF3B30",
            glyph: "#FFFFFF",
        }
    }

    pub fn dark() -> Self {
        Self {
            shadow: "rgba(0, 0, 0, 0.35)",
            shadow_blur: "rgba(0, 0, 0, 0.55)",
            attach: "#0A84FF",
            detach: "#FF453A",
            glyph: "#1C1C1E",
        }
    }
}

/// Clear the overlay canvas and draw shadows (world space) then buttons
/// (screen space).
pub fn render_overlay(
    ctx: &CanvasRenderingContext2d,
    shadows: &[ShadowShape],
    buttons: &[AttachButton],
    camera: &Camera,
    canvas_width: f64,
    canvas_height: f64,
    theme: &CanvasTheme,
) {
    ctx.clear_rect(0.0, 0.0, canvas_width, canvas_height);

    ctx.save();
    let scale = camera.scale as f64;
    let _ = ctx.set_transform(scale, 0.0, 0.0, scale, camera.pan_x as f64, camera.pan_y as f64);
    ctx.set_fill_style_str(theme.shadow);
    ctx.set_shadow_blur(12.0);
    ctx.set_shadow_offset_y(2.0);
    ctx.set_shadow_color(theme.shadow_blur);
    for shadow in shadows {
        corner_radii_path(
            ctx,
            shadow.x as f64,
            shadow.y as f64,
            shadow.width as f64,
            shadow.height as f64,
            &shadow.radii,
        );
        ctx.fill();
    }
    ctx.restore();

    for button in buttons {
        draw_button(ctx, button, theme);
    }
}

fn draw_button(ctx: &CanvasRenderingContext2d, button: &AttachButton, theme: &CanvasTheme) {
    let (cx, cy) = (button.screen_x as f64, button.screen_y as f64);
    let r = BUTTON_RADIUS as f64;

    ctx.begin_path();
    let _ = ctx.arc(cx, cy, r, 0.0, std::f64::consts::TAU);
    ctx.set_fill_style_str(match button.action {
        ButtonAction::Attach => theme.attach,
        ButtonAction::Detach => theme.detach,
    });
    ctx.fill();

    let arm = r * 0.45;
    ctx.set_stroke_style_str(theme.glyph);
    ctx.set_line_width(2.0);
    ctx.set_line_cap("round");
    ctx.begin_path();
    match button.action {
        ButtonAction::Attach => {
            ctx.move_to(cx - arm, cy);
            ctx.line_to(cx + arm, cy);
            ctx.move_to(cx, cy - arm);
            ctx.line_to(cx, cy + arm);
        }
        ButtonAction::Detach => {
            ctx.move_to(cx - arm, cy - arm);
            ctx.line_to(cx + arm, cy + arm);
            ctx.move_to(cx - arm, cy + arm);
            ctx.line_to(cx + arm, cy - arm);
        }
    }
    ctx.stroke();
}

// ─── Helpers ─────────────────────────────────────────────────────────────

/// Rounded rectangle with an independent radius per corner. A zero radius
/// draws a square corner.
fn corner_radii_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, radii: &CornerRadii) {
    let limit = (w / 2.0).min(h / 2.0).max(0.0);
    let clamp = |r: f32| (r as f64).clamp(0.0, limit);
    let (tl, tr, br, bl) = (
        clamp(radii.top_left),
        clamp(radii.top_right),
        clamp(radii.bottom_right),
        clamp(radii.bottom_left),
    );

    ctx.begin_path();
    ctx.move_to(x + tl, y);
    ctx.line_to(x + w - tr, y);
    ctx.arc_to(x + w, y, x + w, y + tr, tr).unwrap_or(());
    ctx.line_to(x + w, y + h - br);
    ctx.arc_to(x + w, y + h, x + w - br, y + h, br).unwrap_or(());
    ctx.line_to(x + bl, y + h);
    ctx.arc_to(x, y + h, x, y + h - bl, bl).unwrap_or(());
    ctx.line_to(x, y + tl);
    ctx.arc_to(x, y, x + tl, y, tl).unwrap_or(());
    ctx.close_path();
}
