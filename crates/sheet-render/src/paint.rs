//! Overlay → Vello drawing commands.
//!
//! Shadows are painted under the camera transform (world units); buttons
//! are painted in screen space so they keep a constant size at any zoom.

use kurbo::{Affine, Cap, Circle, Line, Rect, RoundedRect, RoundedRectRadii, Stroke as KurboStroke};
use peniko::{Color, Fill};
use sheet_core::camera::Camera;
use sheet_core::overlay::{AttachButton, BUTTON_RADIUS, ButtonAction, CornerRadii, ShadowShape};
use vello::Scene;

/// Colors for the overlay layer.
#[derive(Debug, Clone, Copy)]
pub struct OverlayTheme {
    pub shadow: Color,
    pub shadow_outline: Color,
    pub attach: Color,
    pub detach: Color,
    pub glyph: Color,
}

impl OverlayTheme {
    pub fn light() -> Self {
        Self {
            shadow: Color::from_rgba8(0, 0, 0, 28),
            shadow_outline: Color::from_rgba8(0, 0, 0, 40),
            attach: Color::from_rgba8(0, 122, 255, 235),
            detach: Color::from_rgba8(255, 59, 48, 235),
            glyph: Color::from_rgba8(255, 255, 255, 255),
        }
    }

    pub fn dark() -> Self {
        Self {
            shadow: Color::from_rgba8(0, 0, 0, 90),
            shadow_outline: Color::from_rgba8(255, 255, 255, 24),
            attach: Color::from_rgba8(10, 132, 255, 235),
            detach: Color::from_rgba8(255, 69, 58, 235),
            glyph: Color::from_rgba8(28, 28, 30, 255),
        }
    }

    pub fn button_fill(&self, action: ButtonAction) -> Color {
        match action {
            ButtonAction::Attach => self.attach,
            ButtonAction::Detach => self.detach,
        }
    }
}

/// World → screen transform for a camera.
pub fn camera_transform(camera: &Camera) -> Affine {
    Affine::translate((camera.pan_x as f64, camera.pan_y as f64)) * Affine::scale(camera.scale as f64)
}

/// Paint shadows then buttons. Call once per frame with a freshly-cleared
/// `Scene`; an empty button list (e.g. while dragging) paints nothing on top.
pub fn paint_overlay(
    scene: &mut Scene,
    shadows: &[ShadowShape],
    buttons: &[AttachButton],
    camera: &Camera,
    theme: &OverlayTheme,
) {
    let transform = camera_transform(camera);
    for shadow in shadows {
        paint_shadow(scene, shadow, transform, theme);
    }
    for button in buttons {
        paint_button(scene, button, theme);
    }
    log::trace!("overlay: {} shadows, {} buttons", shadows.len(), buttons.len());
}

/// Rounded rectangle with per-corner radii, world units.
pub fn shadow_shape(shadow: &ShadowShape) -> RoundedRect {
    let rect = Rect::new(
        shadow.x as f64,
        shadow.y as f64,
        (shadow.x + shadow.width) as f64,
        (shadow.y + shadow.height) as f64,
    );
    RoundedRect::from_rect(rect, to_kurbo_radii(&shadow.radii))
}

fn to_kurbo_radii(radii: &CornerRadii) -> RoundedRectRadii {
    RoundedRectRadii::new(
        radii.top_left as f64,
        radii.top_right as f64,
        radii.bottom_right as f64,
        radii.bottom_left as f64,
    )
}

fn paint_shadow(scene: &mut Scene, shadow: &ShadowShape, transform: Affine, theme: &OverlayTheme) {
    let shape = shadow_shape(shadow);
    scene.fill(Fill::NonZero, transform, theme.shadow, None, &shape);
    let outline = KurboStroke::new(1.0);
    scene.stroke(&outline, transform, theme.shadow_outline, None, &shape);
}

fn paint_button(scene: &mut Scene, button: &AttachButton, theme: &OverlayTheme) {
    let cx = button.screen_x as f64;
    let cy = button.screen_y as f64;
    let r = BUTTON_RADIUS as f64;
    let disc = Circle::new((cx, cy), r);
    scene.fill(Fill::NonZero, Affine::IDENTITY, theme.button_fill(button.action), None, &disc);

    // "+" to attach, "×" to detach.
    let arm = r * 0.45;
    let glyph = KurboStroke {
        width: 2.0,
        start_cap: Cap::Round,
        end_cap: Cap::Round,
        ..Default::default()
    };
    let strokes = match button.action {
        ButtonAction::Attach => [
            Line::new((cx - arm, cy), (cx + arm, cy)),
            Line::new((cx, cy - arm), (cx, cy + arm)),
        ],
        ButtonAction::Detach => [
            Line::new((cx - arm, cy - arm), (cx + arm, cy + arm)),
            Line::new((cx - arm, cy + arm), (cx + arm, cy - arm)),
        ],
    };
    for line in &strokes {
        scene.stroke(&glyph, Affine::IDENTITY, theme.glyph, None, line);
    }
}
