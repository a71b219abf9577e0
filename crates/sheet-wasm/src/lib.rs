//! WASM bridge for Sheetsmith. Exposes the attachment engine to the
//! browser sheet builder.
//!
//! Compiled via `wasm-pack build --target web`. Widgets are rendered by the
//! page as DOM elements tagged `data-widget-id`; this bridge measures them,
//! tracks hover and drag, and paints shadows and attachment buttons onto an
//! overlay canvas. Structured data crosses the boundary as JSON strings.

mod render2d;

use sheet_core::camera::{Camera, Viewport};
use sheet_core::config::EngineConfig;
use sheet_core::id::WidgetId;
use sheet_core::layout::StackMode;
use sheet_core::model::Sheet;
use sheet_editor::commands::CommandStack;
use sheet_editor::interaction::PointerTarget;
use sheet_editor::sync::{SheetEngine, SheetMutation};
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Element};

/// Attribute the page puts on each widget's root element.
const WIDGET_ATTR: &str = "data-widget-id";
/// Attribute the page puts on DOM-rendered attachment buttons, if any.
const BUTTON_ATTR: &str = "data-attach-button";

/// The main WASM-facing overlay controller.
///
/// Holds the engine and undo stack. All interaction from the page goes
/// through this struct.
#[wasm_bindgen]
pub struct SheetCanvas {
    engine: SheetEngine,
    commands: CommandStack,
    width: f64,
    height: f64,
    /// `false` = light (default), `true` = dark.
    dark_mode: bool,
}

#[wasm_bindgen]
impl SheetCanvas {
    /// Create a controller for an overlay canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            engine: SheetEngine::new(Sheet::new(), EngineConfig::default()),
            commands: CommandStack::new(200),
            width,
            height,
            dark_mode: false,
        }
    }

    // ─── Data in / out ───────────────────────────────────────────────────

    /// Replace the engine configuration. Returns `false` on invalid JSON.
    pub fn set_config_json(&mut self, json: &str) -> bool {
        match EngineConfig::from_json(json) {
            Ok(config) => {
                self.engine.set_config(config);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// Load the active sheet's widget list. Clears undo history.
    /// Returns `false` on invalid JSON.
    pub fn set_widgets_json(&mut self, json: &str) -> bool {
        match Sheet::from_json(json) {
            Ok(sheet) => {
                let camera = self.engine.camera;
                self.engine = SheetEngine::new(sheet, self.engine.config);
                self.engine.set_camera(camera);
                // DOM sizes are read on the first settle after load.
                self.engine.request_measure();
                self.commands = CommandStack::new(200);
                true
            }
            Err(e) => {
                log::warn!("{e}");
                false
            }
        }
    }

    /// The widget list in the app's export format.
    pub fn get_widgets_json(&self) -> String {
        self.engine.sheet.to_json()
    }

    /// Apply a store mutation given as JSON (`{"op":"moveWidget",...}`).
    /// Returns `true` if the store changed.
    pub fn apply_mutation_json(&mut self, json: &str) -> bool {
        let mutation: SheetMutation = match serde_json::from_str(json) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("invalid mutation: {e}");
                return false;
            }
        };
        let description = match &mutation {
            SheetMutation::MoveWidget { .. } | SheetMutation::SetPosition { .. } => "move widget",
            SheetMutation::ResizeWidget { .. } => "resize widget",
            SheetMutation::AddWidget { .. } => "add widget",
            SheetMutation::RemoveWidget { .. } => "remove widget",
            SheetMutation::Attach { .. } => "attach widgets",
            SheetMutation::Detach { .. } => "detach widgets",
        };
        self.commands.execute(&mut self.engine, mutation, description)
    }

    // ─── Measurement ─────────────────────────────────────────────────────

    /// Read every widget element's rendered size from the DOM. Widgets with
    /// no element yet are forgotten for this pass. Returns how many were
    /// measured.
    pub fn measure_dom(&mut self) -> u32 {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return 0;
        };
        let ids: Vec<WidgetId> = self.engine.sheet.widgets.iter().map(|w| w.id).collect();
        let mut measured = 0;
        for id in ids {
            let selector = format!("[{WIDGET_ATTR}=\"{}\"]", css_escape(id.as_str()));
            match document.query_selector(&selector) {
                Ok(Some(element)) => {
                    let rect = element.get_bounding_client_rect();
                    self.engine
                        .report_size(id, rect.width() as f32, rect.height() as f32);
                    measured += 1;
                }
                _ => self.engine.forget_size(id),
            }
        }
        measured
    }

    /// Advance the settle timer. When it fires, measure the DOM and rebuild
    /// geometry. Call from `requestAnimationFrame` with its timestamp.
    /// Returns `true` if the overlay needs a repaint.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.engine.settle_due(now_ms) {
            self.measure_dom();
            self.engine.recompute();
            return true;
        }
        false
    }

    /// `tick` with the page clock, for hosts driving it from `setTimeout`.
    pub fn tick_now(&mut self) -> bool {
        self.tick(js_sys::Date::now())
    }

    /// Measure and rebuild immediately, skipping the settle delay.
    pub fn recompute(&mut self) {
        self.measure_dom();
        self.engine.recompute();
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    /// Pointer-over delegation: resolve the event target to a widget via
    /// `closest()`. Returns `true` if the hovered widget changed.
    pub fn pointer_over_element(&mut self, target: &Element) -> bool {
        self.engine.pointer_over(element_target(target))
    }

    /// Pointer moved over the overlay canvas at screen (sx, sy).
    /// Returns the hovered widget id, or an empty string.
    pub fn pointer_at(&mut self, sx: f32, sy: f32) -> String {
        self.engine.pointer_at(sx, sy);
        self.hovered_id()
    }

    pub fn hovered_id(&self) -> String {
        self.engine
            .interaction
            .hover
            .hovered()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    /// Click on the overlay canvas. Returns `true` if a button was hit.
    pub fn click_at(&mut self, sx: f32, sy: f32) -> bool {
        let buttons = self.engine.buttons();
        match sheet_render::hit::hit_test_button(&buttons, sx, sy) {
            Some(index) => self.commands.click(&mut self.engine, &buttons[index]),
            None => false,
        }
    }

    /// Click the n-th button of the last `buttons_json` list.
    pub fn click_button(&mut self, index: usize) -> bool {
        match self.engine.buttons().get(index) {
            Some(button) => self.commands.click(&mut self.engine, button),
            None => false,
        }
    }

    /// A widget drag started. Buttons and shadows hide until `end_drag`.
    /// Batches every move of the gesture into one undo step. A drag still
    /// open (lost pointerup) is closed first.
    pub fn begin_drag(&mut self, widget_id: &str) -> bool {
        let Some(id) = WidgetId::lookup(widget_id).filter(|id| self.engine.sheet.contains(*id))
        else {
            return false;
        };
        self.end_drag();
        self.commands.begin_batch(&self.engine, "drag widget");
        self.engine.begin_drag(id);
        true
    }

    pub fn end_drag(&mut self) {
        if self.engine.end_drag().is_some() {
            self.commands.end_batch(&self.engine);
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.engine.interaction.drag.is_active()
    }

    // ─── Camera ──────────────────────────────────────────────────────────

    pub fn set_camera(&mut self, pan_x: f32, pan_y: f32, scale: f32) {
        self.engine.set_camera(Camera::new(pan_x, pan_y, scale));
    }

    /// Camera as JSON `{"panX":..,"panY":..,"scale":..}`.
    pub fn camera_json(&self) -> String {
        let c = self.engine.camera;
        format!(
            r#"{{"panX":{},"panY":{},"scale":{}}}"#,
            c.pan_x, c.pan_y, c.scale
        )
    }

    pub fn pan_by(&mut self, dx: f32, dy: f32) {
        let mut camera = self.engine.camera;
        camera.pan_by(dx, dy);
        self.engine.set_camera(camera);
    }

    pub fn zoom_at(&mut self, sx: f32, sy: f32, factor: f32) -> bool {
        self.engine.zoom_at(sx, sy, factor)
    }

    /// Fit every measured widget into the canvas.
    pub fn fit_all(&mut self) -> bool {
        let viewport = Viewport {
            width: self.width as f32,
            height: self.height as f32,
        };
        self.engine.fit_all(viewport)
    }

    /// Auto-stack from the world origin. `mode_json` is e.g.
    /// `{"mode":"grid","cols":3,"gap":16}`. Returns widgets moved.
    pub fn auto_stack(&mut self, mode_json: &str, origin_x: f32, origin_y: f32) -> u32 {
        let mode: StackMode = match serde_json::from_str(mode_json) {
            Ok(m) => m,
            Err(e) => {
                log::warn!("invalid stack mode: {e}");
                return 0;
            }
        };
        self.commands.begin_batch(&self.engine, "auto-stack");
        let moved = self.engine.auto_stack((origin_x, origin_y), mode);
        self.commands.end_batch(&self.engine);
        moved as u32
    }

    // ─── Overlay ─────────────────────────────────────────────────────────

    pub fn buttons_json(&self) -> String {
        serde_json::to_string(&self.engine.buttons()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn shadows_json(&self) -> String {
        serde_json::to_string(&self.engine.shadows()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn edges_json(&self) -> String {
        serde_json::to_string(self.engine.edges()).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn lint_json(&self) -> String {
        serde_json::to_string(&self.engine.lint()).unwrap_or_else(|_| "[]".to_string())
    }

    /// Paint shadows and buttons to the overlay canvas.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let theme = if self.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        render2d::render_overlay(
            ctx,
            &self.engine.shadows(),
            &self.engine.buttons(),
            &self.engine.camera,
            self.width,
            self.height,
            &theme,
        );
    }

    pub fn set_theme(&mut self, is_dark: bool) {
        self.dark_mode = is_dark;
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    // ─── Undo ────────────────────────────────────────────────────────────

    pub fn undo(&mut self) -> bool {
        self.commands.undo(&mut self.engine).is_some()
    }

    pub fn redo(&mut self) -> bool {
        self.commands.redo(&mut self.engine).is_some()
    }
}

// ─── DOM helpers ─────────────────────────────────────────────────────────

fn element_target(target: &Element) -> PointerTarget {
    if let Ok(Some(_)) = target.closest(&format!("[{BUTTON_ATTR}]")) {
        return PointerTarget::Button;
    }
    let widget = target
        .closest(&format!("[{WIDGET_ATTR}]"))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute(WIDGET_ATTR))
        .and_then(|raw| WidgetId::lookup(&raw));
    match widget {
        Some(id) => PointerTarget::Widget(id),
        None => PointerTarget::Background,
    }
}

/// Escape a widget id for use inside a double-quoted attribute selector.
fn css_escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Sheetsmith WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no canvas needed) ─────────────────────────────

/// Validate a sheet export. Returns JSON: `{"ok":true,"diagnostics":[...]}`
/// or `{"ok":false,"error":"..."}`. Diagnostics cover attachment data only;
/// no geometry is measured.
#[wasm_bindgen]
pub fn validate_sheet(json: &str) -> String {
    match Sheet::from_json(json) {
        Ok(sheet) => {
            let diags = sheet_core::lint::lint_sheet(&sheet, &[], &Default::default());
            match serde_json::to_string(&diags) {
                Ok(d) => format!(r#"{{"ok":true,"diagnostics":{d}}}"#),
                Err(e) => format!(r#"{{"ok":false,"error":"Serialization error: {e}"}}"#),
            }
        }
        Err(e) => {
            let escaped = e.replace('\\', "\\\\").replace('"', "\\\"");
            format!(r#"{{"ok":false,"error":"{escaped}"}}"#)
        }
    }
}
