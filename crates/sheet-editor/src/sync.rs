//! Sheet engine: widget store ↔ geometry ↔ overlay.
//!
//! The engine is the glue between the widget store and the canvas overlay:
//!
//! - **Store → Geometry**: mutations change widget positions, sizes and
//!   membership. Geometry is *not* re-measured immediately; a change to the
//!   layout fingerprint arms the settle timer and the next `tick` after the
//!   delay samples bounds, detects touching edges and resolves corners.
//!
//! - **Overlay → Store**: clicking an attachment button turns into an
//!   `Attach` or `Detach` mutation. These refresh the derived views
//!   (`isAttached`, square corners) right away from the cached bounds, since
//!   no geometry moved.

use crate::interaction::{InteractionState, PointerTarget};
use crate::settle::SettleTimer;
use sheet_core::attach::{AttachOutcome, DetachOutcome, attach_pair, detach_pair, detach_target};
use sheet_core::camera::{Camera, Viewport};
use sheet_core::config::EngineConfig;
use sheet_core::corners::{SquareCorners, resolve_corners};
use sheet_core::geometry::{
    MeasuredSizes, WidgetBounds, layout_fingerprint, refresh_attachments, sample_bounds,
};
use sheet_core::id::WidgetId;
use sheet_core::layout::{StackMode, auto_stack};
use sheet_core::lint::{LintDiagnostic, lint_sheet};
use sheet_core::model::{Sheet, Widget};
use sheet_core::overlay::{AttachButton, ButtonAction, ShadowShape};
use sheet_core::touch::{TouchingEdge, find_touching_edges};
use serde::{Deserialize, Serialize};
use sheet_render::hit::{hit_test, hit_test_button};
use std::collections::HashMap;

/// The engine holds the authoritative sheet and the geometry derived from it.
pub struct SheetEngine {
    /// The current widget store (single source of truth).
    pub sheet: Sheet,

    pub config: EngineConfig,
    pub camera: Camera,

    /// Rendered sizes, converted to world units at the scale they were
    /// measured at.
    sizes: MeasuredSizes,

    /// Sampled at the last settle. May lag the store during the settle window.
    bounds: Vec<WidgetBounds>,
    edges: Vec<TouchingEdge>,
    corners: HashMap<WidgetId, SquareCorners>,

    settle: SettleTimer,
    /// Fingerprint seen by the last `observe`.
    observed: String,
    /// A size report arrived since the last measurement.
    sizes_dirty: bool,

    pub interaction: InteractionState,
}

/// What a click on an attachment button did.
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    Attached(AttachOutcome),
    Detached(DetachOutcome),
}

impl SheetEngine {
    /// Create an engine and measure the sheet immediately.
    pub fn new(sheet: Sheet, config: EngineConfig) -> Self {
        let mut engine = Self {
            sheet,
            config,
            camera: Camera::default(),
            sizes: MeasuredSizes::new(),
            bounds: Vec::new(),
            edges: Vec::new(),
            corners: HashMap::new(),
            settle: SettleTimer::new(config.settle_delay_ms),
            observed: String::new(),
            sizes_dirty: false,
            interaction: InteractionState::default(),
        };
        engine.recompute();
        engine
    }

    /// Create an engine from the app's JSON export.
    pub fn from_json(json: &str, config: EngineConfig) -> Result<Self, String> {
        let sheet = Sheet::from_json(json)?;
        Ok(Self::new(sheet, config))
    }

    pub fn set_config(&mut self, config: EngineConfig) {
        self.config = config;
        self.settle.set_delay(config.settle_delay_ms);
        self.rederive();
    }

    // ─── Store mutations ─────────────────────────────────────────────────

    /// Apply a store mutation. Returns `true` if the store changed.
    pub fn apply_mutation(&mut self, mutation: SheetMutation) -> bool {
        match mutation {
            SheetMutation::MoveWidget { id, dx, dy } => self.move_widget(id, dx, dy),
            SheetMutation::SetPosition { id, x, y } => match self.sheet.get_by_id_mut(id) {
                Some(widget) if widget.x != x || widget.y != y => {
                    widget.x = x;
                    widget.y = y;
                    true
                }
                _ => false,
            },
            SheetMutation::ResizeWidget { id, width, height } => {
                match self.sheet.get_by_id_mut(id) {
                    Some(widget) => {
                        widget.w = Some(width);
                        widget.h = Some(height);
                        // An owned size supersedes the last measurement.
                        self.sizes.remove(id);
                        self.sizes_dirty = true;
                        true
                    }
                    None => false,
                }
            }
            SheetMutation::AddWidget { widget } => {
                self.sheet.add_widget(*widget);
                true
            }
            SheetMutation::RemoveWidget { id } => {
                if self.sheet.remove_widget(id).is_none() {
                    return false;
                }
                self.sizes.remove(id);
                self.interaction.hover.forget(id);
                if self.interaction.drag.widget() == Some(id) {
                    self.interaction.drag.end();
                }
                self.rederive();
                true
            }
            SheetMutation::Attach { a, b } => !self.attach(a, b).recorded.is_empty(),
            SheetMutation::Detach { detaching, other } => {
                let outcome = self.detach(detaching, other);
                outcome.removed || !outcome.regrouped.is_empty()
            }
        }
    }

    /// Move a widget and every other member of its group by the same delta.
    fn move_widget(&mut self, id: WidgetId, dx: f32, dy: f32) -> bool {
        if !self.sheet.contains(id) || (dx == 0.0 && dy == 0.0) {
            return false;
        }
        let movers = match self.sheet.group_of(id) {
            Some(group) => self.sheet.members_of(group),
            None => vec![id],
        };
        for mover in &movers {
            if let Some(widget) = self.sheet.get_by_id_mut(*mover) {
                widget.x += dx;
                widget.y += dy;
            }
        }
        log::trace!("moved {} widgets with {id:?} by ({dx}, {dy})", movers.len());
        true
    }

    /// Attach `a` and `b` using the cached geometry.
    pub fn attach(&mut self, a: WidgetId, b: WidgetId) -> AttachOutcome {
        let outcome = attach_pair(
            &mut self.sheet,
            &self.bounds,
            &self.edges,
            a,
            b,
            self.config.group_policy,
        );
        self.rederive();
        outcome
    }

    pub fn detach(&mut self, detaching: WidgetId, other: WidgetId) -> DetachOutcome {
        let outcome = detach_pair(&mut self.sheet, detaching, other, self.config.group_policy);
        self.rederive();
        outcome
    }

    /// The mutation a click on `button` stands for. For a detach, the
    /// hovered endpoint lets go; without one it is `widget1`.
    pub fn button_mutation(&self, button: &AttachButton) -> SheetMutation {
        match button.action {
            ButtonAction::Attach => SheetMutation::Attach {
                a: button.widget1,
                b: button.widget2,
            },
            ButtonAction::Detach => {
                let (detaching, other) =
                    detach_target(&button.edge(), self.interaction.hover.hovered());
                SheetMutation::Detach { detaching, other }
            }
        }
    }

    pub fn click_button(&mut self, button: &AttachButton) -> ClickOutcome {
        match button.action {
            ButtonAction::Attach => {
                ClickOutcome::Attached(self.attach(button.widget1, button.widget2))
            }
            ButtonAction::Detach => {
                let (detaching, other) =
                    detach_target(&button.edge(), self.interaction.hover.hovered());
                ClickOutcome::Detached(self.detach(detaching, other))
            }
        }
    }

    // ─── Measurement ─────────────────────────────────────────────────────

    /// Record a widget's rendered size in screen pixels at the current zoom.
    pub fn report_size(&mut self, id: WidgetId, width_px: f32, height_px: f32) {
        let scale = self.camera.scale;
        if !(scale.is_finite() && scale > 0.0) {
            log::warn!("ignoring size report for {id:?} at zoom scale {scale}");
            return;
        }
        self.sizes.set(id, width_px / scale, height_px / scale);
        self.sizes_dirty = true;
    }

    pub fn forget_size(&mut self, id: WidgetId) {
        self.sizes.remove(id);
        self.sizes_dirty = true;
    }

    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    /// Zoom around a screen anchor with the configured clamps.
    pub fn zoom_at(&mut self, anchor_x: f32, anchor_y: f32, factor: f32) -> bool {
        self.camera
            .zoom_at(anchor_x, anchor_y, factor, &self.config.camera)
    }

    /// Arm the settle timer if the layout fingerprint or a measured size
    /// changed since the last call. Returns `true` if the timer was armed.
    pub fn observe(&mut self, now_ms: f64) -> bool {
        let fingerprint = layout_fingerprint(&self.sheet, self.camera.scale);
        if fingerprint == self.observed && !self.sizes_dirty {
            return false;
        }
        self.observed = fingerprint;
        self.sizes_dirty = false;
        self.settle.schedule(now_ms);
        true
    }

    /// Observe, then report whether the settle delay has elapsed. Hosts that
    /// measure on demand (the DOM bridge) read sizes before `recompute`.
    pub fn settle_due(&mut self, now_ms: f64) -> bool {
        self.observe(now_ms);
        self.settle.poll(now_ms)
    }

    /// Observe, then re-measure if the settle delay has elapsed.
    /// Returns `true` if geometry was recomputed.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if self.settle_due(now_ms) {
            self.recompute();
            return true;
        }
        false
    }

    /// Force the next `observe` to arm the settle timer, e.g. after loading
    /// a sheet whose sizes the host has not measured yet.
    pub fn request_measure(&mut self) {
        self.sizes_dirty = true;
    }

    pub fn is_settling(&self) -> bool {
        self.settle.is_pending()
    }

    /// Sample bounds now and rebuild every derived view.
    pub fn recompute(&mut self) {
        // Stored sizes are already world units.
        self.bounds = sample_bounds(&self.sheet, &self.sizes, 1.0);
        self.observed = layout_fingerprint(&self.sheet, self.camera.scale);
        self.sizes_dirty = false;
        self.settle.cancel();
        self.derive();
        log::debug!(
            "measured {} of {} widgets: {} edges",
            self.bounds.len(),
            self.sheet.len(),
            self.edges.len()
        );
    }

    /// Refresh attachment data on the cached bounds, then edges and corners.
    fn rederive(&mut self) {
        refresh_attachments(&self.sheet, &mut self.bounds);
        self.derive();
    }

    fn derive(&mut self) {
        self.edges = find_touching_edges(&self.bounds, &self.config.touch);
        self.corners = resolve_corners(&self.bounds, &self.config.touch);
    }

    // ─── Pointer ─────────────────────────────────────────────────────────

    pub fn pointer_over(&mut self, target: PointerTarget) -> bool {
        self.interaction.hover.pointer_over(target)
    }

    /// Resolve a screen position to a pointer target (buttons first, then
    /// the topmost widget) and update hover.
    pub fn pointer_at(&mut self, sx: f32, sy: f32) -> PointerTarget {
        let target = if hit_test_button(&self.buttons(), sx, sy).is_some() {
            PointerTarget::Button
        } else {
            let (wx, wy) = self.camera.screen_to_world(sx, sy);
            match hit_test(&self.bounds, wx, wy) {
                Some(id) => PointerTarget::Widget(id),
                None => PointerTarget::Background,
            }
        };
        self.interaction.hover.pointer_over(target);
        target
    }

    /// Click at a screen position. Returns `None` if no button is there.
    pub fn click_at(&mut self, sx: f32, sy: f32) -> Option<ClickOutcome> {
        let buttons = self.buttons();
        let index = hit_test_button(&buttons, sx, sy)?;
        let button = buttons.get(index)?.clone();
        Some(self.click_button(&button))
    }

    pub fn begin_drag(&mut self, id: WidgetId) {
        self.interaction.drag.begin(id);
    }

    pub fn end_drag(&mut self) -> Option<WidgetId> {
        self.interaction.drag.end()
    }

    // ─── Layout helpers ──────────────────────────────────────────────────

    /// Fit the camera to every measured widget. No-op with nothing measured.
    pub fn fit_all(&mut self, viewport: Viewport) -> bool {
        let rects: Vec<_> = self.bounds.iter().map(WidgetBounds::rect).collect();
        self.camera.fit_to(&rects, viewport, &self.config.camera)
    }

    /// Re-arrange every measured widget from `origin`. Returns the number of
    /// widgets that moved.
    pub fn auto_stack(&mut self, origin: (f32, f32), mode: StackMode) -> usize {
        let placements = auto_stack(&self.sheet, &self.bounds, origin, mode);
        placements
            .into_iter()
            .filter(|p| {
                self.apply_mutation(SheetMutation::SetPosition {
                    id: p.id,
                    x: p.x,
                    y: p.y,
                })
            })
            .count()
    }

    // ─── Undo support ────────────────────────────────────────────────────

    pub fn snapshot(&self) -> Vec<Widget> {
        self.sheet.widgets.clone()
    }

    /// Replace the whole widget list (undo/redo, import).
    pub fn restore(&mut self, widgets: Vec<Widget>) {
        self.sheet = Sheet::from_widgets(widgets);
        if let Some(id) = self.interaction.hover.hovered()
            && !self.sheet.contains(id)
        {
            self.interaction.hover.forget(id);
        }
        self.rederive();
    }

    // ─── Queries ─────────────────────────────────────────────────────────

    pub fn bounds(&self) -> &[WidgetBounds] {
        &self.bounds
    }

    pub fn edges(&self) -> &[TouchingEdge] {
        &self.edges
    }

    pub fn corners(&self) -> &HashMap<WidgetId, SquareCorners> {
        &self.corners
    }

    pub fn buttons(&self) -> Vec<AttachButton> {
        self.interaction.visible_buttons(&self.edges, &self.camera)
    }

    pub fn shadows(&self) -> Vec<ShadowShape> {
        self.interaction
            .visible_shadows(&self.bounds, &self.corners, self.config.corner_radius)
    }

    pub fn lint(&self) -> Vec<LintDiagnostic> {
        lint_sheet(&self.sheet, &self.bounds, &self.config.touch)
    }
}

/// A mutation of the widget store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum SheetMutation {
    /// Drag by a delta; the widget's whole group moves with it.
    MoveWidget { id: WidgetId, dx: f32, dy: f32 },
    /// Place one widget, ignoring its group.
    SetPosition { id: WidgetId, x: f32, y: f32 },
    /// Give a widget an owned size in world units.
    ResizeWidget {
        id: WidgetId,
        width: f32,
        height: f32,
    },
    AddWidget { widget: Box<Widget> },
    RemoveWidget { id: WidgetId },
    Attach { a: WidgetId, b: WidgetId },
    Detach { detaching: WidgetId, other: WidgetId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheet_core::config::GroupPolicy;
    use sheet_core::id::GroupId;

    fn square(id: &str, x: f32, y: f32) -> Widget {
        Widget::new(WidgetId::intern(id), x, y).with_size(100.0, 100.0)
    }

    fn engine(widgets: Vec<Widget>) -> SheetEngine {
        SheetEngine::new(Sheet::from_widgets(widgets), EngineConfig::default())
    }

    #[test]
    fn new_engine_is_measured() {
        let e = engine(vec![square("s_a", 0.0, 0.0), square("s_b", 100.0, 0.0)]);
        assert_eq!(e.bounds().len(), 2);
        assert_eq!(e.edges().len(), 1);
        assert!(!e.is_settling());
    }

    #[test]
    fn move_drags_the_whole_group() {
        let g = GroupId::intern("s_move_g");
        let mut a = square("s_move_a", 0.0, 0.0);
        let mut b = square("s_move_b", 100.0, 0.0);
        let c = square("s_move_c", 500.0, 0.0);
        a.group_id = Some(g);
        b.group_id = Some(g);
        a.attached_to.push(b.id);
        let mut e = engine(vec![a, b, c]);

        assert!(e.apply_mutation(SheetMutation::MoveWidget {
            id: WidgetId::intern("s_move_b"),
            dx: 10.0,
            dy: 5.0,
        }));
        let pos = |name: &str| {
            let w = e.sheet.get_by_id(WidgetId::intern(name)).unwrap();
            (w.x, w.y)
        };
        assert_eq!(pos("s_move_a"), (10.0, 5.0));
        assert_eq!(pos("s_move_b"), (110.0, 5.0));
        assert_eq!(pos("s_move_c"), (500.0, 0.0));
    }

    #[test]
    fn geometry_waits_for_settle() {
        let mut e = engine(vec![square("s_set_a", 0.0, 0.0), square("s_set_b", 300.0, 0.0)]);
        assert!(e.edges().is_empty());

        e.apply_mutation(SheetMutation::SetPosition {
            id: WidgetId::intern("s_set_b"),
            x: 100.0,
            y: 0.0,
        });
        assert!(!e.tick(1000.0));
        assert!(e.is_settling());
        assert!(e.edges().is_empty());

        assert!(e.tick(1000.0 + e.config.settle_delay_ms));
        assert_eq!(e.edges().len(), 1);
    }

    #[test]
    fn later_change_restarts_settle_window() {
        let mut e = engine(vec![square("s_rs_a", 0.0, 0.0)]);
        let id = WidgetId::intern("s_rs_a");
        e.apply_mutation(SheetMutation::MoveWidget { id, dx: 1.0, dy: 0.0 });
        assert!(e.observe(0.0));
        e.apply_mutation(SheetMutation::MoveWidget { id, dx: 1.0, dy: 0.0 });
        assert!(!e.tick(50.0));
        // 75ms after the first change but only 25ms after the second.
        assert!(!e.tick(75.0));
        assert!(e.tick(125.0));
    }

    #[test]
    fn attach_click_refreshes_derived_views_immediately() {
        let mut e = engine(vec![square("s_click_a", 0.0, 0.0), square("s_click_b", 100.0, 0.0)]);
        e.pointer_over(PointerTarget::Widget(WidgetId::intern("s_click_a")));
        let buttons = e.buttons();
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].action, ButtonAction::Attach);

        let outcome = e.click_button(&buttons[0]);
        assert!(matches!(outcome, ClickOutcome::Attached(ref o) if o.recorded.len() == 1));
        assert!(e.edges()[0].is_attached);
        assert!(e.corners()[&WidgetId::intern("s_click_a")].top_right);
        assert_eq!(e.buttons()[0].action, ButtonAction::Detach);
    }

    #[test]
    fn detach_lets_go_of_the_hovered_widget() {
        let g = GroupId::intern("s_hover_g");
        let mut a = square("s_hover_a", 0.0, 0.0);
        let mut b = square("s_hover_b", 100.0, 0.0);
        a.group_id = Some(g);
        b.group_id = Some(g);
        a.attached_to.push(b.id);
        let mut e = engine(vec![a, b]);

        let b_id = WidgetId::intern("s_hover_b");
        e.pointer_over(PointerTarget::Widget(b_id));
        e.pointer_over(PointerTarget::Button);
        let button = e.buttons()[0].clone();
        match e.click_button(&button) {
            ClickOutcome::Detached(outcome) => {
                assert_eq!(outcome.detaching, b_id);
                assert!(outcome.removed);
            }
            other => panic!("expected detach, got {other:?}"),
        }
        assert!(e.sheet.widgets.iter().all(|w| w.attached_to.is_empty()));
    }

    #[test]
    fn removing_widget_clears_its_edges_and_hover() {
        let mut e = engine(vec![square("s_rm_a", 0.0, 0.0), square("s_rm_b", 100.0, 0.0)]);
        let b = WidgetId::intern("s_rm_b");
        e.pointer_over(PointerTarget::Widget(b));
        assert!(e.apply_mutation(SheetMutation::RemoveWidget { id: b }));
        assert!(e.edges().is_empty());
        assert_eq!(e.interaction.hover.hovered(), None);
        assert!(!e.apply_mutation(SheetMutation::RemoveWidget { id: b }));
    }

    #[test]
    fn measured_sizes_are_normalised_by_zoom() {
        let a = Widget::new(WidgetId::intern("s_zoom_a"), 0.0, 0.0);
        let b = Widget::new(WidgetId::intern("s_zoom_b"), 100.0, 0.0);
        let mut e = engine(vec![a, b]);
        assert!(e.bounds().is_empty());

        e.set_camera(Camera::new(0.0, 0.0, 2.0));
        e.report_size(WidgetId::intern("s_zoom_a"), 200.0, 200.0);
        e.report_size(WidgetId::intern("s_zoom_b"), 200.0, 200.0);
        e.tick(0.0);
        assert!(e.tick(e.config.settle_delay_ms));
        assert_eq!(e.edges().len(), 1);
        assert_eq!(e.bounds()[0].right, 100.0);
    }

    #[test]
    fn zooming_after_measurement_keeps_world_bounds() {
        let a = Widget::new(WidgetId::intern("s_zk_a"), 0.0, 0.0);
        let b = Widget::new(WidgetId::intern("s_zk_b"), 100.0, 0.0);
        let mut e = engine(vec![a, b]);
        e.set_camera(Camera::new(0.0, 0.0, 2.0));
        e.report_size(WidgetId::intern("s_zk_a"), 200.0, 200.0);
        e.report_size(WidgetId::intern("s_zk_b"), 200.0, 200.0);
        e.tick(0.0);
        assert!(e.tick(e.config.settle_delay_ms));
        let before = e.edges().to_vec();
        assert_eq!(before.len(), 1);

        assert!(e.zoom_at(0.0, 0.0, 0.5));
        assert_eq!(e.camera.scale, 1.0);
        e.tick(1000.0);
        assert!(e.tick(1000.0 + e.config.settle_delay_ms));
        assert_eq!(e.bounds()[0].right, 100.0);
        assert_eq!(e.edges(), &before[..]);
    }

    #[test]
    fn request_measure_arms_settle_without_layout_change() {
        let a = Widget::new(WidgetId::intern("s_rq_a"), 0.0, 0.0);
        let mut e = engine(vec![a]);
        assert!(!e.settle_due(0.0));
        assert!(!e.is_settling());

        e.request_measure();
        assert!(!e.settle_due(10.0));
        assert!(e.is_settling());
        assert!(e.settle_due(10.0 + e.config.settle_delay_ms));
    }

    #[test]
    fn detach_reports_stale_group_cleanup_as_change() {
        let g = GroupId::intern("s_stale_g");
        let mut a = square("s_stale_a", 0.0, 0.0);
        let mut b = square("s_stale_b", 100.0, 0.0);
        a.group_id = Some(g);
        b.group_id = Some(g);
        let mut e = engine(vec![a, b]);

        let changed = e.apply_mutation(SheetMutation::Detach {
            detaching: WidgetId::intern("s_stale_a"),
            other: WidgetId::intern("s_stale_b"),
        });
        assert!(changed);
        assert_eq!(e.sheet.group_of(WidgetId::intern("s_stale_a")), None);
        assert!(!e.apply_mutation(SheetMutation::Detach {
            detaching: WidgetId::intern("s_stale_a"),
            other: WidgetId::intern("s_stale_b"),
        }));
    }

    #[test]
    fn connected_components_policy_merges_groups() {
        let config = EngineConfig {
            group_policy: GroupPolicy::ConnectedComponents,
            ..EngineConfig::default()
        };
        let mut a = square("s_cc_a", 0.0, 0.0);
        let mut b = square("s_cc_b", 100.0, 0.0);
        a.group_id = Some(GroupId::intern("s_cc_g1"));
        b.group_id = Some(GroupId::intern("s_cc_g2"));
        let mut e = SheetEngine::new(Sheet::from_widgets(vec![a, b]), config);
        e.attach(WidgetId::intern("s_cc_a"), WidgetId::intern("s_cc_b"));
        assert_eq!(
            e.sheet.group_of(WidgetId::intern("s_cc_a")),
            e.sheet.group_of(WidgetId::intern("s_cc_b"))
        );
    }

    #[test]
    fn auto_stack_moves_widgets_into_a_column() {
        let mut e = engine(vec![square("s_st_a", 0.0, 0.0), square("s_st_b", 400.0, 400.0)]);
        let moved = e.auto_stack((0.0, 0.0), StackMode::Column { gap: 0.0 });
        assert_eq!(moved, 1);
        let b = e.sheet.get_by_id(WidgetId::intern("s_st_b")).unwrap();
        assert_eq!((b.x, b.y), (0.0, 100.0));
    }

    #[test]
    fn fit_all_frames_measured_widgets() {
        let mut e = engine(vec![square("s_fit_a", 0.0, 0.0), square("s_fit_b", 300.0, 200.0)]);
        let viewport = Viewport {
            width: 880.0,
            height: 680.0,
        };
        assert!(e.fit_all(viewport));
        assert!((e.camera.scale - 2.0).abs() < 1e-3);
    }
}
