//! Pointer hover and drag state for the overlay layer.
//!
//! Buttons are shown only for edges touching the hovered widget. Hover is
//! sticky while the pointer is over a button, so moving onto a button to
//! click it keeps the widget it belongs to. Both buttons and shadows are
//! hidden for the whole duration of a drag.

use sheet_core::camera::Camera;
use sheet_core::corners::SquareCorners;
use sheet_core::geometry::WidgetBounds;
use sheet_core::id::WidgetId;
use sheet_core::overlay::{AttachButton, ShadowShape, attachment_buttons, shadow_shapes};
use sheet_core::touch::TouchingEdge;
use std::collections::HashMap;

/// What the pointer is currently over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Widget(WidgetId),
    /// An attachment button; keeps the current hover.
    Button,
    Background,
}

#[derive(Debug, Clone, Default)]
pub struct HoverState {
    hovered: Option<WidgetId>,
}

impl HoverState {
    /// Update hover from a pointer-over event. Returns `true` if the hovered
    /// widget changed.
    pub fn pointer_over(&mut self, target: PointerTarget) -> bool {
        let next = match target {
            PointerTarget::Widget(id) => Some(id),
            PointerTarget::Button => self.hovered,
            PointerTarget::Background => None,
        };
        let changed = next != self.hovered;
        self.hovered = next;
        changed
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered
    }

    /// Drop the hover if it points at `id` (e.g. the widget was removed).
    pub fn forget(&mut self, id: WidgetId) {
        if self.hovered == Some(id) {
            self.hovered = None;
        }
    }
}

/// An explicit drag gesture, started and ended by the caller.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    widget: Option<WidgetId>,
}

impl DragSession {
    pub fn begin(&mut self, id: WidgetId) {
        if let Some(previous) = self.widget.replace(id) {
            log::debug!("drag of {previous:?} superseded by {id:?}");
        }
    }

    /// End the gesture, returning the widget that was being dragged.
    pub fn end(&mut self) -> Option<WidgetId> {
        self.widget.take()
    }

    pub fn is_active(&self) -> bool {
        self.widget.is_some()
    }

    pub fn widget(&self) -> Option<WidgetId> {
        self.widget
    }
}

/// Hover + drag, and the overlay lists derived from them.
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    pub hover: HoverState,
    pub drag: DragSession,
}

impl InteractionState {
    /// Buttons for the hovered widget's edges; empty while dragging.
    pub fn visible_buttons(&self, edges: &[TouchingEdge], camera: &Camera) -> Vec<AttachButton> {
        if self.drag.is_active() {
            return Vec::new();
        }
        match self.hover.hovered() {
            Some(id) => attachment_buttons(edges, id, camera),
            None => Vec::new(),
        }
    }

    /// One shadow per sampled widget; empty while dragging.
    pub fn visible_shadows(
        &self,
        bounds: &[WidgetBounds],
        corners: &HashMap<WidgetId, SquareCorners>,
        radius: f32,
    ) -> Vec<ShadowShape> {
        if self.drag.is_active() {
            return Vec::new();
        }
        shadow_shapes(bounds, corners, radius)
    }
}
