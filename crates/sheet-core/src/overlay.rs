//! Overlay shapes painted beneath and above the widgets.
//!
//! Shadows are world-space backdrops with per-corner radii; attachment
//! buttons sit on the midpoint of a touching edge and carry both world and
//! screen positions.

use crate::camera::Camera;
use crate::corners::SquareCorners;
use crate::geometry::WidgetBounds;
use crate::id::WidgetId;
use crate::touch::{Orientation, TouchingEdge};
use serde::Serialize;
use std::collections::HashMap;

/// Hit radius of an attachment button, in screen pixels.
pub const BUTTON_RADIUS: f32 = 12.0;

/// Radius per corner, clockwise from top-left.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CornerRadii {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl CornerRadii {
    pub fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// `radius` on every rounded corner, 0 on square ones.
    pub fn from_corners(square: SquareCorners, radius: f32) -> Self {
        let pick = |is_square: bool| if is_square { 0.0 } else { radius };
        Self {
            top_left: pick(square.top_left),
            top_right: pick(square.top_right),
            bottom_right: pick(square.bottom_right),
            bottom_left: pick(square.bottom_left),
        }
    }
}

/// A backdrop drawn behind one widget, world units.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowShape {
    pub id: WidgetId,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub radii: CornerRadii,
}

/// What clicking a button does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ButtonAction {
    Attach,
    Detach,
}

impl ButtonAction {
    pub fn for_edge(edge: &TouchingEdge) -> Self {
        if edge.is_attached {
            ButtonAction::Detach
        } else {
            ButtonAction::Attach
        }
    }

    /// Icon name understood by the UI layer.
    pub fn icon(self) -> &'static str {
        match self {
            ButtonAction::Attach => "link",
            ButtonAction::Detach => "unlink",
        }
    }
}

/// A clickable control on a touching edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttachButton {
    pub widget1: WidgetId,
    pub widget2: WidgetId,
    /// Edge midpoint, world units.
    pub x: f32,
    pub y: f32,
    /// Edge midpoint after the camera transform.
    pub screen_x: f32,
    pub screen_y: f32,
    pub orientation: Orientation,
    pub action: ButtonAction,
}

impl AttachButton {
    pub fn from_edge(edge: &TouchingEdge, camera: &Camera) -> Self {
        let (screen_x, screen_y) = camera.world_to_screen(edge.x, edge.y);
        Self {
            widget1: edge.widget1,
            widget2: edge.widget2,
            x: edge.x,
            y: edge.y,
            screen_x,
            screen_y,
            orientation: edge.orientation,
            action: ButtonAction::for_edge(edge),
        }
    }

    /// Rebuild the edge the button was created from.
    pub fn edge(&self) -> TouchingEdge {
        TouchingEdge {
            widget1: self.widget1,
            widget2: self.widget2,
            x: self.x,
            y: self.y,
            orientation: self.orientation,
            is_attached: self.action == ButtonAction::Detach,
        }
    }
}

/// One shadow per sampled widget, in bounds order.
pub fn shadow_shapes(
    bounds: &[WidgetBounds],
    corners: &HashMap<WidgetId, SquareCorners>,
    radius: f32,
) -> Vec<ShadowShape> {
    bounds
        .iter()
        .map(|b| ShadowShape {
            id: b.id,
            x: b.left,
            y: b.top,
            width: b.width(),
            height: b.height(),
            radii: CornerRadii::from_corners(corners.get(&b.id).copied().unwrap_or_default(), radius),
        })
        .collect()
}

/// Buttons for every edge touching `hovered`. Overlapping edges each get
/// their own button.
pub fn attachment_buttons(
    edges: &[TouchingEdge],
    hovered: WidgetId,
    camera: &Camera,
) -> Vec<AttachButton> {
    edges
        .iter()
        .filter(|e| e.involves(hovered))
        .map(|e| AttachButton::from_edge(e, camera))
        .collect()
}
