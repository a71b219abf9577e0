//! Hit testing: point → widget or button lookup.
//!
//! Widgets paint in sheet order, so the last widget containing a point is the
//! one on top.

use sheet_core::geometry::WidgetBounds;
use sheet_core::id::WidgetId;
use sheet_core::overlay::{AttachButton, BUTTON_RADIUS};

/// Find the topmost widget at world position (px, py).
/// Returns `None` on the background.
pub fn hit_test(bounds: &[WidgetBounds], px: f32, py: f32) -> Option<WidgetId> {
    bounds.iter().rev().find(|b| b.contains(px, py)).map(|b| b.id)
}

/// Find the attachment button under screen position (sx, sy).
///
/// Buttons are circles of `BUTTON_RADIUS` around their screen midpoint. When
/// buttons overlap the last one wins, matching paint order.
pub fn hit_test_button(buttons: &[AttachButton], sx: f32, sy: f32) -> Option<usize> {
    let r2 = BUTTON_RADIUS * BUTTON_RADIUS;
    buttons.iter().rposition(|b| {
        let dx = sx - b.screen_x;
        let dy = sy - b.screen_y;
        dx * dx + dy * dy <= r2
    })
}

/// Every widget intersecting the world-space rectangle. Used for marquee
/// selection before an auto-stack.
pub fn hit_test_rect(bounds: &[WidgetBounds], rx: f32, ry: f32, rw: f32, rh: f32) -> Vec<WidgetId> {
    bounds
        .iter()
        .filter(|b| b.left < rx + rw && b.right > rx && b.top < ry + rh && b.bottom > ry)
        .map(|b| b.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sheet_core::camera::Camera;
    use sheet_core::touch::{Orientation, TouchingEdge};
    use smallvec::SmallVec;

    fn bounds(name: &str, x: f32, y: f32, w: f32, h: f32) -> WidgetBounds {
        WidgetBounds {
            id: WidgetId::intern(name),
            group_id: None,
            attached_to: SmallVec::new(),
            left: x,
            right: x + w,
            top: y,
            bottom: y + h,
        }
    }

    #[test]
    fn topmost_widget_wins() {
        let all = [
            bounds("h_under", 0.0, 0.0, 100.0, 100.0),
            bounds("h_over", 50.0, 50.0, 100.0, 100.0),
        ];
        assert_eq!(hit_test(&all, 75.0, 75.0), Some(WidgetId::intern("h_over")));
        assert_eq!(hit_test(&all, 10.0, 10.0), Some(WidgetId::intern("h_under")));
        assert_eq!(hit_test(&all, 300.0, 300.0), None);
    }

    #[test]
    fn button_hit_uses_screen_radius() {
        let edge = TouchingEdge {
            widget1: WidgetId::intern("h_b1"),
            widget2: WidgetId::intern("h_b2"),
            x: 100.0,
            y: 50.0,
            orientation: Orientation::Vertical,
            is_attached: false,
        };
        let button = AttachButton::from_edge(&edge, &Camera::new(0.0, 0.0, 2.0));
        let buttons = [button];
        assert_eq!(hit_test_button(&buttons, 205.0, 100.0), Some(0));
        // World position is not screen position at scale 2.
        assert_eq!(hit_test_button(&buttons, 100.0, 50.0), None);
    }

    #[test]
    fn marquee_collects_intersections() {
        let all = [
            bounds("h_m1", 0.0, 0.0, 10.0, 10.0),
            bounds("h_m2", 20.0, 0.0, 10.0, 10.0),
            bounds("h_m3", 100.0, 100.0, 10.0, 10.0),
        ];
        let hits = hit_test_rect(&all, 5.0, 5.0, 20.0, 20.0);
        assert_eq!(hits, vec![WidgetId::intern("h_m1"), WidgetId::intern("h_m2")]);
    }
}
