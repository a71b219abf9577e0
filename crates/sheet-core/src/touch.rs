//! Edge-touch detection.
//!
//! Two widgets touch when one of their facing edge pairs is within
//! `edge_tolerance` and the span they share along the perpendicular axis is
//! at least `overlap_min`. The four facing pairs are checked independently,
//! so a single widget pair may report more than one edge in degenerate
//! overlaps. Nothing is de-duplicated.

use crate::config::TouchConfig;
use crate::geometry::WidgetBounds;
use crate::id::WidgetId;
use serde::Serialize;
use smallvec::SmallVec;

/// Orientation of the seam between two touching widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Orientation {
    /// Widgets stacked vertically: one's bottom meets the other's top.
    Horizontal,
    /// Widgets side by side: one's right meets the other's left.
    Vertical,
}

/// Which side of a widget faces its neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

/// A seam between two touching widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchingEdge {
    pub widget1: WidgetId,
    pub widget2: WidgetId,
    /// Midpoint of the seam, world units.
    pub x: f32,
    pub y: f32,
    pub orientation: Orientation,
    pub is_attached: bool,
}

impl TouchingEdge {
    /// Whether `id` is one of the two endpoints.
    pub fn involves(&self, id: WidgetId) -> bool {
        self.widget1 == id || self.widget2 == id
    }

    /// The endpoint that is not `id`, if `id` is an endpoint.
    pub fn other(&self, id: WidgetId) -> Option<WidgetId> {
        if self.widget1 == id {
            Some(self.widget2)
        } else if self.widget2 == id {
            Some(self.widget1)
        } else {
            None
        }
    }
}

/// Symmetric attachment check on sampled bounds.
pub fn is_attached(a: &WidgetBounds, b: &WidgetBounds) -> bool {
    a.attached_to.contains(&b.id) || b.attached_to.contains(&a.id)
}

/// Whether two coordinates are within tolerance.
pub fn near(a: f32, b: f32, tolerance: f32) -> bool {
    (a - b).abs() <= tolerance
}

/// Length of the shared span of `[a0, a1]` and `[b0, b1]` (negative if disjoint).
fn overlap(a0: f32, a1: f32, b0: f32, b1: f32) -> f32 {
    a1.min(b1) - a0.max(b0)
}

/// Sides of `a` on which `b` sits within tolerance, ignoring overlap.
pub fn facing_sides(a: &WidgetBounds, b: &WidgetBounds, tolerance: f32) -> SmallVec<[Side; 2]> {
    let mut sides = SmallVec::new();
    if near(a.right, b.left, tolerance) {
        sides.push(Side::Right);
    }
    if near(a.left, b.right, tolerance) {
        sides.push(Side::Left);
    }
    if near(a.bottom, b.top, tolerance) {
        sides.push(Side::Bottom);
    }
    if near(a.top, b.bottom, tolerance) {
        sides.push(Side::Top);
    }
    sides
}

/// Every touching seam between `w1` and `w2`, from `w1`'s point of view.
pub fn touching_edges_between(
    w1: &WidgetBounds,
    w2: &WidgetBounds,
    config: &TouchConfig,
) -> SmallVec<[TouchingEdge; 2]> {
    let mut out = SmallVec::new();
    let attached = is_attached(w1, w2);
    let vertical_overlap = overlap(w1.top, w1.bottom, w2.top, w2.bottom);
    let horizontal_overlap = overlap(w1.left, w1.right, w2.left, w2.right);
    let mid_y = (w1.top.max(w2.top) + w1.bottom.min(w2.bottom)) / 2.0;
    let mid_x = (w1.left.max(w2.left) + w1.right.min(w2.right)) / 2.0;

    let mut push = |x: f32, y: f32, orientation: Orientation| {
        out.push(TouchingEdge {
            widget1: w1.id,
            widget2: w2.id,
            x,
            y,
            orientation,
            is_attached: attached,
        });
    };

    if vertical_overlap >= config.overlap_min {
        // w1 left of w2
        if near(w1.right, w2.left, config.edge_tolerance) {
            push(w1.right, mid_y, Orientation::Vertical);
        }
        // w2 left of w1
        if near(w1.left, w2.right, config.edge_tolerance) {
            push(w1.left, mid_y, Orientation::Vertical);
        }
    }
    if horizontal_overlap >= config.overlap_min {
        // w1 above w2
        if near(w1.bottom, w2.top, config.edge_tolerance) {
            push(mid_x, w1.bottom, Orientation::Horizontal);
        }
        // w2 above w1
        if near(w1.top, w2.bottom, config.edge_tolerance) {
            push(mid_x, w1.top, Orientation::Horizontal);
        }
    }
    out
}

/// Whether any seam exists between the two widgets.
pub fn is_touching(a: &WidgetBounds, b: &WidgetBounds, config: &TouchConfig) -> bool {
    !touching_edges_between(a, b, config).is_empty()
}

/// Every touching seam across all unordered pairs, in bounds order.
pub fn find_touching_edges(bounds: &[WidgetBounds], config: &TouchConfig) -> Vec<TouchingEdge> {
    let mut edges = Vec::new();
    for (i, w1) in bounds.iter().enumerate() {
        for w2 in &bounds[i + 1..] {
            edges.extend(touching_edges_between(w1, w2, config));
        }
    }
    log::trace!("{} touching edges across {} widgets", edges.len(), bounds.len());
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rect(name: &str, x: f32, y: f32, w: f32, h: f32) -> WidgetBounds {
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
    fn side_by_side_reports_one_vertical_edge() {
        let a = rect("t_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("t_b", 100.0, 0.0, 100.0, 100.0);
        let edges = find_touching_edges(&[a, b], &TouchConfig::default());
        assert_eq!(
            edges,
            vec![TouchingEdge {
                widget1: WidgetId::intern("t_a"),
                widget2: WidgetId::intern("t_b"),
                x: 100.0,
                y: 50.0,
                orientation: Orientation::Vertical,
                is_attached: false,
            }]
        );
    }

    #[test]
    fn stacked_reports_horizontal_edge() {
        let a = rect("t_top", 0.0, 0.0, 100.0, 40.0);
        let b = rect("t_bottom", 20.0, 42.0, 100.0, 40.0);
        let edges = touching_edges_between(&a, &b, &TouchConfig::default());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].orientation, Orientation::Horizontal);
        assert_eq!(edges[0].y, 40.0);
        assert_eq!(edges[0].x, 60.0);
    }

    #[test]
    fn tolerance_boundary() {
        let config = TouchConfig::default();
        let a = rect("t_tol_a", 0.0, 0.0, 100.0, 100.0);
        let at_limit = rect("t_tol_b", 105.0, 0.0, 100.0, 100.0);
        let past_limit = rect("t_tol_c", 105.01, 0.0, 100.0, 100.0);
        assert!(is_touching(&a, &at_limit, &config));
        assert!(!is_touching(&a, &past_limit, &config));
    }

    #[test]
    fn minimum_overlap_boundary() {
        let config = TouchConfig::default();
        let a = rect("t_ov_a", 0.0, 0.0, 100.0, 100.0);
        let exactly = rect("t_ov_b", 100.0, 80.0, 100.0, 100.0);
        let short = rect("t_ov_c", 100.0, 80.01, 100.0, 100.0);
        assert!(is_touching(&a, &exactly, &config));
        assert!(!is_touching(&a, &short, &config));
    }

    #[test]
    fn corner_graze_is_rejected() {
        let a = rect("t_graze_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("t_graze_b", 100.0, 100.0, 100.0, 100.0);
        assert!(!is_touching(&a, &b, &TouchConfig::default()));
    }

    #[test]
    fn touching_is_symmetric() {
        let config = TouchConfig::default();
        let a = rect("t_sym_a", 0.0, 0.0, 60.0, 80.0);
        let b = rect("t_sym_b", 63.0, 30.0, 60.0, 80.0);
        assert_eq!(is_touching(&a, &b, &config), is_touching(&b, &a, &config));

        let mut a2 = a.clone();
        a2.attached_to.push(b.id);
        assert!(is_attached(&a2, &b));
        assert!(is_attached(&b, &a2));
    }

    #[test]
    fn attached_flag_comes_from_either_side() {
        let a = rect("t_att_a", 0.0, 0.0, 100.0, 100.0);
        let mut b = rect("t_att_b", 100.0, 0.0, 100.0, 100.0);
        b.attached_to.push(a.id);
        let edges = find_touching_edges(&[a, b], &TouchConfig::default());
        assert!(edges[0].is_attached);
    }

    #[test]
    fn three_way_meeting_reports_every_pair() {
        let a = rect("t_3_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("t_3_b", 100.0, 0.0, 100.0, 100.0);
        let c = rect("t_3_c", 0.0, 100.0, 200.0, 100.0);
        let edges = find_touching_edges(&[a, b, c], &TouchConfig::default());
        // a|b vertical, a/c horizontal, b/c horizontal
        assert_eq!(edges.len(), 3);
    }

    #[test]
    fn coincident_boxes_fire_every_check() {
        // Wide tolerance + identical boxes: each facing check fires on its own.
        let config = TouchConfig {
            edge_tolerance: 100.0,
            overlap_min: 20.0,
        };
        let a = rect("t_deg_a", 0.0, 0.0, 50.0, 50.0);
        let b = rect("t_deg_b", 0.0, 0.0, 50.0, 50.0);
        let edges = touching_edges_between(&a, &b, &config);
        assert_eq!(edges.len(), 4);
    }

    #[test]
    fn edge_other_endpoint() {
        let a = rect("t_o_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("t_o_b", 100.0, 0.0, 100.0, 100.0);
        let edge = &find_touching_edges(&[a.clone(), b.clone()], &TouchConfig::default())[0];
        assert_eq!(edge.other(a.id), Some(b.id));
        assert_eq!(edge.other(b.id), Some(a.id));
        assert_eq!(edge.other(WidgetId::intern("t_o_z")), None);
    }
}
