//! Corner rounding for grouped widgets.
//!
//! A widget's corner renders square when an attached neighbour sits flush
//! against one of the two sides meeting at that corner and the neighbour's
//! span reaches the corner (within tolerance). Every other corner stays rounded.

use crate::config::TouchConfig;
use crate::geometry::WidgetBounds;
use crate::id::WidgetId;
use crate::touch::{Side, facing_sides, is_attached};
use serde::Serialize;
use std::collections::HashMap;

/// Per-corner flags; `true` means the corner is square.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SquareCorners {
    pub top_left: bool,
    pub top_right: bool,
    pub bottom_left: bool,
    pub bottom_right: bool,
}

impl SquareCorners {
    /// All four corners rounded.
    pub const ROUNDED: Self = Self {
        top_left: false,
        top_right: false,
        bottom_left: false,
        bottom_right: false,
    };

    pub fn any(&self) -> bool {
        self.top_left || self.top_right || self.bottom_left || self.bottom_right
    }
}

/// Whether `[lo, hi]` reaches coordinate `at`, with tolerance.
fn spans(lo: f32, hi: f32, at: f32, tolerance: f32) -> bool {
    lo <= at + tolerance && hi >= at - tolerance
}

/// Square corners of `widget` given every sampled widget.
pub fn square_corners(
    widget: &WidgetBounds,
    all: &[WidgetBounds],
    config: &TouchConfig,
) -> SquareCorners {
    let tol = config.edge_tolerance;
    let mut corners = SquareCorners::ROUNDED;

    for neighbor in all.iter().filter(|n| n.id != widget.id && is_attached(widget, n)) {
        for side in facing_sides(widget, neighbor, tol) {
            match side {
                Side::Left | Side::Right => {
                    let top = spans(neighbor.top, neighbor.bottom, widget.top, tol);
                    let bottom = spans(neighbor.top, neighbor.bottom, widget.bottom, tol);
                    if side == Side::Left {
                        corners.top_left |= top;
                        corners.bottom_left |= bottom;
                    } else {
                        corners.top_right |= top;
                        corners.bottom_right |= bottom;
                    }
                }
                Side::Top | Side::Bottom => {
                    let left = spans(neighbor.left, neighbor.right, widget.left, tol);
                    let right = spans(neighbor.left, neighbor.right, widget.right, tol);
                    if side == Side::Top {
                        corners.top_left |= left;
                        corners.top_right |= right;
                    } else {
                        corners.bottom_left |= left;
                        corners.bottom_right |= right;
                    }
                }
            }
        }
    }
    corners
}

/// Square corners for every sampled widget.
pub fn resolve_corners(
    bounds: &[WidgetBounds],
    config: &TouchConfig,
) -> HashMap<WidgetId, SquareCorners> {
    bounds
        .iter()
        .map(|b| (b.id, square_corners(b, bounds, config)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use smallvec::SmallVec;

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
    fn unattached_widget_is_fully_rounded() {
        let a = rect("c_free_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("c_free_b", 100.0, 0.0, 100.0, 100.0);
        let all = [a.clone(), b];
        assert_eq!(square_corners(&a, &all, &TouchConfig::default()), SquareCorners::ROUNDED);
    }

    #[test]
    fn flush_right_neighbour_squares_right_corners() {
        let mut a = rect("c_flush_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("c_flush_b", 100.0, 0.0, 100.0, 100.0);
        a.attached_to.push(b.id);
        let all = [a.clone(), b.clone()];
        let config = TouchConfig::default();

        assert_eq!(
            square_corners(&a, &all, &config),
            SquareCorners {
                top_left: false,
                top_right: true,
                bottom_left: false,
                bottom_right: true,
            }
        );
        // Storage is one-sided; b still sees the attachment.
        assert_eq!(
            square_corners(&b, &all, &config),
            SquareCorners {
                top_left: true,
                top_right: false,
                bottom_left: true,
                bottom_right: false,
            }
        );
    }

    #[test]
    fn shorter_neighbour_squares_only_the_corner_it_reaches() {
        let mut a = rect("c_short_a", 0.0, 0.0, 100.0, 100.0);
        let b = rect("c_short_b", 0.0, 100.0, 40.0, 60.0);
        a.attached_to.push(b.id);
        let all = [a.clone(), b];
        let corners = square_corners(&a, &all, &TouchConfig::default());
        assert_eq!(
            corners,
            SquareCorners {
                top_left: false,
                top_right: false,
                bottom_left: true,
                bottom_right: false,
            }
        );
    }

    #[test]
    fn corner_within_tolerance_counts() {
        let mut a = rect("c_tol_a", 0.0, 0.0, 100.0, 100.0);
        // Starts 3 units below a's top edge.
        let b = rect("c_tol_b", 102.0, 3.0, 100.0, 97.0);
        a.attached_to.push(b.id);
        let all = [a.clone(), b];
        let corners = square_corners(&a, &all, &TouchConfig::default());
        assert!(corners.top_right);
        assert!(corners.bottom_right);
        assert!(!corners.top_left);
    }

    #[test]
    fn resolve_covers_every_widget() {
        let a = rect("c_all_a", 0.0, 0.0, 10.0, 10.0);
        let b = rect("c_all_b", 50.0, 50.0, 10.0, 10.0);
        let map = resolve_corners(&[a, b], &TouchConfig::default());
        assert_eq!(map.len(), 2);
        assert!(map.values().all(|c| !c.any()));
    }
}
