//! Bounds sampling: widget model + rendered size → world-space rectangles.
//!
//! Positions always come from the model (already world units). Sizes come
//! from a `SizeSource` reporting rendered pixel sizes, divided by the current
//! zoom scale; widgets with an owned `w`/`h` fall back to it when no
//! measurement exists. Widgets with neither are skipped for this pass.

use crate::id::{GroupId, WidgetId};
use crate::model::Sheet;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt::Write as _;

/// World-space rectangle of one widget, plus the attachment data the
/// detector needs. Ephemeral: recomputed after every layout change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetBounds {
    pub id: WidgetId,
    pub group_id: Option<GroupId>,
    pub attached_to: SmallVec<[WidgetId; 4]>,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl WidgetBounds {
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.left && px <= self.right && py >= self.top && py <= self.bottom
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    pub fn rect(&self) -> Rect {
        Rect {
            x: self.left,
            y: self.top,
            width: self.width(),
            height: self.height(),
        }
    }
}

/// Plain axis-aligned rectangle (x, y = top-left).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Smallest rectangle containing every input. `None` for an empty slice.
    pub fn union_all(rects: &[Rect]) -> Option<Rect> {
        let first = rects.first()?;
        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.right();
        let mut max_y = first.bottom();
        for r in &rects[1..] {
            min_x = min_x.min(r.x);
            min_y = min_y.min(r.y);
            max_x = max_x.max(r.right());
            max_y = max_y.max(r.bottom());
        }
        Some(Rect {
            x: min_x,
            y: min_y,
            width: max_x - min_x,
            height: max_y - min_y,
        })
    }
}

// ─── Size sources ────────────────────────────────────────────────────────

/// Something that can report the rendered on-screen size of a widget,
/// in screen pixels (i.e. already multiplied by the zoom scale).
pub trait SizeSource {
    fn measured_size(&self, id: WidgetId) -> Option<(f32, f32)>;
}

/// Sizes reported by the renderer (e.g. `getBoundingClientRect`), keyed by widget.
#[derive(Debug, Clone, Default)]
pub struct MeasuredSizes {
    sizes: HashMap<WidgetId, (f32, f32)>,
}

impl MeasuredSizes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, id: WidgetId, width_px: f32, height_px: f32) {
        self.sizes.insert(id, (width_px, height_px));
    }

    pub fn remove(&mut self, id: WidgetId) {
        self.sizes.remove(&id);
    }

    pub fn clear(&mut self) {
        self.sizes.clear();
    }

    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

impl SizeSource for MeasuredSizes {
    fn measured_size(&self, id: WidgetId) -> Option<(f32, f32)> {
        self.sizes.get(&id).copied()
    }
}

/// A source that never measures anything: bounds come from owned sizes only.
pub struct NoMeasurements;

impl SizeSource for NoMeasurements {
    fn measured_size(&self, _id: WidgetId) -> Option<(f32, f32)> {
        None
    }
}

// ─── Sampling ────────────────────────────────────────────────────────────

/// Produce one `WidgetBounds` per locatable widget, in sheet order.
///
/// A non-positive or non-finite `scale` is treated as 1.0.
pub fn sample_bounds(sheet: &Sheet, sizes: &dyn SizeSource, scale: f32) -> Vec<WidgetBounds> {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        log::warn!("invalid zoom scale {scale}, sampling at 1.0");
        1.0
    };

    let mut out = Vec::with_capacity(sheet.len());
    for widget in &sheet.widgets {
        let size = sizes
            .measured_size(widget.id)
            .map(|(w, h)| (w / scale, h / scale))
            .or_else(|| widget.owned_size());
        let Some((width, height)) = size else {
            log::trace!("no size for {:?}, skipping", widget.id);
            continue;
        };
        out.push(WidgetBounds {
            id: widget.id,
            group_id: widget.group_id,
            attached_to: widget.attached_to.clone(),
            left: widget.x,
            right: widget.x + width,
            top: widget.y,
            bottom: widget.y + height,
        });
    }
    out
}

/// Refresh the attachment fields of cached bounds from the sheet without
/// re-measuring geometry. Bounds whose widget vanished are dropped.
pub fn refresh_attachments(sheet: &Sheet, bounds: &mut Vec<WidgetBounds>) {
    bounds.retain_mut(|b| match sheet.get_by_id(b.id) {
        Some(widget) => {
            b.group_id = widget.group_id;
            b.attached_to = widget.attached_to.clone();
            true
        }
        None => false,
    });
}

/// Change-detection key for re-measurement: every widget's
/// `id:x:y:groupId`, plus the zoom scale.
pub fn layout_fingerprint(sheet: &Sheet, scale: f32) -> String {
    let mut out = String::with_capacity(sheet.len() * 24);
    for widget in &sheet.widgets {
        let group = widget.group_id.as_ref().map(GroupId::as_str).unwrap_or("");
        let _ = write!(out, "{}:{}:{}:{}|", widget.id, widget.x, widget.y, group);
    }
    let _ = write!(out, "@{scale}");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Widget;
    use pretty_assertions::assert_eq;

    #[test]
    fn measured_size_is_divided_by_scale() {
        let id = WidgetId::intern("g_measured");
        let sheet = Sheet::from_widgets(vec![Widget::new(id, 10.0, 20.0)]);
        let mut sizes = MeasuredSizes::new();
        sizes.set(id, 200.0, 100.0);

        let bounds = sample_bounds(&sheet, &sizes, 2.0);
        assert_eq!(bounds.len(), 1);
        let b = &bounds[0];
        assert_eq!((b.left, b.top, b.right, b.bottom), (10.0, 20.0, 110.0, 70.0));
    }

    #[test]
    fn owned_size_is_fallback_in_world_units() {
        let id = WidgetId::intern("g_owned");
        let sheet = Sheet::from_widgets(vec![Widget::new(id, 0.0, 0.0).with_size(80.0, 40.0)]);
        let bounds = sample_bounds(&sheet, &NoMeasurements, 3.0);
        assert_eq!(bounds[0].width(), 80.0);
        assert_eq!(bounds[0].height(), 40.0);
    }

    #[test]
    fn unmeasured_widgets_are_skipped() {
        let a = WidgetId::intern("g_skip_a");
        let b = WidgetId::intern("g_skip_b");
        let sheet = Sheet::from_widgets(vec![
            Widget::new(a, 0.0, 0.0),
            Widget::new(b, 0.0, 0.0).with_size(10.0, 10.0),
        ]);
        let bounds = sample_bounds(&sheet, &NoMeasurements, 1.0);
        assert_eq!(bounds.iter().map(|b| b.id).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn bad_scale_falls_back_to_one() {
        let id = WidgetId::intern("g_bad_scale");
        let sheet = Sheet::from_widgets(vec![Widget::new(id, 0.0, 0.0)]);
        let mut sizes = MeasuredSizes::new();
        sizes.set(id, 50.0, 50.0);
        let bounds = sample_bounds(&sheet, &sizes, 0.0);
        assert_eq!(bounds[0].width(), 50.0);
    }

    #[test]
    fn fingerprint_tracks_position_group_and_scale() {
        let id = WidgetId::intern("g_fp");
        let mut sheet = Sheet::from_widgets(vec![Widget::new(id, 0.0, 0.0)]);
        let base = layout_fingerprint(&sheet, 1.0);

        assert_ne!(base, layout_fingerprint(&sheet, 1.5));

        sheet.get_by_id_mut(id).unwrap().x = 5.0;
        let moved = layout_fingerprint(&sheet, 1.0);
        assert_ne!(base, moved);

        sheet.set_group(id, Some(GroupId::intern("g_fp_group")));
        assert_ne!(moved, layout_fingerprint(&sheet, 1.0));
        assert!(layout_fingerprint(&sheet, 1.0).starts_with("g_fp:5:0:g_fp_group|"));
    }

    #[test]
    fn union_all_covers_inputs() {
        let u = Rect::union_all(&[
            Rect { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
            Rect { x: 50.0, y: -5.0, width: 10.0, height: 10.0 },
        ])
        .unwrap();
        assert_eq!(u, Rect { x: 0.0, y: -5.0, width: 60.0, height: 15.0 });
        assert!(Rect::union_all(&[]).is_none());
    }
}
