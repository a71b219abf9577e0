//! Widget data model for a character sheet.
//!
//! A sheet is a flat list of freeform widgets placed in world coordinates.
//! Widgets can be attached edge-to-edge; each widget stores the ids it is
//! attached to and an optional movement-group id. The attachment relation is
//! undirected: `a.attached_to` containing `b` or `b.attached_to` containing `a`
//! both mean "attached". Attach records the edge on the first widget only.

use crate::id::{GroupId, WidgetId};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── Widget ──────────────────────────────────────────────────────────────

/// A single widget on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    pub id: WidgetId,

    /// Widget type tag (`"COUNTER"`, `"DICE_ROLLER"`, ...). Opaque to the engine.
    #[serde(default, rename = "type")]
    pub kind: String,

    /// Top-left corner in world units.
    pub x: f32,
    pub y: f32,

    /// Owned size in world units. When unset the rendered size is measured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_id: Option<GroupId>,

    #[serde(default, skip_serializing_if = "SmallVec::is_empty")]
    pub attached_to: SmallVec<[WidgetId; 4]>,

    /// Per-type payload, owned by the widget editors.
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub data: serde_json::Value,
}

impl Widget {
    pub fn new(id: WidgetId, x: f32, y: f32) -> Self {
        Self {
            id,
            kind: String::new(),
            x,
            y,
            w: None,
            h: None,
            group_id: None,
            attached_to: SmallVec::new(),
            data: serde_json::Value::Null,
        }
    }

    /// Builder-style helper for widgets with an owned size.
    #[must_use]
    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.w = Some(w);
        self.h = Some(h);
        self
    }

    #[must_use]
    pub fn with_kind(mut self, kind: &str) -> Self {
        self.kind = kind.to_string();
        self
    }

    /// Owned size, when both dimensions are set.
    pub fn owned_size(&self) -> Option<(f32, f32)> {
        match (self.w, self.h) {
            (Some(w), Some(h)) => Some((w, h)),
            _ => None,
        }
    }
}

// ─── Sheet ───────────────────────────────────────────────────────────────

/// The widgets of the active sheet, in paint order (last = topmost).
#[derive(Debug, Clone, Default)]
pub struct Sheet {
    pub widgets: Vec<Widget>,

    /// Index from WidgetId → position in `widgets`.
    id_index: HashMap<WidgetId, usize>,
}

impl Sheet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_widgets(widgets: Vec<Widget>) -> Self {
        let mut sheet = Self {
            widgets,
            id_index: HashMap::new(),
        };
        sheet.rebuild_index();
        sheet
    }

    /// Parse a sheet from the app's JSON export (an array of widgets).
    ///
    /// # Errors
    /// Returns the serde error message if the input is not a widget array.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let widgets: Vec<Widget> =
            serde_json::from_str(json).map_err(|e| format!("invalid sheet JSON: {e}"))?;
        let sheet = Self::from_widgets(widgets);
        if sheet.id_index.len() != sheet.widgets.len() {
            log::warn!(
                "sheet import contains duplicate widget ids ({} widgets, {} unique)",
                sheet.widgets.len(),
                sheet.id_index.len()
            );
        }
        Ok(sheet)
    }

    /// Serialize the widget list back to the export format.
    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.widgets).unwrap_or_else(|_| "[]".to_string())
    }

    /// Rebuild the `id_index` (needed after bulk edits of `widgets`).
    pub fn rebuild_index(&mut self) {
        self.id_index.clear();
        for (i, widget) in self.widgets.iter().enumerate() {
            self.id_index.insert(widget.id, i);
        }
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Add a widget on top of the paint order. Replaces any widget with the same id.
    pub fn add_widget(&mut self, widget: Widget) {
        if let Some(&i) = self.id_index.get(&widget.id) {
            self.widgets[i] = widget;
            return;
        }
        self.id_index.insert(widget.id, self.widgets.len());
        self.widgets.push(widget);
    }

    /// Remove a widget and strip it from every neighbour's `attached_to`.
    pub fn remove_widget(&mut self, id: WidgetId) -> Option<Widget> {
        let i = self.id_index.get(&id).copied()?;
        let removed = self.widgets.remove(i);
        for widget in &mut self.widgets {
            widget.attached_to.retain(|other| *other != id);
        }
        self.rebuild_index();
        Some(removed)
    }

    pub fn get_by_id(&self, id: WidgetId) -> Option<&Widget> {
        self.id_index.get(&id).map(|&i| &self.widgets[i])
    }

    pub fn get_by_id_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.id_index
            .get(&id)
            .copied()
            .map(|i| &mut self.widgets[i])
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.id_index.contains_key(&id)
    }

    pub fn group_of(&self, id: WidgetId) -> Option<GroupId> {
        self.get_by_id(id).and_then(|w| w.group_id)
    }

    /// Ids of every widget tagged with `group`, in paint order.
    pub fn members_of(&self, group: GroupId) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|w| w.group_id == Some(group))
            .map(|w| w.id)
            .collect()
    }

    /// Symmetric attachment check over the one-sided storage.
    pub fn are_attached(&self, a: WidgetId, b: WidgetId) -> bool {
        let a_to_b = self
            .get_by_id(a)
            .is_some_and(|w| w.attached_to.contains(&b));
        let b_to_a = self
            .get_by_id(b)
            .is_some_and(|w| w.attached_to.contains(&a));
        a_to_b || b_to_a
    }

    /// Every widget attached to `id`, whichever side stores the edge.
    pub fn neighbors(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out: Vec<WidgetId> = self
            .get_by_id(id)
            .map(|w| w.attached_to.to_vec())
            .unwrap_or_default();
        for widget in &self.widgets {
            if widget.id != id && widget.attached_to.contains(&id) && !out.contains(&widget.id) {
                out.push(widget.id);
            }
        }
        out
    }

    /// Record an attachment edge `a → b`.
    ///
    /// Idempotent: returns `false` without touching storage when the pair is
    /// already attached in either direction, when `a == b`, or when `a` does
    /// not exist.
    pub fn attach_widgets(&mut self, a: WidgetId, b: WidgetId) -> bool {
        if a == b || self.are_attached(a, b) {
            return false;
        }
        match self.get_by_id_mut(a) {
            Some(widget) => {
                widget.attached_to.push(b);
                true
            }
            None => false,
        }
    }

    /// Remove the attachment edge between `a` and `b`, whichever side stores it.
    /// Returns `true` if any stored entry was removed.
    pub fn detach_widgets(&mut self, a: WidgetId, b: WidgetId) -> bool {
        let mut removed = false;
        for (from, to) in [(a, b), (b, a)] {
            if let Some(widget) = self.get_by_id_mut(from) {
                let before = widget.attached_to.len();
                widget.attached_to.retain(|other| *other != to);
                removed |= widget.attached_to.len() != before;
            }
        }
        removed
    }

    pub fn set_group(&mut self, id: WidgetId, group: Option<GroupId>) {
        if let Some(widget) = self.get_by_id_mut(id) {
            widget.group_id = group;
        }
    }
}
