//! Attachment graph operations and group maintenance.
//!
//! The graph itself lives on the widgets (`attached_to`). This module turns
//! a click on a touching edge into store mutations: recording edges,
//! assigning or propagating `groupId`, and removing edges again.

use crate::config::GroupPolicy;
use crate::geometry::WidgetBounds;
use crate::id::{GroupId, WidgetId};
use crate::model::Sheet;
use crate::touch::TouchingEdge;
use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Bfs;
use std::collections::{HashMap, HashSet};

/// Result of an attach click.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttachOutcome {
    /// Edges newly written to the store, as `(stored_on, target)`.
    pub recorded: Vec<(WidgetId, WidgetId)>,
    /// Group the clicked pair ended up in, if any.
    pub group: Option<GroupId>,
    /// Widgets whose `groupId` changed.
    pub regrouped: Vec<WidgetId>,
    /// Bounds were missing for an endpoint; only the direct edge was recorded.
    pub fallback: bool,
}

/// Result of a detach click.
#[derive(Debug, Clone, PartialEq)]
pub struct DetachOutcome {
    /// The widget that let go (the hovered one, or widget1).
    pub detaching: WidgetId,
    pub other: WidgetId,
    /// Whether a stored edge was actually removed.
    pub removed: bool,
    /// Widgets whose `groupId` changed.
    pub regrouped: Vec<WidgetId>,
}

// ─── Graph views ─────────────────────────────────────────────────────────

/// Undirected view of every recorded attachment. Edges pointing at widgets
/// that no longer exist are skipped.
pub fn attachment_graph(sheet: &Sheet) -> UnGraphMap<WidgetId, ()> {
    let mut graph = UnGraphMap::with_capacity(sheet.len(), sheet.len());
    for widget in &sheet.widgets {
        graph.add_node(widget.id);
    }
    for widget in &sheet.widgets {
        for &target in &widget.attached_to {
            if target != widget.id && sheet.contains(target) {
                graph.add_edge(widget.id, target, ());
            }
        }
    }
    graph
}

/// Connected components of the attachment graph, each in paint order.
/// Components are ordered by their first member's paint position.
/// Isolated widgets form single-member components.
pub fn connected_groups(sheet: &Sheet) -> Vec<Vec<WidgetId>> {
    let graph = attachment_graph(sheet);
    let order: HashMap<WidgetId, usize> = sheet
        .widgets
        .iter()
        .enumerate()
        .map(|(i, w)| (w.id, i))
        .collect();

    let mut seen: HashSet<WidgetId> = HashSet::new();
    let mut components = Vec::new();
    for widget in &sheet.widgets {
        if seen.contains(&widget.id) {
            continue;
        }
        let mut members = Vec::new();
        let mut bfs = Bfs::new(&graph, widget.id);
        while let Some(id) = bfs.next(&graph) {
            if seen.insert(id) {
                members.push(id);
            }
        }
        members.sort_by_key(|id| order.get(id).copied().unwrap_or(usize::MAX));
        components.push(members);
    }
    components
}

/// Rewrite every `groupId` from the connected components: each component with
/// two or more widgets shares one id, singletons carry none. An existing id
/// held by a member is reused when no earlier component claimed it.
///
/// Returns the widgets whose `groupId` changed.
pub fn recompute_groups(sheet: &mut Sheet) -> Vec<WidgetId> {
    let mut claimed: HashSet<GroupId> = HashSet::new();
    let mut changed = Vec::new();

    for members in connected_groups(sheet) {
        let target = if members.len() < 2 {
            None
        } else {
            let reused = members
                .iter()
                .filter_map(|id| sheet.group_of(*id))
                .find(|g| !claimed.contains(g));
            let group = reused.unwrap_or_else(GroupId::generate);
            claimed.insert(group);
            Some(group)
        };
        for id in members {
            if sheet.group_of(id) != target {
                sheet.set_group(id, target);
                changed.push(id);
            }
        }
    }
    if !changed.is_empty() {
        log::debug!("recomputed groups: {} widgets regrouped", changed.len());
    }
    changed
}

// ─── Attach ──────────────────────────────────────────────────────────────

/// Attach `a` and `b` (the endpoints of a clicked touching edge).
///
/// `bounds` and `edges` are the current detector output; they are used to
/// confirm both widgets are laid out and, under `GroupPolicy::OneHop`, to
/// absorb a groupless widget into its neighbour's group together with every
/// other seam it already shares with that group.
pub fn attach_pair(
    sheet: &mut Sheet,
    bounds: &[WidgetBounds],
    edges: &[TouchingEdge],
    a: WidgetId,
    b: WidgetId,
    policy: GroupPolicy,
) -> AttachOutcome {
    let mut outcome = AttachOutcome::default();
    if a == b || sheet.are_attached(a, b) {
        outcome.group = sheet.group_of(a);
        return outcome;
    }

    let laid_out = |id: WidgetId| bounds.iter().any(|bb| bb.id == id);
    if !laid_out(a) || !laid_out(b) {
        log::debug!("attach {a:?}-{b:?}: bounds missing, recording direct edge only");
        if sheet.attach_widgets(a, b) {
            outcome.recorded.push((a, b));
        }
        outcome.fallback = true;
        if policy == GroupPolicy::ConnectedComponents {
            outcome.regrouped = recompute_groups(sheet);
        }
        outcome.group = sheet.group_of(a);
        return outcome;
    }

    if sheet.attach_widgets(a, b) {
        outcome.recorded.push((a, b));
    }

    match policy {
        GroupPolicy::ConnectedComponents => {
            outcome.regrouped = recompute_groups(sheet);
        }
        GroupPolicy::OneHop => match (sheet.group_of(a), sheet.group_of(b)) {
            (None, None) => {
                let group = GroupId::generate();
                sheet.set_group(a, Some(group));
                sheet.set_group(b, Some(group));
                outcome.regrouped.extend([a, b]);
                log::debug!("attach {a:?}-{b:?}: new {group:?}");
            }
            (Some(ga), Some(gb)) if ga == gb => {}
            (Some(ga), Some(gb)) => {
                log::debug!("attach {a:?}-{b:?}: linking {ga:?} and {gb:?} without merging");
            }
            (Some(group), None) => absorb(sheet, edges, b, group, &mut outcome),
            (None, Some(group)) => absorb(sheet, edges, a, group, &mut outcome),
        },
    }

    outcome.group = sheet.group_of(a);
    outcome
}

/// Move a groupless widget into `group`, then attach every other
/// not-yet-attached seam it shares with a member of that group.
fn absorb(
    sheet: &mut Sheet,
    edges: &[TouchingEdge],
    joining: WidgetId,
    group: GroupId,
    outcome: &mut AttachOutcome,
) {
    sheet.set_group(joining, Some(group));
    outcome.regrouped.push(joining);

    for edge in edges.iter().filter(|e| e.involves(joining) && !e.is_attached) {
        let Some(other) = edge.other(joining) else {
            continue;
        };
        if sheet.group_of(other) != Some(group) || sheet.are_attached(joining, other) {
            continue;
        }
        if sheet.attach_widgets(edge.widget1, edge.widget2) {
            outcome.recorded.push((edge.widget1, edge.widget2));
        }
    }
    log::debug!(
        "{joining:?} absorbed into {group:?} ({} edges recorded)",
        outcome.recorded.len()
    );
}

// ─── Detach ──────────────────────────────────────────────────────────────

/// Pick which endpoint of an attached edge lets go: the hovered widget when it
/// is an endpoint, otherwise `widget1`.
pub fn detach_target(edge: &TouchingEdge, hovered: Option<WidgetId>) -> (WidgetId, WidgetId) {
    match hovered {
        Some(id) if id == edge.widget2 => (edge.widget2, edge.widget1),
        _ => (edge.widget1, edge.widget2),
    }
}

/// Remove the single edge between `detaching` and `other`.
///
/// Under `GroupPolicy::OneHop` no group is split; an endpoint left with no
/// attachments at all drops its `groupId`. Under
/// `GroupPolicy::ConnectedComponents` groups are recomputed.
pub fn detach_pair(
    sheet: &mut Sheet,
    detaching: WidgetId,
    other: WidgetId,
    policy: GroupPolicy,
) -> DetachOutcome {
    let removed = sheet.detach_widgets(detaching, other);
    let mut regrouped = Vec::new();

    match policy {
        GroupPolicy::OneHop => {
            for id in [detaching, other] {
                if sheet.group_of(id).is_some() && sheet.neighbors(id).is_empty() {
                    sheet.set_group(id, None);
                    regrouped.push(id);
                }
            }
        }
        GroupPolicy::ConnectedComponents => {
            regrouped = recompute_groups(sheet);
        }
    }

    log::debug!("detach {detaching:?} from {other:?}: removed={removed}");
    DetachOutcome {
        detaching,
        other,
        removed,
        regrouped,
    }
}
