//! Lint diagnostics for character sheets.
//!
//! Reports attachment and grouping inconsistencies without modifying the
//! sheet. The editor surfaces these next to the canvas.

use crate::config::TouchConfig;
use crate::geometry::WidgetBounds;
use crate::id::WidgetId;
use crate::model::Sheet;
use crate::touch::is_touching;
use serde::Serialize;
use std::collections::HashSet;

// ─── Diagnostic types ────────────────────────────────────────────────────

/// Severity of a lint finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum LintSeverity {
    /// Likely a corrupted or hand-edited sheet.
    Warning,
    /// Allowed but probably not what the user meant.
    Info,
}

/// A single lint diagnostic for a widget.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LintDiagnostic {
    /// The widget this diagnostic refers to.
    pub widget_id: WidgetId,
    pub message: String,
    pub severity: LintSeverity,
    /// Short rule identifier (e.g. "dangling-attachment").
    pub rule: &'static str,
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Run all lint rules and return diagnostics.
///
/// `bounds` may be partial; pairs without sampled bounds are skipped by the
/// geometric rule.
#[must_use]
pub fn lint_sheet(
    sheet: &Sheet,
    bounds: &[WidgetBounds],
    config: &TouchConfig,
) -> Vec<LintDiagnostic> {
    let mut diags = Vec::new();
    lint_self_attachment(sheet, &mut diags);
    lint_dangling(sheet, &mut diags);
    lint_duplicates(sheet, &mut diags);
    lint_ungrouped(sheet, &mut diags);
    lint_split_groups(sheet, &mut diags);
    lint_attached_apart(sheet, bounds, config, &mut diags);
    diags
}

// ─── Rules ────────────────────────────────────────────────────────────────

fn lint_self_attachment(sheet: &Sheet, diags: &mut Vec<LintDiagnostic>) {
    for widget in &sheet.widgets {
        if widget.attached_to.contains(&widget.id) {
            diags.push(LintDiagnostic {
                widget_id: widget.id,
                message: format!("Widget `{}` is attached to itself.", widget.id),
                severity: LintSeverity::Warning,
                rule: "self-attachment",
            });
        }
    }
}

fn lint_dangling(sheet: &Sheet, diags: &mut Vec<LintDiagnostic>) {
    for widget in &sheet.widgets {
        for target in &widget.attached_to {
            if !sheet.contains(*target) {
                diags.push(LintDiagnostic {
                    widget_id: widget.id,
                    message: format!(
                        "Widget `{}` is attached to `{target}`, which does not exist.",
                        widget.id
                    ),
                    severity: LintSeverity::Warning,
                    rule: "dangling-attachment",
                });
            }
        }
    }
}

/// Same pair stored twice: repeated in one list, or on both sides.
fn lint_duplicates(sheet: &Sheet, diags: &mut Vec<LintDiagnostic>) {
    let mut seen: HashSet<(WidgetId, WidgetId)> = HashSet::new();
    for widget in &sheet.widgets {
        for &target in &widget.attached_to {
            if target == widget.id {
                continue;
            }
            let key = if widget.id < target {
                (widget.id, target)
            } else {
                (target, widget.id)
            };
            if !seen.insert(key) {
                diags.push(LintDiagnostic {
                    widget_id: widget.id,
                    message: format!(
                        "Attachment between `{}` and `{target}` is recorded more than once.",
                        widget.id
                    ),
                    severity: LintSeverity::Info,
                    rule: "duplicate-attachment",
                });
            }
        }
    }
}

fn lint_ungrouped(sheet: &Sheet, diags: &mut Vec<LintDiagnostic>) {
    for widget in &sheet.widgets {
        if widget.group_id.is_none() && !sheet.neighbors(widget.id).is_empty() {
            diags.push(LintDiagnostic {
                widget_id: widget.id,
                message: format!(
                    "Widget `{}` is attached but has no group; it will not move with its neighbours.",
                    widget.id
                ),
                severity: LintSeverity::Warning,
                rule: "ungrouped-attachment",
            });
        }
    }
}

/// Attached pairs whose groups differ. Dragging one leaves the other behind.
fn lint_split_groups(sheet: &Sheet, diags: &mut Vec<LintDiagnostic>) {
    for widget in &sheet.widgets {
        let Some(own) = widget.group_id else {
            continue;
        };
        for &target in &widget.attached_to {
            match sheet.group_of(target) {
                Some(theirs) if theirs != own => diags.push(LintDiagnostic {
                    widget_id: widget.id,
                    message: format!(
                        "`{}` ({own}) is attached to `{target}` ({theirs}) but they move separately.",
                        widget.id
                    ),
                    severity: LintSeverity::Info,
                    rule: "split-group",
                }),
                _ => {}
            }
        }
    }
}

/// Attached pairs that no longer share a seam (e.g. after a resize).
fn lint_attached_apart(
    sheet: &Sheet,
    bounds: &[WidgetBounds],
    config: &TouchConfig,
    diags: &mut Vec<LintDiagnostic>,
) {
    let find = |id: WidgetId| bounds.iter().find(|b| b.id == id);
    for widget in &sheet.widgets {
        let Some(own) = find(widget.id) else {
            continue;
        };
        for &target in &widget.attached_to {
            let Some(theirs) = find(target) else {
                continue;
            };
            if target != widget.id && !is_touching(own, theirs, config) {
                diags.push(LintDiagnostic {
                    widget_id: widget.id,
                    message: format!(
                        "`{}` is attached to `{target}` but they no longer touch.",
                        widget.id
                    ),
                    severity: LintSeverity::Info,
                    rule: "attached-apart",
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{NoMeasurements, sample_bounds};
    use crate::id::GroupId;
    use crate::model::Widget;
    use pretty_assertions::assert_eq;

    fn rules(diags: &[LintDiagnostic]) -> Vec<&'static str> {
        diags.iter().map(|d| d.rule).collect()
    }

    fn boxed(id: &str, x: f32, y: f32) -> Widget {
        Widget::new(WidgetId::intern(id), x, y).with_size(100.0, 100.0)
    }

    #[test]
    fn clean_group_has_no_findings() {
        let g = GroupId::intern("lint_clean_g");
        let mut a = boxed("lint_clean_a", 0.0, 0.0);
        let mut b = boxed("lint_clean_b", 100.0, 0.0);
        a.attached_to.push(b.id);
        a.group_id = Some(g);
        b.group_id = Some(g);
        let sheet = Sheet::from_widgets(vec![a, b]);
        let bounds = sample_bounds(&sheet, &NoMeasurements, 1.0);
        assert!(lint_sheet(&sheet, &bounds, &TouchConfig::default()).is_empty());
    }

    #[test]
    fn self_and_dangling_edges() {
        let mut a = boxed("lint_self_a", 0.0, 0.0);
        a.attached_to.push(a.id);
        a.attached_to.push(WidgetId::intern("lint_ghost"));
        a.group_id = Some(GroupId::intern("lint_self_g"));
        let sheet = Sheet::from_widgets(vec![a]);
        let diags = lint_sheet(&sheet, &[], &TouchConfig::default());
        assert_eq!(rules(&diags), vec!["self-attachment", "dangling-attachment"]);
        assert_eq!(diags[0].severity, LintSeverity::Warning);
    }

    #[test]
    fn both_sided_storage_is_a_duplicate() {
        let g = GroupId::intern("lint_dup_g");
        let mut a = boxed("lint_dup_a", 0.0, 0.0);
        let mut b = boxed("lint_dup_b", 100.0, 0.0);
        a.attached_to.push(b.id);
        b.attached_to.push(a.id);
        a.group_id = Some(g);
        b.group_id = Some(g);
        let sheet = Sheet::from_widgets(vec![a, b]);
        let diags = lint_sheet(&sheet, &[], &TouchConfig::default());
        assert_eq!(rules(&diags), vec!["duplicate-attachment"]);
        assert_eq!(diags[0].widget_id, WidgetId::intern("lint_dup_b"));
    }

    #[test]
    fn ungrouped_and_split_pairs() {
        let mut a = boxed("lint_split_a", 0.0, 0.0);
        let mut b = boxed("lint_split_b", 100.0, 0.0);
        let c = boxed("lint_split_c", 0.0, 100.0);
        a.group_id = Some(GroupId::intern("lint_split_g1"));
        b.group_id = Some(GroupId::intern("lint_split_g2"));
        a.attached_to.push(b.id);
        b.attached_to.push(c.id);
        let sheet = Sheet::from_widgets(vec![a, b, c]);
        let diags = lint_sheet(&sheet, &[], &TouchConfig::default());
        assert_eq!(rules(&diags), vec!["ungrouped-attachment", "split-group"]);
        assert_eq!(diags[0].widget_id, WidgetId::intern("lint_split_c"));
    }

    #[test]
    fn attached_pair_pulled_apart() {
        let g = GroupId::intern("lint_apart_g");
        let mut a = boxed("lint_apart_a", 0.0, 0.0);
        let mut b = boxed("lint_apart_b", 300.0, 0.0);
        a.attached_to.push(b.id);
        a.group_id = Some(g);
        b.group_id = Some(g);
        let sheet = Sheet::from_widgets(vec![a, b]);
        let bounds = sample_bounds(&sheet, &NoMeasurements, 1.0);
        let diags = lint_sheet(&sheet, &bounds, &TouchConfig::default());
        assert_eq!(rules(&diags), vec!["attached-apart"]);
    }
}
