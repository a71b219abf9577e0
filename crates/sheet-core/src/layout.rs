//! Auto-stack layout helper.
//!
//! Arranges the sheet's units (a movement group, or a single ungrouped
//! widget) in a column, row, or grid starting at an origin. A group moves
//! as one rigid block so its internal seams survive the re-layout.

use crate::geometry::{Rect, WidgetBounds};
use crate::id::{GroupId, WidgetId};
use crate::model::Sheet;
use serde::{Deserialize, Serialize};

/// How units are arranged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum StackMode {
    /// Vertical stack.
    Column { gap: f32 },
    /// Horizontal stack.
    Row { gap: f32 },
    /// Rows of `cols` units.
    Grid { cols: u32, gap: f32 },
}

/// A new world position for one widget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Placement {
    pub id: WidgetId,
    pub x: f32,
    pub y: f32,
}

/// One block moved by the stacker.
struct Unit {
    members: Vec<WidgetId>,
    rect: Rect,
}

/// Collect units from sampled bounds. Widgets without bounds stay put.
fn collect_units(sheet: &Sheet, bounds: &[WidgetBounds]) -> Vec<Unit> {
    let mut units: Vec<Unit> = Vec::new();
    let mut group_slot: Vec<(GroupId, usize)> = Vec::new();

    for b in bounds {
        let group = sheet.group_of(b.id);
        let slot = group.and_then(|g| group_slot.iter().find(|(sg, _)| *sg == g).map(|(_, i)| *i));
        match slot {
            Some(i) => {
                let unit = &mut units[i];
                unit.members.push(b.id);
                unit.rect = Rect::union_all(&[unit.rect, b.rect()]).unwrap_or(unit.rect);
            }
            None => {
                if let Some(g) = group {
                    group_slot.push((g, units.len()));
                }
                units.push(Unit {
                    members: vec![b.id],
                    rect: b.rect(),
                });
            }
        }
    }

    // Reading order of the current arrangement.
    units.sort_by(|a, b| {
        a.rect
            .y
            .total_cmp(&b.rect.y)
            .then(a.rect.x.total_cmp(&b.rect.x))
    });
    units
}

/// Compute new top-left positions for every laid-out widget.
///
/// Returned placements are absolute world positions; widgets already in
/// place are included so callers can apply the list blindly.
pub fn auto_stack(
    sheet: &Sheet,
    bounds: &[WidgetBounds],
    origin: (f32, f32),
    mode: StackMode,
) -> Vec<Placement> {
    let units = collect_units(sheet, bounds);
    let mut placements = Vec::with_capacity(bounds.len());
    let (ox, oy) = origin;

    let place = |unit: &Unit, ux: f32, uy: f32, out: &mut Vec<Placement>| {
        let dx = ux - unit.rect.x;
        let dy = uy - unit.rect.y;
        for id in &unit.members {
            if let Some(widget) = sheet.get_by_id(*id) {
                out.push(Placement {
                    id: *id,
                    x: widget.x + dx,
                    y: widget.y + dy,
                });
            }
        }
    };

    match mode {
        StackMode::Column { gap } => {
            let mut y = oy;
            for unit in &units {
                place(unit, ox, y, &mut placements);
                y += unit.rect.height + gap;
            }
        }
        StackMode::Row { gap } => {
            let mut x = ox;
            for unit in &units {
                place(unit, x, oy, &mut placements);
                x += unit.rect.width + gap;
            }
        }
        StackMode::Grid { cols, gap } => {
            let cols = cols.max(1);
            let mut x = ox;
            let mut y = oy;
            let mut col = 0u32;
            let mut row_height = 0.0f32;

            for unit in &units {
                place(unit, x, y, &mut placements);
                row_height = row_height.max(unit.rect.height);
                col += 1;
                if col >= cols {
                    col = 0;
                    x = ox;
                    y += row_height + gap;
                    row_height = 0.0;
                } else {
                    x += unit.rect.width + gap;
                }
            }
        }
    }

    log::debug!("auto-stack: {} units, {} placements", units.len(), placements.len());
    placements
}
