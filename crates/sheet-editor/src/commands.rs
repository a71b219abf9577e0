//! Undo/Redo command stack.
//!
//! Every command is a snapshot pair: the widget list before and after. Attach
//! and detach can regroup several widgets at once, so capturing the whole
//! list is simpler than computing inverses.
//!
//! Drag gestures are batched: `begin_batch` captures the list once, every
//! `MoveWidget` during the drag applies live, and `end_batch` pushes a single
//! undo step.

use crate::sync::{SheetEngine, SheetMutation};
use sheet_core::model::Widget;
use sheet_core::overlay::AttachButton;

/// A reversible edit of the widget list.
#[derive(Debug, Clone)]
pub struct Command {
    pub before: Vec<Widget>,
    pub after: Vec<Widget>,
    pub description: String,
}

/// Manages undo/redo stacks with batch grouping for drag gestures.
pub struct CommandStack {
    undo_stack: Vec<Command>,
    redo_stack: Vec<Command>,
    /// Maximum undo depth.
    max_depth: usize,
    /// Batch nesting depth (0 = not batching).
    batch_depth: usize,
    batch_snapshot: Option<Vec<Widget>>,
    batch_description: String,
}

impl CommandStack {
    pub fn new(max_depth: usize) -> Self {
        Self {
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
            batch_depth: 0,
            batch_snapshot: None,
            batch_description: String::new(),
        }
    }

    /// Start a batch group. Mutations until the matching `end_batch` are
    /// applied live but undone as one step.
    pub fn begin_batch(&mut self, engine: &SheetEngine, description: &str) {
        if self.batch_depth == 0 {
            self.batch_snapshot = Some(engine.snapshot());
            self.batch_description = description.to_string();
        }
        self.batch_depth += 1;
    }

    /// End a batch group. The outermost close pushes one command if the
    /// widget list actually changed.
    pub fn end_batch(&mut self, engine: &SheetEngine) {
        if self.batch_depth == 0 {
            return;
        }
        self.batch_depth -= 1;
        if self.batch_depth > 0 {
            return;
        }
        if let Some(before) = self.batch_snapshot.take() {
            let after = engine.snapshot();
            if before != after {
                let description = std::mem::take(&mut self.batch_description);
                self.push(Command {
                    before,
                    after,
                    description,
                });
            }
        }
    }

    /// Apply a mutation and record it. Returns whether the store changed.
    pub fn execute(
        &mut self,
        engine: &mut SheetEngine,
        mutation: SheetMutation,
        description: &str,
    ) -> bool {
        if self.batch_depth > 0 {
            return engine.apply_mutation(mutation);
        }
        let before = engine.snapshot();
        let changed = engine.apply_mutation(mutation);
        if changed {
            self.push(Command {
                before,
                after: engine.snapshot(),
                description: description.to_string(),
            });
        }
        changed
    }

    /// Record an attachment-button click.
    pub fn click(&mut self, engine: &mut SheetEngine, button: &AttachButton) -> bool {
        let mutation = engine.button_mutation(button);
        let description = match mutation {
            SheetMutation::Detach { .. } => "detach widgets",
            _ => "attach widgets",
        };
        self.execute(engine, mutation, description)
    }

    fn push(&mut self, cmd: Command) {
        log::debug!("undo: recorded {:?}", cmd.description);
        self.undo_stack.push(cmd);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Undo the last command. Returns its description.
    pub fn undo(&mut self, engine: &mut SheetEngine) -> Option<String> {
        let cmd = self.undo_stack.pop()?;
        engine.restore(cmd.before.clone());
        let desc = cmd.description.clone();
        self.redo_stack.push(cmd);
        Some(desc)
    }

    /// Redo the last undone command. Returns its description.
    pub fn redo(&mut self, engine: &mut SheetEngine) -> Option<String> {
        let cmd = self.redo_stack.pop()?;
        engine.restore(cmd.after.clone());
        let desc = cmd.description.clone();
        self.undo_stack.push(cmd);
        Some(desc)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }
}
