pub mod commands;
pub mod interaction;
pub mod settle;
pub mod sync;

pub use commands::CommandStack;
pub use interaction::{DragSession, HoverState, InteractionState, PointerTarget};
pub use settle::SettleTimer;
pub use sync::{ClickOutcome, SheetEngine, SheetMutation};
