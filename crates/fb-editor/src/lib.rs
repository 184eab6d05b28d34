pub mod drag;
pub mod history;
pub mod input;
pub mod shortcuts;
pub mod store;

pub use drag::{DragCommit, DragController, DragState, DragTarget};
pub use history::{HISTORY_DEPTH, History};
pub use input::{InputEvent, Modifiers};
pub use shortcuts::{ShortcutAction, ShortcutMap};
pub use store::FormStore;
