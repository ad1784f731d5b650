pub mod clipboard;
pub mod debounce;
pub mod task;
pub mod text;

pub use clipboard::Clipboard;
pub use debounce::Debouncer;
pub use task::{TaskCompleted, TaskId, TaskKind, TaskSeq, TaskState, Tasks};
pub use text::{sanitize_for_display, truncate_with_ellipsis, wrap_with_cursor};
