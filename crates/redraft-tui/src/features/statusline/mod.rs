//! Status line feature slice.
//!
//! Shows the active mode and its options, the last detected language, the
//! provider's character usage, and short-lived notices.

mod render;
mod state;

pub use render::render_status_line;
pub use state::{NOTICE_DURATION, Notice, StatusLineState, UsageDisplay};
