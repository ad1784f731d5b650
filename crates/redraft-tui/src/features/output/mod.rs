//! Output feature slice: output panel state, the request coordinator that
//! owns it, and its view.

mod render;
mod state;
mod update;

pub use render::{highlight_lines, render_output};
pub use state::{OutputContent, OutputState, OutputStatus};
pub use update::{
    abandon, handle_rephrase_completed, handle_translate_completed, run, run_rephrase,
    run_translate, run_with_text, task_kind,
};
