pub mod error_panel;
pub mod input;
pub mod output;
pub mod session;
pub mod statusline;
