//! Core library for redraft: config, proxy API client, options, and the
//! word-level diff used to highlight rephrasings.

pub mod api;
pub mod config;
pub mod diff;
pub mod options;
