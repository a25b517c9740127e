//! Command implementations for the matpick CLI

pub mod filter;
pub mod pick;

// Re-export main dispatcher functions for flat access from main.rs
pub use filter::run_filter;
pub use pick::{run_form, run_pick};
