//! Interactive picker form
//!
//! One trigger per field; activating a trigger opens a searchable overlay
//! over the form. Keyboard and mouse both work:
//! - Tab / Shift-Tab move between fields, Enter opens, Delete clears
//! - In the overlay, typing filters, ↑↓ move, Enter selects, Esc closes
//! - Clicking outside an open overlay closes it without changing the value

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
