//! Text rendering helpers for console output.

mod table;

pub use table::Table;
