//! Pure domain types: bullet trees, entry format, and errors.

pub mod errors;
pub mod format;
pub mod model;
