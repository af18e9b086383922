//! Application layer: the TODO carry-over pipeline and its orchestration.

pub mod extract;
pub mod journal;
pub mod locate;
pub mod parse;
pub mod render;
pub mod report;
