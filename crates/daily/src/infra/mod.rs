//! Infrastructure adapters for configuration, logging, clock, and filesystem IO.

pub mod clock;
pub mod config;
pub mod fs;
pub mod logging;
