//! Domain-specific errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DailyError {
    #[error("could not find a previous daily file within the last {lookback_days} days")]
    NoPreviousEntry { lookback_days: u32 },
    #[error("daily file for today has already been generated: {}", path.display())]
    AlreadyExists { path: PathBuf },
}
