//! Backward scan for the most recent previous daily entry.

use std::path::PathBuf;

use time::{Date, Duration};

use crate::domain::errors::DailyError;
use crate::domain::format::EntryLayout;

pub const DEFAULT_LOOKBACK_DAYS: u32 = 14;

/// Finds the newest existing entry strictly before a given day.
#[derive(Debug, Clone)]
pub struct Locator {
    layout: EntryLayout,
    lookback_days: u32,
}

impl Locator {
    pub fn new(layout: EntryLayout, lookback_days: u32) -> Self {
        Self {
            layout,
            lookback_days,
        }
    }

    pub fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// Candidate paths ordered from yesterday backward, covering distances `1..lookback_days`.
    pub fn candidates(&self, today: Date) -> impl Iterator<Item = PathBuf> + '_ {
        (1..self.lookback_days)
            .map_while(move |distance| today.checked_sub(Duration::days(i64::from(distance))))
            .map(|day| self.layout.path_for(day))
    }

    /// Return the first candidate that exists on disk.
    pub fn find_previous(&self, today: Date) -> Result<PathBuf, DailyError> {
        for candidate in self.candidates(today) {
            tracing::trace!(path = %candidate.display(), "checking for previous entry");
            if candidate.exists() {
                tracing::debug!(path = %candidate.display(), "found previous entry");
                return Ok(candidate);
            }
        }
        Err(DailyError::NoPreviousEntry {
            lookback_days: self.lookback_days,
        })
    }
}
