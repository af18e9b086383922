//! Wall-clock access.

use time::{Date, OffsetDateTime};

/// Today's date in the local timezone, or UTC when the local offset is unavailable.
pub fn today() -> Date {
    match OffsetDateTime::now_local() {
        Ok(now) => now.date(),
        Err(err) => {
            tracing::warn!(error = %err, "local offset unavailable, using UTC date");
            OffsetDateTime::now_utc().date()
        }
    }
}
