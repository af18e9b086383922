//! Tracing subscriber setup.

use tracing::Level;

/// Install the global fmt subscriber on stderr. Stdout is reserved for rendered entries.
///
/// `verbosity` counts `-v` flags: warn by default, then info, debug, and trace.
pub fn init(verbosity: u8) {
    let level = match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
