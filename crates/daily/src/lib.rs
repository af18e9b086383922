pub mod app;
pub mod cli;
pub mod domain;
pub mod infra;

/// Install logging for the process. `verbosity` counts `-v` flags.
pub fn init(verbosity: u8) {
    infra::logging::init(verbosity);
}
