//! Process-wide logging setup shared by every binary.

pub mod logging;

pub use logging::{LOG_FORMAT_VAR, LogFormat};

/// Install the global subscriber, picking the format from `UNIFORMDESK_LOG_FORMAT`.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}
