//! Routes `tracing` events to the browser console
//!
//! `tracing` is built with its `log` feature, so with no subscriber
//! installed every event is re-emitted as a `log` record. `console_log`
//! is the `log` backend that writes those records to `console.*`.

use tracing::Level;

/// The `log` level matching a `tracing` level
pub fn console_level(level: Level) -> log::Level {
    match level {
        Level::ERROR => log::Level::Error,
        Level::WARN => log::Level::Warn,
        Level::INFO => log::Level::Info,
        Level::DEBUG => log::Level::Debug,
        Level::TRACE => log::Level::Trace,
    }
}

/// Install the console logger. Returns false when a logger was already set.
pub fn init(max_level: Level) -> bool {
    console_log::init_with_level(console_level(max_level)).is_ok()
}
