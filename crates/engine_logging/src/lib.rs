#![deny(missing_docs)]
//! Logging for the mojibake conversion workspace.
//!
//! Two macro families wrap the `log` facade:
//!
//! - `engine_*` for run-level messages (setup, summaries, file I/O);
//! - `chunk_*` for per-buffer diagnostics, prefixed with the index of the
//!   chunk the current thread is converting.
//!
//! The stream driver announces each chunk with [`set_chunk_index`], so the
//! re-encoder can tag its messages without the index being passed down.

use std::cell::Cell;

thread_local! {
    static CHUNK_INDEX: Cell<u64> = const { Cell::new(0) };
}

/// Announce the chunk the current thread is about to convert.
pub fn set_chunk_index(index: u64) {
    CHUNK_INDEX.with(|v| v.set(index));
}

/// Chunk most recently announced on this thread, 0 before the first one.
pub fn chunk_index() -> u64 {
    CHUNK_INDEX.with(|v| v.get())
}

#[doc(hidden)]
#[macro_export]
macro_rules! __chunk_log {
    ($level:ident, $($arg:tt)*) => {{
        log::$level!("chunk {}: {}", $crate::chunk_index(), format_args!($($arg)*));
    }};
}

/// Trace-level run message.
#[macro_export]
macro_rules! engine_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Debug-level run message.
#[macro_export]
macro_rules! engine_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Info-level run message.
#[macro_export]
macro_rules! engine_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Warn-level run message.
#[macro_export]
macro_rules! engine_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Error-level run message.
#[macro_export]
macro_rules! engine_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Trace-level message tagged with the current chunk index.
#[macro_export]
macro_rules! chunk_trace {
    ($($arg:tt)*) => { $crate::__chunk_log!(trace, $($arg)*) };
}

/// Debug-level message tagged with the current chunk index.
#[macro_export]
macro_rules! chunk_debug {
    ($($arg:tt)*) => { $crate::__chunk_log!(debug, $($arg)*) };
}

/// Warn-level message tagged with the current chunk index.
#[macro_export]
macro_rules! chunk_warn {
    ($($arg:tt)*) => { $crate::__chunk_log!(warn, $($arg)*) };
}

/// Error-level message tagged with the current chunk index.
#[macro_export]
macro_rules! chunk_error {
    ($($arg:tt)*) => { $crate::__chunk_log!(error, $($arg)*) };
}

/// Install a stderr logger for tests. Later calls are no-ops.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Never);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chunk_index_is_per_thread() {
        set_chunk_index(7);
        assert_eq!(chunk_index(), 7);

        let other = std::thread::spawn(chunk_index).join().unwrap();
        assert_eq!(other, 0);
    }

    #[test]
    fn chunk_macros_accept_format_arguments() {
        initialize_for_tests();
        set_chunk_index(3);
        let bytes = 12;
        chunk_trace!("split at {bytes}");
        chunk_debug!("{} bytes", bytes);
        chunk_warn!("plain message");
        chunk_error!("{bytes:>4}");
        assert_eq!(chunk_index(), 3);
    }
}
