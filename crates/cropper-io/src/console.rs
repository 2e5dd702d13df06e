//! Logging to the browser developer console.
//!
//! The core crate never logs; it returns errors. Everything the
//! application wants recorded goes through these helpers so messages
//! share one prefix and can be filtered in the console.

const PREFIX: &str = "[cropper]";

/// Log an informational message.
pub fn info(message: &str) {
    web_sys::console::info_1(&format!("{PREFIX} {message}").into());
}

/// Log a recoverable problem.
pub fn warn(message: &str) {
    web_sys::console::warn_1(&format!("{PREFIX} {message}").into());
}

/// Log a failed operation.
pub fn error(message: &str) {
    web_sys::console::error_1(&format!("{PREFIX} {message}").into());
}
