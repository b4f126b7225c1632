//! Process-level setup: logging and options files.
//!
//! Both return [`InitializationError`](crate::error_handling::InitializationError)
//! so a binary can report setup failures separately from request failures.

mod logger;
mod options;

// Re-export public API
pub use logger::init_logger_with;
pub use options::load_client_options;
