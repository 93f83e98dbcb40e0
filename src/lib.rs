// Argus Library - Public API

// Re-export error types
pub mod error;
pub use error::{CheckError, Result};

// Module declarations
pub mod checks;
pub mod core;

// Re-export commonly used types
pub use crate::core::report::RunStatus;
pub use crate::core::status::Status;
pub use crate::core::threshold::{ThresholdRule, Verdict};

// Initialize logging
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}
