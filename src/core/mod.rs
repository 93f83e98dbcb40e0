// Core probe machinery

pub mod http;
pub mod report;
pub mod status;
pub mod threshold;
pub mod validation;

// Re-export commonly used items
pub use report::{PerfData, RunStatus};
pub use status::Status;
pub use threshold::{ThresholdRule, Verdict};
