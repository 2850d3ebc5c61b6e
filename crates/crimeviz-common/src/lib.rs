//! Common utilities and types for the crimeviz chart pipelines

pub mod error;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use error::{CrimeVizError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use utils::{format_hour_24, month_abbr};
