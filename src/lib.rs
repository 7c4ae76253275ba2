pub mod config;
pub mod core;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{ConfigError, ServiceConfig};
pub use core::*;
