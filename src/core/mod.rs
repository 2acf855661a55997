/*!
 * Core Module
 * Fundamental tracer types, configuration and error handling
 */

pub mod config;
pub mod errors;
pub mod limits;
pub mod types;

// Re-export for convenience
pub use config::TracerConfig;
pub use errors::*;
pub use types::*;
