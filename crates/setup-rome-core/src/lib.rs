// Core modules
pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{RunnerEnv, ToolSpec};
pub use error::{Result, SetupError};
