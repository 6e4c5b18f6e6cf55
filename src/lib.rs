pub mod cli;
pub mod config;
pub mod error;
pub mod host;
pub mod orchestrator;
pub mod report;
pub mod runlog;

pub use error::{Result, ToolError, VmBackupError};
