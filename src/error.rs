use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VmBackupError {
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("This tool must be run as root")]
    NotRoot,

    #[error("No options given. Use -b to back up or -r to restore")]
    NoOptions,

    #[error("Options -b and -r are mutually exclusive")]
    ConflictingActions,

    #[error("No action selected. Use -b to back up or -r to restore")]
    MissingAction,

    #[error("Machine '{0}' given without an action that applies to it")]
    MachineWithoutAction(String),

    #[error("Option -o requires a machine name")]
    MissingMachineName,

    #[error("Destination path does not exist: {}", .0.display())]
    DestinationMissing(PathBuf),

    #[error("Source path does not exist: {}", .0.display())]
    SourcePathMissing(PathBuf),

    /// Help or version output requested; carries the rendered text.
    #[error("{0}")]
    Help(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl VmBackupError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Help(_) => 0,
            Self::InvalidOption(_) => 1,
            Self::NotRoot => 2,
            Self::NoOptions => 3,
            Self::ConflictingActions => 4,
            Self::MissingAction => 5,
            Self::MachineWithoutAction(_) => 6,
            Self::MissingMachineName => 7,
            Self::DestinationMissing(_) => 8,
            Self::SourcePathMissing(_) => 9,
            Self::Io(_) => 1,
        }
    }
}

/// Failure of one external program invocation.
#[derive(Error, Debug)]
#[error("{program} failed ({status}): {diagnostic}")]
pub struct ToolError {
    pub program: String,
    pub status: String,
    pub diagnostic: String,
}

impl ToolError {
    pub fn spawn(program: &str, err: std::io::Error) -> Self {
        Self {
            program: program.to_string(),
            status: "not started".to_string(),
            diagnostic: err.to_string(),
        }
    }

    pub fn io(what: &str, err: std::io::Error) -> Self {
        Self {
            program: what.to_string(),
            status: "io error".to_string(),
            diagnostic: err.to_string(),
        }
    }

    pub fn exited(program: &str, status: std::process::ExitStatus, stderr: &[u8]) -> Self {
        Self {
            program: program.to_string(),
            status: status.to_string(),
            diagnostic: String::from_utf8_lossy(stderr).trim().to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, VmBackupError>;
