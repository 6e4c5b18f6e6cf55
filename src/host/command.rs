use crate::ToolError;
use std::path::Path;
use std::process::{Command, Stdio};

/// Run a program to completion and return its stdout.
///
/// A non-zero exit becomes a [`ToolError`] carrying the captured stderr.
pub fn capture(program: &str, args: &[&str], workdir: Option<&Path>) -> Result<Vec<u8>, ToolError> {
    let mut command = Command::new(program);
    command.args(args).stdin(Stdio::null());
    if let Some(dir) = workdir {
        command.current_dir(dir);
    }

    tracing::debug!(program = %program, ?args, "Running");

    let output = command
        .output()
        .map_err(|e| ToolError::spawn(program, e))?;

    if !output.status.success() {
        return Err(ToolError::exited(program, output.status, &output.stderr));
    }

    Ok(output.stdout)
}

/// Run a program with the terminal attached so the operator sees its output
pub fn interactive(program: &str, args: &[&str]) -> Result<(), ToolError> {
    tracing::debug!(program = %program, ?args, "Running");

    let status = Command::new(program)
        .args(args)
        .status()
        .map_err(|e| ToolError::spawn(program, e))?;

    if !status.success() {
        return Err(ToolError::exited(program, status, b"see output above"));
    }

    Ok(())
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn test_capture_stdout() {
        let out = capture("echo", &["hello"], None).unwrap();
        assert_eq!(String::from_utf8_lossy(&out).trim(), "hello");
    }

    #[test]
    fn test_capture_in_workdir() {
        let temp = tempfile::TempDir::new().unwrap();
        std::fs::write(temp.path().join("marker"), "x").unwrap();

        let out = capture("ls", &[], Some(temp.path())).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("marker"));
    }

    #[test]
    fn test_capture_nonzero_exit() {
        let err = capture("sh", &["-c", "echo oops >&2; exit 3"], None).unwrap_err();
        assert_eq!(err.program, "sh");
        assert_eq!(err.diagnostic, "oops");
    }

    #[test]
    fn test_capture_missing_program() {
        let err = capture("definitely-not-a-real-program", &[], None).unwrap_err();
        assert_eq!(err.status, "not started");
    }
}
