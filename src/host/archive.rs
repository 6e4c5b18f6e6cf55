use crate::{config::ToolSet, ToolError};
use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

/// Streams a disk image through the compression pair, one child process at a time.
pub struct Archiver<'a> {
    tools: &'a ToolSet,
}

impl<'a> Archiver<'a> {
    pub fn new(tools: &'a ToolSet) -> Self {
        Self { tools }
    }

    /// Compress `image` into `archive`, overwriting it
    pub fn compress(&self, image: &Path, archive: &Path) -> Result<(), ToolError> {
        self.stream(&self.tools.compress, image, archive)
    }

    /// Decompress `archive` into `image`, overwriting it
    pub fn decompress(&self, archive: &Path, image: &Path) -> Result<(), ToolError> {
        self.stream(&self.tools.decompress, archive, image)
    }

    /// Run `program -c input > output`, watch it, and block until it exits.
    ///
    /// The output file is truncated up front, so a failed run leaves a
    /// partial file behind.
    fn stream(&self, program: &str, input: &Path, output: &Path) -> Result<(), ToolError> {
        tracing::info!(
            program = %program,
            input = %input.display(),
            output = %output.display(),
            "Streaming image"
        );

        let sink = File::create(output).map_err(|e| ToolError::io("create output", e))?;

        let child = Command::new(program)
            .arg("-c")
            .arg(input)
            .stdin(Stdio::null())
            .stdout(sink)
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ToolError::spawn(program, e))?;

        self.watch(child.id());

        let result = child
            .wait_with_output()
            .map_err(|e| ToolError::io(program, e))?;

        if !result.status.success() {
            return Err(ToolError::exited(program, result.status, &result.stderr));
        }

        tracing::debug!(output = %output.display(), "Stream finished");
        Ok(())
    }

    /// Attach the progress monitor to a running child; best effort
    fn watch(&self, pid: u32) {
        let Some(monitor) = &self.tools.progress else {
            return;
        };

        let pid = pid.to_string();
        match Command::new(monitor)
            .args(["-m", "-p", pid.as_str()])
            .stdin(Stdio::null())
            .status()
        {
            Ok(status) if !status.success() => {
                tracing::debug!(monitor = %monitor, %status, "Progress monitor exited early");
            }
            Ok(_) => {}
            Err(e) => {
                tracing::debug!(monitor = %monitor, error = %e, "Progress monitor unavailable");
            }
        }
    }
}
