use super::command;
use crate::ToolError;
use std::fs;
use std::path::Path;

/// Thin wrapper over the libvirt command line client
pub struct Virsh {
    program: String,
}

impl Virsh {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Write the machine's XML definition to `dest`, replacing any existing file
    pub fn export_definition(&self, name: &str, dest: &Path) -> Result<(), ToolError> {
        tracing::info!(
            machine = %name,
            path = %dest.display(),
            "Exporting machine definition"
        );

        let xml = command::capture(&self.program, &["dumpxml", name], None)?;
        fs::write(dest, xml).map_err(|e| ToolError::io("write definition", e))
    }

    /// Register a machine from a definition file, resolved relative to `workdir`
    pub fn define(&self, definition: &str, workdir: &Path) -> Result<(), ToolError> {
        tracing::info!(
            definition = %definition,
            workdir = %workdir.display(),
            "Defining machine"
        );

        command::capture(&self.program, &["define", definition], Some(workdir))?;
        Ok(())
    }
}
