use super::command;
use crate::ToolError;

/// System package manager used to provision a fresh host
pub struct PackageManager<'a> {
    program: &'a str,
    packages: &'a [String],
}

impl<'a> PackageManager<'a> {
    pub fn new(program: &'a str, packages: &'a [String]) -> Self {
        Self { program, packages }
    }

    pub fn install(&self) -> Result<(), ToolError> {
        tracing::info!(packages = ?self.packages, "Installing virtualization packages");

        let mut args = vec!["install", "-y"];
        args.extend(self.packages.iter().map(String::as_str));
        command::interactive(self.program, &args)
    }

    pub fn refresh_index(&self) -> Result<(), ToolError> {
        tracing::info!("Refreshing package index");
        command::interactive(self.program, &["update"])
    }
}
