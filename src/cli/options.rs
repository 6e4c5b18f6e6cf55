use crate::{config::Configuration, VmBackupError, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{ArgAction, Parser};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "vm-backup", version)]
#[command(about = "Back up and restore libvirt machines and their qcow2 disk images", long_about = None)]
#[command(args_override_self = true)]
#[command(disable_help_flag = true, disable_version_flag = true)]
struct Flags {
    /// Back up machines
    #[arg(short = 'b')]
    backup: bool,

    /// Restore machines
    #[arg(short = 'r')]
    restore: bool,

    /// With -r: provision a freshly installed host instead of restoring
    #[arg(short = 'f')]
    fresh_install: bool,

    /// Only act on the named machine
    #[arg(short = 'o', value_name = "NAME")]
    only: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Backup storage directory override
    #[arg(long, env = "VM_BACKUP_DESTINATION", value_name = "DIR")]
    destination: Option<PathBuf>,

    /// Disk image directory override
    #[arg(long, env = "VM_BACKUP_SOURCE", value_name = "DIR")]
    source: Option<PathBuf>,

    /// Comma separated machine list override
    #[arg(long, env = "VM_BACKUP_MACHINES", value_delimiter = ',', value_name = "NAMES")]
    machines: Option<Vec<String>>,

    /// Print help
    #[arg(long, action = ArgAction::Help)]
    help: Option<bool>,

    /// Print version
    #[arg(long, action = ArgAction::Version)]
    version: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    Backup,
    Restore,
}

impl RunMode {
    /// Name written to the completion log line
    pub fn action_name(&self) -> &'static str {
        match self {
            RunMode::Backup => "Backup",
            RunMode::Restore => "Restoration",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunScope {
    AllConfigured,
    SingleNamed(String),
}

/// What one invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: RunMode,
    pub scope: RunScope,
    pub fresh_install: bool,
}

impl Invocation {
    /// Fresh-install provisioning replaces the per-machine restore
    pub fn provisions_host(&self) -> bool {
        self.mode == RunMode::Restore && self.fresh_install
    }
}

/// Parsed command line: the invocation plus the configuration it runs against.
#[derive(Debug, Clone)]
pub struct Options {
    pub invocation: Invocation,
    pub config: Configuration,
    pub verbose: bool,
}

impl Options {
    /// Parse the process arguments (first element is the program name).
    ///
    /// Validation order: unknown flag, missing `-o` name, no flags at all,
    /// both actions, no action, then a machine name paired with fresh-install.
    pub fn parse_from<I, T>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        let flags = Flags::try_parse_from(&args).map_err(classify)?;

        if matches!(flags.only.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(VmBackupError::MissingMachineName);
        }

        if args.len() <= 1 {
            return Err(VmBackupError::NoOptions);
        }

        let mode = match (flags.backup, flags.restore) {
            (true, true) => return Err(VmBackupError::ConflictingActions),
            (true, false) => RunMode::Backup,
            (false, true) => RunMode::Restore,
            (false, false) => return Err(VmBackupError::MissingAction),
        };

        let invocation = Invocation {
            mode,
            scope: match flags.only {
                Some(name) => RunScope::SingleNamed(name),
                None => RunScope::AllConfigured,
            },
            fresh_install: flags.fresh_install,
        };

        if let (true, RunScope::SingleNamed(name)) = (invocation.provisions_host(), &invocation.scope) {
            return Err(VmBackupError::MachineWithoutAction(name.clone()));
        }

        Ok(Self {
            invocation,
            config: Configuration::with_overrides(flags.destination, flags.source, flags.machines),
            verbose: flags.verbose,
        })
    }
}

/// Map clap's parse failures onto the tool's exit-code taxonomy
fn classify(err: clap::Error) -> VmBackupError {
    let invalid_arg = match err.get(ContextKind::InvalidArg) {
        Some(ContextValue::String(arg)) => Some(arg.clone()),
        _ => None,
    };

    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            VmBackupError::Help(err.render().to_string())
        }
        _ if invalid_arg.as_deref().is_some_and(|arg| arg.starts_with("-o")) => {
            VmBackupError::MissingMachineName
        }
        kind => VmBackupError::InvalidOption(invalid_arg.unwrap_or_else(|| kind.to_string())),
    }
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
