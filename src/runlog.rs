use crate::{config::Configuration, Result, VmBackupError};
use chrono::{DateTime, Local};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

pub const LOG_TITLE: &str = "VM Backup Log";
pub const TOOL_NAME: &str = "vm-backup";
const END_PREFIX: &str = "End:";
const SEPARATOR: &str = "----------------------------------------";
const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Append-only text log kept in the backup directory.
///
/// Only the `End:` header line is ever rewritten. There is no locking, so
/// two concurrent runs against one destination can interleave writes.
#[derive(Debug)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Check both directories exist, then create the log or refresh its `End:` line
    pub fn ensure(config: &Configuration, host: &str, now: DateTime<Local>) -> Result<Self> {
        if !config.destination.is_dir() {
            return Err(VmBackupError::DestinationMissing(config.destination.clone()));
        }
        if !config.source.is_dir() {
            return Err(VmBackupError::SourcePathMissing(config.source.clone()));
        }

        let log = Self {
            path: config.log_path(),
        };
        let today = now.format(DATE_FORMAT).to_string();

        if log.path.exists() {
            log.update_end(&today)?;
        } else {
            log.write_header(config, host, &today)?;
        }

        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append the summary line for a full run, followed by a blank line
    pub fn record_completion(
        &self,
        action: &str,
        processed: &[String],
        now: DateTime<Local>,
    ) -> Result<()> {
        let names = if processed.is_empty() {
            "(none)".to_string()
        } else {
            processed.join(",")
        };

        let mut file = OpenOptions::new().append(true).open(&self.path)?;
        writeln!(
            file,
            "{} of {} completed by {} on {}",
            action,
            names,
            TOOL_NAME,
            now.format(DATETIME_FORMAT)
        )?;
        writeln!(file)?;

        tracing::info!(path = %self.path.display(), action = %action, "Recorded completion");
        Ok(())
    }

    fn write_header(&self, config: &Configuration, host: &str, today: &str) -> Result<()> {
        tracing::info!(path = %self.path.display(), "Creating log file");

        let header = format!(
            "{LOG_TITLE}\nHost: {host}\nSource: {}\nDestination: {}\nStart: {today}\n{END_PREFIX}\n{SEPARATOR}\n",
            config.source.display(),
            config.destination.display(),
        );
        fs::write(&self.path, header)?;
        Ok(())
    }

    fn update_end(&self, today: &str) -> Result<()> {
        let contents = fs::read_to_string(&self.path)?;

        match rewrite_end(&contents, today) {
            Some(updated) => fs::write(&self.path, updated)?,
            None => tracing::warn!(
                path = %self.path.display(),
                "Log has no End: line, leaving it untouched"
            ),
        }

        Ok(())
    }
}

/// Replace the first `End:` line, keeping every other byte as is
fn rewrite_end(contents: &str, today: &str) -> Option<String> {
    let mut updated = String::with_capacity(contents.len() + today.len() + 1);
    let mut replaced = false;

    for line in contents.split_inclusive('\n') {
        if !replaced && line.starts_with(END_PREFIX) {
            updated.push_str(END_PREFIX);
            updated.push(' ');
            updated.push_str(today);
            if line.ends_with('\n') {
                updated.push('\n');
            }
            replaced = true;
        } else {
            updated.push_str(line);
        }
    }

    replaced.then_some(updated)
}

#[cfg(test)]
#[path = "runlog_tests.rs"]
mod runlog_tests;
