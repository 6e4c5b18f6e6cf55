use crate::{
    cli::{self, Invocation, RunMode, RunScope},
    config::Configuration,
    report::OperationReport,
    runlog::RunLog,
    Result,
};
use chrono::Local;

/// The per-machine work the orchestrator dispatches to.
pub trait MachineOps {
    fn backup(&mut self, name: &str) -> OperationReport;
    fn restore(&mut self, name: &str) -> OperationReport;
    fn provision(&mut self) -> OperationReport;
}

/// Operations against the real host tools
pub struct HostOps<'a> {
    config: &'a Configuration,
}

impl<'a> HostOps<'a> {
    pub fn new(config: &'a Configuration) -> Self {
        Self { config }
    }
}

impl MachineOps for HostOps<'_> {
    fn backup(&mut self, name: &str) -> OperationReport {
        cli::backup::execute(name, self.config)
    }

    fn restore(&mut self, name: &str) -> OperationReport {
        cli::restore::execute(name, self.config)
    }

    fn provision(&mut self) -> OperationReport {
        cli::provision::execute(self.config)
    }
}

/// What a run did.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Machines processed, in the order they ran
    pub processed: Vec<String>,
    pub failed_steps: usize,
    /// Whether a completion line was appended to the log
    pub logged: bool,
}

pub struct Orchestrator<'a> {
    config: &'a Configuration,
    log: &'a RunLog,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a Configuration, log: &'a RunLog) -> Self {
        Self { config, log }
    }

    /// Run the invocation's action over its scope, one machine at a time.
    ///
    /// Only a full-fleet run appends a completion line; single-machine runs
    /// and fresh-install provisioning leave the log body alone.
    pub fn run<O: MachineOps>(&self, invocation: &Invocation, ops: &mut O) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        if invocation.provisions_host() {
            let report = ops.provision();
            summary.failed_steps += inspect(&report);
            return Ok(summary);
        }

        let targets: Vec<&str> = match &invocation.scope {
            RunScope::SingleNamed(name) => vec![name.as_str()],
            RunScope::AllConfigured => self.config.machines.iter().map(String::as_str).collect(),
        };

        tracing::info!(
            action = invocation.mode.action_name(),
            machines = ?targets,
            "Starting run"
        );

        for name in targets {
            let report = match invocation.mode {
                RunMode::Backup => ops.backup(name),
                RunMode::Restore => ops.restore(name),
            };
            summary.failed_steps += inspect(&report);
            summary.processed.push(name.to_string());
        }

        if invocation.scope == RunScope::AllConfigured {
            self.log.record_completion(
                invocation.mode.action_name(),
                &summary.processed,
                Local::now(),
            )?;
            summary.logged = true;
        }

        Ok(summary)
    }
}

/// Report failed steps and carry on; returns how many failed
fn inspect(report: &OperationReport) -> usize {
    let mut failed = 0;
    for (step, error) in report.failures() {
        tracing::warn!(
            machine = %report.subject,
            step = %step,
            error = %error,
            "Step failed, continuing"
        );
        failed += 1;
    }

    if failed == 0 {
        println!("  ✓ {} done", report.subject);
    } else {
        println!("  ! {} finished with {} failed step(s)", report.subject, failed);
    }

    failed
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod orchestrator_tests;
