use anyhow::Result;
use chrono::Local;
use std::process::ExitCode;
use vm_backup::{
    cli::Options,
    host,
    orchestrator::{HostOps, Orchestrator},
    runlog::RunLog,
    VmBackupError,
};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<VmBackupError>() {
            Some(VmBackupError::Help(text)) => {
                print!("{}", text);
                ExitCode::SUCCESS
            }
            Some(known) => {
                eprintln!("Error: {}", known);
                ExitCode::from(known.exit_code())
            }
            None => {
                eprintln!("Error: {:#}", err);
                ExitCode::FAILURE
            }
        },
    }
}

fn run() -> Result<()> {
    let options = Options::parse_from(std::env::args_os())?;

    // Initialize logging
    if options.verbose {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::INFO)
            .init();
    }

    if !host::is_root() {
        return Err(VmBackupError::NotRoot.into());
    }

    let config = &options.config;
    let log = RunLog::ensure(config, &host::hostname(), Local::now())?;

    let summary = Orchestrator::new(config, &log).run(&options.invocation, &mut HostOps::new(config))?;

    if summary.failed_steps > 0 {
        tracing::warn!(
            failed_steps = summary.failed_steps,
            "Run finished with failed steps; archives may be incomplete"
        );
    }

    if options.invocation.provisions_host() {
        println!("\n✓ Host provisioning finished");
    } else {
        println!("\n✓ {} finished", options.invocation.mode.action_name());
    }
    if summary.logged {
        println!("  Log: {}", log.path().display());
    }

    Ok(())
}
