#[cfg(test)]
mod tests {
    use super::super::{MachineOps, Orchestrator};
    use crate::cli::{Invocation, RunMode, RunScope};
    use crate::config::Configuration;
    use crate::report::{OperationReport, Step};
    use crate::runlog::RunLog;
    use crate::ToolError;
    use chrono::Local;
    use tempfile::TempDir;

    /// Records every call instead of touching the host
    #[derive(Default)]
    struct RecordingOps {
        calls: Vec<String>,
        fail_backup_of: Option<String>,
    }

    impl MachineOps for RecordingOps {
        fn backup(&mut self, name: &str) -> OperationReport {
            self.calls.push(format!("backup:{name}"));
            let mut report = OperationReport::new(name);
            let result = if self.fail_backup_of.as_deref() == Some(name) {
                Err(ToolError::io("gzip", std::io::Error::other("no space left")))
            } else {
                Ok(())
            };
            report.record(Step::CompressImage, result);
            report
        }

        fn restore(&mut self, name: &str) -> OperationReport {
            self.calls.push(format!("restore:{name}"));
            OperationReport::new(name)
        }

        fn provision(&mut self) -> OperationReport {
            self.calls.push("provision".to_string());
            OperationReport::new("host")
        }
    }

    fn create_test_environment() -> (Configuration, RunLog, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let destination = temp_dir.path().join("backup");
        let source = temp_dir.path().join("images");
        std::fs::create_dir_all(&destination).unwrap();
        std::fs::create_dir_all(&source).unwrap();

        let config = Configuration::with_overrides(
            Some(destination),
            Some(source),
            Some(vec!["m1".to_string(), "m2".to_string()]),
        );
        let log = RunLog::ensure(&config, "hv01", Local::now()).unwrap();
        (config, log, temp_dir)
    }

    fn invocation(mode: RunMode, scope: RunScope, fresh_install: bool) -> Invocation {
        Invocation {
            mode,
            scope,
            fresh_install,
        }
    }

    fn completion_lines(log: &RunLog) -> Vec<String> {
        std::fs::read_to_string(log.path())
            .unwrap()
            .lines()
            .filter(|line| line.contains("completed by"))
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_backup_all_in_order() {
        let (config, log, _temp) = create_test_environment();
        let mut ops = RecordingOps::default();

        let summary = Orchestrator::new(&config, &log)
            .run(&invocation(RunMode::Backup, RunScope::AllConfigured, false), &mut ops)
            .unwrap();

        assert_eq!(ops.calls, vec!["backup:m1", "backup:m2"]);
        assert_eq!(summary.processed, vec!["m1", "m2"]);
        assert!(summary.logged);

        let lines = completion_lines(&log);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Backup of m1,m2 completed by vm-backup on "));
    }

    #[test]
    fn test_restore_all_logs_restoration() {
        let (config, log, _temp) = create_test_environment();
        let mut ops = RecordingOps::default();

        Orchestrator::new(&config, &log)
            .run(&invocation(RunMode::Restore, RunScope::AllConfigured, false), &mut ops)
            .unwrap();

        assert_eq!(ops.calls, vec!["restore:m1", "restore:m2"]);
        let lines = completion_lines(&log);
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("Restoration of m1,m2 "));
    }

    #[test]
    fn test_single_machine_not_logged() {
        let (config, log, _temp) = create_test_environment();

        for mode in [RunMode::Backup, RunMode::Restore] {
            let mut ops = RecordingOps::default();
            let summary = Orchestrator::new(&config, &log)
                .run(
                    &invocation(mode, RunScope::SingleNamed("m1".to_string()), false),
                    &mut ops,
                )
                .unwrap();

            assert_eq!(ops.calls.len(), 1);
            assert!(ops.calls[0].ends_with(":m1"));
            assert_eq!(summary.processed, vec!["m1"]);
            assert!(!summary.logged);
        }

        assert!(completion_lines(&log).is_empty());
    }

    #[test]
    fn test_single_machine_outside_list() {
        let (config, log, _temp) = create_test_environment();
        let mut ops = RecordingOps::default();

        Orchestrator::new(&config, &log)
            .run(
                &invocation(RunMode::Backup, RunScope::SingleNamed("adhoc".to_string()), false),
                &mut ops,
            )
            .unwrap();

        assert_eq!(ops.calls, vec!["backup:adhoc"]);
    }

    #[test]
    fn test_fresh_install_only_provisions() {
        let (config, log, _temp) = create_test_environment();
        let mut ops = RecordingOps::default();

        let summary = Orchestrator::new(&config, &log)
            .run(&invocation(RunMode::Restore, RunScope::AllConfigured, true), &mut ops)
            .unwrap();

        assert_eq!(ops.calls, vec!["provision"]);
        assert!(summary.processed.is_empty());
        assert!(!summary.logged);
        assert!(completion_lines(&log).is_empty());
    }

    #[test]
    fn test_step_failure_does_not_stop_run() {
        let (config, log, _temp) = create_test_environment();
        let mut ops = RecordingOps {
            fail_backup_of: Some("m1".to_string()),
            ..Default::default()
        };

        let summary = Orchestrator::new(&config, &log)
            .run(&invocation(RunMode::Backup, RunScope::AllConfigured, false), &mut ops)
            .unwrap();

        assert_eq!(ops.calls, vec!["backup:m1", "backup:m2"]);
        assert_eq!(summary.failed_steps, 1);
        assert_eq!(summary.processed, vec!["m1", "m2"]);
        assert_eq!(completion_lines(&log).len(), 1);
    }
}
