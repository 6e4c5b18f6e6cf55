use crate::ToolError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    ExportDefinition,
    CompressImage,
    DecompressImage,
    CopyDefinition,
    DefineMachine,
    InstallPackages,
    RefreshPackageIndex,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::ExportDefinition => write!(f, "export definition"),
            Step::CompressImage => write!(f, "compress image"),
            Step::DecompressImage => write!(f, "decompress image"),
            Step::CopyDefinition => write!(f, "copy definition"),
            Step::DefineMachine => write!(f, "define machine"),
            Step::InstallPackages => write!(f, "install packages"),
            Step::RefreshPackageIndex => write!(f, "refresh package index"),
        }
    }
}

#[derive(Debug)]
pub struct StepOutcome {
    pub step: Step,
    pub result: Result<(), ToolError>,
}

/// Outcome of every external step run for one machine (or the host).
#[derive(Debug)]
pub struct OperationReport {
    pub subject: String,
    pub steps: Vec<StepOutcome>,
}

impl OperationReport {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, step: Step, result: Result<(), ToolError>) {
        self.steps.push(StepOutcome { step, result });
    }

    pub fn failures(&self) -> impl Iterator<Item = (Step, &ToolError)> {
        self.steps
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().err().map(|e| (outcome.step, e)))
    }

    pub fn is_clean(&self) -> bool {
        self.failures().next().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failures_are_listed_in_order() {
        let mut report = OperationReport::new("vm1");
        report.record(Step::ExportDefinition, Ok(()));
        report.record(
            Step::CompressImage,
            Err(ToolError::io("gzip", std::io::Error::other("disk full"))),
        );

        assert!(!report.is_clean());
        let failed: Vec<Step> = report.failures().map(|(step, _)| step).collect();
        assert_eq!(failed, vec![Step::CompressImage]);
    }
}
