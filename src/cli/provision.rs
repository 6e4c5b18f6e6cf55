use crate::{
    config::Configuration,
    host::PackageManager,
    report::{OperationReport, Step},
};

/// Install the virtualization stack on a freshly installed host
pub fn execute(config: &Configuration) -> OperationReport {
    tracing::info!("Provisioning fresh host");

    let packages = PackageManager::new(&config.tools.package_manager, &config.tools.packages);
    let mut report = OperationReport::new("host");

    println!("Provisioning host for virtualization...");
    report.record(Step::InstallPackages, packages.install());
    report.record(Step::RefreshPackageIndex, packages.refresh_index());

    report
}
