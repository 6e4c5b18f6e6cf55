use crate::{
    config::Configuration,
    host::{Archiver, Virsh},
    report::{OperationReport, Step},
    ToolError,
};
use std::fs;

/// Restore one machine from the backup directory.
///
/// Decompresses the archive over the disk image, copies the definition from
/// the image directory into the backup directory, then re-registers the
/// machine from the definition in the backup directory. Every step runs even
/// if an earlier one failed.
pub fn execute(name: &str, config: &Configuration) -> OperationReport {
    tracing::info!("Restoring machine: {}", name);

    let paths = config.paths_for(name);
    let virsh = Virsh::new(config.tools.virsh.as_str());
    let archiver = Archiver::new(&config.tools);
    let mut report = OperationReport::new(name);

    println!("Restoring machine '{}'...", name);

    println!(
        "  Decompressing {} -> {} (in progress)...",
        paths.archive.display(),
        paths.disk_image.display()
    );
    report.record(
        Step::DecompressImage,
        archiver.decompress(&paths.archive, &paths.disk_image),
    );

    println!("  Copying definition...");
    report.record(
        Step::CopyDefinition,
        fs::copy(&paths.source_definition, &paths.backup_definition)
            .map(|_| ())
            .map_err(|e| ToolError::io("copy definition", e)),
    );

    println!("  Registering machine...");
    report.record(
        Step::DefineMachine,
        virsh.define(&format!("{name}.xml"), &config.destination),
    );

    report
}
