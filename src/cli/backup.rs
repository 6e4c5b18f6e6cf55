use crate::{
    config::Configuration,
    host::{Archiver, Virsh},
    report::{OperationReport, Step},
};
use byte_unit::{Byte, UnitType};
use std::fs;

/// Back up one machine: export its definition, then compress its disk image.
///
/// Step failures are recorded in the report and do not stop later steps.
pub fn execute(name: &str, config: &Configuration) -> OperationReport {
    tracing::info!("Backing up machine: {}", name);

    let paths = config.paths_for(name);
    let virsh = Virsh::new(config.tools.virsh.as_str());
    let archiver = Archiver::new(&config.tools);
    let mut report = OperationReport::new(name);

    println!("Backing up machine '{}'...", name);

    println!("  Exporting definition...");
    report.record(
        Step::ExportDefinition,
        virsh.export_definition(name, &paths.backup_definition),
    );

    println!(
        "  Compressing {} -> {} (in progress)...",
        paths.disk_image.display(),
        paths.archive.display()
    );
    report.record(
        Step::CompressImage,
        archiver.compress(&paths.disk_image, &paths.archive),
    );

    if let Ok(metadata) = fs::metadata(&paths.archive) {
        println!("  Archive size: {}", format_size(metadata.len()));
    }

    report
}

/// Format a byte count in binary units
pub fn format_size(bytes: u64) -> String {
    let byte = Byte::from_u64(bytes);
    let adjusted = byte.get_appropriate_unit(UnitType::Binary);
    format!("{adjusted:.2}")
}
