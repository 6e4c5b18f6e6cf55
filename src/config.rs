use std::path::{Path, PathBuf};

/// Backup storage root used when no override is given
pub const DEFAULT_DESTINATION: &str = "/mnt/vm-backup";

/// libvirt image pool used when no override is given
pub const DEFAULT_SOURCE: &str = "/var/lib/libvirt/images";

/// Machines backed up on a full run, in order
pub const DEFAULT_MACHINES: &[&str] = &["debian", "ubuntu-server", "windows10"];

pub const LOG_FILE_NAME: &str = "vm-backup.log";

/// Packages installed when provisioning a fresh host
pub const PROVISION_PACKAGES: &[&str] = &[
    "qemu-kvm",
    "libvirt-daemon-system",
    "libvirt-clients",
    "bridge-utils",
    "virtinst",
    "virt-manager",
];

/// External programs the tool drives.
#[derive(Debug, Clone)]
pub struct ToolSet {
    pub virsh: String,
    pub compress: String,
    pub decompress: String,
    /// Progress monitor attached to a running (de)compression; `None` disables it.
    pub progress: Option<String>,
    pub package_manager: String,
    pub packages: Vec<String>,
}

impl Default for ToolSet {
    fn default() -> Self {
        Self {
            virsh: "virsh".to_string(),
            compress: "gzip".to_string(),
            decompress: "gunzip".to_string(),
            progress: Some("progress".to_string()),
            package_manager: "apt-get".to_string(),
            packages: PROVISION_PACKAGES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Immutable run configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct Configuration {
    pub destination: PathBuf,
    pub source: PathBuf,
    pub machines: Vec<String>,
    pub log_file_name: String,
    pub tools: ToolSet,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            destination: PathBuf::from(DEFAULT_DESTINATION),
            source: PathBuf::from(DEFAULT_SOURCE),
            machines: DEFAULT_MACHINES.iter().map(|m| m.to_string()).collect(),
            log_file_name: LOG_FILE_NAME.to_string(),
            tools: ToolSet::default(),
        }
    }
}

impl Configuration {
    /// Apply operator overrides on top of the static defaults
    pub fn with_overrides(
        destination: Option<PathBuf>,
        source: Option<PathBuf>,
        machines: Option<Vec<String>>,
    ) -> Self {
        let mut config = Self::default();
        if let Some(destination) = destination {
            config.destination = destination;
        }
        if let Some(source) = source {
            config.source = source;
        }
        if let Some(machines) = machines {
            config.machines = machines.into_iter().filter(|m| !m.is_empty()).collect();
        }
        config
    }

    pub fn log_path(&self) -> PathBuf {
        self.destination.join(&self.log_file_name)
    }

    pub fn paths_for(&self, name: &str) -> MachinePaths {
        MachinePaths::new(name, &self.source, &self.destination)
    }
}

/// File locations for one machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MachinePaths {
    pub disk_image: PathBuf,
    pub archive: PathBuf,
    pub source_definition: PathBuf,
    pub backup_definition: PathBuf,
}

impl MachinePaths {
    fn new(name: &str, source: &Path, destination: &Path) -> Self {
        Self {
            disk_image: source.join(format!("{name}.qcow2")),
            archive: destination.join(format!("{name}.qcow2.backup.gz")),
            source_definition: source.join(format!("{name}.xml")),
            backup_definition: destination.join(format!("{name}.xml")),
        }
    }
}
