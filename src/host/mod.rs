// Host collaborators: hypervisor CLI, compression pair, package manager
pub mod archive;
pub mod command;
pub mod packages;
pub mod virsh;

pub use archive::Archiver;
pub use packages::PackageManager;
pub use virsh::Virsh;

use nix::unistd::{gethostname, Uid};

/// Whether the process runs with root privilege
pub fn is_root() -> bool {
    Uid::effective().is_root()
}

/// Host name for the log header, or "unknown" when it cannot be read
pub fn hostname() -> String {
    gethostname()
        .ok()
        .and_then(|name| name.into_string().ok())
        .unwrap_or_else(|| "unknown".to_string())
}
