//! Platform queries for packaging status and host runtime details.
//!
//! Each target gets one [`EnvironmentQuery`] implementation. Implementations
//! report raw results, including errors; turning those into display strings
//! is the job of [`crate::facade::AppInfo`].

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "windows")]
mod msix;

#[cfg(target_os = "linux")]
pub use linux::{FlatpakInfo, LinuxEnvironment};
#[cfg(target_os = "windows")]
pub use msix::WindowsEnvironment;

use std::path::PathBuf;

use serde::Serialize;
use sysinfo::System;

use crate::error::AppInfoError;

/// Rust toolchain that compiled this crate.
pub const RUSTC_VERSION: &str = env!("APPINFO_RUSTC_VERSION");

/// Distribution format the running process was installed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PackageKind {
    /// Windows MSIX / AppX package.
    Msix,
    /// Flatpak sandbox.
    Flatpak,
    /// Snap package.
    Snap,
    /// Self-mounting AppImage.
    AppImage,
}

impl PackageKind {
    /// Human-readable name of the package format.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Msix => "MSIX",
            Self::Flatpak => "Flatpak",
            Self::Snap => "Snap",
            Self::AppImage => "AppImage",
        }
    }
}

/// Metadata of the package the process was launched from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
    /// Package format.
    pub kind: PackageKind,
    /// Display name registered with the package.
    pub display_name: String,
    /// Version recorded in the package, if the format tracks one.
    pub version: Option<String>,
    /// Where the package was installed from, if tracked.
    pub installer_uri: Option<String>,
    /// Directory the package is installed under.
    pub install_location: PathBuf,
}

/// Host runtime, OS and architecture of the running process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RuntimeDescriptor {
    /// Toolchain version the binary was built with.
    pub runtime_version: String,
    /// Long OS name, e.g. "Linux (Ubuntu 24.04)".
    pub os_description: String,
    /// Kernel or OS build version.
    pub os_version: String,
    /// CPU architecture of the process.
    pub architecture: String,
    /// Pointer width of the process in bits.
    pub pointer_width: u32,
}

impl RuntimeDescriptor {
    /// Collect the descriptor for the current process.
    pub fn collect() -> Self {
        Self {
            runtime_version: RUSTC_VERSION.to_string(),
            os_description: System::long_os_version()
                .or_else(System::name)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            os_version: System::kernel_version()
                .or_else(System::os_version)
                .unwrap_or_else(|| UNKNOWN.to_string()),
            architecture: std::env::consts::ARCH.to_string(),
            pointer_width: usize::BITS,
        }
    }
}

/// Placeholder for descriptor parts the OS does not report.
pub const UNKNOWN: &str = "Unknown";

/// Read-only queries against the hosting environment.
pub trait EnvironmentQuery: Send + Sync {
    /// Package the process runs from, or `Ok(None)` when unpackaged.
    fn package(&self) -> Result<Option<PackageMetadata>, AppInfoError>;

    /// Path of the running executable.
    fn executable_path(&self) -> Result<PathBuf, AppInfoError> {
        Ok(std::env::current_exe()?)
    }

    /// Runtime, OS and architecture description.
    fn runtime(&self) -> RuntimeDescriptor {
        RuntimeDescriptor::collect()
    }
}

/// Environment for targets without a supported package format.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnpackagedEnvironment;

impl EnvironmentQuery for UnpackagedEnvironment {
    fn package(&self) -> Result<Option<PackageMetadata>, AppInfoError> {
        Ok(None)
    }
}

/// Environment query implementation for the current target.
pub fn system_environment() -> Box<dyn EnvironmentQuery> {
    #[cfg(target_os = "linux")]
    {
        Box::new(LinuxEnvironment::from_process())
    }
    #[cfg(target_os = "windows")]
    {
        Box::new(WindowsEnvironment)
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        Box::new(UnpackagedEnvironment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_descriptor_reports_process_architecture() {
        let runtime = RuntimeDescriptor::collect();
        assert_eq!(runtime.architecture, std::env::consts::ARCH);
        assert!(runtime.pointer_width == 32 || runtime.pointer_width == 64);
        assert!(!runtime.runtime_version.is_empty());
        assert!(!runtime.os_description.is_empty());
        assert!(!runtime.os_version.is_empty());
    }

    #[test]
    fn test_unpackaged_environment_has_no_package() {
        let env = UnpackagedEnvironment;
        assert!(env.package().unwrap().is_none());
        assert!(env.executable_path().is_ok());
    }

    #[test]
    fn test_package_kind_labels() {
        assert_eq!(PackageKind::Msix.label(), "MSIX");
        assert_eq!(PackageKind::AppImage.label(), "AppImage");
    }
}
