//! Display-ready environment information with fallbacks.
//!
//! Every query returns a `String` and never fails. Package-dependent
//! queries report [`FALLBACK_NOT_PACKAGED`] when the process has no
//! package; the install location instead degrades to the executable path.

use std::sync::OnceLock;

use crate::environment::{
    system_environment, EnvironmentQuery, PackageKind, PackageMetadata, RuntimeDescriptor, UNKNOWN,
};

/// Shown for package fields when the process is not packaged.
pub const FALLBACK_NOT_PACKAGED: &str = "Not packaged";

/// Queries about the running application and its host.
pub struct AppInfo {
    environment: Box<dyn EnvironmentQuery>,
    assembly_version: String,
    package: OnceLock<Option<PackageMetadata>>,
    runtime: OnceLock<RuntimeDescriptor>,
}

impl AppInfo {
    /// Create a facade over the given environment.
    ///
    /// `assembly_version` is the build version of the executable, usually
    /// `env!("CARGO_PKG_VERSION")` of the binary crate.
    pub fn new(environment: Box<dyn EnvironmentQuery>, assembly_version: impl Into<String>) -> Self {
        Self {
            environment,
            assembly_version: assembly_version.into(),
            package: OnceLock::new(),
            runtime: OnceLock::new(),
        }
    }

    /// Create a facade over the current target's environment.
    pub fn for_current_process(assembly_version: impl Into<String>) -> Self {
        Self::new(system_environment(), assembly_version)
    }

    /// Package metadata, detected on first use.
    pub fn package(&self) -> Option<&PackageMetadata> {
        self.package
            .get_or_init(|| match self.environment.package() {
                Ok(Some(package)) => {
                    tracing::info!(
                        kind = package.kind.label(),
                        name = %package.display_name,
                        "Running from package"
                    );
                    Some(package)
                }
                Ok(None) => {
                    tracing::info!("Running unpackaged");
                    None
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Package detection failed, treating as unpackaged");
                    None
                }
            })
            .as_ref()
    }

    /// Whether the process runs from an installed package.
    pub fn is_packaged(&self) -> bool {
        self.package().is_some()
    }

    /// Package display name.
    pub fn get_display_name(&self) -> String {
        self.package()
            .map(|p| p.display_name.clone())
            .unwrap_or_else(|| FALLBACK_NOT_PACKAGED.to_string())
    }

    /// Build version of the executable.
    pub fn get_assembly_version(&self) -> String {
        self.assembly_version.clone()
    }

    /// Version recorded in the package metadata.
    ///
    /// AppImages without an embedded version report the build version.
    pub fn get_package_version(&self) -> String {
        match self.package() {
            Some(PackageMetadata { version: Some(version), .. }) => version.clone(),
            Some(PackageMetadata { kind: PackageKind::AppImage, .. }) => {
                self.assembly_version.clone()
            }
            Some(_) => UNKNOWN.to_string(),
            None => FALLBACK_NOT_PACKAGED.to_string(),
        }
    }

    /// Source the package was installed from.
    pub fn get_app_installer_uri(&self) -> String {
        self.package()
            .and_then(|p| p.installer_uri.clone())
            .unwrap_or_else(|| FALLBACK_NOT_PACKAGED.to_string())
    }

    /// Package install directory, or the executable path when unpackaged.
    pub fn get_install_location(&self) -> String {
        if let Some(package) = self.package() {
            return package.install_location.display().to_string();
        }

        match self.environment.executable_path() {
            Ok(path) => path.display().to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "Cannot resolve executable path");
                String::new()
            }
        }
    }

    /// Runtime, OS and architecture, one `Key: value` pair per line.
    pub fn get_runtime_info(&self) -> String {
        let runtime = self.runtime.get_or_init(|| self.environment.runtime());
        format_runtime_info(runtime)
    }
}

fn format_runtime_info(runtime: &RuntimeDescriptor) -> String {
    [
        format!("Runtime: {}", runtime.runtime_version),
        format!("OS: {}", runtime.os_description),
        format!("OS Version: {}", runtime.os_version),
        format!("Architecture: {} ({}-bit)", runtime.architecture, runtime.pointer_width),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::UnpackagedEnvironment;
    use crate::error::AppInfoError;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    /// Scripted environment for exercising the fallback rules.
    struct FakeEnvironment {
        package: Result<Option<PackageMetadata>, &'static str>,
        executable: Option<PathBuf>,
        package_calls: Arc<AtomicUsize>,
    }

    impl FakeEnvironment {
        fn unpackaged() -> Self {
            Self {
                package: Ok(None),
                executable: Some(PathBuf::from("/opt/appinfo/bin/appinfo")),
                package_calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn packaged(package: PackageMetadata) -> Self {
            Self { package: Ok(Some(package)), ..Self::unpackaged() }
        }

        fn failing() -> Self {
            Self { package: Err("access denied"), executable: None, ..Self::unpackaged() }
        }
    }

    impl EnvironmentQuery for FakeEnvironment {
        fn package(&self) -> Result<Option<PackageMetadata>, AppInfoError> {
            self.package_calls.fetch_add(1, Ordering::SeqCst);
            self.package.clone().map_err(AppInfoError::package)
        }

        fn executable_path(&self) -> Result<PathBuf, AppInfoError> {
            self.executable.clone().ok_or_else(|| AppInfoError::environment("no executable"))
        }

        fn runtime(&self) -> RuntimeDescriptor {
            RuntimeDescriptor {
                runtime_version: "rustc 1.80.0 (051478957 2024-07-21)".to_string(),
                os_description: "Linux (Debian GNU/Linux 12)".to_string(),
                os_version: "6.1.0".to_string(),
                architecture: "x86_64".to_string(),
                pointer_width: 64,
            }
        }
    }

    fn msix_package() -> PackageMetadata {
        PackageMetadata {
            kind: PackageKind::Msix,
            display_name: "App Info".to_string(),
            version: Some("1.0.3.0".to_string()),
            installer_uri: Some("https://example.com/appinfo.appinstaller".to_string()),
            install_location: PathBuf::from("C:/Program Files/WindowsApps/AppInfo_1.0.3.0_x64"),
        }
    }

    #[test]
    fn test_unpackaged_fields_use_fallback_literal() {
        let info = AppInfo::new(Box::new(FakeEnvironment::unpackaged()), "0.1.0");
        assert_eq!(info.get_display_name(), "Not packaged");
        assert_eq!(info.get_package_version(), "Not packaged");
        assert_eq!(info.get_app_installer_uri(), "Not packaged");
        assert!(!info.is_packaged());
    }

    #[test]
    fn test_unpackaged_install_location_is_executable_path() {
        let info = AppInfo::new(Box::new(FakeEnvironment::unpackaged()), "0.1.0");
        let location = info.get_install_location();
        assert_eq!(location, PathBuf::from("/opt/appinfo/bin/appinfo").display().to_string());
        assert_ne!(location, FALLBACK_NOT_PACKAGED);
    }

    #[test]
    fn test_unpackaged_process_reports_own_executable() {
        let info = AppInfo::new(Box::new(UnpackagedEnvironment), "0.1.0");
        let exe = std::env::current_exe().unwrap();
        assert_eq!(info.get_install_location(), exe.display().to_string());
        assert_eq!(info.get_display_name(), "Not packaged");
    }

    #[test]
    fn test_assembly_version_needs_no_package() {
        let info = AppInfo::new(Box::new(FakeEnvironment::unpackaged()), "2.4.1");
        assert_eq!(info.get_assembly_version(), "2.4.1");
    }

    #[test]
    fn test_packaged_fields_come_from_metadata() {
        let info = AppInfo::new(Box::new(FakeEnvironment::packaged(msix_package())), "0.1.0");
        assert!(info.is_packaged());
        assert_eq!(info.get_display_name(), "App Info");
        assert_eq!(info.get_package_version(), "1.0.3.0");
        assert_eq!(info.get_app_installer_uri(), "https://example.com/appinfo.appinstaller");
        assert_eq!(
            info.get_install_location(),
            PathBuf::from("C:/Program Files/WindowsApps/AppInfo_1.0.3.0_x64").display().to_string()
        );
    }

    #[test]
    fn test_package_without_tracked_installer_or_version() {
        let package =
            PackageMetadata { version: None, installer_uri: None, ..msix_package() };
        let info = AppInfo::new(Box::new(FakeEnvironment::packaged(package)), "0.1.0");
        assert_eq!(info.get_app_installer_uri(), "Not packaged");
        assert_eq!(info.get_package_version(), "Unknown");
    }

    #[test]
    fn test_appimage_without_version_reports_build_version() {
        let package = PackageMetadata {
            kind: PackageKind::AppImage,
            version: None,
            ..msix_package()
        };
        let info = AppInfo::new(Box::new(FakeEnvironment::packaged(package)), "3.2.1");
        assert_eq!(info.get_package_version(), "3.2.1");
    }

    #[test]
    fn test_detection_errors_never_escape() {
        let info = AppInfo::new(Box::new(FakeEnvironment::failing()), "0.1.0");
        assert_eq!(info.get_display_name(), "Not packaged");
        assert_eq!(info.get_app_installer_uri(), "Not packaged");
        assert_eq!(info.get_package_version(), "Not packaged");
        assert_eq!(info.get_install_location(), "");
    }

    #[test]
    fn test_package_detection_runs_once() {
        let env = FakeEnvironment::unpackaged();
        let calls = env.package_calls.clone();
        let info = AppInfo::new(Box::new(env), "0.1.0");

        for _ in 0..3 {
            info.get_display_name();
            info.get_package_version();
            info.get_app_installer_uri();
            info.get_install_location();
        }
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_queries_are_idempotent() {
        let info = AppInfo::for_current_process(env!("CARGO_PKG_VERSION"));
        assert_eq!(info.get_display_name(), info.get_display_name());
        assert_eq!(info.get_assembly_version(), info.get_assembly_version());
        assert_eq!(info.get_package_version(), info.get_package_version());
        assert_eq!(info.get_app_installer_uri(), info.get_app_installer_uri());
        assert_eq!(info.get_install_location(), info.get_install_location());
        assert_eq!(info.get_runtime_info(), info.get_runtime_info());
    }

    #[test]
    fn test_runtime_info_lines_are_ordered() {
        let info = AppInfo::new(Box::new(FakeEnvironment::unpackaged()), "0.1.0");
        assert_eq!(
            info.get_runtime_info(),
            "Runtime: rustc 1.80.0 (051478957 2024-07-21)\n\
             OS: Linux (Debian GNU/Linux 12)\n\
             OS Version: 6.1.0\n\
             Architecture: x86_64 (64-bit)"
        );
    }

    #[test]
    fn test_current_process_runtime_info_mentions_architecture() {
        let info = AppInfo::for_current_process("0.1.0");
        let runtime = info.get_runtime_info();
        let keys: Vec<&str> =
            runtime.lines().filter_map(|line| line.split_once(": ").map(|(k, _)| k)).collect();
        assert_eq!(keys, ["Runtime", "OS", "OS Version", "Architecture"]);
        assert!(runtime.contains(std::env::consts::ARCH));
    }
}
