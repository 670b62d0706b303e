//! Linux package detection for Flatpak, Snap and AppImage.
//!
//! Detection order is Flatpak, then Snap, then AppImage. The process
//! environment is snapshotted once when the query is created.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::{EnvironmentQuery, PackageKind, PackageMetadata};
use crate::error::AppInfoError;

const FLATPAK_INFO_PATH: &str = "/.flatpak-info";
const FLATPAK_APP_DIR: &str = "/app";
const SNAP_URI_SCHEME: &str = "snap://";

/// Variables consulted during detection.
const DETECTION_VARS: &[&str] = &[
    "FLATPAK_ID",
    "SNAP_NAME",
    "SNAP_VERSION",
    "SNAP_REVISION",
    "SNAP",
    "APPIMAGE",
    "APPDIR",
    "APPIMAGE_VERSION",
];

/// Environment query for Linux sandboxes and bundles.
#[derive(Debug, Clone)]
pub struct LinuxEnvironment {
    vars: HashMap<String, String>,
    flatpak_info_path: PathBuf,
}

impl LinuxEnvironment {
    /// Snapshot the current process environment.
    pub fn from_process() -> Self {
        Self::with_lookup(|key| std::env::var(key).ok())
    }

    /// Snapshot detection variables from an arbitrary lookup.
    pub fn with_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let vars = DETECTION_VARS
            .iter()
            .copied()
            .filter_map(|key| {
                lookup(key).filter(|v| !v.is_empty()).map(|v| (key.to_string(), v))
            })
            .collect();
        Self { vars, flatpak_info_path: PathBuf::from(FLATPAK_INFO_PATH) }
    }

    /// Read Flatpak instance metadata from a different file.
    pub fn with_flatpak_info_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.flatpak_info_path = path.into();
        self
    }

    fn var(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    fn flatpak(&self, app_id: &str) -> Result<PackageMetadata, AppInfoError> {
        let info = FlatpakInfo::read(&self.flatpak_info_path)?;

        let version = info.branch().map(|branch| match info.commit() {
            Some(commit) => format!("{branch} ({})", short_commit(commit)),
            None => branch.to_string(),
        });

        Ok(PackageMetadata {
            kind: PackageKind::Flatpak,
            display_name: info.name().unwrap_or(app_id).to_string(),
            version,
            installer_uri: info.origin().map(String::from),
            install_location: info.app_path().unwrap_or(Path::new(FLATPAK_APP_DIR)).to_path_buf(),
        })
    }

    fn snap(&self, name: &str) -> Result<PackageMetadata, AppInfoError> {
        let install_location = self
            .var("SNAP")
            .map(PathBuf::from)
            .ok_or_else(|| AppInfoError::package("SNAP_NAME is set but SNAP is missing"))?;

        // Locally side-loaded snaps carry an "x"-prefixed revision.
        let sideloaded = self.var("SNAP_REVISION").is_some_and(|rev| rev.starts_with('x'));
        let installer_uri = (!sideloaded).then(|| format!("{SNAP_URI_SCHEME}{name}"));

        Ok(PackageMetadata {
            kind: PackageKind::Snap,
            display_name: name.to_string(),
            version: self.var("SNAP_VERSION").map(String::from),
            installer_uri,
            install_location,
        })
    }

    fn appimage(&self, image: &str) -> PackageMetadata {
        let image_path = Path::new(image);
        let display_name = image_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| image.to_string());
        let install_location = self
            .var("APPDIR")
            .map(PathBuf::from)
            .or_else(|| image_path.parent().map(Path::to_path_buf))
            .unwrap_or_else(|| image_path.to_path_buf());

        PackageMetadata {
            kind: PackageKind::AppImage,
            display_name,
            version: self.var("APPIMAGE_VERSION").map(String::from),
            installer_uri: Some(image.to_string()),
            install_location,
        }
    }
}

impl EnvironmentQuery for LinuxEnvironment {
    fn package(&self) -> Result<Option<PackageMetadata>, AppInfoError> {
        if let Some(app_id) = self.var("FLATPAK_ID") {
            tracing::debug!(app_id, "Detected Flatpak sandbox");
            return self.flatpak(app_id).map(Some);
        }
        if let Some(name) = self.var("SNAP_NAME") {
            tracing::debug!(name, "Detected Snap package");
            return self.snap(name).map(Some);
        }
        if let Some(image) = self.var("APPIMAGE") {
            tracing::debug!(image, "Detected AppImage");
            return Ok(Some(self.appimage(image)));
        }
        Ok(None)
    }
}

fn short_commit(commit: &str) -> &str {
    commit.get(..12).unwrap_or(commit)
}

/// Parsed `/.flatpak-info` keyfile.
#[derive(Debug, Clone, Default)]
pub struct FlatpakInfo {
    groups: HashMap<String, HashMap<String, String>>,
}

impl FlatpakInfo {
    /// Read and parse a keyfile from disk.
    pub fn read(path: &Path) -> Result<Self, AppInfoError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppInfoError::package_with_source(format!("cannot read {}", path.display()), e)
        })?;
        Ok(Self::parse(&contents))
    }

    /// Parse keyfile contents. Malformed lines are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut groups: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for line in contents.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(group) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current = Some(group.to_string());
                groups.entry(group.to_string()).or_default();
                continue;
            }
            if let (Some(group), Some((key, value))) = (&current, line.split_once('=')) {
                groups
                    .entry(group.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        Self { groups }
    }

    /// Look up a key within a group.
    pub fn get(&self, group: &str, key: &str) -> Option<&str> {
        self.groups.get(group)?.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }

    /// Application ID.
    pub fn name(&self) -> Option<&str> {
        self.get("Application", "name")
    }

    /// Deployed application directory on the host.
    pub fn app_path(&self) -> Option<&Path> {
        self.get("Instance", "app-path").map(Path::new)
    }

    /// Installed branch, e.g. "stable".
    pub fn branch(&self) -> Option<&str> {
        self.get("Instance", "branch")
    }

    /// Deployed OSTree commit.
    pub fn commit(&self) -> Option<&str> {
        self.get("Instance", "app-commit")
    }

    /// Remote the application was installed from.
    pub fn origin(&self) -> Option<&str> {
        self.get("Instance", "origin")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FLATPAK_INFO: &str = "\
[Application]
name=org.example.AppInfo
runtime=runtime/org.freedesktop.Platform/x86_64/23.08

# instance details
[Instance]
instance-id=1234567890
app-path=/var/lib/flatpak/app/org.example.AppInfo/x86_64/stable/abcdef/files
app-commit=0123456789abcdef0123
branch=stable
origin=flathub
";

    fn env_with(pairs: &[(&str, &str)]) -> LinuxEnvironment {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        LinuxEnvironment::with_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_plain_process_is_unpackaged() {
        let env = env_with(&[("HOME", "/home/user")]);
        assert!(env.package().unwrap().is_none());
    }

    #[test]
    fn test_empty_variables_are_ignored() {
        let env = env_with(&[("FLATPAK_ID", ""), ("SNAP_NAME", "")]);
        assert!(env.package().unwrap().is_none());
    }

    #[test]
    fn test_flatpak_info_parsing() {
        let info = FlatpakInfo::parse(FLATPAK_INFO);
        assert_eq!(info.name(), Some("org.example.AppInfo"));
        assert_eq!(info.branch(), Some("stable"));
        assert_eq!(info.origin(), Some("flathub"));
        assert_eq!(info.get("Instance", "instance-id"), Some("1234567890"));
        assert_eq!(info.get("Missing", "name"), None);
    }

    #[test]
    fn test_flatpak_detection_reads_instance_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FLATPAK_INFO.as_bytes()).unwrap();

        let env = env_with(&[("FLATPAK_ID", "org.example.AppInfo"), ("SNAP_NAME", "ignored")])
            .with_flatpak_info_path(file.path());
        let package = env.package().unwrap().unwrap();

        assert_eq!(package.kind, PackageKind::Flatpak);
        assert_eq!(package.display_name, "org.example.AppInfo");
        assert_eq!(package.version.as_deref(), Some("stable (0123456789ab)"));
        assert_eq!(package.installer_uri.as_deref(), Some("flathub"));
        assert_eq!(
            package.install_location,
            PathBuf::from("/var/lib/flatpak/app/org.example.AppInfo/x86_64/stable/abcdef/files")
        );
    }

    #[test]
    fn test_flatpak_without_instance_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let env = env_with(&[("FLATPAK_ID", "org.example.AppInfo")])
            .with_flatpak_info_path(dir.path().join("missing"));
        let err = env.package().unwrap_err();
        assert_eq!(err.category(), "Package");
    }

    #[test]
    fn test_snap_from_store() {
        let env = env_with(&[
            ("SNAP_NAME", "appinfo"),
            ("SNAP_VERSION", "1.2.3"),
            ("SNAP_REVISION", "42"),
            ("SNAP", "/snap/appinfo/42"),
        ]);
        let package = env.package().unwrap().unwrap();

        assert_eq!(package.kind, PackageKind::Snap);
        assert_eq!(package.display_name, "appinfo");
        assert_eq!(package.version.as_deref(), Some("1.2.3"));
        assert_eq!(package.installer_uri.as_deref(), Some("snap://appinfo"));
        assert_eq!(package.install_location, PathBuf::from("/snap/appinfo/42"));
    }

    #[test]
    fn test_sideloaded_snap_has_no_installer() {
        let env = env_with(&[
            ("SNAP_NAME", "appinfo"),
            ("SNAP_REVISION", "x1"),
            ("SNAP", "/snap/appinfo/x1"),
        ]);
        let package = env.package().unwrap().unwrap();
        assert!(package.installer_uri.is_none());
        assert!(package.version.is_none());
    }

    #[test]
    fn test_appimage_detection() {
        let env = env_with(&[
            ("APPIMAGE", "/home/user/Apps/AppInfo-x86_64.AppImage"),
            ("APPDIR", "/tmp/.mount_AppInfoXYZ"),
        ]);
        let package = env.package().unwrap().unwrap();

        assert_eq!(package.kind, PackageKind::AppImage);
        assert_eq!(package.display_name, "AppInfo-x86_64");
        assert_eq!(
            package.installer_uri.as_deref(),
            Some("/home/user/Apps/AppInfo-x86_64.AppImage")
        );
        assert_eq!(package.install_location, PathBuf::from("/tmp/.mount_AppInfoXYZ"));
    }

    #[test]
    fn test_appimage_without_appdir_uses_image_directory() {
        let env = env_with(&[("APPIMAGE", "/opt/AppInfo.AppImage")]);
        let package = env.package().unwrap().unwrap();
        assert_eq!(package.install_location, PathBuf::from("/opt"));
        assert!(package.version.is_none());
    }

    #[test]
    fn test_appimage_version_from_environment() {
        let env = env_with(&[
            ("APPIMAGE", "/opt/AppInfo.AppImage"),
            ("APPIMAGE_VERSION", "2.5.0"),
        ]);
        let package = env.package().unwrap().unwrap();
        assert_eq!(package.version.as_deref(), Some("2.5.0"));

        let info = crate::facade::AppInfo::new(Box::new(env), "0.1.0");
        assert_eq!(info.get_package_version(), "2.5.0");
    }

    #[test]
    fn test_appimage_version_defaults_to_build_version() {
        let env = env_with(&[("APPIMAGE", "/opt/AppInfo.AppImage")]);
        let info = crate::facade::AppInfo::new(Box::new(env), "0.1.0");
        assert_eq!(info.get_package_version(), "0.1.0");
    }

    #[test]
    fn test_snap_installer_uri_through_facade() {
        let env = env_with(&[
            ("SNAP_NAME", "appinfo"),
            ("SNAP_REVISION", "42"),
            ("SNAP", "/snap/appinfo/42"),
        ]);
        let info = crate::facade::AppInfo::new(Box::new(env), "0.1.0");
        assert_eq!(info.get_app_installer_uri(), "snap://appinfo");
    }
}
