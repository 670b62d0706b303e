//! MSIX package identity via the WinRT `ApplicationModel` API.

use std::path::PathBuf;

use windows::core::HRESULT;
use windows::ApplicationModel::Package;

use super::{EnvironmentQuery, PackageKind, PackageMetadata};
use crate::error::AppInfoError;

/// `HRESULT_FROM_WIN32(APPMODEL_ERROR_NO_PACKAGE)`: the process has no package identity.
const APPMODEL_ERROR_NO_PACKAGE: HRESULT = HRESULT(0x8007_3D54_u32 as i32);

/// Environment query for Windows processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct WindowsEnvironment;

impl EnvironmentQuery for WindowsEnvironment {
    fn package(&self) -> Result<Option<PackageMetadata>, AppInfoError> {
        let package = match Package::Current() {
            Ok(package) => package,
            Err(e) if e.code() == APPMODEL_ERROR_NO_PACKAGE => return Ok(None),
            Err(e) => return Err(winrt_error("Package::Current failed", e)),
        };

        let display_name = package
            .DisplayName()
            .map_err(|e| winrt_error("cannot read package display name", e))?
            .to_string();

        let version = package
            .Id()
            .and_then(|id| id.Version())
            .map(|v| format!("{}.{}.{}.{}", v.Major, v.Minor, v.Build, v.Revision))
            .map_err(|e| winrt_error("cannot read package version", e))?;

        let install_location = package
            .InstalledLocation()
            .and_then(|folder| folder.Path())
            .map(|path| PathBuf::from(path.to_string()))
            .map_err(|e| winrt_error("cannot read package install location", e))?;

        // Packages deployed without an .appinstaller file have no installer info.
        let installer_uri = match package.GetAppInstallerInfo().and_then(|info| info.Uri()) {
            Ok(uri) => uri.AbsoluteUri().ok().map(|s| s.to_string()),
            Err(e) => {
                tracing::debug!(error = %e, "No App Installer info for package");
                None
            }
        };

        Ok(Some(PackageMetadata {
            kind: PackageKind::Msix,
            display_name,
            version: Some(version),
            installer_uri,
            install_location,
        }))
    }
}

fn winrt_error(message: &str, err: windows::core::Error) -> AppInfoError {
    AppInfoError::package_with_source(message, err)
}
