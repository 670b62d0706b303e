//! Info panel controller.
//!
//! Owns the runtime info toggle state and pushes facade results into a
//! rendering-agnostic [`InfoView`]. All handlers run on the UI thread.

use std::sync::Arc;

use crate::facade::AppInfo;
use crate::telemetry::{Telemetry, EVENT_SHOW_RUNTIME_INFO, PAGE_MAIN_WINDOW};

/// Button label while runtime info is hidden.
pub const SHOW_RUNTIME_INFO_LABEL: &str = "Show Runtime Info";

/// Button label while runtime info is shown.
pub const HIDE_RUNTIME_INFO_LABEL: &str = "Hide Runtime Info";

/// Text fields rendered by the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InfoField {
    /// Package display name.
    DisplayName,
    /// Build version of the executable.
    AssemblyVersion,
    /// Package version.
    PackageVersion,
    /// Installer source.
    InstalledFrom,
    /// Install directory or executable path.
    InstallLocation,
    /// Runtime description, empty while hidden.
    RuntimeInfo,
    /// Label of the toggle button.
    ToggleButton,
}

impl InfoField {
    /// Fields populated once at construction, in display order.
    pub const STATIC_FIELDS: [InfoField; 5] = [
        InfoField::DisplayName,
        InfoField::AssemblyVersion,
        InfoField::PackageVersion,
        InfoField::InstalledFrom,
        InfoField::InstallLocation,
    ];

    /// Caption shown next to the field.
    pub fn caption(&self) -> &'static str {
        match self {
            Self::DisplayName => "Display Name",
            Self::AssemblyVersion => "Assembly Version",
            Self::PackageVersion => "Package Version",
            Self::InstalledFrom => "Installed From",
            Self::InstallLocation => "Install Location",
            Self::RuntimeInfo => "Runtime Info",
            Self::ToggleButton => "",
        }
    }
}

/// Rendering target for the controller.
pub trait InfoView {
    /// Replace the text of one field.
    fn set_text(&mut self, field: InfoField, value: String);
}

/// Visibility of the runtime info field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToggleState {
    /// Field empty, button offers to show.
    #[default]
    Hidden,
    /// Field populated, button offers to hide.
    Shown,
}

impl ToggleState {
    /// The other state.
    pub fn toggled(self) -> Self {
        match self {
            Self::Hidden => Self::Shown,
            Self::Shown => Self::Hidden,
        }
    }

    /// Whether the runtime info field is populated.
    pub fn is_runtime_info_visible(self) -> bool {
        self == Self::Shown
    }

    /// Label for the toggle button in this state.
    pub fn button_label(self) -> &'static str {
        match self {
            Self::Hidden => SHOW_RUNTIME_INFO_LABEL,
            Self::Shown => HIDE_RUNTIME_INFO_LABEL,
        }
    }
}

/// Controller for the main info panel.
pub struct InfoPanelController<V: InfoView> {
    info: AppInfo,
    telemetry: Arc<dyn Telemetry>,
    view: V,
    state: ToggleState,
}

impl<V: InfoView> InfoPanelController<V> {
    /// Construct the controller and render every field once.
    pub fn new(info: AppInfo, telemetry: Arc<dyn Telemetry>, view: V) -> Self {
        let mut controller = Self { info, telemetry, view, state: ToggleState::Hidden };
        controller.render_static_fields();
        controller.render_toggle();
        controller.telemetry.track_page_view(PAGE_MAIN_WINDOW);
        controller
    }

    /// Handle a toggle button activation.
    pub fn on_toggle_activated(&mut self) -> ToggleState {
        self.telemetry.track_event(EVENT_SHOW_RUNTIME_INFO);
        self.state = self.state.toggled();
        self.render_toggle();
        tracing::debug!(state = ?self.state, "Runtime info toggled");
        self.state
    }

    /// Current toggle state.
    pub fn state(&self) -> ToggleState {
        self.state
    }

    /// The facade backing this panel.
    pub fn info(&self) -> &AppInfo {
        &self.info
    }

    /// The view being rendered into.
    pub fn view(&self) -> &V {
        &self.view
    }

    /// Mutable access to the view.
    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn render_static_fields(&mut self) {
        for field in InfoField::STATIC_FIELDS {
            let value = match field {
                InfoField::DisplayName => self.info.get_display_name(),
                InfoField::AssemblyVersion => self.info.get_assembly_version(),
                InfoField::PackageVersion => self.info.get_package_version(),
                InfoField::InstalledFrom => self.info.get_app_installer_uri(),
                InfoField::InstallLocation => self.info.get_install_location(),
                InfoField::RuntimeInfo | InfoField::ToggleButton => continue,
            };
            self.view.set_text(field, value);
        }
    }

    // Content and label are always written together.
    fn render_toggle(&mut self) {
        let content = match self.state {
            ToggleState::Shown => self.info.get_runtime_info(),
            ToggleState::Hidden => String::new(),
        };
        self.view.set_text(InfoField::RuntimeInfo, content);
        self.view.set_text(InfoField::ToggleButton, self.state.button_label().to_string());
    }
}
