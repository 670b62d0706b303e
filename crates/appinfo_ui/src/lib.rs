//! UI components and theming for App Info.

pub mod button;
pub mod info_panel;
pub mod key_bindings;
pub mod theme;

pub use button::{Button, ButtonVariant};
pub use info_panel::{InfoPanel, PanelFields};
pub use theme::{AppTheme, ThemeColors};
