//! Actions and key bindings for App Info.

use gpui::{actions, App, KeyBinding};

actions!(
    app_info,
    [
        // Application
        Quit,
        About,
        CloseWindow,
        Minimize,
        Zoom,
        // Info panel
        ToggleRuntimeInfo,
    ]
);

/// Keystrokes toggling runtime info. `ctrl-r` also works off macOS.
pub const TOGGLE_RUNTIME_INFO_KEYS: &[&str] = &[
    "cmd-r",
    #[cfg(not(target_os = "macos"))]
    "ctrl-r",
];

/// Register all global key bindings.
///
/// This should be called once during application initialization.
pub fn register_key_bindings(cx: &mut App) {
    cx.bind_keys([
        KeyBinding::new("cmd-q", Quit, None),
        KeyBinding::new("cmd-w", CloseWindow, None),
        KeyBinding::new("cmd-m", Minimize, None),
    ]);

    cx.bind_keys(
        TOGGLE_RUNTIME_INFO_KEYS
            .iter()
            .map(|keys| KeyBinding::new(keys, ToggleRuntimeInfo, Some("InfoPanel"))),
    );
}
