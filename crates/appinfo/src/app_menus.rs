//! Application menu definitions for App Info.

use appinfo_ui::key_bindings::{About, CloseWindow, Minimize, Quit, ToggleRuntimeInfo, Zoom};
use gpui::{App, Menu, MenuItem};

/// Build the application menu structure.
pub fn app_menus(_cx: &mut App) -> Vec<Menu> {
    vec![
        Menu {
            name: "App Info".into(),
            items: vec![
                MenuItem::action("About App Info", About),
                MenuItem::separator(),
                #[cfg(target_os = "macos")]
                MenuItem::os_submenu("Services", gpui::SystemMenuType::Services),
                #[cfg(target_os = "macos")]
                MenuItem::separator(),
                MenuItem::action("Quit App Info", Quit),
            ],
        },
        Menu {
            name: "View".into(),
            items: vec![MenuItem::action("Toggle Runtime Info", ToggleRuntimeInfo)],
        },
        Menu {
            name: "Window".into(),
            items: vec![
                MenuItem::action("Minimize", Minimize),
                MenuItem::action("Zoom", Zoom),
                MenuItem::separator(),
                MenuItem::action("Close Window", CloseWindow),
            ],
        },
        Menu { name: "Help".into(), items: vec![MenuItem::action("About App Info", About)] },
    ]
}
