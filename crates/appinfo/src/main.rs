//! App Info - shows how this application was packaged and where it runs.

mod app_menus;

use std::sync::Arc;

use appinfo_core::logging::{init_logging, LogConfig};
use appinfo_core::{AppConfig, AppInfo, AppInfoError, Telemetry, TracingTelemetry};
use appinfo_ui::key_bindings::{register_key_bindings, About, CloseWindow, Minimize, Quit, Zoom};
use appinfo_ui::{AppTheme, InfoPanel};
use gpui::{
    px, size, App, AppContext, Application, Bounds, PromptLevel, Size, TitlebarOptions,
    WindowBounds, WindowOptions,
};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn main() {
    let config = AppConfig::from_env();

    // Logging first so configuration and telemetry startup are captured
    let _logging_guard = init_logging(LogConfig::from_app_config(&config));

    tracing::info!(version = VERSION, data_dir = %config.data_dir.display(), "Starting App Info");

    let telemetry: Arc<dyn Telemetry> = if config.telemetry_enabled {
        Arc::new(TracingTelemetry::new(VERSION))
    } else {
        Arc::new(TracingTelemetry::disabled())
    };
    telemetry.initialize();

    Application::new().run(move |cx: &mut App| {
        cx.set_global(AppTheme::from_preference(config.theme));
        cx.set_global(config);

        register_key_bindings(cx);
        let menus = app_menus::app_menus(cx);
        cx.set_menus(menus);
        register_global_actions(cx);

        let window_size = size(px(640.0), px(420.0));
        let bounds = Bounds::centered(None, window_size, cx);

        let window_options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            window_min_size: Some(Size { width: px(480.0), height: px(320.0) }),
            titlebar: Some(TitlebarOptions {
                title: Some("App Info".into()),
                ..Default::default()
            }),
            focus: true,
            show: true,
            ..Default::default()
        };

        let opened = cx.open_window(window_options, move |window, cx| {
            // Close manually; the standard Windows close sequence races with window destruction.
            window.on_window_should_close(cx, |window, cx| {
                window.remove_window();
                cx.quit();
                false
            });

            let info = AppInfo::for_current_process(VERSION);
            cx.new(|cx| InfoPanel::new(info, telemetry, cx))
        });

        if let Err(e) = opened {
            let error = AppInfoError::window(e.to_string());
            tracing::error!(error = %error, "Failed to open main window");
            cx.quit();
            return;
        }

        cx.activate(true);
    });
}

/// Register handlers for global application actions.
///
/// Menu items are only enabled when their action has a registered handler.
fn register_global_actions(cx: &mut App) {
    cx.on_action(|_: &Quit, cx| {
        cx.quit();
    });

    cx.on_action(|_: &About, cx| {
        // Window may be borrowed during menu dispatch
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                let result = window_handle.update(cx, |_, window, cx| {
                    let message = format!("App Info {VERSION}");
                    let detail = "Shows how this application was packaged and where it runs.";
                    let prompt =
                        window.prompt(PromptLevel::Info, &message, Some(detail), &["OK"], cx);
                    cx.background_executor()
                        .spawn(async move {
                            let _ = prompt.await;
                        })
                        .detach();
                });
                if let Err(e) = result {
                    tracing::error!("About dialog failed: {e}");
                }
            }
        });
    });

    cx.on_action(|_: &Minimize, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle
                    .update(cx, |_, window, _cx| {
                        window.minimize_window();
                    })
                    .ok();
            }
        });
    });

    cx.on_action(|_: &Zoom, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle
                    .update(cx, |_, window, _cx| {
                        window.zoom_window();
                    })
                    .ok();
            }
        });
    });

    cx.on_action(|_: &CloseWindow, cx| {
        cx.defer(|cx| {
            if let Some(window_handle) = cx.windows().first().copied() {
                window_handle
                    .update(cx, |_, window, cx| {
                        window.remove_window();
                        cx.quit();
                    })
                    .ok();
            }
        });
    });
}
