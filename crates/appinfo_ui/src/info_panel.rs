//! Main window panel listing package and runtime information.
//!
//! Rendering state lives in [`PanelFields`], which the core
//! [`InfoPanelController`] writes into through the [`InfoView`] trait.

use std::collections::HashMap;
use std::sync::Arc;

use appinfo_core::{AppInfo, InfoField, InfoPanelController, InfoView, Telemetry, ToggleState};
use gpui::{
    div, prelude::*, px, ClickEvent, Context, FocusHandle, Focusable, IntoElement, Render,
    SharedString, Window,
};

use crate::button::{Button, ButtonVariant};
use crate::key_bindings::ToggleRuntimeInfo;
use crate::theme::ThemeColors;
use crate::AppTheme;

/// Text shown in each panel field.
#[derive(Debug, Default)]
pub struct PanelFields {
    texts: HashMap<InfoField, SharedString>,
}

impl PanelFields {
    /// Current text of a field, empty if never set.
    pub fn text(&self, field: InfoField) -> SharedString {
        self.texts.get(&field).cloned().unwrap_or_default()
    }
}

impl InfoView for PanelFields {
    fn set_text(&mut self, field: InfoField, value: String) {
        self.texts.insert(field, value.into());
    }
}

/// Info panel view.
pub struct InfoPanel {
    controller: InfoPanelController<PanelFields>,
    focus_handle: FocusHandle,
}

impl InfoPanel {
    /// Create the panel; fields are rendered immediately.
    pub fn new(info: AppInfo, telemetry: Arc<dyn Telemetry>, cx: &mut Context<Self>) -> Self {
        let controller = InfoPanelController::new(info, telemetry, PanelFields::default());
        Self { controller, focus_handle: cx.focus_handle() }
    }

    /// Current toggle state.
    pub fn state(&self) -> ToggleState {
        self.controller.state()
    }

    /// Primary while offering to show, secondary while offering to hide.
    fn toggle_variant(&self) -> ButtonVariant {
        toggle_variant_for(self.state())
    }

    fn toggle_runtime_info(&mut self, cx: &mut Context<Self>) {
        self.controller.on_toggle_activated();
        cx.notify();
    }

    fn render_row(&self, field: InfoField, colors: &ThemeColors) -> impl IntoElement {
        div()
            .w_full()
            .px(px(16.0))
            .py(px(8.0))
            .flex()
            .gap(px(12.0))
            .border_b_1()
            .border_color(colors.border)
            .child(
                div()
                    .w(px(140.0))
                    .flex_none()
                    .text_color(colors.text_muted)
                    .child(field.caption()),
            )
            .child(
                div()
                    .flex_1()
                    .overflow_hidden()
                    .text_color(colors.text)
                    .child(self.controller.view().text(field)),
            )
    }

    fn render_runtime_info(&self, colors: &ThemeColors) -> impl IntoElement {
        let text = self.controller.view().text(InfoField::RuntimeInfo);
        let lines: Vec<SharedString> =
            text.lines().map(|line| SharedString::from(line.to_string())).collect();

        div()
            .flex()
            .flex_col()
            .gap(px(2.0))
            .px(px(16.0))
            .text_size(px(13.0))
            .text_color(colors.text)
            .children(lines.into_iter().map(|line| div().child(line)))
    }
}

fn toggle_variant_for(state: ToggleState) -> ButtonVariant {
    match state {
        ToggleState::Hidden => ButtonVariant::Primary,
        ToggleState::Shown => ButtonVariant::Secondary,
    }
}

impl Focusable for InfoPanel {
    fn focus_handle(&self, _cx: &gpui::App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

impl Render for InfoPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let colors = cx.global::<AppTheme>().colors.clone();
        let label = self.controller.view().text(InfoField::ToggleButton);

        div()
            .key_context("InfoPanel")
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(|this, _: &ToggleRuntimeInfo, _window, cx| {
                this.toggle_runtime_info(cx);
            }))
            .flex()
            .flex_col()
            .size_full()
            .gap(px(16.0))
            .p(px(24.0))
            .bg(colors.background)
            .text_color(colors.text)
            .text_size(px(14.0))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .rounded(px(6.0))
                    .bg(colors.surface)
                    .children(
                        InfoField::STATIC_FIELDS
                            .into_iter()
                            .map(|field| self.render_row(field, &colors)),
                    ),
            )
            .child(
                div().px(px(16.0)).child(
                    Button::new()
                        .id("toggle-runtime-info")
                        .label(label)
                        .variant(self.toggle_variant())
                        .on_click(cx.listener(|this, _: &ClickEvent, _window, cx| {
                            this.toggle_runtime_info(cx);
                        })),
                ),
            )
            .child(self.render_runtime_info(&colors))
    }
}
