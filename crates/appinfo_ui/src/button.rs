//! Button component with primary and secondary variants.

use gpui::{
    div, prelude::*, px, App, ClickEvent, CursorStyle, ElementId, Hsla, IntoElement, RenderOnce,
    SharedString, Window,
};

use crate::AppTheme;

/// Type alias for button click handler callback.
pub type ClickHandler = Box<dyn Fn(&ClickEvent, &mut Window, &mut App) + 'static>;

/// Button variant styles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Primary action button with accent background.
    #[default]
    Primary,
    /// Secondary button with subtle background.
    Secondary,
}

/// A labelled button.
#[derive(IntoElement)]
pub struct Button {
    id: ElementId,
    label: SharedString,
    variant: ButtonVariant,
    on_click: Option<ClickHandler>,
}

impl Button {
    /// Create a new button with an empty label.
    pub fn new() -> Self {
        Self {
            id: ElementId::Name("button".into()),
            label: SharedString::default(),
            variant: ButtonVariant::default(),
            on_click: None,
        }
    }

    /// Set the button ID.
    pub fn id(mut self, id: impl Into<ElementId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the button label.
    pub fn label(mut self, label: impl Into<SharedString>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the button variant.
    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Set the click handler.
    pub fn on_click(
        mut self,
        handler: impl Fn(&ClickEvent, &mut Window, &mut App) + 'static,
    ) -> Self {
        self.on_click = Some(Box::new(handler));
        self
    }

    /// Background, hover background and text colors for the variant.
    fn colors(&self, theme: &AppTheme) -> (Hsla, Hsla, Hsla) {
        let colors = &theme.colors;
        match self.variant {
            ButtonVariant::Primary => (colors.accent, colors.accent_hover, colors.on_accent),
            ButtonVariant::Secondary => {
                (colors.element_background, colors.element_hover, colors.text)
            }
        }
    }
}

impl Default for Button {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOnce for Button {
    fn render(self, _window: &mut Window, cx: &mut App) -> impl IntoElement {
        let theme = cx.global::<AppTheme>();
        let (bg, hover_bg, text_color) = self.colors(theme);

        let mut button = div()
            .id(self.id)
            .h(px(32.0))
            .px(px(12.0))
            .flex()
            .items_center()
            .justify_center()
            .rounded(px(4.0))
            .bg(bg)
            .text_color(text_color)
            .text_size(px(14.0))
            .cursor(CursorStyle::PointingHand)
            .hover(|style| style.bg(hover_bg))
            .child(self.label);

        if let Some(handler) = self.on_click {
            button = button.on_click(move |event, window, cx| handler(event, window, cx));
        }

        button
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_construction() {
        let button = Button::new()
            .id("toggle")
            .label("Show Runtime Info")
            .variant(ButtonVariant::Secondary);

        assert_eq!(button.label, SharedString::from("Show Runtime Info"));
        assert_eq!(button.variant, ButtonVariant::Secondary);
        assert!(button.on_click.is_none());
    }

    #[test]
    fn test_variant_colors_follow_theme() {
        let theme = AppTheme::dark();
        let (bg, _, text) = Button::new().colors(&theme);
        assert_eq!(bg, theme.colors.accent);
        assert_eq!(text, theme.colors.on_accent);

        let (bg, _, text) = Button::new().variant(ButtonVariant::Secondary).colors(&theme);
        assert_eq!(bg, theme.colors.element_background);
        assert_eq!(text, theme.colors.text);
    }
}
