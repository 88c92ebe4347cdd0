//! Style functions parameterized by ColorScheme.
//!
//! Each function returns a closure suitable for Iced's `.style()` method,
//! capturing the needed color tokens from a `ColorScheme`.

use iced::widget::{button, container, scrollable};
use iced::{Background, Border, Color, Shadow, Theme, Vector};

use crate::style;

use super::ColorScheme;

/// A card container: surface background, rounded corners, subtle border.
pub fn card(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        text_color: None,
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_LG.into(),
        },
        ..Default::default()
    }
}

/// Top toolbar strip.
pub fn toolbar(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_low;
    let text = cs.on_surface;
    move |_theme| container::Style {
        text_color: Some(text),
        background: Some(Background::Color(bg)),
        ..Default::default()
    }
}

pub fn primary_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let primary = cs.primary;
    let primary_hover = cs.primary_hover;
    let primary_dim = cs.primary_dim;
    let on_primary = cs.on_primary;
    let disabled_bg = cs.surface_container_high;
    let disabled_text = cs.outline;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (primary_hover, on_primary),
            button::Status::Pressed => (primary_dim, on_primary),
            button::Status::Disabled => (disabled_bg, disabled_text),
            button::Status::Active => (primary, on_primary),
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Danger action button (Delete, delete confirmation).
pub fn danger_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let error = cs.error;
    let error_hover = cs.error_hover;
    let error_pressed = cs.error_pressed;
    let on_error = cs.on_error;
    let disabled_bg = cs.surface_container_high;
    let disabled_text = cs.outline;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (error_hover, on_error),
            button::Status::Pressed => (error_pressed, on_error),
            button::Status::Disabled => (disabled_bg, disabled_text),
            button::Status::Active => (error, on_error),
        };
        button::Style {
            background: Some(Background::Color(bg)),
            text_color,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Outlined button with a transparent background.
pub fn ghost_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;
    let on_surface_variant = cs.on_surface_variant;
    let outline_variant = cs.outline_variant;

    move |_theme, status| {
        let (bg, text_color) = match status {
            button::Status::Hovered => (Some(Background::Color(surface_bright)), on_surface),
            _ => (None, on_surface_variant),
        };
        button::Style {
            background: bg,
            text_color,
            border: Border {
                color: outline_variant,
                width: 1.0,
                radius: style::RADIUS_MD.into(),
            },
            ..Default::default()
        }
    }
}

/// Borderless icon button.
pub fn icon_button(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let surface_bright = cs.surface_bright;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered => Some(Background::Color(surface_bright)),
            _ => None,
        };
        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                color: Color::TRANSPARENT,
                width: 0.0,
                radius: style::RADIUS_FULL.into(),
            },
            ..Default::default()
        }
    }
}

/// Collection row, flat until hovered.
pub fn list_item(cs: &ColorScheme) -> impl Fn(&Theme, button::Status) -> button::Style {
    let hover_bg = cs.surface_container_high;
    let on_surface = cs.on_surface;

    move |_theme, status| {
        let bg = match status {
            button::Status::Hovered | button::Status::Pressed => {
                Some(Background::Color(hover_bg))
            }
            _ => None,
        };
        button::Style {
            background: bg,
            text_color: on_surface,
            border: Border {
                radius: style::RADIUS_MD.into(),
                ..Border::default()
            },
            ..Default::default()
        }
    }
}

/// Poster placeholder container.
pub fn cover_placeholder(cs: &ColorScheme, radius: f32) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: radius.into(),
        },
        ..Default::default()
    }
}

/// Elevated card for modal dialogs.
pub fn dialog_container(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let bg = cs.surface_container_high;
    let border_color = cs.outline_variant;
    move |_theme| container::Style {
        background: Some(Background::Color(bg)),
        border: Border {
            color: border_color,
            width: 1.0,
            radius: style::RADIUS_XL.into(),
        },
        shadow: Shadow {
            color: Color {
                a: 0.3,
                ..Color::BLACK
            },
            offset: Vector::new(0.0, 8.0),
            blur_radius: 24.0,
        },
        ..Default::default()
    }
}

/// Full-window backdrop behind a modal dialog.
pub fn modal_backdrop(cs: &ColorScheme) -> impl Fn(&Theme) -> container::Style {
    let backdrop = cs.modal_backdrop;
    move |_theme| container::Style {
        background: Some(Background::Color(backdrop)),
        ..Default::default()
    }
}

pub fn overlay_scrollbar(
    cs: &ColorScheme,
) -> impl Fn(&Theme, scrollable::Status) -> scrollable::Style {
    let on_surface = cs.on_surface;
    let primary = cs.primary;

    move |_theme, status| {
        let (scroller_color, scroller_alpha) = match status {
            scrollable::Status::Dragged { .. } => (primary, 0.7),
            scrollable::Status::Hovered {
                is_vertical_scrollbar_hovered: true,
                ..
            } => (on_surface, 0.5),
            scrollable::Status::Hovered { .. } => (on_surface, 0.25),
            _ => (on_surface, 0.15),
        };

        let rail = scrollable::Rail {
            background: None,
            border: Border::default(),
            scroller: scrollable::Scroller {
                background: Background::Color(Color {
                    a: scroller_alpha,
                    ..scroller_color
                }),
                border: Border {
                    radius: style::RADIUS_FULL.into(),
                    ..Border::default()
                },
            },
        };

        scrollable::Style {
            container: container::Style::default(),
            vertical_rail: rail,
            horizontal_rail: rail,
            gap: None,
            auto_scroll: scrollable::AutoScroll {
                background: Background::Color(Color::TRANSPARENT),
                border: Border::default(),
                shadow: Shadow::default(),
                icon: on_surface,
            },
        }
    }
}
