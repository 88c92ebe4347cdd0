//! Dark and light color schemes plus the style functions built on them.

mod catalog;
mod colors;

pub use catalog::*;
pub use colors::*;

use iced::Theme;

use moodvie_core::config::ThemeMode;

/// Resolve `ThemeMode::System` to a concrete Dark or Light.
pub fn resolve_mode(mode: ThemeMode) -> ThemeMode {
    match mode {
        ThemeMode::System => match dark_light::detect() {
            Ok(dark_light::Mode::Light) => ThemeMode::Light,
            _ => ThemeMode::Dark,
        },
        other => other,
    }
}

/// Color scheme for an already-resolved mode.
pub fn scheme_for(mode: ThemeMode) -> ColorScheme {
    match mode {
        ThemeMode::Light => ColorScheme::light(),
        // Dark is the fallback for both Dark and System.
        _ => ColorScheme::dark(),
    }
}

/// Build the iced Theme from a ColorScheme.
pub fn build_theme(cs: &ColorScheme) -> Theme {
    use iced::theme::Palette;

    Theme::custom(
        "Moodvie",
        Palette {
            background: cs.surface,
            text: cs.on_surface,
            primary: cs.primary,
            success: cs.success,
            warning: cs.star,
            danger: cs.error,
        },
    )
}
