//! Semantic color tokens for the application.

use iced::Color;

/// All semantic color tokens for the application.
///
/// Tonal surfaces from low to high elevation, a text hierarchy, and the
/// accent, danger, and rating colors.
#[derive(Debug, Clone)]
pub struct ColorScheme {
    // Surfaces
    pub surface: Color,
    pub surface_container_low: Color,
    pub surface_container: Color,
    pub surface_container_high: Color,
    pub surface_bright: Color,

    // Text hierarchy
    pub on_surface: Color,
    pub on_surface_variant: Color,
    pub outline: Color,
    pub outline_variant: Color,

    // Primary accent
    pub primary: Color,
    pub primary_hover: Color,
    pub primary_dim: Color,
    pub on_primary: Color,

    // Error
    pub error: Color,
    pub error_hover: Color,
    pub error_pressed: Color,
    pub on_error: Color,

    pub success: Color,
    /// Filled rating stars.
    pub star: Color,

    pub modal_backdrop: Color,
}

impl ColorScheme {
    pub fn dark() -> Self {
        Self {
            surface: Color::from_rgb8(0x13, 0x14, 0x19),
            surface_container_low: Color::from_rgb8(0x1B, 0x1C, 0x22),
            surface_container: Color::from_rgb8(0x1F, 0x20, 0x27),
            surface_container_high: Color::from_rgb8(0x2A, 0x2B, 0x32),
            surface_bright: Color::from_rgb8(0x39, 0x3A, 0x42),

            on_surface: Color::from_rgb8(0xE4, 0xE2, 0xE9),
            on_surface_variant: Color::from_rgb8(0xC6, 0xC5, 0xD0),
            outline: Color::from_rgb8(0x90, 0x8F, 0x9A),
            outline_variant: Color::from_rgb8(0x45, 0x46, 0x4F),

            primary: Color::from_rgb8(0xF2, 0x6D, 0x5B),
            primary_hover: Color::from_rgb8(0xF5, 0x86, 0x77),
            primary_dim: Color::from_rgb8(0xC9, 0x55, 0x45),
            on_primary: Color::from_rgb8(0x2B, 0x0B, 0x06),

            error: Color::from_rgb8(0xE5, 0x48, 0x4D),
            error_hover: Color::from_rgb8(0xEC, 0x5D, 0x5E),
            error_pressed: Color::from_rgb8(0xC4, 0x37, 0x3C),
            on_error: Color::WHITE,

            success: Color::from_rgb8(0x4C, 0xC3, 0x8A),
            star: Color::from_rgb8(0xF5, 0xC5, 0x18),

            modal_backdrop: Color {
                a: 0.65,
                ..Color::BLACK
            },
        }
    }

    pub fn light() -> Self {
        Self {
            surface: Color::from_rgb8(0xFB, 0xF8, 0xFA),
            surface_container_low: Color::from_rgb8(0xF5, 0xF2, 0xF4),
            surface_container: Color::from_rgb8(0xEF, 0xEC, 0xEF),
            surface_container_high: Color::from_rgb8(0xE9, 0xE7, 0xE9),
            surface_bright: Color::from_rgb8(0xE0, 0xDE, 0xE2),

            on_surface: Color::from_rgb8(0x1B, 0x1B, 0x20),
            on_surface_variant: Color::from_rgb8(0x46, 0x46, 0x4F),
            outline: Color::from_rgb8(0x77, 0x76, 0x80),
            outline_variant: Color::from_rgb8(0xC7, 0xC5, 0xD0),

            primary: Color::from_rgb8(0xB3, 0x3A, 0x2A),
            primary_hover: Color::from_rgb8(0xC4, 0x4B, 0x3A),
            primary_dim: Color::from_rgb8(0x92, 0x2C, 0x1F),
            on_primary: Color::WHITE,

            error: Color::from_rgb8(0xBA, 0x1A, 0x1A),
            error_hover: Color::from_rgb8(0xCC, 0x2C, 0x2C),
            error_pressed: Color::from_rgb8(0x93, 0x00, 0x0A),
            on_error: Color::WHITE,

            success: Color::from_rgb8(0x1E, 0x8E, 0x5A),
            star: Color::from_rgb8(0xE0, 0xA1, 0x00),

            modal_backdrop: Color {
                a: 0.45,
                ..Color::BLACK
            },
        }
    }
}
