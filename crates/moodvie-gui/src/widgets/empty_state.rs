use iced::widget::{center, column, text, Text};
use iced::{Alignment, Element, Length};

use crate::style;
use crate::theme::ColorScheme;

/// Centered placeholder for a screen with nothing to list.
///
/// The icon is tinted and sized here so every empty screen looks alike.
pub fn empty_state<'a, Message: 'a>(
    cs: &ColorScheme,
    icon: Text<'a>,
    title: &'a str,
    subtitle: &'a str,
) -> Element<'a, Message> {
    let body = column![
        icon.size(style::TEXT_3XL).color(cs.outline),
        text(title)
            .size(style::TEXT_XL)
            .font(style::FONT_HEADING)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_TIGHT),
        text(subtitle)
            .size(style::TEXT_SM)
            .color(cs.outline)
            .line_height(style::LINE_HEIGHT_LOOSE)
            .center(),
    ]
    .spacing(style::SPACE_MD)
    .max_width(style::TOAST_WIDTH)
    .align_x(Alignment::Center);

    center(body).width(Length::Fill).height(Length::Fill).into()
}
