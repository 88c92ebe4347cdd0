use iced::widget::container;
use iced::{ContentFit, Element, Length};

use crate::poster::{PosterCache, PosterState};
use crate::style;
use crate::theme::{self, ColorScheme};

/// Render a poster with rounded corners, or a film placeholder while it is
/// loading, missing, or failed.
pub fn poster<'a, Message: 'static>(
    cs: &ColorScheme,
    posters: &'a PosterCache,
    poster_ref: &str,
    width: f32,
    height: f32,
) -> Element<'a, Message> {
    let radius = if width <= style::THUMB_WIDTH {
        style::RADIUS_SM
    } else {
        style::RADIUS_LG
    };

    if let Some(PosterState::Loaded(handle)) = posters.get(poster_ref) {
        return container(
            iced::widget::image(handle.clone())
                .width(Length::Fill)
                .height(Length::Fill)
                .content_fit(ContentFit::Cover)
                .border_radius(radius),
        )
        .width(Length::Fixed(width))
        .height(Length::Fixed(height))
        .style(theme::cover_placeholder(cs, radius))
        .into();
    }

    let icon_size = if width <= style::THUMB_WIDTH {
        style::TEXT_BASE
    } else {
        style::TEXT_3XL
    };
    container(
        lucide_icons::iced::icon_film()
            .size(icon_size)
            .color(cs.outline)
            .center(),
    )
    .center_x(Length::Fixed(width))
    .center_y(Length::Fixed(height))
    .style(theme::cover_placeholder(cs, radius))
    .into()
}
