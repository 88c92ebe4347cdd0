use iced::widget::{container, stack, text, Row};
use iced::{Element, Length};

use moodvie_core::rating::MAX_STARS;

use crate::style;
use crate::theme::ColorScheme;

/// Filled share of each of the five stars for a value in `0.0..=5.0`.
///
/// Every star holds one unit, so 3.4 gives three full stars, a star at 0.4
/// and an empty one.
pub fn star_fractions(value: f32) -> [f32; MAX_STARS as usize] {
    let value = value.clamp(0.0, MAX_STARS);
    std::array::from_fn(|i| (value - i as f32).clamp(0.0, 1.0))
}

/// Row of five rating stars, the partial star filled left to right.
pub fn star_rating<'a, Message: 'a>(cs: &ColorScheme, value: f32, size: f32) -> Element<'a, Message> {
    use lucide_icons::iced as icons;

    let stars = star_fractions(value).into_iter().map(|fill| -> Element<'a, Message> {
        if fill >= 1.0 {
            icons::icon_star().size(size).color(cs.star).into()
        } else if fill <= 0.0 {
            icons::icon_star().size(size).color(cs.outline_variant).into()
        } else {
            // Filled glyph over the outline, cut off at the fill width.
            let filled = container(
                icons::icon_star()
                    .size(size)
                    .color(cs.star)
                    .wrapping(text::Wrapping::None),
            )
            .width(Length::Fixed(size * fill))
            .clip(true);
            stack![icons::icon_star().size(size).color(cs.outline_variant), filled].into()
        }
    });

    Row::with_children(stars)
        .spacing(style::SPACE_XXS)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_all_empty() {
        assert_eq!(star_fractions(0.0), [0.0; 5]);
    }

    #[test]
    fn test_four_stars() {
        assert_eq!(star_fractions(4.0), [1.0, 1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_half_star() {
        assert_eq!(star_fractions(3.5), [1.0, 1.0, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_partial_star_follows_value() {
        let fills = star_fractions(1.25);
        assert_eq!(fills[0], 1.0);
        assert_eq!(fills[1], 0.25);
        assert_eq!(&fills[2..], &[0.0; 3]);

        // An animated value grows the partial star continuously.
        assert!(star_fractions(1.2)[1] < star_fractions(1.3)[1]);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(star_fractions(9.0), [1.0; 5]);
        assert_eq!(star_fractions(-1.0), [0.0; 5]);
    }
}
