pub mod empty_state;
pub mod modal;
pub mod poster;
pub mod star_rating;

pub use empty_state::empty_state;
pub use modal::modal;
pub use poster::poster;
pub use star_rating::star_rating;

use iced::widget::scrollable;
use iced::Element;

use crate::theme::{self, ColorScheme};

/// A scrollable with consistent direction and style across the application.
pub fn styled_scrollable<'a, Message: 'a>(
    content: impl Into<Element<'a, Message>>,
    cs: &ColorScheme,
) -> scrollable::Scrollable<'a, Message> {
    scrollable(content)
        .direction(scrollable::Direction::Vertical(
            scrollable::Scrollbar::new()
                .width(6)
                .scroller_width(4)
                .margin(2),
        ))
        .style(theme::overlay_scrollbar(cs))
}
