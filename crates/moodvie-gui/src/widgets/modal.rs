//! Modal overlay.
//!
//! Shows content centered over a backdrop. The base layer stays visible but
//! receives no input while the modal is open; clicking the backdrop
//! publishes `on_blur`.

use iced::widget::{center, mouse_area, opaque, stack};
use iced::Element;

use crate::theme::{self, ColorScheme};

pub fn modal<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    base: impl Into<Element<'a, Message>>,
    content: impl Into<Element<'a, Message>>,
    on_blur: Message,
) -> Element<'a, Message> {
    let backdrop = mouse_area(center(opaque(content)).style(theme::modal_backdrop(cs)))
        .on_press(on_blur);

    stack![base.into(), opaque(backdrop)].into()
}
