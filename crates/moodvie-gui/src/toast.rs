use std::time::Duration;

use iced::widget::{button, column, container, row, text};
use iced::{Alignment, Element, Length};

use moodvie_core::messages::{Notice, NoticeKind};

use crate::style;
use crate::theme::{self, ColorScheme};

/// Kind of toast notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl From<NoticeKind> for ToastKind {
    fn from(kind: NoticeKind) -> Self {
        match kind {
            NoticeKind::Success => Self::Success,
            NoticeKind::Error => Self::Error,
            NoticeKind::Info => Self::Info,
        }
    }
}

/// A single toast notification.
#[derive(Debug, Clone)]
pub struct Toast {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Visible toasts, newest last.
#[derive(Debug, Default)]
pub struct Toasts {
    items: Vec<Toast>,
    next_id: u64,
}

impl Toasts {
    /// Queue a toast and return its id for scheduling the dismissal.
    pub fn push(&mut self, message: impl Into<String>, kind: ToastKind) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push(Toast {
            id,
            message: message.into(),
            kind,
        });
        id
    }

    pub fn push_notice(&mut self, notice: Notice) -> u64 {
        self.push(notice.message, notice.kind.into())
    }

    /// Remove a toast. Dismissing an id twice is a no-op.
    pub fn dismiss(&mut self, id: u64) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Future that resolves once a toast has been on screen long enough.
pub async fn dismiss_after(id: u64, delay: Duration) -> u64 {
    tokio::time::sleep(delay).await;
    id
}

/// Column of toasts anchored top-right.
pub fn toast_overlay<'a, Message: Clone + 'a>(
    cs: &ColorScheme,
    toasts: &'a [Toast],
    on_dismiss: impl Fn(u64) -> Message + 'a,
) -> Element<'a, Message> {
    if toasts.is_empty() {
        return iced::widget::Space::new().width(0).height(0).into();
    }

    let mut toast_column = column![]
        .spacing(style::SPACE_SM)
        .width(Length::Fixed(style::TOAST_WIDTH));

    for toast in toasts {
        let (icon, accent) = match toast.kind {
            ToastKind::Success => (lucide_icons::iced::icon_circle_check(), cs.success),
            ToastKind::Error => (lucide_icons::iced::icon_circle_x(), cs.error),
            ToastKind::Info => (lucide_icons::iced::icon_info(), cs.primary),
        };

        let toast_card = container(
            row![
                icon.size(style::TEXT_LG).color(accent),
                text(toast.message.as_str())
                    .size(style::TEXT_SM)
                    .line_height(style::LINE_HEIGHT_NORMAL)
                    .width(Length::Fill),
                button(
                    lucide_icons::iced::icon_x()
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant),
                )
                .on_press(on_dismiss(toast.id))
                .padding(style::SPACE_XXS)
                .style(theme::icon_button(cs)),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::card(cs))
        .padding([style::SPACE_SM, style::SPACE_MD])
        .width(Length::Fill);

        toast_column = toast_column.push(toast_card);
    }

    container(toast_column)
        .width(Length::Fill)
        .align_x(iced::alignment::Horizontal::Right)
        .padding([style::SPACE_MD, style::SPACE_XL])
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_assigns_increasing_ids() {
        let mut toasts = Toasts::default();
        let a = toasts.push("one", ToastKind::Info);
        let b = toasts.push("two", ToastKind::Error);
        assert!(b > a);
        assert_eq!(toasts.items().len(), 2);
    }

    #[test]
    fn test_dismiss_removes_only_that_toast() {
        let mut toasts = Toasts::default();
        let a = toasts.push("one", ToastKind::Info);
        let b = toasts.push("two", ToastKind::Info);
        toasts.dismiss(a);
        toasts.dismiss(a);
        assert_eq!(toasts.items().len(), 1);
        assert_eq!(toasts.items()[0].id, b);
    }

    #[test]
    fn test_notice_kind_maps_to_toast_kind() {
        let mut toasts = Toasts::default();
        toasts.push_notice(Notice::already_owned());
        toasts.push_notice(Notice::add_failed());
        toasts.push_notice(Notice::deleted("Dune"));

        let kinds: Vec<_> = toasts.items().iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![ToastKind::Info, ToastKind::Error, ToastKind::Success]
        );
        assert_eq!(
            toasts.items()[2].message,
            "Deleted Dune from your collection"
        );
    }

    #[tokio::test]
    async fn test_dismiss_after_yields_id() {
        assert_eq!(dismiss_after(7, Duration::from_millis(5)).await, 7);
    }
}
