pub mod detail;
pub mod home;

use iced::Task;

use moodvie_core::bundle::NavBundle;
use moodvie_core::detail::Exit;

use crate::app;
use crate::toast::ToastKind;

/// Which page is currently displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Detail,
}

/// Actions that a screen can request from the app router.
///
/// Screens return these from `update()` instead of directly mutating
/// shared state. The app interprets them in one place.
pub enum Action {
    /// No side-effect.
    None,
    /// Show a modal dialog.
    ShowModal(ModalKind),
    /// Dismiss the current modal.
    DismissModal,
    /// Run an async Iced task that eventually produces an app::Message.
    RunTask(Task<app::Message>),
    /// Show a toast notification.
    ShowToast(String, ToastKind),
    /// Open the movie detail screen with a navigation bundle.
    OpenDetail(NavBundle),
    /// The detail screen finished its interaction.
    CloseDetail(Exit),
}

/// What kind of modal is currently shown.
#[derive(Debug, Clone)]
pub enum ModalKind {
    ConfirmDelete { title: String, body: &'static str },
}
