use std::time::Instant;

use iced::widget::{button, column, container, row, stack, text};
use iced::{Element, Subscription, Task, Theme};

use moodvie_core::bundle::NavBundle;
use moodvie_core::config::{AppConfig, ThemeMode};
use moodvie_core::detail::{Exit, MovieDetail};
use moodvie_core::messages;
use moodvie_core::models::UserContext;

use crate::db::DbHandle;
use crate::poster::{self, PosterCache};
use crate::screen::{detail, home, Action, ModalKind, Page};
use crate::style;
use crate::subscription;
use crate::theme::{self, ColorScheme};
use crate::toast::{self, ToastKind, Toasts};
use crate::widgets;

/// What the process was started with.
#[derive(Debug, Clone)]
pub struct Launch {
    pub config: AppConfig,
    pub user: UserContext,
    /// Detail screen activated from a command-line bundle.
    pub detail: Option<MovieDetail>,
}

/// Application state: a slim router that delegates to screens.
pub struct Moodvie {
    page: Page,
    config: AppConfig,
    db: Option<DbHandle>,
    // Theme
    active_mode: ThemeMode,
    colors: ColorScheme,
    // Screens
    home: home::Home,
    detail: Option<detail::Detail>,
    /// Page to return to when the detail screen closes. `None` when the
    /// detail screen is the first page of the process.
    return_page: Option<Page>,
    posters: PosterCache,
    // App-level chrome
    modal_state: Option<ModalKind>,
    toasts: Toasts,
}

/// All messages the application can handle.
#[derive(Debug, Clone)]
pub enum Message {
    Home(home::Message),
    Detail(detail::Message),
    PosterLoaded {
        poster_ref: String,
        result: Result<Vec<u8>, String>,
    },
    AnimationTick(Instant),
    AppearanceTick,
    DismissToast(u64),
}

impl Moodvie {
    pub fn new(launch: Launch) -> (Self, Task<Message>) {
        let db = AppConfig::ensure_db_path()
            .map_err(|e| tracing::error!("Failed to prepare data directory: {e}"))
            .ok()
            .and_then(|path| DbHandle::open(&path));
        Self::with_db(launch, db)
    }

    fn with_db(launch: Launch, db: Option<DbHandle>) -> (Self, Task<Message>) {
        let active_mode = theme::resolve_mode(launch.config.appearance.mode);
        let mut app = Self {
            page: Page::Home,
            colors: theme::scheme_for(active_mode),
            active_mode,
            config: launch.config,
            db,
            home: home::Home::new(launch.user),
            detail: None,
            return_page: None,
            posters: PosterCache::default(),
            modal_state: None,
            toasts: Toasts::default(),
        };

        let task = match launch.detail {
            Some(controller) => {
                let task = app.show_detail(controller);
                // Launched straight into the detail screen: closing it ends the process.
                app.return_page = None;
                task
            }
            None => {
                let action = app.home.refresh_task(app.db.as_ref());
                app.handle_action(action)
            }
        };
        (app, task)
    }

    pub fn title(&self) -> String {
        match (&self.page, &self.detail) {
            (Page::Detail, Some(detail)) => {
                format!("{} · Moodvie", detail.controller().movie().title)
            }
            _ => String::from("Moodvie"),
        }
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Home(msg) => {
                let refreshed = matches!(msg, home::Message::Refreshed(Ok(_)));
                let action = self.home.update(msg);
                let task = self.handle_action(action);
                if refreshed {
                    let refs: Vec<String> = self
                        .home
                        .movies()
                        .iter()
                        .map(|m| m.details.poster_ref.clone())
                        .collect();
                    let posters = refs.iter().map(|r| self.request_poster(r)).collect::<Vec<_>>();
                    return Task::batch(std::iter::once(task).chain(posters));
                }
                task
            }
            Message::Detail(msg) => {
                if matches!(
                    msg,
                    detail::Message::ConfirmDelete | detail::Message::CancelDelete
                ) {
                    self.modal_state = None;
                }
                let Some(screen) = self.detail.as_mut() else {
                    tracing::debug!(?msg, "Detail message after close, ignored");
                    return Task::none();
                };
                let action = screen.update(msg, self.db.as_ref());
                self.handle_action(action)
            }
            Message::PosterLoaded { poster_ref, result } => {
                self.posters.finish(poster_ref, result);
                Task::none()
            }
            Message::AnimationTick(now) => {
                if let Some(screen) = self.detail.as_mut() {
                    screen.tick(now);
                }
                Task::none()
            }
            Message::AppearanceTick => {
                let mode = theme::resolve_mode(self.config.appearance.mode);
                if mode != self.active_mode {
                    tracing::debug!(?mode, "System appearance changed");
                    self.active_mode = mode;
                    self.colors = theme::scheme_for(mode);
                }
                Task::none()
            }
            Message::DismissToast(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    fn handle_action(&mut self, action: Action) -> Task<Message> {
        match action {
            Action::None => Task::none(),
            Action::ShowModal(kind) => {
                self.modal_state = Some(kind);
                Task::none()
            }
            Action::DismissModal => {
                self.modal_state = None;
                Task::none()
            }
            Action::RunTask(task) => task,
            Action::ShowToast(message, kind) => self.show_toast(message, kind),
            Action::OpenDetail(bundle) => self.open_detail(&bundle),
            Action::CloseDetail(exit) => self.close_detail(exit),
        }
    }

    fn open_detail(&mut self, bundle: &NavBundle) -> Task<Message> {
        match MovieDetail::activate(Some(bundle)) {
            Ok(controller) => self.show_detail(controller),
            Err(e) => {
                tracing::error!("Cannot open movie detail: {e}");
                self.show_toast("Could not open this movie", ToastKind::Error)
            }
        }
    }

    fn show_detail(&mut self, controller: MovieDetail) -> Task<Message> {
        let poster_ref = controller.movie().poster_ref.clone();
        self.detail = Some(detail::Detail::new(
            controller,
            self.config.rating_animation(),
        ));
        self.return_page = Some(self.page);
        self.page = Page::Detail;
        self.modal_state = None;
        self.request_poster(&poster_ref)
    }

    fn close_detail(&mut self, exit: Exit) -> Task<Message> {
        self.modal_state = None;

        let notice_id = exit.notice.map(|notice| {
            tracing::info!(kind = ?notice.kind, "{}", notice.message);
            self.toasts.push_notice(notice)
        });

        let next = match (exit.navigate_home, self.return_page.take()) {
            (Some(user), _) => {
                self.detail = None;
                self.home.set_user(user);
                self.show_home()
            }
            (None, Some(page)) => {
                self.detail = None;
                self.page = page;
                match page {
                    Page::Home => {
                        let action = self.home.refresh_task(self.db.as_ref());
                        self.handle_action(action)
                    }
                    Page::Detail => Task::none(),
                }
            }
            (None, None) => {
                // First page of the process: the closed screen stays up
                // until its notice has been shown, then the window goes.
                tracing::debug!("Detail screen was the first page, exiting");
                return match notice_id {
                    Some(id) => Task::perform(
                        toast::dismiss_after(id, self.config.toast_duration()),
                        |_| (),
                    )
                    .then(|_| iced::exit()),
                    None => iced::exit(),
                };
            }
        };

        let toast = notice_id.map_or_else(Task::none, |id| self.dismiss_later(id));
        Task::batch([toast, next])
    }

    fn show_home(&mut self) -> Task<Message> {
        self.page = Page::Home;
        self.return_page = None;
        let action = self.home.refresh_task(self.db.as_ref());
        self.handle_action(action)
    }

    fn show_toast(&mut self, message: impl Into<String>, kind: ToastKind) -> Task<Message> {
        let id = self.toasts.push(message, kind);
        self.dismiss_later(id)
    }

    fn dismiss_later(&self, id: u64) -> Task<Message> {
        Task::perform(
            toast::dismiss_after(id, self.config.toast_duration()),
            Message::DismissToast,
        )
    }

    /// Request a poster download if not already requested.
    fn request_poster(&mut self, poster_ref: &str) -> Task<Message> {
        let Some(url) = self.config.poster_url(poster_ref) else {
            // Nothing to load, the placeholder renders.
            self.posters.mark_failed(poster_ref);
            return Task::none();
        };
        if !self.posters.begin(poster_ref) {
            return Task::none();
        }
        let poster_ref = poster_ref.to_string();
        Task::perform(poster::fetch_poster(url), move |result| {
            Message::PosterLoaded { poster_ref, result }
        })
    }

    pub fn view(&self) -> Element<'_, Message> {
        let cs = &self.colors;

        let page_content: Element<'_, Message> = match (self.page, &self.detail) {
            (Page::Detail, Some(screen)) => screen.view(cs, &self.posters).map(Message::Detail),
            _ => self.home.view(cs, &self.posters).map(Message::Home),
        };

        let main: Element<'_, Message> = stack![
            page_content,
            toast::toast_overlay(cs, self.toasts.items(), Message::DismissToast),
        ]
        .into();

        // Wrap in modal if one is active.
        if let Some(modal_kind) = &self.modal_state {
            let modal_content = self.build_modal_content(cs, modal_kind);
            widgets::modal(
                cs,
                main,
                modal_content,
                Message::Detail(detail::Message::CancelDelete),
            )
        } else {
            main
        }
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let animating = self.page == Page::Detail
            && self.detail.as_ref().is_some_and(detail::Detail::is_animating);
        subscription::subscriptions(animating, self.config.appearance.mode)
    }

    pub fn theme(&self) -> Theme {
        theme::build_theme(&self.colors)
    }

    fn build_modal_content<'a>(
        &self,
        cs: &ColorScheme,
        kind: &'a ModalKind,
    ) -> Element<'a, Message> {
        match kind {
            ModalKind::ConfirmDelete { title, body } => container(
                column![
                    text(title.as_str())
                        .size(style::TEXT_LG)
                        .font(style::FONT_HEADING)
                        .line_height(style::LINE_HEIGHT_TIGHT),
                    text(*body)
                        .size(style::TEXT_SM)
                        .color(cs.on_surface_variant)
                        .line_height(style::LINE_HEIGHT_LOOSE),
                    row![
                        button(text(messages::CANCEL_LABEL).size(style::TEXT_SM))
                            .padding([style::SPACE_SM, style::SPACE_XL])
                            .on_press(Message::Detail(detail::Message::CancelDelete))
                            .style(theme::ghost_button(cs)),
                        button(text(messages::CONFIRM_LABEL).size(style::TEXT_SM))
                            .padding([style::SPACE_SM, style::SPACE_XL])
                            .on_press(Message::Detail(detail::Message::ConfirmDelete))
                            .style(theme::danger_button(cs)),
                    ]
                    .spacing(style::SPACE_SM),
                ]
                .spacing(style::SPACE_LG)
                .max_width(style::TOAST_WIDTH + style::SPACE_2XL * 2.0),
            )
            .style(theme::dialog_container(cs))
            .padding(style::SPACE_2XL)
            .into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use moodvie_core::messages::Notice;
    use moodvie_core::models::{CallerOrigin, MovieDetails};

    use super::*;

    fn dune() -> MovieDetails {
        MovieDetails {
            title: "Dune".into(),
            overview: "Spice.".into(),
            poster_ref: String::new(),
            rating: 8.0,
            cast: String::new(),
            genres: String::new(),
        }
    }

    fn launch(caller: Option<CallerOrigin>) -> Launch {
        let user = UserContext::new("ana", "pw");
        let detail = caller.map(|caller| {
            let bundle = NavBundle::for_movie(&dune(), caller, &user).unwrap();
            MovieDetail::activate(Some(&bundle)).unwrap()
        });
        Launch {
            config: AppConfig::default(),
            user,
            detail,
        }
    }

    #[test]
    fn test_launch_with_bundle_opens_detail_first() {
        let (app, _) = Moodvie::with_db(launch(Some(CallerOrigin::BarcodeScanner)), None);
        assert_eq!(app.page, Page::Detail);
        assert_eq!(app.return_page, None);
        assert_eq!(app.title(), "Dune · Moodvie");
    }

    #[test]
    fn test_detail_opened_from_home_returns_home() {
        let (mut app, _) = Moodvie::with_db(launch(None), None);
        let user = UserContext::new("ana", "pw");
        let bundle = NavBundle::for_movie(&dune(), CallerOrigin::HomeScreen, &user).unwrap();
        let _ = app.handle_action(Action::OpenDetail(bundle));
        assert_eq!(app.page, Page::Detail);

        let _ = app.update(Message::Detail(detail::Message::Back));
        assert_eq!(app.page, Page::Home);
        assert!(app.detail.is_none());
        assert!(app.toasts.items().is_empty());
    }

    #[test]
    fn test_delete_flow_shows_modal_then_toast() {
        let (mut app, _) = Moodvie::with_db(launch(None), None);
        let user = UserContext::new("ana", "pw");
        let bundle = NavBundle::for_movie(&dune(), CallerOrigin::HomeScreen, &user).unwrap();
        let _ = app.handle_action(Action::OpenDetail(bundle));

        let _ = app.update(Message::Detail(detail::Message::DeletePressed));
        assert!(matches!(
            app.modal_state,
            Some(ModalKind::ConfirmDelete { ref title, .. }) if title == "Delete Dune?"
        ));

        // No database: the delete fails and the screen closes with a notice.
        let _ = app.update(Message::Detail(detail::Message::ConfirmDelete));
        assert!(app.modal_state.is_none());
        assert_eq!(app.page, Page::Home);
        assert_eq!(
            app.toasts.items()[0].message,
            Notice::delete_failed("Dune").message
        );
    }

    #[test]
    fn test_invalid_bundle_shows_error_toast() {
        let (mut app, _) = Moodvie::with_db(launch(None), None);
        let _ = app.handle_action(Action::OpenDetail(NavBundle::new()));
        assert_eq!(app.page, Page::Home);
        assert_eq!(app.toasts.items()[0].kind, ToastKind::Error);
    }

    #[test]
    fn test_add_success_navigates_home_with_user() {
        let (mut app, _) = Moodvie::with_db(launch(Some(CallerOrigin::BarcodeScanner)), None);
        app.home.set_user(UserContext::new("someone-else", ""));
        let exit = Exit {
            notice: Some(Notice::added()),
            navigate_home: Some(UserContext::new("ana", "pw")),
        };
        let _ = app.handle_action(Action::CloseDetail(exit));
        assert_eq!(app.page, Page::Home);
        assert_eq!(app.home.user().username(), "ana");
        assert_eq!(app.toasts.items()[0].kind, ToastKind::Success);
    }

    #[test]
    fn test_first_page_close_keeps_notice_on_screen() {
        let (mut app, _) = Moodvie::with_db(launch(Some(CallerOrigin::BarcodeScanner)), None);
        let exit = Exit {
            notice: Some(Notice::already_owned()),
            navigate_home: None,
        };
        let _ = app.handle_action(Action::CloseDetail(exit));

        assert_eq!(app.return_page, None);
        assert_eq!(app.page, Page::Detail);
        assert_eq!(app.toasts.items().len(), 1);
        assert_eq!(app.toasts.items()[0].message, "You already own this movie");
        assert_eq!(app.toasts.items()[0].kind, ToastKind::Info);
    }

    #[test]
    fn test_first_page_close_ignores_later_taps() {
        let (mut app, _) = Moodvie::with_db(launch(Some(CallerOrigin::HomeScreen)), None);
        let _ = app.update(Message::Detail(detail::Message::Back));
        assert!(app
            .detail
            .as_ref()
            .is_some_and(|screen| screen.controller().is_closed()));

        let _ = app.update(Message::Detail(detail::Message::DeletePressed));
        assert!(app.modal_state.is_none());
        assert!(app.toasts.items().is_empty());
    }

    #[test]
    fn test_late_detail_message_is_ignored() {
        let (mut app, _) = Moodvie::with_db(launch(None), None);
        let _ = app.update(Message::Detail(detail::Message::AddFinished(Ok(true))));
        assert_eq!(app.page, Page::Home);
        assert!(app.toasts.items().is_empty());
    }
}
