use std::time::{Duration, Instant};

use iced::widget::{button, column, container, row, rule, text, Space};
use iced::{Alignment, Element, Length, Task};

use moodvie_core::detail::{MovieDetail, Request};
use moodvie_core::rating::{format_rating, RatingAnimation};

use crate::app;
use crate::db::DbHandle;
use crate::poster::PosterCache;
use crate::screen::{Action, ModalKind};
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::widgets;

const DB_UNAVAILABLE: &str = "database unavailable";

/// Movie detail screen: the controller plus the star animation.
pub struct Detail {
    controller: MovieDetail,
    animation: RatingAnimation,
    started: Instant,
    stars: f32,
    animating: bool,
}

/// Messages handled by the Detail screen.
#[derive(Debug, Clone)]
pub enum Message {
    Back,
    AddPressed,
    DeletePressed,
    ConfirmDelete,
    CancelDelete,
    OwnershipChecked(Result<bool, String>),
    AddFinished(Result<bool, String>),
    DeleteFinished(Result<bool, String>),
}

impl Detail {
    pub fn new(controller: MovieDetail, animation: Duration) -> Self {
        let animation = controller.rating_animation(animation);
        let animating = !animation.is_finished(Duration::ZERO);
        let stars = if animating { 0.0 } else { animation.target() };
        Self {
            controller,
            animation,
            started: Instant::now(),
            stars,
            animating,
        }
    }

    pub fn controller(&self) -> &MovieDetail {
        &self.controller
    }

    /// Current value of the star row.
    pub fn stars(&self) -> f32 {
        self.stars
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Advance the star animation to `now`.
    pub fn tick(&mut self, now: Instant) {
        if !self.animating {
            return;
        }
        let elapsed = now.saturating_duration_since(self.started);
        self.stars = self.animation.value_at(elapsed);
        self.animating = !self.animation.is_finished(elapsed);
    }

    pub fn update(&mut self, msg: Message, db: Option<&DbHandle>) -> Action {
        let request = match msg {
            Message::Back => self.controller.back(),
            Message::AddPressed => self.controller.press_add(),
            Message::DeletePressed => self.controller.press_delete(),
            Message::ConfirmDelete => self.controller.confirm_delete(),
            Message::CancelDelete => self.controller.cancel_delete(),
            Message::OwnershipChecked(result) => self.controller.ownership_checked(result),
            Message::AddFinished(result) => self.controller.add_finished(result),
            Message::DeleteFinished(result) => self.controller.delete_finished(result),
        };
        self.perform(request, db)
    }

    /// Turn a controller request into work for the app router.
    fn perform(&mut self, request: Request, db: Option<&DbHandle>) -> Action {
        let Some(db) = db else {
            // No storage: answer storage requests with an immediate failure.
            return match request {
                Request::CheckOwnership { .. } => {
                    self.update(Message::OwnershipChecked(Err(DB_UNAVAILABLE.into())), None)
                }
                Request::Add { .. } => {
                    self.update(Message::AddFinished(Err(DB_UNAVAILABLE.into())), None)
                }
                Request::Delete { .. } => {
                    self.update(Message::DeleteFinished(Err(DB_UNAVAILABLE.into())), None)
                }
                other => Self::ui_action(other),
            };
        };

        let db = db.clone();
        match request {
            Request::CheckOwnership { username, title } => Action::RunTask(Task::perform(
                async move { db.movie_exists(username, title).await },
                |r| app::Message::Detail(Message::OwnershipChecked(r.map_err(|e| e.to_string()))),
            )),
            Request::Add { movie, username } => Action::RunTask(Task::perform(
                async move { db.add_movie(movie, username).await },
                |r| app::Message::Detail(Message::AddFinished(r.map_err(|e| e.to_string()))),
            )),
            Request::Delete { username, title } => Action::RunTask(Task::perform(
                async move { db.delete_movie(username, title).await },
                |r| app::Message::Detail(Message::DeleteFinished(r.map_err(|e| e.to_string()))),
            )),
            other => Self::ui_action(other),
        }
    }

    fn ui_action(request: Request) -> Action {
        match request {
            Request::ShowConfirm { title, body } => {
                Action::ShowModal(ModalKind::ConfirmDelete { title, body })
            }
            Request::HideConfirm => Action::DismissModal,
            Request::Close(exit) => Action::CloseDetail(exit),
            Request::None
            | Request::CheckOwnership { .. }
            | Request::Add { .. }
            | Request::Delete { .. } => Action::None,
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, posters: &'a PosterCache) -> Element<'a, Message> {
        use lucide_icons::iced as icons;

        let movie = self.controller.movie();
        let layout = self.controller.layout();
        let idle = !self.controller.is_busy() && !self.controller.is_closed();

        let toolbar = container(
            row![
                button(icons::icon_arrow_left().size(style::TEXT_LG))
                    .on_press_maybe(idle.then_some(Message::Back))
                    .padding(style::SPACE_SM)
                    .style(theme::icon_button(cs)),
                text(movie.title.as_str())
                    .size(style::TEXT_LG)
                    .font(style::FONT_HEADING)
                    .line_height(style::LINE_HEIGHT_TIGHT),
            ]
            .spacing(style::SPACE_SM)
            .align_y(Alignment::Center),
        )
        .style(theme::toolbar(cs))
        .width(Length::Fill)
        .height(Length::Fixed(style::TOOLBAR_HEIGHT))
        .padding([0.0, style::SPACE_MD])
        .center_y(Length::Fixed(style::TOOLBAR_HEIGHT));

        let rating_row = row![
            widgets::star_rating(cs, self.stars(), style::STAR_SIZE),
            text(format!("{}/10", format_rating(movie.rating)))
                .size(style::TEXT_SM)
                .color(cs.on_surface_variant),
        ]
        .spacing(style::SPACE_MD)
        .align_y(Alignment::Center);

        let mut actions = row![].spacing(style::SPACE_SM);
        if layout.shows_add() {
            actions = actions.push(
                button(
                    row![icons::icon_plus().size(style::TEXT_BASE), text("Add to collection")]
                        .spacing(style::SPACE_XS)
                        .align_y(Alignment::Center),
                )
                .padding([style::SPACE_SM, style::SPACE_XL])
                .on_press_maybe((layout.add_wired() && idle).then_some(Message::AddPressed))
                .style(theme::primary_button(cs)),
            );
        }
        if layout.shows_delete() {
            actions = actions.push(
                button(
                    row![icons::icon_trash().size(style::TEXT_BASE), text("Delete")]
                        .spacing(style::SPACE_XS)
                        .align_y(Alignment::Center),
                )
                .padding([style::SPACE_SM, style::SPACE_XL])
                .on_press_maybe((layout.delete_wired() && idle).then_some(Message::DeletePressed))
                .style(theme::danger_button(cs)),
            );
        }

        let mut info = column![
            text(movie.title.as_str())
                .size(style::TEXT_2XL)
                .font(style::FONT_HEADING)
                .line_height(style::LINE_HEIGHT_TIGHT),
            rating_row,
        ]
        .spacing(style::SPACE_MD)
        .width(Length::Fill);

        if !movie.genres.is_empty() {
            info = info.push(
                text(movie.genres.as_str())
                    .size(style::TEXT_SM)
                    .color(cs.outline),
            );
        }
        info = info.push(actions);

        let header = row![
            widgets::poster(cs, posters, &movie.poster_ref, style::POSTER_WIDTH, style::POSTER_HEIGHT),
            info,
        ]
        .spacing(style::SPACE_XL);

        let body = column![
            header,
            rule::horizontal(1),
            section(cs, "Overview", &movie.overview),
            section(cs, "Cast", &movie.cast),
        ]
        .spacing(style::SPACE_XL)
        .max_width(style::CONTENT_MAX_WIDTH)
        .padding(style::SPACE_XL);

        column![
            toolbar,
            widgets::styled_scrollable(
                container(body).center_x(Length::Fill),
                cs,
            )
            .height(Length::Fill),
        ]
        .into()
    }
}

fn section<'a>(cs: &ColorScheme, heading: &'a str, body: &'a str) -> Element<'a, Message> {
    let body: Element<'a, Message> = if body.is_empty() {
        text("Not available")
            .size(style::TEXT_BASE)
            .color(cs.outline)
            .into()
    } else {
        text(body)
            .size(style::TEXT_BASE)
            .color(cs.on_surface_variant)
            .line_height(style::LINE_HEIGHT_NORMAL)
            .into()
    };

    column![
        text(heading)
            .size(style::TEXT_LG)
            .font(style::FONT_HEADING)
            .line_height(style::LINE_HEIGHT_TIGHT),
        Space::new().height(style::SPACE_XXS),
        body,
    ]
    .spacing(style::SPACE_XS)
    .into()
}

#[cfg(test)]
mod tests {
    use moodvie_core::bundle::NavBundle;
    use moodvie_core::detail::Phase;
    use moodvie_core::messages::Notice;
    use moodvie_core::models::{CallerOrigin, MovieDetails, UserContext};

    use super::*;

    fn dune() -> MovieDetails {
        MovieDetails {
            title: "Dune".into(),
            overview: "Spice.".into(),
            poster_ref: "/dune.jpg".into(),
            rating: 8.0,
            cast: "Timothée Chalamet".into(),
            genres: "Sci-Fi".into(),
        }
    }

    fn screen(caller: CallerOrigin) -> Detail {
        let user = UserContext::new("ana", "pw");
        let bundle = NavBundle::for_movie(&dune(), caller, &user).unwrap();
        let controller = MovieDetail::activate(Some(&bundle)).unwrap();
        Detail::new(controller, Duration::from_millis(2000))
    }

    #[test]
    fn test_delete_press_opens_confirm_modal() {
        let mut detail = screen(CallerOrigin::HomeScreen);
        match detail.update(Message::DeletePressed, None) {
            Action::ShowModal(ModalKind::ConfirmDelete { title, .. }) => {
                assert_eq!(title, "Delete Dune?");
            }
            _ => panic!("expected confirm modal"),
        }
    }

    #[test]
    fn test_cancel_dismisses_modal() {
        let mut detail = screen(CallerOrigin::HomeScreen);
        detail.update(Message::DeletePressed, None);
        assert!(matches!(
            detail.update(Message::CancelDelete, None),
            Action::DismissModal
        ));
        assert_eq!(detail.controller().phase(), Phase::Idle);
    }

    #[test]
    fn test_add_without_database_closes_with_failure() {
        let mut detail = screen(CallerOrigin::BarcodeScanner);
        match detail.update(Message::AddPressed, None) {
            Action::CloseDetail(exit) => {
                assert_eq!(exit.notice, Some(Notice::add_failed()));
                assert_eq!(exit.navigate_home, None);
            }
            _ => panic!("expected close"),
        }
    }

    #[test]
    fn test_delete_without_database_closes_with_failure() {
        let mut detail = screen(CallerOrigin::HomeScreen);
        detail.update(Message::DeletePressed, None);
        match detail.update(Message::ConfirmDelete, None) {
            Action::CloseDetail(exit) => {
                assert_eq!(exit.notice, Some(Notice::delete_failed("Dune")));
            }
            _ => panic!("expected close"),
        }
    }

    #[test]
    fn test_add_success_navigates_home() {
        let mut detail = screen(CallerOrigin::BarcodeScanner);
        detail.controller.press_add();
        detail.update(Message::OwnershipChecked(Ok(false)), None);
        match detail.update(Message::AddFinished(Ok(true)), None) {
            Action::CloseDetail(exit) => {
                assert_eq!(exit.notice, Some(Notice::added()));
                assert_eq!(exit.navigate_home, Some(UserContext::new("ana", "pw")));
            }
            _ => panic!("expected close"),
        }
    }

    #[test]
    fn test_back_closes_without_notice() {
        let mut detail = screen(CallerOrigin::HomeScreen);
        match detail.update(Message::Back, None) {
            Action::CloseDetail(exit) => assert_eq!(exit.notice, None),
            _ => panic!("expected close"),
        }
        assert!(matches!(detail.update(Message::Back, None), Action::None));
    }

    #[test]
    fn test_back_waits_for_add_in_flight() {
        let mut detail = screen(CallerOrigin::BarcodeScanner);
        detail.controller.press_add();
        detail.controller.ownership_checked(Ok::<_, String>(false));
        assert!(matches!(detail.update(Message::Back, None), Action::None));

        match detail.update(Message::AddFinished(Ok(true)), None) {
            Action::CloseDetail(exit) => {
                assert_eq!(exit.notice, Some(Notice::added()));
                assert_eq!(exit.navigate_home, Some(UserContext::new("ana", "pw")));
            }
            _ => panic!("expected close"),
        }
    }

    #[test]
    fn test_stars_animate_toward_display_rating() {
        let mut detail = screen(CallerOrigin::HomeScreen);
        assert!(detail.is_animating());
        assert_eq!(detail.stars(), 0.0);

        let start = detail.started;
        detail.tick(start + Duration::from_millis(1000));
        assert!(detail.stars() > 0.0 && detail.stars() < 4.0);

        detail.tick(start + Duration::from_millis(2000));
        assert!(!detail.is_animating());
        assert_eq!(detail.stars(), 4.0);
    }

    #[test]
    fn test_zero_duration_shows_final_value() {
        let user = UserContext::new("ana", "pw");
        let bundle = NavBundle::for_movie(&dune(), CallerOrigin::HomeScreen, &user).unwrap();
        let controller = MovieDetail::activate(Some(&bundle)).unwrap();
        let detail = Detail::new(controller, Duration::ZERO);
        assert!(!detail.is_animating());
        assert_eq!(detail.stars(), 4.0);
    }
}
