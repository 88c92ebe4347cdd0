use iced::widget::{button, column, container, row, text, Column};
use iced::{Alignment, Element, Length, Task};

use moodvie_core::bundle::NavBundle;
use moodvie_core::models::{CallerOrigin, StoredMovie, UserContext};

use crate::app;
use crate::db::DbHandle;
use crate::poster::PosterCache;
use crate::screen::Action;
use crate::style;
use crate::theme::{self, ColorScheme};
use crate::toast::ToastKind;
use crate::widgets;

/// Home screen: the signed-in user's collection.
pub struct Home {
    user: UserContext,
    movies: Vec<StoredMovie>,
    loading: bool,
}

/// Messages handled by the Home screen.
#[derive(Debug, Clone)]
pub enum Message {
    Refreshed(Result<Vec<StoredMovie>, String>),
    MovieSelected(i64),
}

impl Home {
    pub fn new(user: UserContext) -> Self {
        Self {
            user,
            movies: Vec::new(),
            loading: false,
        }
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    /// Switch to another user, dropping the old listing.
    pub fn set_user(&mut self, user: UserContext) {
        if user != self.user {
            self.movies.clear();
        }
        self.user = user;
    }

    pub fn movies(&self) -> &[StoredMovie] {
        &self.movies
    }

    pub fn refresh_task(&mut self, db: Option<&DbHandle>) -> Action {
        let Some(db) = db else {
            return Action::None;
        };
        let db = db.clone();
        let username = self.user.username().to_string();
        self.loading = true;
        Action::RunTask(Task::perform(
            async move { db.movies_for_user(username).await },
            |r| app::Message::Home(Message::Refreshed(r.map_err(|e| e.to_string()))),
        ))
    }

    pub fn update(&mut self, msg: Message) -> Action {
        match msg {
            Message::Refreshed(Ok(movies)) => {
                self.loading = false;
                self.movies = movies;
                Action::None
            }
            Message::Refreshed(Err(e)) => {
                self.loading = false;
                tracing::error!("Failed to load collection: {e}");
                Action::ShowToast("Could not load your collection".into(), ToastKind::Error)
            }
            Message::MovieSelected(id) => {
                let Some(stored) = self.movies.iter().find(|m| m.id == id) else {
                    return Action::None;
                };
                match NavBundle::for_movie(&stored.details, CallerOrigin::HomeScreen, &self.user) {
                    Ok(bundle) => Action::OpenDetail(bundle),
                    Err(e) => {
                        tracing::error!("Failed to build navigation bundle: {e}");
                        Action::None
                    }
                }
            }
        }
    }

    pub fn view<'a>(&'a self, cs: &'a ColorScheme, posters: &'a PosterCache) -> Element<'a, Message> {
        use lucide_icons::iced as icons;

        let header = container(
            row![
                text("My movies")
                    .size(style::TEXT_XL)
                    .font(style::FONT_HEADING)
                    .line_height(style::LINE_HEIGHT_TIGHT)
                    .width(Length::Fill),
                text(self.user().username())
                    .size(style::TEXT_SM)
                    .color(cs.on_surface_variant),
            ]
            .align_y(Alignment::Center),
        )
        .style(theme::toolbar(cs))
        .padding([0.0, style::SPACE_XL])
        .center_y(Length::Fixed(style::TOOLBAR_HEIGHT));

        let body: Element<'a, Message> = if self.movies.is_empty() {
            if self.loading {
                widgets::empty_state(cs, icons::icon_loader(), "Loading", "Fetching your collection")
            } else {
                widgets::empty_state(
                    cs,
                    icons::icon_clapperboard(),
                    "No movies yet",
                    "Scan a movie's barcode to add it to your collection.",
                )
            }
        } else {
            let rows = self.movies.iter().map(|m| movie_row(cs, posters, m));
            widgets::styled_scrollable(
                Column::with_children(rows)
                    .spacing(style::SPACE_XXS)
                    .padding([style::SPACE_MD, style::SPACE_XL])
                    .max_width(style::CONTENT_MAX_WIDTH),
                cs,
            )
            .height(Length::Fill)
            .into()
        };

        column![header, body].into()
    }
}

fn movie_row<'a>(
    cs: &ColorScheme,
    posters: &'a PosterCache,
    movie: &'a StoredMovie,
) -> Element<'a, Message> {
    let details = &movie.details;
    let subtitle = if details.genres.is_empty() {
        format!("Added {}", movie.added_at.format("%Y-%m-%d"))
    } else {
        details.genres.clone()
    };

    button(
        row![
            widgets::poster(cs, posters, &details.poster_ref, style::THUMB_WIDTH, style::THUMB_HEIGHT),
            column![
                text(details.title.as_str())
                    .size(style::TEXT_BASE)
                    .font(style::FONT_HEADING),
                text(subtitle).size(style::TEXT_XS).color(cs.outline),
                widgets::star_rating(cs, details.display_rating(), style::STAR_SIZE_SM),
            ]
            .spacing(style::SPACE_XS)
            .width(Length::Fill),
        ]
        .spacing(style::SPACE_MD)
        .align_y(Alignment::Center),
    )
    .on_press(Message::MovieSelected(movie.id))
    .padding(style::SPACE_SM)
    .width(Length::Fill)
    .style(theme::list_item(cs))
    .into()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use moodvie_core::bundle::{KEY_CALLER, KEY_TITLE};
    use moodvie_core::detail::MovieDetail;
    use moodvie_core::models::{ActionLayout, MovieDetails};

    use super::*;

    fn stored(id: i64, title: &str) -> StoredMovie {
        StoredMovie {
            id,
            username: "ana".into(),
            details: MovieDetails {
                title: title.into(),
                overview: String::new(),
                poster_ref: String::new(),
                rating: 6.5,
                cast: String::new(),
                genres: String::new(),
            },
            added_at: Utc::now(),
        }
    }

    fn loaded_home() -> Home {
        let mut home = Home::new(UserContext::new("ana", "pw"));
        home.update(Message::Refreshed(Ok(vec![stored(1, "Alien"), stored(2, "Dune")])));
        home
    }

    #[test]
    fn test_selecting_a_movie_opens_detail_from_home() {
        let mut home = loaded_home();
        let Action::OpenDetail(bundle) = home.update(Message::MovieSelected(2)) else {
            panic!("expected OpenDetail");
        };
        assert_eq!(bundle.get(KEY_TITLE), Some("Dune"));
        assert_eq!(bundle.get(KEY_CALLER), Some("HomeScreen"));

        let detail = MovieDetail::activate(Some(&bundle)).unwrap();
        assert_eq!(*detail.layout(), ActionLayout::DeleteOnly);
        assert_eq!(detail.user().username(), "ana");
    }

    #[test]
    fn test_unknown_selection_is_ignored() {
        let mut home = loaded_home();
        assert!(matches!(home.update(Message::MovieSelected(99)), Action::None));
    }

    #[test]
    fn test_refresh_error_shows_toast_and_keeps_list() {
        let mut home = loaded_home();
        let action = home.update(Message::Refreshed(Err("disk I/O error".into())));
        assert!(matches!(action, Action::ShowToast(_, ToastKind::Error)));
        assert_eq!(home.movies().len(), 2);
    }

    #[test]
    fn test_switching_user_clears_listing() {
        let mut home = loaded_home();
        home.set_user(UserContext::new("ana", "pw"));
        assert_eq!(home.movies().len(), 2);
        home.set_user(UserContext::new("ben", "pw"));
        assert!(home.movies().is_empty());
    }
}
