//! Movie detail controller.
//!
//! Owns the state of one detail screen from activation to close. It does no
//! I/O: user events go in, and [`Request`]s come out for the shell to carry
//! out (ask storage something, show a dialog, close the screen). Storage
//! answers are fed back through the `*_finished` / `ownership_checked`
//! methods.

use std::fmt::Display;
use std::time::Duration;

use crate::bundle::NavBundle;
use crate::collection::MovieCollection;
use crate::error::BundleError;
use crate::messages::{self, Notice};
use crate::models::{ActionLayout, MovieDetails, UserContext};
use crate::rating::RatingAnimation;

/// Where the screen is in its single interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the user.
    Idle,
    /// Delete tapped, confirmation dialog open.
    ConfirmPending,
    /// Add tapped, waiting on the ownership check.
    CheckingOwnership,
    /// Ownership check came back negative, insert in flight.
    Adding,
    /// Delete confirmed, removal in flight.
    Deleting,
    /// Terminal. Every later event is ignored.
    Closed,
}

/// How the screen leaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    pub notice: Option<Notice>,
    /// Set only after a successful add: open home with this user.
    pub navigate_home: Option<UserContext>,
}

/// Work the shell must perform on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    None,
    ShowConfirm { title: String, body: &'static str },
    HideConfirm,
    CheckOwnership { username: String, title: String },
    Add { movie: MovieDetails, username: String },
    Delete { username: String, title: String },
    Close(Exit),
}

/// State of an open movie detail screen.
#[derive(Debug, Clone)]
pub struct MovieDetail {
    movie: MovieDetails,
    user: UserContext,
    layout: ActionLayout,
    phase: Phase,
}

impl MovieDetail {
    /// Activate the screen from its navigation bundle.
    ///
    /// A missing bundle is fatal: no view may be built without one.
    pub fn activate(bundle: Option<&NavBundle>) -> Result<Self, BundleError> {
        let bundle = bundle.ok_or(BundleError::Missing)?;
        let movie = bundle.movie_details()?;
        let layout = ActionLayout::for_caller(bundle.caller()?);
        let user = bundle.user()?;

        tracing::debug!(title = %movie.title, ?layout, "Movie detail activated");

        Ok(Self {
            movie,
            user,
            layout,
            phase: Phase::Idle,
        })
    }

    pub fn movie(&self) -> &MovieDetails {
        &self.movie
    }

    pub fn user(&self) -> &UserContext {
        &self.user
    }

    pub fn layout(&self) -> &ActionLayout {
        &self.layout
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_closed(&self) -> bool {
        self.phase == Phase::Closed
    }

    /// True while a storage request is outstanding.
    pub fn is_busy(&self) -> bool {
        matches!(
            self.phase,
            Phase::CheckingOwnership | Phase::Adding | Phase::Deleting
        )
    }

    /// Star fill animation toward the normalized rating.
    pub fn rating_animation(&self, duration: Duration) -> RatingAnimation {
        RatingAnimation::new(self.movie.display_rating(), duration)
    }

    // ── User events ──────────────────────────────────────────────

    pub fn press_add(&mut self) -> Request {
        if !self.layout.add_wired() || self.phase != Phase::Idle {
            return Request::None;
        }
        self.phase = Phase::CheckingOwnership;
        Request::CheckOwnership {
            username: self.user.username().to_string(),
            title: self.movie.title.clone(),
        }
    }

    pub fn press_delete(&mut self) -> Request {
        if !self.layout.delete_wired() || self.phase != Phase::Idle {
            return Request::None;
        }
        self.phase = Phase::ConfirmPending;
        Request::ShowConfirm {
            title: messages::delete_prompt_title(&self.movie.title),
            body: messages::DELETE_PROMPT_BODY,
        }
    }

    pub fn confirm_delete(&mut self) -> Request {
        if self.phase != Phase::ConfirmPending {
            return Request::None;
        }
        self.phase = Phase::Deleting;
        Request::Delete {
            username: self.user.username().to_string(),
            title: self.movie.title.clone(),
        }
    }

    pub fn cancel_delete(&mut self) -> Request {
        if self.phase != Phase::ConfirmPending {
            return Request::None;
        }
        self.phase = Phase::Idle;
        Request::HideConfirm
    }

    /// Toolbar back: leave without touching storage.
    ///
    /// Refused while a storage request is in flight; its result decides how
    /// the screen closes.
    pub fn back(&mut self) -> Request {
        if self.is_closed() {
            return Request::None;
        }
        if self.is_busy() {
            tracing::debug!(phase = ?self.phase, "Back ignored, storage request in flight");
            return Request::None;
        }
        self.close(None, None)
    }

    // ── Storage results ──────────────────────────────────────────

    pub fn ownership_checked<E: Display>(&mut self, result: Result<bool, E>) -> Request {
        if self.phase != Phase::CheckingOwnership {
            return Request::None;
        }
        match result {
            Ok(true) => self.close(Some(Notice::already_owned()), None),
            Ok(false) => {
                self.phase = Phase::Adding;
                Request::Add {
                    movie: self.movie.clone(),
                    username: self.user.username().to_string(),
                }
            }
            Err(e) => {
                tracing::error!(title = %self.movie.title, "Ownership check failed: {e}");
                self.close(Some(Notice::add_failed()), None)
            }
        }
    }

    pub fn add_finished<E: Display>(&mut self, result: Result<bool, E>) -> Request {
        if self.phase != Phase::Adding {
            return Request::None;
        }
        match result {
            Ok(true) => {
                tracing::info!(title = %self.movie.title, "Movie added to collection");
                let user = self.user.clone();
                self.close(Some(Notice::added()), Some(user))
            }
            Ok(false) => self.close(Some(Notice::add_failed()), None),
            Err(e) => {
                tracing::error!(title = %self.movie.title, "Add failed: {e}");
                self.close(Some(Notice::add_failed()), None)
            }
        }
    }

    pub fn delete_finished<E: Display>(&mut self, result: Result<bool, E>) -> Request {
        if self.phase != Phase::Deleting {
            return Request::None;
        }
        let title = self.movie.title.clone();
        match result {
            Ok(true) => {
                tracing::info!(title = %title, "Movie deleted from collection");
                self.close(Some(Notice::deleted(&title)), None)
            }
            Ok(false) => self.close(Some(Notice::delete_failed(&title)), None),
            Err(e) => {
                tracing::error!(title = %title, "Delete failed: {e}");
                self.close(Some(Notice::delete_failed(&title)), None)
            }
        }
    }

    fn close(&mut self, notice: Option<Notice>, navigate_home: Option<UserContext>) -> Request {
        self.phase = Phase::Closed;
        Request::Close(Exit {
            notice,
            navigate_home,
        })
    }

    /// Carry out storage requests synchronously against `store` until the
    /// controller asks for something only a UI can do.
    pub fn resolve(&mut self, mut request: Request, store: &impl MovieCollection) -> Request {
        loop {
            request = match request {
                Request::CheckOwnership { username, title } => {
                    let result = store.movie_exists(&username, &title);
                    self.ownership_checked(result)
                }
                Request::Add { movie, username } => {
                    let result = store.add_movie(&movie, &username);
                    self.add_finished(result)
                }
                Request::Delete { username, title } => {
                    let result = store.delete_movie(&username, &title);
                    self.delete_finished(result)
                }
                other => return other,
            };
        }
    }
}
