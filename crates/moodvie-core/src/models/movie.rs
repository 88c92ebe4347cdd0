use chrono::{DateTime, Utc};

use crate::rating;

/// Movie fields shown on the detail screen.
///
/// Built once from the navigation bundle and never modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct MovieDetails {
    pub title: String,
    pub overview: String,
    /// Opaque poster path, resolved against the configured image base URL.
    pub poster_ref: String,
    /// Score on the 0–10 scale.
    pub rating: f32,
    pub cast: String,
    pub genres: String,
}

impl MovieDetails {
    /// Rating as persisted and as written into bundles (`8.0`, `7.25`).
    pub fn rating_string(&self) -> String {
        rating::format_rating(self.rating)
    }

    /// Target value of the 5-star widget.
    pub fn display_rating(&self) -> f32 {
        rating::display_rating(self.rating)
    }
}

/// A movie in a user's collection, as read back from storage.
#[derive(Debug, Clone)]
pub struct StoredMovie {
    pub id: i64,
    pub username: String,
    pub details: MovieDetails,
    pub added_at: DateTime<Utc>,
}
