//! Navigation bundle: the string key/value payload one screen hands to the
//! next.
//!
//! Everything in a bundle is a string. Structured values such as the user
//! context are serialized into a single entry and rebuilt by the receiver.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BundleError, MoodvieError};
use crate::models::{CallerOrigin, MovieDetails, UserContext};
use crate::rating;

pub const KEY_TITLE: &str = "movieTitle";
pub const KEY_OVERVIEW: &str = "movieOverview";
pub const KEY_POSTER: &str = "moviePoster";
pub const KEY_RATING: &str = "movieRating";
pub const KEY_CAST: &str = "movieCast";
pub const KEY_GENRES: &str = "movieGenres";
pub const KEY_CALLER: &str = "caller";
pub const KEY_USER: &str = "personClass";

/// Key/value payload passed between screens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NavBundle {
    entries: BTreeMap<String, String>,
}

impl NavBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the bundle a referring screen sends to open a movie.
    pub fn for_movie(
        movie: &MovieDetails,
        caller: CallerOrigin,
        user: &UserContext,
    ) -> Result<Self, MoodvieError> {
        let mut bundle = Self::new();
        bundle.insert(KEY_TITLE, &movie.title);
        bundle.insert(KEY_OVERVIEW, &movie.overview);
        bundle.insert(KEY_POSTER, &movie.poster_ref);
        bundle.insert(KEY_RATING, movie.rating_string());
        bundle.insert(KEY_CAST, &movie.cast);
        bundle.insert(KEY_GENRES, &movie.genres);
        bundle.insert(KEY_CALLER, caller.as_bundle_str());
        bundle.insert(KEY_USER, user.to_bundle_value()?);
        Ok(bundle)
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Read a bundle from a JSON object of string values.
    pub fn from_json(json: &str) -> Result<Self, MoodvieError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, MoodvieError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, MoodvieError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    fn require(&self, key: &'static str) -> Result<&str, BundleError> {
        self.get(key).ok_or(BundleError::MissingKey(key))
    }

    /// Movie fields. Title and rating are required; the free-text fields
    /// default to empty.
    pub fn movie_details(&self) -> Result<MovieDetails, BundleError> {
        let text = |key: &str| self.get(key).unwrap_or_default().to_string();
        Ok(MovieDetails {
            title: self.require(KEY_TITLE)?.to_string(),
            overview: text(KEY_OVERVIEW),
            poster_ref: text(KEY_POSTER),
            rating: rating::parse_rating(self.require(KEY_RATING)?)?,
            cast: text(KEY_CAST),
            genres: text(KEY_GENRES),
        })
    }

    /// Raw `caller` value; interpretation is left to the action layout.
    pub fn caller(&self) -> Result<&str, BundleError> {
        self.require(KEY_CALLER)
    }

    pub fn user(&self) -> Result<UserContext, BundleError> {
        let raw = self.require(KEY_USER)?;
        UserContext::from_bundle_value(raw).map_err(|e| BundleError::InvalidUser(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dune() -> MovieDetails {
        MovieDetails {
            title: "Dune".into(),
            overview: "Spice and sand.".into(),
            poster_ref: "/d5NXSklXo0qyIYkgV94XAgMIckC.jpg".into(),
            rating: 8.0,
            cast: "Timothée Chalamet, Zendaya".into(),
            genres: "Science Fiction, Adventure".into(),
        }
    }

    #[test]
    fn test_for_movie_writes_every_key() {
        let user = UserContext::new("ana", "pw");
        let bundle = NavBundle::for_movie(&dune(), CallerOrigin::BarcodeScanner, &user).unwrap();
        assert_eq!(bundle.get(KEY_TITLE), Some("Dune"));
        assert_eq!(bundle.get(KEY_RATING), Some("8.0"));
        assert_eq!(bundle.get(KEY_CALLER), Some("BarcodeScanner"));
        assert_eq!(bundle.movie_details().unwrap(), dune());
        assert_eq!(bundle.user().unwrap(), user);
    }

    #[test]
    fn test_optional_text_fields_default_to_empty() {
        let mut bundle = NavBundle::new();
        bundle.insert(KEY_TITLE, "Dune");
        bundle.insert(KEY_RATING, "8");
        let movie = bundle.movie_details().unwrap();
        assert_eq!(movie.overview, "");
        assert_eq!(movie.cast, "");
        assert_eq!(movie.rating, 8.0);
    }

    #[test]
    fn test_required_keys_are_reported() {
        let mut bundle = NavBundle::new();
        bundle.insert(KEY_RATING, "8");
        assert_eq!(
            bundle.movie_details(),
            Err(BundleError::MissingKey(KEY_TITLE))
        );
        assert_eq!(bundle.caller(), Err(BundleError::MissingKey(KEY_CALLER)));
        assert_eq!(bundle.user(), Err(BundleError::MissingKey(KEY_USER)));

        bundle.insert(KEY_TITLE, "Dune");
        bundle.insert(KEY_RATING, "great");
        assert!(matches!(
            bundle.movie_details(),
            Err(BundleError::InvalidRating(_))
        ));
    }

    #[test]
    fn test_json_form_is_flat_string_map() {
        let json = r#"{
            "movieTitle": "Dune",
            "movieRating": "8",
            "caller": "BarcodeScanner",
            "personClass": "{\"username\":\"ana\",\"password\":\"pw\"}"
        }"#;
        let bundle = NavBundle::from_json(json).unwrap();
        assert_eq!(bundle.caller(), Ok("BarcodeScanner"));
        assert_eq!(bundle.user().unwrap().username(), "ana");

        let again = NavBundle::from_json(&bundle.to_json().unwrap()).unwrap();
        assert_eq!(again, bundle);
    }
}
