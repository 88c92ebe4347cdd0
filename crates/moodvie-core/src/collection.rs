//! Persistence interface for a user's movie collection.
//!
//! The detail screen only ever asks three questions of storage. Anything
//! that can answer them (the SQLite [`Storage`](crate::storage::Storage), a
//! test double) can back the screen.

use crate::error::MoodvieError;
use crate::models::MovieDetails;

/// Existence check, add, and delete over a user's collection.
///
/// `Ok(false)` means the operation was refused (nothing to delete, row
/// already present); `Err` means storage itself failed. The detail screen
/// treats both as a failed action.
pub trait MovieCollection {
    fn movie_exists(&self, username: &str, title: &str) -> Result<bool, MoodvieError>;

    fn add_movie(&self, movie: &MovieDetails, username: &str) -> Result<bool, MoodvieError>;

    fn delete_movie(&self, username: &str, title: &str) -> Result<bool, MoodvieError>;
}
