use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};

use crate::collection::MovieCollection;
use crate::error::MoodvieError;
use crate::models::{MovieDetails, StoredMovie};
use crate::rating;

const SCHEMA_V1: &str = include_str!("../../../migrations/001_initial.sql");

/// SQLite-backed storage for users' movie collections.
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open (or create) the database at the given path and run migrations.
    pub fn open(path: &Path) -> Result<Self, MoodvieError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, MoodvieError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        run_migrations(&conn)?;
        Ok(Self { conn })
    }

    // ── Collection ──────────────────────────────────────────────

    /// Whether `username` already has a movie with this exact title.
    pub fn movie_exists(&self, username: &str, title: &str) -> Result<bool, MoodvieError> {
        let count: i64 = self.conn.query_row(
            "SELECT COUNT(*) FROM movies WHERE username = ?1 AND title = ?2",
            params![username, title],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Insert a movie for `username`. Returns `false` if the title is
    /// already in that user's collection.
    pub fn add_movie(&self, movie: &MovieDetails, username: &str) -> Result<bool, MoodvieError> {
        let changed = self.conn.execute(
            "INSERT OR IGNORE INTO movies
                (username, title, overview, cast_list, genres, rating, poster, added_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                username,
                movie.title,
                movie.overview,
                movie.cast,
                movie.genres,
                movie.rating_string(),
                movie.poster_ref,
                Utc::now().to_rfc3339(),
            ],
        )?;
        Ok(changed > 0)
    }

    /// Remove a movie from `username`'s collection. Returns `false` if
    /// there was nothing to remove.
    pub fn delete_movie(&self, username: &str, title: &str) -> Result<bool, MoodvieError> {
        let changed = self.conn.execute(
            "DELETE FROM movies WHERE username = ?1 AND title = ?2",
            params![username, title],
        )?;
        Ok(changed > 0)
    }

    /// All movies owned by `username`, alphabetical by title.
    pub fn movies_for_user(&self, username: &str) -> Result<Vec<StoredMovie>, MoodvieError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, username, title, overview, cast_list, genres, rating, poster, added_at
             FROM movies WHERE username = ?1
             ORDER BY title COLLATE NOCASE",
        )?;
        let rows = stmt
            .query_map(params![username], |row| Ok(row_to_movie(row)))?
            .filter_map(|r| r.ok())
            .collect();
        Ok(rows)
    }
}

impl MovieCollection for Storage {
    fn movie_exists(&self, username: &str, title: &str) -> Result<bool, MoodvieError> {
        Storage::movie_exists(self, username, title)
    }

    fn add_movie(&self, movie: &MovieDetails, username: &str) -> Result<bool, MoodvieError> {
        Storage::add_movie(self, movie, username)
    }

    fn delete_movie(&self, username: &str, title: &str) -> Result<bool, MoodvieError> {
        Storage::delete_movie(self, username, title)
    }
}

fn run_migrations(conn: &Connection) -> Result<(), MoodvieError> {
    let version: i32 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .unwrap_or(0);

    if version < 1 {
        conn.execute_batch(SCHEMA_V1)?;
        conn.pragma_update(None, "user_version", 1)?;
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────

/// Parse a datetime string from SQLite (either RFC 3339 or SQLite's `datetime('now')` format).
fn parse_datetime(s: &str) -> DateTime<Utc> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return dt.with_timezone(&Utc);
    }
    if let Ok(naive) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return naive.and_utc();
    }
    DateTime::default()
}

fn row_to_movie(row: &rusqlite::Row<'_>) -> StoredMovie {
    let rating_str: String = row.get(6).unwrap_or_default();
    let added_str: String = row.get(8).unwrap_or_default();

    StoredMovie {
        id: row.get(0).unwrap_or(0),
        username: row.get(1).unwrap_or_default(),
        details: MovieDetails {
            title: row.get(2).unwrap_or_default(),
            overview: row.get(3).unwrap_or_default(),
            cast: row.get(4).unwrap_or_default(),
            genres: row.get(5).unwrap_or_default(),
            rating: rating::parse_rating(&rating_str).unwrap_or(0.0),
            poster_ref: row.get(7).unwrap_or_default(),
        },
        added_at: parse_datetime(&added_str),
    }
}
