//! Async database actor.
//!
//! Owns the `Storage` on a dedicated thread and exposes async methods
//! that communicate via channels. This keeps all SQLite I/O off the
//! render thread.

use std::path::Path;

use tokio::sync::{mpsc, oneshot};

use moodvie_core::error::MoodvieError;
use moodvie_core::models::{MovieDetails, StoredMovie};
use moodvie_core::storage::Storage;

/// Cloneable handle to the DB actor thread.
#[derive(Clone)]
pub struct DbHandle {
    tx: mpsc::UnboundedSender<DbCommand>,
}

/// Commands sent to the actor thread.
enum DbCommand {
    MovieExists {
        username: String,
        title: String,
        reply: oneshot::Sender<Result<bool, MoodvieError>>,
    },
    AddMovie {
        movie: Box<MovieDetails>,
        username: String,
        reply: oneshot::Sender<Result<bool, MoodvieError>>,
    },
    DeleteMovie {
        username: String,
        title: String,
        reply: oneshot::Sender<Result<bool, MoodvieError>>,
    },
    MoviesForUser {
        username: String,
        reply: oneshot::Sender<Result<Vec<StoredMovie>, MoodvieError>>,
    },
}

impl DbHandle {
    /// Spawn the DB actor on a dedicated thread and return a handle.
    ///
    /// Returns `None` if the database cannot be opened.
    pub fn open(path: &Path) -> Option<Self> {
        let storage = Storage::open(path)
            .map_err(|e| tracing::error!("Failed to open database: {e}"))
            .ok()?;
        Self::spawn(storage)
    }

    fn spawn(storage: Storage) -> Option<Self> {
        let (tx, rx) = mpsc::unbounded_channel();

        std::thread::Builder::new()
            .name("db-actor".into())
            .spawn(move || actor_loop(storage, rx))
            .map_err(|e| tracing::error!("Failed to spawn DB thread: {e}"))
            .ok()?;

        Some(Self { tx })
    }

    pub async fn movie_exists(&self, username: String, title: String) -> Result<bool, MoodvieError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::MovieExists {
            username,
            title,
            reply,
        });
        rx.await.unwrap_or_else(|_| Err(actor_closed()))
    }

    pub async fn add_movie(
        &self,
        movie: MovieDetails,
        username: String,
    ) -> Result<bool, MoodvieError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::AddMovie {
            movie: Box::new(movie),
            username,
            reply,
        });
        rx.await.unwrap_or_else(|_| Err(actor_closed()))
    }

    pub async fn delete_movie(&self, username: String, title: String) -> Result<bool, MoodvieError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::DeleteMovie {
            username,
            title,
            reply,
        });
        rx.await.unwrap_or_else(|_| Err(actor_closed()))
    }

    pub async fn movies_for_user(&self, username: String) -> Result<Vec<StoredMovie>, MoodvieError> {
        let (reply, rx) = oneshot::channel();
        let _ = self.tx.send(DbCommand::MoviesForUser { username, reply });
        rx.await.unwrap_or_else(|_| Err(actor_closed()))
    }
}

fn actor_closed() -> MoodvieError {
    MoodvieError::Config("DB actor closed".into())
}

/// The actor's main loop, run on a dedicated thread.
fn actor_loop(storage: Storage, mut rx: mpsc::UnboundedReceiver<DbCommand>) {
    while let Some(cmd) = rx.blocking_recv() {
        match cmd {
            DbCommand::MovieExists {
                username,
                title,
                reply,
            } => {
                let _ = reply.send(storage.movie_exists(&username, &title));
            }
            DbCommand::AddMovie {
                movie,
                username,
                reply,
            } => {
                let _ = reply.send(storage.add_movie(&movie, &username));
            }
            DbCommand::DeleteMovie {
                username,
                title,
                reply,
            } => {
                let _ = reply.send(storage.delete_movie(&username, &title));
            }
            DbCommand::MoviesForUser { username, reply } => {
                let _ = reply.send(storage.movies_for_user(&username));
            }
        }
    }
    tracing::debug!("DB actor shutting down");
}
