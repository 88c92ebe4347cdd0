//! Poster images, fetched over HTTP and kept in memory.

use std::collections::HashMap;

use iced::widget::image;

/// State of the poster for a given poster reference.
#[derive(Debug, Clone)]
pub enum PosterState {
    Loading,
    Loaded(image::Handle),
    Failed,
}

/// In-memory cache mapping poster references to their load state.
#[derive(Debug, Default)]
pub struct PosterCache {
    states: HashMap<String, PosterState>,
}

impl PosterCache {
    pub fn get(&self, poster_ref: &str) -> Option<&PosterState> {
        self.states.get(poster_ref)
    }

    /// Mark a reference as loading. Returns false if it was already requested.
    pub fn begin(&mut self, poster_ref: &str) -> bool {
        if self.states.contains_key(poster_ref) {
            return false;
        }
        self.states
            .insert(poster_ref.to_string(), PosterState::Loading);
        true
    }

    /// Record a finished download.
    pub fn finish(&mut self, poster_ref: String, result: Result<Vec<u8>, String>) {
        let state = match result {
            Ok(bytes) => PosterState::Loaded(image::Handle::from_bytes(bytes)),
            Err(e) => {
                tracing::warn!(poster = %poster_ref, error = %e, "Poster load failed");
                PosterState::Failed
            }
        };
        self.states.insert(poster_ref, state);
    }

    /// Mark a reference that has no URL to load from.
    pub fn mark_failed(&mut self, poster_ref: &str) {
        self.states
            .entry(poster_ref.to_string())
            .or_insert(PosterState::Failed);
    }
}

/// Download a poster image and return its bytes.
pub async fn fetch_poster(url: String) -> Result<Vec<u8>, String> {
    let bytes = reqwest::get(&url)
        .await
        .map_err(|e| e.to_string())?
        .error_for_status()
        .map_err(|e| e.to_string())?
        .bytes()
        .await
        .map_err(|e| e.to_string())?;
    Ok(bytes.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_only_once_per_ref() {
        let mut cache = PosterCache::default();
        assert!(cache.begin("/dune.jpg"));
        assert!(!cache.begin("/dune.jpg"));
        assert!(matches!(cache.get("/dune.jpg"), Some(PosterState::Loading)));
    }

    #[test]
    fn test_failed_download_is_recorded() {
        let mut cache = PosterCache::default();
        cache.begin("/dune.jpg");
        cache.finish("/dune.jpg".into(), Err("404 Not Found".into()));
        assert!(matches!(cache.get("/dune.jpg"), Some(PosterState::Failed)));
    }

    #[test]
    fn test_successful_download_is_loaded() {
        let mut cache = PosterCache::default();
        cache.begin("/dune.jpg");
        cache.finish("/dune.jpg".into(), Ok(vec![0x89, b'P', b'N', b'G']));
        assert!(matches!(cache.get("/dune.jpg"), Some(PosterState::Loaded(_))));
    }

    #[test]
    fn test_mark_failed_keeps_existing_state() {
        let mut cache = PosterCache::default();
        cache.begin("/dune.jpg");
        cache.mark_failed("/dune.jpg");
        assert!(matches!(cache.get("/dune.jpg"), Some(PosterState::Loading)));
    }
}
