//! TTL result cache for completed blog generations.
//!
//! [`ResultCache`] maps `(topic, model)` to a finished [`CrewOutput`].
//! Entries expire after a fixed time-to-live; expiry is checked at lookup
//! time, and an expired entry is removed and reported as a miss. Only
//! successful runs are ever stored. Data is lost when the value is dropped.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;
use tracing::debug;

use crate::crew::CrewOutput;

/// A stored result with its insertion time.
#[derive(Debug, Clone)]
struct CacheEntry {
    output: CrewOutput,
    stored_at: Instant,
}

/// In-memory cache of crew outputs keyed by `(topic, model)`.
#[derive(Debug)]
pub struct ResultCache {
    entries: Mutex<HashMap<(String, String), CacheEntry>>,
    ttl: Duration,
}

impl ResultCache {
    /// Default time-to-live for cached results: one hour.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

    /// Creates an empty cache with the default TTL.
    #[must_use]
    pub fn new() -> Self {
        Self::with_ttl(Self::DEFAULT_TTL)
    }

    /// Creates an empty cache with a custom TTL.
    #[must_use]
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    /// The configured time-to-live.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Look up a fresh entry, removing it if it has expired.
    pub async fn lookup(&self, topic: &str, model: &str) -> Option<CrewOutput> {
        let key = (topic.to_owned(), model.to_owned());
        let mut entries = self.entries.lock().await;

        match entries.get(&key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                debug!(topic, model, "Cache hit");
                Some(entry.output.clone())
            }
            Some(_) => {
                debug!(topic, model, "Cache entry expired");
                entries.remove(&key);
                None
            }
            None => {
                debug!(topic, model, "Cache miss");
                None
            }
        }
    }

    /// Store a result, replacing any previous entry for the same key.
    pub async fn store(&self, topic: &str, model: &str, output: CrewOutput) {
        let key = (topic.to_owned(), model.to_owned());
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CacheEntry {
                output,
                stored_at: Instant::now(),
            },
        );
    }

    /// Number of entries currently held, including any not yet reaped.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    /// Whether the cache holds no entries.
    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }

    /// Remove all entries.
    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::usage::Usage;
    use uuid::Uuid;

    fn sample_output(raw: &str) -> CrewOutput {
        CrewOutput {
            id: Uuid::new_v4(),
            raw: raw.to_owned(),
            task_outputs: Vec::new(),
            usage: Usage::zero(),
        }
    }

    #[tokio::test]
    async fn fresh_entry_is_a_hit() {
        let cache = ResultCache::new();
        cache
            .store("Quantum Computing", "gemini", sample_output("post"))
            .await;

        let hit = cache.lookup("Quantum Computing", "gemini").await;
        assert_eq!(hit.unwrap().raw, "post");
    }

    #[tokio::test]
    async fn unknown_key_is_a_miss() {
        let cache = ResultCache::new();
        assert!(cache.lookup("nothing", "gemini").await.is_none());
    }

    #[tokio::test]
    async fn same_topic_different_model_is_a_miss() {
        let cache = ResultCache::new();
        cache.store("topic", "gemini", sample_output("a")).await;

        assert!(cache.lookup("topic", "llama").await.is_none());
        assert!(cache.lookup("topic", "gemini").await.is_some());
    }

    #[tokio::test]
    async fn zero_ttl_expires_immediately() {
        let cache = ResultCache::with_ttl(Duration::ZERO);
        cache.store("topic", "gemini", sample_output("a")).await;

        assert!(cache.lookup("topic", "gemini").await.is_none());
    }

    #[tokio::test]
    async fn expired_entry_is_removed_at_lookup() {
        let cache = ResultCache::with_ttl(Duration::ZERO);
        cache.store("topic", "gemini", sample_output("a")).await;
        assert_eq!(cache.len().await, 1);

        let miss = cache.lookup("topic", "gemini").await;
        assert!(miss.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn entry_survives_within_ttl_then_expires() {
        let cache = ResultCache::with_ttl(Duration::from_millis(40));
        cache.store("topic", "gemini", sample_output("a")).await;

        assert!(cache.lookup("topic", "gemini").await.is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(cache.lookup("topic", "gemini").await.is_none());
    }

    #[tokio::test]
    async fn store_replaces_previous_entry() {
        let cache = ResultCache::new();
        cache.store("topic", "gemini", sample_output("old")).await;
        cache.store("topic", "gemini", sample_output("new")).await;

        assert_eq!(cache.lookup("topic", "gemini").await.unwrap().raw, "new");
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn clear_empties_the_cache() {
        let cache = ResultCache::new();
        cache.store("a", "m", sample_output("1")).await;
        cache.store("b", "m", sample_output("2")).await;

        cache.clear().await;
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn default_ttl_is_one_hour() {
        assert_eq!(ResultCache::new().ttl(), Duration::from_secs(3600));
    }
}
