//! Bounded, newest-first store for classified posts.
//!
//! One background producer pushes, any number of web handlers read snapshots.
//! The store owns its lock and only exposes `push`/`snapshot`, so the
//! capacity and ordering invariants cannot be violated from outside.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tokio::sync::RwLock;
use toxwatch_model::Verdict;

/// How many classified posts the page shows.
pub const DEFAULT_CAPACITY: usize = 20;

/// A classified post; write-once, removed only by capacity eviction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedPost {
    pub title: String,
    /// Title and body as fed to the classifier.
    pub text: String,
    pub verdict: Verdict,
    pub classified_at: DateTime<Utc>,
}

impl ClassifiedPost {
    pub fn new(title: impl Into<String>, text: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            verdict,
            classified_at: Utc::now(),
        }
    }
}

/// Fixed-capacity result buffer, newest first.
pub struct ResultStore {
    inner: RwLock<VecDeque<ClassifiedPost>>,
    capacity: usize,
}

impl Default for ResultStore {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }
}

impl ResultStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Prepend a post, evicting the oldest entry once over capacity.
    pub async fn push(&self, post: ClassifiedPost) {
        let mut guard = self.inner.write().await;
        guard.push_front(post);
        while guard.len() > self.capacity {
            guard.pop_back();
        }
    }

    /// Point-in-time copy of the contents, newest to oldest. Readers never
    /// hold the lock longer than the copy takes.
    pub async fn snapshot(&self) -> Vec<ClassifiedPost> {
        self.inner.read().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use toxwatch_model::Label;

    fn post(title: &str) -> ClassifiedPost {
        ClassifiedPost::new(
            title,
            format!("{title} body"),
            Verdict {
                label: Label::NonToxic,
                probability: 0.1,
            },
        )
    }

    #[tokio::test]
    async fn snapshot_is_newest_first() {
        let store = ResultStore::with_capacity(5);
        for title in ["A", "B", "C"] {
            store.push(post(title)).await;
        }

        let snap = store.snapshot().await;
        let titles: Vec<&str> = snap.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["C", "B", "A"]);
    }

    #[tokio::test]
    async fn capacity_is_never_exceeded() {
        let store = ResultStore::with_capacity(20);
        for i in 0..25 {
            store.push(post(&format!("post-{i}"))).await;
            assert!(store.len().await <= 20);
        }

        // Exactly the last 20, newest first.
        let snap = store.snapshot().await;
        assert_eq!(snap.len(), 20);
        assert_eq!(snap[0].title, "post-24");
        assert_eq!(snap[19].title, "post-5");
    }

    #[tokio::test]
    async fn empty_store_snapshots_cleanly() {
        let store = ResultStore::default();
        assert!(store.is_empty().await);
        assert!(store.snapshot().await.is_empty());
        assert_eq!(store.capacity(), DEFAULT_CAPACITY);
    }

    #[tokio::test]
    async fn concurrent_readers_see_consistent_snapshots() {
        let store = Arc::new(ResultStore::with_capacity(10));

        let writer = {
            let store = store.clone();
            tokio::spawn(async move {
                for i in 0..100 {
                    store.push(post(&format!("w-{i}"))).await;
                }
            })
        };

        let reader = {
            let store = store.clone();
            tokio::spawn(async move {
                for _ in 0..100 {
                    let snap = store.snapshot().await;
                    assert!(snap.len() <= 10);
                    // Within a snapshot, order is strictly newest-first.
                    for pair in snap.windows(2) {
                        assert!(pair[0].classified_at >= pair[1].classified_at);
                    }
                }
            })
        };

        writer.await.unwrap();
        reader.await.unwrap();
    }
}
