//! The background fetch -> classify -> store loop.
//!
//! One cycle pulls the hot listing, classifies every post, and pushes the
//! results into the shared store. A failed cycle is logged and skipped; the
//! next tick starts fresh (no retry, no backoff beyond the interval itself).

use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use toxwatch_config::FeedConfig;
use toxwatch_feed::RedditApi;
use toxwatch_model::ToxicityClassifier;
use toxwatch_store::{ClassifiedPost, ResultStore};
use tracing::{debug, info, warn};

pub async fn run(
    api: Arc<RedditApi>,
    classifier: Arc<ToxicityClassifier>,
    store: Arc<ResultStore>,
    feed: FeedConfig,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(Duration::from_secs(feed.poll_interval_secs.max(1)));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                info!("poller shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                match poll_cycle(&api, &classifier, &store, &feed.subreddit, feed.limit).await {
                    Ok(count) => {
                        info!(subreddit = %feed.subreddit, count, "poll cycle complete");
                    }
                    Err(err) => {
                        // The cycle is skipped; the store keeps its previous contents.
                        warn!(subreddit = %feed.subreddit, error = %err, "poll cycle failed");
                    }
                }
            }
        }
    }
}

/// Run one cycle; returns the number of posts classified and stored.
pub async fn poll_cycle(
    api: &RedditApi,
    classifier: &ToxicityClassifier,
    store: &ResultStore,
    subreddit: &str,
    limit: u32,
) -> anyhow::Result<usize> {
    let posts = api.hot_posts(subreddit, limit).await?;

    let mut stored = 0usize;
    for post in posts {
        let text = post.combined_text();
        let verdict = classifier.classify(&text);
        debug!(
            title = %post.title,
            label = %verdict.label,
            probability = verdict.probability,
            "classified post"
        );
        store.push(ClassifiedPost::new(post.title, text, verdict)).await;
        stored += 1;
    }
    Ok(stored)
}
