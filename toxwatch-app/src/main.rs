use anyhow::Result;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use toxwatch_common::observability::{init_logging, LogConfig};
use toxwatch_common::ToxwatchError;
use toxwatch_config::{ToxwatchConfig, ToxwatchConfigLoader};
use toxwatch_feed::{RedditApi, RedditCredentials};
use toxwatch_model::ToxicityClassifier;
use toxwatch_store::ResultStore;
use toxwatch_web::AppState;

mod poller;

#[tokio::main]
async fn main() -> Result<()> {
    // 1) Load config (env wins over the file)
    let cfg: ToxwatchConfig = ToxwatchConfigLoader::new()
        .with_file("toxwatch.yaml")
        .load()
        .map_err(|e| ToxwatchError::Config(format!("toxwatch.yaml: {e}")))?;

    init_logging(LogConfig::default())?;

    // 2) Fail fast: no artifacts, no server.
    let classifier = Arc::new(
        ToxicityClassifier::load(&cfg.model.weights_path, &cfg.model.vocab_path)
            .map_err(|e| ToxwatchError::Classifier(e.to_string()))?,
    );

    let api = Arc::new(
        RedditApi::new(RedditCredentials {
            client_id: cfg.reddit.client_id.clone(),
            client_secret: cfg.reddit.client_secret.clone(),
            username: cfg.reddit.username.clone(),
            password: cfg.reddit.password.clone(),
            user_agent: cfg.reddit.user_agent.clone(),
        })
        .map_err(ToxwatchError::Feed)?,
    );

    let store = Arc::new(ResultStore::default());
    let cancel = CancellationToken::new();

    // 3) Background fetch -> classify -> store cycle.
    let poll_handle = tokio::spawn(poller::run(
        api,
        classifier,
        store.clone(),
        cfg.feed.clone(),
        cancel.clone(),
    ));

    // 4) Serve until ctrl-c.
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            signal_cancel.cancel();
        }
    });

    toxwatch_web::serve(&cfg.server.bind_addr, AppState { store }, cancel.clone()).await?;

    cancel.cancel();
    let _ = poll_handle.await;
    Ok(())
}
