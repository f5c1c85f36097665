//! Wrapper around the Reddit data API for script-type applications.
//!
//! Handles the OAuth2 password-grant exchange, token reuse until expiry, and
//! request shaping for listing endpoints before delegating to the shared HTTP
//! client. Reddit requires a descriptive `User-Agent` on every request.

use crate::reddit::types::{Listing, Post, TokenResponse};
use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use toxwatch_http::{Auth, HeaderMap, HttpClient, RequestOpts};

const AUTH_BASE: &str = "https://www.reddit.com";
const API_BASE: &str = "https://oauth.reddit.com";

/// Don't reuse a token inside this window before its stated expiry.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

#[derive(Debug, Clone)]
pub struct RedditCredentials {
    pub client_id: String,
    pub client_secret: String,
    pub username: String,
    pub password: String,
    pub user_agent: String,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

pub struct RedditApi {
    auth_http: HttpClient,
    api_http: HttpClient,
    creds: RedditCredentials,
    token: Mutex<Option<CachedToken>>,
}

impl RedditApi {
    pub fn new(creds: RedditCredentials) -> Result<Self> {
        Self::with_endpoints(creds, AUTH_BASE, API_BASE)
    }

    /// Point the client at alternate endpoints; tests use this with a mock
    /// server standing in for both hosts.
    pub fn with_endpoints(
        creds: RedditCredentials,
        auth_base: &str,
        api_base: &str,
    ) -> Result<Self> {
        let auth_http = HttpClient::new(auth_base).context("reddit auth base url")?;
        let api_http = HttpClient::new(api_base).context("reddit api base url")?;
        Ok(Self {
            auth_http,
            api_http,
            creds,
            token: Mutex::new(None),
        })
    }

    /// Fetch up to `limit` posts from `/r/{subreddit}/hot`.
    ///
    /// No retries at this call site: a failed cycle is simply skipped by the
    /// caller, so the request passes an explicit zero-retry option.
    pub async fn hot_posts(&self, subreddit: &str, limit: u32) -> Result<Vec<Post>> {
        let limit = limit.clamp(1, 100);
        let token = self.access_token().await?;

        let path = format!("r/{}/hot", subreddit);
        let listing: Listing = self
            .api_http
            .get_json(
                &path,
                RequestOpts {
                    auth: Some(Auth::Bearer(&token)),
                    headers: Some(self.base_headers()?),
                    query: Some(vec![
                        ("limit", limit.to_string().into()),
                        ("raw_json", "1".into()),
                    ]),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await
            .with_context(|| format!("fetching r/{subreddit}/hot"))?;

        let posts: Vec<Post> = listing
            .data
            .children
            .into_iter()
            .map(|thing| thing.data)
            .collect();

        tracing::debug!(subreddit, count = posts.len(), "reddit.hot_posts");
        Ok(posts)
    }

    /// Return a valid access token, exchanging credentials when the cached
    /// one is missing or about to expire.
    async fn access_token(&self) -> Result<String> {
        let mut guard = self.token.lock().await;
        if let Some(cached) = guard.as_ref() {
            if cached.expires_at > Instant::now() + TOKEN_EXPIRY_MARGIN {
                return Ok(cached.token.clone());
            }
            tracing::debug!("reddit.token.expired");
        }

        let resp: TokenResponse = self
            .auth_http
            .post_form(
                "api/v1/access_token",
                &[
                    ("grant_type", "password"),
                    ("username", &self.creds.username),
                    ("password", &self.creds.password),
                ],
                RequestOpts {
                    auth: Some(Auth::Basic {
                        user: &self.creds.client_id,
                        password: &self.creds.client_secret,
                    }),
                    headers: Some(self.base_headers()?),
                    retries: Some(0),
                    ..Default::default()
                },
            )
            .await
            .context("reddit token exchange")?;

        let ttl = Duration::from_secs(resp.expires_in.unwrap_or(3600));
        tracing::info!(ttl_secs = ttl.as_secs(), "reddit.token.obtained");

        let token = resp.access_token;
        *guard = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + ttl,
        });
        Ok(token)
    }

    fn base_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(
            "user-agent",
            self.creds
                .user_agent
                .parse()
                .context("user_agent is not a valid header value")?,
        );
        Ok(headers)
    }
}
