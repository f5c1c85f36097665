//! Minimal HTTP client with safe logging and flexible auth.
//!
//! - Request options: headers, [`Auth`], query params, timeout, retries
//! - Never logs secret values; only the auth kind (bearer/basic/none)
//! - Retries 429/5xx with exponential backoff and `Retry-After` support
//!
//! Example (no_run):
//! ```rust
//! # async fn demo() -> Result<(), toxwatch_http::HttpError> {
//! let client = toxwatch_http::HttpClient::new("https://oauth.reddit.com")?;
//! let got: serde_json::Value = client
//!     .get_json("r/rust/hot", toxwatch_http::RequestOpts::default())
//!     .await?;
//! # Ok(()) }
//! ```

use reqwest::header::RETRY_AFTER;
pub use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::borrow::Cow;
use std::time::Duration;
use thiserror::Error;
use tokio::time::sleep;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("invalid URL: {0}")]
    Url(String),
    #[error("request build failed: {0}")]
    Build(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("decode error: {0}, body_snippet: {1}")]
    Decode(String, String),
    #[error("server returned error {status}: {message}")]
    Api { status: StatusCode, message: String },
}

/// Authentication strategies supported by the client helpers.
///
/// ```
/// use toxwatch_http::Auth;
///
/// let bearer = Auth::Bearer("token");
/// match bearer {
///     Auth::Bearer(value) => assert_eq!(value, "token"),
///     _ => unreachable!(),
/// }
/// ```
#[derive(Clone, Debug)]
pub enum Auth<'a> {
    /// Authorization: Bearer <token>
    Bearer(&'a str),
    /// HTTP basic auth (Reddit's token endpoint wants client_id:client_secret).
    Basic { user: &'a str, password: &'a str },
    None,
}

/// Per-request tuning knobs.
#[derive(Clone, Debug, Default)]
pub struct RequestOpts<'a> {
    pub timeout: Option<Duration>,
    pub retries: Option<usize>,
    pub auth: Option<Auth<'a>>,
    pub headers: Option<HeaderMap>,
    pub query: Option<Vec<(&'a str, Cow<'a, str>)>>,
}

#[derive(Clone)]
pub struct HttpClient {
    base: Url,
    inner: Client,
    pub default_timeout: Duration,
    pub max_retries: usize,
}

impl HttpClient {
    /// Construct a client anchored to a base URL.
    ///
    /// ```no_run
    /// use toxwatch_http::{HttpClient, HttpError};
    /// use std::time::Duration;
    ///
    /// let client = HttpClient::new("https://www.reddit.com")?;
    /// assert_eq!(client.default_timeout, Duration::from_secs(15));
    /// # Ok::<(), HttpError>(())
    /// ```
    pub fn new(base: &str) -> Result<Self, HttpError> {
        let base = Url::parse(base).map_err(|e| HttpError::Url(e.to_string()))?;
        let inner = Client::builder()
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| HttpError::Build(e.to_string()))?;
        Ok(Self {
            base,
            inner,
            default_timeout: Duration::from_secs(15),
            max_retries: 2,
        })
    }

    /// Override the default per-request timeout.
    pub fn with_timeout(mut self, dur: Duration) -> Self {
        self.default_timeout = dur;
        self
    }

    /// Override the default retry budget.
    pub fn with_retries(mut self, n: usize) -> Self {
        self.max_retries = n;
        self
    }

    /// GET JSON with per-request options (headers/query/auth/timeout/retries).
    pub async fn get_json<T>(&self, path: &str, opts: RequestOpts<'_>) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.request_json(Method::GET, path, None, opts).await
    }

    /// POST a form-encoded body and decode the JSON response.
    pub async fn post_form<T>(
        &self,
        path: &str,
        form: &[(&str, &str)],
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        self.request_json(Method::POST, path, Some(form), opts)
            .await
    }

    async fn request_json<T>(
        &self,
        method: Method,
        path: &str,
        form: Option<&[(&str, &str)]>,
        opts: RequestOpts<'_>,
    ) -> Result<T, HttpError>
    where
        T: DeserializeOwned,
    {
        let url = self
            .base
            .join(path)
            .map_err(|e| HttpError::Url(e.to_string()))?;

        let mut attempt = 0usize;
        let max_retries = opts.retries.unwrap_or(self.max_retries);

        loop {
            let mut rb = self.inner.request(method.clone(), url.clone());

            let timeout = opts.timeout.unwrap_or(self.default_timeout);
            rb = rb.timeout(timeout);

            if let Some(q) = &opts.query {
                let pairs: Vec<(&str, &str)> = q.iter().map(|(k, v)| (*k, v.as_ref())).collect();
                rb = rb.query(&pairs);
            }

            if let Some(fields) = form {
                rb = rb.form(fields);
            }

            if let Some(hdrs) = &opts.headers {
                rb = rb.headers(hdrs.clone());
            }

            if let Some(auth) = &opts.auth {
                match auth {
                    Auth::Bearer(tok) => {
                        let tok = sanitize_secret(tok)?;
                        rb = rb.bearer_auth(tok);
                    }
                    Auth::Basic { user, password } => {
                        rb = rb.basic_auth(user, Some(password));
                    }
                    Auth::None => {}
                }
            }

            let auth_kind = match &opts.auth {
                Some(Auth::Bearer(_)) => "bearer",
                Some(Auth::Basic { .. }) => "basic",
                Some(Auth::None) | None => "none",
            };
            let attempt0 = attempt + 1;
            tracing::debug!(
                attempt = attempt0,
                max_retries,
                method = %method,
                host_path = %format!("{}{}", url.domain().unwrap_or("-"), url.path()),
                timeout_ms = timeout.as_millis() as u64,
                auth_kind,
                has_form = form.is_some(),
                "http.request.start"
            );

            let t0 = std::time::Instant::now();
            let resp = match rb.send().await {
                Ok(resp) => resp,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying.network"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    tracing::warn!(attempt, max_retries, message = %message, "http.network_error");
                    return Err(HttpError::Network(message));
                }
            };

            let status = resp.status();
            let headers = resp.headers().clone();
            let bytes = match resp.bytes().await {
                Ok(bytes) => bytes,
                Err(err) => {
                    let message = err.to_string();
                    if attempt < max_retries {
                        attempt += 1;
                        let delay = backoff_delay(attempt);
                        tracing::warn!(
                            attempt,
                            max_retries,
                            backoff_ms = delay.as_millis() as u64,
                            message = %message,
                            "http.retrying.body"
                        );
                        sleep(delay).await;
                        continue;
                    }
                    return Err(HttpError::Network(message));
                }
            };
            let dur_ms = t0.elapsed().as_millis() as u64;

            // Reddit surfaces its rate budget in these headers.
            let remain = headers
                .get("x-ratelimit-remaining")
                .and_then(|v| v.to_str().ok());
            let reset = headers
                .get("x-ratelimit-reset")
                .and_then(|v| v.to_str().ok());

            tracing::debug!(
                %status,
                duration_ms = dur_ms,
                body_len = bytes.len(),
                rate_limit.remaining = ?remain,
                rate_limit.reset = ?reset,
                "http.response"
            );

            let snippet = snip_body(&bytes);

            if status.is_success() {
                return serde_json::from_slice::<T>(&bytes).map_err(|e| {
                    tracing::warn!(
                        serde_err = %e.to_string(),
                        body_snippet = %snippet,
                        "http.response.decode_error"
                    );
                    HttpError::Decode(e.to_string(), snippet)
                });
            }

            let message = extract_error_message(&bytes);
            let is_429 = status == StatusCode::TOO_MANY_REQUESTS;
            let is_5xx = status.is_server_error();

            if (is_429 || is_5xx) && attempt < max_retries {
                attempt += 1;
                let delay = if let Some(secs) = retry_after_delay_secs(&headers) {
                    Duration::from_secs(secs)
                } else {
                    let exp = backoff_delay(attempt);
                    if is_429 {
                        // default floor for 429 when no Retry-After is present
                        exp.max(Duration::from_millis(1100))
                    } else {
                        exp
                    }
                };
                tracing::warn!(
                    %status,
                    attempt,
                    max_retries,
                    backoff_ms = delay.as_millis() as u64,
                    message = %message,
                    "http.retrying"
                );
                sleep(delay).await;
                continue;
            }

            tracing::warn!(%status, message = %message, body_snippet = %snippet, "http.error");
            return Err(HttpError::Api { status, message });
        }
    }
}

fn backoff_delay(attempt: usize) -> Duration {
    Duration::from_millis(200u64.saturating_mul(1 << (attempt - 1)))
}

/// Pull a human-readable message out of Reddit's error bodies.
///
/// The OAuth endpoint answers `{"error": "invalid_grant"}`; the API proper
/// answers `{"message": "Unauthorized", "error": 401}`.
fn extract_error_message(body: &[u8]) -> String {
    #[derive(Deserialize)]
    struct ApiErr {
        #[serde(default)]
        message: String,
        #[serde(default)]
        error: serde_json::Value,
    }

    if let Ok(e) = serde_json::from_slice::<ApiErr>(body) {
        if !e.message.is_empty() {
            return e.message;
        }
        if let Some(s) = e.error.as_str() {
            return s.to_string();
        }
    }
    snip_body(body)
}

fn retry_after_delay_secs(h: &HeaderMap) -> Option<u64> {
    h.get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())?
        .parse()
        .ok()
}

fn snip_body(body: &[u8]) -> String {
    let mut snip = String::from_utf8_lossy(body).to_string();
    if snip.len() > 500 {
        let mut end = 500;
        while !snip.is_char_boundary(end) {
            end -= 1;
        }
        snip.truncate(end);
        snip.push_str("...");
    }
    snip
}

fn sanitize_secret(raw: &str) -> Result<String, HttpError> {
    let mut s = raw
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .to_string();
    s.retain(|ch| !ch.is_ascii_whitespace());

    if !s.is_ascii() {
        return Err(HttpError::Build("token contains non-ASCII bytes".into()));
    }
    if s.bytes().any(|b| b < 0x20 || b == 0x7F) {
        return Err(HttpError::Build("token contains control characters".into()));
    }
    Ok(s)
}
