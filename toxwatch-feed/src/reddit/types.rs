use serde::{Deserialize, Serialize};

/// Response from the OAuth2 token endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime in seconds; Reddit hands out 24h tokens for script apps.
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// The listing envelope: `{"kind": "Listing", "data": {"children": [...]}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub data: ListingData,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListingData {
    #[serde(default)]
    pub children: Vec<Thing>,
    #[serde(default)]
    pub after: Option<String>,
}

/// One listing child: `{"kind": "t3", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Thing {
    pub data: Post,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    /// Body text; empty for link posts.
    #[serde(default)]
    pub selftext: String,

    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub permalink: Option<String>,
    #[serde(default)]
    pub created_utc: Option<f64>,
    #[serde(default)]
    pub ups: Option<i64>,
    #[serde(default)]
    pub over_18: Option<bool>,
}

impl Post {
    /// Title and body joined the way the classifier consumes them.
    pub fn combined_text(&self) -> String {
        if self.selftext.is_empty() {
            self.title.clone()
        } else {
            format!("{}\n{}", self.title, self.selftext)
        }
    }
}
