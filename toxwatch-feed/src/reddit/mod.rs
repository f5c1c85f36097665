pub mod client;
pub mod types;

pub use client::{RedditApi, RedditCredentials};
pub use types::Post;
