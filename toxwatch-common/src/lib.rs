//! Shared error types and observability helpers for the toxwatch workspace.
//!
//! This crate is intentionally lightweight and dependency-minimal so that all
//! member crates can depend on it without introducing heavy transitive costs.
//!
//! # Overview
//!
//! - [`observability`]: Centralised tracing/logging initialisation
//! - [`ToxwatchError`] and [`Result`]: Shared error handling

pub mod observability;

/// Error types used across the toxwatch system.
#[derive(thiserror::Error, Debug)]
pub enum ToxwatchError {
    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A model or vocabulary artifact could not be loaded.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// The feed client reported an error.
    #[error("Feed error: {0}")]
    Feed(#[from] anyhow::Error),

    /// The web server failed to bind or serve.
    #[error("Server error: {0}")]
    Server(String),
}

/// Convenient alias for results that use [`ToxwatchError`].
pub type Result<T> = std::result::Result<T, ToxwatchError>;
