//! Clients for the content feeds toxwatch watches.

pub mod reddit;

pub use reddit::{Post, RedditApi, RedditCredentials};
