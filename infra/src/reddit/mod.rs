//! Reddit API access

pub mod client;

pub use client::RedditApiClient;
