//! AI completion API access

pub mod client;

pub use client::ChatCompletionClient;
