//! Route handlers

pub mod auth;
pub mod reddit;

pub use auth::AppState;
