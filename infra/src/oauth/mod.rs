//! External identity providers

pub mod google;

pub use google::GoogleOauthProvider;
