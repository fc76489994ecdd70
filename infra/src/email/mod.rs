//! Outbound email delivery

pub mod relay;

pub use relay::HttpRelayEmailService;
