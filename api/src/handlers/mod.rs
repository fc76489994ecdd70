//! Request/response handling helpers

pub mod error;
