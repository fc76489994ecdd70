//! Business services containing domain logic and use cases.

pub mod ai;
pub mod auth;
pub mod email;
pub mod reddit;
pub mod token;

// Re-export commonly used types
pub use auth::{AuthService, AuthenticatedUser, LinkPurpose, LinkTokenCodec, RoleGate};
pub use token::{TokenCodec, TokenService, TokenServiceConfig};
