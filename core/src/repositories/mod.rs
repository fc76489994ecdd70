//! Repository interfaces abstracting persistence from the domain layer.

pub mod token;
pub mod user;

pub use token::{MockTokenStore, TokenStore};
pub use user::{MockUserRepository, UserRepository};
