pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::TokenStore;

pub mod mock;
pub use mock::MockTokenStore;

#[cfg(test)]
mod tests;
