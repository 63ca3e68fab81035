//! Durable token storage — the single piece of state shared across calls.
//!
//! The store holds exactly one value: the current bearer token. Absence means
//! "unauthenticated". Login, registration (via its auto-login), and social
//! sign-in overwrite it; authenticated calls read it. The trait keeps the
//! storage mechanism injectable so tests can substitute an in-memory
//! implementation.

pub mod file;
pub mod memory;

pub use file::FileTokenStore;
pub use memory::MemoryTokenStore;

use async_trait::async_trait;

use crate::error::StoreError;

/// Backend-agnostic token store.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Current token, or `None` when unauthenticated.
    async fn get(&self) -> Result<Option<String>, StoreError>;

    /// Overwrite the stored token.
    async fn set(&self, token: &str) -> Result<(), StoreError>;

    /// Remove the stored token (explicit sign-out).
    async fn clear(&self) -> Result<(), StoreError>;
}
