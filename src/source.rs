use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ListKind, Profile, Repository};

/// Where profiles and repository listings come from.
#[async_trait]
pub trait ProfileSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// Fails with `NotFound` when the account does not exist.
    async fn fetch_profile(&self, login: &str) -> Result<Profile>;

    /// One listing of `kind`, in the order the server returned it.
    async fn fetch_repositories(&self, login: &str, kind: ListKind) -> Result<Vec<Repository>>;
}
