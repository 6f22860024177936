//! Data-access capabilities the builder is driven by.
//!
//! The builder never talks to the network itself; callers hand it something that can
//! resolve a handle and something that can list one page of followers. Test doubles and
//! the Lens GraphQL client both plug in here.

use crate::model::{FollowerSummary, ProfileSummary};
use async_trait::async_trait;

/// Error type returned by collaborators. Propagated verbatim by the builder.
pub type SourceError = Box<dyn std::error::Error + Send + Sync>;

#[async_trait]
pub trait ProfileResolver: Send + Sync {
    /// Resolve a handle such as `lens/robinroy`. Must fail if the handle is unknown.
    async fn resolve_profile(&self, handle: &str) -> Result<ProfileSummary, SourceError>;
}

#[async_trait]
pub trait FollowerLister: Send + Sync {
    /// Return a single page of followers of `profile_id`, in upstream order.
    async fn list_followers(&self, profile_id: &str) -> Result<Vec<FollowerSummary>, SourceError>;
}
