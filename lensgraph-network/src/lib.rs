pub mod builder;
pub mod error;
pub mod model;
pub mod source;

pub use builder::{BuildProgress, NetworkBuilder, ProgressCallback};
pub use error::BuildError;
pub use model::{FollowerNetwork, FollowerSummary, Link, Node, ProfileSummary};
pub use source::{FollowerLister, ProfileResolver, SourceError};
