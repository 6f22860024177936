// Lens GraphQL API client

use crate::config::LensConfig;
use crate::error::{ApiError, Result};
use async_trait::async_trait;
use lensgraph_network::{
    FollowerLister, FollowerSummary, ProfileResolver, ProfileSummary, SourceError,
};
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, warn};

pub const PROFILE_QUERY: &str = r#"
query Profile($request: ProfileRequest!) {
  profile(request: $request) {
    id
    metadata {
      picture {
        ... on ImageSet {
          optimized {
            uri
          }
        }
      }
    }
    stats {
      followers
      following
      lensClassifierScore
    }
  }
}
"#;

pub const FOLLOWERS_QUERY: &str = r#"
query Followers($request: FollowersRequest!) {
  followers(request: $request) {
    items {
      id
      handle {
        fullHandle
        localName
      }
      metadata {
        picture {
          ... on ImageSet {
            optimized {
              uri
            }
          }
        }
      }
      stats {
        followers
        following
        lensClassifierScore
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Debug, Deserialize)]
struct ProfileData {
    profile: Option<RawProfile>,
}

#[derive(Debug, Deserialize)]
struct FollowersData {
    followers: RawFollowerPage,
}

#[derive(Debug, Deserialize)]
struct RawFollowerPage {
    items: Vec<RawProfile>,
}

#[derive(Debug, Deserialize)]
struct RawProfile {
    id: String,
    #[serde(default)]
    handle: Option<RawHandle>,
    #[serde(default)]
    metadata: Option<RawMetadata>,
    stats: RawStats,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawHandle {
    full_handle: String,
}

#[derive(Debug, Deserialize)]
struct RawMetadata {
    #[serde(default)]
    picture: Option<RawPicture>,
}

// Non-ImageSet pictures come back as an empty object.
#[derive(Debug, Deserialize)]
struct RawPicture {
    #[serde(default)]
    optimized: Option<RawImage>,
}

#[derive(Debug, Deserialize)]
struct RawImage {
    #[serde(default)]
    uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawStats {
    followers: u64,
    following: u64,
    #[serde(default)]
    lens_classifier_score: Option<f64>,
}

impl RawProfile {
    fn picture(&self) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.picture.as_ref())
            .and_then(|p| p.optimized.as_ref())
            .and_then(|i| i.uri.clone())
            .filter(|uri| !uri.is_empty())
    }

    fn score(&self) -> f64 {
        self.stats.lens_classifier_score.unwrap_or(0.0)
    }

    fn into_profile_summary(self) -> ProfileSummary {
        ProfileSummary {
            picture: self.picture(),
            followers_count: self.stats.followers,
            following_count: self.stats.following,
            score: self.score(),
            id: self.id,
        }
    }

    fn into_follower_summary(self, following_profile_id: &str) -> FollowerSummary {
        let handle = match self.handle {
            Some(ref h) => h.full_handle.clone(),
            None => self.id.clone(),
        };
        FollowerSummary {
            handle,
            picture: self.picture(),
            following_profile_id: following_profile_id.to_string(),
            followers_count: self.stats.followers,
            following_count: self.stats.following,
            score: self.score(),
            id: self.id,
        }
    }
}

/// Client for the Lens v2 GraphQL API.
///
/// Each client owns its HTTP connection pool and, when enabled, its own response cache.
pub struct LensClient {
    client: Client,
    config: LensConfig,
    profile_cache: Mutex<HashMap<String, ProfileSummary>>,
    follower_cache: Mutex<HashMap<String, Vec<FollowerSummary>>>,
}

impl LensClient {
    pub fn new(config: LensConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.timeout_secs.div_ceil(2)))
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .build()?;

        Ok(Self {
            client,
            config,
            profile_cache: Mutex::new(HashMap::new()),
            follower_cache: Mutex::new(HashMap::new()),
        })
    }

    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    pub async fn fetch_profile(&self, handle: &str) -> Result<ProfileSummary> {
        if self.config.cache
            && let Some(profile) = self.profile_cache.lock().await.get(handle)
        {
            debug!("Profile cache hit for {}", handle);
            return Ok(profile.clone());
        }

        let variables = json!({ "request": { "forHandle": handle } });
        let data: ProfileData = self.query("Profile", PROFILE_QUERY, variables).await?;
        let profile = data
            .profile
            .ok_or_else(|| ApiError::ProfileNotFound(handle.to_string()))?
            .into_profile_summary();

        if self.config.cache {
            self.profile_cache
                .lock()
                .await
                .insert(handle.to_string(), profile.clone());
        }
        Ok(profile)
    }

    pub async fn fetch_followers(&self, profile_id: &str) -> Result<Vec<FollowerSummary>> {
        if self.config.cache
            && let Some(followers) = self.follower_cache.lock().await.get(profile_id)
        {
            debug!("Follower cache hit for {}", profile_id);
            return Ok(followers.clone());
        }

        let variables = json!({
            "request": {
                "orderBy": self.config.order_by,
                "of": profile_id,
                "limit": self.config.page_size.as_str(),
            }
        });
        let data: FollowersData = self.query("Followers", FOLLOWERS_QUERY, variables).await?;
        let followers: Vec<FollowerSummary> = data
            .followers
            .items
            .into_iter()
            .map(|item| item.into_follower_summary(profile_id))
            .collect();

        if self.config.cache {
            self.follower_cache
                .lock()
                .await
                .insert(profile_id.to_string(), followers.clone());
        }
        Ok(followers)
    }

    async fn query<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        debug!("Sending {} query to {}", operation, self.config.endpoint);

        let start = Instant::now();
        let response = self
            .client
            .post(self.config.endpoint.clone())
            .json(&json!({
                "operationName": operation,
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        debug!(
            "{} query returned {} in {:?} ({} bytes)",
            operation,
            status.as_u16(),
            start.elapsed(),
            body.len()
        );

        if !status.is_success() {
            warn!("{} query failed with status {}", operation, status.as_u16());
            return Err(ApiError::Status(status.as_u16()));
        }

        let parsed: GraphQlResponse<T> = serde_json::from_str(&body)?;
        if !parsed.errors.is_empty() {
            let messages: Vec<String> = parsed.errors.into_iter().map(|e| e.message).collect();
            return Err(ApiError::GraphQl(messages.join("; ")));
        }

        parsed
            .data
            .ok_or_else(|| ApiError::MissingData(operation.to_string()))
    }
}

#[async_trait]
impl ProfileResolver for LensClient {
    async fn resolve_profile(&self, handle: &str) -> std::result::Result<ProfileSummary, SourceError> {
        Ok(self.fetch_profile(handle).await?)
    }
}

#[async_trait]
impl FollowerLister for LensClient {
    async fn list_followers(
        &self,
        profile_id: &str,
    ) -> std::result::Result<Vec<FollowerSummary>, SourceError> {
        Ok(self.fetch_followers(profile_id).await?)
    }
}
