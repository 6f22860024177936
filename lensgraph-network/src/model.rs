use serde::{Deserialize, Serialize};
use std::fmt;

/// Picture recorded for the root profile when the resolver returns none or an empty URI.
pub const DEFAULT_PROFILE_PICTURE: &str = "default_profile.png";

/// Picture recorded for a follower when the lister returns none or an empty URI.
pub const DEFAULT_FOLLOWER_PICTURE: &str = "default_image.png";

/// Summary of the profile a crawl starts from.
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileSummary {
    pub id: String,
    pub picture: Option<String>,
    pub followers_count: u64,
    pub following_count: u64,
    pub score: f64,
}

/// One entry of a follower listing.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowerSummary {
    pub id: String,
    pub handle: String,
    pub picture: Option<String>,
    /// Profile being followed; the source side of the resulting link.
    pub following_profile_id: String,
    pub followers_count: u64,
    pub following_count: u64,
    pub score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    pub name: String,
    pub picture: String,
    pub followers: u64,
    pub following: u64,
    #[serde(rename = "lensScore")]
    pub score: f64,
}

impl Node {
    pub fn from_root(handle: &str, profile: &ProfileSummary) -> Self {
        Self {
            id: profile.id.clone(),
            name: handle.to_string(),
            picture: profile
                .picture
                .as_deref()
                .filter(|uri| !uri.is_empty())
                .unwrap_or(DEFAULT_PROFILE_PICTURE)
                .to_string(),
            followers: profile.followers_count,
            following: profile.following_count,
            score: profile.score,
        }
    }

    pub fn from_follower(follower: &FollowerSummary) -> Self {
        Self {
            id: follower.id.clone(),
            name: follower.handle.clone(),
            picture: follower
                .picture
                .as_deref()
                .filter(|uri| !uri.is_empty())
                .unwrap_or(DEFAULT_FOLLOWER_PICTURE)
                .to_string(),
            followers: follower.followers_count,
            following: follower.following_count,
            score: follower.score,
        }
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Directed "follows" relation: `target` follows `source`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub source: String,
    pub target: String,
}

/// Discovered network, nodes and links in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FollowerNetwork {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl FollowerNetwork {
    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_node_uses_handle_and_profile_fallback() {
        let profile = ProfileSummary {
            id: "0x01".to_string(),
            picture: None,
            followers_count: 12,
            following_count: 3,
            score: 0.5,
        };
        let node = Node::from_root("lens/alice", &profile);
        assert_eq!(node.name, "lens/alice");
        assert_eq!(node.picture, DEFAULT_PROFILE_PICTURE);
        assert_eq!(node.followers, 12);
        assert_eq!(node.following, 3);
    }

    #[test]
    fn test_follower_node_keeps_picture() {
        let follower = FollowerSummary {
            id: "0x02".to_string(),
            handle: "lens/bob".to_string(),
            picture: Some("ipfs://bob".to_string()),
            following_profile_id: "0x01".to_string(),
            followers_count: 1,
            following_count: 2,
            score: 0.1,
        };
        let node = Node::from_follower(&follower);
        assert_eq!(node.picture, "ipfs://bob");
        assert_eq!(node.name, "lens/bob");
    }

    #[test]
    fn test_empty_picture_uses_fallback() {
        let profile = ProfileSummary {
            id: "0x01".to_string(),
            picture: Some(String::new()),
            followers_count: 0,
            following_count: 0,
            score: 0.0,
        };
        assert_eq!(Node::from_root("lens/alice", &profile).picture, DEFAULT_PROFILE_PICTURE);

        let follower = FollowerSummary {
            id: "0x02".to_string(),
            handle: "lens/bob".to_string(),
            picture: Some(String::new()),
            following_profile_id: "0x01".to_string(),
            followers_count: 0,
            following_count: 0,
            score: 0.0,
        };
        assert_eq!(Node::from_follower(&follower).picture, DEFAULT_FOLLOWER_PICTURE);
    }

    #[test]
    fn test_network_serializes_in_document_layout() {
        let network = FollowerNetwork {
            nodes: vec![Node {
                id: "0x01".to_string(),
                name: "lens/alice".to_string(),
                picture: DEFAULT_PROFILE_PICTURE.to_string(),
                followers: 2,
                following: 5,
                score: 0.9,
            }],
            links: vec![Link {
                source: "0x01".to_string(),
                target: "0x02".to_string(),
            }],
        };
        let value = serde_json::to_value(&network).unwrap();
        assert_eq!(value["nodes"][0]["lensScore"], 0.9);
        assert_eq!(value["nodes"][0]["name"], "lens/alice");
        assert_eq!(value["links"][0]["source"], "0x01");
        assert_eq!(value["links"][0]["target"], "0x02");
    }
}
