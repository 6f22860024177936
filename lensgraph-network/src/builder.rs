use crate::error::{BuildError, Result};
use crate::model::{FollowerNetwork, Link, Node};
use crate::source::{FollowerLister, ProfileResolver};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on the number of nodes in a built network.
pub const DEFAULT_MAX_NODES: usize = 200;

/// Profiles at this depth are still fetched but enqueue nothing further.
pub const MAX_EXPANSION_DEPTH: usize = 2;

/// Counts reported after each processed queue entry.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildProgress {
    pub processed: usize,
    pub nodes: usize,
    pub links: usize,
    pub profile_id: String,
    pub depth: usize,
}

pub type ProgressCallback = Arc<dyn Fn(BuildProgress) + Send + Sync>;

#[derive(Debug, Clone)]
struct QueueEntry {
    id: String,
    depth: usize,
}

pub struct NetworkBuilder {
    max_nodes: usize,
    progress_callback: Option<ProgressCallback>,
}

impl NetworkBuilder {
    pub fn new() -> Self {
        Self::with_max_nodes(DEFAULT_MAX_NODES)
    }

    pub fn with_max_nodes(max_nodes: usize) -> Self {
        Self {
            max_nodes,
            progress_callback: None,
        }
    }

    pub fn with_progress_callback(mut self, callback: ProgressCallback) -> Self {
        self.progress_callback = Some(callback);
        self
    }

    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Build the follower network rooted at `root_handle`.
    ///
    /// Fetches run one at a time in breadth-first order. The node cap is only checked before
    /// each dequeue, so the final count may exceed it by at most one listing page. Any
    /// collaborator failure aborts the build and nothing partial is returned.
    pub async fn build<R, L>(
        &self,
        root_handle: &str,
        resolver: &R,
        lister: &L,
    ) -> Result<FollowerNetwork>
    where
        R: ProfileResolver + ?Sized,
        L: FollowerLister + ?Sized,
    {
        if self.max_nodes == 0 {
            return Err(BuildError::InvalidConfig(
                "max nodes must be at least 1".to_string(),
            ));
        }

        info!(
            "Building follower network for {} (max {} nodes)",
            root_handle, self.max_nodes
        );

        let profile = resolver
            .resolve_profile(root_handle)
            .await
            .map_err(BuildError::Resolution)?;
        let root = Node::from_root(root_handle, &profile);

        let mut node_ids: HashSet<String> = HashSet::new();
        let mut link_keys: HashSet<(String, String)> = HashSet::new();
        let mut enqueued: HashSet<String> = HashSet::new();
        let mut queue: VecDeque<QueueEntry> = VecDeque::new();

        node_ids.insert(root.id.clone());
        enqueued.insert(root.id.clone());
        queue.push_back(QueueEntry {
            id: root.id.clone(),
            depth: 0,
        });

        let mut network = FollowerNetwork {
            nodes: vec![root],
            links: Vec::new(),
        };
        let mut processed = 0;

        while network.nodes.len() < self.max_nodes {
            let Some(current) = queue.pop_front() else {
                break;
            };

            debug!("Fetching followers of {} (depth {})", current.id, current.depth);
            let followers = lister
                .list_followers(&current.id)
                .await
                .map_err(BuildError::Listing)?;

            for follower in followers {
                if follower.following_profile_id != current.id {
                    warn!(
                        "Follower {} reports following {} while listing {}",
                        follower.id, follower.following_profile_id, current.id
                    );
                }

                if node_ids.insert(follower.id.clone()) {
                    network.nodes.push(Node::from_follower(&follower));
                }

                if link_keys.insert((current.id.clone(), follower.id.clone())) {
                    network.links.push(Link {
                        source: current.id.clone(),
                        target: follower.id.clone(),
                    });
                }

                if current.depth < MAX_EXPANSION_DEPTH && enqueued.insert(follower.id.clone()) {
                    debug!("  -> Queuing {} at depth {}", follower.id, current.depth + 1);
                    queue.push_back(QueueEntry {
                        id: follower.id,
                        depth: current.depth + 1,
                    });
                }
            }

            processed += 1;
            info!(
                "Processed: {} nodes, {} links",
                network.nodes.len(),
                network.links.len()
            );

            if let Some(ref callback) = self.progress_callback {
                callback(BuildProgress {
                    processed,
                    nodes: network.nodes.len(),
                    links: network.links.len(),
                    profile_id: current.id,
                    depth: current.depth,
                });
            }
        }

        info!(
            "Network complete. {} nodes, {} links, {} profiles expanded",
            network.nodes.len(),
            network.links.len(),
            processed
        );
        Ok(network)
    }
}

impl Default for NetworkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
