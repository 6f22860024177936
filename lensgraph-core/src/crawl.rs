use crate::config::LensConfig;
use crate::lens::LensClient;
use indicatif::{ProgressBar, ProgressStyle};
use lensgraph_network::{BuildError, BuildProgress, FollowerNetwork, NetworkBuilder, ProgressCallback};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Options for configuring a crawl operation
pub struct CrawlOptions {
    pub handles: Vec<String>,
    pub max_nodes: usize,
    pub config: LensConfig,
    pub show_progress_bars: bool,
}

/// Callback for reporting crawl progress
pub type CrawlProgressCallback = Arc<dyn Fn(String) + Send + Sync>;

/// Result of crawling one starting handle
#[derive(Debug)]
pub struct CrawlOutcome {
    pub handle: String,
    pub result: Result<FollowerNetwork, String>,
}

impl CrawlOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Build the follower network for a single handle using the given client for both lookups.
pub async fn crawl_handle(
    client: &LensClient,
    handle: &str,
    max_nodes: usize,
    progress_callback: Option<ProgressCallback>,
) -> Result<FollowerNetwork, BuildError> {
    let mut builder = NetworkBuilder::with_max_nodes(max_nodes);
    if let Some(callback) = progress_callback {
        builder = builder.with_progress_callback(callback);
    }
    debug!(
        "Crawling {} via {} ({} followers per page, max {} nodes)",
        handle,
        client.config().endpoint,
        client.config().page_size.count(),
        builder.max_nodes()
    );
    builder.build(handle, client, client).await
}

/// Execute a crawl with the given options
/// Returns one outcome per handle, in input order
pub async fn execute_crawl(
    options: CrawlOptions,
    progress_callback: Option<CrawlProgressCallback>,
) -> Result<Vec<CrawlOutcome>, String> {
    let CrawlOptions {
        handles,
        max_nodes,
        config,
        show_progress_bars,
    } = options;

    if handles.is_empty() {
        return Err("No handles provided".to_string());
    }

    let client =
        LensClient::new(config).map_err(|e| format!("Failed to create Lens client: {}", e))?;

    let progress_bar = if show_progress_bars {
        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg}")
                .map_err(|e| format!("Invalid progress template: {}", e))?,
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb.set_message("Starting crawl...");
        Some(Arc::new(pb))
    } else {
        None
    };

    let builder_callback: Option<ProgressCallback> = progress_bar.clone().map(|pb| {
        let callback: ProgressCallback = Arc::new(move |progress: BuildProgress| {
            pb.set_message(format!(
                "Crawling... {} profiles expanded, {} nodes, {} links",
                progress.processed, progress.nodes, progress.links
            ));
        });
        callback
    });

    let mut outcomes = Vec::with_capacity(handles.len());
    for (idx, handle) in handles.iter().enumerate() {
        if let Some(ref callback) = progress_callback
            && handles.len() > 1
        {
            callback(format!(
                "Crawling handle {}/{}: {}",
                idx + 1,
                handles.len(),
                handle
            ));
        }

        let result = crawl_handle(&client, handle, max_nodes, builder_callback.clone())
            .await
            .map_err(|e| e.to_string());

        if let Err(ref e) = result
            && let Some(ref callback) = progress_callback
        {
            callback(format!("[!]  Failed to crawl {}: {}", handle, e));
        }

        outcomes.push(CrawlOutcome {
            handle: handle.clone(),
            result,
        });
    }

    if let Some(ref pb) = progress_bar {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        pb.finish_with_message(format!(
            "Crawl complete! {}/{} handles crawled",
            succeeded,
            outcomes.len()
        ));
    }

    Ok(outcomes)
}
