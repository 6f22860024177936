// Report generation for crawled follower networks

use lensgraph_network::{FollowerNetwork, Node};
use petgraph::Direction;
use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Json,
    Dot,
    Text,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(ReportFormat::Json),
            "dot" | "graphviz" => Some(ReportFormat::Dot),
            "text" | "txt" => Some(ReportFormat::Text),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Json => "json",
            ReportFormat::Dot => "dot",
            ReportFormat::Text => "txt",
        }
    }
}

/// Directed graph view of a network. Edges point from the followed profile to the follower;
/// links whose endpoints are not nodes of the network are skipped.
pub fn to_petgraph(network: &FollowerNetwork) -> DiGraph<&Node, &'static str> {
    let mut graph = DiGraph::with_capacity(network.nodes.len(), network.links.len());
    let mut indices: HashMap<&str, NodeIndex> = HashMap::with_capacity(network.nodes.len());

    for node in &network.nodes {
        indices.insert(node.id.as_str(), graph.add_node(node));
    }

    for link in &network.links {
        if let (Some(&source), Some(&target)) = (
            indices.get(link.source.as_str()),
            indices.get(link.target.as_str()),
        ) {
            graph.add_edge(source, target, "follows");
        }
    }

    graph
}

pub fn generate_report(
    network: &FollowerNetwork,
    format: ReportFormat,
) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Json => generate_json_report(network),
        ReportFormat::Dot => Ok(generate_dot_report(network)),
        ReportFormat::Text => Ok(generate_text_report(network)),
    }
}

/// The `{ nodes, links }` document consumed by force-graph style visualisers.
pub fn generate_json_report(network: &FollowerNetwork) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(network)
}

pub fn generate_dot_report(network: &FollowerNetwork) -> String {
    let graph = to_petgraph(network);
    let dot = Dot::with_attr_getters(
        &graph,
        &[Config::EdgeNoLabel],
        &|_, _| String::new(),
        &|_, (_, node)| format!("tooltip = \"{}\"", node.id.replace('"', "\\\"")),
    );
    format!("{}", dot)
}

pub fn generate_text_report(network: &FollowerNetwork) -> String {
    let graph = to_petgraph(network);

    let mut report = String::new();
    report.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");
    report.push_str("# Summary:\n");
    if let Some(root) = network.root() {
        report.push_str(&format!("  Root profile: {} ({})\n", root.name, root.id));
    }
    report.push_str(&format!("  Nodes: {}\n", network.node_count()));
    report.push_str(&format!("  Links: {}\n", network.link_count()));
    report.push_str(&format!(
        "  Generated at: {}\n",
        chrono::Utc::now().to_rfc3339()
    ));
    report.push_str("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    // Profiles ranked by platform follower count
    let mut ranked: Vec<NodeIndex> = graph.node_indices().collect();
    ranked.sort_by(|a, b| {
        graph[*b]
            .followers
            .cmp(&graph[*a].followers)
            .then_with(|| a.index().cmp(&b.index()))
    });

    report.push_str("## Top profiles\n");
    for idx in ranked.into_iter().take(10) {
        let node = graph[idx];
        let discovered = graph.neighbors_directed(idx, Direction::Outgoing).count();
        report.push_str(&format!(
            "  {} {} followers, {} following, score {:.2}, {} followers discovered\n",
            node.name, node.followers, node.following, node.score, discovered
        ));
    }
    report.push('\n');

    report
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}
