use anyhow::{Context, bail};
use clap::ArgMatches;
use colored::Colorize;
use lensgraph_core::config::{DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS, LensConfig, PageSize};
use lensgraph_core::report::{generate_report, save_report};
use lensgraph_network::builder::DEFAULT_MAX_NODES;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::Level;

/// Namespace prepended to bare handles such as `robinroy`.
pub const DEFAULT_NAMESPACE: &str = "lens";

// Helper functions for crawl handler

/// Load handles from either a file or a single handle argument
pub fn load_handles_from_source(
    handle: Option<&String>,
    handles_file: Option<&PathBuf>,
) -> anyhow::Result<Vec<String>> {
    if let Some(handles_file_path) = handles_file {
        load_handles_from_file(handles_file_path)
    } else if let Some(handle) = handle {
        match parse_handle_line(handle) {
            Some(handle) => Ok(vec![handle]),
            None => bail!("Invalid handle '{}'", handle),
        }
    } else {
        bail!("Either --handle or --handles-file must be provided")
    }
}

/// Load and parse handles from a file
pub fn load_handles_from_file(path: &Path) -> anyhow::Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read handles file {}", path.display()))?;

    let handles: Vec<String> = content.lines().filter_map(parse_handle_line).collect();

    if handles.is_empty() {
        bail!("No valid handles found in {}", path.display());
    }

    Ok(handles)
}

/// Parse a single line as a handle, adding the default namespace if needed.
/// Blank lines and `#` comments yield `None`.
pub fn parse_handle_line(line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }

    if line.chars().any(char::is_whitespace) {
        eprintln!("⚠️  Skipping invalid handle '{}'", line);
        return None;
    }

    match line.split_once('/') {
        None => Some(format!("{}/{}", DEFAULT_NAMESPACE, line)),
        Some((namespace, local))
            if !namespace.is_empty() && !local.is_empty() && !local.contains('/') =>
        {
            Some(line.to_string())
        }
        Some(_) => {
            eprintln!("⚠️  Skipping invalid handle '{}'", line);
            None
        }
    }
}

/// Where to write the report for `handle`. With several handles each one gets its own file,
/// `<stem>-<handle>.<ext>` next to the requested path.
pub fn output_path_for(base: &Path, handle: &str, multiple: bool) -> PathBuf {
    if !multiple {
        return base.to_path_buf();
    }

    let stem = base
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "network".to_string());
    let suffix = handle.replace(['/', '\\'], "_");
    let file_name = match base.extension() {
        Some(ext) => format!("{}-{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}-{}", stem, suffix),
    };
    base.with_file_name(file_name)
}

/// Expand `~` in a user supplied output path
pub fn expand_output_path(raw: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(raw).as_ref())
}

/// Add the extension matching `format` to an output path that has none
pub fn with_format_extension(path: PathBuf, format: ReportFormat) -> PathBuf {
    if path.extension().is_some() {
        path
    } else {
        path.with_extension(format.extension())
    }
}

/// JSON reports for several handles must go to files; concatenated on stdout they are not
/// one JSON document.
pub fn check_output_target(
    handle_count: usize,
    output: Option<&Path>,
    format: ReportFormat,
) -> anyhow::Result<()> {
    if handle_count > 1 && output.is_none() && format == ReportFormat::Json {
        bail!(
            "--output is required to write JSON reports for {} handles",
            handle_count
        );
    }
    Ok(())
}

/// Map `-v` occurrences to a log level; logs go to stderr so reports can be piped.
pub fn verbosity_level(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

pub fn init_tracing(verbosity: u8) {
    tracing_subscriber::fmt()
        .with_max_level(verbosity_level(verbosity))
        .with_writer(std::io::stderr)
        .init();
}

// Re-export crawl types and functions from lensgraph-core
pub use lensgraph_core::crawl::{CrawlOptions, CrawlProgressCallback, execute_crawl};
pub use lensgraph_core::report::ReportFormat;

pub async fn handle_crawl(
    sub_matches: &ArgMatches,
    quiet: bool,
    verbosity: u8,
) -> anyhow::Result<()> {
    let handle = sub_matches.get_one::<String>("handle");
    let handles_file = sub_matches.get_one::<PathBuf>("handles-file");
    let max_nodes = *sub_matches
        .get_one::<usize>("max-nodes")
        .unwrap_or(&DEFAULT_MAX_NODES);
    let endpoint = sub_matches
        .get_one::<String>("endpoint")
        .map(String::as_str)
        .unwrap_or(DEFAULT_ENDPOINT);
    let page_size = sub_matches
        .get_one::<String>("page-size")
        .and_then(|s| PageSize::from_str(s))
        .unwrap_or_default();
    let timeout = *sub_matches
        .get_one::<u64>("timeout")
        .unwrap_or(&DEFAULT_TIMEOUT_SECS);
    let cache = sub_matches.get_flag("cache");
    let format = sub_matches
        .get_one::<String>("format")
        .and_then(|s| ReportFormat::from_str(s))
        .unwrap_or(ReportFormat::Json);
    let output = sub_matches
        .get_one::<String>("output")
        .map(|p| with_format_extension(expand_output_path(p), format));

    // Load handles from source
    let handles = load_handles_from_source(handle, handles_file)?;
    check_output_target(handles.len(), output.as_deref(), format)?;

    if max_nodes == 0 {
        bail!("--max-nodes must be at least 1");
    }

    let config = LensConfig::default()
        .with_endpoint(endpoint)?
        .with_page_size(page_size)
        .with_timeout(timeout)
        .with_cache(cache);

    // Print crawl configuration
    if !quiet {
        eprintln!("\n🕸️  Crawling {} handle(s)", handles.len());
        eprintln!("Endpoint: {}", config.endpoint);
        eprintln!("Max nodes: {}", max_nodes);
        eprintln!("Page size: {}", page_size.count());
        eprintln!("Max depth: 2\n");
    }

    let options = CrawlOptions {
        handles,
        max_nodes,
        config,
        // Log lines and the spinner fight over stderr
        show_progress_bars: !quiet && verbosity == 0,
    };

    let progress_callback: Option<CrawlProgressCallback> = if quiet {
        None
    } else {
        Some(Arc::new(|msg: String| {
            eprintln!("{}", msg);
        }))
    };

    let outcomes = execute_crawl(options, progress_callback)
        .await
        .map_err(anyhow::Error::msg)?;

    let multiple = outcomes.len() > 1;
    let mut failures = 0;

    for outcome in &outcomes {
        let network = match outcome.result {
            Ok(ref network) => network,
            Err(ref e) => {
                failures += 1;
                if quiet {
                    eprintln!("{} {}: {}", "✗".red().bold(), outcome.handle, e);
                }
                continue;
            }
        };

        let report = generate_report(network, format)
            .with_context(|| format!("Failed to render report for {}", outcome.handle))?;

        match output {
            Some(ref base) => {
                let path = output_path_for(base, &outcome.handle, multiple);
                save_report(&report, &path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                if !quiet {
                    eprintln!(
                        "{} {}: {} nodes, {} links saved to {}",
                        "✓".green().bold(),
                        outcome.handle,
                        network.node_count(),
                        network.link_count(),
                        path.display().to_string().bright_white()
                    );
                }
            }
            None => {
                print!("{}", report);
                if !report.ends_with('\n') {
                    println!();
                }
                if !quiet {
                    eprintln!(
                        "{} {}: {} nodes, {} links",
                        "✓".green().bold(),
                        outcome.handle,
                        network.node_count(),
                        network.link_count()
                    );
                }
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} crawls failed", failures, outcomes.len());
    }

    Ok(())
}
