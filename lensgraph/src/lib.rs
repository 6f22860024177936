// Include handlers module directly from handlers.rs
#[path = "handlers.rs"]
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    load_handles_from_file,
    load_handles_from_source,
    output_path_for,
    parse_handle_line,
};

// Re-export crawl functionality from lensgraph-core
pub use lensgraph_core::crawl::{
    execute_crawl, CrawlOptions, CrawlOutcome, CrawlProgressCallback,
};
pub use lensgraph_core::report::ReportFormat;
