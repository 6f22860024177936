use colored::Colorize;

pub mod config;
pub mod crawl;
pub mod error;
pub mod lens;
pub mod report;

pub use config::{LensConfig, PageSize};
pub use error::ApiError;
pub use lens::LensClient;

const BANNER: &str = r#"
  _                                         _
 | |    ___ _ __  ___  __ _ _ __ __ _ _ __ | |__
 | |   / _ \ '_ \/ __|/ _` | '__/ _` | '_ \| '_ \
 | |__|  __/ | | \__ \ (_| | | | (_| | |_) | | | |
 |_____\___|_| |_|___/\__, |_|  \__,_| .__/|_| |_|
                      |___/          |_|
"#;

pub fn print_banner() {
    eprintln!("{}", BANNER.bright_magenta().bold());
    eprintln!(
        "  {} {}\n",
        "follower network crawler".bright_white(),
        format!("v{}", env!("CARGO_PKG_VERSION")).bright_black()
    );
}
