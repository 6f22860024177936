use crate::CLAP_STYLING;
use clap::{arg, command};
use lensgraph_core::config::DEFAULT_ENDPOINT;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("lensgraph")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("lensgraph")
        .styles(CLAP_STYLING)
        .arg(arg!(-q --"quiet" "Suppress banner and non-essential output").required(false))
        .arg(
            arg!(-v --"verbose" ...)
                .help("Increase log verbosity (-v debug, -vv trace)")
                .required(false),
        )
        .subcommand_required(false)
        .subcommand(
            command!("crawl")
                .about(
                    "Crawl the follower network of a profile, breadth-first up to two hops \
                from the starting handle.",
                )
                .arg(
                    arg!(-p --"handle" <HANDLE>)
                        .required(false)
                        .help("The handle to start from, e.g. lens/robinroy")
                        .conflicts_with("handles-file"),
                )
                .arg(
                    arg!(-H --"handles-file" <PATH>)
                        .required(false)
                        .help("Path to a newline-delimited file of handles to crawl")
                        .value_parser(clap::value_parser!(std::path::PathBuf))
                        .conflicts_with("handle"),
                )
                .arg(
                    arg!(-n --"max-nodes" <COUNT>)
                        .required(false)
                        .help("Stop expanding once the network holds this many profiles")
                        .value_parser(clap::value_parser!(usize))
                        .default_value("200"),
                )
                .arg(
                    arg!(--"endpoint" <URL>)
                        .required(false)
                        .help("Lens GraphQL API endpoint")
                        .default_value(DEFAULT_ENDPOINT),
                )
                .arg(
                    arg!(--"page-size" <SIZE>)
                        .required(false)
                        .help("Followers fetched per profile: ten, twenty-five, fifty")
                        .value_parser(["ten", "twenty-five", "fifty"])
                        .default_value("ten"),
                )
                .arg(
                    arg!(--"timeout" <SECONDS>)
                        .required(false)
                        .help("Request timeout in seconds")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("10"),
                )
                .arg(
                    arg!(--"cache")
                        .required(false)
                        .help("Reuse API responses for repeated lookups within this run")
                        .action(clap::ArgAction::SetTrue),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help(
                            "Save report to file (default: display to screen). Required for \
                        JSON output with several handles; each handle gets its own file",
                        ),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: json, dot, text")
                        .value_parser(["json", "dot", "text"])
                        .default_value("json"),
                ),
        )
}
