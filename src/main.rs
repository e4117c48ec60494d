//! texwords: count the words of a LaTeX document section by section.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use texwords::reduce::Reducer;
use texwords::report::{RenderOptions, Report};
use texwords::{config, input, segment};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "texwords", version)]
#[command(about = "Count words in a LaTeX file hierarchically", long_about = None)]
#[command(after_help = "Examples:\n  texwords paper.tex\n  cat paper.tex | texwords")]
struct Args {
    /// LaTeX file to count; reads standard input when omitted
    #[arg(value_name = "PATH")]
    path: Option<PathBuf>,

    /// Report depth: 0 total only, 1 sections, 2 subsections
    #[arg(long, short = 'd', value_name = "N")]
    depth: Option<usize>,

    /// Print the count tree as JSON
    #[arg(long)]
    json: bool,

    /// List preamble and subsections even when they have no words
    #[arg(long)]
    show_empty: bool,

    /// Load settings from this file instead of texwords.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut cfg = config::Config::load(args.config.as_deref());

    // Override config with command line args
    if let Some(depth) = args.depth {
        cfg.depth = depth;
    }
    if args.show_empty {
        cfg.show_empty = true;
    }

    let document = match input::read_document(args.path.as_deref()) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let reducer = Reducer::new(cfg.policy());
    let root = segment(&document);
    let report = Report::tally(&root, &reducer);

    if args.json {
        match report.to_json() {
            Ok(json) => println!("{json}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        let options = RenderOptions {
            depth: cfg.depth,
            show_empty: cfg.show_empty,
        };
        print!("{}", report.render(&options));
    }

    ExitCode::SUCCESS
}

fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
