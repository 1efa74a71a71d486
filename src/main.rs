//! CLI entry point for the extractor.

use zugferd_extractor::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
