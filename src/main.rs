//! # finite-inference
//!
//! A command-line front end for the inference exercises in the `finite_inference` crate.
//!
//! ## Usage
//!
//! ```sh
//! finite-inference [OPTIONS] <COMMAND>
//! ```
//!
//! ### Subcommands
//!
//! 1.  **`knights`**: Solve the four Knights and Knaves puzzles.
//! 2.  **`heredity <CSV>`**: Print gene and trait posteriors for every person in a family file.
//! 3.  **`pagerank <DIR>`**: Rank the `.html` pages in a directory by sampling and by iteration.
//!     ```sh
//!     finite-inference pagerank corpus0 --samples 10000 --seed 42
//!     ```
//! 4.  **`tictactoe`**: Print the optimal move for a position (the empty board by default).
//!     ```sh
//!     finite-inference tictactoe --board "XO./.X./..."
//!     ```
//! 5.  **`completions <SHELL>`**: Generate shell completion scripts.
//!
//! ### Common Options
//!
//! -   `-d, --debug`: Log at debug level (otherwise `RUST_LOG` decides).
//! -   `-s, --stats`: Print timing and memory statistics after the command.

use clap::Parser;
use command_line::cli::{Cli, run};

mod command_line;

/// Global allocator using `tikv-jemallocator`, which also backs the memory statistics.
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

fn main() {
    let cli = Cli::parse();

    let mut logger = env_logger::Builder::from_default_env();
    if cli.common.debug {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
