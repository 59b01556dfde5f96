#![allow(clippy::cast_precision_loss)]

use clap::{Args, CommandFactory, Parser, Subcommand};
use finite_inference::heredity::family::Genes;
use finite_inference::heredity::inference::{HeredityModel, infer};
use finite_inference::heredity::loader::load_family;
use finite_inference::knights::puzzle::{Solution, puzzles, symbols};
use finite_inference::pagerank::corpus::crawl;
use finite_inference::pagerank::rank::{
    DAMPING, PageRankConfig, Ranks, SAMPLES, iterate_pagerank, sample_pagerank,
};
use finite_inference::tictactoe::board::{Board, Mark};
use finite_inference::tictactoe::minimax::{game_value, minimax};
use log::debug;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tikv_jemalloc_ctl::{epoch, stats};

/// Defines the command-line interface for the inference exercises.
///
/// Uses `clap` for parsing arguments.
#[derive(Parser, Debug)]
#[command(
    name = "finite-inference",
    version,
    about = "Model checking, Bayesian enumeration, PageRank and minimax"
)]
pub(crate) struct Cli {
    /// Specifies the subcommand to execute.
    #[clap(subcommand)]
    pub command: Commands,

    /// Common options applicable to all commands.
    #[command(flatten)]
    pub common: CommonOptions,
}

/// Enumerates the available subcommands.
#[derive(Subcommand, Debug)]
pub(crate) enum Commands {
    /// Solve the Knights and Knaves puzzles by model checking.
    Knights,

    /// Compute gene and trait posteriors for a family.
    Heredity {
        /// Path to a CSV file with the header `name,mother,father,trait`.
        path: PathBuf,
    },

    /// Rank the `.html` pages of a directory.
    Pagerank {
        /// Directory containing the corpus.
        path: PathBuf,

        /// Probability of following a link rather than jumping to a random page.
        #[arg(long, default_value_t = DAMPING)]
        damping: f64,

        /// Number of pages visited by the sampling estimator.
        #[arg(long, default_value_t = SAMPLES)]
        samples: usize,

        /// Seed for the sampling estimator.
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the optimal move for a tic-tac-toe position, or play a game against itself.
    Tictactoe {
        /// Nine cells in row-major order using `X`, `O` and `.`; `/` may separate rows.
        #[arg(short, long)]
        board: Option<String>,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Defines common command-line options shared across subcommands.
#[derive(Args, Debug, Default, Clone)]
pub(crate) struct CommonOptions {
    /// Log at debug level.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) debug: bool,

    /// Print timing and memory statistics after the command.
    #[arg(short, long, global = true, default_value_t = false)]
    pub(crate) stats: bool,
}

/// Dispatches a parsed command line.
///
/// # Errors
///
/// A description of the first load or solve failure.
pub(crate) fn run(cli: Cli) -> Result<(), String> {
    match cli.command {
        Commands::Knights => solve_knights(&cli.common),
        Commands::Heredity { path } => solve_heredity(&path, &cli.common),
        Commands::Pagerank {
            path,
            damping,
            samples,
            seed,
        } => {
            let config = PageRankConfig {
                damping,
                samples,
                seed,
                ..PageRankConfig::default()
            };
            rank_pages(&path, &config, &cli.common)
        }
        Commands::Tictactoe { board } => play_tictactoe(board.as_deref(), &cli.common),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            clap_complete::generate(shell, &mut cmd, name, &mut std::io::stdout());
            Ok(())
        }
    }
}

/// Solves every Knights puzzle and prints the entailed symbols.
pub(crate) fn solve_knights(common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let candidates = symbols();
    let puzzles = puzzles();

    for puzzle in &puzzles {
        println!("{}", puzzle.name);
        debug!("knowledge: {}", puzzle.knowledge);
        match puzzle.solve(&candidates) {
            Solution::NotImplemented => println!("    Not yet implemented."),
            Solution::Contradictory => println!("    Knowledge base is contradictory."),
            Solution::Entailed(entailed) => {
                for symbol in entailed {
                    println!("    {symbol}");
                }
            }
        }
    }

    if common.stats {
        print_stats(
            "Knights",
            time.elapsed(),
            &[
                ("Puzzles", puzzles.len().to_string()),
                ("Symbols", candidates.len().to_string()),
            ],
        );
    }
    Ok(())
}

/// Loads a family and prints the posterior of every person.
///
/// # Errors
///
/// If the file cannot be loaded or its evidence is impossible.
pub(crate) fn solve_heredity(path: &PathBuf, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let family = load_family(path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    let posteriors = infer(&family, &HeredityModel::default()).map_err(|e| e.to_string())?;
    let elapsed = time.elapsed();

    for posterior in posteriors.iter() {
        println!("{}:", posterior.name);
        println!("  Gene:");
        for genes in Genes::ALL.iter().rev() {
            println!("    {}: {:.4}", genes.count(), posterior.gene(*genes));
        }
        println!("  Trait:");
        for (label, value) in [("True", true), ("False", false)] {
            println!("    {label}: {:.4}", posterior.trait_probability(value));
        }
    }

    if common.stats {
        let unobserved = family
            .people()
            .iter()
            .filter(|p| p.observed_trait.is_none())
            .count();
        print_stats(
            "Heredity",
            elapsed,
            &[
                ("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64())),
                ("People", family.len().to_string()),
                ("Unobserved traits", unobserved.to_string()),
            ],
        );
    }
    Ok(())
}

fn print_ranks(title: &str, ranks: &Ranks) {
    println!("{title}");
    for (page, rank) in ranks {
        println!("  {page}: {rank:.4}");
    }
}

/// Crawls a corpus and prints both `PageRank` estimates.
///
/// # Errors
///
/// If the directory cannot be crawled or the configuration is rejected.
pub(crate) fn rank_pages(
    path: &PathBuf,
    config: &PageRankConfig,
    common: &CommonOptions,
) -> Result<(), String> {
    let time = Instant::now();
    let corpus = crawl(path).map_err(|e| e.to_string())?;
    let parse_time = time.elapsed();

    let sampled = sample_pagerank(&corpus, config).map_err(|e| e.to_string())?;
    print_ranks(
        &format!("PageRank Results from Sampling (n = {})", config.samples),
        &sampled,
    );

    let iterated = iterate_pagerank(&corpus, config).map_err(|e| e.to_string())?;
    print_ranks("PageRank Results from Iteration", &iterated);

    if common.stats {
        let links: usize = (0..corpus.len()).map(|i| corpus.links(i).len()).sum();
        print_stats(
            "PageRank",
            time.elapsed(),
            &[
                ("Parse time (s)", format!("{:.3}", parse_time.as_secs_f64())),
                ("Pages", corpus.len().to_string()),
                ("Links", links.to_string()),
                ("Damping", config.damping.to_string()),
            ],
        );
    }
    Ok(())
}

fn describe_outcome(board: &Board) -> &'static str {
    match board.winner() {
        Some(Mark::X) => "Game over: X wins",
        Some(Mark::O) => "Game over: O wins",
        None => "Game over: tie",
    }
}

/// Prints the move minimax chooses for a position, or plays a whole game against itself
/// from the empty board when no position is given.
///
/// # Errors
///
/// If the board description is malformed.
pub(crate) fn play_tictactoe(board: Option<&str>, common: &CommonOptions) -> Result<(), String> {
    let time = Instant::now();
    let mut moves = 0_usize;

    if let Some(cells) = board {
        let board = cells.parse::<Board>().map_err(|e| e.to_string())?;
        println!("{board}\n");
        match (board.player(), minimax(&board)) {
            (Some(player), Some(action)) => {
                moves += 1;
                let outcome = match game_value(&board) {
                    1 => "X wins",
                    -1 => "O wins",
                    _ => "draw",
                };
                println!("{player} to move: {action}");
                println!("With best play: {outcome}");
            }
            _ => println!("{}", describe_outcome(&board)),
        }
    } else {
        let mut board = Board::empty();
        println!("{board}\n");
        while let (Some(player), Some(action)) = (board.player(), minimax(&board)) {
            board = board.result(action).map_err(|e| e.to_string())?;
            moves += 1;
            println!("{player} plays {action}\n{board}\n");
        }
        println!("{}", describe_outcome(&board));
    }

    if common.stats {
        print_stats("Tic-tac-toe", time.elapsed(), &[("Moves searched", moves.to_string())]);
    }
    Ok(())
}

/// Allocated and resident memory in MiB, if jemalloc reports them.
fn memory_mib() -> Option<(f64, f64)> {
    epoch::advance().ok()?;
    let allocated = stats::allocated::mib().ok()?.read().ok()?;
    let resident = stats::resident::mib().ok()?.read().ok()?;
    Some((
        allocated as f64 / (1024.0 * 1024.0),
        resident as f64 / (1024.0 * 1024.0),
    ))
}

/// Helper function to print a single statistic line in a formatted table row.
pub(crate) fn stat_line(label: &str, value: impl std::fmt::Display) {
    println!("|  {label:<28} {value:>18}  |");
}

/// Prints a summary table of command-specific statistics, time and memory.
pub(crate) fn print_stats(title: &str, elapsed: Duration, rows: &[(&str, String)]) {
    println!("\n=======================[ {title} Statistics ]=======================");
    for (label, value) in rows {
        stat_line(label, value);
    }
    if let Some((allocated, resident)) = memory_mib() {
        stat_line("Memory usage (MiB)", format!("{allocated:.2}"));
        stat_line("Resident memory (MiB)", format!("{resident:.2}"));
    }
    stat_line("CPU time (s)", format!("{:.3}", elapsed.as_secs_f64()));
    println!("=====================================================================");
}
