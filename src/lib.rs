#![deny(missing_docs)]
//! This crate provides exact and approximate inference over small finite models:
//! propositional model checking, Bayesian inheritance, `PageRank` and adversarial search.

/// The `error` module defines the error types returned by loaders and solvers.
pub mod error;

/// The `logic` module implements propositional sentences and entailment by model checking.
pub mod logic;

/// The `knights` module encodes the Knights and Knaves puzzles as knowledge bases.
pub mod knights;

/// The `heredity` module computes gene and trait posteriors for a family by full enumeration.
pub mod heredity;

/// The `pagerank` module ranks a corpus of linked pages by sampling and by iteration.
pub mod pagerank;

/// The `tictactoe` module implements the rules of tic-tac-toe and an optimal player.
pub mod tictactoe;
