#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module solves the Knights and Knaves puzzles by propositional model checking.

/// The `puzzle` module contains the puzzle knowledge bases and their solver.
pub mod puzzle;
