#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module plays tic-tac-toe perfectly by exhaustive adversarial search.

/// Positions, moves and the rules of the game.
pub mod board;

/// Optimal move selection.
pub mod minimax;
