#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module provides Bayesian inference of an inherited gene and trait over a family tree.

/// People, gene counts and validated families.
pub mod family;

/// Probability model, joint probabilities and exact posterior inference.
pub mod inference;

/// CSV pedigree loader.
pub mod loader;
