#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! This module ranks the pages of a linked corpus by the random-surfer model.

/// Page graphs and the HTML crawler.
pub mod corpus;

/// Iterative and sampling PageRank estimators.
pub mod rank;
