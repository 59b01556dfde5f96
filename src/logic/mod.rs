#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Propositional logic: sentences, truth assignments and model checking.

/// Evaluation and model checking.
pub mod entailment;
/// Truth assignments and compiled sentences.
pub mod model;
/// Symbols and sentences.
pub mod sentence;

pub use entailment::{Entailment, check, entails, evaluate, satisfying_models};
pub use model::Model;
pub use sentence::{Sentence, Symbol};
