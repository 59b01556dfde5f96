#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Evaluation and model checking.
//!
//! Entailment is decided by enumerating every assignment over the symbols of the
//! knowledge base and the query: `knowledge ⊨ query` holds iff no assignment makes
//! the knowledge true and the query false. When the knowledge base has no model at all
//! it entails everything; [`check`] reports that case separately as
//! [`Entailment::Vacuous`] so callers can tell it apart from a genuine consequence.

use log::{debug, warn};

use crate::error::LogicError;
use crate::logic::model::{Assignments, Model, SymbolTable};
use crate::logic::sentence::Sentence;

/// Evaluates `sentence` under `model`.
///
/// # Errors
///
/// [`LogicError::UnboundSymbol`] if the sentence mentions a symbol the model does not bind.
pub fn evaluate(sentence: &Sentence, model: &Model) -> Result<bool, LogicError> {
    Ok(match sentence {
        Sentence::Symbol(s) => model
            .get(s)
            .ok_or_else(|| LogicError::UnboundSymbol(s.name().to_string()))?,
        Sentence::Not(operand) => !evaluate(operand, model)?,
        Sentence::And(operands) => {
            for operand in operands {
                if !evaluate(operand, model)? {
                    return Ok(false);
                }
            }
            true
        }
        Sentence::Or(operands) => {
            for operand in operands {
                if evaluate(operand, model)? {
                    return Ok(true);
                }
            }
            false
        }
        Sentence::Implication(left, right) => !evaluate(left, model)? || evaluate(right, model)?,
        Sentence::Biconditional(left, right) => evaluate(left, model)? == evaluate(right, model)?,
    })
}

/// Outcome of a model check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entailment {
    /// Every model of the knowledge base satisfies the query, and there is at least one.
    Holds,
    /// The knowledge base has no model, so it entails every query.
    Vacuous,
    /// Some model of the knowledge base falsifies the query.
    Fails,
}

impl Entailment {
    /// Whether the query follows, vacuously or not.
    #[must_use]
    pub const fn entails(self) -> bool {
        matches!(self, Self::Holds | Self::Vacuous)
    }
}

/// Model-checks `knowledge ⊨ query`, distinguishing vacuous success.
#[must_use]
pub fn check(knowledge: &Sentence, query: &Sentence) -> Entailment {
    let mut table = SymbolTable::from_sentences([knowledge, query]);
    let kb = table.compile(knowledge);
    let q = table.compile(query);

    let mut satisfiable = false;
    let mut enumerated = 0_usize;
    for values in Assignments::new(table.len()) {
        enumerated += 1;
        if kb.eval(&values) {
            satisfiable = true;
            if !q.eval(&values) {
                debug!("{query} is falsified by {:?}", table.to_model(&values));
                return Entailment::Fails;
            }
        }
    }

    debug!("checked {enumerated} models over {} symbols", table.len());
    if satisfiable {
        Entailment::Holds
    } else {
        warn!("knowledge base is unsatisfiable; {query} is entailed vacuously");
        Entailment::Vacuous
    }
}

/// Returns whether `knowledge` entails `query` (true when the knowledge base is unsatisfiable).
#[must_use]
pub fn entails(knowledge: &Sentence, query: &Sentence) -> bool {
    check(knowledge, query).entails()
}

/// Every model of `sentence` over exactly its own symbols.
#[must_use]
pub fn satisfying_models(sentence: &Sentence) -> Vec<Model> {
    let mut table = SymbolTable::from_sentences([sentence]);
    let compiled = table.compile(sentence);
    Assignments::new(table.len())
        .filter(|values| compiled.eval(values))
        .map(|values| table.to_model(&values))
        .collect()
}
