#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Propositional sentences.
//!
//! A [`Sentence`] is a tree over six variants: atoms, negation, n-ary conjunction and
//! disjunction, implication and biconditional. Evaluation is a single recursive match
//! over the variant (see [`crate::logic::entailment`]); this module only builds trees,
//! collects their atoms and renders them as formulas.

use std::collections::BTreeSet;
use std::fmt::{self, Display};

use itertools::Itertools;

/// A named propositional atom. Two symbols with the same name are the same atom.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol(String);

impl Symbol {
    /// A symbol with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The symbol's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A propositional sentence.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sentence {
    /// An atom.
    Symbol(Symbol),
    /// Negation.
    Not(Box<Sentence>),
    /// Conjunction of any number of operands; empty is `true`.
    And(Vec<Sentence>),
    /// Disjunction of any number of operands; empty is `false`.
    Or(Vec<Sentence>),
    /// `antecedent => consequent`.
    Implication(Box<Sentence>, Box<Sentence>),
    /// `left <=> right`.
    Biconditional(Box<Sentence>, Box<Sentence>),
}

impl Sentence {
    /// An atom with the given name.
    #[must_use]
    pub fn atom(name: impl Into<String>) -> Self {
        Self::Symbol(Symbol::new(name))
    }

    /// Negation of `operand`.
    #[must_use]
    #[allow(clippy::should_implement_trait)]
    pub fn not(operand: impl Into<Self>) -> Self {
        Self::Not(Box::new(operand.into()))
    }

    /// Conjunction of `conjuncts`.
    #[must_use]
    pub fn and<I, S>(conjuncts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Self>,
    {
        Self::And(conjuncts.into_iter().map(Into::into).collect())
    }

    /// Disjunction of `disjuncts`.
    #[must_use]
    pub fn or<I, S>(disjuncts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Self>,
    {
        Self::Or(disjuncts.into_iter().map(Into::into).collect())
    }

    /// `antecedent => consequent`.
    #[must_use]
    pub fn implies(antecedent: impl Into<Self>, consequent: impl Into<Self>) -> Self {
        Self::Implication(Box::new(antecedent.into()), Box::new(consequent.into()))
    }

    /// `left <=> right`.
    #[must_use]
    pub fn iff(left: impl Into<Self>, right: impl Into<Self>) -> Self {
        Self::Biconditional(Box::new(left.into()), Box::new(right.into()))
    }

    /// Every atom mentioned anywhere in the sentence, in name order.
    #[must_use]
    pub fn symbols(&self) -> BTreeSet<Symbol> {
        let mut found = BTreeSet::new();
        self.collect_symbols(&mut found);
        found
    }

    fn collect_symbols(&self, found: &mut BTreeSet<Symbol>) {
        match self {
            Self::Symbol(s) => {
                found.insert(s.clone());
            }
            Self::Not(operand) => operand.collect_symbols(found),
            Self::And(operands) | Self::Or(operands) => {
                for operand in operands {
                    operand.collect_symbols(found);
                }
            }
            Self::Implication(left, right) | Self::Biconditional(left, right) => {
                left.collect_symbols(found);
                right.collect_symbols(found);
            }
        }
    }

    /// The top-level conjuncts of the sentence. A non-conjunction is its own single conjunct.
    #[must_use]
    pub fn conjuncts(&self) -> &[Self] {
        match self {
            Self::And(operands) => operands,
            other => std::slice::from_ref(other),
        }
    }

    /// Appends a conjunct, turning the sentence into a conjunction if it was not one.
    pub fn add(&mut self, conjunct: impl Into<Self>) {
        if let Self::And(operands) = self {
            operands.push(conjunct.into());
        } else {
            let previous = std::mem::replace(self, Self::And(Vec::new()));
            *self = Self::And(vec![previous, conjunct.into()]);
        }
    }

    const fn is_compound(&self) -> bool {
        !matches!(self, Self::Symbol(_) | Self::Not(_))
    }

    fn parenthesized(&self) -> String {
        if self.is_compound() {
            format!("({self})")
        } else {
            self.to_string()
        }
    }
}

impl From<Symbol> for Sentence {
    fn from(symbol: Symbol) -> Self {
        Self::Symbol(symbol)
    }
}

impl From<&Symbol> for Sentence {
    fn from(symbol: &Symbol) -> Self {
        Self::Symbol(symbol.clone())
    }
}

impl From<&Self> for Sentence {
    fn from(sentence: &Self) -> Self {
        sentence.clone()
    }
}

impl Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Symbol(s) => write!(f, "{s}"),
            Self::Not(operand) => write!(f, "¬{}", operand.parenthesized()),
            Self::And(operands) if operands.len() == 1 => write!(f, "{}", operands[0]),
            Self::Or(operands) if operands.len() == 1 => write!(f, "{}", operands[0]),
            Self::And(operands) => {
                write!(f, "{}", operands.iter().map(Self::parenthesized).join(" ∧ "))
            }
            Self::Or(operands) => {
                write!(f, "{}", operands.iter().map(Self::parenthesized).join(" ∨ "))
            }
            Self::Implication(left, right) => {
                write!(f, "{} => {}", left.parenthesized(), right.parenthesized())
            }
            Self::Biconditional(left, right) => {
                write!(f, "{} <=> {}", left.parenthesized(), right.parenthesized())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbols_with_same_name_are_equal() {
        assert_eq!(Symbol::new("rain"), Symbol::from("rain"));
        assert_ne!(Symbol::new("rain"), Symbol::new("hagrid"));
    }

    #[test]
    fn test_symbols_collects_nested_atoms_once() {
        let s = Sentence::and([
            Sentence::implies(Sentence::atom("a"), Sentence::atom("b")),
            Sentence::not(Sentence::or([Sentence::atom("b"), Sentence::atom("c")])),
            Sentence::iff(Sentence::atom("a"), Sentence::atom("c")),
        ]);
        let names: Vec<_> = s.symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_conjuncts_of_non_conjunction() {
        let s = Sentence::atom("a");
        assert_eq!(s.conjuncts(), &[Sentence::atom("a")]);
        assert!(Sentence::and(Vec::<Sentence>::new()).conjuncts().is_empty());
    }

    #[test]
    fn test_add_promotes_to_conjunction() {
        let mut s = Sentence::atom("a");
        s.add(Sentence::atom("b"));
        s.add(Sentence::atom("c"));
        assert_eq!(s.conjuncts().len(), 3);
    }

    #[test]
    fn test_formula_rendering() {
        let a = Sentence::atom("A");
        let b = Sentence::atom("B");
        assert_eq!(Sentence::not(&a).to_string(), "¬A");
        assert_eq!(Sentence::and([&a, &b]).to_string(), "A ∧ B");
        assert_eq!(
            Sentence::implies(Sentence::or([&a, &b]), Sentence::not(&b)).to_string(),
            "(A ∨ B) => ¬B"
        );
        assert_eq!(
            Sentence::iff(&a, Sentence::and([&a, &b])).to_string(),
            "A <=> (A ∧ B)"
        );
        assert_eq!(Sentence::not(Sentence::and([&a, &b])).to_string(), "¬(A ∧ B)");
    }
}
