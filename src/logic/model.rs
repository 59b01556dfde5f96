#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Truth assignments.
//!
//! [`Model`] is the public, name-keyed view of an assignment. During enumeration the
//! engine works on a [`SymbolTable`] that numbers every atom and a [`BitVec`] holding
//! one truth value per number; sentences are compiled against the table once so that
//! each of the `2^n` evaluations is a plain index lookup.

use std::collections::BTreeMap;
use std::ops::Index;

use bit_vec::BitVec;
use rustc_hash::FxHashMap;

use crate::logic::sentence::{Sentence, Symbol};

/// A mapping from symbols to truth values.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Model(BTreeMap<Symbol, bool>);

impl Model {
    /// An empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `symbol` to `value`, replacing any earlier binding.
    pub fn set(&mut self, symbol: impl Into<Symbol>, value: bool) {
        self.0.insert(symbol.into(), value);
    }

    /// The value bound to `symbol`.
    #[must_use]
    pub fn get(&self, symbol: &Symbol) -> Option<bool> {
        self.0.get(symbol).copied()
    }

    /// Number of bound symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no symbol is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Symbols bound to `true`, in name order.
    pub fn true_symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.0.iter().filter(|(_, v)| **v).map(|(s, _)| s)
    }

    /// Bindings in symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, bool)> {
        self.0.iter().map(|(s, v)| (s, *v))
    }
}

impl<S: Into<Symbol>> FromIterator<(S, bool)> for Model {
    fn from_iter<T: IntoIterator<Item = (S, bool)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(s, v)| (s.into(), v)).collect())
    }
}

/// Dense numbering of the atoms taking part in one enumeration.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    index: FxHashMap<Symbol, usize>,
}

impl SymbolTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table over the union of the atoms of `sentences`, numbered in name order.
    pub fn from_sentences<'a>(sentences: impl IntoIterator<Item = &'a Sentence>) -> Self {
        let mut table = Self::new();
        let all: std::collections::BTreeSet<Symbol> =
            sentences.into_iter().flat_map(Sentence::symbols).collect();
        for symbol in &all {
            table.intern(symbol);
        }
        table
    }

    /// Returns the number of `symbol`, allocating a new one if it is not yet known.
    pub fn intern(&mut self, symbol: &Symbol) -> usize {
        if let Some(&i) = self.index.get(symbol) {
            return i;
        }
        let i = self.symbols.len();
        self.symbols.push(symbol.clone());
        self.index.insert(symbol.clone(), i);
        i
    }

    /// Number of `symbol`, if it has one.
    #[must_use]
    pub fn index_of(&self, symbol: &Symbol) -> Option<usize> {
        self.index.get(symbol).copied()
    }

    /// Number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Symbols in number order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    /// Rewrites `sentence` so that atoms refer to table numbers. Unknown atoms are interned.
    pub fn compile(&mut self, sentence: &Sentence) -> Compiled {
        match sentence {
            Sentence::Symbol(s) => Compiled::Atom(self.intern(s)),
            Sentence::Not(operand) => Compiled::Not(Box::new(self.compile(operand))),
            Sentence::And(operands) => {
                Compiled::And(operands.iter().map(|o| self.compile(o)).collect())
            }
            Sentence::Or(operands) => {
                Compiled::Or(operands.iter().map(|o| self.compile(o)).collect())
            }
            Sentence::Implication(left, right) => {
                Compiled::Implication(Box::new(self.compile(left)), Box::new(self.compile(right)))
            }
            Sentence::Biconditional(left, right) => Compiled::Biconditional(
                Box::new(self.compile(left)),
                Box::new(self.compile(right)),
            ),
        }
    }

    /// Converts a dense assignment back into a name-keyed model.
    #[must_use]
    pub fn to_model(&self, values: &BitVec) -> Model {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (s.clone(), values.get(i).unwrap_or(false)))
            .collect()
    }
}

impl Index<usize> for SymbolTable {
    type Output = Symbol;

    fn index(&self, index: usize) -> &Self::Output {
        &self.symbols[index]
    }
}

/// A sentence whose atoms have been resolved to [`SymbolTable`] numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Compiled {
    /// The atom with this table number.
    Atom(usize),
    /// Negation.
    Not(Box<Compiled>),
    /// Conjunction.
    And(Vec<Compiled>),
    /// Disjunction.
    Or(Vec<Compiled>),
    /// Material implication.
    Implication(Box<Compiled>, Box<Compiled>),
    /// Equivalence.
    Biconditional(Box<Compiled>, Box<Compiled>),
}

impl Compiled {
    /// Evaluates against a dense assignment. Atoms beyond the end of `values` read as `false`.
    #[must_use]
    pub fn eval(&self, values: &BitVec) -> bool {
        match self {
            Self::Atom(i) => values.get(*i).unwrap_or(false),
            Self::Not(operand) => !operand.eval(values),
            Self::And(operands) => operands.iter().all(|o| o.eval(values)),
            Self::Or(operands) => operands.iter().any(|o| o.eval(values)),
            Self::Implication(left, right) => !left.eval(values) || right.eval(values),
            Self::Biconditional(left, right) => left.eval(values) == right.eval(values),
        }
    }
}

/// Every assignment of `n` booleans, counting upwards from all-false in binary
/// (bit 0 is the least significant).
#[derive(Debug, Clone)]
pub struct Assignments {
    current: BitVec,
    exhausted: bool,
}

impl Assignments {
    /// Enumerates the `2^n` assignments of `n` symbols.
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            current: BitVec::from_elem(n, false),
            exhausted: false,
        }
    }
}

impl Iterator for Assignments {
    type Item = BitVec;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let item = self.current.clone();

        // binary increment; carrying out of the top bit means we have wrapped around
        self.exhausted = true;
        for i in 0..self.current.len() {
            if self.current[i] {
                self.current.set(i, false);
            } else {
                self.current.set(i, true);
                self.exhausted = false;
                break;
            }
        }
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_is_stable() {
        let mut table = SymbolTable::new();
        let a = table.intern(&Symbol::new("a"));
        let b = table.intern(&Symbol::new("b"));
        assert_eq!(table.intern(&Symbol::new("a")), a);
        assert_ne!(a, b);
        assert_eq!(table.len(), 2);
        assert_eq!(table[b], Symbol::new("b"));
    }

    #[test]
    fn test_table_from_sentences_is_name_ordered() {
        let k = Sentence::and([Sentence::atom("z"), Sentence::atom("m")]);
        let q = Sentence::atom("a");
        let table = SymbolTable::from_sentences([&k, &q]);
        let names: Vec<_> = table.symbols().map(Symbol::name).collect();
        assert_eq!(names, vec!["a", "m", "z"]);
    }

    #[test]
    fn test_assignments_cover_every_combination() {
        let all: Vec<BitVec> = Assignments::new(3).collect();
        assert_eq!(all.len(), 8);
        let distinct: std::collections::HashSet<Vec<bool>> =
            all.iter().map(|b| b.iter().collect()).collect();
        assert_eq!(distinct.len(), 8);
    }

    #[test]
    fn test_zero_symbols_yield_one_empty_assignment() {
        let all: Vec<BitVec> = Assignments::new(0).collect();
        assert_eq!(all.len(), 1);
        assert!(all[0].is_empty());
    }

    #[test]
    fn test_to_model_round_trips_names() {
        let mut table = SymbolTable::new();
        table.intern(&Symbol::new("p"));
        table.intern(&Symbol::new("q"));
        let mut values = BitVec::from_elem(2, false);
        values.set(1, true);
        let model = table.to_model(&values);
        assert_eq!(model.get(&Symbol::new("p")), Some(false));
        assert_eq!(model.get(&Symbol::new("q")), Some(true));
        assert_eq!(model.true_symbols().count(), 1);
    }
}
