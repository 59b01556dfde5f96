#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Knights and Knaves puzzles.
//!
//! Every character is either a knight, who only tells the truth, or a knave, who only
//! lies. A statement `s` made by character `c` therefore contributes `c is a knight <=> s`
//! to the knowledge base. Solving a puzzle means asking, for each candidate symbol,
//! whether the knowledge base entails it.

use crate::logic::{Entailment, Sentence, Symbol, check};

/// The pair of atoms describing one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Character {
    /// "X is a Knight".
    pub knight: Symbol,
    /// "X is a Knave".
    pub knave: Symbol,
}

impl Character {
    /// The two atoms for the character called `name`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            knight: Symbol::new(format!("{name} is a Knight")),
            knave: Symbol::new(format!("{name} is a Knave")),
        }
    }

    /// The character is a knight.
    #[must_use]
    pub fn is_knight(&self) -> Sentence {
        Sentence::from(&self.knight)
    }

    /// The character is a knave.
    #[must_use]
    pub fn is_knave(&self) -> Sentence {
        Sentence::from(&self.knave)
    }

    /// Exactly one of knight and knave.
    #[must_use]
    pub fn structure(&self) -> [Sentence; 2] {
        [
            Sentence::or([self.is_knight(), self.is_knave()]),
            Sentence::implies(self.is_knight(), Sentence::not(self.is_knave())),
        ]
    }

    /// What we learn from this character asserting `statement`.
    #[must_use]
    pub fn says(&self, statement: Sentence) -> Sentence {
        Sentence::iff(self.is_knight(), statement)
    }
}

/// A puzzle with its compiled-in knowledge base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Puzzle {
    /// Heading printed before the solution.
    pub name: &'static str,
    /// What the characters say, in words.
    pub statements: &'static [&'static str],
    /// Conjunction of the game rules and the encoded statements.
    pub knowledge: Sentence,
}

/// What a puzzle's knowledge base tells us about a list of candidate symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Solution {
    /// The knowledge base has no conjuncts yet.
    NotImplemented,
    /// The knowledge base is unsatisfiable; it would entail every candidate.
    Contradictory,
    /// The candidates that are entailed, in the order given.
    Entailed(Vec<Symbol>),
}

impl Puzzle {
    /// Checks each of `candidates` against the knowledge base.
    #[must_use]
    pub fn solve(&self, candidates: &[Symbol]) -> Solution {
        if self.knowledge.conjuncts().is_empty() {
            return Solution::NotImplemented;
        }

        let mut entailed = Vec::new();
        for candidate in candidates {
            match check(&self.knowledge, &Sentence::from(candidate)) {
                Entailment::Vacuous => return Solution::Contradictory,
                Entailment::Holds => entailed.push(candidate.clone()),
                Entailment::Fails => {}
            }
        }
        Solution::Entailed(entailed)
    }
}

/// The three characters appearing in the puzzles.
#[must_use]
pub fn characters() -> [Character; 3] {
    [Character::new("A"), Character::new("B"), Character::new("C")]
}

/// All six atoms, in the order results are reported.
#[must_use]
pub fn symbols() -> Vec<Symbol> {
    characters()
        .into_iter()
        .flat_map(|c| [c.knight, c.knave])
        .collect()
}

/// The four puzzles.
#[must_use]
pub fn puzzles() -> Vec<Puzzle> {
    let [a, b, c] = characters();

    let mut knowledge0 = Sentence::and(a.structure());
    knowledge0.add(Sentence::implies(a.is_knave(), Sentence::not(a.is_knight())));
    knowledge0.add(a.says(Sentence::and([a.is_knight(), a.is_knave()])));

    let mut knowledge1 = Sentence::and(a.structure().into_iter().chain(b.structure()));
    knowledge1.add(a.says(Sentence::and([a.is_knave(), b.is_knave()])));

    let mut knowledge2 = Sentence::and(a.structure().into_iter().chain(b.structure()));
    knowledge2.add(a.says(Sentence::or([
        Sentence::and([a.is_knight(), b.is_knight()]),
        Sentence::and([a.is_knave(), b.is_knave()]),
    ])));
    knowledge2.add(b.says(Sentence::or([
        Sentence::and([a.is_knight(), b.is_knave()]),
        Sentence::and([a.is_knave(), b.is_knight()]),
    ])));

    let mut knowledge3 = Sentence::and(
        a.structure()
            .into_iter()
            .chain(b.structure())
            .chain(c.structure()),
    );
    // A said one of the two sentences; either way A's words are consistent with A's kind.
    knowledge3.add(Sentence::iff(
        Sentence::or([a.is_knight(), a.is_knave()]),
        Sentence::or([a.is_knight(), a.is_knave()]),
    ));
    // "A said 'I am a knave'" is true iff A being a knight and A being a knave coincide.
    knowledge3.add(b.says(Sentence::iff(a.is_knight(), a.is_knave())));
    knowledge3.add(b.says(c.is_knave()));
    knowledge3.add(c.says(a.is_knight()));

    vec![
        Puzzle {
            name: "Puzzle 0",
            statements: &["A says \"I am both a knight and a knave.\""],
            knowledge: knowledge0,
        },
        Puzzle {
            name: "Puzzle 1",
            statements: &["A says \"We are both knaves.\"", "B says nothing."],
            knowledge: knowledge1,
        },
        Puzzle {
            name: "Puzzle 2",
            statements: &[
                "A says \"We are the same kind.\"",
                "B says \"We are of different kinds.\"",
            ],
            knowledge: knowledge2,
        },
        Puzzle {
            name: "Puzzle 3",
            statements: &[
                "A says either \"I am a knight.\" or \"I am a knave.\", but you don't know which.",
                "B says \"A said 'I am a knave'.\"",
                "B says \"C is a knave.\"",
                "C says \"A is a knight.\"",
            ],
            knowledge: knowledge3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entailed(index: usize) -> Vec<String> {
        match puzzles()[index].solve(&symbols()) {
            Solution::Entailed(found) => found.iter().map(|s| s.name().to_string()).collect(),
            other => panic!("unexpected solution {other:?}"),
        }
    }

    #[test]
    fn test_puzzle_zero() {
        assert_eq!(entailed(0), vec!["A is a Knave"]);
    }

    #[test]
    fn test_puzzle_one() {
        assert_eq!(entailed(1), vec!["A is a Knave", "B is a Knight"]);
    }

    #[test]
    fn test_puzzle_two() {
        assert_eq!(entailed(2), vec!["A is a Knave", "B is a Knight"]);
    }

    #[test]
    fn test_puzzle_three() {
        assert_eq!(
            entailed(3),
            vec!["A is a Knight", "B is a Knave", "C is a Knight"]
        );
    }

    #[test]
    fn test_empty_knowledge_is_not_implemented() {
        let puzzle = Puzzle {
            name: "Puzzle X",
            statements: &[],
            knowledge: Sentence::and(Vec::<Sentence>::new()),
        };
        assert_eq!(puzzle.solve(&symbols()), Solution::NotImplemented);
    }

    #[test]
    fn test_contradictory_knowledge_is_reported() {
        let a = Character::new("A");
        let puzzle = Puzzle {
            name: "Liar",
            statements: &["A says \"I am a knave.\""],
            knowledge: Sentence::and(
                a.structure()
                    .into_iter()
                    .chain([a.says(a.is_knave())]),
            ),
        };
        assert_eq!(puzzle.solve(&symbols()), Solution::Contradictory);
    }

    #[test]
    fn test_symbols_order() {
        let names: Vec<_> = symbols().iter().map(|s| s.name().to_string()).collect();
        assert_eq!(names[0], "A is a Knight");
        assert_eq!(names[5], "C is a Knave");
    }
}
