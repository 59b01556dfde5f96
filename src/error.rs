//! Error types shared by the loaders and the inference engines.

use std::path::PathBuf;

/// Errors raised while reading pedigree CSV files or crawling an HTML corpus.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A file or directory could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying I/O failure.
        source: std::io::Error,
    },

    /// The CSV reader rejected the input.
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A trait column held something other than `0`, `1` or nothing.
    #[error("person {name} has invalid trait value {value:?} (expected \"0\", \"1\" or empty)")]
    InvalidTrait {
        /// Person whose row is malformed.
        name: String,
        /// The offending cell.
        value: String,
    },

    /// The corpus path is not a directory.
    #[error("not a directory: {0}")]
    NotADirectory(PathBuf),

    /// Directory traversal failed part way through.
    #[error("failed to walk corpus directory: {0}")]
    Walk(#[from] walkdir::Error),

    /// A loaded family violated one of its structural invariants.
    #[error(transparent)]
    Family(#[from] FamilyError),
}

/// Violations of the pedigree invariants, and failures of heredity inference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FamilyError {
    /// Two people share a name.
    #[error("person {0} is listed more than once")]
    DuplicatePerson(String),

    /// Exactly one of mother and father was recorded.
    #[error("person {name} has only one recorded parent; both or neither are required")]
    HalfParents {
        /// The person with a single parent.
        name: String,
    },

    /// A parent name does not refer to anyone in the family.
    #[error("person {name} refers to unknown parent {parent}")]
    UnknownParent {
        /// The child.
        name: String,
        /// The missing parent.
        parent: String,
    },

    /// Someone was listed as their own parent.
    #[error("person {name} is listed as their own parent")]
    SelfParent {
        /// The person.
        name: String,
    },

    /// Exhaustive enumeration over this many people is not tractable.
    #[error("family of {people} people exceeds the enumeration limit of {max}")]
    TooLarge {
        /// Family size.
        people: usize,
        /// Largest supported size.
        max: usize,
    },

    /// No assignment is consistent with the observed traits, so nothing can be normalized.
    #[error("observed traits have zero probability under the heredity model")]
    ImpossibleEvidence,
}

/// Errors raised when evaluating a sentence against a partial model.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LogicError {
    /// The sentence mentions a symbol the model does not bind.
    #[error("symbol {0} is not bound in the model")]
    UnboundSymbol(String),
}

/// Errors raised by the PageRank estimators.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PageRankError {
    /// There are no pages to rank.
    #[error("corpus contains no pages")]
    EmptyCorpus,

    /// The sampler was asked for zero samples.
    #[error("at least one sample is required")]
    NoSamples,

    /// The damping factor is outside `[0, 1]`.
    #[error("damping factor {0} is outside [0, 1]")]
    InvalidDamping(f64),

    /// A page name is not part of the corpus.
    #[error("page {0} is not in the corpus")]
    UnknownPage(String),
}

/// Illegal operations on a tic-tac-toe board.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    /// A move was attempted on a finished game.
    #[error("game over: the board is terminal")]
    GameOver,

    /// The cell is occupied or outside the board.
    #[error("invalid action ({row}, {col})")]
    InvalidAction {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// A board description could not be parsed.
    #[error("invalid board description: {0}")]
    InvalidBoard(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_error_display() {
        let err = FamilyError::UnknownParent {
            name: "Harry".to_string(),
            parent: "Lily".to_string(),
        };
        assert_eq!(err.to_string(), "person Harry refers to unknown parent Lily");
    }

    #[test]
    fn test_game_error_display() {
        let err = GameError::InvalidAction { row: 3, col: 1 };
        assert_eq!(err.to_string(), "invalid action (3, 1)");
    }

    #[test]
    fn test_load_error_wraps_family_error() {
        let err = LoadError::from(FamilyError::HalfParents {
            name: "Ron".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "person Ron has only one recorded parent; both or neither are required"
        );
    }

    #[test]
    fn test_pagerank_error_display() {
        assert_eq!(
            PageRankError::InvalidDamping(1.5).to_string(),
            "damping factor 1.5 is outside [0, 1]"
        );
    }
}
