#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! A loader for pedigree CSV files.
//!
//! The file has the header `name,mother,father,trait` and one row per person:
//! - `mother` and `father` are both empty, or both name other rows in the file.
//! - `trait` is `1` (has the trait), `0` (does not) or empty (unknown).
//!
//! Rows are read into [`Person`] values in file order and then validated as a [`Family`].

use std::io::Read;
use std::path::Path;

use log::info;
use serde::Deserialize;

use crate::error::LoadError;
use crate::heredity::family::{Family, Person};

#[derive(Debug, Deserialize)]
struct Row {
    name: String,
    #[serde(default)]
    mother: String,
    #[serde(default)]
    father: String,
    #[serde(rename = "trait", default)]
    observed: String,
}

fn non_empty(field: String) -> Option<String> {
    if field.is_empty() { None } else { Some(field) }
}

impl TryFrom<Row> for Person {
    type Error = LoadError;

    fn try_from(row: Row) -> Result<Self, Self::Error> {
        let observed_trait = match row.observed.as_str() {
            "1" => Some(true),
            "0" => Some(false),
            "" => None,
            other => {
                return Err(LoadError::InvalidTrait {
                    name: row.name,
                    value: other.to_string(),
                });
            }
        };
        Ok(Self {
            name: row.name,
            mother: non_empty(row.mother),
            father: non_empty(row.father),
            observed_trait,
        })
    }
}

/// Reads a family from CSV data.
///
/// # Errors
///
/// - [`LoadError::Csv`] if the data is not valid CSV or lacks the `name` column.
/// - [`LoadError::InvalidTrait`] if a trait cell is not `0`, `1` or empty.
/// - [`LoadError::Family`] if the rows do not form a valid family.
pub fn read_family<R: Read>(reader: R) -> Result<Family, LoadError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let people = csv_reader
        .deserialize::<Row>()
        .map(|row| Person::try_from(row?))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Family::new(people)?)
}

/// Reads a family from the CSV file at `path`.
///
/// # Errors
///
/// [`LoadError::Io`] if the file cannot be opened, otherwise as [`read_family`].
pub fn load_family(path: &Path) -> Result<Family, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let family = read_family(std::io::BufReader::new(file))?;
    info!("loaded {} people from {}", family.len(), path.display());
    Ok(family)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FamilyError;
    use std::io::{Cursor, Write};

    const FAMILY0: &str = "name,mother,father,trait\n\
                           Harry,Lily,James,\n\
                           James,,,1\n\
                           Lily,,,0\n";

    #[test]
    fn test_read_simple_family() {
        let family = read_family(Cursor::new(FAMILY0)).unwrap();
        assert_eq!(family.len(), 3);
        let names: Vec<_> = family.people().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Harry", "James", "Lily"]);

        let harry = family.get("Harry").unwrap();
        assert_eq!(harry.mother.as_deref(), Some("Lily"));
        assert_eq!(harry.father.as_deref(), Some("James"));
        assert_eq!(harry.observed_trait, None);
        assert_eq!(family.get("James").unwrap().observed_trait, Some(true));
        assert_eq!(family.get("Lily").unwrap().observed_trait, Some(false));
    }

    #[test]
    fn test_invalid_trait_value() {
        let data = "name,mother,father,trait\nHarry,,,maybe\n";
        let err = read_family(Cursor::new(data)).unwrap_err();
        assert!(matches!(err, LoadError::InvalidTrait { ref value, .. } if value == "maybe"));
    }

    #[test]
    fn test_unknown_parent_is_an_invariant_violation() {
        let data = "name,mother,father,trait\nHarry,Lily,James,\n";
        let err = read_family(Cursor::new(data)).unwrap_err();
        assert!(matches!(
            err,
            LoadError::Family(FamilyError::UnknownParent { .. })
        ));
    }

    #[test]
    fn test_missing_name_column() {
        let data = "mother,father,trait\nLily,James,\n";
        assert!(matches!(
            read_family(Cursor::new(data)),
            Err(LoadError::Csv(_))
        ));
    }

    #[test]
    fn test_load_family_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FAMILY0.as_bytes()).unwrap();
        let family = load_family(file.path()).unwrap();
        assert_eq!(family.len(), 3);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_family(&dir.path().join("absent.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
