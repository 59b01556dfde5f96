#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! People, their gene counts, and validated families.

use std::fmt::Display;

use rustc_hash::FxHashMap;

use crate::error::FamilyError;

/// Number of copies of the harmful gene a person carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Genes {
    /// No copies.
    Zero = 0,
    /// One copy.
    One = 1,
    /// Two copies.
    Two = 2,
}

impl Genes {
    /// Every gene count, in increasing order.
    pub const ALL: [Self; 3] = [Self::Zero, Self::One, Self::Two];

    /// The number of copies as an integer.
    #[must_use]
    pub const fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<usize> for Genes {
    type Error = ();

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Zero),
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            _ => Err(()),
        }
    }
}

impl Display for Genes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.count())
    }
}

/// One row of a pedigree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
    /// Unique name within the family.
    pub name: String,
    /// Mother's name, if recorded.
    pub mother: Option<String>,
    /// Father's name, if recorded.
    pub father: Option<String>,
    /// Whether the person is known to exhibit the trait; `None` if unobserved.
    pub observed_trait: Option<bool>,
}

impl Person {
    /// A person without recorded parents.
    #[must_use]
    pub fn founder(name: impl Into<String>, observed_trait: Option<bool>) -> Self {
        Self {
            name: name.into(),
            mother: None,
            father: None,
            observed_trait,
        }
    }

    /// A person whose mother and father are both recorded.
    #[must_use]
    pub fn child(
        name: impl Into<String>,
        mother: impl Into<String>,
        father: impl Into<String>,
        observed_trait: Option<bool>,
    ) -> Self {
        Self {
            name: name.into(),
            mother: Some(mother.into()),
            father: Some(father.into()),
            observed_trait,
        }
    }
}

/// Indices of a person's mother and father within the family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Parents {
    /// Index of the mother.
    pub mother: usize,
    /// Index of the father.
    pub father: usize,
}

/// A pedigree whose parent references have been checked.
///
/// People keep the order they were supplied in; every index-based accessor refers to
/// that order.
#[derive(Debug, Clone)]
pub struct Family {
    people: Vec<Person>,
    index: FxHashMap<String, usize>,
    parents: Vec<Option<Parents>>,
}

impl Family {
    /// Validates `people` and builds the family.
    ///
    /// # Errors
    ///
    /// - [`FamilyError::DuplicatePerson`] if a name appears twice.
    /// - [`FamilyError::HalfParents`] if exactly one parent is recorded.
    /// - [`FamilyError::UnknownParent`] if a parent is not in `people`.
    /// - [`FamilyError::SelfParent`] if someone is their own parent.
    pub fn new(people: Vec<Person>) -> Result<Self, FamilyError> {
        let mut index = FxHashMap::default();
        for (i, person) in people.iter().enumerate() {
            if index.insert(person.name.clone(), i).is_some() {
                return Err(FamilyError::DuplicatePerson(person.name.clone()));
            }
        }

        let lookup = |name: &str, parent: &str| -> Result<usize, FamilyError> {
            if name == parent {
                return Err(FamilyError::SelfParent {
                    name: name.to_string(),
                });
            }
            index
                .get(parent)
                .copied()
                .ok_or_else(|| FamilyError::UnknownParent {
                    name: name.to_string(),
                    parent: parent.to_string(),
                })
        };

        let parents = people
            .iter()
            .map(|p| match (&p.mother, &p.father) {
                (None, None) => Ok(None),
                (Some(mother), Some(father)) => Ok(Some(Parents {
                    mother: lookup(&p.name, mother)?,
                    father: lookup(&p.name, father)?,
                })),
                _ => Err(FamilyError::HalfParents {
                    name: p.name.clone(),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            people,
            index,
            parents,
        })
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.people.len()
    }

    /// Whether the family has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }

    /// Members in the order they were given.
    #[must_use]
    pub fn people(&self) -> &[Person] {
        &self.people
    }

    /// Position of the person called `name`.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// The person called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Person> {
        self.index_of(name).map(|i| &self.people[i])
    }

    /// Parents of the person at `person`, or `None` for a founder.
    #[must_use]
    pub fn parents(&self, person: usize) -> Option<Parents> {
        self.parents[person]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn potters() -> Vec<Person> {
        vec![
            Person::child("Harry", "Lily", "James", None),
            Person::founder("James", Some(true)),
            Person::founder("Lily", Some(false)),
        ]
    }

    #[test]
    fn test_family_resolves_parents() {
        let family = Family::new(potters()).unwrap();
        assert_eq!(family.len(), 3);
        let harry = family.index_of("Harry").unwrap();
        assert_eq!(
            family.parents(harry),
            Some(Parents {
                mother: family.index_of("Lily").unwrap(),
                father: family.index_of("James").unwrap(),
            })
        );
        assert_eq!(family.parents(family.index_of("James").unwrap()), None);
        assert_eq!(family.get("Lily").unwrap().observed_trait, Some(false));
    }

    #[test]
    fn test_unknown_parent_is_rejected() {
        let people = vec![Person::child("Harry", "Lily", "James", None)];
        assert_eq!(
            Family::new(people).unwrap_err(),
            FamilyError::UnknownParent {
                name: "Harry".to_string(),
                parent: "Lily".to_string(),
            }
        );
    }

    #[test]
    fn test_half_parents_are_rejected() {
        let mut people = potters();
        people[0].father = None;
        assert_eq!(
            Family::new(people).unwrap_err(),
            FamilyError::HalfParents {
                name: "Harry".to_string()
            }
        );
    }

    #[test]
    fn test_duplicates_and_self_parents_are_rejected() {
        let mut people = potters();
        people.push(Person::founder("Lily", None));
        assert_eq!(
            Family::new(people).unwrap_err(),
            FamilyError::DuplicatePerson("Lily".to_string())
        );

        let people = vec![
            Person::child("Ouroboros", "Ouroboros", "Eve", None),
            Person::founder("Eve", None),
        ];
        assert!(matches!(
            Family::new(people),
            Err(FamilyError::SelfParent { .. })
        ));
    }

    #[test]
    fn test_genes_conversions() {
        assert_eq!(Genes::try_from(2), Ok(Genes::Two));
        assert!(Genes::try_from(3).is_err());
        assert_eq!(Genes::One.to_string(), "1");
    }
}
