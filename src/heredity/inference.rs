#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Exact Bayesian inference over a pedigree.
//!
//! Each person has a hidden gene count in `{0, 1, 2}` and a trait that is either present
//! or absent. Founders draw their gene count from a fixed prior; children inherit one
//! allele from each parent, with every transmitted allele flipping state with the
//! mutation probability. The trait depends only on the person's own gene count.
//!
//! [`infer`] enumerates every gene assignment and weighs it by its joint probability with
//! the observed traits. Unobserved traits are summed out rather than enumerated: they do
//! not change anyone's gene posterior, and the trait posterior of an unobserved person is
//! the weighted sum of `P(trait | genes)`. The result is the exact posterior of every
//! person's gene count and trait given the evidence, at a cost of `3^n` evaluations.

use bit_vec::BitVec;
use itertools::Itertools;
use log::{debug, info};

use crate::error::FamilyError;
use crate::heredity::family::{Family, Genes};

/// Largest family [`infer`] will enumerate (`3^n` gene assignments).
pub const MAX_PEOPLE: usize = 16;

/// Probability tables of the heredity model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeredityModel {
    /// Unconditional probability of each gene count, for people without recorded parents.
    pub gene_prior: [f64; 3],
    /// Probability of exhibiting the trait given each gene count.
    pub trait_given_genes: [f64; 3],
    /// Probability that a transmitted allele flips state.
    pub mutation: f64,
}

impl Default for HeredityModel {
    fn default() -> Self {
        Self {
            gene_prior: [0.96, 0.03, 0.01],
            trait_given_genes: [0.01, 0.56, 0.65],
            mutation: 0.01,
        }
    }
}

impl HeredityModel {
    /// Prior probability of `genes` for someone without recorded parents.
    #[must_use]
    pub const fn gene_prior(&self, genes: Genes) -> f64 {
        self.gene_prior[genes.count()]
    }

    /// Probability of the trait being present (or absent) given `genes`.
    #[must_use]
    pub fn trait_probability(&self, genes: Genes, has_trait: bool) -> f64 {
        let p = self.trait_given_genes[genes.count()];
        if has_trait { p } else { 1.0 - p }
    }

    /// Probability that a parent with `genes` copies passes on the harmful allele.
    #[must_use]
    pub fn transmission(&self, genes: Genes) -> f64 {
        match genes {
            Genes::Zero => self.mutation,
            // half the time the harmful allele is picked and survives, half the time the
            // harmless one is picked and mutates: 0.5(1 - m) + 0.5m
            Genes::One => 0.5,
            Genes::Two => 1.0 - self.mutation,
        }
    }

    /// Probability that a child of parents with `mother` and `father` copies has `child` copies.
    #[must_use]
    pub fn inherited(&self, mother: Genes, father: Genes, child: Genes) -> f64 {
        let a = self.transmission(mother);
        let b = self.transmission(father);
        match child {
            Genes::Two => a * b,
            Genes::One => a * (1.0 - b) + (1.0 - a) * b,
            Genes::Zero => (1.0 - a) * (1.0 - b),
        }
    }
}

/// A complete assignment of gene counts and traits to every member of a family,
/// indexed in family order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    genes: Vec<Genes>,
    have_trait: BitVec,
}

impl Assignment {
    /// # Panics
    ///
    /// If `genes` and `have_trait` differ in length.
    #[must_use]
    pub fn new(genes: Vec<Genes>, have_trait: BitVec) -> Self {
        assert_eq!(genes.len(), have_trait.len(), "assignment length mismatch");
        Self { genes, have_trait }
    }

    /// Builds an assignment from name sets: people in `two_genes` carry two copies,
    /// people in `one_gene` (and not `two_genes`) one copy, everyone else none.
    /// Names that are not family members are ignored.
    #[must_use]
    pub fn from_sets(
        family: &Family,
        one_gene: &[&str],
        two_genes: &[&str],
        have_trait: &[&str],
    ) -> Self {
        let genes = family
            .people()
            .iter()
            .map(|p| {
                if two_genes.contains(&p.name.as_str()) {
                    Genes::Two
                } else if one_gene.contains(&p.name.as_str()) {
                    Genes::One
                } else {
                    Genes::Zero
                }
            })
            .collect();
        let mut traits = BitVec::from_elem(family.len(), false);
        for (i, p) in family.people().iter().enumerate() {
            traits.set(i, have_trait.contains(&p.name.as_str()));
        }
        Self::new(genes, traits)
    }

    /// Gene count assigned to `person`.
    #[must_use]
    pub fn genes(&self, person: usize) -> Genes {
        self.genes[person]
    }

    /// Whether `person` is assigned the trait.
    #[must_use]
    pub fn has_trait(&self, person: usize) -> bool {
        self.have_trait.get(person).unwrap_or(false)
    }
}

fn gene_factor(family: &Family, model: &HeredityModel, genes: &[Genes], person: usize) -> f64 {
    family.parents(person).map_or_else(
        || model.gene_prior(genes[person]),
        |parents| model.inherited(genes[parents.mother], genes[parents.father], genes[person]),
    )
}

/// Product over every person of the probability of their gene count and, where `traits`
/// gives one, of their trait given that count. A person without a trait contributes no
/// trait factor, which sums the trait out.
fn joint(
    family: &Family,
    model: &HeredityModel,
    genes: &[Genes],
    traits: impl Fn(usize) -> Option<bool>,
) -> f64 {
    (0..family.len())
        .map(|i| {
            let trait_factor = traits(i).map_or(1.0, |t| model.trait_probability(genes[i], t));
            gene_factor(family, model, genes, i) * trait_factor
        })
        .product()
}

/// Joint probability of `assignment`: the product over every person of the probability
/// of their gene count (given their parents' counts) and of their trait given that count.
#[must_use]
pub fn joint_probability(family: &Family, model: &HeredityModel, assignment: &Assignment) -> f64 {
    joint(family, model, &assignment.genes, |i| {
        Some(assignment.has_trait(i))
    })
}

/// Posterior distributions for one person.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    /// Name of the person.
    pub name: String,
    /// Indexed by gene count.
    pub gene: [f64; 3],
    /// Indexed by `usize::from(has_trait)`.
    pub phenotype: [f64; 2],
}

impl Posterior {
    fn empty(name: &str) -> Self {
        Self {
            name: name.to_string(),
            gene: [0.0; 3],
            phenotype: [0.0; 2],
        }
    }

    /// Posterior probability that the person carries `genes` copies.
    #[must_use]
    pub const fn gene(&self, genes: Genes) -> f64 {
        self.gene[genes.count()]
    }

    /// Posterior probability of the trait being present (or absent).
    #[must_use]
    pub const fn trait_probability(&self, has_trait: bool) -> f64 {
        self.phenotype[has_trait as usize]
    }

    fn normalize(&mut self) -> Result<(), FamilyError> {
        let gene_sum: f64 = self.gene.iter().sum();
        let trait_sum: f64 = self.phenotype.iter().sum();
        if gene_sum <= 0.0 || trait_sum <= 0.0 {
            return Err(FamilyError::ImpossibleEvidence);
        }
        self.gene.iter_mut().for_each(|p| *p /= gene_sum);
        self.phenotype.iter_mut().for_each(|p| *p /= trait_sum);
        Ok(())
    }
}

/// Posteriors for a whole family, in family order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Posteriors(Vec<Posterior>);

impl Posteriors {
    /// The posterior of the person called `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Posterior> {
        self.0.iter().find(|p| p.name == name)
    }

    /// Posteriors in family order.
    pub fn iter(&self) -> impl Iterator<Item = &Posterior> {
        self.0.iter()
    }

    /// Number of people.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether there are no posteriors.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Computes every person's gene and trait posterior given the observed traits.
///
/// # Errors
///
/// - [`FamilyError::TooLarge`] if the family has more than [`MAX_PEOPLE`] members.
/// - [`FamilyError::ImpossibleEvidence`] if the evidence has zero probability.
pub fn infer(family: &Family, model: &HeredityModel) -> Result<Posteriors, FamilyError> {
    let n = family.len();
    if n > MAX_PEOPLE {
        return Err(FamilyError::TooLarge {
            people: n,
            max: MAX_PEOPLE,
        });
    }

    let mut posteriors: Vec<Posterior> = family
        .people()
        .iter()
        .map(|p| Posterior::empty(&p.name))
        .collect();
    if n == 0 {
        return Ok(Posteriors(posteriors));
    }

    let observed: Vec<Option<bool>> = family.people().iter().map(|p| p.observed_trait).collect();

    let mut enumerated = 0_usize;
    for genes in std::iter::repeat_n(Genes::ALL, n).multi_cartesian_product() {
        enumerated += 1;
        let p = joint(family, model, &genes, |i| observed[i]);
        if p <= 0.0 {
            continue;
        }

        for (i, posterior) in posteriors.iter_mut().enumerate() {
            posterior.gene[genes[i].count()] += p;
            match observed[i] {
                Some(t) => posterior.phenotype[usize::from(t)] += p,
                None => {
                    posterior.phenotype[1] += p * model.trait_probability(genes[i], true);
                    posterior.phenotype[0] += p * model.trait_probability(genes[i], false);
                }
            }
        }
    }
    debug!("enumerated {enumerated} gene assignments for {n} people");

    for posterior in &mut posteriors {
        posterior.normalize()?;
    }
    info!("inferred posteriors for {n} people");
    Ok(Posteriors(posteriors))
}
