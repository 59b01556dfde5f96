#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! PageRank estimators.
//!
//! A random surfer on page `p` follows one of `p`'s links with probability `d` (the
//! damping factor) and otherwise jumps to a page chosen uniformly from the whole corpus.
//! A page without links sends the surfer to a uniformly chosen page (itself included).
//! PageRank is the stationary distribution of this walk.
//!
//! Two estimators are provided:
//! - [`iterate_pagerank`] applies the rank update synchronously until no page moves by
//!   more than the tolerance.
//! - [`sample_pagerank`] walks the chain for a fixed number of steps and reports the
//!   visit frequency of every page.
//!
//! On a connected corpus the two agree to within sampling error.

use std::collections::BTreeMap;

use log::{debug, info, warn};
use ordered_float::OrderedFloat;

use crate::error::PageRankError;
use crate::pagerank::corpus::Corpus;

/// Default damping factor.
pub const DAMPING: f64 = 0.85;

/// Default number of samples drawn by [`sample_pagerank`].
pub const SAMPLES: usize = 10_000;

/// Default convergence threshold for [`iterate_pagerank`].
pub const TOLERANCE: f64 = 0.001;

/// Rank of every page, keyed by page name.
pub type Ranks = BTreeMap<String, f64>;

/// Parameters shared by both estimators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageRankConfig {
    /// Probability of following a link rather than jumping anywhere.
    pub damping: f64,
    /// Iteration stops once no rank changes by more than this.
    pub tolerance: f64,
    /// Number of pages the sampler visits.
    pub samples: usize,
    /// Seed for the sampler; `None` seeds from the environment.
    pub seed: Option<u64>,
    /// Upper bound on update rounds for the iterative estimator.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            tolerance: TOLERANCE,
            samples: SAMPLES,
            seed: None,
            max_iterations: 10_000,
        }
    }
}

impl PageRankConfig {
    fn validate(&self, corpus: &Corpus) -> Result<(), PageRankError> {
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(PageRankError::InvalidDamping(self.damping));
        }
        if corpus.is_empty() {
            return Err(PageRankError::EmptyCorpus);
        }
        Ok(())
    }
}

/// Probability of moving from page `from` to each page, in corpus index order.
fn transition_row(corpus: &Corpus, from: usize, damping: f64) -> Vec<f64> {
    #[allow(clippy::cast_precision_loss)]
    let n = corpus.len() as f64;
    let links = corpus.links(from);

    if links.is_empty() {
        return vec![1.0 / n; corpus.len()];
    }

    let mut row = vec![(1.0 - damping) / n; corpus.len()];
    #[allow(clippy::cast_precision_loss)]
    let share = damping / links.len() as f64;
    for &to in links {
        row[to] += share;
    }
    row
}

/// The distribution over the next page visited from `page`.
///
/// # Errors
///
/// - [`PageRankError::UnknownPage`] if `page` is not in the corpus.
/// - [`PageRankError::InvalidDamping`] if `damping` is outside `[0, 1]`.
pub fn transition_model(corpus: &Corpus, page: &str, damping: f64) -> Result<Ranks, PageRankError> {
    if !(0.0..=1.0).contains(&damping) {
        return Err(PageRankError::InvalidDamping(damping));
    }
    let from = corpus
        .index_of(page)
        .ok_or_else(|| PageRankError::UnknownPage(page.to_string()))?;
    Ok(to_ranks(corpus, transition_row(corpus, from, damping)))
}

fn to_ranks(corpus: &Corpus, values: Vec<f64>) -> Ranks {
    corpus.pages().iter().cloned().zip(values).collect()
}

/// Estimates PageRank by repeated synchronous application of the rank update
///
/// `new(p) = (1 - d) / N + d * (Σ_{q → p} rank(q) / |L(q)| + Σ_{q dangling} rank(q) / N)`
///
/// starting from the uniform distribution.
///
/// # Errors
///
/// - [`PageRankError::EmptyCorpus`] if there are no pages.
/// - [`PageRankError::InvalidDamping`] if the damping factor is outside `[0, 1]`.
pub fn iterate_pagerank(corpus: &Corpus, config: &PageRankConfig) -> Result<Ranks, PageRankError> {
    config.validate(corpus)?;

    let size = corpus.len();
    #[allow(clippy::cast_precision_loss)]
    let n = size as f64;
    let d = config.damping;

    // incoming[p] holds (q, 1 / |L(q)|) for every q linking to p
    let mut incoming: Vec<Vec<(usize, f64)>> = vec![Vec::new(); size];
    for q in 0..size {
        let links = corpus.links(q);
        #[allow(clippy::cast_precision_loss)]
        let weight = 1.0 / links.len().max(1) as f64;
        for &p in links {
            incoming[p].push((q, weight));
        }
    }
    let dangling: Vec<usize> = (0..size).filter(|&q| corpus.is_dangling(q)).collect();

    let mut ranks = vec![1.0 / n; size];
    let mut next = vec![0.0; size];
    let mut rounds = 0_usize;
    loop {
        rounds += 1;
        let dangling_mass: f64 = dangling.iter().map(|&q| ranks[q]).sum();
        for (p, slot) in next.iter_mut().enumerate() {
            let linked: f64 = incoming[p].iter().map(|&(q, w)| ranks[q] * w).sum();
            *slot = (1.0 - d) / n + d * (linked + dangling_mass / n);
        }

        let delta = ranks
            .iter()
            .zip(&next)
            .map(|(old, new)| OrderedFloat((old - new).abs()))
            .max()
            .map_or(0.0, OrderedFloat::into_inner);
        std::mem::swap(&mut ranks, &mut next);

        if delta <= config.tolerance {
            debug!("converged after {rounds} rounds (max change {delta:.2e})");
            break;
        }
        if rounds >= config.max_iterations {
            warn!("stopped after {rounds} rounds without converging (max change {delta:.2e})");
            break;
        }
    }

    info!("iterated PageRank over {size} pages in {rounds} rounds");
    Ok(to_ranks(corpus, ranks))
}

/// Estimates PageRank by sampling `config.samples` pages from the random-surfer chain,
/// seeded from `config.seed` when set.
///
/// # Errors
///
/// As [`sample_pagerank_with`].
pub fn sample_pagerank(corpus: &Corpus, config: &PageRankConfig) -> Result<Ranks, PageRankError> {
    let mut rng = config
        .seed
        .map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    sample_pagerank_with(corpus, config, &mut rng)
}

/// Estimates PageRank by sampling, drawing randomness from `rng`.
///
/// The first page is chosen uniformly; each of the remaining `samples - 1` pages is drawn
/// from the transition distribution of the page before it. The rank of a page is the
/// fraction of the samples that landed on it.
///
/// # Errors
///
/// - [`PageRankError::EmptyCorpus`] if there are no pages.
/// - [`PageRankError::NoSamples`] if `config.samples` is zero.
/// - [`PageRankError::InvalidDamping`] if the damping factor is outside `[0, 1]`.
pub fn sample_pagerank_with(
    corpus: &Corpus,
    config: &PageRankConfig,
    rng: &mut fastrand::Rng,
) -> Result<Ranks, PageRankError> {
    config.validate(corpus)?;
    if config.samples == 0 {
        return Err(PageRankError::NoSamples);
    }

    let size = corpus.len();
    let cumulative: Vec<Vec<f64>> = (0..size)
        .map(|from| {
            transition_row(corpus, from, config.damping)
                .into_iter()
                .scan(0.0, |acc, p| {
                    *acc += p;
                    Some(*acc)
                })
                .collect()
        })
        .collect();

    let mut visits = vec![0_usize; size];
    let mut page = rng.usize(0..size);
    visits[page] += 1;
    for _ in 1..config.samples {
        let row = &cumulative[page];
        let r = rng.f64() * row[size - 1];
        page = row.partition_point(|&c| c <= r).min(size - 1);
        visits[page] += 1;
    }

    debug!("drew {} samples over {size} pages", config.samples);
    #[allow(clippy::cast_precision_loss)]
    let total = config.samples as f64;
    #[allow(clippy::cast_precision_loss)]
    let ranks = visits.into_iter().map(|v| v as f64 / total).collect();
    Ok(to_ranks(corpus, ranks))
}
