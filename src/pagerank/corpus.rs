#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! Page graphs and the HTML crawler that builds them.
//!
//! A [`Corpus`] maps every page to the set of pages it links to. Construction enforces
//! the graph invariants: links to pages outside the corpus and links from a page to
//! itself are dropped. Pages are numbered in name order, which fixes the iteration order
//! of both estimators and so makes seeded sampling reproducible.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;
use rustc_hash::FxHashMap;
use walkdir::WalkDir;

use crate::error::LoadError;

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("anchor pattern is valid")
});

/// A set of pages and the links between them.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Corpus {
    pages: Vec<String>,
    index: FxHashMap<String, usize>,
    links: Vec<Vec<usize>>,
}

impl Corpus {
    /// Builds a corpus from raw out-link sets, discarding self-links and links to pages
    /// that are not keys of `links`.
    #[must_use]
    pub fn new(links: BTreeMap<String, BTreeSet<String>>) -> Self {
        let pages: Vec<String> = links.keys().cloned().collect();
        let index: FxHashMap<String, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();

        let mut dropped = 0_usize;
        let links = links
            .iter()
            .map(|(page, targets)| {
                targets
                    .iter()
                    .filter(|&target| {
                        let keep = target != page && index.contains_key(target);
                        if !keep {
                            dropped += 1;
                        }
                        keep
                    })
                    .map(|target| index[target])
                    .collect()
            })
            .collect();

        if dropped > 0 {
            debug!("dropped {dropped} self or out-of-corpus links");
        }
        Self {
            pages,
            index,
            links,
        }
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the corpus has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page names in index order (sorted by name).
    #[must_use]
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    /// Index of the page called `page`.
    #[must_use]
    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.index.get(page).copied()
    }

    /// Indices of the pages `page` links to, in name order.
    #[must_use]
    pub fn links(&self, page: usize) -> &[usize] {
        &self.links[page]
    }

    /// Names of the pages `page` links to, or `None` if there is no such page.
    #[must_use]
    pub fn out_links(&self, page: &str) -> Option<Vec<&str>> {
        self.index_of(page).map(|i| {
            self.links[i]
                .iter()
                .map(|&t| self.pages[t].as_str())
                .collect()
        })
    }

    /// A page with no out-links.
    #[must_use]
    pub fn is_dangling(&self, page: usize) -> bool {
        self.links[page].is_empty()
    }
}

impl<P, L, T> FromIterator<(P, L)> for Corpus
where
    P: Into<String>,
    L: IntoIterator<Item = T>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (P, L)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(page, targets)| {
                    (page.into(), targets.into_iter().map(Into::into).collect())
                })
                .collect(),
        )
    }
}

/// Every `href` target of an anchor tag in `html`.
#[must_use]
pub fn extract_links(html: &str) -> BTreeSet<String> {
    ANCHOR_HREF
        .captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

/// Builds a corpus from the `.html` files directly inside `dir`.
///
/// # Errors
///
/// - [`LoadError::NotADirectory`] if `dir` is not a directory.
/// - [`LoadError::Walk`] if the directory cannot be listed.
/// - [`LoadError::Io`] if a page cannot be read.
pub fn crawl(dir: &Path) -> Result<Corpus, LoadError> {
    if !dir.is_dir() {
        return Err(LoadError::NotADirectory(dir.to_path_buf()));
    }

    let mut raw = BTreeMap::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "html") {
            continue;
        }
        let contents = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        raw.insert(name, extract_links(&contents));
    }

    let corpus = Corpus::new(raw);
    info!("crawled {} pages from {}", corpus.len(), dir.display());
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_links() {
        let html = r#"<html><body>
            <a href="2.html">Two</a>
            <a class="nav" href="3.html">Three</a>
            <a href="2.html">Two again</a>
            <link href="style.css">
            </body></html>"#;
        let links: Vec<_> = extract_links(html).into_iter().collect();
        assert_eq!(links, vec!["2.html", "3.html"]);
    }

    #[test]
    fn test_corpus_drops_self_and_unknown_links() {
        let corpus: Corpus = [
            ("a.html", vec!["a.html", "b.html", "missing.html"]),
            ("b.html", vec![]),
        ]
        .into_iter()
        .collect();
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.out_links("a.html"), Some(vec!["b.html"]));
        assert!(corpus.is_dangling(corpus.index_of("b.html").unwrap()));
        assert_eq!(corpus.out_links("c.html"), None);
    }

    #[test]
    fn test_crawl_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("1.html"),
            r#"<a href="2.html">2</a> <a href="1.html">self</a> <a href="https://example.com">ext</a>"#,
        )
        .unwrap();
        std::fs::write(dir.path().join("2.html"), r#"<a  href="1.html">1</a>"#).unwrap();
        std::fs::write(dir.path().join("notes.txt"), r#"<a href="2.html">2</a>"#).unwrap();

        let corpus = crawl(dir.path()).unwrap();
        assert_eq!(corpus.pages(), &["1.html".to_string(), "2.html".to_string()]);
        assert_eq!(corpus.out_links("1.html"), Some(vec!["2.html"]));
        assert_eq!(corpus.out_links("2.html"), Some(vec!["1.html"]));
    }

    #[test]
    fn test_crawl_rejects_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(crawl(&missing), Err(LoadError::NotADirectory(_))));
    }
}
