//! Find queries over the publications of a citation graph

use crate::graph::{CitationGraph, KindTag, Publication};

/// Query for finding publications by various criteria
#[derive(Debug, Clone, Default)]
pub struct PublicationQuery {
    /// Exact author string, e.g. `"Wang, Bo"`
    pub author: Option<String>,
    /// Case-insensitive substring of the title
    pub title_word: Option<String>,
    pub kind: Option<KindTag>,
    /// Inclusive lower bound on the year
    pub min_year: Option<i32>,
    /// Inclusive upper bound on the year
    pub max_year: Option<i32>,
    /// Maximum number of results
    pub limit: Option<usize>,
    /// Number of results to skip
    pub offset: Option<usize>,
}

impl PublicationQuery {
    /// Create a new empty query (matches all publications)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn with_title_word(mut self, word: impl Into<String>) -> Self {
        self.title_word = Some(word.into());
        self
    }

    pub fn with_kind(mut self, kind: KindTag) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn published_between(mut self, min_year: i32, max_year: i32) -> Self {
        self.min_year = Some(min_year);
        self.max_year = Some(max_year);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skip results (for pagination)
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Execute the query; results come back in id order
    pub fn execute<'a>(&self, graph: &'a CitationGraph) -> Vec<&'a Publication> {
        let needle = self.title_word.as_ref().map(|w| w.to_lowercase());
        graph
            .publications()
            .filter(|p| self.matches(p, needle.as_deref()))
            .skip(self.offset.unwrap_or(0))
            .take(self.limit.unwrap_or(usize::MAX))
            .collect()
    }

    fn matches(&self, publication: &Publication, needle: Option<&str>) -> bool {
        if let Some(ref author) = self.author {
            if !publication.has_author(author) {
                return false;
            }
        }

        if let Some(needle) = needle {
            if !publication.title().to_lowercase().contains(needle) {
                return false;
            }
        }

        if let Some(kind) = self.kind {
            if publication.tag() != kind {
                return false;
            }
        }

        if self.min_year.is_some_and(|min| publication.year() < min) {
            return false;
        }
        if self.max_year.is_some_and(|max| publication.year() > max) {
            return false;
        }

        true
    }
}
