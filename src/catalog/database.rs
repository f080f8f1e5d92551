//! ReferenceDatabase: the registry that owns publication identity

use super::query::PublicationQuery;
use super::sequence::IdSequence;
use super::weights::WeightTable;
use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};
use crate::graph::{CitationGraph, KindTag, Publication, PublicationId};
use crate::validate;
use std::collections::BTreeSet;
use tracing::debug;

/// A collection of publications linked by citations
///
/// The database assigns ids, answers collection-level queries and forwards
/// edge changes to its [`CitationGraph`].
#[derive(Debug, Clone, Default)]
pub struct ReferenceDatabase {
    graph: CitationGraph,
    sequence: IdSequence,
    weights: WeightTable,
    terminated: bool,
}

impl ReferenceDatabase {
    /// Create an empty database with its own id sequence starting at 1001
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty database drawing ids from a shared sequence
    pub fn with_sequence(sequence: IdSequence) -> Self {
        Self {
            sequence,
            ..Self::default()
        }
    }

    /// Create an empty database from configuration
    pub fn from_config(config: &CatalogConfig) -> CatalogResult<Self> {
        config.weights.validate()?;
        Ok(Self {
            sequence: IdSequence::starting_at(config.first_id),
            weights: config.weights,
            ..Self::default()
        })
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    /// Terminate every publication and clear the database
    ///
    /// Terminating twice is a no-op.
    pub fn terminate(&mut self) {
        if self.terminated {
            return;
        }
        let ids: Vec<PublicationId> = self.graph.ids().collect();
        for id in &ids {
            self.graph.remove(*id);
        }
        self.terminated = true;
        debug!(removed = ids.len(), "database terminated");
    }

    /// Whether `publication` may be registered here
    pub fn can_have_as_publication(&self, publication: &Publication) -> bool {
        !self.terminated && !publication.is_terminated() && publication.id().is_none()
    }

    /// Register a publication and return the id it received
    pub fn add_publication(&mut self, publication: Publication) -> CatalogResult<PublicationId> {
        self.ensure_active()?;
        if !self.can_have_as_publication(&publication) {
            return Err(CatalogError::InvalidOperation(format!(
                "publication {:?} is terminated or already registered",
                publication.title()
            )));
        }
        let id = self.sequence.next_id()?;
        self.graph.insert(id, publication)?;
        debug!(%id, "publication registered");
        Ok(id)
    }

    /// Terminate a publication, severing its citations, and drop it
    ///
    /// Returns the terminated publication, or `None` if it was not present.
    pub fn remove_publication(&mut self, id: PublicationId) -> Option<Publication> {
        let removed = self.graph.remove(id);
        if removed.is_some() {
            debug!(%id, "publication unregistered");
        }
        removed
    }

    /// Whether this database holds `publication` under its id
    pub fn has_publication(&self, publication: &Publication) -> bool {
        publication
            .id()
            .and_then(|id| self.graph.get(id))
            .is_some_and(|stored| stored.is_same_as(publication))
    }

    pub fn has_publication_id(&self, id: PublicationId) -> bool {
        self.graph.contains(id)
    }

    pub fn get_publication_by_id(&self, id: PublicationId) -> CatalogResult<&Publication> {
        self.graph.get(id).ok_or(CatalogError::UnknownPublicationId(id))
    }

    /// Mutable access for metadata edits
    ///
    /// Year edits are not re-checked against existing citations;
    /// [`has_proper_publications`](Self::has_proper_publications) reports them.
    pub fn get_publication_mut(&mut self, id: PublicationId) -> CatalogResult<&mut Publication> {
        self.ensure_active()?;
        self.graph.get_mut(id).ok_or(CatalogError::UnknownPublicationId(id))
    }

    /// All publications in id order
    pub fn get_all_publications(&self) -> Vec<&Publication> {
        self.graph.publications().collect()
    }

    pub fn publication_count(&self) -> usize {
        self.graph.len()
    }

    pub fn citation_graph(&self) -> &CitationGraph {
        &self.graph
    }

    /// Every publication is live, stored under its own id and has proper citations
    pub fn has_proper_publications(&self) -> bool {
        self.graph.ids().all(|id| {
            self.graph.get(id).is_some_and(|p| !p.is_terminated() && p.id() == Some(id))
                && self.graph.has_proper_cites(id)
                && self.graph.has_proper_cited_by(id)
        })
    }

    /// Publications listing `name` among their authors
    pub fn find_by_author(&self, name: &str) -> CatalogResult<Vec<&Publication>> {
        if !validate::is_valid_author(name) {
            return Err(CatalogError::InvalidAuthorName(name.to_string()));
        }
        Ok(PublicationQuery::new().with_author(name).execute(&self.graph))
    }

    /// Publications whose title contains `word`, ignoring case
    pub fn find_by_title_word(&self, word: &str) -> Vec<&Publication> {
        PublicationQuery::new().with_title_word(word).execute(&self.graph)
    }

    pub fn find(&self, query: &PublicationQuery) -> Vec<&Publication> {
        query.execute(&self.graph)
    }

    /// Record that publication `citing` cites publication `cited`
    pub fn add_citation(&mut self, citing: PublicationId, cited: PublicationId) -> CatalogResult<()> {
        self.ensure_active()?;
        self.graph.add_citation(citing, cited)
    }

    /// Drop the citation `citing -> cited`; returns whether it existed
    pub fn remove_citation(&mut self, citing: PublicationId, cited: PublicationId) -> CatalogResult<bool> {
        self.ensure_active()?;
        self.get_publication_by_id(citing)?;
        self.get_publication_by_id(cited)?;
        Ok(self.graph.remove_citation(citing, cited))
    }

    pub fn cites_of(&self, id: PublicationId) -> CatalogResult<BTreeSet<PublicationId>> {
        self.get_publication_by_id(id)?;
        Ok(self.graph.all_cites(id))
    }

    pub fn cited_by_of(&self, id: PublicationId) -> CatalogResult<BTreeSet<PublicationId>> {
        self.get_publication_by_id(id)?;
        Ok(self.graph.all_cited_by(id))
    }

    pub fn weights(&self) -> &WeightTable {
        &self.weights
    }

    pub fn set_weight(&mut self, kind: KindTag, weight: f64) -> CatalogResult<()> {
        self.ensure_active()?;
        self.weights.set(kind, weight)
    }

    /// Weight of the publication's kind
    pub fn weight_of(&self, id: PublicationId) -> CatalogResult<f64> {
        Ok(self.weights.get(self.get_publication_by_id(id)?.tag()))
    }

    /// Sum of kind weights over every publication by `author`
    ///
    /// This is a weighted publication count: the number of times those
    /// publications are cited does not enter the score.
    pub fn author_citation_index(&self, author: &str) -> CatalogResult<f64> {
        Ok(self
            .find_by_author(author)?
            .into_iter()
            .map(|p| self.weights.get(p.tag()))
            .sum())
    }

    /// The id the next registration will receive
    pub fn next_id(&self) -> PublicationId {
        self.sequence.peek()
    }

    /// Move the id counter forward; moving it backwards is rejected
    pub fn set_next_id(&mut self, value: u64) -> CatalogResult<()> {
        self.ensure_active()?;
        self.sequence.advance_to(value)
    }

    /// Handle on the id sequence, for sharing it with another database
    pub fn sequence(&self) -> &IdSequence {
        &self.sequence
    }

    fn ensure_active(&self) -> CatalogResult<()> {
        if self.terminated {
            return Err(CatalogError::IllegalState("database is terminated".to_string()));
        }
        Ok(())
    }
}
