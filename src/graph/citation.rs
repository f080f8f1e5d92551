//! CitationGraph: publications and the symmetric cites / cited-by relation
//!
//! The graph owns every registered publication and both adjacency
//! directions. Each edge is written and erased by exactly one pair of
//! private helpers (`link` and `unlink`),
//! so `cited ∈ cites[citing]` holds exactly when `citing ∈ cited_by[cited]`.

use super::publication::{Publication, PublicationId};
use crate::error::{CatalogError, CatalogResult};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// Arena of publications with out-edges (`cites`) and in-edges (`cited_by`)
#[derive(Debug, Clone, Default)]
pub struct CitationGraph {
    nodes: BTreeMap<PublicationId, Publication>,
    cites: BTreeMap<PublicationId, BTreeSet<PublicationId>>,
    cited_by: BTreeMap<PublicationId, BTreeSet<PublicationId>>,
}

impl CitationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a publication under `id`
    ///
    /// Fails if the id is taken, or if the publication is terminated or
    /// already carries an id from an earlier registration.
    pub fn insert(&mut self, id: PublicationId, mut publication: Publication) -> CatalogResult<PublicationId> {
        if publication.is_terminated() {
            return Err(CatalogError::InvalidOperation(format!(
                "cannot register terminated publication {:?}",
                publication.title()
            )));
        }
        if let Some(existing) = publication.id() {
            return Err(CatalogError::InvalidOperation(format!(
                "publication {:?} is already registered as {}",
                publication.title(),
                existing
            )));
        }
        if self.nodes.contains_key(&id) {
            return Err(CatalogError::InvalidOperation(format!("id {} is already in use", id)));
        }
        publication.assign_id(id);
        self.nodes.insert(id, publication);
        self.cites.insert(id, BTreeSet::new());
        self.cited_by.insert(id, BTreeSet::new());
        debug!(%id, "publication inserted");
        Ok(id)
    }

    /// Terminate a publication and take it out of the graph
    ///
    /// Returns `None` if no publication is stored under `id`.
    pub fn remove(&mut self, id: PublicationId) -> Option<Publication> {
        if !self.nodes.contains_key(&id) {
            return None;
        }
        self.sever(id);
        self.cites.remove(&id);
        self.cited_by.remove(&id);
        let mut publication = self.nodes.remove(&id)?;
        publication.mark_terminated();
        debug!(%id, "publication removed");
        Some(publication)
    }

    pub fn contains(&self, id: PublicationId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn get(&self, id: PublicationId) -> Option<&Publication> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: PublicationId) -> Option<&mut Publication> {
        self.nodes.get_mut(&id)
    }

    /// Iterate publications in id order
    pub fn publications(&self) -> impl Iterator<Item = &Publication> {
        self.nodes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = PublicationId> + '_ {
        self.nodes.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.cites.values().map(BTreeSet::len).sum()
    }

    /// Admission check for a new edge `citing -> cited`
    ///
    /// Both publications must exist and be live, must not be the same
    /// publication by value, and `citing` may only cite work that is not
    /// newer than itself.
    pub fn can_cite(&self, citing: PublicationId, cited: PublicationId) -> bool {
        match (self.nodes.get(&citing), self.nodes.get(&cited)) {
            (Some(from), Some(to)) => admissible(from, to),
            _ => false,
        }
    }

    /// Mirror of [`can_cite`](Self::can_cite) for the inbound direction
    pub fn can_be_cited_by(&self, cited: PublicationId, citing: PublicationId) -> bool {
        self.can_cite(citing, cited)
    }

    /// Record that `citing` cites `cited`
    ///
    /// State is untouched when the admission check fails.
    pub fn add_citation(&mut self, citing: PublicationId, cited: PublicationId) -> CatalogResult<()> {
        self.require(citing)?;
        self.require(cited)?;
        if !self.can_cite(citing, cited) {
            warn!(%citing, %cited, "citation rejected");
            return Err(CatalogError::InvalidOperation(format!(
                "publication {} cannot cite publication {}",
                citing, cited
            )));
        }
        self.link(citing, cited);
        Ok(())
    }

    /// Record that `citing` cites `cited`, seen from the cited side
    pub fn add_cited_by(&mut self, cited: PublicationId, citing: PublicationId) -> CatalogResult<()> {
        self.add_citation(citing, cited)
    }

    /// Drop the edge `citing -> cited`; returns whether it existed
    pub fn remove_citation(&mut self, citing: PublicationId, cited: PublicationId) -> bool {
        if self.already_cites(citing, cited) {
            self.unlink(citing, cited);
            true
        } else {
            false
        }
    }

    pub fn remove_cited_by(&mut self, cited: PublicationId, citing: PublicationId) -> bool {
        self.remove_citation(citing, cited)
    }

    pub fn already_cites(&self, citing: PublicationId, cited: PublicationId) -> bool {
        self.cites.get(&citing).is_some_and(|set| set.contains(&cited))
    }

    pub fn already_cited_by(&self, cited: PublicationId, citing: PublicationId) -> bool {
        self.cited_by.get(&cited).is_some_and(|set| set.contains(&citing))
    }

    /// Snapshot of the publications `id` cites
    pub fn all_cites(&self, id: PublicationId) -> BTreeSet<PublicationId> {
        self.cites.get(&id).cloned().unwrap_or_default()
    }

    /// Snapshot of the publications citing `id`
    pub fn all_cited_by(&self, id: PublicationId) -> BTreeSet<PublicationId> {
        self.cited_by.get(&id).cloned().unwrap_or_default()
    }

    /// Sever every edge of `id` and mark it terminated, keeping the node
    ///
    /// Terminating twice is a no-op.
    pub fn terminate(&mut self, id: PublicationId) -> CatalogResult<()> {
        self.require(id)?;
        if self.nodes.get(&id).is_some_and(Publication::is_terminated) {
            return Ok(());
        }
        self.sever(id);
        if let Some(publication) = self.nodes.get_mut(&id) {
            publication.mark_terminated();
        }
        debug!(%id, "publication terminated");
        Ok(())
    }

    /// Every out-edge still passes admission and has its back-reference
    pub fn has_proper_cites(&self, id: PublicationId) -> bool {
        self.cites.get(&id).map_or(true, |set| {
            set.iter()
                .all(|&cited| self.can_cite(id, cited) && self.already_cited_by(cited, id))
        })
    }

    /// Every in-edge still passes admission and has its back-reference
    pub fn has_proper_cited_by(&self, id: PublicationId) -> bool {
        self.cited_by.get(&id).map_or(true, |set| {
            set.iter()
                .all(|&citing| self.can_be_cited_by(id, citing) && self.already_cites(citing, id))
        })
    }

    fn require(&self, id: PublicationId) -> CatalogResult<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(CatalogError::UnknownPublicationId(id))
        }
    }

    /// Remove every edge touching `id`, iterating over snapshots
    fn sever(&mut self, id: PublicationId) {
        for cited in self.all_cites(id) {
            self.unlink(id, cited);
        }
        for citing in self.all_cited_by(id) {
            self.unlink(citing, id);
        }
    }

    fn link(&mut self, citing: PublicationId, cited: PublicationId) {
        self.cites.entry(citing).or_default().insert(cited);
        self.cited_by.entry(cited).or_default().insert(citing);
        debug!(%citing, %cited, "citation added");
    }

    fn unlink(&mut self, citing: PublicationId, cited: PublicationId) {
        if let Some(set) = self.cites.get_mut(&citing) {
            set.remove(&cited);
        }
        if let Some(set) = self.cited_by.get_mut(&cited) {
            set.remove(&citing);
        }
        debug!(%citing, %cited, "citation removed");
    }
}

fn admissible(citing: &Publication, cited: &Publication) -> bool {
    !citing.is_same_as(cited)
        && citing.year() >= cited.year()
        && !citing.is_terminated()
        && !cited.is_terminated()
}
