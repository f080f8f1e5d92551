//! Citation graph data structures

mod citation;
mod publication;


pub use citation::CitationGraph;
pub use publication::{KindTag, Publication, PublicationId, PublicationKind};
