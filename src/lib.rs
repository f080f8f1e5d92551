//! Citegraph: In-Memory Reference Database with a Citation Graph
//!
//! Keeps a collection of publications (books, journal articles, conference
//! papers) linked by directed "cites" relationships, and keeps the
//! cites / cited-by relation symmetric as publications are added, linked,
//! unlinked and terminated.
//!
//! # Core Concepts
//!
//! - **Publications**: Bibliographic items with validated authors and year
//! - **Citation graph**: Owns publications and both edge directions
//! - **Reference database**: Assigns ids and answers author/title queries
//!
//! # Example
//!
//! ```
//! use citegraph::{Publication, ReferenceDatabase, SystemClock};
//!
//! let mut db = ReferenceDatabase::new();
//! let article = Publication::journal_article("Gas leak rate", ["Wang, Bo"], 2016, "JMEMS", 12, &SystemClock)?;
//! let book = Publication::book("Vacuum technology", ["Li, Lei"], 2012, "Springer", &SystemClock)?;
//! let a = db.add_publication(article)?;
//! let b = db.add_publication(book)?;
//! db.add_citation(a, b)?;
//! assert!(db.cited_by_of(b)?.contains(&a));
//! # Ok::<(), citegraph::CatalogError>(())
//! ```

pub mod catalog;
mod clock;
pub mod config;
mod error;
mod graph;
pub mod validate;

pub use catalog::{IdSequence, PublicationQuery, ReferenceDatabase, WeightTable};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{CatalogConfig, ConfigError};
pub use error::{CatalogError, CatalogResult};
pub use graph::{CitationGraph, KindTag, Publication, PublicationId, PublicationKind};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
