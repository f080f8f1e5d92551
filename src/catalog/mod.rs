//! Reference database: identity, lookup and collection-level queries

mod database;
mod query;
mod sequence;
mod weights;

pub use database::ReferenceDatabase;
pub use query::PublicationQuery;
pub use sequence::{IdSequence, FIRST_ID};
pub use weights::WeightTable;
