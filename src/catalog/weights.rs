//! Per-kind weights used by the author citation index

use crate::error::{CatalogError, CatalogResult};
use crate::graph::KindTag;
use crate::validate;
use serde::{Deserialize, Serialize};

/// Weight of each publication kind; every kind starts at 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightTable {
    pub book: f64,
    pub journal_article: f64,
    pub conference_paper: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            book: 1.0,
            journal_article: 1.0,
            conference_paper: 1.0,
        }
    }
}

impl WeightTable {
    pub fn get(&self, tag: KindTag) -> f64 {
        match tag {
            KindTag::Book => self.book,
            KindTag::JournalArticle => self.journal_article,
            KindTag::ConferencePaper => self.conference_paper,
        }
    }

    /// Set the weight of one kind; fails unless `weight > 0`
    pub fn set(&mut self, tag: KindTag, weight: f64) -> CatalogResult<()> {
        if !validate::is_valid_weight(weight) {
            return Err(CatalogError::InvalidWeight(weight));
        }
        let slot = match tag {
            KindTag::Book => &mut self.book,
            KindTag::JournalArticle => &mut self.journal_article,
            KindTag::ConferencePaper => &mut self.conference_paper,
        };
        *slot = weight;
        Ok(())
    }

    /// Check that every weight is positive
    pub fn validate(&self) -> CatalogResult<()> {
        for tag in KindTag::ALL {
            let weight = self.get(tag);
            if !validate::is_valid_weight(weight) {
                return Err(CatalogError::InvalidWeight(weight));
            }
        }
        Ok(())
    }
}
