//! Shared fixtures for the integration suites

#![allow(dead_code)]

use citegraph::{FixedClock, Publication};
use std::sync::Once;

pub const CLOCK: FixedClock = FixedClock(2016);

/// Route `tracing` output through the test harness (once per binary)
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

pub fn journal_article(title: &str, authors: &[&str], year: i32) -> Publication {
    Publication::journal_article(title, authors.iter().copied(), year, "journal of MEMS", 123, &CLOCK).unwrap()
}

pub fn book(title: &str, authors: &[&str], year: i32) -> Publication {
    Publication::book(title, authors.iter().copied(), year, "Springer", &CLOCK).unwrap()
}

pub fn conference_paper(title: &str, authors: &[&str], year: i32) -> Publication {
    Publication::conference_paper(title, authors.iter().copied(), year, "Transducers", &CLOCK).unwrap()
}
