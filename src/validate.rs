//! Value checks shared by publications and the reference database
//!
//! Author names are written last name first, e.g. `"Einstein, Albert"`:
//! each part holds letters and spaces only and is at most 20 characters long.

use crate::clock::Clock;
use regex_lite::Regex;
use std::sync::OnceLock;

/// Earliest publication year accepted anywhere in the catalog
pub const MIN_YEAR: i32 = 1500;

fn author_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^[A-Za-z ]{1,20}, [A-Za-z][A-Za-z ]{0,19}$")
            .expect("author-name regex must compile")
    })
}

/// Check a single `"Last, First"` author name
pub fn is_valid_author(name: &str) -> bool {
    author_name_re().is_match(name)
}

/// Check an author list: non-empty and every name valid
pub fn is_valid_authors<S: AsRef<str>>(authors: &[S]) -> bool {
    !authors.is_empty() && authors.iter().all(|a| is_valid_author(a.as_ref()))
}

/// Check `1500 <= year <= current year + 1`
pub fn is_valid_year(year: i32, clock: &impl Clock) -> bool {
    (MIN_YEAR..=clock.current_year().saturating_add(1)).contains(&year)
}

pub fn is_valid_issue_number(issue_number: i64) -> bool {
    issue_number > 0
}

pub fn is_valid_weight(weight: f64) -> bool {
    weight > 0.0
}
