//! Publication representation in the citation graph

use crate::clock::{Clock, SystemClock};
use crate::error::{CatalogError, CatalogResult};
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned to a publication when a database registers it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PublicationId(u64);

impl PublicationId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for PublicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PublicationId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Discriminant of a [`PublicationKind`], used for weights and sameness checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KindTag {
    Book,
    JournalArticle,
    ConferencePaper,
}

impl KindTag {
    pub const ALL: [KindTag; 3] = [KindTag::Book, KindTag::JournalArticle, KindTag::ConferencePaper];

    pub fn as_str(&self) -> &'static str {
        match self {
            KindTag::Book => "book",
            KindTag::JournalArticle => "journal_article",
            KindTag::ConferencePaper => "conference_paper",
        }
    }
}

impl fmt::Display for KindTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind-specific payload of a publication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case", try_from = "KindRecord")]
pub enum PublicationKind {
    /// A book and the house that published it
    Book { publisher: String },
    /// An article in a numbered journal issue
    JournalArticle { journal: String, issue_number: i64 },
    /// A paper presented at a conference
    ConferencePaper { conference: String },
}

impl PublicationKind {
    pub fn book(publisher: impl Into<String>) -> Self {
        Self::Book {
            publisher: publisher.into(),
        }
    }

    /// Journal article payload; fails if `issue_number <= 0`
    pub fn journal_article(journal: impl Into<String>, issue_number: i64) -> CatalogResult<Self> {
        if !validate::is_valid_issue_number(issue_number) {
            return Err(CatalogError::InvalidIssueNumber(issue_number));
        }
        Ok(Self::JournalArticle {
            journal: journal.into(),
            issue_number,
        })
    }

    pub fn conference_paper(conference: impl Into<String>) -> Self {
        Self::ConferencePaper {
            conference: conference.into(),
        }
    }

    pub fn tag(&self) -> KindTag {
        match self {
            Self::Book { .. } => KindTag::Book,
            Self::JournalArticle { .. } => KindTag::JournalArticle,
            Self::ConferencePaper { .. } => KindTag::ConferencePaper,
        }
    }

    fn validate(&self) -> CatalogResult<()> {
        match self {
            Self::JournalArticle { issue_number, .. } if !validate::is_valid_issue_number(*issue_number) => {
                Err(CatalogError::InvalidIssueNumber(*issue_number))
            }
            _ => Ok(()),
        }
    }
}

/// Unchecked wire form of [`PublicationKind`]
#[derive(Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum KindRecord {
    Book { publisher: String },
    JournalArticle { journal: String, issue_number: i64 },
    ConferencePaper { conference: String },
}

impl TryFrom<KindRecord> for PublicationKind {
    type Error = CatalogError;

    fn try_from(record: KindRecord) -> CatalogResult<Self> {
        match record {
            KindRecord::Book { publisher } => Ok(Self::book(publisher)),
            KindRecord::JournalArticle { journal, issue_number } => Self::journal_article(journal, issue_number),
            KindRecord::ConferencePaper { conference } => Ok(Self::conference_paper(conference)),
        }
    }
}

/// A bibliographic item
///
/// Citation edges are not stored here; they live in
/// [`CitationGraph`](super::CitationGraph), which owns registered publications.
/// Deserialization runs the same checks as [`Publication::new`], with the
/// year judged against the system clock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PublicationRecord")]
pub struct Publication {
    id: Option<PublicationId>,
    title: String,
    authors: Vec<String>,
    year: i32,
    kind: PublicationKind,
    terminated: bool,
}

/// Unchecked wire form of [`Publication`]
#[derive(Deserialize)]
struct PublicationRecord {
    id: Option<PublicationId>,
    title: String,
    authors: Vec<String>,
    year: i32,
    kind: PublicationKind,
    #[serde(default)]
    terminated: bool,
}

impl TryFrom<PublicationRecord> for Publication {
    type Error = CatalogError;

    fn try_from(record: PublicationRecord) -> CatalogResult<Self> {
        let mut publication = Self::new(record.title, record.authors, record.year, record.kind, &SystemClock)?;
        publication.id = record.id;
        publication.terminated = record.terminated;
        Ok(publication)
    }
}

impl Publication {
    /// Create a free-standing publication (no id, not terminated)
    pub fn new<I, S>(
        title: impl Into<String>,
        authors: I,
        year: i32,
        kind: PublicationKind,
        clock: &impl Clock,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let authors = check_authors(authors)?;
        check_year(year, clock)?;
        kind.validate()?;
        Ok(Self {
            id: None,
            title: title.into(),
            authors,
            year,
            kind,
            terminated: false,
        })
    }

    pub fn book<I, S>(
        title: impl Into<String>,
        authors: I,
        year: i32,
        publisher: impl Into<String>,
        clock: &impl Clock,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(title, authors, year, PublicationKind::book(publisher), clock)
    }

    pub fn journal_article<I, S>(
        title: impl Into<String>,
        authors: I,
        year: i32,
        journal: impl Into<String>,
        issue_number: i64,
        clock: &impl Clock,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Authors and year are checked before the issue number
        let authors = check_authors(authors)?;
        check_year(year, clock)?;
        let kind = PublicationKind::journal_article(journal, issue_number)?;
        Self::new(title, authors, year, kind, clock)
    }

    pub fn conference_paper<I, S>(
        title: impl Into<String>,
        authors: I,
        year: i32,
        conference: impl Into<String>,
        clock: &impl Clock,
    ) -> CatalogResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(title, authors, year, PublicationKind::conference_paper(conference), clock)
    }

    /// Id assigned at registration, `None` while free-standing
    pub fn id(&self) -> Option<PublicationId> {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn authors(&self) -> &[String] {
        &self.authors
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn kind(&self) -> &PublicationKind {
        &self.kind
    }

    pub fn tag(&self) -> KindTag {
        self.kind.tag()
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> CatalogResult<()> {
        self.ensure_active()?;
        self.title = title.into();
        Ok(())
    }

    pub fn set_authors<I, S>(&mut self, authors: I) -> CatalogResult<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ensure_active()?;
        self.authors = check_authors(authors)?;
        Ok(())
    }

    pub fn set_year(&mut self, year: i32, clock: &impl Clock) -> CatalogResult<()> {
        self.ensure_active()?;
        check_year(year, clock)?;
        self.year = year;
        Ok(())
    }

    pub fn publisher(&self) -> Option<&str> {
        match &self.kind {
            PublicationKind::Book { publisher } => Some(publisher),
            _ => None,
        }
    }

    pub fn journal(&self) -> Option<&str> {
        match &self.kind {
            PublicationKind::JournalArticle { journal, .. } => Some(journal),
            _ => None,
        }
    }

    pub fn issue_number(&self) -> Option<i64> {
        match &self.kind {
            PublicationKind::JournalArticle { issue_number, .. } => Some(*issue_number),
            _ => None,
        }
    }

    pub fn conference(&self) -> Option<&str> {
        match &self.kind {
            PublicationKind::ConferencePaper { conference } => Some(conference),
            _ => None,
        }
    }

    pub fn set_publisher(&mut self, value: impl Into<String>) -> CatalogResult<()> {
        self.ensure_active()?;
        match &mut self.kind {
            PublicationKind::Book { publisher } => {
                *publisher = value.into();
                Ok(())
            }
            other => Err(wrong_kind("publisher", other.tag())),
        }
    }

    pub fn set_journal(&mut self, value: impl Into<String>) -> CatalogResult<()> {
        self.ensure_active()?;
        match &mut self.kind {
            PublicationKind::JournalArticle { journal, .. } => {
                *journal = value.into();
                Ok(())
            }
            other => Err(wrong_kind("journal", other.tag())),
        }
    }

    pub fn set_issue_number(&mut self, value: i64) -> CatalogResult<()> {
        self.ensure_active()?;
        match &mut self.kind {
            PublicationKind::JournalArticle { issue_number, .. } => {
                if !validate::is_valid_issue_number(value) {
                    return Err(CatalogError::InvalidIssueNumber(value));
                }
                *issue_number = value;
                Ok(())
            }
            other => Err(wrong_kind("issue number", other.tag())),
        }
    }

    pub fn set_conference(&mut self, value: impl Into<String>) -> CatalogResult<()> {
        self.ensure_active()?;
        match &mut self.kind {
            PublicationKind::ConferencePaper { conference } => {
                *conference = value.into();
                Ok(())
            }
            other => Err(wrong_kind("conference", other.tag())),
        }
    }

    /// Value equality on authors, year, title and kind tag (ids are ignored)
    pub fn is_same_as(&self, other: &Publication) -> bool {
        self.authors == other.authors
            && self.year == other.year
            && self.title == other.title
            && self.tag() == other.tag()
    }

    /// Exact match against one of the author strings
    pub fn has_author(&self, name: &str) -> bool {
        self.authors.iter().any(|a| a == name)
    }

    pub fn author_count(&self) -> usize {
        self.authors.len()
    }

    /// Authors rendered as `"A. Einstein"`
    pub fn formatted_author_names(&self) -> Vec<String> {
        self.authors.iter().map(|a| format_author(a)).collect()
    }

    /// Capitalize every space-separated word of the title in place
    pub fn capitalize_title(&mut self) -> CatalogResult<()> {
        self.ensure_active()?;
        self.title = self
            .title
            .split(' ')
            .map(capitalize_word)
            .collect::<Vec<_>>()
            .join(" ");
        Ok(())
    }

    /// True iff `year + 10 < current year`
    pub fn is_at_least_ten_years_old(&self, clock: &impl Clock) -> bool {
        self.year.saturating_add(10) < clock.current_year()
    }

    pub(crate) fn assign_id(&mut self, id: PublicationId) {
        self.id = Some(id);
    }

    pub(crate) fn mark_terminated(&mut self) {
        self.terminated = true;
    }

    fn ensure_active(&self) -> CatalogResult<()> {
        if self.terminated {
            return Err(CatalogError::IllegalState(format!(
                "publication {:?} is terminated",
                self.title
            )));
        }
        Ok(())
    }
}

impl fmt::Display for Publication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}, ", self.formatted_author_names().join(", "), self.title)?;
        match &self.kind {
            PublicationKind::Book { publisher } => write!(f, "{}", publisher)?,
            PublicationKind::JournalArticle { journal, issue_number } => {
                write!(f, "{}, {}", journal, issue_number)?
            }
            PublicationKind::ConferencePaper { conference } => write!(f, "{}", conference)?,
        }
        write!(f, ", {}", self.year)
    }
}

fn check_authors<I, S>(authors: I) -> CatalogResult<Vec<String>>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let authors: Vec<String> = authors.into_iter().map(Into::into).collect();
    if !validate::is_valid_authors(&authors) {
        return Err(CatalogError::InvalidAuthors(authors));
    }
    Ok(authors)
}

fn check_year(year: i32, clock: &impl Clock) -> CatalogResult<()> {
    if !validate::is_valid_year(year, clock) {
        return Err(CatalogError::InvalidYear(year));
    }
    Ok(())
}

fn wrong_kind(field: &str, tag: KindTag) -> CatalogError {
    CatalogError::InvalidOperation(format!("a {} has no {}", tag, field))
}

fn format_author(name: &str) -> String {
    match name.split_once(", ") {
        Some((last, first)) => match first.chars().next() {
            Some(initial) => format!("{}. {}", initial.to_uppercase(), last),
            None => last.to_string(),
        },
        None => name.to_string(),
    }
}

fn capitalize_word(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    const AUTHORS: [&str; 3] = ["Wang, Bo", "De Coster, Jeroen", "Wevers, Martine"];
    const CLOCK: FixedClock = FixedClock(2016);

    fn article(year: i32) -> Publication {
        Publication::journal_article("Gas leak rate study of MEMS", AUTHORS, year, "journal of MEMS", 123, &CLOCK)
            .unwrap()
    }

    #[test]
    fn test_new_publication_is_free_standing() {
        let p = article(1990);
        assert_eq!(p.id(), None);
        assert!(!p.is_terminated());
        assert_eq!(p.title(), "Gas leak rate study of MEMS");
        assert_eq!(p.authors(), &AUTHORS.map(String::from));
        assert_eq!(p.year(), 1990);
        assert_eq!(p.journal(), Some("journal of MEMS"));
        assert_eq!(p.issue_number(), Some(123));
        assert_eq!(p.tag(), KindTag::JournalArticle);
    }

    #[test]
    fn test_constructor_rejects_bad_authors() {
        let err = Publication::book("t", ["Wang", "Bo, "], 1990, "acco", &CLOCK).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAuthors(_)));

        let err = Publication::book("t", Vec::<String>::new(), 1990, "acco", &CLOCK).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAuthors(_)));
    }

    #[test]
    fn test_constructor_rejects_bad_year() {
        let err = Publication::book("t", AUTHORS, 90, "acco", &CLOCK).unwrap_err();
        assert_eq!(err, CatalogError::InvalidYear(90));
        let err = Publication::book("t", AUTHORS, 2018, "acco", &CLOCK).unwrap_err();
        assert_eq!(err, CatalogError::InvalidYear(2018));
        assert!(Publication::book("t", AUTHORS, 2017, "acco", &CLOCK).is_ok());
    }

    #[test]
    fn test_constructor_rejects_bad_issue_number() {
        let err = Publication::journal_article("t", AUTHORS, 1990, "j", -123, &CLOCK).unwrap_err();
        assert_eq!(err, CatalogError::InvalidIssueNumber(-123));
    }

    #[test]
    fn test_setters_validate() {
        let mut p = article(1990);
        p.set_title("testTitle").unwrap();
        p.set_authors(["Wang, Bo", "Li, Lei"]).unwrap();
        p.set_issue_number(911).unwrap();
        p.set_year(2016, &CLOCK).unwrap();
        assert_eq!(p.title(), "testTitle");
        assert_eq!(p.authors(), &["Wang, Bo".to_string(), "Li, Lei".to_string()]);
        assert_eq!(p.issue_number(), Some(911));
        assert_eq!(p.year(), 2016);

        assert!(matches!(p.set_authors(["Wang"]), Err(CatalogError::InvalidAuthors(_))));
        assert_eq!(p.set_issue_number(-119), Err(CatalogError::InvalidIssueNumber(-119)));
        assert_eq!(p.set_year(-119, &CLOCK), Err(CatalogError::InvalidYear(-119)));
        assert_eq!(p.year(), 2016);
    }

    #[test]
    fn test_kind_setters_reject_other_kinds() {
        let mut book = Publication::book("t", AUTHORS, 2000, "acco", &CLOCK).unwrap();
        book.set_publisher("Springer").unwrap();
        assert_eq!(book.publisher(), Some("Springer"));
        assert!(matches!(book.set_conference("Transducers"), Err(CatalogError::InvalidOperation(_))));
        assert!(matches!(book.set_journal("j"), Err(CatalogError::InvalidOperation(_))));
    }

    #[test]
    fn test_terminated_publication_rejects_mutation() {
        let mut p = Publication::conference_paper("t", AUTHORS, 2012, "Transducers", &CLOCK).unwrap();
        p.mark_terminated();
        assert!(matches!(p.set_title("x"), Err(CatalogError::IllegalState(_))));
        assert!(matches!(p.set_year(2013, &CLOCK), Err(CatalogError::IllegalState(_))));
        assert!(matches!(p.set_authors(["Wang, Bo"]), Err(CatalogError::IllegalState(_))));
        assert!(matches!(p.set_conference("x"), Err(CatalogError::IllegalState(_))));
        assert!(matches!(p.capitalize_title(), Err(CatalogError::IllegalState(_))));
        // Reads still work
        assert_eq!(p.conference(), Some("Transducers"));
    }

    #[test]
    fn test_is_same_as_compares_values_and_kind() {
        let a = article(2016);
        let b = article(2016);
        assert!(a.is_same_as(&b));

        let c = article(2015);
        assert!(!a.is_same_as(&c));

        let book = Publication::book("Gas leak rate study of MEMS", AUTHORS, 2016, "acco", &CLOCK).unwrap();
        assert!(!a.is_same_as(&book));
    }

    #[test]
    fn test_formatted_author_names() {
        let p = article(1990);
        assert_eq!(p.author_count(), 3);
        assert_eq!(p.formatted_author_names(), vec!["B. Wang", "J. De Coster", "M. Wevers"]);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            article(1990).to_string(),
            "B. Wang, J. De Coster, M. Wevers, Gas leak rate study of MEMS, journal of MEMS, 123, 1990"
        );
        let book = Publication::book("publication2", ["Eric, Steegmans"], 2014, "acco", &CLOCK).unwrap();
        assert_eq!(book.to_string(), "S. Eric, publication2, acco, 2014");
    }

    #[test]
    fn test_capitalize_title() {
        let mut p = article(1990);
        p.capitalize_title().unwrap();
        assert_eq!(p.title(), "Gas Leak Rate Study Of Mems");
    }

    #[test]
    fn test_is_at_least_ten_years_old() {
        assert!(article(1990).is_at_least_ten_years_old(&CLOCK));
        assert!(!article(2016).is_at_least_ten_years_old(&CLOCK));
        // Exactly ten years is not older than ten
        assert!(!article(2006).is_at_least_ten_years_old(&CLOCK));
        assert!(article(2005).is_at_least_ten_years_old(&CLOCK));
    }

    #[test]
    fn test_kind_serializes_with_tag() {
        let json = serde_json::to_value(PublicationKind::book("Springer")).unwrap();
        assert_eq!(json["kind"], "book");
        assert_eq!(json["publisher"], "Springer");

        let id = serde_json::to_string(&PublicationId::new(1001)).unwrap();
        assert_eq!(id, "1001");
    }

    #[test]
    fn test_deserialize_accepts_valid_publication() {
        let p = Publication::book("Thin films", ["Wang, Bo"], 2012, "Springer", &CLOCK).unwrap();
        let json = serde_json::to_string(&p).unwrap();
        let back: Publication = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn test_deserialize_runs_constructor_checks() {
        let cases = [
            r#"{"id":null,"title":"t","authors":[],"year":2000,"kind":{"kind":"book","publisher":"p"},"terminated":false}"#,
            r#"{"id":null,"title":"t","authors":["Wang Bo"],"year":2000,"kind":{"kind":"book","publisher":"p"},"terminated":false}"#,
            r#"{"id":null,"title":"t","authors":["Wang, Bo"],"year":0,"kind":{"kind":"book","publisher":"p"},"terminated":false}"#,
            r#"{"id":null,"title":"t","authors":["Wang, Bo"],"year":2147483647,"kind":{"kind":"book","publisher":"p"},"terminated":false}"#,
            r#"{"id":null,"title":"t","authors":["Wang, Bo"],"year":2000,"kind":{"kind":"journal_article","journal":"j","issue_number":0},"terminated":false}"#,
        ];
        for json in cases {
            assert!(serde_json::from_str::<Publication>(json).is_err(), "accepted {}", json);
        }
    }

    #[test]
    fn test_deserialize_kind_rejects_bad_issue_number() {
        let err = serde_json::from_str::<PublicationKind>(r#"{"kind":"journal_article","journal":"j","issue_number":-4}"#)
            .unwrap_err();
        assert!(err.to_string().contains("issue number"), "{}", err);
        let kind: PublicationKind =
            serde_json::from_str(r#"{"kind":"journal_article","journal":"j","issue_number":4}"#).unwrap();
        assert_eq!(kind.tag(), KindTag::JournalArticle);
    }

    #[test]
    fn test_age_check_does_not_overflow() {
        let p = article(2016);
        assert!(!p.is_at_least_ten_years_old(&FixedClock(i32::MIN)));
        assert!(p.is_at_least_ten_years_old(&FixedClock(i32::MAX)));
    }
}
