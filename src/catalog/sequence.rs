//! Monotonic id source for registered publications

use crate::error::{CatalogError, CatalogResult};
use crate::graph::PublicationId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// First id handed out by a fresh sequence
pub const FIRST_ID: u64 = 1001;

/// Shared, strictly increasing id counter
///
/// Clones share one counter, so databases built from clones of the same
/// sequence never hand out the same id twice.
#[derive(Debug, Clone)]
pub struct IdSequence {
    next: Arc<AtomicU64>,
}

impl IdSequence {
    pub fn new() -> Self {
        Self::starting_at(FIRST_ID)
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: Arc::new(AtomicU64::new(first)),
        }
    }

    /// Hand out the next id and advance by one
    ///
    /// `u64::MAX` is never handed out; once the counter reaches it every
    /// call fails instead of wrapping around to ids already in use.
    pub fn next_id(&self) -> CatalogResult<PublicationId> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| current.checked_add(1))
            .map(PublicationId::new)
            .map_err(|current| CatalogError::InvalidOperation(format!("id sequence exhausted at {}", current)))
    }

    /// The id the next call to [`next_id`](Self::next_id) will return
    pub fn peek(&self) -> PublicationId {
        PublicationId::new(self.next.load(Ordering::SeqCst))
    }

    /// Move the counter forward to `value`
    ///
    /// Moving backwards would allow ids to repeat and is rejected.
    pub fn advance_to(&self, value: u64) -> CatalogResult<()> {
        self.next
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |current| {
                (value >= current).then_some(value)
            })
            .map(|_| ())
            .map_err(|current| {
                CatalogError::InvalidOperation(format!(
                    "id counter cannot move back from {} to {}",
                    current, value
                ))
            })
    }

    /// Whether both handles draw from the same counter
    pub fn is_shared_with(&self, other: &IdSequence) -> bool {
        Arc::ptr_eq(&self.next, &other.next)
    }
}

impl Default for IdSequence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_1001() {
        let seq = IdSequence::new();
        assert_eq!(seq.peek(), PublicationId::new(1001));
        assert_eq!(seq.next_id(), Ok(PublicationId::new(1001)));
        assert_eq!(seq.next_id(), Ok(PublicationId::new(1002)));
        assert_eq!(seq.peek(), PublicationId::new(1003));
    }

    #[test]
    fn test_clones_share_the_counter() {
        let a = IdSequence::new();
        let b = a.clone();
        assert!(a.is_shared_with(&b));
        assert_eq!(a.next_id(), Ok(PublicationId::new(1001)));
        assert_eq!(b.next_id(), Ok(PublicationId::new(1002)));
        assert!(!a.is_shared_with(&IdSequence::new()));
    }

    #[test]
    fn test_advance_only_moves_forward() {
        let seq = IdSequence::starting_at(2000);
        seq.advance_to(2000).unwrap();
        seq.advance_to(2500).unwrap();
        assert_eq!(seq.peek(), PublicationId::new(2500));
        assert!(matches!(seq.advance_to(10), Err(CatalogError::InvalidOperation(_))));
        assert_eq!(seq.peek(), PublicationId::new(2500));
    }

    #[test]
    fn test_exhausted_sequence_does_not_wrap() {
        let seq = IdSequence::starting_at(u64::MAX - 1);
        assert_eq!(seq.next_id(), Ok(PublicationId::new(u64::MAX - 1)));
        assert!(matches!(seq.next_id(), Err(CatalogError::InvalidOperation(_))));
        assert!(matches!(seq.next_id(), Err(CatalogError::InvalidOperation(_))));
        assert_eq!(seq.peek(), PublicationId::new(u64::MAX));
    }
}
