//! In-flight request guard
//!
//! A single-slot holder for the ticket of the one request a loader is
//! allowed to have outstanding. A response is only applied if it carries
//! the ticket currently in the slot; anything else is stale.

use std::sync::atomic::{AtomicU64, Ordering};

/// Source of process-unique ticket numbers
///
/// Unique across loader instances, so a response that outlives its
/// loader can never be mistaken for one issued by the next loader.
static NEXT_TICKET: AtomicU64 = AtomicU64::new(1);

/// Identifies one issued request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

impl Ticket {
    fn issue() -> Self {
        Ticket(NEXT_TICKET.fetch_add(1, Ordering::Relaxed))
    }
}

/// Single-slot mutual exclusion for outstanding requests
#[derive(Debug, Default)]
pub struct InFlightGuard {
    slot: Option<Ticket>,
}

impl InFlightGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the slot if it is free
    ///
    /// Returns None while another request is outstanding.
    pub fn try_acquire(&mut self) -> Option<Ticket> {
        if self.slot.is_some() {
            return None;
        }
        let ticket = Ticket::issue();
        self.slot = Some(ticket);
        Some(ticket)
    }

    /// Take the slot unconditionally, making any outstanding ticket stale
    pub fn supersede(&mut self) -> Ticket {
        let ticket = Ticket::issue();
        self.slot = Some(ticket);
        ticket
    }

    /// Free the slot if `ticket` is the one holding it
    ///
    /// Returns false for a stale ticket, leaving the slot untouched.
    pub fn release(&mut self, ticket: Ticket) -> bool {
        if self.holds(ticket) {
            self.slot = None;
            true
        } else {
            false
        }
    }

    /// Drop the outstanding ticket, if any
    pub fn cancel(&mut self) {
        self.slot = None;
    }

    pub fn is_busy(&self) -> bool {
        self.slot.is_some()
    }

    /// Whether `ticket` is the outstanding one
    pub fn holds(&self, ticket: Ticket) -> bool {
        self.slot == Some(ticket)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slot() {
        let mut guard = InFlightGuard::new();
        let first = guard.try_acquire().unwrap();

        // A second acquire while busy is refused
        assert!(guard.try_acquire().is_none());
        assert!(guard.is_busy());
        assert!(guard.holds(first));

        assert!(guard.release(first));
        assert!(!guard.is_busy());

        let second = guard.try_acquire().unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_stale_release_is_ignored() {
        let mut guard = InFlightGuard::new();
        let old = guard.try_acquire().unwrap();
        let new = guard.supersede();

        assert!(!guard.release(old));
        assert!(guard.holds(new));
        assert!(guard.release(new));
    }

    #[test]
    fn test_cancel_makes_ticket_stale() {
        let mut guard = InFlightGuard::new();
        let ticket = guard.try_acquire().unwrap();
        guard.cancel();

        assert!(!guard.is_busy());
        assert!(!guard.release(ticket));
    }

    #[test]
    fn test_tickets_unique_across_guards() {
        let mut a = InFlightGuard::new();
        let mut b = InFlightGuard::new();
        let ta = a.try_acquire().unwrap();
        let tb = b.try_acquire().unwrap();

        assert_ne!(ta, tb);
        assert!(!b.release(ta));
    }
}
