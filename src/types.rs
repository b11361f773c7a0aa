//! Shared types used across the codebase

use serde::Serialize;

use crate::api::ApiResult;

/// Lifecycle of one asynchronous operation as the UI sees it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "lowercase")]
pub enum RequestState<T> {
    Idle,
    Pending,
    Succeeded(T),
    Failed(String),
}

impl<T> RequestState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, RequestState::Pending)
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            RequestState::Succeeded(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

impl<T> From<ApiResult<T>> for RequestState<T> {
    fn from(result: ApiResult<T>) -> Self {
        let message = result.error_message().to_string();
        match (result.ok, result.data) {
            (true, Some(data)) => RequestState::Succeeded(data),
            _ => RequestState::Failed(message),
        }
    }
}

/// Handle for one issued call of a [`Tracked`] operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

/// Request state for an operation that may be issued repeatedly.
///
/// Calls are never cancelled. Whichever call resolves last overwrites the
/// state, even if a newer call was issued after it (last-resolved-wins).
#[derive(Debug, Clone)]
pub struct Tracked<T> {
    state: RequestState<T>,
    issued: u64,
    in_flight: usize,
    applied: Option<Ticket>,
}

impl<T> Default for Tracked<T> {
    fn default() -> Self {
        Self {
            state: RequestState::Idle,
            issued: 0,
            in_flight: 0,
            applied: None,
        }
    }
}

impl<T> Tracked<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a newly issued call; the state is pending until some call resolves
    pub fn begin(&mut self) -> Ticket {
        self.issued += 1;
        self.in_flight += 1;
        self.state = RequestState::Pending;
        Ticket(self.issued)
    }

    /// Apply the result of a call; returns true if a newer call had
    /// already been issued (the applied result is stale)
    pub fn resolve(&mut self, ticket: Ticket, result: ApiResult<T>) -> bool {
        self.in_flight = self.in_flight.saturating_sub(1);
        let superseded = ticket.0 < self.issued;
        if superseded {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.issued,
                "applying result of a superseded call"
            );
        }
        self.state = result.into();
        self.applied = Some(ticket);
        superseded
    }

    pub fn state(&self) -> &RequestState<T> {
        &self.state
    }

    /// True while any issued call has not resolved yet
    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Ticket whose result the state currently reflects
    pub fn applied(&self) -> Option<Ticket> {
        self.applied
    }

    pub fn latest(&self) -> Option<Ticket> {
        (self.issued > 0).then_some(Ticket(self.issued))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_call_moves_through_pending_to_success() {
        let mut op: Tracked<u32> = Tracked::new();
        assert_eq!(op.state(), &RequestState::Idle);

        let ticket = op.begin();
        assert!(op.state().is_pending());
        assert!(op.is_loading());

        assert!(!op.resolve(ticket, ApiResult::success(7)));
        assert_eq!(op.state().value(), Some(&7));
        assert!(!op.is_loading());
    }

    #[test]
    fn last_resolved_wins_even_when_it_was_issued_first() {
        let mut op: Tracked<&str> = Tracked::new();
        let first = op.begin();
        let second = op.begin();

        assert!(!op.resolve(second, ApiResult::success("fresh")));
        assert!(op.is_loading(), "first call still in flight");

        let stale = op.resolve(first, ApiResult::success("stale"));
        assert!(stale);
        assert_eq!(op.state().value(), Some(&"stale"));
        assert_eq!(op.applied(), Some(first));
        assert_eq!(op.latest(), Some(second));
    }

    #[test]
    fn failure_keeps_server_message() {
        let mut op: Tracked<()> = Tracked::new();
        let ticket = op.begin();
        op.resolve(ticket, ApiResult::failure(Some(500), "Failed to search venues"));
        assert_eq!(op.state().error(), Some("Failed to search venues"));
    }

    #[test]
    fn reissue_goes_back_to_pending() {
        let mut op: Tracked<u32> = Tracked::new();
        let first = op.begin();
        op.resolve(first, ApiResult::success(1));

        let second = op.begin();
        assert!(op.state().is_pending());
        assert!(op.is_loading());
        assert_eq!(op.applied(), Some(first));

        op.resolve(second, ApiResult::success(2));
        assert_eq!(op.state().value(), Some(&2));
    }
}
