//! Per-session state

use serde::{Deserialize, Serialize};

/// State kept for one login session.
///
/// Handlers load it from the session store, pass it into the operation that
/// needs it, and persist the value the operation returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub num_visits: u64,
}

impl SessionState {
    /// Count a visit, returning the number of visits before this one
    /// and the updated state.
    pub fn record_visit(self) -> (u64, SessionState) {
        let previous = self.num_visits;
        (
            previous,
            SessionState {
                num_visits: previous.saturating_add(1),
            },
        )
    }
}
