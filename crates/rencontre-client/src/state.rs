//! Application state shared across all client actions.
//!
//! [`AppState`] is wrapped in `Arc<Mutex<>>` so that the notification
//! bridge and the action layer see the same snapshot. The session
//! snapshot is replaced atomically as a whole on every server push;
//! nothing merges partial updates.

use chrono::{DateTime, Utc};

use rencontre_shared::protocol::MatchCriteria;
use rencontre_shared::types::{Role, Session, UserId};

use crate::gate::GateStatus;

/// The local user's profile, from which queue criteria are derived.
#[derive(Debug, Clone)]
pub struct LocalProfile {
    pub user_id: UserId,
    pub age: u8,
    pub gender: String,
    pub looking_for: String,
    pub location: String,
}

impl LocalProfile {
    pub fn criteria(&self) -> MatchCriteria {
        MatchCriteria {
            age: self.age,
            gender: self.gender.clone(),
            looking_for: self.looking_for.clone(),
            location: self.location.clone(),
        }
    }
}

/// Whether the event channel is currently up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    Connected,
    Disconnected,
}

/// Local-only overlay of actions already emitted but not yet echoed
/// back in a snapshot. Prevents duplicate emissions from rapid repeated
/// input; cleared unconditionally whenever a new snapshot arrives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pending {
    pub instructions_confirmed: bool,
    pub answer_submitted: bool,
    pub advance_requested: bool,
    pub ready_signalled: bool,
    pub reveal_decided: bool,
}

impl Pending {
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// The current session snapshot plus the local role and overlay.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub snapshot: Session,
    pub role: Role,
    pub pending: Pending,
}

impl SessionState {
    pub fn new(snapshot: Session, role: Role) -> Self {
        Self {
            snapshot,
            role,
            pending: Pending::default(),
        }
    }

    /// Replace the snapshot wholesale and drop the overlay.
    pub fn replace(&mut self, snapshot: Session) {
        self.snapshot = snapshot;
        self.pending.clear();
    }
}

/// Queue-searching state; the elapsed counter is display-only and has
/// no bearing on server-side timeout.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub started_at: DateTime<Utc>,
}

impl SearchState {
    pub fn begin() -> Self {
        Self {
            started_at: Utc::now(),
        }
    }

    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> i64 {
        (now - self.started_at).num_seconds().max(0)
    }
}

/// Central client state.
pub struct AppState {
    /// Local user profile. `None` until the account layer provides it.
    pub profile: Option<LocalProfile>,

    /// Event channel liveness, updated by the bridge.
    pub channel: ChannelStatus,

    /// Cached gate status from the last server check.
    pub gate: Option<GateStatus>,

    /// Present while waiting in the match queue.
    pub search: Option<SearchState>,

    /// The live session, if any.
    pub session: Option<SessionState>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            profile: None,
            channel: ChannelStatus::Disconnected,
            gate: None,
            search: None,
            session: None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_pending_clears_wholesale() {
        let mut pending = Pending {
            instructions_confirmed: true,
            answer_submitted: true,
            advance_requested: false,
            ready_signalled: true,
            reveal_decided: false,
        };
        pending.clear();
        assert_eq!(pending, Pending::default());
    }

    #[test]
    fn test_elapsed_never_negative() {
        let search = SearchState::begin();
        let before = search.started_at - Duration::seconds(5);
        assert_eq!(search.elapsed_secs(before), 0);
        let later = search.started_at + Duration::seconds(42);
        assert_eq!(search.elapsed_secs(later), 42);
    }

    #[test]
    fn test_criteria_derived_from_profile() {
        let profile = LocalProfile {
            user_id: UserId::new("u-1"),
            age: 29,
            gender: "f".into(),
            looking_for: "m".into(),
            location: "Nantes".into(),
        };
        let criteria = profile.criteria();
        assert_eq!(criteria.age, 29);
        assert_eq!(criteria.looking_for, "m");
    }
}
