//! Reveal consensus read-model.
//!
//! The server enforces the resolution policy; this mirrors it so the
//! client can render the right waiting/terminal state between
//! snapshots.

use rencontre_shared::types::{RevealDecision, Role, Session};

/// Where the bilateral reveal decision currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consensus {
    /// Neither side has decided.
    Pending,
    /// Exactly one side decided; the session waits indefinitely for
    /// the other.
    Converging,
    /// Both said yes.
    Accepted,
    /// At least one said no.
    Rejected,
}

pub fn consensus(mine: RevealDecision, partner: RevealDecision) -> Consensus {
    use RevealDecision::*;
    match (mine, partner) {
        (No, _) | (_, No) => Consensus::Rejected,
        (Yes, Yes) => Consensus::Accepted,
        (Pending, Pending) => Consensus::Pending,
        _ => Consensus::Converging,
    }
}

/// A participant waits once their own decision is in.
pub fn is_waiting(mine: RevealDecision) -> bool {
    mine != RevealDecision::Pending
}

/// Both decisions from the local role's point of view.
pub fn decisions_of(session: &Session, role: Role) -> (RevealDecision, RevealDecision) {
    (session.decision_of(role), session.decision_of(role.other()))
}
