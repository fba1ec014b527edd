//! The one-shot reveal decision.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use rencontre_net::ChannelHandle;
use rencontre_shared::constants::STAGE_REVEAL;
use rencontre_shared::protocol::{ClientEvent, RevealChoice};
use rencontre_shared::types::{RevealDecision, SessionStatus};

use crate::state::AppState;

/// Submit the reveal decision. Not retractable: a no-op once the local
/// role's decision is anything but pending, locally or in the snapshot.
pub fn decide(state: &Arc<Mutex<AppState>>, channel: &ChannelHandle, choice: RevealChoice) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_mut() else {
        debug!("Reveal decision ignored: no session");
        return false;
    };

    let at_reveal = session.snapshot.status == SessionStatus::WaitingForReveal
        || (session.snapshot.status == SessionStatus::Active
            && session.snapshot.current_stage == STAGE_REVEAL);
    if !at_reveal {
        debug!("Reveal decision ignored: not at the reveal stage");
        return false;
    }

    if session.snapshot.decision_of(session.role) != RevealDecision::Pending
        || session.pending.reveal_decided
    {
        debug!("Reveal decision ignored: already decided");
        return false;
    }

    session.pending.reveal_decided = true;
    let session_id = session.snapshot.id.clone();
    drop(guard);

    channel.emit(ClientEvent::SubmitRevealDecision {
        session_id,
        decision: choice,
    });
    info!(choice = ?choice, "Reveal decision submitted");
    true
}
