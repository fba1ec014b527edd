//! Stage progression actions: instructions confirm, round-results
//! continue, and stage-3 readiness for the reveal.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use rencontre_net::ChannelHandle;
use rencontre_shared::constants::STAGE_CHAT;
use rencontre_shared::protocol::ClientEvent;
use rencontre_shared::types::SessionStatus;

use crate::state::AppState;

/// Confirm the instructions screen. Idempotent: emits once, then the
/// overlay suppresses repeats until the server echoes the new status.
pub fn confirm_instructions(state: &Arc<Mutex<AppState>>, channel: &ChannelHandle) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_mut() else {
        debug!("Confirm ignored: no session");
        return false;
    };

    if session.snapshot.status != SessionStatus::Instructions {
        debug!("Confirm ignored: not on instructions");
        return false;
    }

    if session.pending.instructions_confirmed {
        debug!("Confirm ignored: already confirmed");
        return false;
    }

    session.pending.instructions_confirmed = true;
    let session_id = session.snapshot.id.clone();
    drop(guard);

    channel.emit(ClientEvent::ConfirmInstructions { session_id });
    info!("Instructions confirmed");
    true
}

/// Acknowledge round results and request the next stage.
pub fn acknowledge_round(state: &Arc<Mutex<AppState>>, channel: &ChannelHandle) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_mut() else {
        debug!("Advance ignored: no session");
        return false;
    };

    if !matches!(
        session.snapshot.status,
        SessionStatus::WaitingForStage2 | SessionStatus::WaitingForStage3
    ) {
        debug!("Advance ignored: no round results pending");
        return false;
    }

    if session.pending.advance_requested {
        debug!("Advance ignored: already requested");
        return false;
    }

    session.pending.advance_requested = true;
    let session_id = session.snapshot.id.clone();
    drop(guard);

    channel.emit(ClientEvent::ProceedToNextStage { session_id });
    info!("Requested next stage");
    true
}

/// Signal readiness to leave the chat stage for the reveal decision.
/// Forbidden once the local ready flag (or its overlay) is set.
pub fn signal_ready_for_reveal(state: &Arc<Mutex<AppState>>, channel: &ChannelHandle) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_mut() else {
        debug!("Ready signal ignored: no session");
        return false;
    };

    if session.snapshot.status != SessionStatus::Active
        || session.snapshot.current_stage != STAGE_CHAT
    {
        debug!("Ready signal ignored: not in chat stage");
        return false;
    }

    if session.snapshot.stage_progress.ready_of(session.role) || session.pending.ready_signalled {
        debug!("Ready signal ignored: already signalled");
        return false;
    }

    session.pending.ready_signalled = true;
    let session_id = session.snapshot.id.clone();
    drop(guard);

    channel.emit(ClientEvent::ProceedToNextStage { session_id });
    info!("Ready for reveal signalled");
    true
}
