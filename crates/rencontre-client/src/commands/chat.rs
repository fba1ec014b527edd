//! Stage-3 chat with the per-participant message cap.
//!
//! Sent messages are never appended locally; the authoritative echo in
//! the next snapshot renders them, which rules out duplicate and
//! out-of-order display.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use rencontre_net::ChannelHandle;
use rencontre_shared::constants::CHAT_MESSAGE_CAP;
use rencontre_shared::protocol::ClientEvent;
use rencontre_shared::types::{Role, Session, SessionStatus};

use crate::state::AppState;

/// Messages the given role may still send in stage 3.
pub fn remaining(session: &Session, role: Role) -> usize {
    CHAT_MESSAGE_CAP.saturating_sub(session.sent_count(role))
}

pub fn can_send(session: &Session, role: Role) -> bool {
    session.in_chat_stage() && remaining(session, role) > 0
}

/// Send a chat message. Trims the text; empty or over-cap sends are
/// suppressed without emission. Returns whether an emission happened.
pub fn send_message(state: &Arc<Mutex<AppState>>, channel: &ChannelHandle, text: &str) -> bool {
    let text = text.trim();
    if text.is_empty() {
        debug!("Message ignored: empty after trim");
        return false;
    }

    let Ok(guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_ref() else {
        debug!("Message ignored: no session");
        return false;
    };

    if session.snapshot.status != SessionStatus::Active {
        debug!("Message ignored: session not active");
        return false;
    }

    if !can_send(&session.snapshot, session.role) {
        debug!("Message ignored: cap reached or not in chat stage");
        return false;
    }

    let session_id = session.snapshot.id.clone();
    let text = text.to_string();
    drop(guard);

    channel.emit(ClientEvent::SendBlindMessage { session_id, text });
    info!("Chat message sent");
    true
}
