//! Answer submission guard.
//!
//! One answer per role per question, forever. The emission disables
//! further submission immediately (before any acknowledgment) to shut
//! out double-click races; the next snapshot supersedes the overlay
//! either way.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use rencontre_net::ChannelHandle;
use rencontre_shared::constants::{STAGE_ROUND_ONE, STAGE_ROUND_TWO};
use rencontre_shared::protocol::ClientEvent;
use rencontre_shared::types::SessionStatus;

use crate::state::AppState;

/// Submit the chosen option index for the current question. Returns
/// whether an emission happened.
pub fn submit_answer(
    state: &Arc<Mutex<AppState>>,
    channel: &ChannelHandle,
    choice_index: usize,
) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    let Some(session) = guard.session.as_mut() else {
        debug!("Answer ignored: no session");
        return false;
    };

    if session.snapshot.status != SessionStatus::Active
        || !matches!(
            session.snapshot.current_stage,
            STAGE_ROUND_ONE | STAGE_ROUND_TWO
        )
    {
        debug!("Answer ignored: not in a question round");
        return false;
    }

    let Some(pair) = session.snapshot.current_question() else {
        debug!("Answer ignored: no current question");
        return false;
    };

    if pair.answer_of(session.role).is_some() || session.pending.answer_submitted {
        debug!("Answer ignored: already answered this question");
        return false;
    }

    if choice_index >= pair.question.options.len() {
        debug!(choice_index, "Answer ignored: option index out of range");
        return false;
    }

    session.pending.answer_submitted = true;
    let session_id = session.snapshot.id.clone();
    let question_index = session.snapshot.current_question_index;
    drop(guard);

    channel.emit(ClientEvent::SubmitBlindAnswer {
        session_id,
        choice_index,
    });
    info!(question_index, choice_index, "Answer submitted");
    true
}
