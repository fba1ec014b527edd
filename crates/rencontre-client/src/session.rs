//! Session state machine.
//!
//! Maps the latest authoritative snapshot plus the local pending
//! overlay onto exactly one view state, each with its own permitted
//! action set. Pure derivation: nothing here advances the session,
//! and no local flag ever survives the next snapshot.

use rencontre_shared::constants::{CHAT_MESSAGE_CAP, STAGE_CHAT, STAGE_ROUND_ONE, STAGE_ROUND_TWO};
use rencontre_shared::score;
use rencontre_shared::types::{
    Participant, Question, RevealDecision, Role, Session, SessionStatus,
};

use crate::consensus::{self, Consensus};
use crate::state::Pending;

/// Why a session ended without a reveal. `PartnerRejected` is strictly
/// tied to an explicit `no` from the counterpart; every other loss path
/// is `Disconnected`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    PartnerRejected,
    Disconnected,
}

/// The single active view, derived from the snapshot.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState {
    /// Only permitted action: confirm readiness (once).
    Instructions { confirmed: bool },
    /// A question round; answering is allowed while `answered` is false.
    Question {
        stage: u8,
        index: usize,
        question: Question,
        my_answer: Option<usize>,
        answered: bool,
    },
    /// End of a question round; continue acknowledges the results.
    RoundResults {
        completed_round: u8,
        score: u8,
        acknowledged: bool,
    },
    /// Stage-3 chat with the remaining message allowance.
    Chat { remaining: usize },
    /// Chat allowance exhausted or readiness already signalled;
    /// `waiting` forbids re-emitting the readiness action.
    ReadyForReveal { waiting: bool },
    /// Bilateral reveal decision in progress. `waiting` forbids
    /// re-deciding; `consensus` is where the pair currently stands.
    Reveal {
        my_decision: RevealDecision,
        partner_decision: RevealDecision,
        waiting: bool,
        consensus: Consensus,
    },
    /// Terminal: identities disclosed.
    Completed {
        partner: Participant,
        match_percentage: u8,
    },
    /// Terminal: no reveal.
    Cancelled { reason: CancelReason },
}

/// Derive the view for the local role from a snapshot and the local
/// overlay.
pub fn derive_view(session: &Session, role: Role, pending: &Pending) -> ViewState {
    match session.status {
        SessionStatus::Instructions => ViewState::Instructions {
            confirmed: pending.instructions_confirmed,
        },

        SessionStatus::Active => match session.current_stage {
            s @ (STAGE_ROUND_ONE | STAGE_ROUND_TWO) => match session.current_question() {
                Some(pair) => {
                    let my_answer = pair.answer_of(role);
                    ViewState::Question {
                        stage: s,
                        index: session.current_question_index,
                        question: pair.question.clone(),
                        my_answer,
                        answered: my_answer.is_some() || pending.answer_submitted,
                    }
                }
                // Question index past the round; nothing to answer, wait
                // for the server to advance.
                None => round_results(session, s, pending),
            },
            STAGE_CHAT => chat_view(session, role, pending),
            _ => reveal_view(session, role),
        },

        SessionStatus::WaitingForStage2 => round_results(session, 1, pending),
        SessionStatus::WaitingForStage3 => round_results(session, 2, pending),

        SessionStatus::WaitingForReveal => reveal_view(session, role),

        SessionStatus::Completed => ViewState::Completed {
            partner: session.partner_of(role).clone(),
            match_percentage: session
                .match_percentage
                .unwrap_or_else(|| score::match_percentage(&session.questions)),
        },

        SessionStatus::Cancelled => ViewState::Cancelled {
            reason: cancel_reason(session, role),
        },
    }
}

fn round_results(session: &Session, round: u8, pending: &Pending) -> ViewState {
    ViewState::RoundResults {
        completed_round: round,
        score: score::match_percentage(score::through_round(&session.questions, round)),
        acknowledged: pending.advance_requested,
    }
}

fn chat_view(session: &Session, role: Role, pending: &Pending) -> ViewState {
    let ready = session.stage_progress.ready_of(role) || pending.ready_signalled;
    let sent = session.sent_count(role);

    if ready {
        ViewState::ReadyForReveal { waiting: true }
    } else if sent >= CHAT_MESSAGE_CAP {
        ViewState::ReadyForReveal { waiting: false }
    } else {
        ViewState::Chat {
            remaining: CHAT_MESSAGE_CAP - sent,
        }
    }
}

fn reveal_view(session: &Session, role: Role) -> ViewState {
    let (mine, partner) = consensus::decisions_of(session, role);
    ViewState::Reveal {
        my_decision: mine,
        partner_decision: partner,
        waiting: consensus::is_waiting(mine),
        consensus: consensus::consensus(mine, partner),
    }
}

/// Attribute a cancellation: an explicit partner `no` means rejection,
/// anything else means the session was lost.
pub fn cancel_reason(session: &Session, role: Role) -> CancelReason {
    if session.decision_of(role.other()) == RevealDecision::No {
        CancelReason::PartnerRejected
    } else {
        CancelReason::Disconnected
    }
}
