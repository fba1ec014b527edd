//! Events forwarded to the presentation layer.
//!
//! The core never renders anything; it pushes [`UiEvent`]s over an mpsc
//! and lets the frontend react.

use tokio::sync::mpsc;

use rencontre_shared::types::Participant;

use crate::gate::GateReason;
use crate::session::{CancelReason, ViewState};

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// A queue join was blocked by the gate; the frontend shows the
    /// upsell prompt.
    UpsellPrompt { reason: GateReason },
    /// One second of cooldown elapsed.
    CooldownTick { display: String },
    /// The advisory cooldown clock ran out; re-fetch the gate status.
    GateRecheckNeeded,
    /// Queue join emitted, now searching.
    SearchStarted,
    /// Local cancel cleared the searching state.
    SearchCancelled,
    /// A partner was found; the session begins.
    MatchFound { view: ViewState },
    /// A new snapshot arrived; re-render from the derived view.
    SessionUpdated { view: ViewState },
    /// Both participants agreed to reveal.
    SessionCompleted {
        partner: Participant,
        match_percentage: u8,
    },
    /// The session ended without a reveal.
    SessionEnded { reason: CancelReason },
    /// The event channel dropped.
    ChannelLost,
}

pub fn emit_ui(tx: &mpsc::Sender<UiEvent>, event: UiEvent) {
    if let Err(e) = tx.try_send(event) {
        tracing::error!(error = %e, "Failed to emit UI event");
    }
}
