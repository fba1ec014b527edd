//! Bridge between the event channel and the application state.
//!
//! Consumes channel notifications in arrival order, applies each
//! session snapshot as a whole, and forwards derived UI events to the
//! presentation layer. This is the only writer of session state.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use rencontre_net::ChannelNotification;
use rencontre_shared::protocol::ServerEvent;
use rencontre_shared::types::Session;

use crate::api::BlindDateApi;
use crate::events::{emit_ui, UiEvent};
use crate::session::{cancel_reason, derive_view, ViewState};
use crate::state::{AppState, ChannelStatus, SessionState};

/// Spawn the notification processing loop.
///
/// Marks the channel connected; the bridge is wired to a freshly
/// spawned channel, and it flips the status back on disconnect.
/// `api` carries the usage-recording collaborator; recording is
/// fire-and-forget and never blocks session entry.
pub fn spawn_bridge(
    state: Arc<Mutex<AppState>>,
    mut notif_rx: mpsc::Receiver<ChannelNotification>,
    ui_tx: mpsc::Sender<UiEvent>,
    api: Option<BlindDateApi>,
) -> tokio::task::JoinHandle<()> {
    if let Ok(mut guard) = state.lock() {
        guard.channel = ChannelStatus::Connected;
    }

    tokio::spawn(async move {
        info!("Session bridge started");

        while let Some(notification) = notif_rx.recv().await {
            match notification {
                ChannelNotification::Event(ServerEvent::MatchFound(session)) => {
                    on_match_found(&state, &ui_tx, api.as_ref(), session);
                }

                ChannelNotification::Event(ServerEvent::SessionUpdate(session)) => {
                    on_session_update(&state, &ui_tx, session);
                }

                ChannelNotification::Event(ServerEvent::SessionCancelled) => {
                    on_session_cancelled(&state, &ui_tx);
                }

                ChannelNotification::Disconnected => {
                    on_disconnected(&state, &ui_tx);
                    break;
                }
            }
        }

        info!("Session bridge terminated");
    })
}

fn on_match_found(
    state: &Arc<Mutex<AppState>>,
    ui_tx: &mpsc::Sender<UiEvent>,
    api: Option<&BlindDateApi>,
    session: Session,
) {
    let view = {
        let Ok(mut guard) = state.lock() else { return };
        guard.search = None;

        let Some(role) = guard
            .profile
            .as_ref()
            .and_then(|p| session.role_of(&p.user_id))
        else {
            warn!(session = %session.id, "Match for a session we are not part of, ignoring");
            return;
        };

        let session_state = SessionState::new(session, role);
        let view = derive_view(&session_state.snapshot, role, &session_state.pending);
        guard.session = Some(session_state);
        view
    };

    // Usage recording must not gate session entry.
    if let Some(api) = api {
        let api = api.clone();
        tokio::spawn(async move {
            if let Err(e) = api.record_usage().await {
                warn!(error = %e, "Failed to record blind-date usage");
            }
        });
    }

    info!("Match found, session started");
    emit_ui(ui_tx, UiEvent::MatchFound { view });
}

fn on_session_update(
    state: &Arc<Mutex<AppState>>,
    ui_tx: &mpsc::Sender<UiEvent>,
    session: Session,
) {
    let view = {
        let Ok(mut guard) = state.lock() else { return };

        match guard.session.as_mut() {
            Some(existing) => {
                existing.replace(session);
                derive_view(&existing.snapshot, existing.role, &existing.pending)
            }
            None => {
                // Update arriving before (or without) match_found, e.g.
                // after the server re-pushed state. Adopt it whole.
                let Some(role) = guard
                    .profile
                    .as_ref()
                    .and_then(|p| session.role_of(&p.user_id))
                else {
                    debug!(session = %session.id, "Update for a foreign session, ignoring");
                    return;
                };
                let session_state = SessionState::new(session, role);
                let view = derive_view(&session_state.snapshot, role, &session_state.pending);
                guard.session = Some(session_state);
                view
            }
        }
    };

    match view {
        ViewState::Completed {
            partner,
            match_percentage,
        } => {
            if let Ok(mut guard) = state.lock() {
                guard.session = None;
            }
            info!(match_percentage, "Session completed, identities revealed");
            emit_ui(
                ui_tx,
                UiEvent::SessionCompleted {
                    partner,
                    match_percentage,
                },
            );
        }
        ViewState::Cancelled { reason } => {
            if let Ok(mut guard) = state.lock() {
                guard.session = None;
            }
            info!(reason = ?reason, "Session cancelled");
            emit_ui(ui_tx, UiEvent::SessionEnded { reason });
        }
        view => emit_ui(ui_tx, UiEvent::SessionUpdated { view }),
    }
}

fn on_session_cancelled(state: &Arc<Mutex<AppState>>, ui_tx: &mpsc::Sender<UiEvent>) {
    let reason = {
        let Ok(mut guard) = state.lock() else { return };
        match guard.session.take() {
            Some(s) => cancel_reason(&s.snapshot, s.role),
            None => {
                debug!("Cancel event without a session, ignoring");
                return;
            }
        }
    };

    info!(reason = ?reason, "Session cancelled by server");
    emit_ui(ui_tx, UiEvent::SessionEnded { reason });
}

/// An unexpected channel closure during a live session is equivalent to
/// a cancelled status with reason disconnected.
fn on_disconnected(state: &Arc<Mutex<AppState>>, ui_tx: &mpsc::Sender<UiEvent>) {
    let ended = {
        let Ok(mut guard) = state.lock() else { return };
        guard.channel = ChannelStatus::Disconnected;
        guard.search = None;

        guard.session.take().and_then(|s| {
            if s.snapshot.status.is_terminal() {
                None
            } else {
                Some(cancel_reason(&s.snapshot, s.role))
            }
        })
    };

    warn!("Event channel lost");
    if let Some(reason) = ended {
        emit_ui(ui_tx, UiEvent::SessionEnded { reason });
    }
    emit_ui(ui_tx, UiEvent::ChannelLost);
}
