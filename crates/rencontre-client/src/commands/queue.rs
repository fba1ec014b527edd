//! Match queue join/cancel.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tracing::{debug, info};

use rencontre_net::ChannelHandle;
use rencontre_shared::protocol::ClientEvent;

use crate::events::{emit_ui, UiEvent};
use crate::state::{AppState, ChannelStatus, SearchState};

/// Join the blind-date queue with criteria derived from the local
/// profile.
///
/// No-op when the channel is down, the gate denies (which surfaces the
/// upsell prompt), no profile is loaded, or a search is already
/// running. Returns whether the join was emitted.
pub fn join(
    state: &Arc<Mutex<AppState>>,
    channel: &ChannelHandle,
    ui_tx: &mpsc::Sender<UiEvent>,
) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    if guard.channel != ChannelStatus::Connected || !channel.is_open() {
        debug!("Queue join ignored: channel not connected");
        return false;
    }

    if guard.search.is_some() {
        debug!("Queue join ignored: already searching");
        return false;
    }

    if guard.session.is_some() {
        debug!("Queue join ignored: session in progress");
        return false;
    }

    match guard.gate.as_ref() {
        Some(gate) => {
            if let Err(reason) = gate.check() {
                info!(reason = ?reason, "Queue join blocked by gate");
                emit_ui(ui_tx, UiEvent::UpsellPrompt { reason });
                return false;
            }
        }
        None => {
            debug!("Queue join ignored: gate status not fetched yet");
            return false;
        }
    }

    let Some(criteria) = guard.profile.as_ref().map(|p| p.criteria()) else {
        debug!("Queue join ignored: no profile");
        return false;
    };

    guard.search = Some(SearchState::begin());
    drop(guard);

    channel.emit(ClientEvent::JoinBlindQueue { criteria });
    emit_ui(ui_tx, UiEvent::SearchStarted);
    info!("Joined blind-date queue");
    true
}

/// Leave the queue: clears the local searching state and sends a
/// best-effort leave notification.
pub fn cancel(
    state: &Arc<Mutex<AppState>>,
    channel: &ChannelHandle,
    ui_tx: &mpsc::Sender<UiEvent>,
) -> bool {
    let Ok(mut guard) = state.lock() else {
        return false;
    };

    if guard.search.take().is_none() {
        debug!("Queue cancel ignored: not searching");
        return false;
    }
    drop(guard);

    channel.emit(ClientEvent::LeaveBlindQueue);
    emit_ui(ui_tx, UiEvent::SearchCancelled);
    info!("Left blind-date queue");
    true
}
