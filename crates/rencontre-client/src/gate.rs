//! Access gate: daily-usage limit and cooldown precondition for the
//! match queue.
//!
//! The server is authoritative; the gate only mirrors the last fetched
//! status. The cooldown countdown is advisory — when it reaches zero
//! the owner re-checks with the server instead of assuming unlock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::BlindDateApi;
use crate::events::{emit_ui, UiEvent};
use crate::state::AppState;

/// Why the gate denies a queue join.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    LimitReached,
    Cooldown,
}

/// Usage/cooldown status as returned by the status endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GateStatus {
    pub is_allowed: bool,
    pub reason: Option<GateReason>,
    pub next_available_time: Option<DateTime<Utc>>,
}

impl GateStatus {
    /// Decide locally whether a queue join may proceed.
    pub fn check(&self) -> Result<(), GateReason> {
        if self.is_allowed {
            Ok(())
        } else {
            Err(self.reason.unwrap_or(GateReason::LimitReached))
        }
    }

    /// Remaining cooldown formatted for display, or `None` when the
    /// gate is not in a cooldown window.
    pub fn countdown(&self, now: DateTime<Utc>) -> Option<String> {
        if self.reason != Some(GateReason::Cooldown) {
            return None;
        }
        let until = self.next_available_time?;
        Some(format_countdown((until - now).num_seconds()))
    }

    /// Whether the advisory clock has run out. Triggers a re-check,
    /// never a local unlock.
    pub fn cooldown_expired(&self, now: DateTime<Utc>) -> bool {
        match (self.reason, self.next_available_time) {
            (Some(GateReason::Cooldown), Some(until)) => now >= until,
            _ => false,
        }
    }
}

/// `3661s -> "1h 1m 1s"`. Negative remainders clamp to zero.
pub fn format_countdown(total_secs: i64) -> String {
    let secs = total_secs.max(0);
    format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Fetch the gate status and cache it in state.
pub async fn refresh_gate_status(
    state: &Arc<Mutex<AppState>>,
    api: &BlindDateApi,
) -> Option<GateStatus> {
    match api.fetch_gate_status().await {
        Ok(status) => {
            if let Ok(mut guard) = state.lock() {
                guard.gate = Some(status.clone());
            }
            Some(status)
        }
        Err(e) => {
            warn!(error = %e, "Failed to fetch gate status");
            None
        }
    }
}

/// Tick the cooldown countdown once per second while it is active.
///
/// Emits `CooldownTick` with the formatted remainder, then
/// `GateRecheckNeeded` once the clock runs out, and returns. Returns
/// immediately if the cached gate is not in cooldown.
pub async fn run_cooldown_ticker(state: Arc<Mutex<AppState>>, ui_tx: mpsc::Sender<UiEvent>) {
    let mut interval = tokio::time::interval(Duration::from_secs(1));

    loop {
        interval.tick().await;
        let now = Utc::now();

        let gate = match state.lock() {
            Ok(guard) => guard.gate.clone(),
            Err(_) => return,
        };
        let Some(gate) = gate else { return };

        let Some(display) = gate.countdown(now) else {
            debug!("Gate no longer in cooldown, ticker stopping");
            return;
        };

        if gate.cooldown_expired(now) {
            emit_ui(&ui_tx, UiEvent::CooldownTick { display: format_countdown(0) });
            emit_ui(&ui_tx, UiEvent::GateRecheckNeeded);
            return;
        }

        emit_ui(&ui_tx, UiEvent::CooldownTick { display });
    }
}
