//! Event channel task with the tokio mpsc command/notification pattern.
//!
//! The channel event loop runs in a dedicated tokio task. The rest of
//! the client communicates with it through typed command and
//! notification channels, keeping the wire layer fully asynchronous and
//! decoupled from session logic.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use rencontre_shared::constants::CHANNEL_BUFFER;
use rencontre_shared::protocol::{ClientEvent, ServerEvent};

/// Commands sent *into* the channel task.
#[derive(Debug)]
pub enum ChannelCommand {
    /// Emit an event to the server.
    Emit(ClientEvent),
    /// Gracefully close the channel.
    Shutdown,
}

/// Notifications sent *from* the channel task to the application.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelNotification {
    /// A server event arrived.
    Event(ServerEvent),
    /// The channel closed (EOF, read error, or write error). Emitted at
    /// most once, right before the task ends.
    Disconnected,
}

/// Cloneable sender half of the channel.
///
/// All emissions are fire-and-forget: `emit` never blocks and never
/// returns an error to the caller. A full buffer or a dead task is
/// logged and the event is dropped, to be corrected by the next
/// authoritative snapshot.
#[derive(Debug, Clone)]
pub struct ChannelHandle {
    tx: mpsc::Sender<ChannelCommand>,
}

impl ChannelHandle {
    pub fn emit(&self, event: ClientEvent) {
        if let Err(e) = self.tx.try_send(ChannelCommand::Emit(event)) {
            warn!(error = %e, "Dropped outbound event (channel unavailable)");
        }
    }

    pub fn shutdown(&self) {
        let _ = self.tx.try_send(ChannelCommand::Shutdown);
    }

    /// Whether the channel task is still alive.
    pub fn is_open(&self) -> bool {
        !self.tx.is_closed()
    }
}

/// Spawn the channel event loop over the given duplex stream.
///
/// Returns the command handle and the notification receiver. Frames are
/// newline-delimited JSON in both directions.
pub fn spawn_channel<S>(stream: S) -> (ChannelHandle, mpsc::Receiver<ChannelNotification>)
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (cmd_tx, mut cmd_rx) = mpsc::channel::<ChannelCommand>(CHANNEL_BUFFER);
    let (notif_tx, notif_rx) = mpsc::channel::<ChannelNotification>(CHANNEL_BUFFER);

    tokio::spawn(async move {
        let (reader, mut writer) = tokio::io::split(stream);
        let mut lines = BufReader::new(reader).lines();

        loop {
            tokio::select! {
                // --- Outbound commands ---
                cmd = cmd_rx.recv() => {
                    match cmd {
                        Some(ChannelCommand::Emit(event)) => {
                            let frame = match event.to_json() {
                                Ok(json) => json,
                                Err(e) => {
                                    error!(error = %e, "Failed to encode outbound event");
                                    continue;
                                }
                            };
                            debug!(frame = %frame, "Emitting event");
                            if let Err(e) = write_frame(&mut writer, &frame).await {
                                warn!(error = %e, "Write failed, channel lost");
                                let _ = notif_tx.send(ChannelNotification::Disconnected).await;
                                break;
                            }
                        }
                        Some(ChannelCommand::Shutdown) => {
                            info!("Channel shutdown requested");
                            break;
                        }
                        None => {
                            // All senders dropped
                            info!("Command channel closed, shutting down");
                            break;
                        }
                    }
                }

                // --- Inbound frames ---
                line = lines.next_line() => {
                    match line {
                        Ok(Some(frame)) => {
                            match ServerEvent::from_json(&frame) {
                                Ok(event) => {
                                    debug!(len = frame.len(), "Server event received");
                                    if notif_tx.send(ChannelNotification::Event(event)).await.is_err() {
                                        // Receiver gone, nothing left to serve.
                                        break;
                                    }
                                }
                                Err(e) => {
                                    warn!(error = %e, "Ignoring undecodable server frame");
                                }
                            }
                        }
                        Ok(None) => {
                            info!("Server closed the channel");
                            let _ = notif_tx.send(ChannelNotification::Disconnected).await;
                            break;
                        }
                        Err(e) => {
                            warn!(error = %e, "Channel read error");
                            let _ = notif_tx.send(ChannelNotification::Disconnected).await;
                            break;
                        }
                    }
                }
            }
        }

        info!("Channel event loop terminated");
    });

    (ChannelHandle { tx: cmd_tx }, notif_rx)
}

async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, frame: &str) -> std::io::Result<()> {
    writer.write_all(frame.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

    use rencontre_shared::protocol::MatchCriteria;
    use rencontre_shared::types::SessionId;

    fn criteria() -> MatchCriteria {
        MatchCriteria {
            age: 28,
            gender: "m".into(),
            looking_for: "f".into(),
            location: "Lyon".into(),
        }
    }

    #[tokio::test]
    async fn test_emit_writes_one_json_frame() {
        let (near, far) = tokio::io::duplex(4096);
        let (handle, _notif_rx) = spawn_channel(near);

        handle.emit(ClientEvent::JoinBlindQueue { criteria: criteria() });

        let (far_read, _far_write) = tokio::io::split(far);
        let mut lines = BufReader::new(far_read).lines();
        let frame = lines.next_line().await.unwrap().unwrap();
        let json: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(json["event"], "join_blind_queue");
        assert_eq!(json["data"]["criteria"]["location"], "Lyon");
    }

    #[tokio::test]
    async fn test_inbound_frame_becomes_notification() {
        let (near, far) = tokio::io::duplex(4096);
        let (_handle, mut notif_rx) = spawn_channel(near);

        let (_far_read, mut far_write) = tokio::io::split(far);
        let frame = ServerEvent::SessionCancelled.to_json().unwrap();
        far_write.write_all(frame.as_bytes()).await.unwrap();
        far_write.write_all(b"\n").await.unwrap();

        let notif = notif_rx.recv().await.unwrap();
        assert_eq!(notif, ChannelNotification::Event(ServerEvent::SessionCancelled));
    }

    #[tokio::test]
    async fn test_undecodable_frame_is_skipped() {
        let (near, far) = tokio::io::duplex(4096);
        let (_handle, mut notif_rx) = spawn_channel(near);

        let (_far_read, mut far_write) = tokio::io::split(far);
        far_write.write_all(b"not json\n").await.unwrap();
        let frame = ServerEvent::SessionCancelled.to_json().unwrap();
        far_write
            .write_all(format!("{frame}\n").as_bytes())
            .await
            .unwrap();

        // The bad frame is skipped; the next valid one still arrives.
        let notif = notif_rx.recv().await.unwrap();
        assert_eq!(notif, ChannelNotification::Event(ServerEvent::SessionCancelled));
    }

    #[tokio::test]
    async fn test_eof_emits_disconnected() {
        let (near, far) = tokio::io::duplex(4096);
        let (_handle, mut notif_rx) = spawn_channel(near);

        drop(far);

        let notif = notif_rx.recv().await.unwrap();
        assert_eq!(notif, ChannelNotification::Disconnected);
        assert!(notif_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_shutdown_stops_task() {
        let (near, _far) = tokio::io::duplex(4096);
        let (handle, mut notif_rx) = spawn_channel(near);

        handle.shutdown();
        assert!(notif_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_emit_after_shutdown_is_dropped_silently() {
        let (near, _far) = tokio::io::duplex(4096);
        let (handle, mut notif_rx) = spawn_channel(near);

        handle.shutdown();
        assert!(notif_rx.recv().await.is_none());

        // No panic, no error surfaced.
        handle.emit(ClientEvent::ConfirmInstructions {
            session_id: SessionId("s-1".into()),
        });
    }
}
