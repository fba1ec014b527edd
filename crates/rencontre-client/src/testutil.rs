//! Shared test fixtures for the client crate.

use std::time::Duration;

use chrono::Utc;
use tokio::io::{AsyncBufReadExt, BufReader, DuplexStream, Lines, ReadHalf, WriteHalf};
use tokio::sync::mpsc;

use rencontre_net::{spawn_channel, ChannelHandle, ChannelNotification};

use rencontre_shared::types::{
    ChatMessage, Participant, Question, QuestionPair, RevealDecision, Session, SessionId,
    SessionStatus, StageProgress, UserId,
};

use crate::state::{AppState, ChannelStatus, LocalProfile, SessionState};

pub fn participant(id: &str) -> Participant {
    Participant {
        id: UserId::new(id),
        name: id.to_uppercase(),
        age: 27,
        avatar: format!("{id}.png"),
    }
}

pub fn profile(id: &str) -> LocalProfile {
    LocalProfile {
        user_id: UserId::new(id),
        age: 27,
        gender: "f".into(),
        looking_for: "m".into(),
        location: "Paris".into(),
    }
}

pub fn pair(u1: Option<usize>, u2: Option<usize>) -> QuestionPair {
    QuestionPair {
        question: Question {
            text: "Montagne ou mer ?".into(),
            options: vec!["Montagne".into(), "Mer".into(), "Ville".into()],
        },
        u1_answer: u1,
        u2_answer: u2,
    }
}

pub fn message(sender: &str, text: &str) -> ChatMessage {
    ChatMessage {
        sender: UserId::new(sender),
        text: text.into(),
        timestamp: Utc::now(),
    }
}

/// Session between "alice" (first role) and "bob" (second role) with a
/// single round-one question where only alice has answered.
pub fn base_session(status: SessionStatus, stage: u8) -> Session {
    Session {
        id: SessionId("s-1".into()),
        status,
        current_stage: stage,
        current_question_index: 0,
        participants: [participant("alice"), participant("bob")],
        questions: vec![
            pair(Some(0), None),
            pair(None, None),
            pair(None, None),
            pair(None, None),
            pair(None, None),
        ],
        messages: vec![],
        stage_progress: StageProgress::default(),
        u1_reveal_decision: RevealDecision::Pending,
        u2_reveal_decision: RevealDecision::Pending,
        match_percentage: None,
    }
}

/// Two fully answered rounds: 4/5 matches in round one (80%), 6/10
/// cumulative (60%).
pub fn answered_session(status: SessionStatus) -> Session {
    let mut session = base_session(status, 2);
    session.questions = vec![
        // round one
        pair(Some(1), Some(1)),
        pair(Some(1), Some(1)),
        pair(Some(2), Some(2)),
        pair(Some(0), Some(0)),
        pair(Some(0), Some(2)),
        // round two
        pair(Some(0), Some(0)),
        pair(Some(1), Some(1)),
        pair(Some(0), Some(1)),
        pair(Some(2), Some(0)),
        pair(Some(1), Some(2)),
    ];
    session
}

/// A live channel over an in-memory duplex, with the far (server) side
/// exposed for frame inspection.
pub struct ChannelRig {
    pub handle: ChannelHandle,
    lines: Lines<BufReader<ReadHalf<DuplexStream>>>,
    // Keep the far write half and the notification receiver alive so
    // the channel task does not tear down mid-test.
    _writer: WriteHalf<DuplexStream>,
    _notif_rx: mpsc::Receiver<ChannelNotification>,
}

impl ChannelRig {
    pub fn new() -> Self {
        let (near, far) = tokio::io::duplex(4096);
        let (handle, notif_rx) = spawn_channel(near);
        let (read, writer) = tokio::io::split(far);
        Self {
            handle,
            lines: BufReader::new(read).lines(),
            _writer: writer,
            _notif_rx: notif_rx,
        }
    }

    /// The next frame the client emitted, or `None` if nothing arrives
    /// within a short grace period.
    pub async fn next_frame(&mut self) -> Option<serde_json::Value> {
        match tokio::time::timeout(Duration::from_millis(100), self.lines.next_line()).await {
            Ok(Ok(Some(line))) => serde_json::from_str(&line).ok(),
            _ => None,
        }
    }
}

/// App state holding the given session with "alice" as the local user.
pub fn state_with_session(session: Session) -> AppState {
    let role = session.role_of(&UserId::new("alice")).unwrap();
    let mut state = AppState::new();
    state.profile = Some(profile("alice"));
    state.channel = ChannelStatus::Connected;
    state.session = Some(SessionState::new(session, role));
    state
}
