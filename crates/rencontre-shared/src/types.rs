//! Domain model for a blind-date session.
//!
//! The server owns every field here; the client only ever holds the
//! latest pushed snapshot and derives read-models from it. Field names
//! follow the server's camelCase JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::STAGE_CHAT;

/// Opaque server-assigned user identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque server-assigned session identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SessionId(pub String);

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One of the two people in a session. Identity stays hidden from the
/// counterpart until both reveal decisions are `yes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: UserId,
    pub name: String,
    pub age: u8,
    pub avatar: String,
}

/// Authoritative session lifecycle status.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Instructions,
    Active,
    #[serde(rename = "waiting_for_stage_2")]
    WaitingForStage2,
    #[serde(rename = "waiting_for_stage_3")]
    WaitingForStage3,
    WaitingForReveal,
    Completed,
    Cancelled,
}

impl SessionStatus {
    /// Completed and cancelled are the only states the session never leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// A participant's one-shot identity-reveal choice.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevealDecision {
    Pending,
    Yes,
    No,
}

/// Positional identity within a session. Decision and answer fields on
/// [`Session`] are keyed by role, so every component resolves its role
/// through [`Session::role_of`] rather than comparing ids itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    First,
    Second,
}

impl Role {
    pub fn other(&self) -> Role {
        match self {
            Role::First => Role::Second,
            Role::Second => Role::First,
        }
    }
}

/// A question with its fixed answer options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub text: String,
    pub options: Vec<String>,
}

/// A question plus each role's chosen option index. An answer, once
/// non-null, never changes for the lifetime of the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPair {
    pub question: Question,
    pub u1_answer: Option<usize>,
    pub u2_answer: Option<usize>,
}

impl QuestionPair {
    pub fn answer_of(&self, role: Role) -> Option<usize> {
        match role {
            Role::First => self.u1_answer,
            Role::Second => self.u2_answer,
        }
    }
}

/// One chat message as echoed back by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub sender: UserId,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Per-role readiness to leave the chat stage.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct StageProgress {
    pub u1_ready_next: bool,
    pub u2_ready_next: bool,
}

impl StageProgress {
    pub fn ready_of(&self, role: Role) -> bool {
        match role {
            Role::First => self.u1_ready_next,
            Role::Second => self.u2_ready_next,
        }
    }
}

/// Full session snapshot as pushed by the server. Each push replaces
/// the previous snapshot wholesale; the client never merges.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: SessionId,
    pub status: SessionStatus,
    /// 1-2 = question rounds, 3 = chat, 4 = reveal decision.
    pub current_stage: u8,
    /// Valid only while `current_stage` is 1 or 2.
    pub current_question_index: usize,
    /// Exactly two, ordered; position determines role.
    pub participants: [Participant; 2],
    pub questions: Vec<QuestionPair>,
    pub messages: Vec<ChatMessage>,
    pub stage_progress: StageProgress,
    pub u1_reveal_decision: RevealDecision,
    pub u2_reveal_decision: RevealDecision,
    pub match_percentage: Option<u8>,
}

impl Session {
    /// Resolve which role the given user plays in this session.
    pub fn role_of(&self, user: &UserId) -> Option<Role> {
        if self.participants[0].id == *user {
            Some(Role::First)
        } else if self.participants[1].id == *user {
            Some(Role::Second)
        } else {
            None
        }
    }

    pub fn participant(&self, role: Role) -> &Participant {
        match role {
            Role::First => &self.participants[0],
            Role::Second => &self.participants[1],
        }
    }

    /// The counterpart of the given role.
    pub fn partner_of(&self, role: Role) -> &Participant {
        self.participant(role.other())
    }

    pub fn decision_of(&self, role: Role) -> RevealDecision {
        match role {
            Role::First => self.u1_reveal_decision,
            Role::Second => self.u2_reveal_decision,
        }
    }

    /// The question pair the session currently points at, if any.
    pub fn current_question(&self) -> Option<&QuestionPair> {
        self.questions.get(self.current_question_index)
    }

    /// How many chat messages the given role has sent so far.
    pub fn sent_count(&self, role: Role) -> usize {
        let sender = &self.participant(role).id;
        self.messages.iter().filter(|m| m.sender == *sender).count()
    }

    pub fn in_chat_stage(&self) -> bool {
        self.current_stage == STAGE_CHAT
    }
}
