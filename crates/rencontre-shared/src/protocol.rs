//! Wire events exchanged over the persistent session channel.
//!
//! Every frame is a JSON object of the form `{"event": ..., "data": ...}`,
//! matching the server's event-name/payload contract.

use serde::{Deserialize, Serialize};

use crate::error::RencontreError;
use crate::types::{Session, SessionId};

/// Matching criteria derived from the local user profile when joining
/// the queue. The server owns the matching algorithm.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchCriteria {
    pub age: u8,
    pub gender: String,
    pub looking_for: String,
    pub location: String,
}

/// A reveal decision as submitted (never `pending` on the wire).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RevealChoice {
    Yes,
    No,
}

/// All events the client emits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    JoinBlindQueue {
        criteria: MatchCriteria,
    },
    LeaveBlindQueue,
    #[serde(rename_all = "camelCase")]
    ConfirmInstructions {
        session_id: SessionId,
    },
    #[serde(rename_all = "camelCase")]
    SubmitBlindAnswer {
        session_id: SessionId,
        choice_index: usize,
    },
    #[serde(rename_all = "camelCase")]
    ProceedToNextStage {
        session_id: SessionId,
    },
    #[serde(rename_all = "camelCase")]
    SendBlindMessage {
        session_id: SessionId,
        text: String,
    },
    #[serde(rename_all = "camelCase")]
    SubmitRevealDecision {
        session_id: SessionId,
        decision: RevealChoice,
    },
}

/// All events the server pushes. `MatchFound` and `SessionUpdate` carry
/// a full session snapshot that replaces any prior local copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    MatchFound(Session),
    SessionUpdate(Session),
    SessionCancelled,
}

impl ClientEvent {
    pub fn to_json(&self) -> Result<String, RencontreError> {
        Ok(serde_json::to_string(self)?)
    }
}

impl ServerEvent {
    pub fn from_json(data: &str) -> Result<Self, RencontreError> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn to_json(&self) -> Result<String, RencontreError> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Participant, RevealDecision, SessionStatus, StageProgress, UserId};

    #[test]
    fn test_client_event_wire_names() {
        let ev = ClientEvent::SubmitBlindAnswer {
            session_id: SessionId("s-9".into()),
            choice_index: 2,
        };
        let json: serde_json::Value = serde_json::from_str(&ev.to_json().unwrap()).unwrap();
        assert_eq!(json["event"], "submit_blind_answer");
        assert_eq!(json["data"]["sessionId"], "s-9");
        assert_eq!(json["data"]["choiceIndex"], 2);

        let join = ClientEvent::JoinBlindQueue {
            criteria: MatchCriteria {
                age: 30,
                gender: "f".into(),
                looking_for: "m".into(),
                location: "Paris".into(),
            },
        };
        let json: serde_json::Value = serde_json::from_str(&join.to_json().unwrap()).unwrap();
        assert_eq!(json["event"], "join_blind_queue");
        assert_eq!(json["data"]["criteria"]["lookingFor"], "m");
    }

    #[test]
    fn test_reveal_decision_wire_value() {
        let ev = ClientEvent::SubmitRevealDecision {
            session_id: SessionId("s-9".into()),
            decision: RevealChoice::No,
        };
        let json: serde_json::Value = serde_json::from_str(&ev.to_json().unwrap()).unwrap();
        assert_eq!(json["data"]["decision"], "no");
    }

    #[test]
    fn test_server_event_roundtrip() {
        let session = Session {
            id: SessionId("s-1".into()),
            status: SessionStatus::WaitingForStage2,
            current_stage: 1,
            current_question_index: 4,
            participants: [
                Participant {
                    id: UserId::new("a"),
                    name: "A".into(),
                    age: 25,
                    avatar: "a.png".into(),
                },
                Participant {
                    id: UserId::new("b"),
                    name: "B".into(),
                    age: 26,
                    avatar: "b.png".into(),
                },
            ],
            questions: vec![],
            messages: vec![],
            stage_progress: StageProgress::default(),
            u1_reveal_decision: RevealDecision::Pending,
            u2_reveal_decision: RevealDecision::Pending,
            match_percentage: None,
        };

        let ev = ServerEvent::SessionUpdate(session.clone());
        let json = ev.to_json().unwrap();
        assert!(json.contains("\"session_update\""));
        assert!(json.contains("\"waiting_for_stage_2\""));

        let restored = ServerEvent::from_json(&json).unwrap();
        assert_eq!(restored, ServerEvent::SessionUpdate(session));
    }

    #[test]
    fn test_session_cancelled_has_no_payload() {
        let json = ServerEvent::SessionCancelled.to_json().unwrap();
        let restored = ServerEvent::from_json(&json).unwrap();
        assert_eq!(restored, ServerEvent::SessionCancelled);
    }
}
