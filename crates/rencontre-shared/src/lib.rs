pub mod constants;
pub mod error;
pub mod protocol;
pub mod score;
pub mod types;

pub use error::RencontreError;
pub use protocol::{ClientEvent, MatchCriteria, RevealChoice, ServerEvent};
pub use types::{
    ChatMessage, Participant, Question, QuestionPair, RevealDecision, Role, Session, SessionId,
    SessionStatus, StageProgress, UserId,
};
