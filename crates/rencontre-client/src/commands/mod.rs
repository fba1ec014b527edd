//! User-initiated actions.
//!
//! Every action validates against the current snapshot and overlay
//! under the state lock, then emits at most one wire event. Failed
//! preconditions degrade to logged no-ops; callers get back whether an
//! emission happened, never an error.

pub mod answers;
pub mod chat;
pub mod queue;
pub mod reveal;
pub mod stage;
