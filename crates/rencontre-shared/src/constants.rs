//! Protocol-wide constants shared by the client and the channel layer.

/// Maximum chat messages each participant may send during stage 3.
pub const CHAT_MESSAGE_CAP: usize = 10;

/// Questions asked per question round (stages 1 and 2).
pub const QUESTIONS_PER_ROUND: usize = 5;

/// Stage numbers as pushed by the server.
pub const STAGE_ROUND_ONE: u8 = 1;
pub const STAGE_ROUND_TWO: u8 = 2;
pub const STAGE_CHAT: u8 = 3;
pub const STAGE_REVEAL: u8 = 4;

/// Buffer size for the channel command/notification mpsc pairs.
pub const CHANNEL_BUFFER: usize = 256;
