// Persistent event-channel layer between the client and the server.

pub mod channel;
pub mod transport;

pub use channel::{spawn_channel, ChannelCommand, ChannelHandle, ChannelNotification};
pub use transport::connect;
