//! Construction of the underlying duplex stream.
//!
//! The channel itself (`channel.rs`) is generic over any
//! `AsyncRead + AsyncWrite` stream; production wiring uses a plain TCP
//! connection carrying newline-delimited JSON frames.

use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::info;

/// Open the TCP connection the event channel runs over.
pub async fn connect<A: ToSocketAddrs + std::fmt::Debug>(addr: A) -> std::io::Result<TcpStream> {
    let stream = TcpStream::connect(&addr).await?;
    stream.set_nodelay(true)?;
    info!(addr = ?addr, "Event channel connected");
    Ok(stream)
}
