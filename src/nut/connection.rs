use std::net::SocketAddr;
use std::sync::Arc;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::info;

use crate::nut::dispatcher::dispatch;
use crate::nut::reader::read_line;
use crate::nut::response::ResponseTable;

/// One accepted client and everything needed to serve it.
pub struct Connection<S> {
    stream: S,
    peer: SocketAddr,
    buffer: BytesMut,
    max_line_bytes: usize,
    table: Arc<ResponseTable>,
    state: ConnectionState,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConnectionState {
    AwaitingLine,
    Dispatching(String),
    Closed,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(
        stream: S,
        peer: SocketAddr,
        max_line_bytes: usize,
        table: Arc<ResponseTable>,
    ) -> Self {
        Self {
            stream,
            peer,
            buffer: BytesMut::with_capacity(max_line_bytes),
            max_line_bytes,
            table,
            state: ConnectionState::AwaitingLine,
        }
    }

    pub fn peer(&self) -> SocketAddr {
        self.peer
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    /// Serve requests until the peer hangs up.
    ///
    /// A clean end of stream returns `Ok`. Oversized or undecodable lines and
    /// transport failures return `Err`; the state is `Closed` either way.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        let result = self.drive().await;
        self.state = ConnectionState::Closed;
        result
    }

    async fn drive(&mut self) -> anyhow::Result<()> {
        loop {
            match &self.state {
                ConnectionState::AwaitingLine => {
                    match read_line(&mut self.stream, &mut self.buffer, self.max_line_bytes)
                        .await?
                    {
                        Some(line) => {
                            info!(peer = %self.peer, "New request: {}", line);
                            self.state = ConnectionState::Dispatching(line);
                        }
                        None => {
                            self.state = ConnectionState::Closed;
                        }
                    }
                }

                ConnectionState::Dispatching(line) => {
                    dispatch(line, &self.table, &mut self.stream).await?;
                    self.state = ConnectionState::AwaitingLine;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }
}
