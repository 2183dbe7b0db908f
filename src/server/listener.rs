use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::nut::connection::Connection;
use crate::nut::response::ResponseTable;

/// Accept loop serving one client at a time.
///
/// Each connection is run to completion before the next `accept`, so an idle
/// client holds up everyone else. There are no read timeouts.
pub struct Server {
    listener: TcpListener,
    table: Arc<ResponseTable>,
    max_line_bytes: usize,
}

impl Server {
    pub async fn bind(cfg: &Config) -> anyhow::Result<Self> {
        let addr = cfg.listen_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;

        let table = ResponseTable::new(cfg);
        info!(ups = table.ups_name(), "Listening on {}", addr);

        Ok(Self {
            listener,
            table: Arc::new(table),
            max_line_bytes: cfg.max_line_bytes,
        })
    }

    pub fn local_addr(&self) -> anyhow::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept clients until `shutdown` resolves or the listener fails.
    ///
    /// Both ways out return `Ok`; a failed `accept` means the listening
    /// socket is gone and is only logged. Per-connection errors never end
    /// the loop. `shutdown` is only polled while waiting in `accept`.
    pub async fn run<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        loop {
            let (socket, peer) = tokio::select! {
                accepted = self.listener.accept() => match accepted {
                    Ok(pair) => pair,
                    Err(e) => return accept_failed(e),
                },
                _ = &mut shutdown => {
                    info!("Listener shutting down");
                    return Ok(());
                }
            };

            self.serve(socket, peer).await;
        }
    }

    async fn serve(&self, socket: tokio::net::TcpStream, peer: SocketAddr) {
        info!(peer = %peer, "New client");

        let mut conn = Connection::new(socket, peer, self.max_line_bytes, self.table.clone());
        match conn.run().await {
            Ok(()) => info!(peer = %conn.peer(), "Closing client"),
            Err(e) => error!(peer = %conn.peer(), "Error during request: {:#}", e),
        }
        debug!(peer = %conn.peer(), state = ?conn.state(), "Connection finished");
    }
}

fn accept_failed(err: io::Error) -> anyhow::Result<()> {
    error!("Listener stopped accepting: {}", err);
    Ok(())
}
