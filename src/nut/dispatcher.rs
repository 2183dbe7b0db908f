use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::nut::request::Command;
use crate::nut::response::ResponseTable;

/// Answer one request line.
///
/// Exactly one payload is written, in full, before returning. Unrecognized
/// lines get `ERR Unknown command` and are not an error here; only a failed
/// write is.
pub async fn dispatch<W>(line: &str, table: &ResponseTable, out: &mut W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let command = Command::parse(line);
    let payload = table.respond(&command);
    debug!(command = command.as_str(), bytes = payload.len(), "Sending response");

    out.write_all(payload).await?;
    out.flush().await?;
    Ok(())
}
