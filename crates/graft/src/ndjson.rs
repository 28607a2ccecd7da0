//! Newline-delimited JSON transport for snapshot streams.

use crate::{engine::Snapshots, Error, Result};

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio_stream::{Stream, StreamExt};

/// Which snapshots to put on the wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every snapshot, one line each
    #[default]
    All,

    /// Only the final snapshot
    Last,
}

/// Encodes `snapshots` as ndjson lines, each ending in `\n`.
///
/// A failure is reported in-band as a final `{"error": {"kind", "message"}}`
/// line. Once a snapshot line has gone out, the failure is reported as a
/// streaming error wrapping the cause.
pub fn encode(snapshots: Snapshots, mode: Mode) -> impl Stream<Item = String> + Send {
    async_stream::stream! {
        let mut snapshots = snapshots;
        let mut last = None;
        let mut emitted = false;

        while let Some(snapshot) = snapshots.next().await {
            let line = snapshot.and_then(|snapshot| snapshot.to_json_string());

            match (line, mode) {
                (Ok(line), Mode::All) => {
                    emitted = true;
                    yield line + "\n";
                }
                (Ok(line), Mode::Last) => last = Some(line),
                (Err(err), _) => {
                    let err = if emitted { Error::streaming(err) } else { err };
                    yield error_line(&err);
                    return;
                }
            }
        }

        if let Some(line) = last {
            yield line + "\n";
        }
    }
}

/// Writes the ndjson encoding of `snapshots` to `writer`, flushing at the
/// end. Execution failures are part of the output; only I/O errors are
/// returned.
pub async fn write<W>(writer: &mut W, snapshots: Snapshots, mode: Mode) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let lines = encode(snapshots, mode);
    tokio::pin!(lines);

    while let Some(line) = lines.next().await {
        writer.write_all(line.as_bytes()).await?;
    }

    writer.flush().await?;
    Ok(())
}

fn error_line(err: &Error) -> String {
    let record = serde_json::json!({
        "error": {
            "kind": err.kind_name(),
            "message": err.to_string(),
        }
    });

    format!("{record}\n")
}
