//! Line-based console transport
//!
//! Maps stdin lines onto dialogue inputs for a single local session and
//! prints every reply message.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;
use vidsrc_core::{DialogueController, Input, SessionId};

/// The console has exactly one conversation
pub const CONSOLE_SESSION: SessionId = SessionId(0);

/// Interpret one console line.
///
/// `/start` and `/cancel` are commands, other `/...` commands and blank lines
/// are ignored, anything else is dialogue text.
pub fn parse_line(line: &str) -> Option<Input> {
    let trimmed = line.trim();
    match trimmed {
        "" => None,
        "/start" => Some(Input::Start),
        "/cancel" => Some(Input::Cancel),
        command if command.starts_with('/') => None,
        _ => Some(Input::Text(line.to_string())),
    }
}

/// Feed lines from `reader` to the controller until end of input.
pub async fn run_console<R, W>(
    controller: &DialogueController,
    reader: R,
    mut writer: W,
) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer
        .write_all(b"Type /start to look up a title, /cancel to abort.\n")
        .await?;
    writer.flush().await?;

    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        let Some(input) = parse_line(&line) else {
            debug!(%line, "ignoring console line");
            continue;
        };

        let reply = controller.handle(CONSOLE_SESSION, input).await;
        for message in &reply.messages {
            writer.write_all(message.as_bytes()).await?;
            if !message.ends_with('\n') {
                writer.write_all(b"\n").await?;
            }
        }
        writer.flush().await?;
    }

    Ok(())
}
