//! # Terminal Front End
//!
//! Two ways to drive the hub from the `chat-hub` binary:
//!
//! - [`run_session`] reads commands line by line and prints whatever the hub
//!   delivers, both at once, until `/quit` or end of input.
//! - [`run_demo`] plays a fixed conversation between a few users and logs
//!   every delivery.
//!
//! Input grammar lives in [`commands`], output formatting in [`render`].

pub mod commands;
mod demo;
pub mod render;

pub use self::commands::{ChatCommand, CommandError, HELP_TEXT};
pub use self::demo::run_demo;
pub use self::render::{render, render_json};

use crate::clients::{ChatSession, ClientError, SessionHandle};
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ReplError {
    #[error(transparent)]
    Client(#[from] ClientError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output mode of [`run_session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    #[default]
    Text,
    Json,
}

/// Connects `session`, then interleaves user input with hub deliveries.
///
/// The session disconnects on `/quit` or when `input` reaches end of file.
/// Returns early only if the hub goes away.
pub async fn run_session<R, W>(
    session: ChatSession,
    input: R,
    mut output: W,
    mode: OutputMode,
) -> Result<(), ReplError>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    session.connect().await?;
    let (mut handle, mut inbox) = session.split();
    info!(user = %handle.user_name(), room = %handle.room(), "Session started");

    if mode == OutputMode::Text {
        writeln_to(&mut output, HELP_TEXT).await?;
        write_prompt(&mut output, &handle).await?;
    }

    let mut lines = input.lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    debug!("End of input");
                    handle.disconnect().await?;
                    break;
                };
                match ChatCommand::parse(&line) {
                    Ok(ChatCommand::Quit) => {
                        handle.disconnect().await?;
                        break;
                    }
                    Ok(command) => {
                        if let Some(reply) = dispatch(&mut handle, command).await? {
                            writeln_to(&mut output, &reply).await?;
                        }
                    }
                    Err(e) => writeln_to(&mut output, &e.to_string()).await?,
                }
                if mode == OutputMode::Text {
                    write_prompt(&mut output, &handle).await?;
                }
            }
            event = inbox.recv() => {
                let Some(event) = event else { break };
                match mode {
                    OutputMode::Text => {
                        // Overwrite the pending prompt, then redraw it below the event.
                        let line = format!("\r{}", render(&event, handle.room()));
                        writeln_to(&mut output, &line).await?;
                        write_prompt(&mut output, &handle).await?;
                    }
                    OutputMode::Json => writeln_to(&mut output, &render_json(&event)?).await?,
                }
            }
        }
    }

    info!(user = %handle.user_name(), "Session ended");
    output.flush().await?;
    Ok(())
}

/// Sends one command to the hub. Returns a local line to print, if any.
async fn dispatch(
    handle: &mut SessionHandle,
    command: ChatCommand,
) -> Result<Option<String>, ClientError> {
    match command {
        ChatCommand::Help => Ok(Some(HELP_TEXT.to_string())),
        ChatCommand::Users => handle.list_users().await.map(|_| None),
        ChatCommand::Join(room) => {
            handle.switch_room(room).await?;
            Ok(Some(format!("Joined room: {}", handle.room())))
        }
        ChatCommand::Dm { to_user, content } => handle.direct(to_user, content).await.map(|_| None),
        ChatCommand::Say(text) => handle.post(text).await.map(|_| None),
        ChatCommand::Empty | ChatCommand::Quit => Ok(None),
    }
}

fn prompt(handle: &SessionHandle) -> String {
    format!("[{} @ {}] > ", handle.user_name(), handle.room())
}

async fn write_prompt<W: AsyncWrite + Unpin>(
    output: &mut W,
    handle: &SessionHandle,
) -> std::io::Result<()> {
    output.write_all(prompt(handle).as_bytes()).await?;
    output.flush().await
}

async fn writeln_to<W: AsyncWrite + Unpin>(output: &mut W, line: &str) -> std::io::Result<()> {
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifecycle::ChatSystem;
    use crate::model::ServerEvent;
    use std::time::Duration;
    use tokio::io::BufReader;

    const WAIT: Duration = Duration::from_secs(1);

    fn system_text(event: &ServerEvent) -> &str {
        match event {
            ServerEvent::System(e) => &e.text,
            other => panic!("expected system event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn scripted_session_reaches_other_users() {
        let system = ChatSystem::new();
        let mut bob = system.session("bob", "");
        bob.connect().await.unwrap();

        let script: &[u8] = b"hi bob\n/dm bob secret\n/join\n/join rust\n/bogus\n/quit\n";
        let mut output = Vec::new();
        run_session(
            system.session("alice", ""),
            script,
            &mut output,
            OutputMode::Text,
        )
        .await
        .unwrap();

        let event = bob.recv_timeout(WAIT).await.unwrap();
        assert_eq!(system_text(&event), "alice joined general");

        match bob.recv_timeout(WAIT).await.unwrap() {
            ServerEvent::Broadcast(msg) => assert_eq!(msg.content, "hi bob"),
            other => panic!("expected broadcast, got {other:?}"),
        }
        match bob.recv_timeout(WAIT).await.unwrap() {
            ServerEvent::Direct(dm) => assert_eq!(dm.content, "secret"),
            other => panic!("expected direct message, got {other:?}"),
        }

        let event = bob.recv_timeout(WAIT).await.unwrap();
        assert_eq!(system_text(&event), "alice left general");
        // Joining and quitting "rust" happen out of bob's sight.
        assert!(bob.recv_timeout(Duration::from_millis(100)).await.is_err());

        let printed = String::from_utf8(output).unwrap();
        assert!(printed.starts_with(HELP_TEXT));
        assert!(printed.contains("Usage: /join <room>"));
        assert!(printed.contains("Joined room: rust"));
        assert!(printed.contains("Unknown command: /bogus"));
        assert!(printed.contains("[alice @ general] > "));
        assert!(printed.contains("Joined room: rust\n[alice @ rust] > "));

        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn json_mode_prints_history_replay() {
        let system = ChatSystem::new();
        let bob = system.session("bob", "");
        bob.connect().await.unwrap();
        bob.post("earlier").await.unwrap();

        let (mut input_tx, input_rx) = tokio::io::duplex(1024);
        let (output_tx, output_rx) = tokio::io::duplex(4096);
        let task = tokio::spawn(run_session(
            system.session("alice", ""),
            BufReader::new(input_rx),
            output_tx,
            OutputMode::Json,
        ));

        let mut printed = BufReader::new(output_rx).lines();
        let line = tokio::time::timeout(WAIT, printed.next_line())
            .await
            .unwrap()
            .unwrap()
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["type"], "broadcast");
        assert_eq!(value["content"], "earlier");
        assert_eq!(value["from_user"], "bob");

        input_tx.write_all(b"/quit\n").await.unwrap();
        task.await.unwrap().unwrap();
        system.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn end_of_input_disconnects() {
        let system = ChatSystem::new();
        let mut bob = system.session("bob", "lobby");
        bob.connect().await.unwrap();

        let script: &[u8] = b"";
        run_session(
            system.session("alice", "lobby"),
            script,
            tokio::io::sink(),
            OutputMode::Text,
        )
        .await
        .unwrap();

        let joined = bob.recv_timeout(WAIT).await.unwrap();
        assert_eq!(system_text(&joined), "alice joined lobby");
        let left = bob.recv_timeout(WAIT).await.unwrap();
        assert_eq!(system_text(&left), "alice left lobby");

        system.shutdown().await.unwrap();
    }
}
