//! Interactive chat loop
//!
//! Spawns the room task and bridges it to the terminal: stdin lines are
//! submitted as messages, room events are rendered line-by-line.

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

use banter_core::models::ChatMessage;
use banter_core::names;
use banter_core::sync::{spawn_room_task, RoomCommand, RoomEvent, RoomStatus, RoomTaskConfig};
use banter_core::Config;

/// Join a room and run the chat loop until stdin closes
pub async fn run(config: Config, room: String) -> Result<()> {
    let display_name = config.display_name.unwrap_or_else(names::random_name);

    println!("Room: {}", room);
    println!("You are {}. Type a message and press enter.", display_name);
    println!();

    let mut handle = spawn_room_task(RoomTaskConfig {
        url: config.server_url,
        room,
        display_name: display_name.clone(),
        ..Default::default()
    });

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut rendered: Vec<ChatMessage> = Vec::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(text) => {
                        let _ = handle.command_tx.send(RoomCommand::Send(text)).await;
                    }
                    None => {
                        // stdin closed
                        let _ = handle.command_tx.send(RoomCommand::Shutdown).await;
                        break;
                    }
                }
            }

            changed = handle.status_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let status = *handle.status_rx.borrow();
                if let Some(line) = status_line(status) {
                    println!("{}", line);
                }
            }

            event = handle.event_rx.recv() => {
                match event {
                    Some(RoomEvent::MessagesChanged(messages)) => {
                        render_delta(&mut rendered, messages, &display_name);
                    }
                    // Status is consumed from the watch channel above
                    Some(RoomEvent::StatusChanged(_)) => {}
                    Some(RoomEvent::Error(e)) => {
                        warn!("{}", e);
                    }
                    None => break,
                }
            }
        }
    }

    Ok(())
}

/// Indicator printed when the subscription status changes, if any
fn status_line(status: RoomStatus) -> Option<&'static str> {
    match status {
        RoomStatus::Joining => Some("(joining...)"),
        RoomStatus::Synced | RoomStatus::Disconnected => None,
    }
}

/// Print whatever changed since the last snapshot.
///
/// Appends are printed as new lines. Anything else (an edit, or an
/// authoritative snapshot that rewrote history) reprints the room.
fn render_delta(rendered: &mut Vec<ChatMessage>, next: Vec<ChatMessage>, me: &str) {
    if is_append(rendered, &next) {
        for msg in &next[rendered.len()..] {
            println!("{}", format_message(msg, me));
        }
    } else {
        println!("--- room replayed ---");
        for msg in &next {
            println!("{}", format_message(msg, me));
        }
    }
    *rendered = next;
}

/// Whether `next` only adds messages to the end of `prev`
fn is_append(prev: &[ChatMessage], next: &[ChatMessage]) -> bool {
    next.len() >= prev.len() && next[..prev.len()] == prev[..]
}

/// One display line per message
fn format_message(msg: &ChatMessage, me: &str) -> String {
    if msg.user == me {
        format!("[{} (you)] {}", msg.user, msg.content)
    } else {
        format!("[{}] {}", msg.user, msg.content)
    }
}
