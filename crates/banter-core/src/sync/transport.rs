//! Room transport task
//!
//! Maintains a long-lived WebSocket connection to the room authority and
//! feeds inbound frames to the room controller. Reconnects automatically
//! with exponential backoff; the controller's message list is retained
//! across reconnects and replaced by the next authoritative snapshot.

use std::time::Duration;

use anyhow::Result;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::{mpsc, watch};
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, info, warn};

use super::controller::{RoomController, RoomStatus};
use crate::error::ProtocolError;
use crate::models::ChatMessage;

/// Commands sent to the room task
#[derive(Debug, Clone)]
pub enum RoomCommand {
    /// Submit locally entered text as a chat message
    Send(String),
    /// Shutdown the room task
    Shutdown,
}

/// Events emitted by the room task
#[derive(Debug, Clone)]
pub enum RoomEvent {
    /// Subscription status changed
    StatusChanged(RoomStatus),
    /// The message list changed; carries the full display sequence
    MessagesChanged(Vec<ChatMessage>),
    /// Error occurred
    Error(String),
}

/// Handle to control the room task
pub struct RoomHandle {
    /// Send commands to the room task
    pub command_tx: mpsc::Sender<RoomCommand>,
    /// Receive events from the room task
    pub event_rx: mpsc::Receiver<RoomEvent>,
    /// Watch subscription status
    pub status_rx: watch::Receiver<RoomStatus>,
}

/// Configuration for the room task
#[derive(Debug, Clone)]
pub struct RoomTaskConfig {
    /// WebSocket server URL
    pub url: String,
    /// Room to join
    pub room: String,
    /// Local display name
    pub display_name: String,
    /// Initial reconnect delay
    pub initial_reconnect_delay: Duration,
    /// Maximum reconnect delay
    pub max_reconnect_delay: Duration,
}

impl Default for RoomTaskConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            room: String::new(),
            display_name: String::new(),
            initial_reconnect_delay: Duration::from_secs(1),
            max_reconnect_delay: Duration::from_secs(30),
        }
    }
}

/// Spawn a room task
///
/// Returns a handle to control and monitor the task. The task will
/// automatically reconnect on disconnection.
pub fn spawn_room_task(config: RoomTaskConfig) -> RoomHandle {
    let (command_tx, command_rx) = mpsc::channel(16);
    let (event_tx, event_rx) = mpsc::channel(64);
    let (status_tx, status_rx) = watch::channel(RoomStatus::Disconnected);

    tokio::spawn(room_task_loop(config, command_rx, event_tx, status_tx));

    RoomHandle {
        command_tx,
        event_rx,
        status_rx,
    }
}

/// Main task loop with reconnection
async fn room_task_loop(
    config: RoomTaskConfig,
    mut command_rx: mpsc::Receiver<RoomCommand>,
    event_tx: mpsc::Sender<RoomEvent>,
    status_tx: watch::Sender<RoomStatus>,
) {
    // One controller for the lifetime of the subscription: messages
    // survive transient disconnects.
    let mut controller = RoomController::new(&config.room, &config.display_name);
    let mut reconnect_delay = config.initial_reconnect_delay;

    loop {
        controller.on_subscribe();
        publish_status(&controller, &status_tx, &event_tx).await;

        match connect_and_listen(&config, &mut controller, &mut command_rx, &event_tx, &status_tx)
            .await
        {
            Ok(should_shutdown) => {
                if should_shutdown {
                    break;
                }
                // Connection closed normally, reset backoff
                reconnect_delay = config.initial_reconnect_delay;
            }
            Err(e) => {
                let _ = event_tx
                    .send(RoomEvent::Error(format!("Connection error: {}", e)))
                    .await;
            }
        }

        controller.on_disconnect();
        publish_status(&controller, &status_tx, &event_tx).await;

        // Wait before reconnecting, but check for shutdown
        tokio::select! {
            _ = tokio::time::sleep(reconnect_delay) => {
                reconnect_delay = (reconnect_delay * 2).min(config.max_reconnect_delay);
            }
            cmd = command_rx.recv() => {
                match cmd {
                    Some(RoomCommand::Shutdown) | None => break,
                    Some(RoomCommand::Send(_)) => {
                        // Fire-and-forget: sends while disconnected are lost,
                        // a later snapshot corrects any divergence
                        debug!("Dropping send while disconnected");
                    }
                }
            }
        }
    }

    let _ = status_tx.send(RoomStatus::Disconnected);
    let _ = event_tx
        .send(RoomEvent::StatusChanged(RoomStatus::Disconnected))
        .await;
}

/// Connect and run the frame loop until disconnection or shutdown
async fn connect_and_listen(
    config: &RoomTaskConfig,
    controller: &mut RoomController,
    command_rx: &mut mpsc::Receiver<RoomCommand>,
    event_tx: &mpsc::Sender<RoomEvent>,
    status_tx: &watch::Sender<RoomStatus>,
) -> Result<bool> {
    let url = room_url(&config.url, &config.room);
    debug!("Connecting to {}", url);
    let (ws_stream, _) = connect_async(&url).await?;
    info!("Joined room {}", config.room);

    let (mut write, mut read) = ws_stream.split();

    loop {
        tokio::select! {
            cmd = command_rx.recv() => {
                match cmd {
                    Some(RoomCommand::Send(text)) => {
                        // Optimistic local apply happens inside submit,
                        // before the frame goes out
                        if let Some(frame) = controller.submit(&text) {
                            let _ = event_tx
                                .send(RoomEvent::MessagesChanged(controller.messages().to_vec()))
                                .await;
                            write.send(Message::Text(frame)).await?;
                        }
                    }
                    Some(RoomCommand::Shutdown) | None => {
                        write.close().await.ok();
                        return Ok(true);
                    }
                }
            }

            msg = read.next() => {
                match msg {
                    Some(Ok(Message::Text(frame))) => {
                        if controller.handle_frame(&frame) {
                            publish_status(controller, status_tx, event_tx).await;
                            let _ = event_tx
                                .send(RoomEvent::MessagesChanged(controller.messages().to_vec()))
                                .await;
                        }
                    }
                    Some(Ok(Message::Binary(_))) => {
                        warn!(
                            "Dropping frame: {}",
                            ProtocolError::UnsupportedFrame("binary")
                        );
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        return Ok(false);
                    }
                    Some(Err(e)) => {
                        return Err(e.into());
                    }
                    _ => {}
                }
            }
        }
    }
}

/// Publish the controller's status if it changed
async fn publish_status(
    controller: &RoomController,
    status_tx: &watch::Sender<RoomStatus>,
    event_tx: &mpsc::Sender<RoomEvent>,
) {
    let status = controller.status();
    if *status_tx.borrow() != status {
        let _ = status_tx.send(status);
        let _ = event_tx.send(RoomEvent::StatusChanged(status)).await;
    }
}

/// Build the per-room WebSocket URL
fn room_url(base: &str, room: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), room)
}
