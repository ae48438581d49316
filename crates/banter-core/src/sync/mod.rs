//! Room synchronization
//!
//! Keeps the local message list in step with the room authority's
//! broadcast channel.
//!
//! ## Protocol
//!
//! 1. Connect to the authority via WebSocket, one connection per room
//! 2. Receive an authoritative snapshot, then incremental add/update events
//! 3. Send locally entered messages as `add` events, applied optimistically
//!    before transmission; the authority's echo is merged by id
//!
//! ## Usage
//!
//! ```ignore
//! let handle = spawn_room_task(RoomTaskConfig {
//!     url: "ws://localhost:1999".into(),
//!     room: "lobby".into(),
//!     display_name: "Alice".into(),
//!     ..Default::default()
//! });
//! handle.command_tx.send(RoomCommand::Send("hello".into())).await?;
//! ```

mod controller;
mod protocol;
mod transport;

pub use controller::{RoomController, RoomStatus};
pub use protocol::SyncEvent;
pub use transport::{spawn_room_task, RoomCommand, RoomEvent, RoomHandle, RoomTaskConfig};
