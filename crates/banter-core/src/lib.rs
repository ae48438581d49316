//! Banter Core Library
//!
//! This crate provides the core functionality for Banter, a realtime
//! chat client that joins a named room and keeps a local ordered message
//! list synchronized with the room authority's broadcast channel.
//!
//! # Architecture
//!
//! - **Room store** (`room`): ordered, deduplicated message list with
//!   pure apply operations, reconciled by message id
//! - **Sync controller** (`sync`): translates user input and inbound
//!   frames into store operations, owns the subscription state machine
//! - **Transport task** (`sync`): long-lived WebSocket connection with
//!   automatic reconnection
//!
//! Messages entered locally are applied optimistically before they are
//! sent; the authority's echo of the same id is merged, not duplicated.
//!
//! # Quick Start
//!
//! ```text
//! let handle = sync::spawn_room_task(RoomTaskConfig {
//!     url: config.server_url,
//!     room: "lobby".into(),
//!     display_name: "Alice".into(),
//!     ..Default::default()
//! });
//! ```
//!
//! # Modules
//!
//! - `room`: message store for the active room
//! - `sync`: protocol events, controller, and transport task
//! - `models`: chat message data structures
//! - `names`: ephemeral display names
//! - `config`: application configuration

pub mod config;
pub mod error;
pub mod models;
pub mod names;
pub mod room;
pub mod sync;

pub use config::Config;
pub use error::{ProtocolError, ProtocolResult};
pub use models::{ChatMessage, Role};
pub use room::RoomState;
pub use sync::{RoomController, RoomStatus, SyncEvent};
