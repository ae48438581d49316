//! Room message store
//!
//! Holds the ordered, deduplicated message list for the active room and
//! applies one sync event at a time. This is a pure reducer: no I/O, no
//! suspension, so it is unit-testable without a transport.
//!
//! Invariants upheld by every operation:
//! - no two entries share an id
//! - display order is the insertion order of each id's first appearance;
//!   later events never reorder existing entries

use crate::models::ChatMessage;
use crate::sync::SyncEvent;

/// Ordered message list for a single room subscription
#[derive(Debug, Clone, Default)]
pub struct RoomState {
    messages: Vec<ChatMessage>,
}

impl RoomState {
    /// Create an empty room state
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a decoded sync event
    pub fn apply(&mut self, event: SyncEvent) {
        match event {
            SyncEvent::Add(msg) => self.apply_add(msg),
            SyncEvent::Update(msg) => self.apply_update(msg),
            SyncEvent::Sync { messages } => self.apply_sync(messages),
        }
    }

    /// Apply a newly created message.
    ///
    /// An unknown id is appended. A known id is merged in place, which is
    /// the path taken when the authority echoes back a message this client
    /// already applied optimistically.
    pub fn apply_add(&mut self, msg: ChatMessage) {
        match self.messages.iter_mut().find(|m| m.id == msg.id) {
            Some(existing) => existing.merge_from(&msg),
            None => self.messages.push(msg),
        }
    }

    /// Apply a full replacement of an existing message, matched by id.
    ///
    /// An update for an id this client never saw is a no-op; out-of-order
    /// delivery across a resync boundary is expected.
    pub fn apply_update(&mut self, msg: ChatMessage) {
        if let Some(existing) = self.messages.iter_mut().find(|m| m.id == msg.id) {
            *existing = msg;
        }
    }

    /// Replace the entire message list with an authoritative snapshot
    pub fn apply_sync(&mut self, messages: Vec<ChatMessage>) {
        self.messages = messages;
    }

    /// The current message sequence, in display order
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of messages currently held
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether the room has no messages
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drop all messages (used when switching rooms)
    pub fn clear(&mut self) {
        self.messages.clear();
    }
}
