//! Room sync controller
//!
//! Bridges user actions and inbound transport frames to the message
//! store. This is the single place protocol correctness is enforced:
//! outgoing messages are applied optimistically before they are handed
//! to the transport, and inbound frames are decoded here and dropped on
//! failure. The controller performs no I/O itself, so the full
//! reconciliation behavior is testable without a socket.

use tracing::{debug, warn};

use super::protocol::SyncEvent;
use crate::models::{ChatMessage, Role};
use crate::room::RoomState;

/// Room subscription status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomStatus {
    /// No subscription open
    Disconnected,
    /// Subscription open, waiting for the first event from the authority
    Joining,
    /// At least one event received; local state tracks the room
    Synced,
}

/// Controller for a single room subscription
#[derive(Debug)]
pub struct RoomController {
    room: String,
    display_name: String,
    state: RoomState,
    status: RoomStatus,
}

impl RoomController {
    /// Create a controller for the given room
    pub fn new(room: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            room: room.into(),
            display_name: display_name.into(),
            state: RoomState::new(),
            status: RoomStatus::Disconnected,
        }
    }

    /// The room this controller is subscribed to
    pub fn room(&self) -> &str {
        &self.room
    }

    /// The local user's display name
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Current subscription status
    pub fn status(&self) -> RoomStatus {
        self.status
    }

    /// Current message sequence, exposed unchanged to the rendering layer
    pub fn messages(&self) -> &[ChatMessage] {
        self.state.messages()
    }

    /// Submit locally entered text.
    ///
    /// Builds a fresh message, applies it to local state first (the sender
    /// sees it before any round trip), and returns the encoded `add` frame
    /// to hand to the transport. Empty or whitespace-only input yields
    /// `None` and no state change. The authority's later echo of the same
    /// id is absorbed by the store's merge path.
    pub fn submit(&mut self, text: &str) -> Option<String> {
        let content = text.trim();
        if content.is_empty() {
            return None;
        }

        let msg = ChatMessage::new(content, self.display_name.clone(), Role::User);
        let frame = SyncEvent::Add(msg.clone()).encode();
        self.state.apply_add(msg);
        Some(frame)
    }

    /// Handle one inbound text frame.
    ///
    /// Malformed frames are dropped and logged; they never tear down the
    /// connection or change room state. Returns whether the store was
    /// mutated.
    pub fn handle_frame(&mut self, frame: &str) -> bool {
        match SyncEvent::decode(frame) {
            Ok(event) => {
                debug!("Applying {} event", event_kind(&event));
                self.state.apply(event);
                // First event of any kind completes the join
                self.status = RoomStatus::Synced;
                true
            }
            Err(e) => {
                warn!("Dropping undecodable frame: {}", e);
                false
            }
        }
    }

    /// The transport subscription for the room was opened
    pub fn on_subscribe(&mut self) {
        self.status = RoomStatus::Joining;
    }

    /// The transport dropped.
    ///
    /// Messages are retained so the display does not flicker empty across
    /// a transient disconnect; the next authoritative snapshot replaces
    /// them wholesale.
    pub fn on_disconnect(&mut self) {
        self.status = RoomStatus::Joining;
    }

    /// Tear down the current subscription and move to a different room
    pub fn switch_room(&mut self, room: impl Into<String>) {
        self.room = room.into();
        self.state.clear();
        self.status = RoomStatus::Joining;
    }
}

fn event_kind(event: &SyncEvent) -> &'static str {
    match event {
        SyncEvent::Add(_) => "add",
        SyncEvent::Update(_) => "update",
        SyncEvent::Sync { .. } => "all",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(json: &str) -> String {
        json.to_string()
    }

    #[test]
    fn test_new_controller_is_disconnected_and_empty() {
        let ctrl = RoomController::new("lobby", "Alice");
        assert_eq!(ctrl.status(), RoomStatus::Disconnected);
        assert_eq!(ctrl.room(), "lobby");
        assert!(ctrl.messages().is_empty());
    }

    #[test]
    fn test_submit_applies_locally_before_send() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        let frame = ctrl.submit("hi").expect("non-empty input produces a frame");

        // Local echo is visible before any network event
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].content, "hi");
        assert_eq!(ctrl.messages()[0].user, "Alice");
        assert_eq!(ctrl.messages()[0].role, Role::User);

        // The outgoing frame carries the same id
        let json: serde_json::Value = serde_json::from_str(&frame).unwrap();
        assert_eq!(json["type"], "add");
        assert_eq!(json["id"], ctrl.messages()[0].id.as_str());
    }

    #[test]
    fn test_submit_trims_content() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.submit("  hi  ").unwrap();
        assert_eq!(ctrl.messages()[0].content, "hi");
    }

    #[test]
    fn test_submit_rejects_empty_input() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        assert!(ctrl.submit("").is_none());
        assert!(ctrl.submit("   ").is_none());
        assert!(ctrl.messages().is_empty());
    }

    #[test]
    fn test_echo_of_own_message_does_not_duplicate() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        let frame = ctrl.submit("hi").unwrap();

        // The authority rebroadcasts our own add verbatim
        assert!(ctrl.handle_frame(&frame));

        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].content, "hi");
    }

    #[test]
    fn test_inbound_add_from_other_participant() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        let applied = ctrl.handle_frame(&frame(
            r#"{"type":"add","id":"b1","content":"hey","user":"Bob","role":"user"}"#,
        ));

        assert!(applied);
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].user, "Bob");
    }

    #[test]
    fn test_inbound_update_edits_in_place() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.handle_frame(r#"{"type":"add","id":"a","content":"hi","user":"Alice","role":"user"}"#);
        ctrl.handle_frame(
            r#"{"type":"update","id":"a","content":"hello","user":"Alice","role":"user"}"#,
        );

        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].content, "hello");
    }

    #[test]
    fn test_stale_update_is_silently_ignored() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.handle_frame(r#"{"type":"add","id":"a","content":"hi","user":"Alice","role":"user"}"#);
        ctrl.handle_frame(
            r#"{"type":"update","id":"z","content":"ghost","user":"Eve","role":"user"}"#,
        );

        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.messages()[0].content, "hi");
    }

    #[test]
    fn test_snapshot_replaces_local_state() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.submit("one");
        ctrl.submit("two");
        ctrl.submit("three");

        ctrl.handle_frame(
            r#"{"type":"all","messages":[
                {"id":"m4","content":"four","user":"Bob","role":"user"},
                {"id":"m5","content":"five","user":"Bob","role":"user"}
            ]}"#,
        );

        let ids: Vec<_> = ctrl.messages().iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["m4", "m5"]);
    }

    #[test]
    fn test_malformed_frame_is_dropped() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.handle_frame(r#"{"type":"add","id":"a","content":"hi","user":"Alice","role":"user"}"#);

        assert!(!ctrl.handle_frame("{oops"));
        assert!(!ctrl.handle_frame(r#"{"type":"presence","who":"Bob"}"#));

        // State and status are untouched by dropped frames
        assert_eq!(ctrl.messages().len(), 1);
        assert_eq!(ctrl.status(), RoomStatus::Synced);
    }

    #[test]
    fn test_status_transitions() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        assert_eq!(ctrl.status(), RoomStatus::Disconnected);

        ctrl.on_subscribe();
        assert_eq!(ctrl.status(), RoomStatus::Joining);

        ctrl.handle_frame(r#"{"type":"all","messages":[]}"#);
        assert_eq!(ctrl.status(), RoomStatus::Synced);
    }

    #[test]
    fn test_disconnect_retains_messages() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.on_subscribe();
        ctrl.handle_frame(r#"{"type":"add","id":"a","content":"hi","user":"Alice","role":"user"}"#);

        ctrl.on_disconnect();

        assert_eq!(ctrl.status(), RoomStatus::Joining);
        assert_eq!(ctrl.messages().len(), 1);

        // A snapshot after reconnection is authoritative
        ctrl.handle_frame(r#"{"type":"all","messages":[]}"#);
        assert!(ctrl.messages().is_empty());
        assert_eq!(ctrl.status(), RoomStatus::Synced);
    }

    #[test]
    fn test_switch_room_clears_state() {
        let mut ctrl = RoomController::new("lobby", "Alice");
        ctrl.on_subscribe();
        ctrl.handle_frame(r#"{"type":"add","id":"a","content":"hi","user":"Alice","role":"user"}"#);

        ctrl.switch_room("den");

        assert_eq!(ctrl.room(), "den");
        assert!(ctrl.messages().is_empty());
        assert_eq!(ctrl.status(), RoomStatus::Joining);
    }
}
