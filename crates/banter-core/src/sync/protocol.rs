//! Sync protocol event types
//!
//! Events exchanged with the room authority as JSON text frames,
//! discriminated by a `type` field. `add` and `update` embed the message
//! fields alongside the tag; `all` carries the authority's full snapshot
//! of the room.
//!
//! Only the explicit `all` tag is treated as a snapshot. Unrecognized
//! tags fail to decode and the frame is dropped upstream, rather than
//! being mistaken for a snapshot.

use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, ProtocolResult};
use crate::models::ChatMessage;

/// One wire-level sync event
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SyncEvent {
    /// A newly created message
    Add(ChatMessage),

    /// Full replacement of an existing message, matched by id
    Update(ChatMessage),

    /// Authoritative full snapshot of the room's message list
    #[serde(rename = "all")]
    Sync { messages: Vec<ChatMessage> },
}

impl SyncEvent {
    /// Decode an inbound text frame
    pub fn decode(frame: &str) -> ProtocolResult<Self> {
        serde_json::from_str(frame).map_err(ProtocolError::from)
    }

    /// Encode for transmission
    pub fn encode(&self) -> String {
        // All field types serialize infallibly
        serde_json::to_string(self).expect("sync event encoding failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_decode_add() {
        let frame = r#"{"type":"add","id":"m1","content":"hi","user":"Alice","role":"user"}"#;
        let event = SyncEvent::decode(frame).unwrap();

        match event {
            SyncEvent::Add(msg) => {
                assert_eq!(msg.id, "m1");
                assert_eq!(msg.content, "hi");
                assert_eq!(msg.user, "Alice");
                assert_eq!(msg.role, Role::User);
            }
            _ => panic!("Expected Add event"),
        }
    }

    #[test]
    fn test_decode_update() {
        let frame =
            r#"{"type":"update","id":"m1","content":"hello","user":"Alice","role":"user"}"#;
        let event = SyncEvent::decode(frame).unwrap();

        match event {
            SyncEvent::Update(msg) => assert_eq!(msg.content, "hello"),
            _ => panic!("Expected Update event"),
        }
    }

    #[test]
    fn test_decode_snapshot() {
        let frame = r#"{"type":"all","messages":[
            {"id":"m1","content":"one","user":"Alice","role":"user"},
            {"id":"m2","content":"two","user":"Bot","role":"assistant"}
        ]}"#;
        let event = SyncEvent::decode(frame).unwrap();

        match event {
            SyncEvent::Sync { messages } => {
                assert_eq!(messages.len(), 2);
                assert_eq!(messages[1].role, Role::Assistant);
            }
            _ => panic!("Expected Sync event"),
        }
    }

    #[test]
    fn test_unknown_tag_is_decode_error() {
        // An unrecognized tag must never fall through to a snapshot
        let frame = r#"{"type":"presence","messages":[]}"#;
        assert!(SyncEvent::decode(frame).is_err());
    }

    #[test]
    fn test_missing_tag_is_decode_error() {
        let frame = r#"{"messages":[]}"#;
        assert!(SyncEvent::decode(frame).is_err());
    }

    #[test]
    fn test_malformed_json_is_decode_error() {
        assert!(SyncEvent::decode("{oops").is_err());
        assert!(SyncEvent::decode("").is_err());
    }

    #[test]
    fn test_add_missing_field_is_decode_error() {
        let frame = r#"{"type":"add","id":"m1","content":"hi"}"#;
        assert!(SyncEvent::decode(frame).is_err());
    }

    #[test]
    fn test_encode_embeds_tag_alongside_fields() {
        let event = SyncEvent::Add(ChatMessage::with_id("m1", "hi", "Alice", Role::User));
        let json: serde_json::Value = serde_json::from_str(&event.encode()).unwrap();

        assert_eq!(json["type"], "add");
        assert_eq!(json["id"], "m1");
        assert_eq!(json["content"], "hi");
        assert_eq!(json["user"], "Alice");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let event = SyncEvent::Sync {
            messages: vec![ChatMessage::with_id("m1", "one", "Alice", Role::User)],
        };
        let decoded = SyncEvent::decode(&event.encode()).unwrap();
        assert_eq!(decoded, event);
    }
}
