//! Property-based tests for the event decoder.
//!
//! The decoder sits directly on the network path, so it must accept any byte
//! sequence without panicking and must preserve user text exactly.

use parlor_proto::{ChatEvent, InboundFrame, RawFrame, SenderId, decode, decode_backlog};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #[test]
    fn prop_decode_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let raw = RawFrame::new(bytes);
        let _ = decode(&raw);
        let _ = InboundFrame::parse(&raw);
    }

    #[test]
    fn prop_backlog_never_panics(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode_backlog(&bytes);
    }

    #[test]
    fn prop_message_text_preserved(username in "\\PC{1,16}", content in "\\PC{0,80}", id in any::<u32>()) {
        let frame = json!({
            "identifier": "{\"channel\":\"ChatRoomChannel\",\"topic\":\"general\"}",
            "message": {
                "type": "new_message",
                "content": content,
                "user": { "id": id, "username": username },
            },
        });
        let raw = RawFrame::from(frame.to_string());

        prop_assert_eq!(decode(&raw), Some(ChatEvent::MessagePosted {
            username,
            content,
            sender: SenderId::new(id.to_string()),
        }));
    }

    #[test]
    fn prop_backlog_preserves_order(contents in prop::collection::vec("\\PC{0,20}", 0..20)) {
        let body: Vec<_> = contents
            .iter()
            .map(|c| json!({ "content": c, "user": { "username": "alice" } }))
            .collect();
        let body = serde_json::to_vec(&body).unwrap();

        let events = decode_backlog(&body).unwrap();
        let expected: Vec<_> =
            contents.iter().map(|c| ChatEvent::backlog_message("alice", c.clone())).collect();
        prop_assert_eq!(events, expected);
    }
}
