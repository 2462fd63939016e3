//! Envelope decode vector tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use teletype_core::protocol::Envelope;

use vector_loader::TestVector;

fn load(name: &str) -> TestVector {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).unwrap()
}

#[test]
fn envelope_vectors() {
    let files = [
        "chat_full.json",
        "system_min.json",
        "epoch_timestamp.json",
        "missing_type.json",
        "unknown_type.json",
        "garbage_timestamp.json",
        "not_json.json",
        "not_object.json",
        "wrong_field_type.json",
    ];

    for f in files {
        let v = load(f);
        let raw = v.frame.decode();
        let res = Envelope::decode(&raw);

        if let Some(err) = v.expect_error {
            let e = res.expect_err("expected error");
            assert_eq!(e.code().as_str(), err.code, "vector={}", v.description);
            continue;
        }

        let env = res.expect("expected ok envelope");
        let ex = v.expect.expect("missing expect block");

        assert_eq!(env.msg_type.as_str(), ex["type"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(env.content, ex["content"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(env.sender, ex["sender"].as_str().unwrap(), "vector={}", v.description);
        assert_eq!(env.room, ex["room"].as_str().unwrap(), "vector={}", v.description);

        if ex["timestamp_ms"].is_null() {
            assert!(env.timestamp.is_none(), "vector={}", v.description);
        } else {
            assert_eq!(
                env.timestamp.unwrap().timestamp_millis(),
                ex["timestamp_ms"].as_i64().unwrap(),
                "vector={}",
                v.description
            );
        }
    }
}

#[test]
fn scenario_query_identity_join_frame() {
    let s = Envelope::join("Ann", "lobby").encode().unwrap();
    let back: serde_json::Value = serde_json::from_str(&s).unwrap();
    assert_eq!(
        back,
        serde_json::json!({ "type": "JOIN", "content": "lobby", "sender": "Ann", "room": "lobby" })
    );
}
