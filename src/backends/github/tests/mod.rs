use pretty_assertions::assert_eq;

use crate::checker::{event_action, has_task_link, is_event_opened};

use super::models::PullRequestEvent;

#[test]
fn test_parse_pull_request_opened_event() {
    let event_str = include_str!("./pull_request_opened.json");
    let event: PullRequestEvent = serde_json::from_str(event_str).expect("should deserialize");

    assert!(is_event_opened(Some(event.action.as_str())));
    assert!(has_task_link(event.pull_request.body.as_deref()));
    assert_eq!(event.repository.full_name, "Codertocat/Hello-World");
    assert_eq!(
        event.pull_request.head.sha,
        "ec26c3e57ca3a959ca5aad62de7213c562f8c821"
    );
}

#[test]
fn test_parse_pull_request_closed_event() {
    let event_str = include_str!("./pull_request_closed.json");
    let payload: serde_json::Value = serde_json::from_str(event_str).expect("should parse");
    assert_eq!(event_action(&payload), Some("closed"));
    assert!(!is_event_opened(event_action(&payload)));

    let event: PullRequestEvent = serde_json::from_value(payload).expect("should deserialize");
    assert_eq!(event.pull_request.body, None);
}
