//! Tests for `prompt::build_messages` and `prompt::format_transcript`.

use prompt::{build_messages, format_transcript, ChatMessage, MessageRole};

/// **Test: Without history the list is the prompt followed by the question.**
#[test]
fn build_without_history() {
    let messages = build_messages("Be brief.", Vec::<(&str, &str)>::new(), "What is Rust?");
    assert_eq!(
        messages,
        vec![
            ChatMessage::system("Be brief."),
            ChatMessage::user("What is Rust?"),
        ]
    );
}

/// **Test: History becomes alternating user/assistant turns, oldest first.**
#[test]
fn build_with_history() {
    let history = vec![
        ("Q1".to_string(), "A1".to_string()),
        ("Q2".to_string(), "A2".to_string()),
    ];
    let messages = build_messages("prompt", history, "Q3");
    let roles: Vec<MessageRole> = messages.iter().map(|m| m.role).collect();
    assert_eq!(
        roles,
        vec![
            MessageRole::System,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
            MessageRole::Assistant,
            MessageRole::User,
        ]
    );
    assert_eq!(messages[1].content, "Q1");
    assert_eq!(messages[4].content, "A2");
    assert_eq!(messages[5].content, "Q3");
}

/// **Test: An empty prompt adds no system message.**
#[test]
fn build_empty_prompt() {
    let messages = build_messages("", [("Q1", "A1")], "Q2");
    assert_eq!(messages.len(), 3);
    assert_eq!(messages[0], ChatMessage::user("Q1"));
}

/// **Test: Roles serialize as the API's lowercase names.**
#[test]
fn role_serialization() {
    let json = serde_json::to_string(&ChatMessage::assistant("hi")).unwrap();
    assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
}

/// **Test: Transcript labels each line with its role.**
#[test]
fn transcript_format() {
    let messages = build_messages("Be brief.", [("Hi", "Hello")], "Bye");
    assert_eq!(
        format_transcript(&messages),
        "System: Be brief.\nUser: Hi\nAssistant: Hello\nUser: Bye\n"
    );
}
