use cinema_watch::core::format::MessageStyle;
use cinema_watch::core::Notifier;
use cinema_watch::{CinemaError, TelegramNotifier};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_summary_and_detail_go_to_separate_chats() {
    let server = MockServer::start();
    let summary_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:abc/sendMessage")
            .json_body_partial(r#"{"chat_id": "42", "text": "summary"}"#);
        then.status(200).json_body(json!({"ok": true, "result": {}}));
    });
    let detail_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bot123:abc/sendMessage")
            .json_body_partial(r#"{"chat_id": "@cinema", "text": "detail"}"#);
        then.status(200).json_body(json!({"ok": true, "result": {}}));
    });

    let notifier = TelegramNotifier::new(server.base_url(), "123:abc", "42", "@cinema", MessageStyle::Text);

    tokio_test::assert_ok!(notifier.send_summary("summary").await);
    tokio_test::assert_ok!(notifier.send_detail("detail").await);

    summary_mock.assert();
    detail_mock.assert();
}

#[tokio::test]
async fn test_html_style_sets_parse_mode() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/bottoken/sendMessage")
            .json_body_partial(r#"{"parse_mode": "HTML"}"#);
        then.status(200).json_body(json!({"ok": true}));
    });

    let notifier = TelegramNotifier::new(server.base_url(), "token", "1", "2", MessageStyle::Html);
    tokio_test::assert_ok!(notifier.send_detail("<b>1+1</b>").await);

    mock.assert();
}

#[tokio::test]
async fn test_rejected_message_is_notification_error() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/bottoken/sendMessage");
        then.status(400)
            .json_body(json!({"ok": false, "error_code": 400, "description": "Bad Request: chat not found"}));
    });

    let notifier = TelegramNotifier::new(server.base_url(), "token", "1", "2", MessageStyle::Text);
    let err = notifier.send_summary("hello").await.unwrap_err();

    mock.assert();
    match err {
        CinemaError::NotificationError { message } => assert!(message.contains("chat not found")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_non_json_reply_is_notification_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/bottoken/sendMessage");
        then.status(502).body("Bad Gateway");
    });

    let notifier = TelegramNotifier::new(server.base_url(), "token", "1", "2", MessageStyle::Text);
    tokio_test::assert_err!(notifier.send_detail("hello").await);
}
