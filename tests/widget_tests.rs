mod common;

use std::sync::Arc;
use std::time::Duration;

use chat_widget::error::SubmitError;
use chat_widget::message::{Message, Sender};
use chat_widget::session::SessionId;
use chat_widget::widget::{APOLOGY_MESSAGE, ChatWidget};
use common::{Outcome, ScriptedTransport};

#[tokio::test]
async fn successful_turn_appends_user_and_bot_messages() {
    let transport = ScriptedTransport::replying("**Olá!**\n- a\n- b");
    let widget = Arc::new(ChatWidget::new(transport.clone()));

    let bot = widget.submit("  hello  ").await.unwrap();
    assert_eq!(bot, Message::bot("**Olá!**\n- a\n- b"));

    let transcript = widget.transcript().await;
    assert_eq!(
        transcript.messages(),
        &[Message::user("hello"), Message::bot("**Olá!**\n- a\n- b")]
    );

    let calls = transport.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].message, "hello");
    assert_eq!(calls[0].session_id, widget.session_id().as_str());

    let html = widget.render_html().await;
    assert!(html.contains("<strong>Olá!</strong><ul><li>a</li><li>b</li></ul>"));
    assert!(!widget.is_busy());
}

#[tokio::test]
async fn whitespace_only_input_is_rejected_without_a_call() {
    let transport = ScriptedTransport::replying("unused");
    let widget = Arc::new(ChatWidget::new(transport.clone()));

    assert_eq!(widget.submit("   \n\t ").await, Err(SubmitError::EmptyMessage));
    assert_eq!(widget.submit("").await, Err(SubmitError::EmptyMessage));

    assert!(transport.calls().is_empty());
    assert!(widget.transcript().await.is_empty());
}

#[tokio::test]
async fn server_detail_is_shown_as_bot_message() {
    let transport = ScriptedTransport::new(Outcome::Server(400, "bad input".to_string()));
    let widget = Arc::new(ChatWidget::new(transport));

    let bot = widget.submit("hi").await.unwrap();
    assert_eq!(bot.text, "bad input");
    assert_eq!(bot.sender, Sender::Bot);
    assert_eq!(widget.transcript().await.len(), 2);
}

#[tokio::test]
async fn transport_failure_shows_apology_and_reenables_input() {
    let widget = Arc::new(ChatWidget::new(ScriptedTransport::new(Outcome::Transport)));

    let bot = widget.submit("hi").await.unwrap();
    assert_eq!(bot.text, APOLOGY_MESSAGE);
    assert!(bot.text.contains("800 506 506"));
    assert!(!widget.is_busy());

    // input is usable again after the failure
    assert!(widget.submit("again").await.is_ok());
    assert_eq!(widget.transcript().await.len(), 4);
}

#[tokio::test]
async fn second_submission_while_in_flight_is_refused() {
    let transport = ScriptedTransport::gated(Outcome::Reply("done".to_string()));
    let widget = Arc::new(ChatWidget::new(transport.clone()));

    let first = tokio::spawn({
        let widget = Arc::clone(&widget);
        async move { widget.submit("first").await }
    });

    while !widget.is_busy() {
        tokio::task::yield_now().await;
    }

    assert_eq!(widget.submit("second").await, Err(SubmitError::Busy));
    assert!(widget.render_html().await.contains("typing-indicator"));

    transport.release();
    let bot = first.await.unwrap().unwrap();
    assert_eq!(bot.text, "done");

    assert!(!widget.is_busy());
    assert_eq!(transport.calls().len(), 1);
    let transcript = widget.transcript().await;
    assert_eq!(
        transcript.messages(),
        &[Message::user("first"), Message::bot("done")]
    );
    assert!(!widget.render_html().await.contains("typing-indicator"));
}

#[tokio::test]
async fn injected_session_id_is_sent_with_every_turn() {
    let transport = ScriptedTransport::replying("ok");
    let session_id = SessionId::parse("session-fixed001").unwrap();
    let widget = Arc::new(ChatWidget::with_session(transport.clone(), session_id));

    widget.submit("one").await.unwrap();
    widget.submit("two").await.unwrap();

    let ids: Vec<_> = transport.calls().into_iter().map(|c| c.session_id).collect();
    assert_eq!(ids, vec!["session-fixed001", "session-fixed001"]);
}

#[tokio::test]
async fn user_text_is_escaped_in_rendered_transcript() {
    let widget = Arc::new(ChatWidget::new(ScriptedTransport::replying("<b>ok</b>")));
    widget.submit("<img src=x>").await.unwrap();

    let html = widget.render_html().await;
    assert!(html.contains("&lt;img src=x&gt;"));
    assert!(html.contains("<b>ok</b>"));
}

#[tokio::test]
async fn turn_completes_when_caller_stops_waiting() {
    let transport = ScriptedTransport::gated(Outcome::Reply("still here".to_string()));
    let widget = Arc::new(ChatWidget::new(transport.clone()));

    // caller gives up while the backend is still answering
    let waited = tokio::time::timeout(Duration::from_millis(50), widget.submit("hi")).await;
    assert!(waited.is_err());
    assert!(widget.is_busy());

    transport.release();
    while widget.is_busy() {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let transcript = widget.transcript().await;
    assert_eq!(
        transcript.messages(),
        &[Message::user("hi"), Message::bot("still here")]
    );
    assert_eq!(transport.calls().len(), 1);
}
