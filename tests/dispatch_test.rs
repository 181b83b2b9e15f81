use std::cell::RefCell;

use nabaztag_notifier::commits::Modification;
use nabaztag_notifier::config::HttpConfig;
use nabaztag_notifier::error::TransportError;
use nabaztag_notifier::event::BuildChanges;
use nabaztag_notifier::voice::{VoiceSelector, VOICE_CATALOG};
use nabaztag_notifier::{BuildEvent, EventKind, NotificationDispatcher, RecipientConfig, Transport};

const BASE: &str = "http://api.nabaztag.com/vl/FR/api.jsp";

/// Records every URL; fails for URLs containing `fail_on`.
#[derive(Default)]
struct RecordingTransport {
    urls: RefCell<Vec<String>>,
    fail_on: Option<String>,
}

impl Transport for RecordingTransport {
    fn get(&self, url: &str) -> Result<String, TransportError> {
        self.urls.borrow_mut().push(url.to_string());
        match &self.fail_on {
            Some(marker) if url.contains(marker.as_str()) => Err(TransportError::Status(503)),
            _ => Ok("<rsp><message>TTSSENT</message></rsp>".into()),
        }
    }
}

fn recipient(name: &str, device_id: &str, token: &str) -> RecipientConfig {
    RecipientConfig {
        name: name.into(),
        device_id: device_id.into(),
        token: token.into(),
        voice: Some("UK-Penelope".into()),
        ..RecipientConfig::default()
    }
}

fn dispatcher(transport: RecordingTransport) -> NotificationDispatcher<RecordingTransport> {
    NotificationDispatcher::with_voice_selector(transport, HttpConfig::default(), VoiceSelector::seeded(1))
}

fn failed_build() -> BuildEvent {
    BuildEvent::build(
        EventKind::BuildFailed,
        "Core",
        BuildChanges {
            triggered_by: None,
            committers: vec!["Ann".into(), "Bob".into()],
            modifications: vec![
                Modification::new("ann", "Fix #12"),
                Modification::new("bob", "Bump version"),
            ],
        },
    )
}

#[test]
fn test_dispatch_to_each_recipient() {
    let mut d = dispatcher(RecordingTransport::default());
    let recipients = vec![recipient("alice", "111", "aaa"), recipient("bob", "222", "bbb")];

    d.dispatch(&failed_build(), &recipients);

    let urls = d.transport().urls.borrow();
    assert_eq!(urls.len(), 2);
    assert_eq!(
        urls[0],
        format!(
            "{BASE}?sn=111&token=aaa&ttlive=600&posright=10&posleft=10\
             &tts=Build%20Core%20failed.&voice=UK-Penelope"
        )
    );
    assert!(urls[1].starts_with(&format!("{BASE}?sn=222&token=bbb&ttlive=600")));
}

#[test]
fn test_custom_template_with_commit_data() {
    let mut d = dispatcher(RecordingTransport::default());
    let mut alice = recipient("alice", "111", "aaa");
    alice.messages.build_failed = Some("#USER# broke #PROJECT#: #COMMENT#".into());

    d.dispatch(&failed_build(), &[alice]);

    let urls = d.transport().urls.borrow();
    assert!(urls[0].contains(
        "&tts=Ann,%20Bob%20broke%20Core:%20Fix%20number%2012.%20Bump%20version&voice="
    ));
}

#[test]
fn test_invalid_recipient_skipped() {
    let mut d = dispatcher(RecordingTransport::default());
    let recipients = vec![
        recipient("nobody", "", "aaa"),
        recipient("notoken", "222", ""),
        recipient("carol", "333", "ccc"),
    ];

    d.dispatch(&failed_build(), &recipients);

    let urls = d.transport().urls.borrow();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("sn=333"));
}

#[test]
fn test_transport_failure_does_not_stop_others() {
    let transport = RecordingTransport {
        fail_on: Some("sn=111".into()),
        ..RecordingTransport::default()
    };
    let mut d = dispatcher(transport);
    let recipients = vec![recipient("alice", "111", "aaa"), recipient("bob", "222", "bbb")];

    d.dispatch(&failed_build(), &recipients);

    let urls = d.transport().urls.borrow();
    assert_eq!(urls.len(), 2);
    assert!(urls[1].contains("sn=222"));
}

#[test]
fn test_random_voice_when_not_configured() {
    let mut d = dispatcher(RecordingTransport::default());
    let mut alice = recipient("alice", "111", "aaa");
    alice.voice = None;

    let event = BuildEvent::build(EventKind::BuildStarted, "Core", BuildChanges::default());
    d.dispatch(&event, &[alice]);

    let urls = d.transport().urls.borrow();
    let voice = urls[0].rsplit("&voice=").next().unwrap();
    assert!(VOICE_CATALOG.contains(&voice));
    assert!(!urls[0].contains("posright"));
}

#[test]
fn test_truncated_message() {
    let mut d = dispatcher(RecordingTransport::default());
    let mut alice = recipient("alice", "111", "aaa");
    alice.max_message_length = Some(5);
    alice.ellipsis = Some("...".into());

    let event = BuildEvent::responsibility(EventKind::ResponsibilityAssigned, "Core", "Dave", "");
    d.dispatch(&event, &[alice]);

    let urls = d.transport().urls.borrow();
    assert!(urls[0].ends_with("&tts=Dave%20...&voice=UK-Penelope"));
}

#[test]
fn test_send_action_returns_body() {
    let d = dispatcher(RecordingTransport::default());
    let body = d
        .send_action(&recipient("alice", "12345", "54321"), "9")
        .unwrap();

    assert!(body.contains("TTSSENT"));
    assert_eq!(
        d.transport().urls.borrow()[0],
        format!("{BASE}?sn=12345&token=54321&ttlive=600&action=9")
    );
}
