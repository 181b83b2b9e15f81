//! Spoken message rendering.
//!
//! Steps, in order:
//! 1. pick the recipient's template for the event, or the built-in default
//! 2. replace `#PROJECT#`, `#USER#` and `#COMMENT#`
//! 3. replace every remaining `#` (the rabbit stops talking at a `#`)
//! 4. truncate to the configured length and append the ellipsis

use crate::command::EarPose;
use crate::config::RecipientConfig;
use crate::event::{BuildEvent, EventKind};

pub const PROJECT_PLACEHOLDER: &str = "#PROJECT#";
pub const USER_PLACEHOLDER: &str = "#USER#";
pub const COMMENT_PLACEHOLDER: &str = "#COMMENT#";

pub const DEFAULT_HASH_REPLACEMENT: &str = "number ";
pub const DEFAULT_ELLIPSIS: &str = ", et cetera.";

/// Values extracted from one event firing, shared by all recipients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationContext {
    pub event_kind: EventKind,
    pub project_name: String,
    pub user_names: String,
    pub comments: String,
    pub ear_pose: Option<EarPose>,
}

impl NotificationContext {
    pub fn from_event(event: &BuildEvent) -> Self {
        Self {
            event_kind: event.kind,
            project_name: event.project.clone(),
            user_names: event.user_names(),
            comments: event.comments(),
            ear_pose: event.kind.ear_pose(),
        }
    }
}

pub fn select_template(configured: Option<&str>, kind: EventKind) -> &str {
    match configured {
        Some(template) if !template.is_empty() => template,
        _ => kind.default_template(),
    }
}

/// Parse a configured maximum length. Anything that is not a non-negative
/// integer means "no limit".
pub fn parse_max_length(raw: &str) -> Option<usize> {
    raw.parse().ok()
}

pub fn render(
    template: &str,
    project_name: &str,
    user_name: &str,
    comment: &str,
    hash_replacement: &str,
    max_length: Option<usize>,
    ellipsis: &str,
) -> String {
    // Substituted values are not re-scanned for placeholders, but any `#`
    // they carry is still replaced below.
    let message = substitute(template, project_name, user_name, comment);
    let message = message.replace('#', hash_replacement);

    match max_length {
        Some(max) if message.chars().count() > max => {
            let mut truncated: String = message.chars().take(max).collect();
            truncated.push_str(ellipsis);
            truncated
        }
        _ => message,
    }
}

/// Render the message one recipient hears for this context.
pub fn render_for(context: &NotificationContext, recipient: &RecipientConfig) -> String {
    let template = select_template(recipient.messages.get(context.event_kind), context.event_kind);
    render(
        template,
        &context.project_name,
        &context.user_names,
        &context.comments,
        recipient.hash_replacement(),
        recipient.max_message_length,
        recipient.ellipsis(),
    )
}

/// Single left-to-right pass so substituted text is never matched again.
fn substitute(template: &str, project_name: &str, user_name: &str, comment: &str) -> String {
    let placeholders = [
        (PROJECT_PLACEHOLDER, project_name),
        (USER_PLACEHOLDER, user_name),
        (COMMENT_PLACEHOLDER, comment),
    ];

    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    'scan: while !rest.is_empty() {
        for (placeholder, value) in placeholders {
            if let Some(tail) = rest.strip_prefix(placeholder) {
                out.push_str(value);
                rest = tail;
                continue 'scan;
            }
        }
        let mut chars = rest.chars();
        if let Some(c) = chars.next() {
            out.push(c);
        }
        rest = chars.as_str();
    }
    out
}
