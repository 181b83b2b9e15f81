//! nabaztag-notifier: build notifications spoken by a Nabaztag rabbit.
//!
//! A build event is rendered into a message per recipient, packed into a
//! device command and sent to the Nabaztag API as a single GET request.

pub mod command;
pub mod commits;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod message;
pub mod transport;
pub mod url;
pub mod voice;

pub use command::{DeviceCommand, EarPose};
pub use config::{Config, RecipientConfig};
pub use dispatcher::NotificationDispatcher;
pub use event::{BuildEvent, EventKind};
pub use transport::{DryRunTransport, HttpTransport, Transport};
