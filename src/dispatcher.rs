//! Turns one build event into one spoken command per recipient.
//!
//! Recipients are handled one after the other and in isolation: a missing
//! token or an unreachable rabbit is logged and the loop moves on.

use rand::rngs::StdRng;
use rand::Rng;
use tracing::{debug, info, warn};

use crate::command::DeviceCommand;
use crate::config::{HttpConfig, RecipientConfig};
use crate::error::{CommandError, NotifyError};
use crate::event::BuildEvent;
use crate::message::{self, NotificationContext};
use crate::transport::Transport;
use crate::voice::VoiceSelector;

pub struct NotificationDispatcher<T, R = StdRng> {
    transport: T,
    voices: VoiceSelector<R>,
    http: HttpConfig,
}

impl<T: Transport> NotificationDispatcher<T, StdRng> {
    pub fn new(transport: T, http: HttpConfig) -> Self {
        Self::with_voice_selector(transport, http, VoiceSelector::from_entropy())
    }
}

impl<T: Transport, R: Rng> NotificationDispatcher<T, R> {
    pub fn with_voice_selector(transport: T, http: HttpConfig, voices: VoiceSelector<R>) -> Self {
        Self {
            transport,
            voices,
            http,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Notify every recipient about `event`. Failures are logged per recipient.
    pub fn dispatch(&mut self, event: &BuildEvent, recipients: &[RecipientConfig]) {
        let context = NotificationContext::from_event(event);
        info!(
            "Event '{}' for {}: notifying {} recipients",
            context.event_kind,
            context.project_name,
            recipients.len()
        );

        for recipient in recipients {
            match self.notify(&context, recipient) {
                Ok(body) => {
                    debug!("Rabbit of '{}' answered: {}", recipient.display_name(), body.trim());
                }
                Err(NotifyError::Command(e)) => {
                    warn!("Skipping recipient '{}': {e}", recipient.display_name());
                }
                Err(NotifyError::Transport(e)) => {
                    warn!("Failed to notify '{}': {e}", recipient.display_name());
                }
            }
        }
    }

    /// Render, build and send the command for one recipient.
    pub fn notify(
        &mut self,
        context: &NotificationContext,
        recipient: &RecipientConfig,
    ) -> Result<String, NotifyError> {
        let command = self.command_for(context, recipient)?;
        self.send(&command)
    }

    pub fn command_for(
        &mut self,
        context: &NotificationContext,
        recipient: &RecipientConfig,
    ) -> Result<DeviceCommand, CommandError> {
        recipient.validate()?;

        let text = message::render_for(context, recipient);
        let voice = self.voices.select(recipient.voice.as_deref());

        DeviceCommand::builder(&recipient.device_id, &recipient.token)
            .time_to_live(&self.http.time_to_live)
            .ear_pose(context.ear_pose)
            .text(text)
            .voice(voice)
            .build()
    }

    /// Send a bare action (e.g. list supported voices) and return the answer.
    pub fn send_action(
        &self,
        recipient: &RecipientConfig,
        action: &str,
    ) -> Result<String, NotifyError> {
        let command = DeviceCommand::builder(&recipient.device_id, &recipient.token)
            .time_to_live(&self.http.time_to_live)
            .action(action)
            .build()?;
        self.send(&command)
    }

    /// Wire URL for a command under the configured API root.
    pub fn request_url(&self, command: &DeviceCommand) -> String {
        command.request_url_at(&self.http.api_root)
    }

    fn send(&self, command: &DeviceCommand) -> Result<String, NotifyError> {
        let url = self.request_url(command);
        debug!("Publishing to rabbit {}: {url}", command.device_id());
        let body = self.transport.get(&url)?;
        info!("Sent command to rabbit {}", command.device_id());
        Ok(body)
    }
}
