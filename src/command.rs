//! One outbound Nabaztag command: identity, time-to-live, ears, speech, voice, action.

use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::url;

/// Time-to-live sent when none is configured.
pub const DEFAULT_TIME_TO_LIVE: &str = "600";

/// Ask the rabbit for the list of voices it supports.
pub const ACTION_SUPPORTED_VOICES: &str = "9";
/// Ask the rabbit for the languages selected on the account.
pub const ACTION_SELECTED_LANGUAGES: &str = "11";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarPose {
    Happy,
    Sad,
    Special,
}

impl EarPose {
    /// Query fragment that moves both ears.
    pub fn fragment(self) -> &'static str {
        match self {
            Self::Happy => "&posright=0&posleft=0",
            Self::Sad => "&posright=10&posleft=10",
            Self::Special => "&posright=5&posleft=5",
        }
    }
}

/// Device id and token must both be present; blank counts as missing.
pub fn check_credentials(device_id: &str, token: &str) -> Result<(), CommandError> {
    if device_id.trim().is_empty() {
        return Err(CommandError::MissingDeviceId);
    }
    if token.trim().is_empty() {
        return Err(CommandError::MissingToken);
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceCommand {
    device_id: String,
    token: String,
    time_to_live: String,
    ear_pose: Option<EarPose>,
    text: Option<String>,
    voice: Option<String>,
    action: Option<String>,
}

impl DeviceCommand {
    pub fn builder(device_id: impl Into<String>, token: impl Into<String>) -> DeviceCommandBuilder {
        DeviceCommandBuilder {
            device_id: device_id.into(),
            token: token.into(),
            ..DeviceCommandBuilder::default()
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn time_to_live(&self) -> &str {
        &self.time_to_live
    }

    pub fn ear_pose(&self) -> Option<EarPose> {
        self.ear_pose
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn voice(&self) -> Option<&str> {
        self.voice.as_deref()
    }

    pub fn action(&self) -> Option<&str> {
        self.action.as_deref()
    }

    /// Base URL against the default API root.
    pub fn base_url(&self) -> String {
        self.base_url_at(url::DEFAULT_API_ROOT)
    }

    pub fn base_url_at(&self, api_root: &str) -> String {
        url::build_base_url_at(api_root, &self.device_id, &self.token, &self.time_to_live)
    }

    /// Full command URL against the default API root, spaces left as-is.
    pub fn url(&self) -> String {
        self.url_at(url::DEFAULT_API_ROOT)
    }

    pub fn url_at(&self, api_root: &str) -> String {
        url::build_command_url(
            &self.base_url_at(api_root),
            self.ear_pose,
            self.text.as_deref(),
            self.voice.as_deref(),
            self.action.as_deref(),
        )
    }

    /// URL as it goes over the wire.
    pub fn request_url_at(&self, api_root: &str) -> String {
        url::escape_spaces(&self.url_at(api_root))
    }
}

#[derive(Debug, Clone, Default)]
pub struct DeviceCommandBuilder {
    device_id: String,
    token: String,
    time_to_live: Option<String>,
    ear_pose: Option<EarPose>,
    text: Option<String>,
    voice: Option<String>,
    action: Option<String>,
}

impl DeviceCommandBuilder {
    pub fn time_to_live(mut self, ttl: impl Into<String>) -> Self {
        self.time_to_live = Some(ttl.into());
        self
    }

    pub fn ear_pose(mut self, pose: Option<EarPose>) -> Self {
        self.ear_pose = pose;
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn voice(mut self, voice: impl Into<String>) -> Self {
        self.voice = Some(voice.into());
        self
    }

    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Validate credentials and resolve the time-to-live default.
    pub fn build(self) -> Result<DeviceCommand, CommandError> {
        check_credentials(&self.device_id, &self.token)?;

        let time_to_live = self
            .time_to_live
            .filter(|ttl| !ttl.is_empty())
            .unwrap_or_else(|| DEFAULT_TIME_TO_LIVE.to_string());

        Ok(DeviceCommand {
            device_id: self.device_id,
            token: self.token,
            time_to_live,
            ear_pose: self.ear_pose,
            text: self.text,
            voice: self.voice,
            action: self.action,
        })
    }
}
