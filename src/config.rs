//! Configuration management for nabaztag-notifier.
//!
//! Loads the API settings and the per-recipient rabbit settings from a YAML
//! file in one of the standard locations.

use serde::{Deserialize, Deserializer};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::command::{self, DEFAULT_TIME_TO_LIVE};
use crate::error::{CommandError, ConfigError};
use crate::event::EventKind;
use crate::message::{self, DEFAULT_ELLIPSIS, DEFAULT_HASH_REPLACEMENT};
use crate::url::DEFAULT_API_ROOT;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub api_root: String,
    pub time_to_live: String,
    pub timeout_secs: u64,
    pub connect_timeout_ms: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            api_root: DEFAULT_API_ROOT.into(),
            time_to_live: DEFAULT_TIME_TO_LIVE.into(),
            timeout_secs: 10,
            connect_timeout_ms: 3000,
        }
    }
}

/// Custom message per event kind. Unset or empty means the built-in default.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessageTemplates {
    pub build_started: Option<String>,
    pub build_successful: Option<String>,
    pub build_failed: Option<String>,
    pub build_failed_to_start: Option<String>,
    pub labeling_failed: Option<String>,
    pub build_failing: Option<String>,
    pub build_probably_hanging: Option<String>,
    pub responsibility_changed: Option<String>,
    pub responsibility_assigned: Option<String>,
}

impl MessageTemplates {
    pub fn get(&self, kind: EventKind) -> Option<&str> {
        let template = match kind {
            EventKind::BuildStarted => &self.build_started,
            EventKind::BuildSuccessful => &self.build_successful,
            EventKind::BuildFailed => &self.build_failed,
            EventKind::BuildFailedToStart => &self.build_failed_to_start,
            EventKind::LabelingFailed => &self.labeling_failed,
            EventKind::BuildFailing => &self.build_failing,
            EventKind::BuildProbablyHanging => &self.build_probably_hanging,
            EventKind::ResponsibilityChanged => &self.responsibility_changed,
            EventKind::ResponsibilityAssigned => &self.responsibility_assigned,
        };
        template.as_deref()
    }
}

/// One notified user and their rabbit.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RecipientConfig {
    pub name: String,
    /// Serial number of the rabbit.
    pub device_id: String,
    pub token: String,
    pub voice: Option<String>,
    pub messages: MessageTemplates,
    pub hash_replacement: Option<String>,
    #[serde(deserialize_with = "lenient_max_length")]
    pub max_message_length: Option<usize>,
    pub ellipsis: Option<String>,
}

impl RecipientConfig {
    pub fn validate(&self) -> Result<(), CommandError> {
        command::check_credentials(&self.device_id, &self.token)
    }

    pub fn hash_replacement(&self) -> &str {
        match self.hash_replacement.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => DEFAULT_HASH_REPLACEMENT,
        }
    }

    /// Only an absent ellipsis falls back to the default; an empty one is kept.
    pub fn ellipsis(&self) -> &str {
        self.ellipsis.as_deref().unwrap_or(DEFAULT_ELLIPSIS)
    }

    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            &self.device_id
        } else {
            &self.name
        }
    }
}

/// Accepts an integer or a string. Anything that is not a non-negative
/// integer disables truncation instead of failing the whole file.
fn lenient_max_length<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_yml::Value>::deserialize(deserializer)?;
    let parsed = match &raw {
        None | Some(serde_yml::Value::Null) => return Ok(None),
        Some(serde_yml::Value::Number(n)) => n.as_u64().and_then(|n| usize::try_from(n).ok()),
        Some(serde_yml::Value::String(s)) => message::parse_max_length(s),
        Some(_) => None,
    };
    if parsed.is_none() {
        debug!("Ignoring max_message_length {raw:?}, messages will not be truncated");
    }
    Ok(parsed)
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub http: HttpConfig,
    pub recipients: Vec<RecipientConfig>,
}

impl Config {
    /// Load configuration from YAML file.
    ///
    /// Searches standard locations if no path is provided:
    /// 1. ./nabaztag.yaml
    /// 2. ~/.config/nabaztag-notifier/config.yaml
    /// 3. /etc/nabaztag-notifier/config.yaml
    pub fn load(path: Option<&Path>) -> Self {
        let resolved = path.map(PathBuf::from).or_else(|| {
            let candidates = [
                std::env::current_dir().ok().map(|d| d.join("nabaztag.yaml")),
                dirs::home_dir().map(|h| h.join(".config/nabaztag-notifier/config.yaml")),
                Some(PathBuf::from("/etc/nabaztag-notifier/config.yaml")),
            ];
            candidates.into_iter().flatten().find(|p| p.exists())
        });

        let Some(config_path) = resolved else {
            info!("No config file found, using defaults");
            return Self::default();
        };

        match Self::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e}, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_yml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        info!(
            "Loaded config from {} ({} recipients)",
            path.display(),
            config.recipients.len()
        );
        config.warn_invalid_recipients();
        Ok(config)
    }

    pub fn recipient(&self, name: &str) -> Option<&RecipientConfig> {
        self.recipients.iter().find(|r| r.display_name() == name)
    }

    fn warn_invalid_recipients(&self) {
        for recipient in &self.recipients {
            if let Err(e) = recipient.validate() {
                warn!(
                    "Recipient '{}' will not be notified: {e}",
                    recipient.display_name()
                );
            }
        }
    }
}
