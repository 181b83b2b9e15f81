//! Command URL construction for the Nabaztag API.
//!
//! Parameters are always emitted in the same order: `sn`, `token`, `ttlive`,
//! ears, `tts`, `voice`, `action`. Only spaces are escaped, which is what the
//! API expects.

use crate::command::{EarPose, DEFAULT_TIME_TO_LIVE};

pub const DEFAULT_API_ROOT: &str = "http://api.nabaztag.com/vl/FR/api.jsp";

pub fn build_base_url(device_id: &str, token: &str, time_to_live: &str) -> String {
    build_base_url_at(DEFAULT_API_ROOT, device_id, token, time_to_live)
}

pub fn build_base_url_at(api_root: &str, device_id: &str, token: &str, time_to_live: &str) -> String {
    let ttl = if time_to_live.is_empty() {
        DEFAULT_TIME_TO_LIVE
    } else {
        time_to_live
    };
    format!("{api_root}?sn={device_id}&token={token}&ttlive={ttl}")
}

pub fn build_command_url(
    base: &str,
    ear_pose: Option<EarPose>,
    text: Option<&str>,
    voice: Option<&str>,
    action: Option<&str>,
) -> String {
    let mut url = String::from(base);

    if let Some(pose) = ear_pose {
        url.push_str(pose.fragment());
    }
    if let Some(text) = text {
        url.push_str("&tts=");
        url.push_str(text);
    }
    if let Some(voice) = voice {
        url.push_str("&voice=");
        url.push_str(voice);
    }
    if let Some(action) = action {
        url.push_str("&action=");
        url.push_str(action);
    }

    url
}

pub fn escape_spaces(url: &str) -> String {
    url.replace(' ', "%20")
}
