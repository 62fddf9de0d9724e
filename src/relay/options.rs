//! Relay options document fetched from the `output` URL

use serde_json::Value;

use crate::template::{is_falsy, stringify};

const DEFAULT_DISCORD_USER: &str = "User: {user}";
const DEFAULT_DISCORD_MSG: &str = "Please provide a `discord_msg`";
const DEFAULT_TWITCH_REPLY: &str = "Please provide `twitch_reply`";
const DEFAULT_TWITCH_REPLY_INVALID: &str = "Please provide `twitch_reply_invalid_msg`";
const DEFAULT_TWITCH_REPLY_EMPTY: &str = "Please provide `twitch_reply_empty_msg`";

/// User-supplied relay configuration.
///
/// Untrusted and parsed per request. Every template falls back to a
/// built-in reply when missing, empty, or not a scalar.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelayOptions {
    pub msg_pattern: Option<String>,
    pub discord_user: Option<String>,
    pub discord_msg: Option<String>,
    pub twitch_reply: Option<String>,
    pub twitch_reply_invalid_msg: Option<String>,
    pub twitch_reply_empty_msg: Option<String>,
}

impl RelayOptions {
    /// Parse a JSON document. Valid JSON that is not an object yields defaults.
    pub fn parse(body: &str) -> Result<Self, serde_json::Error> {
        let body = body.trim_start_matches('\u{feff}');
        let value: Value = serde_json::from_str(body)?;
        Ok(Self::from_value(&value))
    }

    pub fn from_value(value: &Value) -> Self {
        // falsy entries fall back to the defaults; anything else is text
        let field = |key: &str| -> Option<String> {
            value.get(key).filter(|v| !is_falsy(v)).map(stringify)
        };

        Self {
            msg_pattern: field("msg_pattern"),
            discord_user: field("discord_user"),
            discord_msg: field("discord_msg"),
            twitch_reply: field("twitch_reply"),
            twitch_reply_invalid_msg: field("twitch_reply_invalid_msg"),
            twitch_reply_empty_msg: field("twitch_reply_empty_msg"),
        }
    }

    pub fn discord_user(&self) -> &str {
        self.discord_user.as_deref().unwrap_or(DEFAULT_DISCORD_USER)
    }

    pub fn discord_msg(&self) -> &str {
        self.discord_msg.as_deref().unwrap_or(DEFAULT_DISCORD_MSG)
    }

    pub fn twitch_reply(&self) -> &str {
        self.twitch_reply.as_deref().unwrap_or(DEFAULT_TWITCH_REPLY)
    }

    pub fn twitch_reply_invalid_msg(&self) -> &str {
        self.twitch_reply_invalid_msg
            .as_deref()
            .unwrap_or(DEFAULT_TWITCH_REPLY_INVALID)
    }

    pub fn twitch_reply_empty_msg(&self) -> &str {
        self.twitch_reply_empty_msg
            .as_deref()
            .unwrap_or(DEFAULT_TWITCH_REPLY_EMPTY)
    }
}
