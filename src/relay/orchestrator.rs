//! Chat-to-webhook relay
//!
//! One request runs: validate `output`/`webhook` -> fetch options ->
//! classify `msg` (empty, not matching, matching) -> optionally post to the
//! webhook -> render the chat reply. Every failure is terminal; nothing is
//! retried and nothing is cached between requests.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::config::RelayConfig;
use crate::metrics::RelayMetrics;
use crate::template::{render_with_policy, ArgumentSource, RenderPolicy};
use crate::text::limit_text;

use super::error::RelayError;
use super::options::RelayOptions;
use super::pattern::{capture_groups, compile_pattern, PatternLimits};
use super::transport::{RelayTransport, WebhookMessage};

lazy_static! {
    static ref URL_PATTERN: Regex = Regex::new(r"^https?://").unwrap();
}

/// Argument key holding the capture groups of `msg_pattern`
pub const MATCH_KEY: &str = "match";

/// Which reply branch a relay request took
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayOutcome {
    /// `msg` missing or blank
    EmptyMessage,
    /// `msg` did not match `msg_pattern`
    InvalidMessage,
    /// Message posted to the webhook
    Forwarded,
}

impl RelayOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelayOutcome::EmptyMessage => "empty",
            RelayOutcome::InvalidMessage => "invalid",
            RelayOutcome::Forwarded => "forwarded",
        }
    }
}

/// Chat reply for a relay request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayReply {
    pub outcome: RelayOutcome,
    pub text: String,
}

pub struct RelayOrchestrator {
    transport: Arc<dyn RelayTransport>,
    config: RelayConfig,
    policy: RenderPolicy,
}

impl RelayOrchestrator {
    pub fn new(transport: Arc<dyn RelayTransport>, config: RelayConfig, policy: RenderPolicy) -> Self {
        Self {
            transport,
            config,
            policy,
        }
    }

    pub fn max_reply_length(&self) -> usize {
        self.config.max_reply_length
    }

    /// Run the relay for one request's query parameters
    #[tracing::instrument(name = "relay", skip(self, params), fields(request_id = %Uuid::new_v4()))]
    pub async fn relay(&self, params: &HashMap<String, String>) -> Result<RelayReply, RelayError> {
        let started = Instant::now();
        let result = self.run(params).await;
        RelayMetrics::observe_duration(started.elapsed());

        match &result {
            Ok(reply) => {
                RelayMetrics::record_outcome(reply.outcome.as_str());
                tracing::info!(
                    outcome = reply.outcome.as_str(),
                    user = params.get("user").map(String::as_str).unwrap_or_default(),
                    "Relay completed"
                );
            }
            Err(e) => {
                RelayMetrics::record_outcome("error");
                tracing::warn!(kind = e.kind(), error = %e, "Relay failed");
            }
        }

        result
    }

    async fn run(&self, params: &HashMap<String, String>) -> Result<RelayReply, RelayError> {
        let output = required_url(params, "output")?;
        let webhook = required_url(params, "webhook")?;

        let fetched = self.transport.fetch_text(output).await;
        RelayMetrics::record_remote_call("config_fetch", fetched.is_ok());
        let body = fetched.map_err(RelayError::ConfigFetch)?;
        let options = RelayOptions::parse(&body).map_err(RelayError::ConfigParse)?;

        let mut args: Map<String, Value> = params
            .iter()
            .map(|(key, value)| (key.clone(), Value::String(value.clone())))
            .collect();

        let message = params.get("msg").map(String::as_str).unwrap_or_default();
        if message.trim().is_empty() {
            return Ok(self.reply(
                RelayOutcome::EmptyMessage,
                options.twitch_reply_empty_msg(),
                &ArgumentSource::Flat(args),
            ));
        }

        if let Some(pattern) = options.msg_pattern.as_deref() {
            match self.match_message(pattern, message) {
                Some(groups) => {
                    args.insert(MATCH_KEY.to_string(), groups);
                }
                None => {
                    return Ok(self.reply(
                        RelayOutcome::InvalidMessage,
                        options.twitch_reply_invalid_msg(),
                        &ArgumentSource::Flat(args),
                    ));
                }
            }
        }

        let source = ArgumentSource::Flat(args);
        let webhook_message = WebhookMessage {
            username: limit_text(
                &self.render(options.discord_user(), &source),
                self.config.username_max_length,
            ),
            content: limit_text(
                &self.render(options.discord_msg(), &source),
                self.config.content_max_length,
            ),
            wait: true,
        };

        let posted = self.transport.post_webhook(webhook, &webhook_message).await;
        RelayMetrics::record_remote_call("webhook", posted.is_ok());
        posted.map_err(RelayError::Webhook)?;

        Ok(self.reply(RelayOutcome::Forwarded, options.twitch_reply(), &source))
    }

    /// Capture groups when `message` matches; unusable patterns never match
    fn match_message(&self, pattern: &str, message: &str) -> Option<Value> {
        match compile_pattern(pattern, PatternLimits::from(&self.config)) {
            Ok(re) => capture_groups(&re, message),
            Err(e) => {
                tracing::warn!(error = %e, "Unusable msg_pattern, treating message as not matching");
                None
            }
        }
    }

    fn render(&self, template: &str, source: &ArgumentSource) -> String {
        render_with_policy(template, source, self.policy)
    }

    fn reply(&self, outcome: RelayOutcome, template: &str, source: &ArgumentSource) -> RelayReply {
        RelayReply {
            outcome,
            text: limit_text(&self.render(template, source), self.config.max_reply_length),
        }
    }
}

fn required_url<'a>(
    params: &'a HashMap<String, String>,
    name: &'static str,
) -> Result<&'a str, RelayError> {
    let value = params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.is_empty())
        .ok_or(RelayError::MissingParameter(name))?;

    if !URL_PATTERN.is_match(value) {
        return Err(RelayError::InvalidUrl {
            name,
            value: value.to_string(),
        });
    }
    Ok(value)
}
