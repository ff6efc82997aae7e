use crate::config::SlackConfig;
use crate::error::{FieldwatchError, Result};
use serde::Deserialize;

const POST_MESSAGE_URL: &str = "https://slack.com/api/chat.postMessage";

/// Relays plain-text payloads to a single pre-configured Slack user.
/// Credentials must be present at construction time; a missing token or
/// target is a configuration error, not a delivery failure.
pub struct SlackNotifier {
    client: reqwest::Client,
    config: SlackConfig,
}

/// Proof of delivery: Slack's message timestamp id.
#[derive(Debug, Clone)]
pub struct SlackReceipt {
    pub ts: String,
}

#[derive(Debug, Deserialize)]
struct PostMessageResponse {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    ts: Option<String>,
}

impl SlackNotifier {
    pub fn new(config: SlackConfig) -> Result<Self> {
        if config.bot_token.is_empty() {
            return Err(FieldwatchError::Config(
                "Slack bot token is not set - export SLACK_BOT_TOKEN or update config".into(),
            ));
        }
        if config.user_id.is_empty() {
            return Err(FieldwatchError::Config(
                "Slack user id is not set - export USER_SLACK_ID or update config".into(),
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            config,
        })
    }

    pub async fn send(&self, text: &str) -> Result<SlackReceipt> {
        let response = self
            .client
            .post(POST_MESSAGE_URL)
            .bearer_auth(&self.config.bot_token)
            .json(&serde_json::json!({
                "channel": self.config.user_id,
                "text": text,
            }))
            .send()
            .await
            .map_err(|e| FieldwatchError::Notification(format!("Slack request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(FieldwatchError::Notification(format!(
                "Slack returned {}",
                response.status()
            )));
        }

        let body: PostMessageResponse = response.json().await.map_err(|e| {
            FieldwatchError::Notification(format!("Failed to parse Slack response: {}", e))
        })?;

        if !body.ok {
            return Err(FieldwatchError::Notification(
                body.error
                    .unwrap_or_else(|| "Slack API returned an error".into()),
            ));
        }

        Ok(SlackReceipt {
            ts: body.ts.unwrap_or_default(),
        })
    }
}
