//! Hosted form-relay client.
//!
//! The relay receives a `multipart/form-data` POST and answers with a small
//! JSON document: `{ "success"?: bool, "message"?: string }`.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, info, warn};

use crate::error::{FormError, Result, SubmitError, DEFAULT_SUBMIT_ERROR};
use crate::fields::HiddenField;
use crate::store::FieldValues;
use crate::validation::is_blank;

/// Environment variable holding the relay endpoint.
pub const ENDPOINT_ENV: &str = "FORM_ACTION";

/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "FORM_RELAY_TIMEOUT_SECS";

/// HTTP request timeout used when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where and how to relay submissions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayConfig {
    /// Endpoint URL receiving the POST.
    pub endpoint: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Static fields sent with every submission.
    pub hidden_fields: Vec<HiddenField>,
}

impl RelayConfig {
    /// Creates a configuration for the given endpoint.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: DEFAULT_TIMEOUT,
            hidden_fields: Vec::new(),
        }
    }

    /// Reads the configuration from `FORM_ACTION` and
    /// `FORM_RELAY_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var(ENDPOINT_ENV)
            .ok()
            .filter(|e| !e.trim().is_empty())
            .ok_or(FormError::MissingConfig(ENDPOINT_ENV))?;

        let mut config = Self::new(endpoint);
        if let Ok(raw) = std::env::var(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| FormError::InvalidConfig {
                key: TIMEOUT_ENV,
                message: format!("expected whole seconds, got {raw:?}"),
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Adds a static hidden field.
    #[must_use]
    pub fn hidden_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.hidden_fields.push(HiddenField::new(name, value));
        self
    }

    /// Adds several static hidden fields.
    #[must_use]
    pub fn hidden_fields(mut self, fields: impl IntoIterator<Item = HiddenField>) -> Self {
        self.hidden_fields.extend(fields);
        self
    }
}

#[derive(Debug, Default, Deserialize)]
struct RelayResponse {
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    message: Option<String>,
}

/// Client posting form values to a relay endpoint.
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    config: Arc<RelayConfig>,
}

impl RelayClient {
    /// Creates a client for the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FormError::Client)?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    /// Returns the client's configuration.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }

    /// Returns the parts sent for these values: every non-blank value, then
    /// the form's hidden fields, then any configured hidden field whose name
    /// the form does not already carry.
    pub fn payload(&self, values: &FieldValues, hidden: &[HiddenField]) -> Vec<(String, String)> {
        let mut parts: Vec<(String, String)> = values
            .iter()
            .filter(|(_, value)| !is_blank(value))
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();
        for field in hidden.iter().chain(&self.config.hidden_fields) {
            if parts.iter().any(|(name, _)| *name == field.name) {
                continue;
            }
            parts.push((field.name.clone(), field.value.clone()));
        }
        parts
    }

    /// Posts the values to the relay.
    ///
    /// A 2xx status or a `"success": true` body counts as success. Anything
    /// else fails with the relay's message, or the generic one.
    pub async fn send(
        &self,
        values: &FieldValues,
        hidden: &[HiddenField],
    ) -> std::result::Result<(), SubmitError> {
        let parts = self.payload(values, hidden);
        let part_count = parts.len();
        let form = parts
            .into_iter()
            .fold(multipart::Form::new(), |form, (name, value)| form.text(name, value));

        info!(endpoint = %self.config.endpoint, parts = part_count, "posting form to relay");

        let response = match self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                warn!(error = %err, "form relay request failed");
                return Err(SubmitError::Relay {
                    status: None,
                    message: DEFAULT_SUBMIT_ERROR.to_string(),
                });
            }
        };

        let status = response.status();
        let body = match response.json::<RelayResponse>().await {
            Ok(body) => body,
            Err(err) => {
                if status.is_success() {
                    debug!(
                        status = status.as_u16(),
                        error = %err,
                        "relay acknowledged without a JSON body"
                    );
                } else {
                    warn!(status = status.as_u16(), error = %err, "unreadable relay response");
                }
                RelayResponse::default()
            }
        };

        if status.is_success() || body.success == Some(true) {
            info!(status = status.as_u16(), "form relay accepted submission");
            return Ok(());
        }

        let message = body
            .message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUBMIT_ERROR.to_string());
        warn!(status = status.as_u16(), message = %message, "form relay rejected submission");
        Err(SubmitError::Relay {
            status: Some(status.as_u16()),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(n, v)| ((*n).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_payload_skips_blank_and_appends_hidden() {
        let config = RelayConfig::new("http://localhost/relay").hidden_field("_subject", "Contato");
        let client = RelayClient::new(config).unwrap();

        let mut values = FieldValues::new();
        values.insert("nome".to_string(), "Pedro".to_string());
        values.insert("mensagem".to_string(), "   ".to_string());

        assert_eq!(
            client.payload(&values, &[]),
            pairs(&[("nome", "Pedro"), ("_subject", "Contato")])
        );
    }

    #[test]
    fn test_payload_prefers_form_hidden_fields() {
        let config = RelayConfig::new("http://localhost/relay")
            .hidden_field("_subject", "Padrão")
            .hidden_field("_template", "table");
        let client = RelayClient::new(config).unwrap();

        let mut values = FieldValues::new();
        values.insert("nome".to_string(), "Pedro".to_string());
        let hidden = [
            HiddenField::new("_subject", "Contato pelo site"),
            HiddenField::new("_captcha", "false"),
        ];

        assert_eq!(
            client.payload(&values, &hidden),
            pairs(&[
                ("nome", "Pedro"),
                ("_subject", "Contato pelo site"),
                ("_captcha", "false"),
                ("_template", "table"),
            ])
        );
    }

    #[test]
    fn test_config_builder() {
        let config = RelayConfig::new("https://relay.example/submit")
            .timeout(Duration::from_secs(5))
            .hidden_fields([HiddenField::new("_to", "contato@aofotografia.com")]);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.hidden_fields.len(), 1);
    }

    // Only test in this crate touching these variables.
    #[test]
    fn test_config_from_env() {
        std::env::remove_var(ENDPOINT_ENV);
        std::env::remove_var(TIMEOUT_ENV);
        assert!(matches!(
            RelayConfig::from_env(),
            Err(FormError::MissingConfig(ENDPOINT_ENV))
        ));

        std::env::set_var(ENDPOINT_ENV, "https://relay.example/submit");
        let config = RelayConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "https://relay.example/submit");
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);

        std::env::set_var(TIMEOUT_ENV, "5");
        assert_eq!(RelayConfig::from_env().unwrap().timeout, Duration::from_secs(5));

        std::env::set_var(TIMEOUT_ENV, "soon");
        assert!(matches!(
            RelayConfig::from_env(),
            Err(FormError::InvalidConfig { key: TIMEOUT_ENV, .. })
        ));

        std::env::remove_var(ENDPOINT_ENV);
        std::env::remove_var(TIMEOUT_ENV);
    }

    #[test]
    fn test_response_body_is_lenient() {
        let body: RelayResponse = serde_json::from_str(r#"{"message":"x"}"#).unwrap();
        assert_eq!(body.success, None);
        assert_eq!(body.message.as_deref(), Some("x"));

        let body: RelayResponse = serde_json::from_str("{}").unwrap();
        assert!(body.success.is_none() && body.message.is_none());
    }
}
