use std::env;

use anyhow::{Context as _, anyhow, bail};
use base64::{Engine, prelude::BASE64_STANDARD};
use prost::Message;
use tracing::debug;

use crate::proto::{AuthenticatedMessage, Backup, FirstContactRequest, FirstContactResponse};

pub const DEFAULT_DEVICE_ID: &str = "IOS";
pub const DEFAULT_CLIENT_VERSION: u32 = 37;
pub const DEFAULT_FIRST_CONTACT_URL: &str = "https://www.auxbrain.com/ei/first_contact";

/// Identity the bot presents to the game API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    pub device_id: String,
    pub client_version: u32,
    pub first_contact_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            device_id: DEFAULT_DEVICE_ID.to_owned(),
            client_version: DEFAULT_CLIENT_VERSION,
            first_contact_url: DEFAULT_FIRST_CONTACT_URL.to_owned(),
        }
    }
}

impl ApiConfig {
    /// Defaults, overridden by `EI_DEVICE_ID`, `EI_CLIENT_VERSION` and `EI_FIRST_CONTACT_URL`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let device_id = env::var("EI_DEVICE_ID")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.device_id);
        let client_version = env::var("EI_CLIENT_VERSION")
            .ok()
            .and_then(|value| value.trim().parse::<u32>().ok())
            .unwrap_or(defaults.client_version);
        let first_contact_url = env::var("EI_FIRST_CONTACT_URL")
            .ok()
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or(defaults.first_contact_url);

        Self {
            device_id,
            client_version,
            first_contact_url,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
}

impl ApiClient {
    pub fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build http client")?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Ask the game API for the latest backup of a player.
    pub async fn fetch_backup(&self, game_id: &str) -> anyhow::Result<Backup> {
        let data = encode_first_contact_request(&self.config, game_id);

        let body = self
            .http
            .post(&self.config.first_contact_url)
            .form(&[("data", data)])
            .send()
            .await
            .context("failed to reach the Egg, Inc. API")?
            .error_for_status()
            .context("Egg, Inc. API rejected the request")?
            .bytes()
            .await
            .context("failed to read Egg, Inc. API response")?;

        debug!(game_id, bytes = body.len(), "received first contact response");

        backup_from_response(decode_first_contact_response(&body)?, game_id)
    }
}

/// Base64 protobuf payload for the `data` form field.
pub fn encode_first_contact_request(config: &ApiConfig, game_id: &str) -> String {
    let request = FirstContactRequest {
        client_version: Some(config.client_version),
        ei_user_id: Some(game_id.to_owned()),
        device_id: Some(config.device_id.clone()),
    };

    BASE64_STANDARD.encode(request.encode_to_vec())
}

/// Unwrap a base64 `AuthenticatedMessage` body into the first contact response it carries.
pub fn decode_first_contact_response(body: &[u8]) -> anyhow::Result<FirstContactResponse> {
    let raw = BASE64_STANDARD
        .decode(body.trim_ascii())
        .context("response body is not valid base64")?;

    let envelope = AuthenticatedMessage::decode(raw.as_slice())
        .context("failed to decode authenticated message")?;

    if envelope.compressed.unwrap_or(false) {
        bail!("compressed API responses are not supported");
    }

    let message = envelope.message.unwrap_or_default();
    FirstContactResponse::decode(message.as_slice())
        .context("failed to decode first contact response")
}

/// The backup a first contact response carries, or the API's reason for not sending one.
pub fn backup_from_response(response: FirstContactResponse, game_id: &str) -> anyhow::Result<Backup> {
    if let Some(message) = response.error_message.as_deref().filter(|m| !m.is_empty()) {
        bail!("Egg, Inc. API error: {}", message);
    }

    response
        .backup
        .ok_or_else(|| anyhow!("no backup found for user ID '{}'", game_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{Game, ResearchItem};

    fn envelope_body(response: &FirstContactResponse, compressed: bool) -> Vec<u8> {
        let envelope = AuthenticatedMessage {
            message: Some(response.encode_to_vec()),
            code: Some("ignored".to_owned()),
            version: None,
            compressed: Some(compressed),
            original_size: None,
        };

        let mut body = BASE64_STANDARD.encode(envelope.encode_to_vec()).into_bytes();
        body.push(b'\n');
        body
    }

    fn sample_response() -> FirstContactResponse {
        FirstContactResponse {
            backup: Some(Backup {
                user_id: None,
                user_name: Some("akroh".to_owned()),
                game: Some(Game {
                    epic_research: vec![ResearchItem {
                        id: Some("soul_eggs".to_owned()),
                        level: Some(140),
                    }],
                    eggs_of_prophecy: Some(99),
                    soul_eggs_d: Some(4.2e20),
                }),
                ei_user_id: Some("EI5555".to_owned()),
            }),
            ei_user_id: Some("EI5555".to_owned()),
            error_code: None,
            error_message: None,
        }
    }

    #[test]
    fn request_carries_configured_identity() {
        let config = ApiConfig {
            device_id: "DROID".to_owned(),
            client_version: 60,
            ..ApiConfig::default()
        };

        let raw = BASE64_STANDARD
            .decode(encode_first_contact_request(&config, "EI5555"))
            .expect("request should be valid base64");
        let request = FirstContactRequest::decode(raw.as_slice()).expect("valid protobuf");

        assert_eq!(request.ei_user_id.as_deref(), Some("EI5555"));
        assert_eq!(request.device_id.as_deref(), Some("DROID"));
        assert_eq!(request.client_version, Some(60));
    }

    #[test]
    fn unwraps_authenticated_response_body() {
        let decoded = decode_first_contact_response(&envelope_body(&sample_response(), false))
            .expect("response should decode");
        assert_eq!(decoded, sample_response());
    }

    #[test]
    fn rejects_compressed_responses() {
        let err = decode_first_contact_response(&envelope_body(&sample_response(), true))
            .expect_err("compressed payloads are unsupported");
        assert!(err.to_string().contains("compressed"));
    }

    #[test]
    fn rejects_non_base64_bodies() {
        assert!(decode_first_contact_response(b"<html>502</html>").is_err());
    }

    #[test]
    fn extracts_backup_from_successful_response() {
        let backup = backup_from_response(sample_response(), "EI5555").expect("backup is present");
        assert_eq!(backup.user_name.as_deref(), Some("akroh"));
    }

    #[test]
    fn api_error_message_wins_over_backup() {
        let response = FirstContactResponse {
            error_code: Some(3),
            error_message: Some("user not found".to_owned()),
            ..sample_response()
        };

        let err = backup_from_response(response, "EI5555").expect_err("API reported an error");
        assert_eq!(err.to_string(), "Egg, Inc. API error: user not found");
    }

    #[test]
    fn missing_backup_names_the_requested_id() {
        let response = FirstContactResponse {
            backup: None,
            error_message: Some(String::new()),
            ..sample_response()
        };

        let err = backup_from_response(response, "EI404").expect_err("no backup was sent");
        assert_eq!(err.to_string(), "no backup found for user ID 'EI404'");
    }

    #[test]
    fn default_config_targets_first_contact_endpoint() {
        let config = ApiConfig::default();
        assert_eq!(config.device_id, "IOS");
        assert_eq!(config.client_version, 37);
        assert_eq!(config.first_contact_url, DEFAULT_FIRST_CONTACT_URL);
    }
}
