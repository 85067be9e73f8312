//! Character listing client

use async_trait::async_trait;
use reqwest::{Client, Request};
use serde_json::Value;
use tracing::{debug, info};

use crate::api::{ApiError, CharacterPage, FuturamaApi};
use crate::config::Config;
use crate::models::Character;

/// Anything that can produce the character roster
#[async_trait]
pub trait CharacterSource: Send + Sync {
    /// Fetch the first page of characters, in the order the API returns them
    async fn fetch_characters(&self) -> Result<Vec<Character>, ApiError>;
}

/// HTTP client for futuramaapi.com
#[derive(Debug, Clone)]
pub struct FuturamaClient {
    client: Client,
    base_url: String,
}

impl FuturamaClient {
    /// Build a client from configuration
    pub fn new(config: &Config) -> Result<Self, ApiError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.http_timeout() {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &config.http.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if config.http.no_proxy {
            builder = builder.no_proxy();
        }

        Ok(Self {
            client: builder.build()?,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn characters_url(&self) -> String {
        format!("{}{}", self.base_url, FuturamaApi::CHARACTERS_ENDPOINT)
    }

    /// Build the listing request without sending it
    pub fn characters_request(&self) -> Result<Request, ApiError> {
        let request = self
            .client
            .get(self.characters_url())
            .query(&FuturamaApi::CHARACTERS_QUERY)
            .build()?;
        Ok(request)
    }
}

#[async_trait]
impl CharacterSource for FuturamaClient {
    async fn fetch_characters(&self) -> Result<Vec<Character>, ApiError> {
        let request = self.characters_request()?;
        debug!("Fetching characters from: {}", request.url());

        let response = self.client.execute(request).await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status_code: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let characters = parse_character_page(&body)?;
        info!("Fetched {} characters", characters.len());
        Ok(characters)
    }
}

/// Decode a listing body into its characters.
///
/// The body must be a JSON object; a missing or `null` `items` field yields an
/// empty list, any other malformed shape is an error.
pub fn parse_character_page(body: &[u8]) -> Result<Vec<Character>, ApiError> {
    let value: Value = serde_json::from_slice(body)?;
    let kind = match &value {
        Value::Object(_) => None,
        Value::Null => Some("null"),
        Value::Bool(_) => Some("a boolean"),
        Value::Number(_) => Some("a number"),
        Value::String(_) => Some("a string"),
        Value::Array(_) => Some("an array"),
    };
    if let Some(kind) = kind {
        return Err(ApiError::UnexpectedBody(kind));
    }

    let page: CharacterPage = serde_json::from_value(value)?;
    if let (Some(total), Some(pages)) = (page.total, page.pages) {
        debug!("Listing reports {} characters over {} pages", total, pages);
    }
    Ok(page.into_items())
}
