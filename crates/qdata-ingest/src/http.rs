//! HTTP plumbing shared by the adapters.

use std::time::Duration;

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

use crate::error::SourceError;

/// Longest body excerpt carried in an error message.
const BODY_EXCERPT_CHARS: usize = 500;

/// Builds the client for one adapter. `timeout_secs` bounds every fetch.
pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, SourceError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .user_agent(user_agent)
        .build()?;
    Ok(client)
}

/// Parses an endpoint URL from configuration.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, SourceError> {
    Url::parse(base_url.trim())
        .map_err(|e| SourceError::InvalidConfig(format!("invalid base URL '{base_url}': {e}")))
}

/// Sends `request`, asserts a 2xx status, and parses the body as `T`.
///
/// Non-2xx responses become [`SourceError::UnexpectedStatus`] carrying the
/// provider's `message` field when the body has one, else a body excerpt.
pub(crate) async fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    context: &str,
) -> Result<T, SourceError> {
    let response = request.send().await?;
    let status = response.status();
    let url = response.url().clone();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(SourceError::UnexpectedStatus {
            status: status.as_u16(),
            url: redact_query(&url),
            message: error_message(&body),
        });
    }

    serde_json::from_str(&body).map_err(|e| {
        tracing::debug!(context, body = %excerpt(&body), "response body is not valid JSON");
        SourceError::Deserialize {
            context: context.to_string(),
            source: e,
        }
    })
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(serde_json::Value::as_str)
                .map(str::to_string)
        })
        .unwrap_or_else(|| excerpt(body))
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}

/// Drops the query string so logged URLs never carry credentials.
fn redact_query(url: &Url) -> String {
    let mut url = url.clone();
    url.set_query(None);
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_message_prefers_provider_message() {
        let body =
            r#"{"status":"error","code":"apiKeyInvalid","message":"Your API key is invalid."}"#;
        assert_eq!(error_message(body), "Your API key is invalid.");
    }

    #[test]
    fn error_message_falls_back_to_excerpt() {
        let body = "x".repeat(800);
        assert_eq!(error_message(&body).len(), BODY_EXCERPT_CHARS);
    }

    #[test]
    fn redact_query_strips_parameters() {
        let url = Url::parse("https://newsapi.org/v2/everything?q=finance&apiKey=secret").unwrap();
        assert_eq!(redact_query(&url), "https://newsapi.org/v2/everything");
    }

    #[test]
    fn parse_base_url_rejects_garbage() {
        let err = parse_base_url("not a url").unwrap_err();
        assert!(matches!(err, SourceError::InvalidConfig(_)));
    }
}
