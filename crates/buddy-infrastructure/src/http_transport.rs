//! reqwest implementation of the [`Transport`] boundary.
//!
//! Every call is a form POST to `{endpoint}?{method}`. The response body is
//! classified into a [`RawPayload`] or a [`WireError`]:
//!
//! - JSON object with a `data` array: a record set, scalar values stringified
//! - empty body: [`RawPayload::Empty`]
//! - a catalogued service code (or `-1`): [`WireError::Service`]
//! - anything else: [`RawPayload::Text`]

use std::time::Duration;

use async_trait::async_trait;
use buddy_core::transport::WireResult;
use buddy_core::{
    BuddyError, BuddyResult, ClientConfig, ParamBag, RawPayload, ServiceCode, Transport, Upload,
    WireError, WireRecord,
};
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::Value;

// Service codes are short; anything longer is file content.
const MAX_CODE_LEN: usize = 64;

/// Talks to the Buddy web service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    endpoint: String,
}

impl HttpTransport {
    /// Builds a client with the endpoint and timeout from `config`.
    pub fn new(config: &ClientConfig) -> BuddyResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| BuddyError::config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self::with_client(client, config.endpoint.clone()))
    }

    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn url(&self, method: &str) -> String {
        format!("{}?{}", self.endpoint, method)
    }

    async fn send(&self, method: &str, request: reqwest::RequestBuilder) -> Result<reqwest::Response, WireError> {
        let response = request
            .send()
            .await
            .map_err(|e| WireError::Transport(format!("{} request failed: {}", method, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(WireError::Transport(format!(
                "{} returned HTTP {}: {}",
                method, status, error_text
            )));
        }
        Ok(response)
    }

    async fn read_body(method: &str, response: reqwest::Response) -> WireResult {
        let body = response
            .text()
            .await
            .map_err(|e| WireError::Transport(format!("Failed to read {} response: {}", method, e)))?;
        classify_body(&body)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn invoke(&self, method: &str, params: ParamBag) -> WireResult {
        tracing::debug!(method, params = ?params.keys(), "POST");
        let request = self.client.post(self.url(method)).form(params.entries());
        let response = self.send(method, request).await?;
        Self::read_body(method, response).await
    }

    async fn download(&self, method: &str, params: ParamBag) -> Result<Vec<u8>, WireError> {
        tracing::debug!(method, params = ?params.keys(), "POST (download)");
        let request = self.client.post(self.url(method)).form(params.entries());
        let response = self.send(method, request).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| WireError::Transport(format!("Failed to read {} body: {}", method, e)))?;

        // A failed download answers with a code instead of content.
        if bytes.len() <= MAX_CODE_LEN
            && let Ok(text) = std::str::from_utf8(&bytes)
            && ServiceCode::is_known(text.trim())
        {
            return Err(WireError::Service(ServiceCode::new(text.trim())));
        }
        Ok(bytes.to_vec())
    }

    async fn upload(&self, method: &str, params: ParamBag, file: Upload) -> WireResult {
        tracing::debug!(
            method,
            params = ?params.keys(),
            field = %file.field,
            bytes = file.bytes.len(),
            "POST (multipart)"
        );
        let part = Part::bytes(file.bytes)
            .file_name(file.file_name)
            .mime_str(&file.content_type)
            .map_err(|e| WireError::Transport(format!("Invalid content type: {}", e)))?;
        let form = params
            .entries()
            .iter()
            .fold(Form::new(), |form, (key, value)| {
                form.text(key.clone(), value.clone())
            })
            .part(file.field, part);

        let request = self.client.post(self.url(method)).multipart(form);
        let response = self.send(method, request).await?;
        Self::read_body(method, response).await
    }
}

/// Turns a response body into a payload or a service failure.
pub fn classify_body(body: &str) -> WireResult {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(RawPayload::Empty);
    }
    if ServiceCode::is_known(trimmed) {
        return Err(WireError::Service(ServiceCode::new(trimmed)));
    }
    if trimmed.starts_with('{')
        && let Ok(Value::Object(object)) = serde_json::from_str::<Value>(trimmed)
        && let Some(data) = object.get("data")
    {
        return records(data).map(RawPayload::Records);
    }
    Ok(RawPayload::text(trimmed))
}

fn records(data: &Value) -> Result<Vec<WireRecord>, WireError> {
    let Value::Array(rows) = data else {
        return Err(WireError::Transport(
            "response 'data' is not an array".to_string(),
        ));
    };
    rows.iter()
        .map(|row| match row {
            Value::Object(fields) => Ok(fields
                .iter()
                .map(|(key, value)| (key.as_str(), scalar(value)))
                .collect::<WireRecord>()),
            other => Err(WireError::Transport(format!(
                "response row is not an object: {}",
                other
            ))),
        })
        .collect()
}

fn scalar(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_record_set() {
        let body = r#"{"data":[{"UserID":7,"UserName":"ada","CelebMode":false,"UserEmail":null}]}"#;

        let payload = classify_body(body).expect("Should parse records");

        let RawPayload::Records(rows) = payload else {
            panic!("Expected a record set");
        };
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("UserID"), Some("7"));
        assert_eq!(rows[0].get("UserName"), Some("ada"));
        assert_eq!(rows[0].get("CelebMode"), Some("false"));
        assert_eq!(rows[0].get("UserEmail"), Some(""));
    }

    #[test]
    fn test_classify_empty_record_set() {
        assert_eq!(
            classify_body(r#"{"data":[]}"#),
            Ok(RawPayload::Records(Vec::new()))
        );
    }

    #[test]
    fn test_classify_empty_body() {
        assert_eq!(classify_body(""), Ok(RawPayload::Empty));
        assert_eq!(classify_body(" \r\n"), Ok(RawPayload::Empty));
    }

    #[test]
    fn test_classify_service_codes() {
        assert_eq!(
            classify_body("InvalidUsernameOrPassword"),
            Err(WireError::Service(ServiceCode::new("InvalidUsernameOrPassword")))
        );
        assert_eq!(
            classify_body("-1\n"),
            Err(WireError::Service(ServiceCode::negative_one()))
        );
    }

    #[test]
    fn test_classify_scalars() {
        assert_eq!(classify_body("1"), Ok(RawPayload::text("1")));
        assert_eq!(classify_body("UT-abc123"), Ok(RawPayload::text("UT-abc123")));
        assert_eq!(classify_body("Pong"), Ok(RawPayload::text("Pong")));
    }

    #[test]
    fn test_classify_malformed_data() {
        let err = classify_body(r#"{"data":"oops"}"#).unwrap_err();
        assert!(matches!(err, WireError::Transport(_)));

        let err = classify_body(r#"{"data":[1,2]}"#).unwrap_err();
        assert!(matches!(err, WireError::Transport(_)));
    }

    #[test]
    fn test_url_appends_method() {
        let transport = HttpTransport::with_client(Client::new(), "https://example.com/Service.ashx");
        assert_eq!(
            transport.url("Service_Ping_Get"),
            "https://example.com/Service.ashx?Service_Ping_Get"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_transport_failure() {
        let config = ClientConfig::new("app", "secret").with_endpoint("http://127.0.0.1:9/Service.ashx");
        let transport = HttpTransport::new(&config).unwrap();

        let err = transport
            .invoke("Service_Ping_Get", ParamBag::anonymous())
            .await
            .unwrap_err();

        assert!(matches!(err, WireError::Transport(_)));
        let buddy = BuddyError::from_wire(err, "Service_Ping_Get");
        assert!(buddy.is_transport());
    }
}
