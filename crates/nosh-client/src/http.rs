//! # Menu API Client
//!
//! Bearer-token JSON-over-HTTP access to the menu endpoints.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Menu API Requests                               │
//! │                                                                         │
//! │  MenuApiClient                       Remote API                         │
//! │  ─────────────                       ──────────                         │
//! │                                                                         │
//! │  GET  /restaurants/{id}/menu  ────►  200 + BuilderSchema JSON           │
//! │                                                                         │
//! │  PUT  /restaurants/{id}/menu  ────►  200 + echoed schema, or            │
//! │       (whole document body)          2xx with empty body                │
//! │                                                                         │
//! │  Every request carries `Authorization: Bearer <token>` when a token     │
//! │  is configured. Non-2xx responses are parsed into the structured        │
//! │  {translationKey, status, message} fault; transient failures are NOT    │
//! │  retried automatically - the owner re-triggers the action.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Submission is all-or-nothing: the whole schema document is the request
//! body, never a partial diff of groups or items.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use nosh_core::menu::BuilderSchema;

use crate::config::ClientConfig;
use crate::error::{ApiFault, ClientError, ClientResult};

// =============================================================================
// Menu API Client
// =============================================================================

/// HTTP client for the menu endpoints of the Nosh remote API.
#[derive(Debug, Clone)]
pub struct MenuApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl MenuApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(MenuApiClient {
            client,
            base_url: config.api.base_url.trim_end_matches('/').to_string(),
            token: config.auth.token.clone(),
        })
    }

    /// Replaces the bearer token (e.g. after the auth session refreshes).
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// The configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn menu_url(&self, restaurant_id: &str) -> String {
        format!("{}/restaurants/{}/menu", self.base_url, restaurant_id)
    }

    // =========================================================================
    // Menu Endpoints
    // =========================================================================

    /// Fetches a restaurant's menu document.
    pub async fn fetch_menu(&self, restaurant_id: &str) -> ClientResult<BuilderSchema> {
        let url = self.menu_url(restaurant_id);
        debug!(%url, "fetching menu document");

        let mut req = self.client.get(&url);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = req.send().await?;
        self.handle_json_response(response).await
    }

    /// Submits the whole edited menu document.
    ///
    /// Returns the schema the API echoed back, or `None` for a 2xx with no
    /// meaningful body. A rejection surfaces as [`ClientError::Api`]; the
    /// caller keeps its in-progress schema and may retry.
    pub async fn submit_menu(
        &self,
        restaurant_id: &str,
        schema: &BuilderSchema,
    ) -> ClientResult<Option<BuilderSchema>> {
        let url = self.menu_url(restaurant_id);
        debug!(%url, groups = schema.menu.len(), "submitting menu document");

        let mut req = self.client.put(&url).json(schema);
        if let Some(auth) = self.auth_header() {
            req = req.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = req.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.parse_fault(status, response).await);
        }

        // The API may echo the stored schema or answer with an empty body
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }
        match serde_json::from_str(&text) {
            Ok(schema) => Ok(Some(schema)),
            Err(e) => {
                warn!(error = %e, "submit succeeded but echo body was not a schema");
                Ok(None)
            }
        }
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    async fn handle_json_response<T: DeserializeOwned>(
        &self,
        response: Response,
    ) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(self.parse_fault(status, response).await);
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| ClientError::UnexpectedBody(e.to_string()))
    }

    /// Parses a non-2xx body into the structured fault, falling back to an
    /// unstructured fault when the body is something else entirely.
    async fn parse_fault(&self, status: StatusCode, response: Response) -> ClientError {
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ApiFault>(&text) {
            Ok(fault) => ClientError::Api(fault),
            Err(_) => ClientError::Api(ApiFault::unstructured(status.as_u16(), text)),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Binds a loopback listener that serves exactly one canned HTTP
    /// response, consuming the full request (head plus announced body)
    /// before answering. Returns the base URL to point the client at.
    async fn serve_once(status_line: &'static str, body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 1024];

            let head_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = request.windows(4).position(|w| w == b"\r\n\r\n") {
                    break pos + 4;
                }
                if n == 0 {
                    return;
                }
            };

            let head = String::from_utf8_lossy(&request[..head_end]).to_lowercase();
            let content_length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            while request.len() < head_end + content_length {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let response = format!(
                "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });

        format!("http://{}", addr)
    }

    fn sample_schema() -> BuilderSchema {
        serde_json::from_str(
            r#"{
                "header": [{"type": "heading", "heading": "Dinner"}],
                "menu": [{"name": "Mains", "timeFrom": "17:00", "timeTo": "22:00", "items": []}]
            }"#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_submit_accepts_empty_success_body() {
        let base = serve_once("200 OK", String::new()).await;
        let client = client_with_base(&base);

        let echo = client
            .submit_menu("r-1", &sample_schema())
            .await
            .unwrap();
        assert!(echo.is_none());
    }

    #[tokio::test]
    async fn test_submit_returns_echoed_schema() {
        let schema = sample_schema();
        let base = serve_once("200 OK", serde_json::to_string(&schema).unwrap()).await;
        let client = client_with_base(&base);

        let echo = client.submit_menu("r-1", &schema).await.unwrap();
        let echo = echo.expect("2xx with a schema body should echo");
        assert_eq!(
            serde_json::to_value(&echo).unwrap(),
            serde_json::to_value(&schema).unwrap()
        );
    }

    #[tokio::test]
    async fn test_submit_parses_structured_fault() {
        let body = r#"{"translationKey": "errors.menu.saveFailed", "status": 422, "message": "Menu document rejected"}"#;
        let base = serve_once("422 Unprocessable Entity", body.to_string()).await;
        let client = client_with_base(&base);

        let err = client
            .submit_menu("r-1", &sample_schema())
            .await
            .unwrap_err();
        let fault = err.api_fault().expect("non-2xx should surface a fault");
        assert_eq!(fault.translation_key, "errors.menu.saveFailed");
        assert_eq!(fault.status, 422);
        assert_eq!(fault.message, "Menu document rejected");
    }

    #[tokio::test]
    async fn test_fetch_falls_back_on_unstructured_fault() {
        let base = serve_once("500 Internal Server Error", "upstream exploded".to_string()).await;
        let client = client_with_base(&base);

        let err = client.fetch_menu("r-1").await.unwrap_err();
        let fault = err.api_fault().unwrap();
        assert_eq!(fault.translation_key, "errors.unknown");
        assert_eq!(fault.status, 500);
        assert_eq!(fault.message, "upstream exploded");
    }

    #[tokio::test]
    async fn test_fetch_decodes_schema_body() {
        let schema = sample_schema();
        let base = serve_once("200 OK", serde_json::to_string(&schema).unwrap()).await;
        let client = client_with_base(&base);

        let fetched = client.fetch_menu("r-1").await.unwrap();
        assert_eq!(fetched.menu.len(), 1);
        assert_eq!(fetched.menu[0].name, "Mains");
    }

    fn client_with_base(base: &str) -> MenuApiClient {
        let mut config = ClientConfig::default();
        config.api.base_url = base.to_string();
        config.auth.token = Some("tok".to_string());
        MenuApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = client_with_base("https://api.nosh.example/api/");
        assert_eq!(client.base_url(), "https://api.nosh.example/api");
        assert_eq!(
            client.menu_url("r-42"),
            "https://api.nosh.example/api/restaurants/r-42/menu"
        );
    }

    #[test]
    fn test_auth_header_format() {
        let client = client_with_base("https://api.nosh.example/api");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer tok"));

        let mut config = ClientConfig::default();
        config.auth.token = None;
        let anonymous = MenuApiClient::new(&config).unwrap();
        assert!(anonymous.auth_header().is_none());
    }

    #[test]
    fn test_invalid_config_rejected_at_construction() {
        let mut config = ClientConfig::default();
        config.api.base_url = "not a url".to_string();
        assert!(MenuApiClient::new(&config).is_err());
    }

    #[test]
    fn test_with_token_replaces() {
        let client = client_with_base("https://api.nosh.example/api").with_token("fresh");
        assert_eq!(client.auth_header().as_deref(), Some("Bearer fresh"));
    }
}
