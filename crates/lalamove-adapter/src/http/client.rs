/*
[INPUT]:  HTTP configuration (environment, market, timeouts, credentials)
[OUTPUT]: Configured reqwest client that signs and sends API calls
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::{Clock, Credentials};
use crate::http::signature::SignatureGenerator;
use crate::http::{LalamoveError, Result};
use crate::types::{ApiErrorBody, DataEnvelope, Environment, HttpMethod, ResponseEnvelope};

const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Market code sent in the `Market` header, e.g. `HK`
    pub market: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Fixed `Request-ID`; a fresh UUID is sent per request when `None`
    pub request_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Sandbox,
            market: "HK".to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            request_id: None,
        }
    }
}

/// Main HTTP client for the Lalamove API
#[derive(Debug, Clone)]
pub struct LalamoveClient {
    http_client: Client,
    base_url: Url,
    signer: SignatureGenerator,
    config: ClientConfig,
}

impl LalamoveClient {
    /// Create a new client with default configuration
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        let base_url = config.environment.base_url();
        Self::with_config_and_base_url(credentials, config, base_url)
    }

    /// Create a client against an explicit origin such as a mock server
    ///
    /// Only scheme, host and port are honoured; a base URL with a path is
    /// rejected because API paths are joined from the root.
    pub fn with_config_and_base_url(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
    ) -> Result<Self> {
        let signer = SignatureGenerator::new(credentials);
        Self::with_signer(signer, config, base_url)
    }

    /// Create a client that signs with a caller-supplied clock
    pub fn with_clock(
        credentials: Credentials,
        config: ClientConfig,
        base_url: &str,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let signer = SignatureGenerator::with_clock(credentials, clock);
        Self::with_signer(signer, config, base_url)
    }

    fn with_signer(signer: SignatureGenerator, config: ClientConfig, base_url: &str) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        let base_url = Url::parse(base_url.trim_end_matches('/'))?;
        if base_url.path() != "/" || base_url.query().is_some() {
            return Err(LalamoveError::Config(format!(
                "base url must be an origin without path or query: {base_url}"
            )));
        }

        Ok(Self {
            http_client,
            base_url,
            signer,
            config,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn market(&self) -> &str {
        &self.config.market
    }

    pub fn signer(&self) -> &SignatureGenerator {
        &self.signer
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn request_id(&self) -> String {
        self.config
            .request_id
            .clone()
            .filter(|id| !id.is_empty())
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    fn url(&self, path: &str) -> Result<Url> {
        if !path.starts_with('/') {
            return Err(LalamoveError::InvalidInput(format!(
                "request path must start with '/': {path:?}"
            )));
        }
        Ok(self.base_url.join(path)?)
    }

    /// Sign and send a request, returning the raw response on 2xx
    pub(crate) async fn send_signed(
        &self,
        method: HttpMethod,
        path: &str,
        market: Option<&str>,
        body: Option<String>,
    ) -> Result<Response> {
        let market = market
            .filter(|m| !m.is_empty())
            .unwrap_or(self.config.market.as_str());
        let url = self.url(path)?;
        let target = request_target(&url);
        let body = body.unwrap_or_default();
        let request_id = self.request_id();

        // Sign last so the timestamp is as fresh as possible at dispatch.
        let headers = self
            .signer
            .get_headers(method, &target, market, &body, Some(&request_id))?;

        tracing::debug!(
            method = %method,
            path = %target,
            market,
            request_id = %request_id,
            "sending signed request"
        );

        let mut builder = self
            .http_client
            .request(method.to_reqwest(), url)
            .headers(headers.to_header_map()?);
        if method != HttpMethod::Get && !body.is_empty() {
            builder = builder.body(body);
        }

        let response = builder.send().await?;
        check_status(response).await
    }

    /// Signed GET decoding the `data` envelope
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        market: Option<&str>,
    ) -> Result<T> {
        let response = self.send_signed(HttpMethod::Get, path, market, None).await?;
        let text = response.text().await?;
        decode_envelope(&text)
    }

    /// Send `{"data": payload}` and decode the `data` envelope of the response
    pub(crate) async fn send_json<B, T>(&self, method: HttpMethod, path: &str, payload: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_string(&DataEnvelope::new(payload))?;
        let response = self.send_signed(method, path, None, Some(body)).await?;
        let text = response.text().await?;
        decode_envelope(&text)
    }

    /// Send a request whose success response carries no body (204)
    pub(crate) async fn send_empty<B>(
        &self,
        method: HttpMethod,
        path: &str,
        payload: Option<&B>,
    ) -> Result<()>
    where
        B: Serialize + ?Sized,
    {
        let body = payload
            .map(|data| serde_json::to_string(&DataEnvelope::new(data)))
            .transpose()?;
        self.send_signed(method, path, None, body).await?;
        Ok(())
    }
}

/// Path and query exactly as they go on the wire
fn request_target(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

/// Ids are interpolated into the path; only `[A-Za-z0-9_-]` survives URL
/// normalization unchanged.
pub(crate) fn require_id<'a>(name: &str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    let valid = !value.is_empty()
        && value
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
    if !valid {
        return Err(LalamoveError::InvalidInput(format!(
            "{name} must be a non-empty run of letters, digits, '_' or '-': {value:?}"
        )));
    }
    Ok(value)
}

pub(crate) fn decode_envelope<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: ResponseEnvelope<Option<T>> = serde_json::from_str(text)?;
    envelope
        .data
        .ok_or_else(|| LalamoveError::InvalidResponse("response has no data field".to_string()))
}

async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok());
    let body = response.text().await.unwrap_or_default();
    Err(error_from_response(status, retry_after, &body))
}

pub(crate) fn error_from_response(status: StatusCode, retry_after: Option<u64>, body: &str) -> LalamoveError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        return LalamoveError::RateLimit {
            retry_after: retry_after.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        };
    }

    let parsed = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .filter(|parsed| !parsed.errors.is_empty());
    if parsed.is_none() && !body.is_empty() {
        tracing::warn!(status = status.as_u16(), body, "undecodable error body");
    }

    if status == StatusCode::UNAUTHORIZED {
        let message = parsed
            .as_ref()
            .and_then(|parsed| parsed.errors.first())
            .map(|e| e.id.clone())
            .unwrap_or_else(|| status.to_string());
        return LalamoveError::Authentication { message };
    }

    match parsed {
        Some(parsed) => LalamoveError::Api {
            status: status.as_u16(),
            errors: parsed.errors,
        },
        None => LalamoveError::api_error(status, body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client(base: &str) -> LalamoveClient {
        LalamoveClient::with_config_and_base_url(
            Credentials::new("key", "secret"),
            ClientConfig::default(),
            base,
        )
        .expect("client init")
    }

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.environment, Environment::Sandbox);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.request_id.is_none());
    }

    #[test]
    fn test_base_url_from_environment() {
        let config = ClientConfig {
            environment: Environment::Production,
            ..ClientConfig::default()
        };
        let client = LalamoveClient::with_config(Credentials::new("k", "s"), config).unwrap();
        assert_eq!(client.base_url().as_str(), "https://rest.lalamove.com/");
    }

    #[test]
    fn test_url_join_strips_trailing_slash() {
        let client = client("https://api.example.com/");
        assert_eq!(
            client.url("/v3/cities").unwrap().as_str(),
            "https://api.example.com/v3/cities"
        );
    }

    #[test]
    fn test_request_id_fixed_or_generated() {
        let generated = client("https://api.example.com");
        let first = generated.request_id();
        assert!(Uuid::parse_str(&first).is_ok());
        assert_ne!(first, generated.request_id());

        let fixed = LalamoveClient::with_config_and_base_url(
            Credentials::new("k", "s"),
            ClientConfig {
                request_id: Some("fixed-id".into()),
                ..ClientConfig::default()
            },
            "https://api.example.com",
        )
        .unwrap();
        assert_eq!(fixed.request_id(), "fixed-id");
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id("order id", " 123 ").unwrap(), "123");
        assert_eq!(require_id("city id", "HK_HKG").unwrap(), "HK_HKG");
        assert_eq!(require_id("order id", "abc-9").unwrap(), "abc-9");
        for bad in ["", "1/2", ".", "..", "a b", "123#frag", "1?x=2", "é", "%2F"] {
            assert!(
                matches!(require_id("order id", bad), Err(LalamoveError::InvalidInput(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_signed_target_matches_dispatched_url() {
        let client = client("https://api.example.com");
        let url = client.url("/v3/cities?market=HK").unwrap();
        assert_eq!(request_target(&url), "/v3/cities?market=HK");
        assert_eq!(url.as_str(), "https://api.example.com/v3/cities?market=HK");

        let plain = client.url("/v3/orders/123").unwrap();
        assert_eq!(request_target(&plain), "/v3/orders/123");

        assert!(matches!(client.url("v3/cities"), Err(LalamoveError::InvalidInput(_))));
        assert!(matches!(client.url(""), Err(LalamoveError::InvalidInput(_))));
    }

    #[test]
    fn test_base_url_must_be_origin() {
        for base in ["https://gw.example.com/lalamove", "https://gw.example.com/?x=1"] {
            let err = LalamoveClient::with_config_and_base_url(
                Credentials::new("k", "s"),
                ClientConfig::default(),
                base,
            )
            .unwrap_err();
            assert!(matches!(err, LalamoveError::Config(_)), "{base} should be rejected");
        }
        assert!(
            LalamoveClient::with_config_and_base_url(
                Credentials::new("k", "s"),
                ClientConfig::default(),
                "http://127.0.0.1:8080/",
            )
            .is_ok()
        );
    }

    #[test]
    fn test_decode_envelope() {
        let value: serde_json::Value = decode_envelope(r#"{"data":{"url":"x"}}"#).unwrap();
        assert_eq!(value, json!({"url": "x"}));

        let missing = decode_envelope::<serde_json::Value>(r#"{"errors":[]}"#);
        assert!(matches!(missing, Err(LalamoveError::InvalidResponse(_))));

        let typed: Vec<u32> = decode_envelope(r#"{"data":[1,2],"meta":{}}"#).unwrap();
        assert_eq!(typed, vec![1, 2]);

        let garbage = decode_envelope::<serde_json::Value>("not json");
        assert!(matches!(garbage, Err(LalamoveError::Serialization(_))));
    }

    #[test]
    fn test_error_mapping() {
        let rate = error_from_response(StatusCode::TOO_MANY_REQUESTS, Some(5), "");
        assert!(matches!(rate, LalamoveError::RateLimit { retry_after: 5 }));

        let rate_default = error_from_response(StatusCode::TOO_MANY_REQUESTS, None, "");
        assert_eq!(rate_default.retry_delay(), Some(DEFAULT_RETRY_AFTER_SECS));

        let auth = error_from_response(
            StatusCode::UNAUTHORIZED,
            None,
            r#"{"errors":[{"id":"ERR_UNAUTHORIZED","message":"bad sig"}]}"#,
        );
        match auth {
            LalamoveError::Authentication { message } => assert_eq!(message, "ERR_UNAUTHORIZED"),
            other => panic!("expected Authentication, got {other:?}"),
        }

        let api = error_from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            None,
            r#"{"errors":[{"id":"ERR_INVALID_FIELD","message":"stops"}]}"#,
        );
        match api {
            LalamoveError::Api { status, errors } => {
                assert_eq!(status, 422);
                assert_eq!(errors[0].id, "ERR_INVALID_FIELD");
            }
            other => panic!("expected Api, got {other:?}"),
        }

        let plain = error_from_response(StatusCode::BAD_GATEWAY, None, "<html>");
        match plain {
            LalamoveError::Api { status, errors } => {
                assert_eq!(status, 502);
                assert_eq!(errors[0].message, "<html>");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }
}
