/*
[INPUT]:  HTTP method, path, body, market, request id, credentials, clock
[OUTPUT]: HMAC signature, auth token and ordered request headers
[POS]:    HTTP layer - request signing for every API call
[UPDATE]: When changing the canonical string, token or header format
*/

use std::fmt;
use std::sync::Arc;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::auth::{Clock, Credentials, HmacSigner, SystemClock};
use crate::http::{LalamoveError, Result};
use crate::types::HttpMethod;

pub const AUTHORIZATION: &str = "Authorization";
pub const MARKET: &str = "Market";
pub const CONTENT_TYPE: &str = "Content-Type";
pub const REQUEST_ID: &str = "Request-ID";

const CRLF: &str = "\r\n";

/// One `Name: value` header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLine {
    pub name: &'static str,
    pub value: String,
}

impl fmt::Display for HeaderLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Ordered headers for a single outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    lines: Vec<HeaderLine>,
    timestamp: u64,
}

impl SignedHeaders {
    pub fn lines(&self) -> &[HeaderLine] {
        &self.lines
    }

    /// Timestamp embedded in the Authorization token
    pub fn timestamp(&self) -> u64 {
        self.timestamp
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.lines
            .iter()
            .find(|line| line.name.eq_ignore_ascii_case(name))
            .map(|line| line.value.as_str())
    }

    /// Render as literal `Name: value` strings in order
    pub fn to_lines(&self) -> Vec<String> {
        self.lines.iter().map(ToString::to_string).collect()
    }

    /// Convert to a reqwest header map, rejecting values that are not valid header text
    pub fn to_header_map(&self) -> Result<HeaderMap> {
        let mut map = HeaderMap::with_capacity(self.lines.len());
        for line in &self.lines {
            let name = HeaderName::from_bytes(line.name.as_bytes()).map_err(|_| {
                LalamoveError::InvalidInput(format!("invalid header name {}", line.name))
            })?;
            let value = HeaderValue::from_str(&line.value).map_err(|_| {
                LalamoveError::InvalidInput(format!("invalid value for header {}", line.name))
            })?;
            map.insert(name, value);
        }
        Ok(map)
    }
}

/// Produces signatures and authorization headers for Lalamove requests
///
/// Holds only immutable credentials and a clock, so one instance can be shared
/// across tasks without locking.
#[derive(Debug, Clone)]
pub struct SignatureGenerator {
    credentials: Credentials,
    hmac: HmacSigner,
    clock: Arc<dyn Clock>,
}

impl SignatureGenerator {
    pub fn new(credentials: Credentials) -> Self {
        Self::with_clock(credentials, Arc::new(SystemClock))
    }

    pub fn with_clock(credentials: Credentials, clock: Arc<dyn Clock>) -> Self {
        let hmac = HmacSigner::new(credentials.secret());
        Self {
            credentials,
            hmac,
            clock,
        }
    }

    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Exact string that gets signed
    ///
    /// `{timestamp}\r\n{METHOD}\r\n{path}\r\n\r\n{body}`, with the body dropped
    /// for GET regardless of what was passed.
    pub fn canonical_string(
        method: HttpMethod,
        path: &str,
        body: &str,
        timestamp: u64,
    ) -> Result<String> {
        validate_path(path)?;
        let body = match method {
            HttpMethod::Get => "",
            _ => body,
        };
        Ok(format!(
            "{timestamp}{CRLF}{method}{CRLF}{path}{CRLF}{CRLF}{body}",
            method = method.as_str()
        ))
    }

    /// Sign a request at an explicit timestamp; returns `(signature_hex, timestamp)`
    pub fn generate_signature(
        &self,
        method: HttpMethod,
        path: &str,
        body: &str,
        timestamp: u64,
    ) -> Result<(String, u64)> {
        let raw = Self::canonical_string(method, path, body, timestamp)?;
        let signature = self.hmac.sign_hex(raw.as_bytes())?;
        tracing::trace!(method = %method, path, timestamp, "request signed");
        Ok((signature, timestamp))
    }

    /// Sign a request at the clock's current time
    pub fn generate_signature_now(
        &self,
        method: HttpMethod,
        path: &str,
        body: &str,
    ) -> Result<(String, u64)> {
        self.generate_signature(method, path, body, self.clock.now_millis())
    }

    /// `{api_key}:{timestamp}:{signature}`
    pub fn create_token(&self, signature: &str, timestamp: u64) -> String {
        format!("{}:{timestamp}:{signature}", self.credentials.api_key())
    }

    /// Headers signed at the clock's current time
    pub fn get_headers(
        &self,
        method: HttpMethod,
        path: &str,
        market: &str,
        body: &str,
        request_id: Option<&str>,
    ) -> Result<SignedHeaders> {
        self.headers_at(
            method,
            path,
            market,
            body,
            request_id,
            self.clock.now_millis(),
        )
    }

    /// Authorization, Market, Content-Type and, when present, Request-ID
    pub fn headers_at(
        &self,
        method: HttpMethod,
        path: &str,
        market: &str,
        body: &str,
        request_id: Option<&str>,
        timestamp: u64,
    ) -> Result<SignedHeaders> {
        let (signature, timestamp) = self.generate_signature(method, path, body, timestamp)?;
        let token = self.create_token(&signature, timestamp);

        let mut lines = vec![
            HeaderLine {
                name: AUTHORIZATION,
                value: format!("hmac {token}"),
            },
            HeaderLine {
                name: MARKET,
                value: market.to_string(),
            },
            HeaderLine {
                name: CONTENT_TYPE,
                value: "application/json".to_string(),
            },
        ];

        if let Some(request_id) = request_id.filter(|id| !id.is_empty()) {
            lines.push(HeaderLine {
                name: REQUEST_ID,
                value: request_id.to_string(),
            });
        }

        Ok(SignedHeaders { lines, timestamp })
    }
}

fn validate_path(path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(LalamoveError::InvalidInput(
            "request path must not be empty".to_string(),
        ));
    }
    if !path.starts_with('/') {
        return Err(LalamoveError::InvalidInput(format!(
            "request path must start with '/': {path:?}"
        )));
    }
    Ok(())
}
