/*
[INPUT]:  Test configuration and mock server requirements
[OUTPUT]: Shared test utilities, fixtures, and mock helpers
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for lalamove-adapter tests

use std::sync::Arc;

use lalamove_adapter::{ClientConfig, Credentials, FixedClock, LalamoveClient};
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "key123";
pub const TEST_SECRET: &str = "s3cr3t";
pub const TEST_TIMESTAMP: u64 = 1_700_000_000_000;

/// Setup a mock HTTP server for testing
#[allow(dead_code)]
pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

pub fn test_credentials() -> Credentials {
    Credentials::new(TEST_API_KEY, TEST_SECRET)
}

/// Client pinned to `TEST_TIMESTAMP` with a fixed request id
#[allow(dead_code)]
pub fn test_client(server: &MockServer) -> LalamoveClient {
    let config = ClientConfig {
        request_id: Some("test-request".to_string()),
        ..ClientConfig::default()
    };
    LalamoveClient::with_clock(
        test_credentials(),
        config,
        &server.uri(),
        Arc::new(FixedClock::new(TEST_TIMESTAMP)),
    )
    .expect("test client")
}

/// Expected `Authorization` header for a request signed at `TEST_TIMESTAMP`
#[allow(dead_code)]
pub fn authorization(signature: &str) -> String {
    format!("hmac {TEST_API_KEY}:{TEST_TIMESTAMP}:{signature}")
}
