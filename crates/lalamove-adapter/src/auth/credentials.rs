/*
[INPUT]:  API key and secret from the caller or environment
[OUTPUT]: Immutable credential pair used by the signer
[POS]:    Auth layer - credential storage
[UPDATE]: When credential sources or env var names change
*/

use std::fmt;

use crate::http::{LalamoveError, Result};

pub const API_KEY_ENV: &str = "LALAMOVE_API_KEY";
pub const API_SECRET_ENV: &str = "LALAMOVE_API_SECRET";

/// API key and secret for a Lalamove account
///
/// `Debug` never prints the secret.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.into(),
        }
    }

    /// Load credentials from `LALAMOVE_API_KEY` and `LALAMOVE_API_SECRET`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same rules as `from_env` over an arbitrary variable source; empty counts as missing
    pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = require_var(&lookup, API_KEY_ENV)?;
        let secret = require_var(&lookup, API_SECRET_ENV)?;
        Ok(Self::new(api_key, secret))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Only for keying the HMAC; never log the return value
    pub(crate) fn secret(&self) -> &[u8] {
        self.secret.as_bytes()
    }
}

fn require_var<F>(lookup: &F, name: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| LalamoveError::Config(format!("missing environment variable {name}")))
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}
