/*
[INPUT]:  Message bytes and the account secret
[OUTPUT]: Lowercase hex HMAC-SHA256 digests
[POS]:    Auth layer - cryptographic primitive for request authentication
[UPDATE]: When changing the MAC algorithm or digest encoding
*/

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::http::{LalamoveError, Result};

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 keyed with the account secret
#[derive(Clone)]
pub struct HmacSigner {
    key: Vec<u8>,
}

impl HmacSigner {
    pub fn new(key: &[u8]) -> Self {
        Self { key: key.to_vec() }
    }

    /// Sign a message and return the 64-character lowercase hex digest
    pub fn sign_hex(&self, message: &[u8]) -> Result<String> {
        let mut mac = HmacSha256::new_from_slice(&self.key)
            .map_err(|e| LalamoveError::Signing(e.to_string()))?;
        mac.update(message);
        Ok(hex::encode(mac.finalize().into_bytes()))
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("key", &"[REDACTED]")
            .finish()
    }
}
