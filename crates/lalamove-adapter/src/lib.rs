/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public Lalamove adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Clock, Credentials, FixedClock, HmacSigner, SystemClock};

// Re-export commonly used types from http
pub use http::{
    ClientConfig,
    HeaderLine,
    LalamoveClient,
    LalamoveError,
    Result,
    SignatureGenerator,
    SignedHeaders,
};

// Re-export all types
pub use types::*;
