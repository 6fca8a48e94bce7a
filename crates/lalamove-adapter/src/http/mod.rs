/*
[INPUT]:  HTTP client configuration and API endpoints
[OUTPUT]: Signed HTTP requests and typed API results
[POS]:    HTTP layer - REST API communication
[UPDATE]: When adding new endpoints or changing client behavior
*/

pub mod client;
pub mod driver;
pub mod error;
pub mod market;
pub mod order;
pub mod quotation;
pub mod signature;
pub mod webhook;

pub use error::{LalamoveError, Result};
pub use signature::{HeaderLine, SignatureGenerator, SignedHeaders};

pub use client::{ClientConfig, LalamoveClient};
pub use market::{closest_service_by_load, find_city};
