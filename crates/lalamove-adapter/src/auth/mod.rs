/*
[INPUT]:  API key, secret and a time source
[OUTPUT]: Credentials, HMAC digests and signing timestamps
[POS]:    Auth layer - primitives behind request signing
[UPDATE]: When credential sources or the MAC algorithm change
*/

pub mod clock;
pub mod credentials;
pub mod signer;

pub use clock::{Clock, FixedClock, SystemClock};
pub use credentials::{API_KEY_ENV, API_SECRET_ENV, Credentials};
pub use signer::HmacSigner;
