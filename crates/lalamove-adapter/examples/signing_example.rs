/*
[INPUT]:  API key and secret (fixed demo values)
[OUTPUT]: Canonical string, signature and header lines
[POS]:    Examples - offline request signing
[UPDATE]: When the header set or token format changes
*/

use std::sync::Arc;

use lalamove_adapter::*;

/// Example: sign a request without touching the network
fn main() {
    println!("=== Lalamove Signing Example ===\n");

    let credentials = Credentials::new("key123", "s3cr3t");
    let signer = SignatureGenerator::with_clock(credentials, Arc::new(FixedClock::new(1_700_000_000_000)));

    let body = r#"{"data":{"a":1}}"#;
    let canonical = match SignatureGenerator::canonical_string(HttpMethod::Post, "/v3/orders", body, 1_700_000_000_000) {
        Ok(raw) => raw,
        Err(e) => {
            eprintln!("Failed to build canonical string: {}", e);
            return;
        }
    };
    println!("Canonical string: {:?}\n", canonical);

    match signer.get_headers(HttpMethod::Post, "/v3/orders", "HK", body, Some("demo-request")) {
        Ok(headers) => {
            for line in headers.to_lines() {
                println!("{}", line);
            }
        }
        Err(e) => eprintln!("✗ Signing failed: {}", e),
    }

    println!("\n✓ Signing example complete");
}
