/*
[INPUT]:  LALAMOVE_API_KEY / LALAMOVE_API_SECRET environment variables
[OUTPUT]: Sandbox quotation and matching service type
[POS]:    Examples - quotation flow against the sandbox
[UPDATE]: When quotation payload or city lookup changes
*/

use lalamove_adapter::*;
use rust_decimal::Decimal;

/// Example: look up a service type and request a quotation in the HK sandbox
#[tokio::main]
async fn main() {
    println!("=== Lalamove Quotation Example ===\n");

    let credentials = match Credentials::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Missing credentials: {}", e);
            return;
        }
    };
    let client = match LalamoveClient::new(credentials) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Sandbox client created for market {}\n", client.market());

    let service_type = match client
        .service_type_by_load(Decimal::from(5), Some("HK_HKG"), None)
        .await
    {
        Ok(Some(key)) => key,
        Ok(None) => {
            println!("✗ No service fits a 5 kg load");
            return;
        }
        Err(e) => {
            eprintln!("✗ City lookup failed: {}", e);
            return;
        }
    };
    println!("✓ Service type: {}", service_type);

    let payload = match QuotationPayload::builder()
        .service_type(service_type)
        .language("en_HK")
        .stops(vec![
            Stop::new(Coordinates::new("22.3353139", "114.1758402"), "Innocentre, 72 Tat Chee Ave, Kowloon Tong"),
            Stop::new(Coordinates::new("22.2812946", "114.1598610"), "Statue Square, Des Voeux Rd Central"),
        ])
        .build()
    {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Invalid payload: {}", e);
            return;
        }
    };

    match client.create_quotation(&payload).await {
        Ok(quotation) => println!(
            "✓ Quotation {}: {} {}",
            quotation.quotation_id, quotation.price_breakdown.total, quotation.price_breakdown.currency
        ),
        Err(e) => println!("✗ Error: {}", e),
    }

    println!("\n✓ Quotation example complete");
}
