/*
[INPUT]:  Order payloads, order ids, patch payloads and priority fees
[OUTPUT]: Placed/updated orders and cancellation confirmation
[POS]:    HTTP layer - order lifecycle endpoints
[UPDATE]: When adding order endpoints or changing order flow
*/

use rust_decimal::Decimal;

use crate::http::client::require_id;
use crate::http::{LalamoveClient, LalamoveError, Result};
use crate::types::{HttpMethod, Order, OrderPayload, PatchOrderPayload, PriorityFeeRequest};

impl LalamoveClient {
    /// Place an order against a quotation
    ///
    /// POST /v3/orders
    pub async fn place_order(&self, payload: &OrderPayload) -> Result<Order> {
        self.send_json(HttpMethod::Post, "/v3/orders", payload).await
    }

    /// GET /v3/orders/{order_id}
    pub async fn get_order(&self, order_id: &str) -> Result<Order> {
        let path = order_path(order_id)?;
        self.get_json(&path, None).await
    }

    /// Cancel an order; the API answers 204 with no body
    ///
    /// DELETE /v3/orders/{order_id}
    pub async fn cancel_order(&self, order_id: &str) -> Result<()> {
        let path = order_path(order_id)?;
        self.send_empty::<()>(HttpMethod::Delete, &path, None).await
    }

    /// Replace the stops of an order
    ///
    /// PATCH /v3/orders/{order_id}
    pub async fn edit_order(&self, order_id: &str, payload: &PatchOrderPayload) -> Result<Order> {
        let path = order_path(order_id)?;
        self.send_json(HttpMethod::Patch, &path, payload).await
    }

    /// Add a priority fee to speed up driver matching
    ///
    /// POST /v3/orders/{order_id}/priority-fee
    pub async fn add_priority_fee(&self, order_id: &str, fee: Decimal) -> Result<Order> {
        if fee <= Decimal::ZERO {
            return Err(LalamoveError::InvalidInput(
                "priority fee must be positive".to_string(),
            ));
        }
        let path = format!("{}/priority-fee", order_path(order_id)?);
        let request = PriorityFeeRequest { priority_fee: fee };
        self.send_json(HttpMethod::Post, &path, &request).await
    }
}

fn order_path(order_id: &str) -> Result<String> {
    Ok(format!("/v3/orders/{}", require_id("order id", order_id)?))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::auth::{Credentials, FixedClock};
    use crate::http::{ClientConfig, LalamoveClient, LalamoveError};
    use crate::types::{
        Contact, Coordinates, OrderPayload, OrderStatus, PatchOrderPayload, Recipient, Stop,
    };
    use rust_decimal::Decimal;
    use serde_json::json;
    use wiremock::matchers::{any, body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LalamoveClient {
        LalamoveClient::with_clock(
            Credentials::new("key123", "s3cr3t"),
            ClientConfig {
                market: "SG".to_string(),
                ..ClientConfig::default()
            },
            &server.uri(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        )
        .expect("client init")
    }

    fn order_json(status: &str) -> serde_json::Value {
        json!({
            "data": {
                "orderId": "107900701184",
                "quotationId": "1514140994227007571",
                "priceBreakdown": {"base": "90", "total": "90", "currency": "SGD"},
                "driverId": "",
                "shareLink": "https://share.sandbox.lalamove.com/?107900701184",
                "status": status,
                "distance": {"value": "7211", "unit": "m"},
                "stops": [],
                "metadata": {"ref": "A-1"}
            }
        })
    }

    #[tokio::test]
    async fn test_place_order() {
        let server = MockServer::start().await;
        let payload = OrderPayload::builder()
            .quotation_id("1514140994227007571")
            .sender(Contact::new("s1", "Sam", "+6511112222"))
            .recipients(vec![Recipient::new("s2", "Rae", "+6533334444").with_remarks("L3")])
            .metadata_entry("ref", "A-1")
            .build()
            .expect("payload");

        let _mock = Mock::given(method("POST"))
            .and(path("/v3/orders"))
            .and(header("Market", "SG"))
            .and(body_json(json!({
                "data": {
                    "quotationId": "1514140994227007571",
                    "sender": {"stopId": "s1", "name": "Sam", "phone": "+6511112222"},
                    "recipients": [{"stopId": "s2", "name": "Rae", "phone": "+6533334444", "remarks": "L3"}],
                    "metadata": {"ref": "A-1"}
                }
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(order_json("ASSIGNING_DRIVER")))
            .expect(1)
            .mount(&server)
            .await;

        let order = client_for(&server)
            .place_order(&payload)
            .await
            .expect("place_order failed");

        assert_eq!(order.order_id, "107900701184");
        assert_eq!(order.status, OrderStatus::AssigningDriver);
        assert_eq!(order.metadata.expect("metadata")["ref"], json!("A-1"));
    }

    #[tokio::test]
    async fn test_get_order() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/v3/orders/107900701184"))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("ON_GOING")))
            .expect(1)
            .mount(&server)
            .await;

        let order = client_for(&server)
            .get_order("107900701184")
            .await
            .expect("get_order failed");
        assert_eq!(order.status, OrderStatus::OnGoing);
    }

    #[tokio::test]
    async fn test_cancel_order_no_content() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("DELETE"))
            .and(path("/v3/orders/107900701184"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .cancel_order("107900701184")
            .await
            .expect("cancel_order failed");
    }

    #[tokio::test]
    async fn test_cancel_order_conflict() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("DELETE"))
            .and(path("/v3/orders/107900701184"))
            .respond_with(ResponseTemplate::new(409).set_body_json(json!({
                "errors": [{"id": "ERR_CANCELLATION_FORBIDDEN", "message": "too late"}]
            })))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .cancel_order("107900701184")
            .await
            .unwrap_err();
        match err {
            LalamoveError::Api { status, errors } => {
                assert_eq!(status, 409);
                assert_eq!(errors[0].id, "ERR_CANCELLATION_FORBIDDEN");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_edit_order_wraps_stops() {
        let server = MockServer::start().await;
        let patch = PatchOrderPayload::builder()
            .stops(vec![
                Stop::new(Coordinates::new("1.3", "103.8"), "Pickup"),
                Stop::new(Coordinates::new("1.4", "103.9"), "Dropoff"),
            ])
            .build()
            .expect("patch");

        let _mock = Mock::given(method("PATCH"))
            .and(path("/v3/orders/107900701184"))
            .and(body_json(json!({
                "data": {
                    "stops": [
                        {"coordinates": {"lat": "1.3", "lng": "103.8"}, "address": "Pickup"},
                        {"coordinates": {"lat": "1.4", "lng": "103.9"}, "address": "Dropoff"}
                    ]
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("ASSIGNING_DRIVER")))
            .expect(1)
            .mount(&server)
            .await;

        let order = client_for(&server)
            .edit_order("107900701184", &patch)
            .await
            .expect("edit_order failed");
        assert_eq!(order.order_id, "107900701184");
    }

    #[tokio::test]
    async fn test_ids_that_would_be_rewritten_never_reach_the_server() {
        let server = MockServer::start().await;
        let _catch_all = Mock::given(any())
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for id in ["..", ".", "a b", "123#frag", "1?x=2", "é"] {
            let cancel = client.cancel_order(id).await.unwrap_err();
            assert!(matches!(cancel, LalamoveError::InvalidInput(_)), "cancel {id:?}");

            let get = client.get_order(id).await.unwrap_err();
            assert!(matches!(get, LalamoveError::InvalidInput(_)), "get {id:?}");
        }
    }

    #[tokio::test]
    async fn test_add_priority_fee() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("POST"))
            .and(path("/v3/orders/107900701184/priority-fee"))
            .and(body_json(json!({"data": {"priorityFee": "15"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(order_json("ASSIGNING_DRIVER")))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server);
        client
            .add_priority_fee("107900701184", Decimal::from(15))
            .await
            .expect("add_priority_fee failed");

        let err = client
            .add_priority_fee("107900701184", Decimal::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, LalamoveError::InvalidInput(_)));
    }
}
