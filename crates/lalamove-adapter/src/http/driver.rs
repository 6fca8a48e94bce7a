/*
[INPUT]:  Order ids, driver ids and cancel reasons
[OUTPUT]: Assigned driver details and driver removal
[POS]:    HTTP layer - driver endpoints
[UPDATE]: When adding driver endpoints or new cancel reasons
*/

use crate::http::client::require_id;
use crate::http::{LalamoveClient, Result};
use crate::types::{CancelDriverRequest, Driver, DriverCancelReason, HttpMethod};

impl LalamoveClient {
    /// GET /v3/orders/{order_id}/drivers/{driver_id}
    pub async fn get_driver(&self, order_id: &str, driver_id: &str) -> Result<Driver> {
        let path = driver_path(order_id, driver_id)?;
        self.get_json(&path, None).await
    }

    /// Remove the assigned driver; the order goes back to matching
    ///
    /// DELETE /v3/orders/{order_id}/drivers/{driver_id}
    pub async fn cancel_driver(
        &self,
        order_id: &str,
        driver_id: &str,
        reason: Option<DriverCancelReason>,
    ) -> Result<()> {
        let path = driver_path(order_id, driver_id)?;
        let request = CancelDriverRequest {
            reason: reason.unwrap_or_default(),
        };
        self.send_empty(HttpMethod::Delete, &path, Some(&request))
            .await
    }
}

fn driver_path(order_id: &str, driver_id: &str) -> Result<String> {
    Ok(format!(
        "/v3/orders/{}/drivers/{}",
        require_id("order id", order_id)?,
        require_id("driver id", driver_id)?
    ))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::auth::{Credentials, FixedClock};
    use crate::http::{ClientConfig, LalamoveClient, LalamoveError};
    use crate::types::DriverCancelReason;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(server: &MockServer) -> LalamoveClient {
        LalamoveClient::with_clock(
            Credentials::new("key123", "s3cr3t"),
            ClientConfig::default(),
            &server.uri(),
            Arc::new(FixedClock::new(1_700_000_000_000)),
        )
        .expect("client init")
    }

    #[tokio::test]
    async fn test_get_driver() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("GET"))
            .and(path("/v3/orders/107900701184/drivers/80557"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": {
                    "driverId": "80557",
                    "phone": "+85211112222",
                    "name": "David",
                    "photo": "",
                    "plateNumber": "VP9946964",
                    "coordinates": {"lat": "22.33547", "lng": "114.17615", "updatedAt": "2022-04-13T07:18:38.00Z"}
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let driver = client_for(&server)
            .get_driver("107900701184", "80557")
            .await
            .expect("get_driver failed");

        assert_eq!(driver.driver_id, "80557");
        assert_eq!(driver.plate_number.as_deref(), Some("VP9946964"));
        assert_eq!(driver.coordinates.expect("coordinates").lat, "22.33547");
    }

    #[tokio::test]
    async fn test_cancel_driver_default_reason() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("DELETE"))
            .and(path("/v3/orders/107900701184/drivers/80557"))
            .and(body_json(json!({"data": {"reason": "DRIVER_UNRESPONSIVE"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .cancel_driver("107900701184", "80557", None)
            .await
            .expect("cancel_driver failed");
    }

    #[tokio::test]
    async fn test_cancel_driver_explicit_reason() {
        let server = MockServer::start().await;
        let _mock = Mock::given(method("DELETE"))
            .and(path("/v3/orders/107900701184/drivers/80557"))
            .and(body_json(json!({"data": {"reason": "DRIVER_LATE"}})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client_for(&server)
            .cancel_driver("107900701184", "80557", Some(DriverCancelReason::DriverLate))
            .await
            .expect("cancel_driver failed");
    }

    #[tokio::test]
    async fn test_driver_ids_are_validated() {
        let server = MockServer::start().await;
        let err = client_for(&server)
            .get_driver("107900701184", " ")
            .await
            .unwrap_err();
        assert!(matches!(err, LalamoveError::InvalidInput(_)));
    }
}
