/*
[INPUT]:  Market codes, city locodes and target load values
[OUTPUT]: City listings and the best-fitting service type
[POS]:    HTTP layer - city and service discovery
[UPDATE]: When city response format changes or selection rules change
*/

use rust_decimal::Decimal;

use crate::http::{LalamoveClient, LalamoveError, Result};
use crate::types::City;

const CITIES_PATH: &str = "/v3/cities";

impl LalamoveClient {
    /// List cities and their services for a market
    ///
    /// GET /v3/cities
    pub async fn get_cities(&self, market: Option<&str>) -> Result<Vec<City>> {
        self.get_json(CITIES_PATH, market).await
    }

    /// Fetch a single city by its locode, e.g. `HK_HKG`
    pub async fn get_city(&self, city_id: &str, market: Option<&str>) -> Result<City> {
        let cities = self.get_cities(market).await?;
        find_city(&cities, city_id)
            .cloned()
            .ok_or_else(|| LalamoveError::NotFound(format!("no such city with id: {city_id}")))
    }

    /// Pick the service with the smallest load that still fits `load`
    ///
    /// Searches every city of the market unless `city_id` is given.
    /// Returns `Ok(None)` when no service is large enough.
    pub async fn service_type_by_load(
        &self,
        load: Decimal,
        city_id: Option<&str>,
        market: Option<&str>,
    ) -> Result<Option<String>> {
        let cities = self.get_cities(market).await?;
        let service = match city_id.filter(|id| !id.is_empty()) {
            Some(id) => {
                let city = find_city(&cities, id).ok_or_else(|| {
                    LalamoveError::NotFound(format!("no such city with id: {id}"))
                })?;
                closest_service_by_load(std::slice::from_ref(city), load)
            }
            None => closest_service_by_load(&cities, load),
        };
        tracing::debug!(%load, city = city_id, service = service.as_deref(), "service lookup");
        Ok(service)
    }
}

pub fn find_city<'a>(cities: &'a [City], city_id: &str) -> Option<&'a City> {
    cities.iter().find(|city| city.id == city_id)
}

/// Ties keep the first service encountered
pub fn closest_service_by_load(cities: &[City], target: Decimal) -> Option<String> {
    let mut best: Option<(Decimal, &str)> = None;
    for service in cities.iter().flat_map(|city| city.services.iter()) {
        let Some(capacity) = service.load.as_ref().and_then(|load| load.value) else {
            continue;
        };
        if capacity < target {
            continue;
        }
        if best.is_none_or(|(current, _)| capacity < current) {
            best = Some((capacity, service.key.as_str()));
        }
    }
    best.map(|(_, key)| key.to_string())
}
