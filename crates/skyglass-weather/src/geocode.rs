//! City search and reverse geocoding.
//! Search uses the Open-Meteo geocoding API; reverse lookups use BigDataCloud's
//! client endpoint. Neither requires an API key.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::WeatherError;
use crate::locale::Locale;
use crate::types::{Coordinates, SearchResult};

pub const GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
pub const REVERSE_GEOCODING_URL: &str =
    "https://api.bigdatacloud.net/data/reverse-geocode-client";

const REQUEST_TIMEOUT_SECS: u64 = 10;
const SEARCH_RESULT_COUNT: u8 = 10;
const MIN_QUERY_CHARS: usize = 2;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReverseResponse {
    city: Option<String>,
    locality: Option<String>,
    principal_subdivision: Option<String>,
}

impl ReverseResponse {
    /// Prefer city > locality > principal subdivision, skipping blanks
    fn place_name(self) -> Option<String> {
        [self.city, self.locality, self.principal_subdivision]
            .into_iter()
            .flatten()
            .map(|s| s.trim().to_string())
            .find(|s| !s.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Arc<Client>,
    search_url: String,
    reverse_url: String,
    locale: Locale,
}

impl GeocodingClient {
    pub fn new(locale: Locale) -> Result<Self, WeatherError> {
        Self::with_urls(GEOCODING_URL, REVERSE_GEOCODING_URL, locale)
    }

    pub fn with_urls(search_url: &str, reverse_url: &str, locale: Locale) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            search_url: search_url.to_string(),
            reverse_url: reverse_url.to_string(),
            locale,
        })
    }

    /// Search cities by name. Short queries and failures yield an empty list.
    #[instrument(skip(self), level = "info")]
    pub async fn search_city(&self, query: &str) -> Vec<SearchResult> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_CHARS {
            return Vec::new();
        }

        match self.try_search(query).await {
            Ok(results) => {
                tracing::debug!("City search {:?} returned {} results", query, results.len());
                results
            }
            Err(e) => {
                tracing::error!("City search error: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_search(&self, query: &str) -> Result<Vec<SearchResult>, WeatherError> {
        let count = SEARCH_RESULT_COUNT.to_string();
        let response = self
            .client
            .get(&self.search_url)
            .query(&[
                ("name", query),
                ("count", count.as_str()),
                ("language", self.locale.api_code()),
                ("format", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(WeatherError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: SearchResponse = serde_json::from_str(&response.text().await?)?;
        Ok(body.results)
    }

    /// Reverse geocode coordinates to a place name.
    /// Returns `None` on failure; the caller can fall back to coordinates.
    #[instrument(skip(self), level = "info")]
    pub async fn reverse_geocode(&self, coords: &Coordinates) -> Option<String> {
        let response = match self
            .client
            .get(&self.reverse_url)
            .query(&[
                ("latitude", coords.latitude.to_string()),
                ("longitude", coords.longitude.to_string()),
                ("localityLanguage", self.locale.api_code().to_string()),
            ])
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("Reverse geocode request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            tracing::debug!("Reverse geocode returned status {}", response.status());
            return None;
        }

        let body: ReverseResponse = match response.json().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("Reverse geocode parse error: {}", e);
                return None;
            }
        };

        let name = body.place_name()?;
        tracing::info!("Reverse geocoded to: {}", name);
        Some(name)
    }

    /// Place name for coordinates, or "lat°, lon°" when lookup fails
    pub async fn city_name(&self, coords: &Coordinates) -> String {
        match self.reverse_geocode(coords).await {
            Some(name) => name,
            None => {
                tracing::warn!("Geocoding failed, using coordinates");
                coords.label()
            }
        }
    }
}
