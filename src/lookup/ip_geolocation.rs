//! Client for the public ip-api.com geolocation endpoint.
//!
//! The service answers a bare GET with a flat JSON record describing the
//! caller's public address. Every field is treated as optional on the wire;
//! an absent field is reported as `MissingField` rather than a decode error.

use crate::error::{ProcessingError, Result};
use crate::settings::LookupSettings;
use reqwest::header::ACCEPT;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Raw response as sent by the service
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IpApiResponse {
    pub status: Option<String>,
    pub message: Option<String>,
    pub query: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "regionName")]
    pub region_name: Option<String>,
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub isp: Option<String>,
}

/// Fully populated lookup result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IpLocation {
    pub query: String,
    pub country: String,
    pub region_name: String,
    pub city: String,
    pub latitude: f64,
    pub longitude: f64,
    pub isp: String,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T> {
    value.ok_or_else(|| ProcessingError::MissingField(field.to_string()))
}

impl IpApiResponse {
    pub fn into_location(self) -> Result<IpLocation> {
        if self.status.as_deref() == Some("fail") {
            return Err(ProcessingError::LookupFailed(
                self.message.unwrap_or_else(|| "unknown reason".to_string()),
            ));
        }

        Ok(IpLocation {
            query: required(self.query, "query")?,
            country: required(self.country, "country")?,
            region_name: required(self.region_name, "regionName")?,
            city: required(self.city, "city")?,
            latitude: required(self.lat, "lat")?,
            longitude: required(self.lon, "lon")?,
            isp: required(self.isp, "isp")?,
        })
    }
}

impl IpLocation {
    pub fn summary(&self) -> String {
        format!(
            "IP Address: {}\n\
            Country: {}\n\
            Region: {}\n\
            City: {}\n\
            Latitude, Longitude: {} , {}\n\
            ISP: {}",
            self.query,
            self.country,
            self.region_name,
            self.city,
            self.latitude,
            self.longitude,
            self.isp
        )
    }
}

pub struct IpLookupClient {
    client: reqwest::Client,
    endpoint: String,
}

impl IpLookupClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("quake-processor/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn from_settings(settings: &LookupSettings) -> Result<Self> {
        Self::new(&settings.endpoint, settings.timeout())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Look up the public address this request originates from
    pub async fn lookup(&self) -> Result<IpLocation> {
        debug!("GET {}", self.endpoint);
        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        let parsed: IpApiResponse = serde_json::from_str(&body)?;
        let location = parsed.into_location()?;

        info!("Resolved {} to {}, {}", location.query, location.city, location.country);
        Ok(location)
    }
}
