use serde::{Deserialize, Serialize};
use std::env;

use crate::entities::{Position, StationReading};
use crate::error::{malformed_reading_error, upstream_error, Error};

pub const DEFAULT_API_BASE: &str = "https://api.waqi.info";

/// Client for the WAQI air-quality feed endpoint.
#[derive(Clone, Debug)]
pub struct Client {
    http: reqwest::Client,
    base: String,
    token: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Response {
    status: String,
    data: Option<Feed>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct Feed {
    // the live API reports "-" instead of a number for stale stations
    aqi: Option<serde_json::Value>,
    city: Option<City>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
struct City {
    name: Option<String>,
    geo: Option<Vec<f64>>,
}

impl Client {
    pub fn new(base: String, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base,
            token,
        }
    }

    pub fn from_env() -> Result<Self, Error> {
        let base = env::var("WAQI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());
        let token = env::var("WAQI_API_TOKEN")?;

        Ok(Self::new(base, token))
    }

    /// Fetch the current reading for one monitoring station.
    ///
    /// The feed must carry `data.city.name`, a two-element `data.city.geo`
    /// pair and a numeric `data.aqi`; anything else is an error for this
    /// station only.
    #[tracing::instrument(skip(self))]
    pub async fn station_reading(&self, station: &str) -> Result<StationReading, Error> {
        let url = format!("{}/feed/{}/", self.base, station);

        let res = self
            .http
            .get(url)
            .query(&[("token", self.token.as_str())])
            .send()
            .await?;

        if res.status().as_u16() != 200 {
            return Err(upstream_error());
        }

        let data: Response = res.json().await?;

        if data.status != "ok" {
            return Err(upstream_error());
        }

        let feed = data.data.ok_or_else(|| malformed_reading_error(station))?;
        let city = feed.city.ok_or_else(|| malformed_reading_error(station))?;
        let name = city.name.ok_or_else(|| malformed_reading_error(station))?;

        let geo = city.geo.ok_or_else(|| malformed_reading_error(station))?;
        if geo.len() != 2 {
            return Err(malformed_reading_error(station));
        }

        let aqi = feed
            .aqi
            .as_ref()
            .and_then(|value| value.as_i64())
            .ok_or_else(|| malformed_reading_error(station))?;

        Ok(StationReading::new(name, Position::new(geo[0], geo[1]), aqi))
    }
}
