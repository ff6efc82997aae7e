use crate::config::LocationConfig;
use crate::error::{FieldwatchError, Result};
use crate::models::{ActiveAlerts, ForecastPeriod, HourlyPeriod, StationObservation};
use chrono::{DateTime, Utc};
use serde::Deserialize;

const API_BASE_URL: &str = "https://api.weather.gov";

// api.weather.gov rejects requests without a User-Agent.
const USER_AGENT: &str = concat!("fieldwatch/", env!("CARGO_PKG_VERSION"));

pub struct NwsClient {
    client: reqwest::Client,
    config: LocationConfig,
}

/// Forecast endpoints resolved from the gridpoint metadata for a coordinate.
#[derive(Debug, Clone)]
pub struct GridEndpoints {
    pub forecast: String,
    pub forecast_hourly: String,
}

// NWS API response structures

#[derive(Debug, Deserialize)]
struct PointResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointProperties {
    forecast: String,
    forecast_hourly: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<WirePeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePeriod {
    name: String,
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    is_daytime: bool,
    temperature: i64,
    temperature_unit: String,
    short_forecast: String,
    #[serde(default)]
    detailed_forecast: String,
    #[serde(default)]
    icon: String,
    #[serde(default)]
    wind_speed: Option<String>,
    #[serde(default)]
    wind_direction: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HourlyResponse {
    properties: HourlyProperties,
}

#[derive(Debug, Deserialize)]
struct HourlyProperties {
    periods: Vec<WireHourly>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireHourly {
    start_time: DateTime<Utc>,
    end_time: DateTime<Utc>,
    #[serde(default)]
    probability_of_precipitation: Option<WireValue>,
}

// Quantitative values arrive wrapped, with null for a missing reading.
#[derive(Debug, Deserialize)]
struct WireValue {
    value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct AlertResponse {
    features: Vec<AlertFeature>,
}

#[derive(Debug, Deserialize)]
struct AlertFeature {
    properties: AlertProperties,
}

#[derive(Debug, Deserialize)]
struct AlertProperties {
    event: String,
}

#[derive(Debug, Deserialize)]
struct ObservationResponse {
    properties: ObservationProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ObservationProperties {
    text_description: String,
    timestamp: DateTime<Utc>,
    temperature: WireValue,
    wind_speed: WireValue,
    relative_humidity: WireValue,
}

impl NwsClient {
    pub fn new(config: LocationConfig) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { client, config })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str, what: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FieldwatchError::DataSourceUnavailable(format!("NWS {}: {}", what, e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FieldwatchError::DataSourceUnavailable(format!(
                "NWS {} returned {}: {}",
                what, status, body
            )));
        }

        response.json().await.map_err(|e| {
            FieldwatchError::DataSourceUnavailable(format!(
                "Failed to parse NWS {} response: {}",
                what, e
            ))
        })
    }

    /// Resolve the gridpoint forecast endpoints for the configured coordinate.
    pub async fn resolve_point(&self) -> Result<GridEndpoints> {
        let url = format!(
            "{}/points/{},{}",
            API_BASE_URL, self.config.latitude, self.config.longitude
        );
        let point: PointResponse = self.get_json(&url, "gridpoint").await?;
        tracing::debug!(forecast = %point.properties.forecast, "Resolved gridpoint endpoints");
        Ok(GridEndpoints {
            forecast: point.properties.forecast,
            forecast_hourly: point.properties.forecast_hourly,
        })
    }

    pub async fn fetch_forecast(&self, url: &str) -> Result<Vec<ForecastPeriod>> {
        let forecast: ForecastResponse = self.get_json(url, "forecast").await?;
        Ok(forecast
            .properties
            .periods
            .into_iter()
            .map(convert_period)
            .collect())
    }

    pub async fn fetch_hourly(&self, url: &str) -> Result<Vec<HourlyPeriod>> {
        let hourly: HourlyResponse = self.get_json(url, "hourly forecast").await?;
        Ok(hourly
            .properties
            .periods
            .into_iter()
            .map(|h| HourlyPeriod {
                start_time: h.start_time,
                end_time: h.end_time,
                precip_chance: h
                    .probability_of_precipitation
                    .and_then(|v| v.value)
                    .map(|p| p.clamp(0.0, 100.0) as u8),
            })
            .collect())
    }

    pub async fn fetch_alerts(&self) -> Result<ActiveAlerts> {
        let url = format!(
            "{}/alerts/active?point={},{}",
            API_BASE_URL, self.config.latitude, self.config.longitude
        );
        let alerts: AlertResponse = self.get_json(&url, "alerts").await?;
        Ok(ActiveAlerts::new(
            alerts
                .features
                .into_iter()
                .map(|f| f.properties.event)
                .collect(),
        ))
    }

    pub async fn fetch_observation(&self) -> Result<StationObservation> {
        let url = format!(
            "{}/stations/{}/observations/latest",
            API_BASE_URL, self.config.station
        );
        let obs: ObservationResponse = self.get_json(&url, "observation").await?;
        Ok(StationObservation {
            temperature_c: obs.properties.temperature.value,
            wind_mps: obs.properties.wind_speed.value,
            humidity_percent: obs.properties.relative_humidity.value,
            description: obs.properties.text_description,
            timestamp: obs.properties.timestamp,
        })
    }

    /// Probe the API with the gridpoint lookup.
    pub async fn test_connection(&self) -> Result<bool> {
        let url = format!(
            "{}/points/{},{}",
            API_BASE_URL, self.config.latitude, self.config.longitude
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FieldwatchError::DataSourceUnavailable(format!("NWS: {}", e)))?;
        Ok(response.status().is_success())
    }
}

fn convert_period(p: WirePeriod) -> ForecastPeriod {
    ForecastPeriod {
        name: p.name,
        start_time: p.start_time,
        end_time: p.end_time,
        is_daytime: p.is_daytime,
        temperature: p.temperature,
        temperature_unit: p.temperature_unit,
        short_forecast: p.short_forecast,
        detailed_forecast: p.detailed_forecast,
        icon: p.icon,
        wind_speed: p.wind_speed.unwrap_or_default(),
        wind_direction: p.wind_direction.unwrap_or_default(),
    }
}
