use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A temperature reading derived from a station observation. NWS omits the
/// value when the sensor has no recent report; the reading then renders as
/// "unavailable" and never enters numeric rule comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Temperature {
    Degrees(f64),
    Unavailable,
}

impl Temperature {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Temperature::Degrees(v) => Some(*v),
            Temperature::Unavailable => None,
        }
    }

}

impl std::fmt::Display for Temperature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Temperature::Degrees(v) => write!(f, "{}", v),
            Temperature::Unavailable => write!(f, "unavailable"),
        }
    }
}

/// Raw latest-observation record as reported by a station, prior to unit
/// conversion. Temperature is Celsius, wind is meters per second; either may
/// be absent in an otherwise successful fetch.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StationObservation {
    pub temperature_c: Option<f64>,
    pub wind_mps: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub description: String,
    pub timestamp: DateTime<Utc>,
}

/// Derived current conditions in display units.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub station: String,
    pub temperature_f: Temperature,
    pub wind_mph: Option<f64>,
    pub humidity_percent: Option<f64>,
    pub description: String,
    pub reported_at: DateTime<Utc>,
}

impl WeatherSnapshot {
    pub fn derive(station: &str, obs: &StationObservation) -> Self {
        use crate::logic::units;

        Self {
            station: station.to_string(),
            temperature_f: units::celsius_to_fahrenheit(obs.temperature_c),
            wind_mph: units::mps_to_mph(obs.wind_mps),
            humidity_percent: obs.humidity_percent,
            description: obs.description.clone(),
            reported_at: obs.timestamp,
        }
    }
}
