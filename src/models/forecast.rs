use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One named period of the NWS gridpoint forecast (e.g. "Tuesday",
/// "Tuesday Night").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastPeriod {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_daytime: bool,
    pub temperature: i64,
    pub temperature_unit: String,
    pub short_forecast: String,
    pub detailed_forecast: String,
    pub icon: String,
    pub wind_speed: String,
    pub wind_direction: String,
}

/// One hourly forecast period, reduced to what the precipitation window
/// mapper needs. A missing probability counts as 0 when aggregating.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyPeriod {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub precip_chance: Option<u8>,
}
