use crate::error::{FieldwatchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The policy document: an ordered list of condition/action rules loaded once
/// per evaluation pass. Rule order determines match-record order only.
#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    pub rules: Vec<PolicyRule>,
}

impl Policy {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            FieldwatchError::Config(format!("Failed to read policy {}: {}", path.display(), e))
        })?;
        Self::from_json(&raw)
    }
}

/// Closed vocabulary of rule conditions. Kinds this build does not know about
/// deserialize to `Unknown` and never match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    WeatherAlert,
    SnowAccumulation,
    IceAccumulation,
    RainRate,
    WindSpeed,
    HailWarning,
    Visibility,
    Temperature,
    HeatIndex,
    AirQualityIndex,
    #[serde(other)]
    Unknown,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::WeatherAlert => "weather_alert",
            Condition::SnowAccumulation => "snow_accumulation",
            Condition::IceAccumulation => "ice_accumulation",
            Condition::RainRate => "rain_rate",
            Condition::WindSpeed => "wind_speed",
            Condition::HailWarning => "hail_warning",
            Condition::Visibility => "visibility",
            Condition::Temperature => "temperature",
            Condition::HeatIndex => "heat_index",
            Condition::AirQualityIndex => "air_quality_index",
            Condition::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Threshold comparison direction, written `<=` / `>=` in the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Comparison {
    #[serde(rename = "<=")]
    AtMost,
    #[serde(rename = ">=")]
    AtLeast,
}

impl Comparison {
    pub fn holds(&self, value: f64, threshold: f64) -> bool {
        match self {
            Comparison::AtMost => value <= threshold,
            Comparison::AtLeast => value >= threshold,
        }
    }
}

/// One configured rule. Only the fields relevant to the condition kind are
/// populated; a missing field makes the rule a no-match, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct PolicyRule {
    pub condition: Condition,
    #[serde(rename = "type", default)]
    pub alert_type: Option<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub comparison: Option<Comparison>,
    #[serde(default)]
    pub threshold_pct: Option<u8>,
    #[serde(default)]
    pub action: String,
}
