use crate::models::Temperature;

const MPS_TO_MPH: f64 = 2.237;

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Convert a Celsius observation to Fahrenheit, rounded to one decimal.
/// An absent reading stays the "unavailable" sentinel rather than becoming
/// a number.
pub fn celsius_to_fahrenheit(celsius: Option<f64>) -> Temperature {
    match celsius {
        Some(c) => Temperature::Degrees(round1(c * 9.0 / 5.0 + 32.0)),
        None => Temperature::Unavailable,
    }
}

/// Convert meters per second to miles per hour, rounded to one decimal.
/// Absent in, absent out.
pub fn mps_to_mph(mps: Option<f64>) -> Option<f64> {
    mps.map(|v| round1(v * MPS_TO_MPH))
}
