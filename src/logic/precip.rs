use crate::models::{ForecastPeriod, HourlyPeriod};

/// Maximum precipitation probability among hourly periods whose start falls
/// in `[period.start, period.end)`. Absent probabilities count as 0; an
/// empty window reports 0.
pub fn max_precip_in_window(period: &ForecastPeriod, hourly: &[HourlyPeriod]) -> u8 {
    hourly
        .iter()
        .filter(|h| h.start_time >= period.start_time && h.start_time < period.end_time)
        .map(|h| h.precip_chance.unwrap_or(0))
        .max()
        .unwrap_or(0)
}

/// One probability per forecast period, positionally aligned with `periods`.
pub fn chances_by_period(periods: &[ForecastPeriod], hourly: &[HourlyPeriod]) -> Vec<u8> {
    periods
        .iter()
        .map(|p| max_precip_in_window(p, hourly))
        .collect()
}
