use crate::models::{EvaluationOutcome, ForecastPeriod, MatchRecord, Temperature, WeatherSnapshot};
use chrono::NaiveDateTime;
use std::fmt::Write;

/// Plain-text rendering of engine output. Pure string builders; the engine
/// never reaches back into presentation.

pub fn conditions_section(snapshot: &WeatherSnapshot) -> String {
    let temperature = match snapshot.temperature_f {
        Temperature::Degrees(v) => format!("{}°F", v),
        Temperature::Unavailable => "N/A".into(),
    };
    let wind = snapshot
        .wind_mph
        .map(|w| format!("{} mph", w))
        .unwrap_or_else(|| "N/A".into());
    let humidity = snapshot
        .humidity_percent
        .map(|h| format!("{}%", h))
        .unwrap_or_else(|| "N/A".into());

    let mut out = String::new();
    let _ = writeln!(out, "Current conditions at {}:", snapshot.station);
    let _ = writeln!(out, "  Temperature: {}", temperature);
    let _ = writeln!(out, "  Humidity: {}", humidity);
    let _ = writeln!(out, "  Wind: {}", wind);
    let _ = writeln!(out, "  Conditions: {}", snapshot.description);
    let _ = write!(out, "  Reported: {}", snapshot.reported_at.to_rfc3339());
    out
}

pub fn practice_line(next: NaiveDateTime) -> String {
    format!("Next practice: {}", next.format("%A %B %-d at %-I:%M %p"))
}

pub fn forecast_section(periods: &[ForecastPeriod], chances: &[u8]) -> String {
    let mut out = String::from("Forecast:");
    for (idx, period) in periods.iter().enumerate() {
        let chance = chances.get(idx).copied().unwrap_or(0);
        let _ = write!(
            out,
            "\n  {}: {}°{}, {} (precip {}%)",
            period.name, period.temperature, period.temperature_unit, period.short_forecast, chance
        );
    }
    out
}

fn match_line(out: &mut String, record: &MatchRecord, with_when: bool) {
    if with_when {
        let _ = write!(
            out,
            "\n  {} - {}: {} -> {}",
            record.when, record.condition, record.value, record.action
        );
    } else {
        let _ = write!(
            out,
            "\n  {}: {} -> {}",
            record.condition, record.value, record.action
        );
    }
}

pub fn outcome_section(outcome: &EvaluationOutcome) -> String {
    let mut out = String::new();
    if outcome.is_clear() {
        out.push_str("No current or upcoming weather concerns at this time.");
    } else {
        if !outcome.now_matches.is_empty() {
            out.push_str("Current alert recommendations:");
            for record in &outcome.now_matches {
                match_line(&mut out, record, false);
            }
        }
        if !outcome.future_matches.is_empty() {
            if !out.is_empty() {
                out.push('\n');
            }
            out.push_str("Upcoming alert predictions:");
            for record in &outcome.future_matches {
                match_line(&mut out, record, true);
            }
        }
    }
    let _ = write!(
        out,
        "\nDriving risk: {} | Venue risk: {}",
        outcome.driving_risk, outcome.venue_risk
    );
    out
}

/// Compact payload for the notification sink.
pub fn notification_text(outcome: &EvaluationOutcome) -> String {
    if outcome.is_clear() {
        return format!(
            "fieldwatch: no weather concerns. Driving risk {}, venue risk {}.",
            outcome.driving_risk, outcome.venue_risk
        );
    }
    let mut out = format!(
        "fieldwatch: driving risk {}, venue risk {}.",
        outcome.driving_risk, outcome.venue_risk
    );
    for record in &outcome.now_matches {
        let _ = write!(out, "\nNow - {}: {}", record.value, record.action);
    }
    for record in &outcome.future_matches {
        let _ = write!(out, "\n{} - {}: {}", record.when, record.value, record.action);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, MatchValue, RiskLevel};
    use chrono::{NaiveDate, Utc};

    fn outcome(now: Vec<MatchRecord>, future: Vec<MatchRecord>) -> EvaluationOutcome {
        EvaluationOutcome {
            now_matches: now,
            future_matches: future,
            driving_risk: RiskLevel::Low,
            venue_risk: RiskLevel::Medium,
        }
    }

    fn record(when: &str, condition: Condition, value: MatchValue) -> MatchRecord {
        MatchRecord {
            when: when.into(),
            condition,
            value,
            action: "Do the thing".into(),
        }
    }

    #[test]
    fn clear_outcome_renders_the_no_concern_line() {
        let text = outcome_section(&outcome(Vec::new(), Vec::new()));
        assert!(text.contains("No current or upcoming weather concerns"));
        assert!(text.contains("Driving risk: Low | Venue risk: Medium"));
    }

    #[test]
    fn sections_render_in_order_with_labels() {
        let text = outcome_section(&outcome(
            vec![record("Now", Condition::WindSpeed, MatchValue::Number(25.0))],
            vec![record(
                "Tuesday",
                Condition::SnowAccumulation,
                MatchValue::text("Snow mentioned"),
            )],
        ));
        assert!(text.contains("Current alert recommendations:"));
        assert!(text.contains("wind_speed: 25 -> Do the thing"));
        assert!(text.contains("Upcoming alert predictions:"));
        assert!(text.contains("Tuesday - snow_accumulation: Snow mentioned -> Do the thing"));
    }

    #[test]
    fn conditions_render_unavailable_readings_as_na() {
        let snapshot = WeatherSnapshot {
            station: "KFDK".into(),
            temperature_f: Temperature::Unavailable,
            wind_mph: None,
            humidity_percent: None,
            description: "Unknown".into(),
            reported_at: Utc::now(),
        };
        let text = conditions_section(&snapshot);
        assert!(text.contains("Temperature: N/A"));
        assert!(text.contains("Wind: N/A"));
    }

    #[test]
    fn practice_line_formats_the_occurrence() {
        let next = NaiveDate::from_ymd_opt(2026, 3, 2)
            .unwrap()
            .and_hms_opt(18, 15, 0)
            .unwrap();
        assert_eq!(
            practice_line(next),
            "Next practice: Monday March 2 at 6:15 PM"
        );
    }

    #[test]
    fn notification_text_is_compact() {
        let text = notification_text(&outcome(
            vec![record("Now", Condition::WindSpeed, MatchValue::Number(25.0))],
            Vec::new(),
        ));
        assert!(text.starts_with("fieldwatch: driving risk Low, venue risk Medium."));
        assert!(text.contains("Now - 25: Do the thing"));
    }
}
