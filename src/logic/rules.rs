use crate::logic::risk::RiskDelta;
use crate::logic::text::{heat_index_value, high_near_value, Phrase};
use crate::models::{ActiveAlerts, Comparison, Condition, MatchValue, PolicyRule};

/// Alert event types that make road travel to the field hazardous.
const DRIVING_ALERTS: &[&str] = &["Winter Storm Warning", "Ice Storm Warning", "Flood Warning"];

/// Alert event types that make an open outdoor venue hazardous.
const VENUE_ALERTS: &[&str] = &["Tornado Warning", "Severe Thunderstorm Warning"];

const SEVERE_THUNDERSTORM: &str = "Severe Thunderstorm Warning";

/// Which evaluation instant a context describes. Some condition kinds only
/// apply to one horizon; an inapplicable kind is a no-match, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Horizon {
    Now,
    Future,
}

/// The weather facts available for one evaluation instant. Alerts, observed
/// temperature, and observed wind are only meaningful for the "now" horizon
/// and stay `None` for future periods.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub horizon: Horizon,
    pub narrative: &'a str,
    pub temperature_f: Option<f64>,
    pub wind_mph: Option<f64>,
    pub alerts: Option<&'a ActiveAlerts>,
    pub precip_chance: Option<u8>,
}

impl<'a> RuleContext<'a> {
    /// Context for a future daytime period: narrative text plus its window
    /// precipitation probability.
    pub fn future(narrative: &'a str, precip_chance: Option<u8>) -> Self {
        Self {
            horizon: Horizon::Future,
            narrative,
            temperature_f: None,
            wind_mph: None,
            alerts: None,
            precip_chance,
        }
    }
}

/// A rule that held: the value to report and the risk points it contributes.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleMatch {
    pub value: MatchValue,
    pub risk: RiskDelta,
}

/// Evaluate one policy rule against one context. Pure in its inputs; a rule
/// matches at most once per context.
pub fn evaluate(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    match rule.condition {
        Condition::WeatherAlert => weather_alert(rule, ctx),
        Condition::SnowAccumulation => {
            mention(ctx, Phrase::Snow, "Snow mentioned", RiskDelta::driving(4))
        }
        Condition::IceAccumulation => {
            mention(ctx, Phrase::Ice, "Ice mentioned", RiskDelta::driving(5))
        }
        Condition::RainRate => rain_rate(rule, ctx),
        Condition::WindSpeed => wind_speed(rule, ctx),
        Condition::HailWarning => hail_warning(ctx),
        Condition::Visibility => {
            mention(ctx, Phrase::Fog, "Low visibility", RiskDelta::driving(4))
        }
        Condition::Temperature => temperature(rule, ctx),
        Condition::HeatIndex => heat_index(rule, ctx),
        // No upstream AQI feed; the kind is accepted but never matches.
        Condition::AirQualityIndex => None,
        Condition::Unknown => None,
    }
}

fn mention(ctx: &RuleContext, phrase: Phrase, label: &str, risk: RiskDelta) -> Option<RuleMatch> {
    phrase.matches(ctx.narrative).then(|| RuleMatch {
        value: MatchValue::text(label),
        risk,
    })
}

fn weather_alert(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    let alerts = ctx.alerts?;
    let event = rule.alert_type.as_deref()?;
    if !alerts.contains(event) {
        return None;
    }
    let mut risk = RiskDelta::NONE;
    if DRIVING_ALERTS.contains(&event) {
        risk.driving = 5;
    }
    if VENUE_ALERTS.contains(&event) {
        risk.venue = 5;
    }
    Some(RuleMatch {
        value: MatchValue::text(event),
        risk,
    })
}

fn rain_rate(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    if !Phrase::Rain.matches(ctx.narrative) {
        return None;
    }
    let chance = ctx.precip_chance?;
    let floor = rule.threshold_pct?;
    (chance >= floor).then(|| RuleMatch {
        value: MatchValue::text(format!("{}%", chance)),
        risk: RiskDelta::driving(2),
    })
}

fn wind_speed(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    let wind = ctx.wind_mph?;
    let threshold = rule.threshold?;
    (wind >= threshold).then(|| RuleMatch {
        value: MatchValue::Number(wind),
        risk: RiskDelta::split(2, 3),
    })
}

fn hail_warning(ctx: &RuleContext) -> Option<RuleMatch> {
    let mentioned = Phrase::Hail.matches(ctx.narrative);
    let matched = match ctx.horizon {
        // "Now" additionally requires an active severe-thunderstorm warning;
        // future periods go on the narrative alone.
        Horizon::Now => mentioned && ctx.alerts.is_some_and(|a| a.contains(SEVERE_THUNDERSTORM)),
        Horizon::Future => mentioned,
    };
    matched.then(|| RuleMatch {
        value: MatchValue::text("Hail risk"),
        risk: RiskDelta::venue(5),
    })
}

fn temperature(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    let comparison = rule.comparison?;
    let threshold = rule.threshold?;
    let value = match ctx.horizon {
        Horizon::Now => ctx.temperature_f?,
        Horizon::Future => high_near_value(ctx.narrative)? as f64,
    };
    if !comparison.holds(value, threshold) {
        return None;
    }
    // Only a hot-side match stresses the venue; a cold-side match is a
    // comfort call, not a risk.
    let risk = match comparison {
        Comparison::AtLeast => RiskDelta::venue(2),
        Comparison::AtMost => RiskDelta::NONE,
    };
    Some(RuleMatch {
        value: MatchValue::Number(value),
        risk,
    })
}

fn heat_index(rule: &PolicyRule, ctx: &RuleContext) -> Option<RuleMatch> {
    let threshold = rule.threshold?;
    // The current narrative spells the index out after a "heat index" phrase;
    // future periods only carry it through the "High near N" wording.
    let value = match ctx.horizon {
        Horizon::Now => heat_index_value(ctx.narrative)?,
        Horizon::Future => high_near_value(ctx.narrative)?,
    };
    (value as f64 >= threshold).then(|| RuleMatch {
        value: MatchValue::Number(value as f64),
        risk: RiskDelta::venue(3),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Policy;

    fn rule(json: &str) -> PolicyRule {
        let policy = Policy::from_json(&format!(r#"{{"rules": [{}]}}"#, json)).unwrap();
        policy.rules.into_iter().next().unwrap()
    }

    fn now_ctx<'a>(narrative: &'a str, alerts: &'a ActiveAlerts) -> RuleContext<'a> {
        RuleContext {
            horizon: Horizon::Now,
            narrative,
            temperature_f: Some(71.5),
            wind_mph: Some(12.0),
            alerts: Some(alerts),
            precip_chance: Some(40),
        }
    }

    #[test]
    fn weather_alert_matches_active_event() {
        let alerts = ActiveAlerts::new(vec!["Ice Storm Warning".into()]);
        let r = rule(r#"{"condition": "weather_alert", "type": "Ice Storm Warning", "action": "Stay home"}"#);
        let m = evaluate(&r, &now_ctx("", &alerts)).unwrap();
        assert_eq!(m.value, MatchValue::text("Ice Storm Warning"));
        assert_eq!(m.risk, RiskDelta::driving(5));
    }

    #[test]
    fn weather_alert_routes_venue_risk_for_storm_warnings() {
        let alerts = ActiveAlerts::new(vec!["Tornado Warning".into()]);
        let r = rule(r#"{"condition": "weather_alert", "type": "Tornado Warning", "action": "Shelter"}"#);
        let m = evaluate(&r, &now_ctx("", &alerts)).unwrap();
        assert_eq!(m.risk, RiskDelta::venue(5));
    }

    #[test]
    fn weather_alert_never_matches_future_periods() {
        let r = rule(r#"{"condition": "weather_alert", "type": "Flood Warning", "action": "Stay home"}"#);
        assert!(evaluate(&r, &RuleContext::future("Flooding expected", Some(90))).is_none());
    }

    #[test]
    fn weather_alert_without_type_is_a_no_match() {
        let alerts = ActiveAlerts::new(vec!["Flood Warning".into()]);
        let r = rule(r#"{"condition": "weather_alert", "action": "Stay home"}"#);
        assert!(evaluate(&r, &now_ctx("", &alerts)).is_none());
    }

    #[test]
    fn snow_and_ice_classify_the_narrative() {
        let alerts = ActiveAlerts::default();
        let snow = rule(r#"{"condition": "snow_accumulation", "action": "Shovel"}"#);
        let ice = rule(r#"{"condition": "ice_accumulation", "action": "Salt"}"#);

        let ctx = now_ctx("Snow likely, with icy conditions developing", &alerts);
        assert_eq!(
            evaluate(&snow, &ctx).unwrap().value,
            MatchValue::text("Snow mentioned")
        );
        assert_eq!(evaluate(&snow, &ctx).unwrap().risk, RiskDelta::driving(4));
        assert_eq!(evaluate(&ice, &ctx).unwrap().risk, RiskDelta::driving(5));

        let clear = now_ctx("Sunny and mild", &alerts);
        assert!(evaluate(&snow, &clear).is_none());
        assert!(evaluate(&ice, &clear).is_none());
    }

    #[test]
    fn rain_rate_requires_both_text_and_probability() {
        let r = rule(r#"{"condition": "rain_rate", "threshold_pct": 50, "action": "Tarps"}"#);

        let hit = RuleContext::future("Rain likely after noon", Some(70));
        let m = evaluate(&r, &hit).unwrap();
        assert_eq!(m.value, MatchValue::text("70%"));
        assert_eq!(m.risk, RiskDelta::driving(2));

        // Text without probability, probability without text: both no-match.
        assert!(evaluate(&r, &RuleContext::future("Rain likely", Some(30))).is_none());
        assert!(evaluate(&r, &RuleContext::future("Sunny", Some(90))).is_none());
    }

    #[test]
    fn rain_rate_boundary_is_inclusive() {
        let r = rule(r#"{"condition": "rain_rate", "threshold_pct": 50, "action": "Tarps"}"#);
        assert!(evaluate(&r, &RuleContext::future("Rain showers", Some(50))).is_some());
        assert!(evaluate(&r, &RuleContext::future("Rain showers", Some(49))).is_none());
    }

    #[test]
    fn wind_speed_matches_only_with_an_observed_reading() {
        let alerts = ActiveAlerts::default();
        let r = rule(r#"{"condition": "wind_speed", "threshold": 20, "action": "Secure nets"}"#);

        let mut ctx = now_ctx("", &alerts);
        ctx.wind_mph = Some(25.0);
        let m = evaluate(&r, &ctx).unwrap();
        assert_eq!(m.value, MatchValue::Number(25.0));
        assert_eq!(m.risk, RiskDelta::split(2, 3));

        ctx.wind_mph = Some(19.9);
        assert!(evaluate(&r, &ctx).is_none());

        ctx.wind_mph = None;
        assert!(evaluate(&r, &ctx).is_none());

        // Future periods carry no wind reading.
        assert!(evaluate(&r, &RuleContext::future("Windy, gusts to 40 mph", None)).is_none());
    }

    #[test]
    fn hail_requires_an_active_storm_warning_now_but_not_later() {
        let r = rule(r#"{"condition": "hail_warning", "action": "Cover the dugout"}"#);

        let no_warning = ActiveAlerts::default();
        assert!(evaluate(&r, &now_ctx("Large hail possible", &no_warning)).is_none());

        let warning = ActiveAlerts::new(vec!["Severe Thunderstorm Warning".into()]);
        let m = evaluate(&r, &now_ctx("Large hail possible", &warning)).unwrap();
        assert_eq!(m.value, MatchValue::text("Hail risk"));
        assert_eq!(m.risk, RiskDelta::venue(5));

        // Future horizon drops the alert requirement.
        assert!(evaluate(&r, &RuleContext::future("Hail possible", None)).is_some());
        assert!(evaluate(&r, &RuleContext::future("Sunny", None)).is_none());
    }

    #[test]
    fn temperature_compares_the_observation_now() {
        let alerts = ActiveAlerts::default();
        let cold = rule(r#"{"condition": "temperature", "threshold": 32, "comparison": "<=", "action": "Frostbite risk"}"#);
        let hot = rule(r#"{"condition": "temperature", "threshold": 95, "comparison": ">=", "action": "Heat plan"}"#);

        let mut ctx = now_ctx("", &alerts);
        ctx.temperature_f = Some(28.4);
        let m = evaluate(&cold, &ctx).unwrap();
        assert_eq!(m.value, MatchValue::Number(28.4));
        // Cold-side matches carry no venue credit.
        assert_eq!(m.risk, RiskDelta::NONE);
        assert!(evaluate(&hot, &ctx).is_none());

        ctx.temperature_f = Some(97.0);
        let m = evaluate(&hot, &ctx).unwrap();
        assert_eq!(m.risk, RiskDelta::venue(2));

        ctx.temperature_f = None;
        assert!(evaluate(&cold, &ctx).is_none());
    }

    #[test]
    fn temperature_reads_high_near_for_future_periods() {
        let hot = rule(r#"{"condition": "temperature", "threshold": 90, "comparison": ">=", "action": "Heat plan"}"#);
        let ctx = RuleContext::future("Sunny, with a high near 91.", None);
        let m = evaluate(&hot, &ctx).unwrap();
        assert_eq!(m.value, MatchValue::Number(91.0));
        assert_eq!(m.risk, RiskDelta::venue(2));

        assert!(evaluate(&hot, &RuleContext::future("Cloudy all day", None)).is_none());
    }

    #[test]
    fn heat_index_extraction_differs_by_horizon() {
        let alerts = ActiveAlerts::default();
        let r = rule(r#"{"condition": "heat_index", "threshold": 100, "action": "Shorten drills"}"#);

        let now = now_ctx("Hot, with a heat index near 104", &alerts);
        let m = evaluate(&r, &now).unwrap();
        assert_eq!(m.value, MatchValue::Number(104.0));
        assert_eq!(m.risk, RiskDelta::venue(3));

        // The same phrasing is not consulted for future periods.
        assert!(evaluate(&r, &RuleContext::future("heat index near 104", None)).is_none());
        assert!(evaluate(&r, &RuleContext::future("Sunny, with a high near 102", None)).is_some());
    }

    #[test]
    fn air_quality_and_unknown_kinds_never_match() {
        let alerts = ActiveAlerts::new(vec!["Severe Thunderstorm Warning".into()]);
        let ctx = now_ctx("rain snow ice hail fog heat index 120 High near 120", &alerts);

        let aqi = rule(r#"{"condition": "air_quality_index", "threshold": 1, "action": "Masks"}"#);
        assert!(evaluate(&aqi, &ctx).is_none());

        let unknown = rule(r#"{"condition": "locust_swarm", "action": "Run"}"#);
        assert!(evaluate(&unknown, &ctx).is_none());
        assert!(evaluate(&unknown, &RuleContext::future("anything", Some(100))).is_none());
    }

    #[test]
    fn evaluation_is_deterministic() {
        let alerts = ActiveAlerts::new(vec!["Severe Thunderstorm Warning".into()]);
        let r = rule(r#"{"condition": "hail_warning", "action": "Cover"}"#);
        let ctx = now_ctx("Hail possible this evening", &alerts);

        let first = evaluate(&r, &ctx);
        for _ in 0..10 {
            assert_eq!(evaluate(&r, &ctx), first);
        }
    }
}
