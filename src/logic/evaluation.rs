use crate::logic::precip;
use crate::logic::risk::RiskScore;
use crate::logic::rules::{self, Horizon, RuleContext};
use crate::models::{
    ActiveAlerts, EvaluationOutcome, ForecastPeriod, HourlyPeriod, MatchRecord, Policy,
    WeatherSnapshot,
};

/// Everything one evaluation pass needs, fully materialized before the pass
/// starts. `periods` holds daytime periods only, in forecast order; index 0
/// covers the present.
#[derive(Debug, Clone)]
pub struct WeatherBundle {
    pub snapshot: WeatherSnapshot,
    pub periods: Vec<ForecastPeriod>,
    pub hourly: Vec<HourlyPeriod>,
    pub alerts: ActiveAlerts,
}

/// Runs the policy over "now" plus the next `lookahead` daytime periods and
/// folds the matches into the two risk levels. Pure and re-entrant; all
/// accumulation state is local to one call.
pub struct Evaluator {
    lookahead: usize,
}

impl Evaluator {
    pub fn new(lookahead: usize) -> Self {
        Self { lookahead }
    }

    pub fn evaluate(&self, policy: &Policy, bundle: &WeatherBundle) -> EvaluationOutcome {
        let chances = precip::chances_by_period(&bundle.periods, &bundle.hourly);
        let mut score = RiskScore::new();

        let narrative = bundle
            .periods
            .first()
            .map(|p| p.detailed_forecast.as_str())
            .unwrap_or("");
        let now_ctx = RuleContext {
            horizon: Horizon::Now,
            narrative,
            temperature_f: bundle.snapshot.temperature_f.as_f64(),
            wind_mph: bundle.snapshot.wind_mph,
            alerts: Some(&bundle.alerts),
            precip_chance: chances.first().copied(),
        };

        let mut now_matches = Vec::new();
        for rule in &policy.rules {
            if let Some(hit) = rules::evaluate(rule, &now_ctx) {
                score.add(hit.risk);
                now_matches.push(MatchRecord {
                    when: "Now".into(),
                    condition: rule.condition,
                    value: hit.value,
                    action: rule.action.clone(),
                });
            }
        }

        let mut future_matches = Vec::new();
        for (idx, period) in bundle
            .periods
            .iter()
            .enumerate()
            .skip(1)
            .take(self.lookahead)
        {
            let ctx = RuleContext::future(&period.detailed_forecast, chances.get(idx).copied());
            for rule in &policy.rules {
                if let Some(hit) = rules::evaluate(rule, &ctx) {
                    score.add(hit.risk);
                    future_matches.push(MatchRecord {
                        when: period.name.clone(),
                        condition: rule.condition,
                        value: hit.value,
                        action: rule.action.clone(),
                    });
                }
            }
        }

        EvaluationOutcome {
            now_matches,
            future_matches,
            driving_risk: score.driving_level(),
            venue_risk: score.venue_level(),
        }
    }
}
