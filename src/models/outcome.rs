use super::policy::Condition;
use serde::Serialize;

/// The matched value reported with a rule hit. Text for phrase-style rules
/// ("Snow mentioned", "45%"), numeric for threshold rules.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MatchValue {
    Text(String),
    Number(f64),
}

impl MatchValue {
    pub fn text(value: impl Into<String>) -> Self {
        MatchValue::Text(value.into())
    }
}

impl std::fmt::Display for MatchValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchValue::Text(s) => write!(f, "{}", s),
            MatchValue::Number(n) => write!(f, "{}", n),
        }
    }
}

/// Evidence that one rule held for one time context.
#[derive(Debug, Clone, Serialize)]
pub struct MatchRecord {
    /// "Now" or the display name of the forecast period.
    pub when: String,
    pub condition: Condition,
    pub value: MatchValue,
    pub action: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full result of one evaluation pass, in rule-order within each section.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    pub now_matches: Vec<MatchRecord>,
    pub future_matches: Vec<MatchRecord>,
    pub driving_risk: RiskLevel,
    pub venue_risk: RiskLevel,
}

impl EvaluationOutcome {
    pub fn is_clear(&self) -> bool {
        self.now_matches.is_empty() && self.future_matches.is_empty()
    }
}
