use serde::{Deserialize, Serialize};

/// The set of alert event types currently in effect for the monitored point.
/// Order and duplicates are irrelevant; membership is what rules test.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveAlerts {
    events: Vec<String>,
}

impl ActiveAlerts {
    pub fn new(events: Vec<String>) -> Self {
        Self { events }
    }

    pub fn contains(&self, event: &str) -> bool {
        self.events.iter().any(|e| e == event)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
