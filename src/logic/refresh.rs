use crate::config::Config;
use crate::datasources::NwsClient;
use crate::error::Result;
use crate::logic::evaluation::WeatherBundle;
use crate::models::WeatherSnapshot;

/// Acquires all weather inputs for one evaluation pass. The gridpoint is
/// resolved first; the four data fetches then run concurrently. Any failure
/// abandons the whole pass: the evaluator is never handed a partial bundle.
pub struct RefreshService {
    client: NwsClient,
    station: String,
    forecast_periods: usize,
}

impl RefreshService {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: NwsClient::new(config.location.clone())?,
            station: config.location.station.clone(),
            forecast_periods: config.monitor.forecast_periods,
        })
    }

    pub async fn refresh(&self) -> Result<WeatherBundle> {
        let endpoints = self.client.resolve_point().await?;

        let (periods, hourly, alerts, observation) = tokio::try_join!(
            self.client.fetch_forecast(&endpoints.forecast),
            self.client.fetch_hourly(&endpoints.forecast_hourly),
            self.client.fetch_alerts(),
            self.client.fetch_observation(),
        )?;

        let snapshot = WeatherSnapshot::derive(&self.station, &observation);
        let daytime: Vec<_> = periods
            .into_iter()
            .filter(|p| p.is_daytime)
            .take(self.forecast_periods)
            .collect();

        tracing::info!(
            periods = daytime.len(),
            hourly = hourly.len(),
            alerts = !alerts.is_empty(),
            "Weather data refreshed"
        );

        Ok(WeatherBundle {
            snapshot,
            periods: daytime,
            hourly,
            alerts,
        })
    }

    pub async fn test_connection(&self) -> Result<bool> {
        self.client.test_connection().await
    }
}
