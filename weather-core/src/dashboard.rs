//! Display state for a weather front end.
//!
//! `Dashboard` owns the only copy of the state and replaces it wholesale on
//! every transition: `Idle → Loading → Loaded | Failed`. Searches take
//! `&mut self`, so a new search can't start while one is in flight.

use tokio::sync::watch;

use crate::{lookup::WeatherLookupClient, model::WeatherReport};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum DashboardState {
    #[default]
    Idle,
    Loading {
        city: String,
    },
    Loaded(WeatherReport),
    Failed(String),
}

impl DashboardState {
    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardState::Loading { .. })
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        match self {
            DashboardState::Loaded(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DashboardState::Failed(message) => Some(message),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub struct Dashboard {
    client: WeatherLookupClient,
    state: watch::Sender<DashboardState>,
}

impl Dashboard {
    pub fn new(client: WeatherLookupClient) -> Self {
        let (state, _) = watch::channel(DashboardState::Idle);
        Self { client, state }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> DashboardState {
        self.state.borrow().clone()
    }

    /// Receiver that sees every transition, including `Loading`.
    pub fn subscribe(&self) -> watch::Receiver<DashboardState> {
        self.state.subscribe()
    }

    /// Run one search and return the state it settled in.
    ///
    /// Any previous report is dropped before the lookup starts.
    pub async fn search(&mut self, city: &str) -> DashboardState {
        self.state.send_replace(DashboardState::Loading { city: city.trim().to_string() });

        let next = match self.client.search(city).await {
            Ok(report) => {
                tracing::info!(
                    city = %report.current.city,
                    days = report.forecast.len(),
                    "weather loaded"
                );
                DashboardState::Loaded(report)
            }
            Err(err) => {
                tracing::warn!(error = ?err, city, "weather fetch error");
                DashboardState::Failed(err.to_string())
            }
        };

        self.state.send_replace(next.clone());
        next
    }
}
