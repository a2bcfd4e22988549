// Data loader - fetches and parses the three dashboard resources
use crate::application::error::LoadError;
use crate::application::resource_transport::ResourceTransport;
use crate::domain::payload::{DetailsPayload, OverviewPayload, TimeseriesPayload};
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use futures::{FutureExt, TryFutureExt};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

pub const OVERVIEW_PATH: &str = "/api/overview";
pub const TIMESERIES_PATH: &str = "/api/timeseries";
pub const DETAILS_PATH: &str = "/api/details";

/// One resolved resource.
#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Overview(OverviewPayload),
    Timeseries(TimeseriesPayload),
    Details(DetailsPayload),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoadedData {
    pub overview: OverviewPayload,
    pub timeseries: TimeseriesPayload,
    pub details: DetailsPayload,
}

/// Pending fetches, yielding each resource as soon as it resolves.
pub type PendingLoads<'a> = FuturesUnordered<BoxFuture<'a, Result<Resource, LoadError>>>;

#[derive(Clone)]
pub struct DataLoader {
    transport: Arc<dyn ResourceTransport>,
}

impl DataLoader {
    pub fn new(transport: Arc<dyn ResourceTransport>) -> Self {
        Self { transport }
    }

    pub async fn fetch_overview(&self, token: &CancellationToken) -> Result<OverviewPayload, LoadError> {
        let payload: OverviewPayload = self.fetch_json(OVERVIEW_PATH, token).await?;
        payload
            .validate()
            .map_err(|message| parse_error(OVERVIEW_PATH, message))?;
        Ok(payload)
    }

    pub async fn fetch_timeseries(&self, token: &CancellationToken) -> Result<TimeseriesPayload, LoadError> {
        let payload: TimeseriesPayload = self.fetch_json(TIMESERIES_PATH, token).await?;
        payload
            .validate()
            .map_err(|message| parse_error(TIMESERIES_PATH, message))?;
        Ok(payload)
    }

    pub async fn fetch_details(&self, token: &CancellationToken) -> Result<DetailsPayload, LoadError> {
        self.fetch_json(DETAILS_PATH, token).await
    }

    /// Fetch all three resources concurrently. The first failure wins and
    /// drops the fetches still in flight.
    pub async fn load_all(&self, token: &CancellationToken) -> Result<LoadedData, LoadError> {
        let (overview, timeseries, details) = tokio::try_join!(
            self.fetch_overview(token),
            self.fetch_timeseries(token),
            self.fetch_details(token),
        )?;

        Ok(LoadedData {
            overview,
            timeseries,
            details,
        })
    }

    /// Start all three fetches; poll the returned set to receive them in completion order.
    pub fn load_each<'a>(&'a self, token: &'a CancellationToken) -> PendingLoads<'a> {
        let pending = FuturesUnordered::new();
        pending.push(self.fetch_overview(token).map_ok(Resource::Overview).boxed());
        pending.push(self.fetch_timeseries(token).map_ok(Resource::Timeseries).boxed());
        pending.push(self.fetch_details(token).map_ok(Resource::Details).boxed());
        pending
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &CancellationToken,
    ) -> Result<T, LoadError> {
        let response = tokio::select! {
            biased;
            _ = token.cancelled() => return Err(LoadError::Cancelled),
            response = self.transport.get(path) => response.map_err(|e| LoadError::Transport {
                path: path.to_string(),
                message: format!("{:#}", e),
            })?,
        };

        if !response.is_success() {
            tracing::debug!(path, status = response.status, "resource request failed");
            return Err(LoadError::Fetch {
                path: path.to_string(),
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| parse_error(path, e.to_string()))
    }
}

fn parse_error(path: &str, message: String) -> LoadError {
    LoadError::Parse {
        path: path.to_string(),
        message,
    }
}
