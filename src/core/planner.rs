use crate::adapters::http::{build_client, HttpCommuteSource};
use crate::domain::model::{CommuteOptions, RawCommuteData, RawResponse, SourceKind};
use crate::domain::ports::{CommuteSource, ConfigProvider};
use crate::utils::error::Result;
use serde_json::Value;

/// Queries every commute source in turn and returns whatever each one had.
///
/// A failing source never fails the aggregate: the error is logged and the
/// source contributes an empty list (or an empty mapping for raw bodies).
pub struct CommutePlanner {
    sources: Vec<Box<dyn CommuteSource>>,
}

impl CommutePlanner {
    pub fn new(
        public_transport: Box<dyn CommuteSource>,
        bike_sharing: Box<dyn CommuteSource>,
        ride_sharing: Box<dyn CommuteSource>,
    ) -> Self {
        Self {
            sources: vec![public_transport, bike_sharing, ride_sharing],
        }
    }

    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Result<Self> {
        let client = build_client(config)?;

        // reqwest::Client 內部共用連線池，clone 成本很低
        let source = |kind| -> Box<dyn CommuteSource> {
            let http = HttpCommuteSource::from_config(kind, config, client.clone());
            tracing::debug!("Configured {} source at {}", kind, http.endpoint());
            Box::new(http)
        };

        Ok(Self::new(
            source(SourceKind::PublicTransport),
            source(SourceKind::BikeSharing),
            source(SourceKind::RideSharing),
        ))
    }

    fn source(&self, kind: SourceKind) -> Option<&dyn CommuteSource> {
        self.sources
            .iter()
            .find(|s| s.kind() == kind)
            .map(|s| &**s)
    }

    async fn fetch_or_empty(&self, kind: SourceKind, location: &str, destination: &str) -> Vec<Value> {
        let Some(source) = self.source(kind) else {
            tracing::warn!("No {} source configured", kind);
            return Vec::new();
        };

        match source.fetch(location, destination).await {
            Ok(items) => {
                tracing::debug!("{} returned {} entries", kind, items.len());
                items
            }
            Err(e) => {
                tracing::warn!("⚠️ Failed to fetch {} data: {}", kind, e);
                Vec::new()
            }
        }
    }

    async fn fetch_raw_or_empty(
        &self,
        kind: SourceKind,
        location: &str,
        destination: &str,
    ) -> RawResponse {
        let Some(source) = self.source(kind) else {
            tracing::warn!("No {} source configured", kind);
            return RawResponse::new();
        };

        match source.fetch_raw(location, destination).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("⚠️ Failed to fetch raw {} response: {}", kind, e);
                RawResponse::new()
            }
        }
    }

    pub async fn public_transport_schedules(&self, location: &str, destination: &str) -> Vec<Value> {
        self.fetch_or_empty(SourceKind::PublicTransport, location, destination)
            .await
    }

    pub async fn bike_sharing_availability(&self, location: &str, destination: &str) -> Vec<Value> {
        self.fetch_or_empty(SourceKind::BikeSharing, location, destination)
            .await
    }

    pub async fn ride_sharing_options(&self, location: &str, destination: &str) -> Vec<Value> {
        self.fetch_or_empty(SourceKind::RideSharing, location, destination)
            .await
    }

    /// 依序查詢三個來源並合併結果
    pub async fn plan(&self, location: &str, destination: &str) -> CommuteOptions {
        tracing::info!("🚏 Collecting commute options: {} -> {}", location, destination);

        let mut options = CommuteOptions::default();
        for kind in SourceKind::ALL {
            let items = self.fetch_or_empty(kind, location, destination).await;
            options.set(kind, items);
        }

        tracing::info!(
            "✅ Collected {} options (transport: {}, bike: {}, ride: {})",
            options.total(),
            options.get(SourceKind::PublicTransport).len(),
            options.get(SourceKind::BikeSharing).len(),
            options.get(SourceKind::RideSharing).len()
        );
        options
    }

    pub async fn collect_raw(&self, location: &str, destination: &str) -> RawCommuteData {
        tracing::info!("🚏 Collecting raw responses: {} -> {}", location, destination);

        let mut data = RawCommuteData::default();
        for kind in SourceKind::ALL {
            let raw = self.fetch_raw_or_empty(kind, location, destination).await;
            data.set(kind, raw);
        }
        data
    }
}
