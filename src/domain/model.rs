use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// 已解碼但未處理的回應內容
pub type RawResponse = Map<String, Value>;

pub const DEFAULT_TRANSPORT_ENDPOINT: &str = "https://api.publictransport.example/schedules";
pub const DEFAULT_BIKE_SHARE_ENDPOINT: &str = "https://api.bikesharing.example/availability";
pub const DEFAULT_RIDE_SHARE_ENDPOINT: &str = "https://api.ridesharing.example/options";
pub const DEFAULT_USER_AGENT: &str = concat!("commute-planner/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    PublicTransport,
    BikeSharing,
    RideSharing,
}

impl SourceKind {
    /// Query order used by the planner.
    pub const ALL: [SourceKind; 3] = [
        SourceKind::PublicTransport,
        SourceKind::BikeSharing,
        SourceKind::RideSharing,
    ];

    pub fn key(self) -> &'static str {
        match self {
            SourceKind::PublicTransport => "public_transport",
            SourceKind::BikeSharing => "bike_sharing",
            SourceKind::RideSharing => "ride_sharing",
        }
    }

    /// Name of the array field carried in the service response.
    pub fn response_field(self) -> &'static str {
        match self {
            SourceKind::PublicTransport => "schedules",
            SourceKind::BikeSharing => "availabilities",
            SourceKind::RideSharing => "options",
        }
    }

    pub fn default_endpoint(self) -> &'static str {
        match self {
            SourceKind::PublicTransport => DEFAULT_TRANSPORT_ENDPOINT,
            SourceKind::BikeSharing => DEFAULT_BIKE_SHARE_ENDPOINT,
            SourceKind::RideSharing => DEFAULT_RIDE_SHARE_ENDPOINT,
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommuteOptions {
    pub public_transport: Vec<Value>,
    pub bike_sharing: Vec<Value>,
    pub ride_sharing: Vec<Value>,
}

impl CommuteOptions {
    pub fn get(&self, kind: SourceKind) -> &[Value] {
        match kind {
            SourceKind::PublicTransport => &self.public_transport,
            SourceKind::BikeSharing => &self.bike_sharing,
            SourceKind::RideSharing => &self.ride_sharing,
        }
    }

    pub fn set(&mut self, kind: SourceKind, items: Vec<Value>) {
        match kind {
            SourceKind::PublicTransport => self.public_transport = items,
            SourceKind::BikeSharing => self.bike_sharing = items,
            SourceKind::RideSharing => self.ride_sharing = items,
        }
    }

    pub fn total(&self) -> usize {
        self.public_transport.len() + self.bike_sharing.len() + self.ride_sharing.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCommuteData {
    pub public_transport: RawResponse,
    pub bike_sharing: RawResponse,
    pub ride_sharing: RawResponse,
}

impl RawCommuteData {
    pub fn get(&self, kind: SourceKind) -> &RawResponse {
        match kind {
            SourceKind::PublicTransport => &self.public_transport,
            SourceKind::BikeSharing => &self.bike_sharing,
            SourceKind::RideSharing => &self.ride_sharing,
        }
    }

    pub fn set(&mut self, kind: SourceKind, raw: RawResponse) {
        match kind {
            SourceKind::PublicTransport => self.public_transport = raw,
            SourceKind::BikeSharing => self.bike_sharing = raw,
            SourceKind::RideSharing => self.ride_sharing = raw,
        }
    }
}
