pub mod planner;

pub use crate::domain::model::{CommuteOptions, RawCommuteData, RawResponse, SourceKind};
pub use crate::domain::ports::{CommuteSource, ConfigProvider, Storage};
pub use crate::utils::error::Result;
