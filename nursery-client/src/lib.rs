//! Client-side aggregation for the directory home page: fetches every
//! resource, tracks loading state and answers text searches locally.

pub mod api;
pub mod home;
pub mod readiness;
pub mod search;
pub mod view;

pub use api::{ApiClient, ClientError, Resource};
pub use home::{HomePage, Loaded};
pub use readiness::{Gate, Readiness};
pub use search::{search, ResultFilter, ResultType, SearchResult};
pub use view::{Section, ViewMode};
