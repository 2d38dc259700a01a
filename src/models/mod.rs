pub mod alert;
pub mod api_token;
pub mod auth;
pub mod metric;
pub mod page;
pub mod timestamp;
pub mod vineyard;

pub use alert::{Alert, AlertPriority};
pub use api_token::{ApiToken, NewApiTokenRequest};
pub use auth::{LoginRequest, LoginResponse};
pub use metric::Metric;
pub use page::PageInfo;
pub use timestamp::{sort_newest_first, Timestamp, Timestamped};
pub use vineyard::{Magnitude, Sensor, Vineyard};
