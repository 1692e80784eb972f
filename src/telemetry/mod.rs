mod init;
mod metrics;

pub use init::init_telemetry;
pub use metrics::{
    FAVORITES_ADDED, FAVORITES_REMOVED, FAVORITES_UPDATED, HTTP_REQUEST_DURATION,
    HTTP_REQUESTS_TOTAL, NEWS_CREATED, TOKENS_ISSUED,
};
