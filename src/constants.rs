//! Application constants for EPSS Fetcher
//!
//! Centralizes the provider naming scheme, HTTP client configuration and
//! concurrency defaults, organized by functional domain.

use std::time::Duration;

/// Remote provider naming scheme
pub mod provider {
    /// EPSS score distribution host
    pub const BASE_URL: &str = "https://epss.cyentia.com";

    /// Prefix of every published snapshot file name
    pub const SNAPSHOT_PREFIX: &str = "epss_scores-";

    /// Suffix of every published snapshot file name
    pub const SNAPSHOT_SUFFIX: &str = ".csv.gz";

    /// File name of the alias that redirects to the most recent dated snapshot
    pub const CURRENT_ALIAS: &str = "epss_scores-current.csv.gz";

    /// Header name of the CVE identifier column in published snapshots
    pub const ID_COLUMN: &str = "cve_id";
}

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "EPSS-Fetcher/0.1.0 (Vulnerability Data Mirror)";

    /// Default HTTP request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Maximum number of redirects to follow for snapshot payloads
    pub const MAX_REDIRECTS: usize = 5;
}

/// Worker and concurrency configuration
pub mod workers {
    /// Worker count used when the runtime cannot report available parallelism
    pub const FALLBACK_WORKER_COUNT: usize = 4;
}

// Re-export commonly used constants for convenience
pub use http::{DEFAULT_TIMEOUT as HTTP_TIMEOUT, USER_AGENT};
pub use provider::{BASE_URL as PROVIDER_BASE_URL, ID_COLUMN};
pub use workers::FALLBACK_WORKER_COUNT;
