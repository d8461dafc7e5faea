//! HTTP client for the EPSS score distribution host
//!
//! Owns two differently configured `reqwest` clients: one that follows
//! redirects for snapshot payloads, and a redirect-free one for the
//! latest-date probe, which must read the `Location` header instead of
//! following it. The base URL is injectable so tests can point the client
//! at a stub provider.

use chrono::NaiveDate;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use reqwest::Client;
use tracing::{debug, info};
use url::Url;

use crate::app::dates::extract_snapshot_date;
use crate::app::models::ScoreTable;
use crate::app::paths;
use crate::constants::{http, provider};
use crate::errors::{DateError, DateResult, FetchError, FetchResult};

/// Client for the EPSS snapshot provider
#[derive(Debug, Clone)]
pub struct SnapshotClient {
    /// Payload client; follows redirects
    http: Client,
    /// Probe client; never follows redirects
    probe: Client,
    base_url: Url,
}

impl SnapshotClient {
    /// Create a client against the production provider host
    pub fn new() -> FetchResult<Self> {
        let base_url =
            Url::parse(provider::BASE_URL).map_err(|_| FetchError::InvalidBaseUrl {
                url: provider::BASE_URL.to_string(),
            })?;
        Self::with_base_url(base_url)
    }

    /// Create a client against an arbitrary provider host
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidBaseUrl`] when the URL cannot serve as
    /// a base for snapshot file names, or [`FetchError::Http`] when the
    /// underlying HTTP clients cannot be constructed.
    pub fn with_base_url(base_url: Url) -> FetchResult<Self> {
        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        let payload = Client::builder()
            .user_agent(http::USER_AGENT)
            .timeout(http::DEFAULT_TIMEOUT)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .redirect(Policy::limited(http::MAX_REDIRECTS))
            .build()?;

        let probe = Client::builder()
            .user_agent(http::USER_AGENT)
            .timeout(http::DEFAULT_TIMEOUT)
            .connect_timeout(http::CONNECT_TIMEOUT)
            .redirect(Policy::none())
            .build()?;

        Ok(Self {
            http: payload,
            probe,
            base_url,
        })
    }

    /// The provider host this client talks to
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Canonical remote location of one dated snapshot
    pub fn snapshot_url(&self, date: NaiveDate) -> Url {
        paths::snapshot_url(&self.base_url, date)
    }

    /// Discover the most recent published snapshot date
    ///
    /// Issues a metadata-only HEAD request against the current-snapshot
    /// alias and extracts the ISO date embedded in the redirect target.
    /// Callers invoke this once per sync invocation; the result is not
    /// cached.
    ///
    /// # Errors
    ///
    /// Returns [`DateError::DiscoveryNoRedirect`] when the probe yields no
    /// `Location` header, [`DateError::DiscoveryNoDate`] when the target
    /// contains no recognizable date pattern.
    pub async fn resolve_latest_date(&self) -> DateResult<NaiveDate> {
        let url = paths::current_url(&self.base_url);
        debug!("Probing latest snapshot via {}", url);

        let response = self.probe.head(url).send().await?;
        let status = response.status().as_u16();

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(DateError::DiscoveryNoRedirect { status })?;

        let date = extract_snapshot_date(location).ok_or_else(|| DateError::DiscoveryNoDate {
            location: location.to_string(),
        })?;

        info!("Latest available snapshot is {}", date);
        Ok(date)
    }

    /// Fetch and decode one dated snapshot table
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Status`] when the server answers with a
    /// non-success status, or a decode error when the payload is not the
    /// expected gzip-compressed CSV.
    pub async fn fetch_snapshot(&self, date: NaiveDate) -> FetchResult<ScoreTable> {
        let url = self.snapshot_url(date);
        debug!("Fetching snapshot {}", url);

        let response = self.http.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                date,
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let table = ScoreTable::from_gzip_csv(&body)?;
        debug!("Snapshot {} decoded with {} rows", date, table.len());
        Ok(table)
    }
}
