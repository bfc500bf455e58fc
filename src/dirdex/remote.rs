//! # Remote Fetcher
//!
//! The narrow interface through which the cache engine reaches the hosted
//! catalog, and its production implementation over the catalog's
//! PostgREST-style REST API.
//!
//! Filter hints passed to [`RemoteFetcher::fetch_all`] are advisory
//! server-side narrowing only. The local filter engine re-applies every
//! criterion to whatever comes back, so a remote that ignores the hints
//! still produces correct output.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::error::{DirdexError, Result};
use crate::model::{Directory, FilterSpec, SortKey};

/// Cooperative cancellation flag shared between the CLI layer and the
/// cache engine. Cloning shares the underlying flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }
}

/// External collaborator that retrieves authoritative catalog data.
pub trait RemoteFetcher {
    /// Fetch the full active record set. `hints` may be forwarded to the
    /// server for early narrowing but carry no correctness obligation.
    fn fetch_all(&self, cancel: &CancelToken, hints: Option<&FilterSpec>)
        -> Result<Vec<Directory>>;

    /// Fetch a single active record by slug. Fails with `NotFound` when no
    /// active record matches.
    fn fetch_by_slug(&self, cancel: &CancelToken, slug: &str) -> Result<Directory>;
}

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Production fetcher over the catalog REST endpoint.
pub struct HttpFetcher {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| DirdexError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client,
        })
    }

    fn directories_url(&self) -> String {
        format!("{}/rest/v1/directories", self.base_url)
    }

    fn get_json(&self, url: &str, params: &[(String, String)]) -> Result<Vec<Directory>> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .map_err(|e| DirdexError::RemoteUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(DirdexError::RemoteUnavailable(format!(
                "API error (status {}): {}",
                status, body
            )));
        }

        response
            .json()
            .map_err(|e| DirdexError::RemoteUnavailable(format!("bad response body: {}", e)))
    }
}

/// Build the server-side query parameters for a hinted fetch.
///
/// Uses the API's operator syntax: `gte.`/`lte.` bounds, `in.(…)` set
/// membership and `order=column.desc.nullslast` ordering.
fn hint_params(hints: Option<&FilterSpec>) -> Vec<(String, String)> {
    let mut params = vec![
        ("select".to_string(), "*".to_string()),
        ("is_active".to_string(), "eq.true".to_string()),
    ];

    let Some(spec) = hints else {
        params.push(("order".to_string(), "helpful_count.desc.nullslast".into()));
        return params;
    };

    if let Some(min) = spec.dr_min {
        params.push(("domain_rating".to_string(), format!("gte.{}", min)));
    }
    if let Some(max) = spec.dr_max {
        params.push(("domain_rating".to_string(), format!("lte.{}", max)));
    }
    if !spec.pricing.is_empty() {
        params.push(("pricing".to_string(), format!("in.({})", spec.pricing.join(","))));
    }
    if !spec.link_types.is_empty() {
        params.push((
            "link_type".to_string(),
            format!("in.({})", spec.link_types.join(",")),
        ));
    }

    let order = match spec.sort {
        SortKey::Helpful => "helpful_count.desc.nullslast",
        SortKey::Rating => "domain_rating.desc.nullslast",
        SortKey::Newest => "created_at.desc",
        SortKey::Alpha => "name.asc",
    };
    params.push(("order".to_string(), order.to_string()));

    if spec.limit > 0 {
        params.push(("limit".to_string(), spec.limit.to_string()));
    }
    if spec.offset > 0 {
        params.push(("offset".to_string(), spec.offset.to_string()));
    }

    params
}

impl RemoteFetcher for HttpFetcher {
    fn fetch_all(
        &self,
        cancel: &CancelToken,
        hints: Option<&FilterSpec>,
    ) -> Result<Vec<Directory>> {
        if cancel.is_cancelled() {
            return Err(DirdexError::Cancelled);
        }

        tracing::debug!("fetching directories from remote");
        let records = self.get_json(&self.directories_url(), &hint_params(hints))?;
        tracing::debug!(count = records.len(), "fetched directories");
        Ok(records)
    }

    fn fetch_by_slug(&self, cancel: &CancelToken, slug: &str) -> Result<Directory> {
        if cancel.is_cancelled() {
            return Err(DirdexError::Cancelled);
        }

        let params = vec![
            ("select".to_string(), "*".to_string()),
            ("slug".to_string(), format!("eq.{}", slug)),
        ];
        let mut records = self.get_json(&self.directories_url(), &params)?;

        if records.is_empty() {
            return Err(DirdexError::NotFound(slug.to_string()));
        }
        Ok(records.remove(0))
    }
}
