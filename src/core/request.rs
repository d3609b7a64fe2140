use std::fmt;

use futures::Stream;
use url::Url;

use crate::core::client::constants::{BASE_QUERY, START_PARAM};
use crate::core::services::PageSource;
use crate::core::wire::decode_envelope;
use crate::core::{IssClient, IssError, TableSet};

/// One logical ISS request: an endpoint URL plus its query parameters.
///
/// The request is immutable once built and can be replayed at any row offset,
/// which is what the paging engine does. `iss.json=extended` and `iss.meta=off`
/// are always sent; extra parameters with the same key replace them.
#[derive(Debug, Clone)]
pub struct IssRequest {
    client: IssClient,
    url: Url,
    query: Vec<(String, String)>,
}

impl IssRequest {
    /// Creates a request for an absolute URL.
    pub fn new(client: &IssClient, url: Url) -> Self {
        Self {
            client: client.clone(),
            url,
            query: Vec::new(),
        }
    }

    /// Creates a request for a path relative to the client's base URL
    /// (e.g. `securities.json`).
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the path cannot be joined onto the base URL.
    pub fn endpoint(client: &IssClient, path: &str) -> Result<Self, IssError> {
        Ok(Self::new(client, client.endpoint(path)?))
    }

    /// Adds one extra query parameter, replacing an earlier one with the same key.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        merge_param(&mut self.query, key.into(), value.to_string());
        self
    }

    /// Adds several extra query parameters.
    #[must_use]
    pub fn params<K, V, I>(mut self, params: I) -> Self
    where
        K: Into<String>,
        V: ToString,
        I: IntoIterator<Item = (K, V)>,
    {
        for (k, v) in params {
            merge_param(&mut self.query, k.into(), v.to_string());
        }
        self
    }

    /// The endpoint URL, without query parameters.
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// The caller-supplied extra parameters.
    pub fn extra_query(&self) -> &[(String, String)] {
        &self.query
    }

    /// The full parameter list sent for a page starting at `start`.
    ///
    /// `start` is omitted when it is `None` or `Some(0)`.
    pub fn query_pairs(&self, start: Option<u64>) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = BASE_QUERY
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        for (k, v) in &self.query {
            merge_param(&mut pairs, k.clone(), v.clone());
        }
        if let Some(start) = start.filter(|&s| s != 0) {
            merge_param(&mut pairs, START_PARAM.to_string(), start.to_string());
        }
        pairs
    }

    /// The effective URL of the page starting at `start`.
    pub fn request_url(&self, start: Option<u64>) -> Url {
        let mut url = self.url.clone();
        url.query_pairs_mut().extend_pairs(self.query_pairs(start));
        url
    }

    /// Loads a single page.
    ///
    /// With `None` (or `Some(0)`) the page at the beginning of the dataset is
    /// returned. Requests that answer in one block only need this call.
    ///
    /// # Errors
    ///
    /// - [`IssError::RequestFailed`] on a non-success status.
    /// - [`IssError::MalformedResponse`] if the body is not a `[metadata, data]` envelope.
    /// - [`IssError::Http`] on transport failure.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(url = %self.url))
    )]
    pub async fn fetch_page(&self, start: Option<u64>) -> Result<TableSet, IssError> {
        let url = self.request_url(start);

        let resp = self.client.http().get(url.clone()).send().await?;
        if !resp.status().is_success() {
            return Err(IssError::RequestFailed {
                status: resp.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = crate::core::net::get_text(resp).await?;
        decode_envelope(&body, url.as_str())
    }

    /// Streams every page of a multi-block answer, starting from the first row.
    ///
    /// Each call starts a fresh traversal; see [`crate::paging::pages`].
    pub fn pages(&self) -> impl Stream<Item = Result<TableSet, IssError>> + Send + '_ {
        crate::paging::pages(self)
    }

    /// Loads every page and concatenates same-named tables.
    ///
    /// # Errors
    ///
    /// Any error of any page; no partial result is returned.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self), err, fields(url = %self.url))
    )]
    pub async fn fetch_all(&self) -> Result<TableSet, IssError> {
        crate::paging::fetch_all(self).await
    }
}

impl PageSource for IssRequest {
    fn fetch_at(
        &self,
        start: u64,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<TableSet, IssError>> + Send + '_>>
    {
        Box::pin(self.fetch_page(Some(start)))
    }
}

impl fmt::Display for IssRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IssRequest(url={}, query={:?})", self.url, self.query)
    }
}

fn merge_param(pairs: &mut Vec<(String, String)>, key: String, value: String) {
    match pairs.iter_mut().find(|(k, _)| *k == key) {
        Some(slot) => slot.1 = value,
        None => pairs.push((key, value)),
    }
}
