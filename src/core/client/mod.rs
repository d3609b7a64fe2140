//! Public client surface + builder.
//! Defaults (base URL, UA, protocol parameters) live in `constants`.

pub(crate) mod constants;

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::core::IssError;
use constants::{DEFAULT_BASE_URL, USER_AGENT};

/// A handle to the ISS REST server.
///
/// Wraps the HTTP session and the base URL every endpoint path is resolved
/// against. Cloning is cheap and shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct IssClient {
    http: Client,
    base_url: Url,
}

impl Default for IssClient {
    /// A client for the public ISS server with default settings.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP session cannot be built (e.g. the TLS backend fails
    /// to initialize). Use [`IssClient::builder`] to handle that as an error.
    fn default() -> Self {
        Self::builder().build().expect("default client")
    }
}

impl IssClient {
    /// Create a new builder.
    pub fn builder() -> IssClientBuilder {
        IssClientBuilder::default()
    }

    /// The root URL endpoint paths are joined onto.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves an endpoint path such as `securities.json` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the path cannot be joined.
    pub fn endpoint(&self, path: &str) -> Result<Url, IssError> {
        Ok(self.base_url.join(path)?)
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    ///
    /// Unlike [`endpoint`](Self::endpoint), a `/`, `?` or `#` inside a segment
    /// stays part of that segment.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the base URL cannot carry a path.
    pub fn endpoint_segments<I>(&self, segments: I) -> Result<Url, IssError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }
}

/* ----------------------- Builder ----------------------- */

/// Configures and builds an [`IssClient`].
#[derive(Default)]
pub struct IssClientBuilder {
    http: Option<Client>,
    user_agent: Option<String>,
    base_url: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl IssClientBuilder {
    /// Use an existing HTTP session instead of building a new one.
    ///
    /// When set, `user_agent`, `timeout` and `connect_timeout` are ignored: the
    /// session keeps whatever configuration it was built with.
    #[must_use]
    pub fn http_client(mut self, http: Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the ISS root (e.g., `https://iss.moex.com/iss/`).
    ///
    /// A missing trailing slash is added so relative endpoint paths resolve
    /// beneath the given path.
    #[must_use]
    pub fn base_url(mut self, mut url: Url) -> Self {
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }
        self.base_url = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    #[must_use]
    pub fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails if the default base URL cannot be parsed or the HTTP session
    /// cannot be constructed.
    pub fn build(self) -> Result<IssClient, IssError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL)?,
        };

        let http = match self.http {
            Some(http) => http,
            None => {
                let mut httpb = reqwest::Client::builder()
                    .user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

                if let Some(t) = self.timeout {
                    httpb = httpb.timeout(t);
                }
                if let Some(ct) = self.connect_timeout {
                    httpb = httpb.connect_timeout(ct);
                }

                httpb.build()?
            }
        };

        Ok(IssClient { http, base_url })
    }
}
