//! Security lookup by search string or id, and the securities traded on a board.

use crate::core::{IssClient, IssError, IssRequest, Table};
use crate::query::{
    DEFAULT_BOARD, DEFAULT_ENGINE, DEFAULT_MARKET, IssQuery, Mode, fetch_table, owned, request,
};

const SEARCH_COLUMNS: &[&str] = &["secid", "regnumber"];
const DESCRIPTION_COLUMNS: &[&str] = &["name", "title", "value"];
const BOARD_COLUMNS: &[&str] = &["SECID", "REGNUMBER", "LOTSIZE", "SHORTNAME"];

/* ---------------- Public API ---------------- */

/// Finds securities by part of their code, name, ISIN, issuer id or state
/// registration number.
///
/// A registration number lists every ticker an issuer has traded under, which
/// is handy for stitching together a long price history.
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn find_securities(client: &IssClient, query: &str) -> Result<Table, IssError> {
    SecuritySearchBuilder::new(client, query).fetch().await
}

/// Loads the description of one security (e.g. its first trading date).
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn find_security_description(
    client: &IssClient,
    security: &str,
) -> Result<Table, IssError> {
    DescriptionBuilder::new(client, security).fetch().await
}

/// Lists the securities traded on the default board (`stock/shares/TQBR`).
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_board_securities(client: &IssClient) -> Result<Table, IssError> {
    BoardSecuritiesBuilder::new(client).fetch().await
}

/* ---------------- Builders ---------------- */

/// A builder for the security search (`securities.json`).
#[derive(Debug, Clone)]
pub struct SecuritySearchBuilder {
    client: IssClient,
    query: String,
    columns: Vec<String>,
}

impl SecuritySearchBuilder {
    const TABLE: &'static str = "securities";

    /// Creates a search for `query`, loading `secid` and `regnumber`.
    pub fn new(client: &IssClient, query: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            query: query.into(),
            columns: owned(SEARCH_COLUMNS),
        }
    }

    /// Columns to load. Empty means all columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let query = IssQuery::new()
            .q(self.query.as_str())
            .table(Self::TABLE)
            .columns(self.columns.iter().cloned());
        request(&self.client, &["securities.json"], &query)
    }

    /// Runs the search.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(q = %self.query)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Single).await
    }
}

/// A builder for a security description (`securities/{secid}.json`).
#[derive(Debug, Clone)]
pub struct DescriptionBuilder {
    client: IssClient,
    security: String,
    columns: Vec<String>,
}

impl DescriptionBuilder {
    const TABLE: &'static str = "description";

    /// Creates a request for `security`, loading `name`, `title` and `value`.
    pub fn new(client: &IssClient, security: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            security: security.into(),
            columns: owned(DESCRIPTION_COLUMNS),
        }
    }

    /// Columns to load. Empty means all columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let query = IssQuery::new()
            .table(Self::TABLE)
            .columns(self.columns.iter().cloned());
        let file = format!("{}.json", self.security);
        request(&self.client, &["securities", file.as_str()], &query)
    }

    /// Loads the description table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(security = %self.security)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Single).await
    }
}

/// A builder for the securities of one board
/// (`engines/{engine}/markets/{market}/boards/{board}/securities.json`).
#[derive(Debug, Clone)]
pub struct BoardSecuritiesBuilder {
    client: IssClient,
    table: String,
    columns: Vec<String>,
    engine: String,
    market: String,
    board: String,
}

impl BoardSecuritiesBuilder {
    /// Creates a request for the `securities` table of `stock/shares/TQBR`.
    pub fn new(client: &IssClient) -> Self {
        Self {
            client: client.clone(),
            table: "securities".to_string(),
            columns: owned(BOARD_COLUMNS),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: DEFAULT_BOARD.to_string(),
        }
    }

    /// Which table to return: `securities` (the directory of traded
    /// securities) or `marketdata` (today's trading results).
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Columns to load. Empty means all columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// Trading engine. Default: `stock`.
    #[must_use]
    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = engine.into();
        self
    }

    /// Market within the engine. Default: `shares`.
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// Trading board. Default: `TQBR`.
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = board.into();
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let query = IssQuery::new()
            .table(self.table.as_str())
            .columns(self.columns.iter().cloned());
        let segments = [
            "engines",
            self.engine.as_str(),
            "markets",
            self.market.as_str(),
            "boards",
            self.board.as_str(),
            "securities.json",
        ];
        request(&self.client, &segments, &query)
    }

    /// Loads the selected table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(board = %self.board)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        let req = self.request()?;
        fetch_table(req, &self.table, Mode::Single).await
    }
}
