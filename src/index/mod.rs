use chrono::NaiveDate;

use crate::core::{IssClient, IssError, IssRequest, Table};
use crate::query::{DEFAULT_ENGINE, IssQuery, Mode, fetch_table, owned, request};

const INDEX_MARKET: &str = "index";
const TICKER_COLUMNS: &[&str] = &["ticker", "from", "till", "tradingsession"];

/// Every security that has ever been part of `index` (e.g. `IMOEX`).
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_index_tickers(client: &IssClient, index: &str) -> Result<Table, IssError> {
    IndexTickersBuilder::new(client, index).fetch().await
}

/// A builder for `statistics/engines/{engine}/markets/{market}/analytics/{index}/tickers.json`.
#[derive(Debug, Clone)]
pub struct IndexTickersBuilder {
    client: IssClient,
    index: String,
    date: Option<NaiveDate>,
    columns: Vec<String>,
    engine: String,
    market: String,
}

impl IndexTickersBuilder {
    const TABLE: &'static str = "tickers";

    /// Creates a request for the constituents of `index` on the `stock/index` market.
    pub fn new(client: &IssClient, index: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            index: index.into(),
            date: None,
            columns: owned(TICKER_COLUMNS),
            engine: DEFAULT_ENGINE.to_string(),
            market: INDEX_MARKET.to_string(),
        }
    }

    /// Only the constituents the index was computed from on `date`.
    ///
    /// A date without trading yields an empty table.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
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

    /// Market within the engine. Default: `index`.
    #[must_use]
    pub fn market(mut self, market: impl Into<String>) -> Self {
        self.market = market.into();
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let query = IssQuery::new()
            .date(self.date)
            .table(Self::TABLE)
            .columns(self.columns.iter().cloned());
        let segments = [
            "statistics",
            "engines",
            self.engine.as_str(),
            "markets",
            self.market.as_str(),
            "analytics",
            self.index.as_str(),
            "tickers.json",
        ];
        request(&self.client, &segments, &query)
    }

    /// Loads the constituents table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(index = %self.index)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Single).await
    }
}
