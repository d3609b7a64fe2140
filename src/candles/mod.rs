//! HLOCV candles and the date ranges for which they are available.
//!
//! Every builder here addresses the whole market by default; setting a board
//! switches to the board-level endpoint. When a security trades on several
//! primary boards, market-level candles may contain one candle per board for
//! the same period.

use chrono::NaiveDate;

use crate::core::{IssClient, IssError, IssRequest, Table};
pub use crate::query::CandleInterval;
use crate::query::{
    DEFAULT_BOARD, DEFAULT_ENGINE, DEFAULT_MARKET, IssQuery, Mode, fetch_table, owned, request,
};

const CANDLE_COLUMNS: &[&str] = &["begin", "open", "close", "high", "low", "value"];

/// Path segments of `.../securities/{security}/{file}`, at board level when a board is set.
fn security_path<'a>(
    engine: &'a str,
    market: &'a str,
    board: Option<&'a str>,
    security: &'a str,
    file: &'a str,
) -> Vec<&'a str> {
    let mut segments = vec!["engines", engine, "markets", market];
    if let Some(board) = board {
        segments.extend(["boards", board]);
    }
    segments.extend(["securities", security, file]);
    segments
}

/* ---------------- Public API ---------------- */

/// Date ranges of every candle size for `security` across all boards of the
/// `stock/shares` market.
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_market_candle_borders(
    client: &IssClient,
    security: &str,
) -> Result<Table, IssError> {
    CandleBordersBuilder::new(client, security).fetch().await
}

/// Date ranges of every candle size for `security` on the `TQBR` board.
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_board_candle_borders(
    client: &IssClient,
    security: &str,
) -> Result<Table, IssError> {
    CandleBordersBuilder::new(client, security)
        .board(DEFAULT_BOARD)
        .fetch()
        .await
}

/// Full daily candle history of `security` on the `stock/shares` market.
///
/// # Errors
///
/// Returns `IssError` if any page fails or the table is absent.
pub async fn get_market_candles(client: &IssClient, security: &str) -> Result<Table, IssError> {
    CandlesBuilder::new(client, security).fetch().await
}

/// Full daily candle history of `security` on the `TQBR` board.
///
/// # Errors
///
/// Returns `IssError` if any page fails or the table is absent.
pub async fn get_board_candles(client: &IssClient, security: &str) -> Result<Table, IssError> {
    CandlesBuilder::new(client, security)
        .board(DEFAULT_BOARD)
        .fetch()
        .await
}

/* ---------------- Builders ---------------- */

/// A builder for `.../securities/{secid}/candleborders.json`.
#[derive(Debug, Clone)]
pub struct CandleBordersBuilder {
    client: IssClient,
    security: String,
    engine: String,
    market: String,
    board: Option<String>,
}

impl CandleBordersBuilder {
    const TABLE: &'static str = "borders";

    /// Creates a request for the candle borders of `security`.
    pub fn new(client: &IssClient, security: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            security: security.into(),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: None,
        }
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

    /// Restricts the request to one board.
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let segments = security_path(
            &self.engine,
            &self.market,
            self.board.as_deref(),
            &self.security,
            "candleborders.json",
        );
        request(&self.client, &segments, &IssQuery::new())
    }

    /// Loads the borders table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(security = %self.security)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Single).await
    }
}

/// A builder for HLOCV candles (`.../securities/{secid}/candles.json`).
///
/// Candle answers are paged; `fetch` loads every page.
#[derive(Debug, Clone)]
pub struct CandlesBuilder {
    client: IssClient,
    security: String,
    interval: CandleInterval,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    columns: Vec<String>,
    engine: String,
    market: String,
    board: Option<String>,
}

impl CandlesBuilder {
    const TABLE: &'static str = "candles";

    /// Creates a request for the whole daily history of `security`, loading the
    /// candle start time and HLOCV columns.
    pub fn new(client: &IssClient, security: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            security: security.into(),
            interval: CandleInterval::Day,
            start: None,
            end: None,
            columns: owned(CANDLE_COLUMNS),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: None,
        }
    }

    /// Candle size. Default: one day.
    #[must_use]
    pub const fn interval(mut self, interval: CandleInterval) -> Self {
        self.interval = interval;
        self
    }

    /// First date to load. Default: the beginning of the history.
    #[must_use]
    pub const fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Last date to load. Default: the end of the history. Candles of a
    /// session still in progress are not final.
    #[must_use]
    pub const fn end(mut self, date: NaiveDate) -> Self {
        self.end = Some(date);
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

    /// Restricts the request to one board.
    #[must_use]
    pub fn board(mut self, board: impl Into<String>) -> Self {
        self.board = Some(board.into());
        self
    }

    /// The request this builder issues.
    ///
    /// # Errors
    ///
    /// Returns [`IssError::Url`] if the endpoint cannot be resolved.
    pub fn request(&self) -> Result<IssRequest, IssError> {
        let query = IssQuery::new()
            .interval(self.interval)
            .from_date(self.start)
            .till_date(self.end)
            .table(Self::TABLE)
            .columns(self.columns.iter().cloned());
        let segments = security_path(
            &self.engine,
            &self.market,
            self.board.as_deref(),
            &self.security,
            "candles.json",
        );
        request(&self.client, &segments, &query)
    }

    /// Loads every candle in the range.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if any page fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(security = %self.security)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Paged).await
    }
}
