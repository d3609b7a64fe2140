//! End-of-day trading history.

use chrono::NaiveDate;

use crate::core::{IssClient, IssError, IssRequest, Table};
use crate::query::{
    DEFAULT_BOARD, DEFAULT_ENGINE, DEFAULT_MARKET, IssQuery, Mode, fetch_table, owned, request,
};

const HISTORY_COLUMNS: &[&str] = &["BOARDID", "TRADEDATE", "CLOSE", "VOLUME", "VALUE"];

/* ---------------- Public API ---------------- */

/// The range of dates available in the history of the `stock/shares/TQBR` board.
///
/// The table has a single row with `from` and `till`.
///
/// # Errors
///
/// Returns `IssError` if the request fails or the table is absent.
pub async fn get_board_dates(client: &IssClient) -> Result<Table, IssError> {
    BoardDatesBuilder::new(client).fetch().await
}

/// Full history of `security` across every board of the `stock/shares` market.
///
/// A date may appear several times if the security traded on several boards.
///
/// # Errors
///
/// Returns `IssError` if any page fails or the table is absent.
pub async fn get_market_history(client: &IssClient, security: &str) -> Result<Table, IssError> {
    HistoryBuilder::new(client, security).fetch().await
}

/// Full history of `security` on the `TQBR` board.
///
/// # Errors
///
/// Returns `IssError` if any page fails or the table is absent.
pub async fn get_board_history(client: &IssClient, security: &str) -> Result<Table, IssError> {
    HistoryBuilder::new(client, security)
        .board(DEFAULT_BOARD)
        .fetch()
        .await
}

/* ---------------- Builders ---------------- */

/// A builder for `history/engines/{engine}/markets/{market}/boards/{board}/dates.json`.
#[derive(Debug, Clone)]
pub struct BoardDatesBuilder {
    client: IssClient,
    engine: String,
    market: String,
    board: String,
}

impl BoardDatesBuilder {
    const TABLE: &'static str = "dates";

    /// Creates a request for the trading dates of `stock/shares/TQBR`.
    pub fn new(client: &IssClient) -> Self {
        Self {
            client: client.clone(),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: DEFAULT_BOARD.to_string(),
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
        let segments = [
            "history",
            "engines",
            self.engine.as_str(),
            "markets",
            self.market.as_str(),
            "boards",
            self.board.as_str(),
            "dates.json",
        ];
        request(&self.client, &segments, &IssQuery::new())
    }

    /// Loads the dates table.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if the request fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(board = %self.board)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Single).await
    }
}

/// A builder for the trading history of one security.
///
/// Without a board it reads
/// `history/engines/{engine}/markets/{market}/securities/{secid}.json`;
/// with one it reads the board-level endpoint. History answers are paged and
/// `fetch` loads every page.
#[derive(Debug, Clone)]
pub struct HistoryBuilder {
    client: IssClient,
    security: String,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    columns: Vec<String>,
    engine: String,
    market: String,
    board: Option<String>,
}

impl HistoryBuilder {
    const TABLE: &'static str = "history";

    /// Creates a request for the whole history of `security`, loading board,
    /// trade date, close price and volume in lots and money.
    pub fn new(client: &IssClient, security: impl Into<String>) -> Self {
        Self {
            client: client.clone(),
            security: security.into(),
            start: None,
            end: None,
            columns: owned(HISTORY_COLUMNS),
            engine: DEFAULT_ENGINE.to_string(),
            market: DEFAULT_MARKET.to_string(),
            board: None,
        }
    }

    /// First trade date to load.
    #[must_use]
    pub const fn start(mut self, date: NaiveDate) -> Self {
        self.start = Some(date);
        self
    }

    /// Last trade date to load.
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

    /// Restricts the history to one board.
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
            .from_date(self.start)
            .till_date(self.end)
            .table(Self::TABLE)
            .columns(self.columns.iter().cloned());
        let file = format!("{}.json", self.security);
        let mut segments = vec![
            "history",
            "engines",
            self.engine.as_str(),
            "markets",
            self.market.as_str(),
        ];
        if let Some(board) = &self.board {
            segments.extend(["boards", board.as_str()]);
        }
        segments.extend(["securities", file.as_str()]);
        request(&self.client, &segments, &query)
    }

    /// Loads every row of the history.
    ///
    /// # Errors
    ///
    /// Returns `IssError` if any page fails or the table is absent.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), err, fields(security = %self.security)))]
    pub async fn fetch(self) -> Result<Table, IssError> {
        fetch_table(self.request()?, Self::TABLE, Mode::Paged).await
    }
}
