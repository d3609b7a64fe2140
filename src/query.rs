//! Extra query parameters shared by the named ISS requests.

use chrono::NaiveDate;

use crate::core::client::constants::CURSOR_TABLE;
use crate::core::{IssClient, IssError, IssRequest, Table};

pub(crate) const DEFAULT_ENGINE: &str = "stock";
pub(crate) const DEFAULT_MARKET: &str = "shares";
pub(crate) const DEFAULT_BOARD: &str = "TQBR";

/// Candle size accepted by the candle endpoints.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandleInterval {
    /// 1 minute.
    Minute,
    /// 10 minutes.
    TenMinutes,
    /// 1 hour.
    Hour,
    /// 1 day.
    #[default]
    Day,
    /// 1 week.
    Week,
    /// 1 month.
    Month,
    /// 1 quarter.
    Quarter,
}

impl CandleInterval {
    /// The numeric code ISS uses for this size.
    pub const fn code(self) -> u32 {
        match self {
            Self::Minute => 1,
            Self::TenMinutes => 10,
            Self::Hour => 60,
            Self::Day => 24,
            Self::Week => 7,
            Self::Month => 31,
            Self::Quarter => 4,
        }
    }
}

/// Builder for the optional parameters of a named request.
///
/// Only the fields that were set are emitted. Selecting a table also asks ISS to
/// include the `history.cursor` table so paged answers can be followed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssQuery {
    q: Option<String>,
    interval: Option<CandleInterval>,
    from: Option<NaiveDate>,
    till: Option<NaiveDate>,
    date: Option<NaiveDate>,
    table: Option<String>,
    columns: Vec<String>,
}

impl IssQuery {
    /// Creates an empty set of parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text search string (`q`).
    #[must_use]
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// Candle size (`interval`).
    #[must_use]
    pub const fn interval(mut self, interval: CandleInterval) -> Self {
        self.interval = Some(interval);
        self
    }

    /// First date of the requested range (`from`).
    #[must_use]
    pub const fn from_date(mut self, date: Option<NaiveDate>) -> Self {
        self.from = date;
        self
    }

    /// Last date of the requested range (`till`).
    #[must_use]
    pub const fn till_date(mut self, date: Option<NaiveDate>) -> Self {
        self.till = date;
        self
    }

    /// Exact date (`date`).
    #[must_use]
    pub const fn date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Restricts the answer to one table (`iss.only`).
    #[must_use]
    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into()).filter(|s: &String| !s.is_empty());
        self
    }

    /// Columns to load for the selected table. Empty means all columns.
    #[must_use]
    pub fn columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = columns.into_iter().map(Into::into).collect();
        self
    }

    /// The parameters as `(key, value)` pairs, in a stable order.
    ///
    /// Columns are only sent together with a table, since ISS names the column
    /// filter after the table (`<table>.columns`).
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(q) = &self.q {
            pairs.push(("q".to_string(), q.clone()));
        }
        if let Some(interval) = self.interval {
            pairs.push(("interval".to_string(), interval.code().to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from".to_string(), iso_date(from)));
        }
        if let Some(till) = self.till {
            pairs.push(("till".to_string(), iso_date(till)));
        }
        if let Some(date) = self.date {
            pairs.push(("date".to_string(), iso_date(date)));
        }
        if let Some(table) = &self.table {
            pairs.push(("iss.only".to_string(), format!("{table},{CURSOR_TABLE}")));
            if !self.columns.is_empty() {
                pairs.push((format!("{table}.columns"), self.columns.join(",")));
            }
        }
        pairs
    }
}

fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// How a named request gathers its answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mode {
    /// The whole answer fits in one response.
    Single,
    /// The answer is split into pages that must all be loaded.
    Paged,
}

/// Runs a named request and pulls `table` out of the result.
pub(crate) async fn fetch_table(req: IssRequest, table: &str, mode: Mode) -> Result<Table, IssError> {
    let data = match mode {
        Mode::Single => req.fetch_page(None).await?,
        Mode::Paged => req.fetch_all().await?,
    };
    data.into_table(table)
}

/// Builds the request for the endpoint made of `segments` with the given parameters.
///
/// Each segment is percent-encoded on its own, so caller-supplied ids cannot
/// alter the rest of the URL.
pub(crate) fn request(
    client: &IssClient,
    segments: &[&str],
    query: &IssQuery,
) -> Result<IssRequest, IssError> {
    let url = client.endpoint_segments(segments)?;
    Ok(IssRequest::new(client, url).params(query.to_pairs()))
}

pub(crate) fn owned(columns: &[&str]) -> Vec<String> {
    columns.iter().map(|c| (*c).to_string()).collect()
}
