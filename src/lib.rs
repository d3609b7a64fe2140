//! moex-iss: async client for the MOEX Information and Statistics Server.
//!
//! Every ISS answer is a set of named tables. Large answers are split into
//! pages; [`IssRequest::pages`] streams them and [`IssRequest::fetch_all`]
//! stitches them back together, following the `history.cursor` table when
//! the server sends one.
//!
//! The named requests ([`securities`], [`candles`], [`history`], [`index`],
//! [`reference`]) are thin builders over [`IssRequest`] that return a single
//! table. Rows are handed over exactly as ISS sent them.

pub mod candles;
pub mod core;
pub mod history;
pub mod index;
pub mod paging;
pub mod query;
pub mod reference;
pub mod securities;

pub use crate::core::{
    CURSOR_TABLE, IssClient, IssClientBuilder, IssError, IssRequest, PageSource, Row, Table,
    TableSet, Value,
};
pub use candles::{
    CandleBordersBuilder, CandlesBuilder, get_board_candle_borders, get_board_candles,
    get_market_candle_borders, get_market_candles,
};
pub use history::{
    BoardDatesBuilder, HistoryBuilder, get_board_dates, get_board_history, get_market_history,
};
pub use index::{IndexTickersBuilder, get_index_tickers};
pub use paging::Cursor;
pub use query::{CandleInterval, IssQuery};
pub use reference::{Placeholder, ReferenceBuilder, get_reference};
pub use securities::{
    BoardSecuritiesBuilder, DescriptionBuilder, SecuritySearchBuilder, find_securities,
    find_security_description, get_board_securities,
};
