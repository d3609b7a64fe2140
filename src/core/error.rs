use thiserror::Error;

use crate::core::models::Table;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum IssError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed or joined.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-success HTTP status.
    #[error("request failed with status {status}: {url}")]
    RequestFailed {
        /// The HTTP status code.
        status: u16,
        /// The effective request URL, query included.
        url: String,
    },

    /// The response body is not the `[metadata, data]` envelope ISS is expected to return.
    #[error("malformed response ({reason}): {url}")]
    MalformedResponse {
        /// The effective request URL, query included.
        url: String,
        /// What exactly did not match.
        reason: String,
    },

    /// The `history.cursor` table of a page is inconsistent with the requested offset.
    #[error("malformed history.cursor {cursor:?} for start position {start}")]
    MalformedCursor {
        /// The raw rows of the cursor table.
        cursor: Table,
        /// The offset that was requested for the page.
        start: u64,
    },

    /// A named table was requested but the result does not contain it.
    #[error("table {table} is missing from the response")]
    MissingTable {
        /// The name of the absent table.
        table: String,
    },
}
