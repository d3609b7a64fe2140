use crate::core::{IssError, TableSet};

/// The single-page fetch primitive the paging engine is built on.
///
/// Implemented by [`IssRequest`](crate::IssRequest) over HTTP. Any other source
/// that can return the page starting at a row offset can be paged the same way,
/// which keeps the paging logic independent from the transport.
pub trait PageSource: Send + Sync {
    /// Fetches the page whose first row is at `start`.
    ///
    /// An offset of `0` means "from the beginning of the dataset".
    ///
    /// # Returns
    /// A `Future` that resolves to the decoded tables of that page, the
    /// `history.cursor` table included if the server sent one.
    fn fetch_at(
        &self,
        start: u64,
    ) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<TableSet, IssError>> + Send + '_>>;
}
