//! Assembling complete datasets from ISS answers split across pages.
//!
//! ISS returns large results in bounded blocks. Two protocols are in use and
//! are told apart by the shape of each page:
//!
//! - **cursor**: the page carries a one-row `history.cursor` table with
//!   `INDEX`, `PAGESIZE` and `TOTAL`. The cursor is validated, stripped, and
//!   the next page starts at `INDEX + PAGESIZE` until `TOTAL` is reached.
//! - **no cursor**: the next page starts right after the rows just received,
//!   and the first empty page ends the traversal.
//!
//! Pages are requested one at a time; nothing is fetched before the caller
//! polls for it.

mod cursor;

pub use cursor::Cursor;

use futures::{Stream, TryStreamExt, stream};

use crate::core::services::PageSource;
use crate::core::{IssError, TableSet};
use cursor::take_cursor;

/// Decides what follows the page fetched at `start`.
///
/// Returns the page with any cursor table removed, together with the offset of
/// the next page or `None` when the traversal is complete.
///
/// # Errors
///
/// Returns [`IssError::MalformedCursor`] if the page carries a cursor table that
/// does not hold exactly one row describing offset `start`.
pub fn advance(start: u64, mut page: TableSet) -> Result<(TableSet, Option<u64>), IssError> {
    if let Some(cursor) = take_cursor(&mut page, start)? {
        return Ok((page, cursor.next_start()));
    }

    // Without a cursor the table name is whatever the query asked for; one table is expected.
    let rows = page.first().map_or(0, |(_, table)| table.len()) as u64;
    let next = (rows > 0).then(|| start + rows);
    Ok((page, next))
}

/// Streams the pages of a dataset, beginning at offset 0.
///
/// Every call starts a new traversal and repeats all requests; nothing is
/// memoized. The stream ends after the last page, or right after yielding the
/// first error.
pub fn pages<S>(source: &S) -> impl Stream<Item = Result<TableSet, IssError>> + Send + '_
where
    S: PageSource + ?Sized,
{
    stream::try_unfold(Some(0_u64), move |state| step(source, state))
}

/// One state transition: fetch the page at `state` unless the traversal is done.
async fn step<S>(source: &S, state: Option<u64>) -> Result<Option<(TableSet, Option<u64>)>, IssError>
where
    S: PageSource + ?Sized,
{
    let Some(start) = state else {
        return Ok(None);
    };

    let page = source.fetch_at(start).await?;
    let (page, next) = advance(start, page)?;

    #[cfg(feature = "tracing")]
    {
        match next {
            Some(next) => tracing::debug!(start, next, "page received"),
            None => tracing::debug!(start, "last page received"),
        }
    }

    Ok(Some((page, next)))
}

/// Drains [`pages`] and concatenates the rows of same-named tables.
///
/// Tables appear in first-seen order; rows keep page order, then in-page order.
///
/// # Errors
///
/// The first error raised by any page. Rows gathered before it are discarded.
pub async fn fetch_all<S>(source: &S) -> Result<TableSet, IssError>
where
    S: PageSource + ?Sized,
{
    pages(source)
        .try_fold(TableSet::new(), |mut all, page| async move {
            all.append(page);
            Ok(all)
        })
        .await
}
