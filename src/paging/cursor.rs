use crate::core::client::constants::CURSOR_TABLE;
use crate::core::wire::exact;
use crate::core::{IssError, Row, Table, TableSet};

/// Pagination state ISS embeds in some pages as the `history.cursor` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Offset of the first row of this page.
    pub index: u64,
    /// Number of rows in this page.
    pub pagesize: u64,
    /// Number of rows in the whole dataset.
    pub total: u64,
}

impl Cursor {
    fn from_row(row: &Row) -> Option<Self> {
        let field = |name: &str| {
            row.get(name)
                .and_then(crate::core::Value::as_i64)
                .and_then(|v| u64::try_from(v).ok())
        };
        Some(Self {
            index: field("INDEX")?,
            pagesize: field("PAGESIZE")?,
            total: field("TOTAL")?,
        })
    }

    /// Offset of the next page, or `None` once the dataset is exhausted.
    pub const fn next_start(&self) -> Option<u64> {
        let next = self.index.saturating_add(self.pagesize);
        if next >= self.total { None } else { Some(next) }
    }
}

/// Strips the cursor table from `page` and validates it against `start`.
///
/// `Ok(None)` means the page carries no cursor at all.
pub(crate) fn take_cursor(page: &mut TableSet, start: u64) -> Result<Option<Cursor>, IssError> {
    let Some(rows) = page.remove(CURSOR_TABLE) else {
        return Ok(None);
    };
    let malformed = |cursor: Table| IssError::MalformedCursor { cursor, start };

    let [row] = exact::<_, 1>(rows).map_err(malformed)?;
    match Cursor::from_row(&row) {
        // a zero page size with rows left would replay the same page forever
        Some(cursor)
            if cursor.index == start && (cursor.pagesize > 0 || cursor.next_start().is_none()) =>
        {
            Ok(Some(cursor))
        }
        _ => Err(malformed(vec![row])),
    }
}
