use serde_json::Value as JsonValue;

use crate::core::{IssError, TableSet};

/// Converts a decoded sequence into a fixed-size array when its length is exactly `N`.
///
/// On a length mismatch the original vector is handed back so the caller can
/// report what was actually received.
pub(crate) fn exact<T, const N: usize>(items: Vec<T>) -> Result<[T; N], Vec<T>> {
    items.try_into()
}

/// Decodes an `iss.json=extended` response body: `[metadata, data]`.
///
/// The metadata element is dropped. Anything other than exactly two elements
/// is rejected, as is a data element that is not an object of tables.
pub(crate) fn decode_envelope(body: &str, url: &str) -> Result<TableSet, IssError> {
    let malformed = |reason: String| IssError::MalformedResponse {
        url: url.to_string(),
        reason,
    };

    let elements: Vec<JsonValue> =
        serde_json::from_str(body).map_err(|e| malformed(format!("json parse error: {e}")))?;

    let [_meta, data] = exact::<_, 2>(elements).map_err(|elements| {
        malformed(format!(
            "expected [metadata, data], got {} elements",
            elements.len()
        ))
    })?;

    serde_json::from_value(data).map_err(|e| malformed(format!("bad data block: {e}")))
}
