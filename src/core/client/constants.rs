//! Centralized constants for the default endpoint, UA and protocol parameters.

/// Default UA sent with every request.
pub(crate) const USER_AGENT: &str = concat!("moex-iss/", env!("CARGO_PKG_VERSION"));

/// ISS REST root; endpoint paths are joined onto it.
pub(crate) const DEFAULT_BASE_URL: &str = "https://iss.moex.com/iss/";

/// Parameters sent with every request: extended JSON without metadata blocks.
pub(crate) const BASE_QUERY: [(&str, &str); 2] = [("iss.json", "extended"), ("iss.meta", "off")];

/// Query parameter carrying the row offset of a page.
pub(crate) const START_PARAM: &str = "start";

/// Reserved table carrying pagination state inside a page.
pub const CURSOR_TABLE: &str = "history.cursor";
