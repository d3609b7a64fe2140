#![allow(dead_code)]

use httpmock::MockServer;
use moex_iss::{IssClient, IssError, PageSource, TableSet};
use std::future::Future;
use std::pin::Pin;
use std::sync::Mutex;
use std::{fs, path::Path};
use url::Url;

pub fn setup_server() -> MockServer {
    MockServer::start()
}

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{name}.json"));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A client whose base URL points at the mock server's `/iss/`.
pub fn client_for(server: &MockServer) -> IssClient {
    IssClient::builder()
        .base_url(Url::parse(&format!("{}/iss/", server.base_url())).unwrap())
        .build()
        .unwrap()
}

/// Wraps a decoded data block into an `iss.json=extended` body.
pub fn envelope(data: serde_json::Value) -> String {
    serde_json::json!([{"charsetinfo": {"name": "utf-8"}}, data]).to_string()
}

pub fn table_set(data: serde_json::Value) -> TableSet {
    serde_json::from_value(data).unwrap()
}

/// `n` rows of a `history` table numbered from `first`.
pub fn history_rows(first: u64, n: u64) -> serde_json::Value {
    (first..first + n)
        .map(|i| serde_json::json!({"N": i, "TRADEDATE": format!("row-{i}")}))
        .collect()
}

pub fn cursor(index: u64, pagesize: u64, total: u64) -> serde_json::Value {
    serde_json::json!([{"INDEX": index, "PAGESIZE": pagesize, "TOTAL": total}])
}

/// An in-memory page source that records every offset it is asked for.
pub struct StubSource<F> {
    respond: F,
    calls: Mutex<Vec<u64>>,
}

impl<F> StubSource<F>
where
    F: Fn(u64) -> Result<TableSet, IssError> + Send + Sync,
{
    pub fn new(respond: F) -> Self {
        Self {
            respond,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<u64> {
        self.calls.lock().unwrap().clone()
    }
}

impl<F> PageSource for StubSource<F>
where
    F: Fn(u64) -> Result<TableSet, IssError> + Send + Sync,
{
    fn fetch_at(
        &self,
        start: u64,
    ) -> Pin<Box<dyn Future<Output = Result<TableSet, IssError>> + Send + '_>> {
        self.calls.lock().unwrap().push(start);
        let page = (self.respond)(start);
        Box::pin(async move { page })
    }
}

/// Pages in `history` of `page_size` rows out of `total`, each with a cursor.
pub fn cursor_pages(page_size: u64, total: u64) -> impl Fn(u64) -> Result<TableSet, IssError> {
    move |start| {
        let n = page_size.min(total.saturating_sub(start));
        Ok(table_set(serde_json::json!({
            "history": history_rows(start, n),
            "history.cursor": cursor(start, page_size, total),
        })))
    }
}

/// Pages in `history` of `page_size` rows out of `total`, with no cursor.
pub fn plain_pages(page_size: u64, total: u64) -> impl Fn(u64) -> Result<TableSet, IssError> {
    move |start| {
        let n = page_size.min(total.saturating_sub(start));
        Ok(table_set(serde_json::json!({ "history": history_rows(start, n) })))
    }
}
