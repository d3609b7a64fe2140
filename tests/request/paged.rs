use crate::common::{client_for, envelope, fixture, history_rows, setup_server};
use futures::TryStreamExt;
use httpmock::Method::GET;
use moex_iss::{CURSOR_TABLE, IssError, IssRequest};
use serde_json::json;

const SNGSP: &str = "/iss/history/engines/stock/markets/shares/securities/SNGSP.json";

#[tokio::test]
async fn fetch_all_follows_the_cursor() {
    let server = setup_server();
    let first = server.mock(|when, then| {
        when.method(GET).path(SNGSP).query_param_missing("start");
        then.status(200).body(fixture("history_SNGSP_0"));
    });
    let second = server.mock(|when, then| {
        when.method(GET).path(SNGSP).query_param("start", "2");
        then.status(200).body(fixture("history_SNGSP_2"));
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "history/engines/stock/markets/shares/securities/SNGSP.json")
        .unwrap()
        .param("from", "2018-01-01")
        .param("till", "2018-03-01");

    let all = req.fetch_all().await.unwrap();

    first.assert_calls(1);
    second.assert_calls(1);
    assert!(!all.contains(CURSOR_TABLE));
    let history = all.get("history").unwrap();
    assert_eq!(history.len(), 3);
    assert_eq!(history[0]["TRADEDATE"].as_str(), Some("2018-01-03"));
    assert_eq!(history[2]["TRADEDATE"].as_str(), Some("2018-01-05"));
}

fn history_page(start: u64) -> String {
    let rows = 100.min(250 - start);
    envelope(json!({
        "history": history_rows(start, rows),
        "history.cursor": [{"INDEX": start, "PAGESIZE": 100, "TOTAL": 250}],
    }))
}

#[tokio::test]
async fn cursor_of_250_rows_takes_three_requests() {
    let server = setup_server();
    let page0 = server.mock(|when, then| {
        when.method(GET).path("/iss/h.json").query_param_missing("start");
        then.status(200).body(history_page(0));
    });
    let page100 = server.mock(|when, then| {
        when.method(GET).path("/iss/h.json").query_param("start", "100");
        then.status(200).body(history_page(100));
    });
    let page200 = server.mock(|when, then| {
        when.method(GET).path("/iss/h.json").query_param("start", "200");
        then.status(200).body(history_page(200));
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "h.json").unwrap();
    let pages: Vec<_> = req.pages().try_collect().await.unwrap();

    page0.assert_calls(1);
    page100.assert_calls(1);
    page200.assert_calls(1);
    assert_eq!(pages.len(), 3);
    assert_eq!(pages[2].get("history").unwrap().len(), 50);
}

#[tokio::test]
async fn fetch_all_without_cursor_stops_on_empty_page() {
    let server = setup_server();
    let first = server.mock(|when, then| {
        when.method(GET).path("/iss/c.json").query_param_missing("start");
        then.status(200)
            .body(envelope(json!({ "candles": history_rows(0, 3) })));
    });
    let last = server.mock(|when, then| {
        when.method(GET).path("/iss/c.json").query_param("start", "3");
        then.status(200).body(envelope(json!({ "candles": [] })));
    });

    let client = client_for(&server);
    let all = IssRequest::endpoint(&client, "c.json")
        .unwrap()
        .fetch_all()
        .await
        .unwrap();

    first.assert_calls(1);
    last.assert_calls(1);
    assert_eq!(all.get("candles").unwrap().len(), 3);
}

#[tokio::test]
async fn http_failure_on_a_later_page_fails_the_whole_fetch() {
    let server = setup_server();
    let _first = server.mock(|when, then| {
        when.method(GET).path("/iss/c.json").query_param_missing("start");
        then.status(200)
            .body(envelope(json!({ "candles": history_rows(0, 3) })));
    });
    let _broken = server.mock(|when, then| {
        when.method(GET).path("/iss/c.json").query_param("start", "3");
        then.status(500);
    });

    let client = client_for(&server);
    let err = IssRequest::endpoint(&client, "c.json")
        .unwrap()
        .fetch_all()
        .await
        .unwrap_err();

    match err {
        IssError::RequestFailed { status, url } => {
            assert_eq!(status, 500);
            assert!(url.ends_with("start=3"), "{url}");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}
