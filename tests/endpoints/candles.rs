use crate::common::{client_for, envelope, setup_server};
use chrono::NaiveDate;
use httpmock::Method::GET;
use moex_iss::{
    CandleBordersBuilder, CandleInterval, CandlesBuilder, IssClient, get_board_candle_borders,
    get_market_candles,
};
use serde_json::json;

fn candle(begin: &str, close: f64) -> serde_json::Value {
    json!({"begin": begin, "open": close, "close": close, "high": close, "low": close, "value": 1000.0})
}

#[tokio::test]
async fn market_candles_load_every_page() {
    let server = setup_server();
    let path = "/iss/engines/stock/markets/shares/securities/SBER/candles.json";
    let first = server.mock(|when, then| {
        when.method(GET)
            .path(path)
            .query_param("interval", "24")
            .query_param("iss.only", "candles,history.cursor")
            .query_param("candles.columns", "begin,open,close,high,low,value")
            .query_param_missing("start");
        then.status(200).body(envelope(json!({
            "candles": [candle("2020-01-03 00:00:00", 255.0), candle("2020-01-06 00:00:00", 253.9)]
        })));
    });
    let last = server.mock(|when, then| {
        when.method(GET).path(path).query_param("start", "2");
        then.status(200).body(envelope(json!({ "candles": [] })));
    });

    let client = client_for(&server);
    let candles = get_market_candles(&client, "SBER").await.unwrap();

    first.assert_calls(1);
    last.assert_calls(1);
    assert_eq!(candles.len(), 2);
    assert_eq!(candles[1]["begin"].as_str(), Some("2020-01-06 00:00:00"));
}

#[test]
fn board_candles_with_range_and_interval() {
    let client = IssClient::default();
    let req = CandlesBuilder::new(&client, "GAZP")
        .board("TQBR")
        .interval(CandleInterval::Hour)
        .start(NaiveDate::from_ymd_opt(2019, 10, 9).unwrap())
        .end(NaiveDate::from_ymd_opt(2019, 11, 12).unwrap())
        .request()
        .unwrap();

    assert_eq!(
        req.url().as_str(),
        "https://iss.moex.com/iss/engines/stock/markets/shares/boards/TQBR/securities/GAZP/candles.json"
    );
    let extra = req.extra_query();
    let get = |key: &str| extra.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str());
    assert_eq!(get("interval"), Some("60"));
    assert_eq!(get("from"), Some("2019-10-09"));
    assert_eq!(get("till"), Some("2019-11-12"));
}

#[tokio::test]
async fn board_candle_borders() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/iss/engines/stock/markets/shares/boards/TQBR/securities/SNGSP/candleborders.json");
        then.status(200).body(envelope(json!({
            "borders": [
                {"begin": "2011-12-15 10:00:00", "end": "2024-05-31 18:49:00", "interval": 1, "board_group_id": 57},
                {"begin": "2003-07-01 00:00:00", "end": "2024-05-31 00:00:00", "interval": 24, "board_group_id": 57},
            ]
        })));
    });

    let client = client_for(&server);
    let borders = get_board_candle_borders(&client, "SNGSP").await.unwrap();

    mock.assert();
    assert_eq!(borders.len(), 2);
    assert_eq!(borders[1]["interval"].as_i64(), Some(24));
}

#[test]
fn market_candle_borders_path_and_market_override() {
    let client = IssClient::default();
    let req = CandleBordersBuilder::new(&client, "SiZ4")
        .engine("futures")
        .market("forts")
        .request()
        .unwrap();

    assert_eq!(
        req.url().as_str(),
        "https://iss.moex.com/iss/engines/futures/markets/forts/securities/SiZ4/candleborders.json"
    );
    assert!(req.extra_query().is_empty());
}

#[test]
fn board_and_security_are_encoded_as_segments() {
    let client = IssClient::default();
    let req = CandlesBuilder::new(&client, "SBER#1")
        .board("TQ/BR")
        .request()
        .unwrap();

    assert_eq!(
        req.url().as_str(),
        "https://iss.moex.com/iss/engines/stock/markets/shares/boards/TQ%2FBR/securities/SBER%231/candles.json"
    );
    assert!(req.url().fragment().is_none());
}
