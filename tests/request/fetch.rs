use crate::common::{client_for, envelope, fixture, setup_server};
use httpmock::Method::GET;
use moex_iss::{IssError, IssRequest, Value};
use serde_json::json;

#[tokio::test]
async fn single_page_search_returns_one_table() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/iss/securities.json")
            .query_param("iss.json", "extended")
            .query_param("iss.meta", "off")
            .query_param("q", "1-02-65104-D")
            .query_param_missing("start");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("securities_1-02-65104-D"));
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "securities.json")
        .unwrap()
        .param("q", "1-02-65104-D");

    let data = req.fetch_page(None).await.unwrap();

    mock.assert_calls(1);
    assert_eq!(data.len(), 1);
    let rows = data.get("securities").unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[1]["regnumber"], Value::from("1-02-65104-D"));
    assert!(rows[3]["regnumber"].is_null());
}

#[tokio::test]
async fn explicit_start_is_sent() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/iss/securities.json")
            .query_param("q", "1-02-65104-D")
            .query_param("start", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("securities_1-02-65104-D_start1"));
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "securities.json")
        .unwrap()
        .param("q", "1-02-65104-D");

    let data = req.fetch_page(Some(1)).await.unwrap();

    mock.assert();
    let rows = data.get("securities").unwrap();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[1]["regnumber"].as_str(), Some("1-02-65104-D"));
}

#[tokio::test]
async fn non_2xx_maps_to_request_failed_with_url() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/iss/securities1.json");
        then.status(404).body("not found");
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "securities1.json").unwrap();

    let err = req.fetch_page(None).await.unwrap_err();
    mock.assert();

    match err {
        IssError::RequestFailed { status, url } => {
            assert_eq!(status, 404);
            assert!(url.contains("/iss/securities1.json?iss.json=extended&iss.meta=off"));
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn extra_envelope_elements_are_malformed() {
    let server = setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/iss/securities.json");
        then.status(200)
            .header("content-type", "application/json")
            .body("[0, 1, 2]");
    });

    let client = client_for(&server);
    let req = IssRequest::endpoint(&client, "securities.json").unwrap();

    let err = req.fetch_page(None).await.unwrap_err();
    mock.assert();

    match err {
        IssError::MalformedResponse { url, reason } => {
            assert!(url.contains("/iss/securities.json?iss.json=extended&iss.meta=off"));
            assert!(reason.contains("3 elements"), "{reason}");
        }
        other => panic!("expected MalformedResponse, got {other:?}"),
    }
}

#[tokio::test]
async fn body_that_is_not_an_envelope_is_malformed() {
    let server = setup_server();
    let _array_of_one = server.mock(|when, then| {
        when.method(GET).path("/iss/one.json");
        then.status(200).body(json!([{"charsetinfo": {}}]).to_string());
    });
    let _object = server.mock(|when, then| {
        when.method(GET).path("/iss/object.json");
        then.status(200).body(json!({"securities": []}).to_string());
    });
    let _bad_data = server.mock(|when, then| {
        when.method(GET).path("/iss/bad.json");
        then.status(200).body(envelope(json!(["not", "tables"])));
    });

    let client = client_for(&server);
    for path in ["one.json", "object.json", "bad.json"] {
        let req = IssRequest::endpoint(&client, path).unwrap();
        let err = req.fetch_page(None).await.unwrap_err();
        assert!(
            matches!(err, IssError::MalformedResponse { .. }),
            "{path}: expected MalformedResponse, got {err:?}"
        );
    }
}

#[tokio::test]
async fn rows_pass_through_unmodified() {
    let server = setup_server();
    let _mock = server.mock(|when, then| {
        when.method(GET).path("/iss/mixed.json");
        then.status(200).body(envelope(json!({
            "t": [{"S": "2018-01-03", "I": 42, "F": 31.7, "N": null}]
        })));
    });

    let client = client_for(&server);
    let data = IssRequest::endpoint(&client, "mixed.json")
        .unwrap()
        .fetch_page(None)
        .await
        .unwrap();

    let row = &data.get("t").unwrap()[0];
    assert_eq!(row["S"], Value::Str("2018-01-03".into()));
    assert_eq!(row["I"], Value::Int(42));
    assert_eq!(row["F"], Value::Float(31.7));
    assert_eq!(row["N"], Value::Null);
}
