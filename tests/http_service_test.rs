use anyhow::Result;
use httpmock::prelude::*;
use std::time::Duration;
use taxpayer_desk::{
    DeskError, HttpRecordService, RecordService, SearchOutcome, TaxPayerController, TaxPayerId,
    TaxPayerRecord,
};

#[tokio::test]
async fn test_create_posts_json_record() -> Result<()> {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/api/taxpayers")
            .json_body(serde_json::json!({
                "tid": "123",
                "firstName": "A",
                "lastName": "B",
                "address": "C"
            }));
        then.status(201);
    });

    let service = HttpRecordService::new(&server.url("/api"), None)?;
    let record = TaxPayerRecord::new(TaxPayerId::from(123u64), "A", "B", "C");
    service.create_tax_payer(&record).await?;

    create_mock.assert();
    Ok(())
}

#[tokio::test]
async fn test_search_sends_tid_query() -> Result<()> {
    let server = MockServer::start();
    let search_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/api/taxpayers/search")
            .query_param("tid", "18446744073709551617");
        then.status(200).json_body(serde_json::json!([
            {"tid": "18446744073709551617", "firstName": "Big", "lastName": "Id", "address": "Far"}
        ]));
    });

    let service = HttpRecordService::new(&server.url("/api/"), None)?;
    let tid: TaxPayerId = "18446744073709551617".parse()?;
    let found = service.search_tax_payer(&tid).await?;

    search_mock.assert();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].tid, tid);
    Ok(())
}

#[tokio::test]
async fn test_list_keeps_numeric_identifiers_above_u64() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/taxpayers");
        then.status(200)
            .header("Content-Type", "application/json")
            .body(
                r#"[{"tid": 18446744073709551617, "firstName": "Big", "lastName": "Id", "address": "Far"},
                    {"tid": 42, "firstName": "Small", "lastName": "Id", "address": "Near"}]"#,
            );
    });

    let service = HttpRecordService::new(&server.base_url(), None)?;
    let records = service.get_all_tax_payers().await?;

    list_mock.assert();
    assert_eq!(records[0].tid.as_str(), "18446744073709551617");
    assert_eq!(records[1].tid, TaxPayerId::from(42u64));
    Ok(())
}

#[tokio::test]
async fn test_malformed_body_is_reported() -> Result<()> {
    let server = MockServer::start();
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/taxpayers");
        then.status(200)
            .header("Content-Type", "application/json")
            .body("{\"not\": \"a list\"}");
    });

    let service = HttpRecordService::new(&server.base_url(), None)?;
    let err = service.get_all_tax_payers().await.unwrap_err();

    list_mock.assert();
    assert!(matches!(err, DeskError::Http(_)));
    Ok(())
}

#[tokio::test]
async fn test_timeout_is_applied() -> Result<()> {
    let server = MockServer::start();
    let _slow_mock = server.mock(|when, then| {
        when.method(GET).path("/taxpayers");
        then.status(200)
            .delay(Duration::from_millis(1500))
            .json_body(serde_json::json!([]));
    });

    let service = HttpRecordService::new(&server.base_url(), Some(Duration::from_millis(200)))?;
    let err = service.get_all_tax_payers().await.unwrap_err();

    match err {
        DeskError::Http(e) => assert!(e.is_timeout()),
        other => panic!("expected timeout, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_controller_round_trip_over_http() -> Result<()> {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST).path("/taxpayers");
        then.status(200);
    });
    let list_mock = server.mock(|when, then| {
        when.method(GET).path("/taxpayers");
        then.status(200).json_body(serde_json::json!([
            {"tid": 123, "firstName": "A", "lastName": "B", "address": "C"}
        ]));
    });
    let search_mock = server.mock(|when, then| {
        when.method(GET).path("/taxpayers/search").query_param("tid", "999");
        then.status(200).json_body(serde_json::json!([]));
    });

    let service = HttpRecordService::new(&server.base_url(), None)?;
    let mut controller = TaxPayerController::new(service);

    let form = controller.form_mut();
    form.set(taxpayer_desk::core::form::FormField::Tid, "123");
    form.set(taxpayer_desk::core::form::FormField::FirstName, "A");
    form.set(taxpayer_desk::core::form::FormField::LastName, "B");
    form.set(taxpayer_desk::core::form::FormField::Address, "C");
    controller.submit().await?;

    create_mock.assert_hits(1);
    list_mock.assert_hits(1);
    assert_eq!(controller.records().len(), 1);

    controller.set_search_input("999");
    assert_eq!(controller.search().await?, SearchOutcome::NotFound);
    search_mock.assert_hits(1);
    assert!(controller.records().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_unreachable_service_sets_notice() -> Result<()> {
    // Nothing listens on the discard port.
    let service = HttpRecordService::new("http://127.0.0.1:9/", Some(Duration::from_secs(2)))?;
    let mut controller = TaxPayerController::new(service);

    assert!(controller.load_all().await.is_err());
    assert!(controller.notice().is_some());
    assert!(!controller.is_busy());
    Ok(())
}
