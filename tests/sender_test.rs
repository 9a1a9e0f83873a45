use chrono::Utc;
use httpmock::prelude::*;
use notice_forwarder::notice::{Notice, NoticeBuilder};
use notice_forwarder::sender::{HttpNotifier, NotifierClient, NotifierConfig, SenderError};

fn test_notice() -> Notice {
    NoticeBuilder::new("test-key", "production").from_message("disk full", None, Utc::now())
}

fn notifier_for(server: &MockServer) -> HttpNotifier {
    HttpNotifier::new(NotifierConfig {
        endpoint: server.url("/v1/notices"),
        ..NotifierConfig::default()
    })
    .unwrap()
}

#[test]
fn test_accepted_notice() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/notices")
            .header("content-type", "application/json")
            .body_contains("\"api_key\":\"test-key\"")
            .body_contains("\"message\":\"disk full\"");
        then.status(201);
    });

    let notifier = notifier_for(&server);
    notifier.notify(&test_notice()).unwrap();

    mock.assert();
    let stats = notifier.request_stats();
    assert_eq!(stats.total_requests, 1);
    assert_eq!(stats.successful_requests, 1);
    assert_eq!(stats.failed_requests, 0);
}

#[test]
fn test_rejected_notice_surfaces_http_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/notices");
        then.status(500);
    });

    let notifier = notifier_for(&server);
    let result = notifier.notify(&test_notice());

    assert!(matches!(
        result,
        Err(SenderError::HttpError { status: 500 })
    ));
    let stats = notifier.request_stats();
    assert_eq!(stats.failed_requests, 1);
}

#[test]
fn test_notices_carry_distinct_ids() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/v1/notices");
        then.status(200);
    });

    let notifier = notifier_for(&server);
    notifier.notify(&test_notice()).unwrap();
    notifier.notify(&test_notice()).unwrap();

    mock.assert_hits(2);
    assert_eq!(notifier.request_stats().successful_requests, 2);
}
