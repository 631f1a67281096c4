use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::controller::{ControlState, Controller, Phase};
use crate::fetcher::{FetchError, Fetcher, RetryPolicy};
use crate::runner::{Options, Runner, RunnerError};

fn policy(timeout: Duration) -> RetryPolicy {
    RetryPolicy {
        attempts: 3,
        timeout,
    }
}

fn companies() -> serde_json::Value {
    json!([
        {"name": "Zeta", "country": "US", "industry": "Tech", "numberOfEmployees": 5},
        {"name": "Kiwi", "country": "NZ", "industry": "Retail", "numberOfEmployees": 40},
        {"name": "Acme", "country": "US", "industry": "Tech", "numberOfEmployees": 50}
    ])
}

async fn request_count(server: &MockServer) -> usize {
    server.received_requests().await.unwrap_or_default().len()
}

#[tokio::test]
async fn fetch_recovers_after_two_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies()))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(policy(Duration::from_secs(2))).unwrap();
    let records = fetcher
        .fetch_records(&format!("{}/data", server.uri()))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].name, "Zeta");
    assert_eq!(records[2].number_of_employees, 50);
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn fetch_gives_up_after_three_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(policy(Duration::from_secs(2))).unwrap();
    let err = fetcher
        .fetch_records(&format!("{}/data", server.uri()))
        .await
        .unwrap_err();

    match err {
        FetchError::Exhausted { attempts, source } => {
            assert_eq!(attempts, 3);
            assert!(matches!(*source, FetchError::Status { status: 500 }));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn slow_response_times_out_and_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(companies())
                .set_delay(Duration::from_millis(1500)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(companies()))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(policy(Duration::from_millis(200))).unwrap();
    let records = fetcher
        .fetch_records(&format!("{}/data", server.uri()))
        .await
        .unwrap();

    assert_eq!(records.len(), 3);
    assert_eq!(request_count(&server).await, 2);
}

#[tokio::test]
async fn malformed_body_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(policy(Duration::from_secs(2))).unwrap();
    let err = fetcher
        .fetch_records(&format!("{}/data", server.uri()))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Decode { .. }));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn failed_load_leaves_controller_loading() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let fetcher = Fetcher::new(policy(Duration::from_secs(2))).unwrap();
    let mut controller = Controller::default();
    let result = controller
        .initialize(&fetcher, &format!("{}/data", server.uri()))
        .await;

    assert!(result.is_err());
    assert_eq!(controller.phase(), Phase::Loading);
    assert!(controller.view().loading);
    assert!(controller.refresh().is_none());
}

#[tokio::test]
async fn end_to_end_filter_us_sorted_by_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"name": "Acme", "country": "US", "industry": "Tech", "numberOfEmployees": 50},
            {"name": "Zeta", "country": "US", "industry": "Tech", "numberOfEmployees": 5}
        ])))
        .mount(&server)
        .await;

    let runner = Runner::new(Options {
        url: format!("{}/data", server.uri()),
        timeout_seconds: 2,
        controls: ControlState {
            country: "US".to_string(),
            ..ControlState::default()
        },
        ..Options::default()
    })
    .unwrap();
    let controller = runner.start().await.unwrap();

    assert_eq!(controller.phase(), Phase::Ready);
    assert_eq!(
        controller.view().results,
        vec!["Acme · US · Tech · 50", "Zeta · US · Tech · 5"]
    );
    let html = String::from_utf8(crate::output::render_html(controller.view())).unwrap();
    assert!(html.contains(r#"<option value="US" selected>US (2)</option>"#));
    assert!(html.contains(r#"<li class="py-2">Acme · US · Tech · 50</li>"#));
}

#[tokio::test]
async fn runner_surfaces_exhausted_fetch() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let runner = Runner::new(Options {
        url: format!("{}/data", server.uri()),
        timeout_seconds: 2,
        ..Options::default()
    })
    .unwrap();
    let err = runner.start().await.unwrap_err();

    assert!(matches!(
        err,
        RunnerError::Fetch {
            source: FetchError::Exhausted { attempts: 3, .. }
        }
    ));
    assert_eq!(request_count(&server).await, 3);
}
