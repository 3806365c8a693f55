//! End-to-end checkout against a mock ParkWise server: registry → HTTP
//! gateway → coordinator → user-facing notification.

use std::time::Duration;

use httpmock::prelude::*;
use park_core::checkout::{CheckoutCoordinator, CheckoutOutcome, GatewayConfig, GatewayRegistry};
use park_core::{BookingId, CheckoutError, NotificationKind};
use park_http::HttpGatewayFactory;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;

async fn coordinator_for(
    base_url: String,
    timeout: Option<Duration>,
) -> CheckoutCoordinator {
    let mut registry = GatewayRegistry::new();
    registry.register(Box::new(HttpGatewayFactory));

    let config = GatewayConfig {
        backend: "http".to_string(),
        base_url,
        timeout,
    };
    let gateway = registry
        .create(&config)
        .await
        .expect("http backend should be registered");
    CheckoutCoordinator::new(gateway)
}

#[tokio::test]
async fn test_successful_checkout_shows_total() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/end-booking/17");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"status": "success", "total_cost": 120.50}));
    });

    let coordinator = coordinator_for(server.base_url(), None).await;
    let outcome = coordinator.end_booking(BookingId(17)).await;

    mock.assert();
    assert_eq!(
        outcome,
        CheckoutOutcome::Completed {
            total_cost: Some(dec!(120.50))
        }
    );
    let toast = outcome.notification("₹");
    assert_eq!(toast.kind, NotificationKind::Success);
    assert!(toast.message.contains("120.50"), "message was {:?}", toast.message);
    assert_eq!(outcome.refresh_after(), Some(Duration::from_millis(1800)));
}

#[tokio::test]
async fn test_error_status_with_server_error_code_is_rejected() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/end-booking/5");
        then.status(500)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"status": "error"}));
    });

    let coordinator = coordinator_for(server.base_url(), None).await;
    let outcome = coordinator.end_booking(BookingId(5)).await;

    mock.assert();
    assert_eq!(
        outcome,
        CheckoutOutcome::Rejected {
            status: "error".to_string()
        }
    );
    assert_eq!(
        outcome.notification("₹").message,
        "❌ Could not check out. Try again."
    );
}

#[tokio::test]
async fn test_non_json_body_is_network_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/end-booking/8");
        then.status(502).body("<html>Bad Gateway</html>");
    });

    let coordinator = coordinator_for(server.base_url(), None).await;
    let outcome = coordinator.end_booking(BookingId(8)).await;

    assert!(matches!(outcome, CheckoutOutcome::Failed(CheckoutError::Decode(_))));
    assert_eq!(outcome.notification("₹").message, "❌ Network error.");
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Port 9 (discard) is not served by anything in the test environment.
    let coordinator = coordinator_for("http://127.0.0.1:9".to_string(), None).await;

    let outcome = coordinator.end_booking(BookingId(1)).await;

    assert!(matches!(
        outcome,
        CheckoutOutcome::Failed(CheckoutError::Transport(_))
    ));
}

#[tokio::test]
async fn test_configured_timeout_is_a_transport_failure() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/end-booking/3");
        then.status(200)
            .delay(Duration::from_millis(500))
            .json_body(serde_json::json!({"status": "success"}));
    });

    let coordinator = coordinator_for(server.base_url(), Some(Duration::from_millis(50))).await;
    let outcome = coordinator.end_booking(BookingId(3)).await;

    assert!(matches!(
        outcome,
        CheckoutOutcome::Failed(CheckoutError::Transport(_))
    ));
}
