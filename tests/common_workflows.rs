//! Integration tests for common Tollgate workflows.
//!
//! These tests exercise the crates together through the facade.

use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tollgate::prelude::*;

// =============================================================================
// Validation through the facade
// =============================================================================

fn order_rules() -> RuleSet<serde_json::Value> {
    let mut rules = RuleSet::new();
    rules.rule_for("sku").string().required().alphanumeric();
    rules
        .rule_for("quantity")
        .number()
        .required()
        .integer()
        .between(1, 99);
    rules
        .rule_for("coupon")
        .rule("coupon requires a quantity of 10 or more", |value, order: &serde_json::Value| {
            value.is_nullish() || order["quantity"].as_f64().unwrap_or(0.0) >= 10.0
        });
    rules
}

#[test]
fn test_order_validation_happy_path() {
    let result = order_rules().validate(&json!({ "sku": "AB12", "quantity": 3 }));
    assert!(result.is_valid);
    assert!(result.into_result().is_ok());
}

#[test]
fn test_cross_field_rule_sees_whole_model() {
    let result = order_rules().validate(&json!({
        "sku": "AB12",
        "quantity": 3,
        "coupon": "SPRING",
    }));

    assert_eq!(
        result.errors_for("coupon").unwrap(),
        ["coupon requires a quantity of 10 or more"]
    );
    assert_eq!(result.error_count(), 1);
}

#[test]
fn test_report_serializes_for_clients() {
    let result = order_rules().validate(&json!({ "sku": "AB-12", "quantity": 2.5 }));

    let body = result.to_json();
    assert_eq!(body["isValid"], json!(false));
    let properties: Vec<&str> = body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["property"].as_str().unwrap())
        .collect();
    assert_eq!(properties, vec!["sku", "quantity"]);
}

// =============================================================================
// Retry through the facade
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_invalid_input_is_not_retried() {
    let rules = order_rules();
    let calls = AtomicU32::new(0);
    let sink = MemorySink::new();

    let order = json!({ "sku": "", "quantity": 0 });
    let outcome = execute_with_retry(
        "submit order",
        || {
            calls.fetch_add(1, Ordering::SeqCst);
            let report = rules.validate(&order);
            async move {
                report
                    .into_result()
                    .map_err(AttemptError::Permanent)
            }
        },
        RetryOptions {
            attempts: Some(3),
            min_delay: Some(Duration::from_millis(5)),
            ..Default::default()
        }
        .resolve(),
        &sink,
    )
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    let err = outcome.into_result().unwrap_err();
    assert_eq!(err.attempts, 1);
    assert!(err.last_error.get_field_errors("sku").contains(&"sku is required".to_string()));
    assert_eq!(sink.messages_at(Level::Warn).len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_flaky_submission_recovers() {
    let calls = Arc::new(AtomicU32::new(0));
    let sink = Arc::new(MemorySink::new());
    let retry = Retry::new(RetryPolicy {
        attempts: 4,
        min_delay: Duration::from_millis(5),
        max_delay: Duration::ZERO,
        factor: 2.0,
    })
    .with_sink(sink.clone());

    let counter = Arc::clone(&calls);
    let outcome: RetryOutcome<&str, String> = retry
        .execute("submit order", move || {
            let call = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if call == 0 {
                    Err(AttemptError::Transient("connection reset".to_string()))
                } else {
                    Ok("accepted")
                }
            }
        })
        .await;

    assert!(outcome.success());
    assert_eq!(outcome.attempts(), 2);
    assert_eq!(
        sink.messages_at(Level::Info),
        vec![
            "Try to execute submit order",
            "submit order retry attempt 1 after 5ms",
            "Try to execute submit order",
        ]
    );
}

// =============================================================================
// Logging
// =============================================================================

#[test]
fn test_level_parsing_and_ordering() {
    assert_eq!(Level::parse("warning"), Some(Level::Warn));
    assert!(Level::Error > Level::Info);
}
