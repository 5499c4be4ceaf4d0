//! The attempt-cycle state machine.

use std::time::Duration;

use tracing::{debug, error, info, warn};

use hubcast_types::{
    Delivery, DeliveryError, Endpoint, RetryPolicy, SubmissionOutcome, SubmissionRequest,
};

/// Drives delivery of one request across endpoints and attempt cycles.
///
/// The engine holds no state between runs; a single [`submit`] call owns
/// the whole retry lifecycle and resolves to a definitive outcome. The
/// request is borrowed immutably throughout, so every retry resends
/// byte-identical data.
///
/// [`submit`]: SubmissionEngine::submit
pub struct SubmissionEngine<D> {
    delivery: D,
}

impl<D: Delivery> SubmissionEngine<D> {
    pub fn new(delivery: D) -> Self {
        Self { delivery }
    }

    /// Try every endpoint in order, retrying the whole cycle with
    /// exponential backoff until one endpoint accepts the request or
    /// `policy.max_attempts` cycles are exhausted.
    ///
    /// A single endpoint's failure is never fatal by itself; only
    /// exhausting `max_attempts * endpoints.len()` deliveries is. Every
    /// failure is treated as potentially transient and retried
    /// identically.
    pub async fn submit(
        &self,
        request: &SubmissionRequest,
        endpoints: &[Endpoint],
        policy: &RetryPolicy,
    ) -> SubmissionOutcome {
        if let Err(e) = policy.validate() {
            return SubmissionOutcome::Failure(DeliveryError::RequestFailed(format!(
                "invalid retry policy: {e}"
            )));
        }
        if endpoints.is_empty() {
            return SubmissionOutcome::Failure(DeliveryError::RequestFailed(
                "no endpoints configured".to_string(),
            ));
        }

        let mut last_error = None;

        for attempt in 1..=policy.max_attempts {
            for endpoint in endpoints {
                debug!(
                    "attempt {attempt}: delivering to {endpoint} (destination {})",
                    request.destination()
                );

                match self.delivery.deliver(endpoint, request).await {
                    Ok(receipt) => {
                        info!(
                            "submission accepted by {endpoint} on attempt {attempt} (receipt {})",
                            receipt.id
                        );
                        return SubmissionOutcome::Success(receipt);
                    }
                    Err(e) => {
                        warn!("delivery to {endpoint} failed on attempt {attempt}: {e}");
                        last_error = Some(e);
                    }
                }
            }

            if attempt < policy.max_attempts {
                let delay = policy.delay_for_cycle(attempt);
                info!(
                    "attempt {attempt} failed on all {} endpoint(s), waiting {}ms before attempt {}",
                    endpoints.len(),
                    delay.as_millis(),
                    attempt + 1
                );
                wait(delay).await;
            }
        }

        let last_error = last_error.expect("at least one delivery ran and failed");
        error!(
            "submission to {} failed after {} attempt(s) across {} endpoint(s): {last_error}",
            request.destination(),
            policy.max_attempts,
            endpoints.len()
        );
        SubmissionOutcome::Failure(last_error)
    }
}

/// Suspend the current task for `duration`. Deterministic — no jitter.
async fn wait(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use hubcast_nullables::NullHub;
    use hubcast_types::Receipt;
    use serde_json::json;
    use tokio::time::Instant;

    fn request() -> SubmissionRequest {
        SubmissionRequest::new(
            "gov.example.eth",
            json!({
                "address": "0x1111111111111111111111111111111111111111",
                "sig": "0xabcd",
                "data": {"title": "Raise quorum"}
            }),
        )
    }

    fn two_endpoints() -> Vec<Endpoint> {
        vec![
            Endpoint::primary("https://hub.example.org"),
            Endpoint::secondary("https://backup.example.org"),
        ]
    }

    fn unreachable() -> DeliveryError {
        DeliveryError::Unreachable("connection refused".into())
    }

    #[tokio::test(start_paused = true)]
    async fn first_delivery_success_is_a_single_call_with_no_delay() {
        let hub = NullHub::new();
        hub.enqueue_ok(Receipt::with_id("0x1"));
        let engine = SubmissionEngine::new(hub.clone());

        let started = Instant::now();
        let outcome = engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        assert_eq!(outcome.receipt().unwrap().id, "0x1");
        assert_eq!(hub.call_count(), 1);
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failover_to_secondary_is_immediate() {
        let hub = NullHub::new();
        hub.enqueue_err(unreachable());
        hub.enqueue_ok(Receipt::with_id("0x2"));
        let engine = SubmissionEngine::new(hub.clone());

        let started = Instant::now();
        let outcome = engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        assert!(outcome.is_success());
        assert_eq!(hub.called_endpoints(), vec!["primary", "secondary"]);
        // Endpoint failover happens within the cycle — no backoff delay.
        assert_eq!(started.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_performs_exactly_max_attempts_times_endpoints_calls() {
        let hub = NullHub::new();
        hub.enqueue_err_times(unreachable(), 6);
        let engine = SubmissionEngine::new(hub.clone());

        let outcome = engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        assert!(!outcome.is_success());
        assert_eq!(hub.call_count(), 6);
        assert_eq!(
            hub.called_endpoints(),
            vec!["primary", "secondary", "primary", "secondary", "primary", "secondary"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn backoff_delays_follow_the_geometric_sequence() {
        let hub = NullHub::new();
        hub.enqueue_err_times(unreachable(), 6);
        let engine = SubmissionEngine::new(hub.clone());

        engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        let calls = hub.calls();
        // Within a cycle: immediate failover.
        assert_eq!(calls[1].at - calls[0].at, Duration::ZERO);
        assert_eq!(calls[3].at - calls[2].at, Duration::ZERO);
        // Between cycles: 5000ms then 10000ms.
        assert_eq!(calls[2].at - calls[1].at, Duration::from_millis(5_000));
        assert_eq!(calls[4].at - calls[3].at, Duration::from_millis(10_000));
    }

    #[tokio::test(start_paused = true)]
    async fn failure_reports_the_error_from_the_final_delivery() {
        let hub = NullHub::new();
        hub.enqueue_err(DeliveryError::Unreachable("primary down".into()));
        hub.enqueue_err(DeliveryError::Rejected("bad sig".into()));
        let engine = SubmissionEngine::new(hub.clone());

        let policy = RetryPolicy {
            max_attempts: 1,
            ..RetryPolicy::default()
        };
        let outcome = engine.submit(&request(), &two_endpoints(), &policy).await;

        assert_eq!(
            outcome,
            SubmissionOutcome::Failure(DeliveryError::Rejected("bad sig".into()))
        );
    }

    #[tokio::test(start_paused = true)]
    async fn primary_recovers_on_second_attempt() {
        let hub = NullHub::new();
        // Cycle 1: primary fails, secondary fails. Cycle 2: primary accepts.
        hub.enqueue_err(unreachable());
        hub.enqueue_err(unreachable());
        hub.enqueue_ok(Receipt::with_id("0x3"));
        let engine = SubmissionEngine::new(hub.clone());

        let outcome = engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        assert!(outcome.is_success());
        assert_eq!(hub.call_count(), 3);
        assert_eq!(
            hub.called_endpoints(),
            vec!["primary", "secondary", "primary"]
        );
        let calls = hub.calls();
        assert_eq!(calls[2].at - calls[1].at, Duration::from_millis(5_000));
    }

    #[tokio::test(start_paused = true)]
    async fn payload_is_byte_identical_across_all_deliveries() {
        let hub = NullHub::new();
        hub.enqueue_err_times(unreachable(), 6);
        let engine = SubmissionEngine::new(hub.clone());

        engine
            .submit(&request(), &two_endpoints(), &RetryPolicy::default())
            .await;

        let calls = hub.calls();
        for call in &calls[1..] {
            assert_eq!(call.payload, calls[0].payload);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_endpoint_retries_without_failover() {
        let hub = NullHub::new();
        hub.enqueue_err_times(unreachable(), 3);
        let engine = SubmissionEngine::new(hub.clone());

        let endpoints = vec![Endpoint::primary("https://hub.example.org")];
        let outcome = engine
            .submit(&request(), &endpoints, &RetryPolicy::default())
            .await;

        assert!(!outcome.is_success());
        assert_eq!(hub.called_endpoints(), vec!["primary", "primary", "primary"]);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_endpoint_list_fails_without_any_delivery() {
        let hub = NullHub::new();
        let engine = SubmissionEngine::new(hub.clone());

        let outcome = engine
            .submit(&request(), &[], &RetryPolicy::default())
            .await;

        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure(DeliveryError::RequestFailed(_))
        ));
        assert_eq!(hub.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn invalid_policy_fails_without_any_delivery() {
        let hub = NullHub::new();
        let engine = SubmissionEngine::new(hub.clone());

        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let outcome = engine.submit(&request(), &two_endpoints(), &policy).await;

        assert!(matches!(
            outcome,
            SubmissionOutcome::Failure(DeliveryError::RequestFailed(_))
        ));
        assert_eq!(hub.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn capped_backoff_uses_the_cap() {
        let hub = NullHub::new();
        hub.enqueue_err_times(unreachable(), 4);
        let engine = SubmissionEngine::new(hub.clone());

        let policy = RetryPolicy {
            max_attempts: 4,
            initial_delay: Duration::from_millis(1_000),
            backoff_multiplier: 2,
            max_delay: Some(Duration::from_millis(1_500)),
        };
        let endpoints = vec![Endpoint::primary("https://hub.example.org")];
        engine.submit(&request(), &endpoints, &policy).await;

        let calls = hub.calls();
        assert_eq!(calls[1].at - calls[0].at, Duration::from_millis(1_000));
        assert_eq!(calls[2].at - calls[1].at, Duration::from_millis(1_500));
        assert_eq!(calls[3].at - calls[2].at, Duration::from_millis(1_500));
    }
}
