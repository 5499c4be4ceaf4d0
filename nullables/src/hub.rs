//! Nullable hub — scripted delivery outcomes, recorded calls.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use hubcast_types::{Delivery, DeliveryError, Endpoint, Receipt, SubmissionRequest};

/// A test hub that returns scripted outcomes instead of hitting the
/// network.
///
/// Outcomes are consumed in FIFO order, one per delivery call. Every call
/// is recorded with the endpoint it targeted, the serialized payload bytes,
/// and the (virtual) instant it happened — enough to assert call counts,
/// ordering, payload identity, and backoff timing.
///
/// Cloning is cheap and shares state, so tests can hand one clone to the
/// engine and keep another for assertions.
#[derive(Clone, Default)]
pub struct NullHub {
    inner: Arc<Inner>,
}

#[derive(Default)]
struct Inner {
    script: Mutex<VecDeque<Result<Receipt, DeliveryError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

/// One delivery call observed by the null hub.
#[derive(Clone, Debug)]
pub struct RecordedCall {
    /// Label of the endpoint the call targeted.
    pub endpoint: String,
    /// Destination the request was routed to.
    pub destination: String,
    /// Serialized payload bytes, for byte-identity assertions.
    pub payload: Vec<u8>,
    /// Instant the call happened (virtual time under a paused runtime).
    pub at: tokio::time::Instant,
}

impl NullHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next delivery call to succeed with `receipt`.
    pub fn enqueue_ok(&self, receipt: Receipt) {
        self.inner
            .script
            .lock()
            .expect("script lock")
            .push_back(Ok(receipt));
    }

    /// Script the next delivery call to fail with `error`.
    pub fn enqueue_err(&self, error: DeliveryError) {
        self.inner
            .script
            .lock()
            .expect("script lock")
            .push_back(Err(error));
    }

    /// Script `times` consecutive failures with clones of `error`.
    pub fn enqueue_err_times(&self, error: DeliveryError, times: usize) {
        for _ in 0..times {
            self.enqueue_err(error.clone());
        }
    }

    /// All calls observed so far (for assertions).
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.inner.calls.lock().expect("calls lock").clone()
    }

    /// Number of delivery calls observed so far.
    pub fn call_count(&self) -> usize {
        self.inner.calls.lock().expect("calls lock").len()
    }

    /// Endpoint labels in call order.
    pub fn called_endpoints(&self) -> Vec<String> {
        self.calls().into_iter().map(|c| c.endpoint).collect()
    }

    /// Clear the script and all recorded calls.
    pub fn reset(&self) {
        self.inner.script.lock().expect("script lock").clear();
        self.inner.calls.lock().expect("calls lock").clear();
    }
}

impl Delivery for NullHub {
    async fn deliver(
        &self,
        endpoint: &Endpoint,
        request: &SubmissionRequest,
    ) -> Result<Receipt, DeliveryError> {
        let payload = serde_json::to_vec(request.payload()).expect("payload serializes");
        self.inner
            .calls
            .lock()
            .expect("calls lock")
            .push(RecordedCall {
                endpoint: endpoint.label().to_string(),
                destination: request.destination().to_string(),
                payload,
                at: tokio::time::Instant::now(),
            });

        self.inner
            .script
            .lock()
            .expect("script lock")
            .pop_front()
            .unwrap_or_else(|| {
                Err(DeliveryError::RequestFailed(
                    "null hub: script exhausted".to_string(),
                ))
            })
    }
}
