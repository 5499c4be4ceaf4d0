//! The single-endpoint delivery seam.

use std::future::Future;

use crate::endpoint::Endpoint;
use crate::error::DeliveryError;
use crate::receipt::Receipt;
use crate::request::SubmissionRequest;

/// One network round-trip to one endpoint.
///
/// Implementations translate the endpoint's response into an opaque
/// receipt or a typed failure. They never retry internally — retry and
/// failover belong to the submission engine driving this seam.
pub trait Delivery {
    fn deliver(
        &self,
        endpoint: &Endpoint,
        request: &SubmissionRequest,
    ) -> impl Future<Output = Result<Receipt, DeliveryError>> + Send;
}
