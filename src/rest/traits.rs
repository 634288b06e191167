//! Trait definition for the Khipu REST API client.
//!
//! The `KhipuApi` trait abstracts all REST API operations so that code
//! using the client can be tested against a mock implementation.

use std::future::Future;

use crate::error::KhipuError;
use crate::rest::banks::Bank;
use crate::rest::payments::{
    PaymentCreateResponse, PaymentRequest, PaymentResponse, RefundRequest, SuccessResponse,
};
use crate::rest::receivers::{ReceiverCreateResponse, ReceiverRequest};

/// Trait defining all Khipu REST API operations.
///
/// All methods are async and return `Result<T, KhipuError>`.
pub trait KhipuApi: Send + Sync {
    /// List the banks available for paying the receiver.
    fn get_banks(&self) -> impl Future<Output = Result<Vec<Bank>, KhipuError>> + Send;

    /// Get a payment by its id.
    fn get_payment(
        &self,
        payment_id: &str,
    ) -> impl Future<Output = Result<PaymentResponse, KhipuError>> + Send;

    /// Get the payment a notification token refers to.
    fn get_payment_by_notification_token(
        &self,
        notification_token: &str,
    ) -> impl Future<Output = Result<PaymentResponse, KhipuError>> + Send;

    /// Create a payment.
    fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> impl Future<Output = Result<PaymentCreateResponse, KhipuError>> + Send;

    /// Delete a payment that has not been paid yet.
    fn delete_payment(
        &self,
        payment_id: &str,
    ) -> impl Future<Output = Result<SuccessResponse, KhipuError>> + Send;

    /// Refund a payment in whole or in part.
    fn refund_payment(
        &self,
        payment_id: &str,
        request: &RefundRequest,
    ) -> impl Future<Output = Result<SuccessResponse, KhipuError>> + Send;

    /// Register a new receiver.
    fn create_receiver(
        &self,
        request: &ReceiverRequest,
    ) -> impl Future<Output = Result<ReceiverCreateResponse, KhipuError>> + Send;
}
