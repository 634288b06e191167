//! Payment endpoints: create, query, delete and refund.

mod types;

pub use types::*;

use crate::error::KhipuError;
use crate::rest::KhipuClient;
use crate::rest::client::{Params, form_params};
use crate::rest::endpoints;

fn require_non_empty(value: &str, what: &str) -> Result<(), KhipuError> {
    if value.trim().is_empty() {
        return Err(KhipuError::InvalidRequest(format!("{what} must not be empty")));
    }
    Ok(())
}

/// A payment id fills one path segment; dot segments would be resolved away
/// by URL parsing and address another resource.
fn require_path_segment(value: &str, what: &str) -> Result<(), KhipuError> {
    require_non_empty(value, what)?;
    if value == "." || value == ".." {
        return Err(KhipuError::InvalidRequest(format!(
            "{what} is not a valid path segment: {value:?}"
        )));
    }
    Ok(())
}

/// Compare the configured receiver id with the one Khipu reports.
///
/// Ids loaded from env files may carry padding or leading zeros.
fn same_receiver(configured: &str, reported: u64) -> bool {
    configured.trim().parse::<u64>().is_ok_and(|id| id == reported)
}

impl KhipuClient {
    /// Get a payment by its id.
    pub async fn get_payment(&self, payment_id: &str) -> Result<PaymentResponse, KhipuError> {
        require_path_segment(payment_id, "payment id")?;
        self.get(&endpoints::payment(payment_id), Params::new()).await
    }

    /// Get the payment a notification token refers to.
    ///
    /// Khipu posts a `notification_token` to the payment's `notify_url` once
    /// it is confirmed. The returned payment must belong to this receiver;
    /// otherwise [`KhipuError::ReceiverMismatch`] is returned.
    pub async fn get_payment_by_notification_token(
        &self,
        notification_token: &str,
    ) -> Result<PaymentResponse, KhipuError> {
        require_non_empty(notification_token, "notification token")?;
        let params = vec![(
            "notification_token".to_string(),
            notification_token.to_string(),
        )];
        let payment: PaymentResponse = self.get(endpoints::PAYMENTS, params).await?;

        if !same_receiver(self.receiver_id(), payment.receiver_id) {
            tracing::warn!(
                payment_id = %payment.payment_id,
                receiver_id = payment.receiver_id,
                "notification token belongs to another receiver"
            );
            return Err(KhipuError::ReceiverMismatch {
                expected: self.receiver_id().to_string(),
                actual: payment.receiver_id,
            });
        }

        Ok(payment)
    }

    /// Create a payment.
    ///
    /// The request is validated before being sent.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use khipu_api_client::rest::KhipuClient;
    /// use khipu_api_client::rest::payments::PaymentRequest;
    /// use khipu_api_client::auth::StaticCredentials;
    /// use khipu_api_client::types::Currency;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KhipuClient::builder()
    ///         .credentials(Arc::new(StaticCredentials::new("12345", "secret")))
    ///         .build()?;
    ///
    ///     let request = PaymentRequest::new("Order #1001", Currency::Clp, "15000".parse()?)
    ///         .transaction_id("1001");
    ///     let payment = client.create_payment(&request).await?;
    ///     println!("Pay at {}", payment.payment_url);
    ///     Ok(())
    /// }
    /// ```
    pub async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentCreateResponse, KhipuError> {
        request.validate()?;
        self.post(endpoints::PAYMENTS, form_params(request)?).await
    }

    /// Delete a payment that has not been paid yet.
    pub async fn delete_payment(&self, payment_id: &str) -> Result<SuccessResponse, KhipuError> {
        require_path_segment(payment_id, "payment id")?;
        self.delete(&endpoints::payment(payment_id)).await
    }

    /// Refund a payment in whole or in part.
    ///
    /// Only possible for receivers collecting through a Khipu account and
    /// before the funds have been transferred to them.
    pub async fn refund_payment(
        &self,
        payment_id: &str,
        request: &RefundRequest,
    ) -> Result<SuccessResponse, KhipuError> {
        require_path_segment(payment_id, "payment id")?;
        request.validate()?;
        self.post(&endpoints::payment_refunds(payment_id), form_params(request)?)
            .await
    }
}
