//! Types for the payments endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use time::OffsetDateTime;

use crate::error::KhipuError;
use crate::types::serde_helpers::{empty_string_as_none, number_or_string, optional_rfc3339};
use crate::types::{Currency, PaymentMethod, PaymentStatus, StatusDetail};

/// Request parameters for creating a payment.
///
/// Only `subject`, `currency` and `amount` are required. Unset optional
/// fields are neither sent nor signed.
///
/// # Example
///
/// ```rust
/// use khipu_api_client::rest::payments::PaymentRequest;
/// use khipu_api_client::types::Currency;
///
/// let request = PaymentRequest::new("Order #1001", Currency::Clp, "15000".parse().unwrap())
///     .transaction_id("1001")
///     .return_url("https://shop.example/ok")
///     .notify_url("https://shop.example/khipu/notify");
/// assert!(request.validate().is_ok());
/// ```
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct PaymentRequest {
    /// Payment subject shown to the payer.
    pub subject: String,
    /// Payment currency.
    pub currency: Currency,
    /// Amount to charge.
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// Merchant's own transaction id.
    pub transaction_id: Option<String>,
    /// Free-form data returned in notifications.
    pub custom: Option<String>,
    /// Payment description.
    pub body: Option<String>,
    /// Preselected bank (see [`crate::rest::banks::Bank::bank_id`]).
    pub bank_id: Option<String>,
    /// Where the payer lands after paying.
    pub return_url: Option<String>,
    /// Where the payer lands after cancelling.
    pub cancel_url: Option<String>,
    /// Image shown on the payment page.
    pub picture_url: Option<String>,
    /// Endpoint Khipu notifies when the payment is confirmed.
    pub notify_url: Option<String>,
    /// Contract shown to the payer.
    pub contract_url: Option<String>,
    /// Notification API version (e.g., "1.3").
    pub notify_api_version: Option<String>,
    /// Expiration of the payment.
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_date: Option<OffsetDateTime>,
    /// Have Khipu email the payer the payment link.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub send_email: bool,
    /// Payer name (required when `send_email` is set).
    pub payer_name: Option<String>,
    /// Payer email (required when `send_email` is set).
    pub payer_email: Option<String>,
    /// Have Khipu send reminders to the payer.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub send_reminders: bool,
    /// Email of the user responsible for this payment.
    pub responsible_user_email: Option<String>,
    /// Only allow the payer with this personal identifier.
    pub fixed_payer_personal_identifier: Option<String>,
    /// Integrator commission.
    pub integrator_fee: Option<Decimal>,
    /// Collecting account, for receivers with several accounts.
    pub collect_account_uuid: Option<String>,
    /// Latest date for the merchant to confirm the payment.
    #[serde(with = "time::serde::rfc3339::option")]
    pub confirm_timeout_date: Option<OffsetDateTime>,
}

impl PaymentRequest {
    /// Create a request with only the required fields set.
    pub fn new(subject: impl Into<String>, currency: Currency, amount: Decimal) -> Self {
        Self {
            subject: subject.into(),
            currency,
            amount,
            transaction_id: None,
            custom: None,
            body: None,
            bank_id: None,
            return_url: None,
            cancel_url: None,
            picture_url: None,
            notify_url: None,
            contract_url: None,
            notify_api_version: None,
            expires_date: None,
            send_email: false,
            payer_name: None,
            payer_email: None,
            send_reminders: false,
            responsible_user_email: None,
            fixed_payer_personal_identifier: None,
            integrator_fee: None,
            collect_account_uuid: None,
            confirm_timeout_date: None,
        }
    }

    /// Set the merchant transaction id.
    pub fn transaction_id(mut self, id: impl Into<String>) -> Self {
        self.transaction_id = Some(id.into());
        self
    }

    /// Set custom data returned in notifications.
    pub fn custom(mut self, custom: impl Into<String>) -> Self {
        self.custom = Some(custom.into());
        self
    }

    /// Set the payment description.
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Preselect a bank.
    pub fn bank_id(mut self, bank_id: impl Into<String>) -> Self {
        self.bank_id = Some(bank_id.into());
        self
    }

    /// Set the return URL.
    pub fn return_url(mut self, url: impl Into<String>) -> Self {
        self.return_url = Some(url.into());
        self
    }

    /// Set the cancel URL.
    pub fn cancel_url(mut self, url: impl Into<String>) -> Self {
        self.cancel_url = Some(url.into());
        self
    }

    /// Set the notification URL and API version.
    pub fn notify_url(mut self, url: impl Into<String>) -> Self {
        self.notify_url = Some(url.into());
        self.notify_api_version.get_or_insert_with(|| "1.3".to_string());
        self
    }

    /// Set the expiration date.
    pub fn expires_date(mut self, date: OffsetDateTime) -> Self {
        self.expires_date = Some(date);
        self
    }

    /// Have Khipu email the payment link to the payer.
    pub fn send_email_to(mut self, name: impl Into<String>, email: impl Into<String>) -> Self {
        self.send_email = true;
        self.payer_name = Some(name.into());
        self.payer_email = Some(email.into());
        self
    }

    /// Have Khipu send payment reminders.
    pub fn send_reminders(mut self, send: bool) -> Self {
        self.send_reminders = send;
        self
    }

    /// Check the request before sending it.
    ///
    /// # Errors
    ///
    /// Returns [`KhipuError::InvalidRequest`] for an empty subject, a
    /// non-positive amount, or `send_email` without payer name and email.
    pub fn validate(&self) -> Result<(), KhipuError> {
        if self.subject.trim().is_empty() {
            return Err(KhipuError::InvalidRequest("subject must not be empty".to_string()));
        }
        if self.amount <= Decimal::ZERO {
            return Err(KhipuError::InvalidRequest(format!(
                "amount must be positive, got {}",
                self.amount
            )));
        }
        if self.send_email && (is_blank(&self.payer_name) || is_blank(&self.payer_email)) {
            return Err(KhipuError::InvalidRequest(
                "send_email requires payer_name and payer_email".to_string(),
            ));
        }
        if self.integrator_fee.is_some_and(|fee| fee < Decimal::ZERO) {
            return Err(KhipuError::InvalidRequest(
                "integrator_fee must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().is_none_or(|v| v.trim().is_empty())
}

/// Request parameters for refunding a payment.
///
/// Without an amount the whole payment is refunded.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct RefundRequest {
    /// Amount to refund.
    pub amount: Option<Decimal>,
}

impl RefundRequest {
    /// Refund the full amount.
    pub fn full() -> Self {
        Self::default()
    }

    /// Refund part of the amount.
    pub fn partial(amount: Decimal) -> Self {
        Self {
            amount: Some(amount),
        }
    }

    /// Check the request before sending it.
    pub fn validate(&self) -> Result<(), KhipuError> {
        match self.amount {
            Some(amount) if amount <= Decimal::ZERO => Err(KhipuError::InvalidRequest(format!(
                "refund amount must be positive, got {amount}"
            ))),
            _ => Ok(()),
        }
    }
}

/// Response of a successful payment creation.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentCreateResponse {
    /// Payment identifier.
    pub payment_id: String,
    /// URL of the payment page.
    pub payment_url: String,
    /// URL for paying with Khipu's simplified transfer.
    #[serde(
        alias = "simplified_tranfer_url",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub simplified_transfer_url: Option<String>,
    /// URL for paying with a regular transfer.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub transfer_url: Option<String>,
    /// URL that opens the Khipu app.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub app_url: Option<String>,
    /// Whether the payment can be completed on a terminal.
    #[serde(default)]
    pub ready_for_terminal: bool,
}

/// Full information about a payment.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentResponse {
    /// Payment identifier.
    pub payment_id: String,
    /// URL of the payment page.
    pub payment_url: String,
    /// URL for paying with Khipu's simplified transfer.
    #[serde(
        alias = "simplified_tranfer_url",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub simplified_transfer_url: Option<String>,
    /// URL for paying with a regular transfer.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub transfer_url: Option<String>,
    /// URL that opens the Khipu app.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub app_url: Option<String>,
    /// Whether the payment can be completed on a terminal.
    #[serde(default)]
    pub ready_for_terminal: bool,
    /// Token sent in notifications for this payment.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub notification_token: Option<String>,
    /// Receiver that owns the payment.
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub receiver_id: u64,
    /// When the funds were reconciled.
    #[serde(deserialize_with = "optional_rfc3339::deserialize", default)]
    pub conciliation_date: Option<OffsetDateTime>,
    /// Payment subject.
    pub subject: String,
    /// Payment amount.
    pub amount: Decimal,
    /// Payment currency.
    pub currency: Currency,
    /// Overall status.
    #[serde(default)]
    pub status: PaymentStatus,
    /// Detailed status.
    #[serde(default)]
    pub status_detail: StatusDetail,
    /// Payment description.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub body: Option<String>,
    /// Image shown on the payment page.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub picture_url: Option<String>,
    /// Receipt of a completed payment.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub receipt_url: Option<String>,
    /// Return URL.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub return_url: Option<String>,
    /// Cancel URL.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub cancel_url: Option<String>,
    /// Notification URL.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub notify_url: Option<String>,
    /// Notification API version.
    #[serde(
        alias = "notify_api_verion",
        deserialize_with = "empty_string_as_none::deserialize",
        default
    )]
    pub notify_api_version: Option<String>,
    /// Expiration of the payment.
    #[serde(deserialize_with = "optional_rfc3339::deserialize", default)]
    pub expires_date: Option<OffsetDateTime>,
    /// Attachments shown on the payment page.
    #[serde(default)]
    pub attachment_urls: Vec<String>,
    /// Bank the payment was made from.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub bank: Option<String>,
    /// Id of the bank the payment was made from.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub bank_id: Option<String>,
    /// Payer name.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub payer_name: Option<String>,
    /// Payer email.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub payer_email: Option<String>,
    /// Payer personal identifier.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub personal_identifier: Option<String>,
    /// Payer bank account number.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub bank_account_number: Option<String>,
    /// Whether reconciliation happened after the expected date.
    #[serde(default)]
    pub out_of_date_conciliation: bool,
    /// Merchant's own transaction id.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub transaction_id: Option<String>,
    /// Free-form merchant data.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub custom: Option<String>,
    /// Email of the responsible user.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub responsible_user_email: Option<String>,
    /// Whether reminders are sent.
    #[serde(default)]
    pub send_reminders: bool,
    /// Whether the payment link was emailed.
    #[serde(default)]
    pub send_email: bool,
    /// How the payment was completed.
    #[serde(default)]
    pub payment_method: Option<PaymentMethod>,
}

impl PaymentResponse {
    /// Whether the payment has been completed.
    pub fn is_paid(&self) -> bool {
        self.status.is_done()
    }
}

/// Generic success message returned by delete and refund operations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SuccessResponse {
    /// Message from Khipu.
    pub message: String,
}
