//! Types for the banks endpoint.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::BankType;
use crate::types::serde_helpers::empty_string_as_none;

/// A bank payments can be made from.
#[derive(Debug, Clone, Deserialize)]
pub struct Bank {
    /// Bank identifier, usable as `bank_id` when creating a payment.
    pub bank_id: String,
    /// Display name.
    pub name: String,
    /// Message shown to payers choosing this bank.
    #[serde(default)]
    pub message: String,
    /// Minimum amount accepted by this bank.
    pub min_amount: Decimal,
    /// Account type the bank serves.
    #[serde(rename = "type")]
    pub bank_type: BankType,
    /// Parent bank id, for branches of the same institution.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub parent: Option<String>,
    /// Bank logo.
    #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
    pub logo_url: Option<String>,
}

/// Response wrapper of `GET /banks`.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BanksResponse {
    pub banks: Vec<Bank>,
}
