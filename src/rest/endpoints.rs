//! Khipu REST API endpoint constants.

use crate::auth::encode_component;

/// Base URL for the Khipu REST API (version 2.0).
pub const KHIPU_BASE_URL: &str = "https://khipu.com/api/2.0";

/// List banks available to the receiver.
pub const BANKS: &str = "/banks";
/// Create payments, or look one up by notification token.
pub const PAYMENTS: &str = "/payments";
/// Register new receivers (integrator accounts only).
pub const RECEIVERS: &str = "/receivers";

/// Path of a single payment.
pub fn payment(id: &str) -> String {
    format!("{}/{}", PAYMENTS, encode_component(id))
}

/// Path for refunding a payment.
pub fn payment_refunds(id: &str) -> String {
    format!("{}/refunds", payment(id))
}
