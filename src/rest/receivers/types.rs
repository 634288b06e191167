//! Types for the receivers endpoint.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Deserializer, Serialize};
use serde_with::skip_serializing_none;

use crate::auth::Credentials;
use crate::error::KhipuError;
use crate::types::serde_helpers::number_or_string;

/// Request parameters for registering a receiver.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ReceiverRequest {
    /// Administrator first name.
    pub admin_first_name: String,
    /// Administrator last name.
    pub admin_last_name: String,
    /// Administrator email.
    pub admin_email: String,
    /// Two letter country code (e.g., "CL").
    pub country_code: String,
    /// Tax identifier of the business.
    pub business_identifier: String,
    /// Business category.
    pub business_category: String,
    /// Business name.
    pub business_name: String,
    /// Business phone.
    pub business_phone: String,
    /// Address, first line.
    pub business_address_line_1: String,
    /// Address, second line.
    pub business_address_line_2: String,
    /// Address, third line.
    pub business_address_line_3: String,
    /// Contact full name.
    pub contact_full_name: String,
    /// Contact job title.
    pub contact_job_title: String,
    /// Contact email.
    pub contact_email: String,
    /// Contact phone.
    pub contact_phone: String,
    /// Bank of the receiver's account.
    pub bank_account_bank_id: Option<String>,
    /// Account holder identifier.
    pub bank_account_identifier: Option<String>,
    /// Account holder name.
    pub bank_account_name: Option<String>,
    /// Account number.
    pub bank_account_number: Option<String>,
    /// Default notification URL for the receiver's payments.
    pub notify_url: Option<String>,
    /// URL notified with rendition reports.
    pub rendition_url: Option<String>,
}

impl ReceiverRequest {
    /// Check that the fields Khipu requires are present.
    pub fn validate(&self) -> Result<(), KhipuError> {
        let required = [
            ("admin_first_name", &self.admin_first_name),
            ("admin_last_name", &self.admin_last_name),
            ("admin_email", &self.admin_email),
            ("country_code", &self.country_code),
            ("business_identifier", &self.business_identifier),
            ("business_category", &self.business_category),
            ("business_name", &self.business_name),
            ("business_phone", &self.business_phone),
            ("business_address_line_1", &self.business_address_line_1),
            ("contact_full_name", &self.contact_full_name),
            ("contact_email", &self.contact_email),
            ("contact_phone", &self.contact_phone),
        ];

        let missing: Vec<&str> = required
            .iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| *name)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(KhipuError::InvalidRequest(format!(
                "missing receiver fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// Response of a successful receiver registration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiverCreateResponse {
    /// The new receiver id.
    #[serde(deserialize_with = "number_or_string::deserialize")]
    pub receiver_id: u64,
    /// The new receiver's secret.
    #[serde(deserialize_with = "deserialize_secret")]
    pub secret: SecretString,
}

impl ReceiverCreateResponse {
    /// Turn the response into credentials for signing as the new receiver.
    pub fn into_credentials(self) -> Credentials {
        Credentials::new(self.receiver_id.to_string(), self.secret.expose_secret())
    }
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<SecretString, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(SecretString::from)
}
