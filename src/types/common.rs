//! Common domain types for the Khipu API.

use serde::{Deserialize, Serialize};

/// Currency of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Chilean peso
    Clp,
    /// Argentine peso
    Ars,
    /// Boliviano
    Bob,
    /// US dollar
    Usd,
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Currency::Clp => "CLP",
            Currency::Ars => "ARS",
            Currency::Bob => "BOB",
            Currency::Usd => "USD",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "CLP" => Ok(Currency::Clp),
            "ARS" => Ok(Currency::Ars),
            "BOB" => Ok(Currency::Bob),
            "USD" => Ok(Currency::Usd),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// Overall state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Waiting for the payer
    #[default]
    Pending,
    /// Paid, being verified by Khipu
    Verifying,
    /// Paid and confirmed
    Done,
    /// A status this library does not know about
    #[serde(other)]
    Unknown,
}

impl PaymentStatus {
    /// Whether the payment has been completed.
    pub fn is_done(&self) -> bool {
        matches!(self, PaymentStatus::Done)
    }
}

/// Detailed state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusDetail {
    /// Not paid yet
    #[default]
    Pending,
    /// Paid normally
    Normal,
    /// Marked as paid by the receiver
    MarkedPaidByReceiver,
    /// Rejected by the payer
    RejectedByPayer,
    /// Marked as abuse
    MarkedAsAbuse,
    /// Reversed after being paid
    Reversed,
    /// A detail this library does not know about
    #[serde(other)]
    Unknown,
}

/// Kind of bank account a bank serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BankType {
    /// Personal accounts
    Persona,
    /// Business accounts
    Empresa,
    /// A type this library does not know about
    #[serde(other)]
    Unknown,
}

/// How a payment was (or will be) completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Regular bank transfer
    RegularTransfer,
    /// Khipu simplified transfer
    SimplifiedTransfer,
    /// Method not yet known
    NotAvailable,
    /// A method this library does not know about
    #[serde(other)]
    Unknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_roundtrip_display_fromstr() {
        for c in [Currency::Clp, Currency::Ars, Currency::Bob, Currency::Usd] {
            assert_eq!(c.to_string().parse::<Currency>().unwrap(), c);
        }
        assert_eq!("clp".parse::<Currency>().unwrap(), Currency::Clp);
        assert!("EUR".parse::<Currency>().is_err());
    }

    #[test]
    fn test_currency_serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Currency::Clp).unwrap(), r#""CLP""#);
    }

    #[test]
    fn test_status_detail_kebab_case() {
        let detail: StatusDetail = serde_json::from_str(r#""marked-paid-by-receiver""#).unwrap();
        assert_eq!(detail, StatusDetail::MarkedPaidByReceiver);
    }

    #[test]
    fn test_unknown_values_fall_back() {
        let status: PaymentStatus = serde_json::from_str(r#""archived""#).unwrap();
        assert_eq!(status, PaymentStatus::Unknown);

        let bank_type: BankType = serde_json::from_str(r#""Cooperativa""#).unwrap();
        assert_eq!(bank_type, BankType::Unknown);

        let method: PaymentMethod = serde_json::from_str(r#""crypto""#).unwrap();
        assert_eq!(method, PaymentMethod::Unknown);
    }
}
