//! # Khipu Client
//!
//! An async Rust client library for the Khipu payment gateway REST API.
//!
//! ## Features
//!
//! - Banks, payments (create, query, delete, refund) and receivers endpoints
//! - HMAC-SHA256 request signing
//! - Strong typing for all request/response types
//! - Financial precision with `rust_decimal`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use khipu_api_client::auth::StaticCredentials;
//! use khipu_api_client::rest::KhipuClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = Arc::new(StaticCredentials::new("12345", "receiver_secret"));
//!     let client = KhipuClient::builder().credentials(credentials).build()?;
//!     let banks = client.get_banks().await?;
//!     println!("Banks: {:?}", banks);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
pub mod rest;
pub mod types;

// Re-export commonly used types at crate root
pub use error::KhipuError;
pub use rest::{KhipuApi, KhipuClient};
pub use types::common::{Currency, PaymentStatus, StatusDetail};

/// Result type alias using KhipuError
pub type Result<T> = std::result::Result<T, KhipuError>;
