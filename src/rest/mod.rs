//! Khipu REST API client.
//!
//! Provides access to the Khipu 2.0 REST endpoints: banks, payments and
//! receivers.
//!
//! # Trait-based API
//!
//! The [`KhipuApi`] trait abstracts all REST API operations, enabling:
//! - Mock implementations for testing
//! - Decorators around the real client
//!
//! ```rust,ignore
//! use khipu_api_client::rest::{KhipuApi, KhipuClient};
//!
//! async fn list_banks<C: KhipuApi>(client: &C) -> Result<(), khipu_api_client::KhipuError> {
//!     for bank in client.get_banks().await? {
//!         println!("{}", bank.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod banks;
mod client;
mod endpoints;
pub mod payments;
pub mod receivers;
mod traits;

pub use client::{KhipuClient, KhipuClientBuilder};
pub use endpoints::*;
pub use traits::KhipuApi;
