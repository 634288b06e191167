//! Authentication module for the Khipu API.
//!
//! This module provides:
//! - Credential management with secure secret storage
//! - HMAC-SHA256 signature generation for every request

mod credentials;
mod signature;

pub use credentials::{Credentials, CredentialsProvider, EnvCredentials, StaticCredentials};
pub use signature::{canonical_string, encode_component, sign_request};
