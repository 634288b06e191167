//! Common types used across the Khipu client library.

pub mod common;
pub mod serde_helpers;

pub use common::*;
