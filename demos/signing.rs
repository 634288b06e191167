//! Example: Computing the Authorization header by hand.
//!
//! Run with: cargo run --example signing

use khipu_api_client::auth::{Credentials, canonical_string, sign_request};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::new("42", "s3cr3t");
    let uri = "https://khipu.com/api/2.0/payments";
    let params = [
        ("subject", "Pago de prueba"),
        ("currency", "CLP"),
        ("amount", "1000"),
        ("body", ""),
    ];

    // Empty values are dropped and keys sorted before hashing.
    println!("Canonical string: {}", canonical_string("POST", uri, params)?);
    println!("Authorization: {}", sign_request(&credentials, "POST", uri, params)?);

    Ok(())
}
