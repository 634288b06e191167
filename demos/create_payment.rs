//! Example: Creating a payment and checking it later.
//!
//! Run with: KHIPU_RECEIVER_ID=... KHIPU_SECRET=... cargo run --example create_payment

use std::sync::Arc;

use khipu_api_client::KhipuError;
use khipu_api_client::auth::EnvCredentials;
use khipu_api_client::rest::KhipuClient;
use khipu_api_client::rest::payments::PaymentRequest;
use khipu_api_client::types::Currency;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let client = KhipuClient::builder()
        .credentials(Arc::new(EnvCredentials::from_env()?))
        .build()?;

    let request = PaymentRequest::new("Pago de prueba", Currency::Clp, "1000".parse()?)
        .transaction_id("demo-1")
        .return_url("https://example.com/ok");

    match client.create_payment(&request).await {
        Ok(created) => {
            println!("Pay at: {}", created.payment_url);
            let payment = client.get_payment(&created.payment_id).await?;
            println!("Status: {:?} ({:?})", payment.status, payment.status_detail);
        }
        Err(KhipuError::Api(api_error)) if api_error.is_validation_error() => {
            for field in api_error.field_errors() {
                println!("{}: {}", field.field, field.message);
            }
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
