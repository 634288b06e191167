//! Bank listing endpoint.

mod types;

pub use types::*;

use crate::error::KhipuError;
use crate::rest::KhipuClient;
use crate::rest::client::Params;
use crate::rest::endpoints;

impl KhipuClient {
    /// List the banks available for paying this receiver.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use khipu_api_client::rest::KhipuClient;
    /// use khipu_api_client::auth::EnvCredentials;
    /// use std::sync::Arc;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let client = KhipuClient::builder()
    ///         .credentials(Arc::new(EnvCredentials::from_env()?))
    ///         .build()?;
    ///
    ///     for bank in client.get_banks().await? {
    ///         println!("{} (min {})", bank.name, bank.min_amount);
    ///     }
    ///     Ok(())
    /// }
    /// ```
    pub async fn get_banks(&self) -> Result<Vec<Bank>, KhipuError> {
        let response: BanksResponse = self.get(endpoints::BANKS, Params::new()).await?;
        Ok(response.banks)
    }
}
