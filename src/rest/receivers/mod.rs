//! Receiver registration endpoint.
//!
//! Only available to integrator accounts.

mod types;

pub use types::*;

use crate::error::KhipuError;
use crate::rest::KhipuClient;
use crate::rest::client::form_params;
use crate::rest::endpoints;

impl KhipuClient {
    /// Register a new receiver under this integrator.
    ///
    /// The response carries the new receiver's id and secret; see
    /// [`ReceiverCreateResponse::into_credentials`].
    pub async fn create_receiver(
        &self,
        request: &ReceiverRequest,
    ) -> Result<ReceiverCreateResponse, KhipuError> {
        request.validate()?;
        self.post(endpoints::RECEIVERS, form_params(request)?).await
    }
}
