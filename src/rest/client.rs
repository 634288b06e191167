//! Khipu REST API client implementation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use url::{Url, form_urlencoded};

use crate::auth::{CredentialsProvider, sign_request};
use crate::error::{ApiError, KhipuError};
use crate::rest::banks::Bank;
use crate::rest::endpoints::KHIPU_BASE_URL;
use crate::rest::payments::{
    PaymentCreateResponse, PaymentRequest, PaymentResponse, RefundRequest, SuccessResponse,
};
use crate::rest::receivers::{ReceiverCreateResponse, ReceiverRequest};
use crate::rest::traits::KhipuApi;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_ACCEPT: &str = "application/json";

/// Form or query parameters of a request, in the order they are sent.
pub(crate) type Params = Vec<(String, String)>;

/// The Khipu REST API client.
///
/// Every request is signed with the configured credentials. The base URL is
/// fixed when the client is built.
///
/// # Example
///
/// ```rust,no_run
/// use khipu_api_client::rest::KhipuClient;
/// use khipu_api_client::auth::StaticCredentials;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let credentials = Arc::new(StaticCredentials::new("12345", "receiver_secret"));
///     let client = KhipuClient::builder()
///         .credentials(credentials)
///         .build()?;
///
///     for bank in client.get_banks().await? {
///         println!("{}: {}", bank.bank_id, bank.name);
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct KhipuClient {
    http_client: ClientWithMiddleware,
    base_url: String,
    credentials: Arc<dyn CredentialsProvider>,
}

impl KhipuClient {
    /// Create a new client builder.
    pub fn builder() -> KhipuClientBuilder {
        KhipuClientBuilder::new()
    }

    /// The receiver id requests are signed with.
    pub fn receiver_id(&self) -> &str {
        &self.credentials.get_credentials().receiver_id
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Make a signed GET request. Parameters go in the query string.
    pub(crate) async fn get<T>(&self, endpoint: &str, params: Params) -> Result<T, KhipuError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::GET, endpoint, params).await
    }

    /// Make a signed POST request. Parameters go in a form body.
    pub(crate) async fn post<T>(&self, endpoint: &str, params: Params) -> Result<T, KhipuError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::POST, endpoint, params).await
    }

    /// Make a signed DELETE request.
    pub(crate) async fn delete<T>(&self, endpoint: &str) -> Result<T, KhipuError>
    where
        T: serde::de::DeserializeOwned,
    {
        self.send(Method::DELETE, endpoint, Params::new()).await
    }

    async fn send<T>(&self, method: Method, endpoint: &str, params: Params) -> Result<T, KhipuError>
    where
        T: serde::de::DeserializeOwned,
    {
        let mut url = Url::parse(&format!("{}{}", self.base_url, endpoint))?;

        // The signed URI never includes the query string.
        let creds = self.credentials.get_credentials();
        let authorization = sign_request(
            creds,
            method.as_str(),
            url.as_str(),
            params.iter().map(|(k, v)| (k, v)),
        )?;

        let body = if method == Method::POST {
            Some(serde_urlencoded::to_string(&params)?)
        } else {
            if !params.is_empty() {
                url.query_pairs_mut().extend_pairs(&params);
            }
            None
        };

        tracing::debug!(%method, path = endpoint, "sending Khipu request");

        let mut request = self
            .http_client
            .request(method.clone(), url)
            .header(AUTHORIZATION, authorization)
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, JSON_ACCEPT);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|err| {
            tracing::warn!(%method, path = endpoint, error = %err, "Khipu request failed");
            err
        })?;
        self.parse_response(&method, endpoint, response).await
    }

    /// Parse a response from the Khipu API.
    async fn parse_response<T>(
        &self,
        method: &Method,
        endpoint: &str,
        response: reqwest::Response,
    ) -> Result<T, KhipuError>
    where
        T: serde::de::DeserializeOwned,
    {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| {
                KhipuError::InvalidResponse(format!(
                    "Failed to parse response: {}. Body: {}",
                    e, body
                ))
            });
        }

        tracing::warn!(%method, path = endpoint, status = status.as_u16(), "Khipu request failed");

        match ApiError::from_body(&body) {
            Some(api_error) => Err(KhipuError::Api(api_error)),
            None => Err(KhipuError::InvalidResponse(format!("HTTP {}: {}", status, body))),
        }
    }
}

/// Turn a serializable request into form parameters, dropping empty values.
pub(crate) fn form_params<P>(request: &P) -> Result<Params, KhipuError>
where
    P: serde::Serialize + ?Sized,
{
    let encoded = serde_urlencoded::to_string(request)?;
    Ok(form_urlencoded::parse(encoded.as_bytes())
        .into_owned()
        .filter(|(_, v)| !v.is_empty())
        .collect())
}

impl std::fmt::Debug for KhipuClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KhipuClient")
            .field("base_url", &self.base_url)
            .field("receiver_id", &self.receiver_id())
            .finish()
    }
}

/// Builder for [`KhipuClient`].
pub struct KhipuClientBuilder {
    base_url: String,
    credentials: Option<Arc<dyn CredentialsProvider>>,
    user_agent: Option<String>,
    timeout: Option<Duration>,
}

impl KhipuClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            base_url: KHIPU_BASE_URL.to_string(),
            credentials: None,
            user_agent: None,
            timeout: None,
        }
    }

    /// Set the base URL (useful for testing with a mock server).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the credentials provider used to sign requests.
    pub fn credentials(mut self, credentials: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set a custom user agent.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set a timeout applied to each request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Fails with [`KhipuError::MissingCredentials`] when no credentials were
    /// set, with [`KhipuError::Url`] when the base URL does not parse and with
    /// [`KhipuError::Config`] when the user agent is not a valid header value.
    pub fn build(self) -> Result<KhipuClient, KhipuError> {
        let credentials = self.credentials.ok_or(KhipuError::MissingCredentials)?;

        let parsed = Url::parse(&self.base_url)?;
        if parsed.cannot_be_a_base() {
            return Err(KhipuError::Config(format!(
                "base URL cannot be used as a base: {}",
                self.base_url
            )));
        }
        let base_url = parsed.as_str().trim_end_matches('/').to_string();

        // Build default headers.
        let mut headers = HeaderMap::new();
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| format!("khipu-api-client/{}", env!("CARGO_PKG_VERSION")));
        let header_value = HeaderValue::from_str(&user_agent)
            .map_err(|_| KhipuError::Config(format!("invalid user agent: {user_agent:?}")))?;
        headers.insert(USER_AGENT, header_value);

        let mut reqwest_builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = self.timeout {
            reqwest_builder = reqwest_builder.timeout(timeout);
        }
        let reqwest_client = reqwest_builder.build()?;

        let client = ClientBuilder::new(reqwest_client)
            .with(TracingMiddleware::default())
            .build();

        Ok(KhipuClient {
            http_client: client,
            base_url,
            credentials,
        })
    }
}

impl Default for KhipuClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// KhipuApi trait implementation.

impl KhipuApi for KhipuClient {
    async fn get_banks(&self) -> Result<Vec<Bank>, KhipuError> {
        KhipuClient::get_banks(self).await
    }

    async fn get_payment(&self, payment_id: &str) -> Result<PaymentResponse, KhipuError> {
        KhipuClient::get_payment(self, payment_id).await
    }

    async fn get_payment_by_notification_token(
        &self,
        notification_token: &str,
    ) -> Result<PaymentResponse, KhipuError> {
        KhipuClient::get_payment_by_notification_token(self, notification_token).await
    }

    async fn create_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<PaymentCreateResponse, KhipuError> {
        KhipuClient::create_payment(self, request).await
    }

    async fn delete_payment(&self, payment_id: &str) -> Result<SuccessResponse, KhipuError> {
        KhipuClient::delete_payment(self, payment_id).await
    }

    async fn refund_payment(
        &self,
        payment_id: &str,
        request: &RefundRequest,
    ) -> Result<SuccessResponse, KhipuError> {
        KhipuClient::refund_payment(self, payment_id, request).await
    }

    async fn create_receiver(
        &self,
        request: &ReceiverRequest,
    ) -> Result<ReceiverCreateResponse, KhipuError> {
        KhipuClient::create_receiver(self, request).await
    }
}
