//! Credential management for Khipu API authentication.

use secrecy::{ExposeSecret, SecretString};

use crate::error::KhipuError;

/// Default environment variable holding the receiver id.
pub const RECEIVER_ID_VAR: &str = "KHIPU_RECEIVER_ID";
/// Default environment variable holding the receiver secret.
pub const SECRET_VAR: &str = "KHIPU_SECRET";

/// API credentials: the receiver id and its shared secret.
#[derive(Clone)]
pub struct Credentials {
    /// The receiver id (public identifier, prefixed to every signature)
    pub receiver_id: String,
    /// The receiver secret (private, used as the HMAC key)
    secret: SecretString,
}

impl Credentials {
    /// Create new credentials from a receiver id and secret.
    pub fn new(receiver_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            receiver_id: receiver_id.into(),
            secret: SecretString::from(secret.into()),
        }
    }

    /// Get the secret for signing.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.secret.expose_secret()
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("receiver_id", &self.receiver_id)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Trait for providing API credentials.
///
/// Implement this trait to customize how credentials are retrieved,
/// for example from a secrets manager.
pub trait CredentialsProvider: Send + Sync {
    /// Get the credentials.
    fn get_credentials(&self) -> &Credentials;
}

/// Static credentials provider that holds credentials directly.
#[derive(Clone, Debug)]
pub struct StaticCredentials {
    credentials: Credentials,
}

impl StaticCredentials {
    /// Create a new static credentials provider.
    pub fn new(receiver_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            credentials: Credentials::new(receiver_id, secret),
        }
    }
}

impl CredentialsProvider for StaticCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}

/// Credentials provider that reads from environment variables.
///
/// By default, reads from `KHIPU_RECEIVER_ID` and `KHIPU_SECRET`.
#[derive(Debug)]
pub struct EnvCredentials {
    credentials: Credentials,
}

impl EnvCredentials {
    /// Create credentials from the default environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`KhipuError::Config`] if a variable is not set.
    pub fn from_env() -> Result<Self, KhipuError> {
        Self::from_env_vars(RECEIVER_ID_VAR, SECRET_VAR)
    }

    /// Create credentials from custom environment variable names.
    pub fn from_env_vars(id_var: &str, secret_var: &str) -> Result<Self, KhipuError> {
        let receiver_id = std::env::var(id_var)
            .map_err(|_| KhipuError::Config(format!("Environment variable {id_var} not set")))?;
        let secret = std::env::var(secret_var).map_err(|_| {
            KhipuError::Config(format!("Environment variable {secret_var} not set"))
        })?;

        Ok(Self {
            credentials: Credentials::new(receiver_id, secret),
        })
    }

    /// Try to create credentials from the default environment variables.
    ///
    /// Returns `None` if the environment variables are not set.
    pub fn try_from_env() -> Option<Self> {
        Self::from_env().ok()
    }
}

impl CredentialsProvider for EnvCredentials {
    fn get_credentials(&self) -> &Credentials {
        &self.credentials
    }
}
