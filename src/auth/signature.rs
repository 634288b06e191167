//! HMAC-SHA256 signature generation for Khipu API authentication.
//!
//! Every Khipu request carries an `Authorization` header computed as:
//! ```text
//! receiver_id + ":" + hex(HMAC-SHA256(secret, canonical_string))
//! ```
//!
//! where the canonical string is:
//! ```text
//! encode(method) + "&" + encode(uri) [+ "&" + k1=v1&k2=v2...]
//! ```
//!
//! Parameters are sorted by key (byte order) and parameters with an empty
//! value are left out. The URI is the full request URL without its query.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha256;
use url::form_urlencoded;

use crate::auth::Credentials;
use crate::error::KhipuError;

type HmacSha256 = Hmac<Sha256>;

/// Percent-encode a single component of the canonical string.
///
/// Unreserved characters (`A-Z a-z 0-9 - _ . ~`) are kept, everything else
/// becomes `%XX`. Spaces are encoded as `%20`, never `+`, which is what the
/// Khipu verifier expects.
///
/// ```rust
/// use khipu_api_client::auth::encode_component;
///
/// assert_eq!(encode_component("https://khipu.com/api/2.0"), "https%3A%2F%2Fkhipu.com%2Fapi%2F2.0");
/// assert_eq!(encode_component("a b~c*"), "a%20b~c%2A");
/// ```
pub fn encode_component(input: &str) -> String {
    // form_urlencoded keeps `*` and escapes `~`; RFC 3986 does the opposite.
    form_urlencoded::byte_serialize(input.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

/// Build the canonical string that gets signed.
///
/// Parameter order in `params` does not matter; keys are sorted before
/// encoding. Keys whose value is empty are skipped.
///
/// # Errors
///
/// Returns [`KhipuError::Signing`] when `method` or `uri` is empty.
pub fn canonical_string<I, K, V>(method: &str, uri: &str, params: I) -> Result<String, KhipuError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if method.is_empty() {
        return Err(KhipuError::Signing("HTTP method must not be empty".to_string()));
    }
    if uri.is_empty() {
        return Err(KhipuError::Signing("request URI must not be empty".to_string()));
    }

    let sorted: BTreeMap<String, String> = params
        .into_iter()
        .filter(|(_, v)| !v.as_ref().is_empty())
        .map(|(k, v)| (k.as_ref().to_string(), v.as_ref().to_string()))
        .collect();

    let mut canonical = format!("{}&{}", encode_component(method), encode_component(uri));
    if !sorted.is_empty() {
        let query = sorted
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        canonical.push('&');
        canonical.push_str(&query);
    }

    Ok(canonical)
}

/// Sign a request for the Khipu API.
///
/// # Arguments
///
/// * `credentials` - Receiver id and secret
/// * `method` - HTTP method (e.g., "POST")
/// * `uri` - Full request URL without query string
///   (e.g., "https://khipu.com/api/2.0/payments")
/// * `params` - Form or query parameters sent with the request
///
/// # Returns
///
/// The value for the `Authorization` header: `receiver_id:hex_digest`.
///
/// # Example
///
/// ```rust
/// use khipu_api_client::auth::{Credentials, sign_request};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let credentials = Credentials::new("42", "s3cr3t");
/// let token = sign_request(
///     &credentials,
///     "POST",
///     "/payments",
///     [("amount", "1000"), ("subject", "test")],
/// )?;
/// assert!(token.starts_with("42:"));
/// # Ok(())
/// # }
/// ```
pub fn sign_request<I, K, V>(
    credentials: &Credentials,
    method: &str,
    uri: &str,
    params: I,
) -> Result<String, KhipuError>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let canonical = canonical_string(method, uri, params)?;

    let mut hmac = HmacSha256::new_from_slice(credentials.expose_secret().as_bytes())
        .map_err(|e| KhipuError::Signing(format!("Invalid HMAC key: {e}")))?;
    hmac.update(canonical.as_bytes());
    let digest = hmac.finalize().into_bytes();

    Ok(format!("{}:{}", credentials.receiver_id, hex::encode(digest)))
}
