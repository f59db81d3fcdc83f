//! Aliyun RPC HTTP Client
//!
//! Signs requests with the account's access key, sends them as `GET` and
//! decodes either the typed success body or an [`ErrorResponse`].

use std::time::Duration;

use bytes::Bytes;
use chrono::{DateTime, Utc};
use reqwest::Response as HttpResponse;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::credentials::Credentials;
use super::request::RpcRequest;
use super::response::ErrorResponse;
use super::sign::{self, SIGNATURE_METHOD, SIGNATURE_VERSION};
use crate::error::{LiveError, Result, MAX_RESPONSE_SIZE};

pub const DEFAULT_ENDPOINT: &str = "https://live.aliyuncs.com/";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Aliyun RPC client
#[derive(Debug, Clone)]
pub struct Client {
    credentials: Credentials,
    endpoint: Url,
    http: reqwest::Client,
}

impl Client {
    /// Client against the default live endpoint with default timeouts.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_endpoint(credentials, DEFAULT_ENDPOINT)
    }

    pub fn with_endpoint(credentials: Credentials, endpoint: &str) -> Result<Self> {
        Self::with_timeouts(credentials, endpoint, DEFAULT_CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    pub fn with_timeouts(
        credentials: Credentials,
        endpoint: &str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()?;
        Self::with_http_client(credentials, endpoint, http)
    }

    /// Use a caller-provided `reqwest` client (proxies, custom TLS, ...).
    pub fn with_http_client(
        credentials: Credentials,
        endpoint: &str,
        http: reqwest::Client,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| LiveError::InvalidConfig(format!("invalid endpoint {endpoint}: {e}")))?;
        Ok(Self {
            credentials,
            endpoint,
            http,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        self.endpoint.as_str()
    }

    #[must_use]
    pub fn access_key_id(&self) -> &str {
        self.credentials.access_key_id()
    }

    /// Build the fully signed request URL.
    ///
    /// `nonce` and `timestamp` are taken as inputs so the result is
    /// reproducible; [`Client::query`] passes a fresh uuid and the current time.
    pub fn signed_url<R: RpcRequest + ?Sized>(
        &self,
        req: &R,
        nonce: &str,
        timestamp: DateTime<Utc>,
    ) -> Result<Url> {
        let mut params = req.params();
        params.insert(
            "AccessKeyId".to_string(),
            self.credentials.access_key_id().to_string(),
        );
        params.insert("SignatureMethod".to_string(), SIGNATURE_METHOD.to_string());
        params.insert("SignatureVersion".to_string(), SIGNATURE_VERSION.to_string());
        params.insert("SignatureNonce".to_string(), nonce.to_string());
        params.insert("Timestamp".to_string(), sign::iso8601_timestamp(timestamp));

        let canonical = sign::canonicalized_query(&params);
        let signature = sign::sign(
            self.credentials.access_key_secret(),
            &sign::string_to_sign("GET", &canonical),
        )?;

        let mut url = self.endpoint.clone();
        url.set_query(Some(&format!(
            "{canonical}&Signature={}",
            sign::percent_encode(&signature)
        )));
        Ok(url)
    }

    /// Send a signed request and decode the response body into `T`.
    ///
    /// Non-2xx responses are decoded as [`ErrorResponse`] and returned as
    /// [`LiveError::Api`].
    pub async fn query<T, R>(&self, req: &R) -> Result<T>
    where
        T: DeserializeOwned,
        R: RpcRequest + ?Sized,
    {
        let nonce = uuid::Uuid::new_v4().to_string();
        let url = self.signed_url(req, &nonce, Utc::now())?;

        debug!(action = req.action(), nonce = %nonce, "sending live API request");
        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = read_body(response).await?;

        if status.is_success() {
            debug!(action = req.action(), status = status.as_u16(), "live API request succeeded");
            return serde_json::from_slice(&body).map_err(Into::into);
        }

        let mut err: ErrorResponse = serde_json::from_slice(&body).map_err(|e| {
            LiveError::Parse(format!("undecodable error body (HTTP {status}): {e}"))
        })?;
        err.status_code = status.as_u16();
        warn!(
            action = req.action(),
            status = err.status_code,
            code = %err.code,
            request_id = %err.request_id,
            "live API returned an error"
        );
        Err(err.into())
    }
}

/// Sizes are compared as `u64` so a declared length never truncates.
fn check_size(size: u64) -> Result<()> {
    if size > MAX_RESPONSE_SIZE as u64 {
        return Err(LiveError::ResponseTooLarge { size });
    }
    Ok(())
}

/// Read the whole body, refusing anything above [`MAX_RESPONSE_SIZE`].
async fn read_body(response: HttpResponse) -> Result<Bytes> {
    if let Some(cl) = response.content_length() {
        check_size(cl)?;
    }
    let bytes = response.bytes().await?;
    check_size(bytes.len() as u64)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aliyun::Request;
    use chrono::TimeZone;

    fn client() -> Client {
        Client::new(Credentials::new("testid", "testsecret")).unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.endpoint(), DEFAULT_ENDPOINT);
        assert_eq!(client.access_key_id(), "testid");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let result = Client::with_endpoint(Credentials::new("id", "secret"), "not a url");
        assert!(matches!(result, Err(LiveError::InvalidConfig(_))));
    }

    #[test]
    fn test_signed_url_contains_common_params() {
        let client = client();
        let req = Request::new("DescribeLiveStreamsOnlineList", "2016-11-01");
        let ts = Utc.with_ymd_and_hms(2016, 2, 23, 12, 46, 24).unwrap();
        let url = client.signed_url(&req, "nonce-1", ts).unwrap();
        let query = url.query().unwrap();

        assert!(url.as_str().starts_with("https://live.aliyuncs.com/?"));
        assert!(query.starts_with("AccessKeyId=testid&Action=DescribeLiveStreamsOnlineList"));
        assert!(query.contains("SignatureMethod=HMAC-SHA1"));
        assert!(query.contains("SignatureVersion=1.0"));
        assert!(query.contains("SignatureNonce=nonce-1"));
        assert!(query.contains("Timestamp=2016-02-23T12%3A46%3A24Z"));
        assert!(query.contains("&Signature="));
    }

    #[test]
    fn test_signed_url_reproducible() {
        let client = client();
        let req = Request::new("DescribeLiveStreamsBlockList", "2016-11-01");
        let ts = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        let a = client.signed_url(&req, "n", ts).unwrap();
        let b = client.signed_url(&req, "n", ts).unwrap();
        let c = client.signed_url(&req, "m", ts).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_check_size_beyond_u32_range() {
        assert!(check_size(MAX_RESPONSE_SIZE as u64).is_ok());
        let declared = u64::from(u32::MAX) + 2;
        match check_size(declared) {
            Err(LiveError::ResponseTooLarge { size }) => assert_eq!(size, declared),
            other => panic!("expected ResponseTooLarge, got {other:?}"),
        }
    }
}
