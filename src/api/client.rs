//! HTTP transport for the hospital management REST API.
//!
//! `ApiClient` owns the `reqwest` client plus the interceptor pair: a
//! credential provider consulted before each request is sent, and an
//! unauthorized handler invoked when any response comes back 401. The
//! handler runs before the error is returned, so a caller's own error
//! handling never races the session teardown.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Reads the current bearer credential, if any, at request-send time.
pub type CredentialProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Reacts to a 401 from any request. Runs before the error propagates.
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

/// API client for the hospital backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    credentials: Option<CredentialProvider>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

impl ApiClient {
    /// Create a new API client against the given base URL.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials: None,
            on_unauthorized: None,
        })
    }

    /// Install the credential provider consulted on every outgoing request.
    pub fn with_credential_provider(mut self, provider: CredentialProvider) -> Self {
        self.credentials = Some(provider);
        self
    }

    /// Install the handler invoked whenever any response is a 401.
    pub fn with_unauthorized_handler(mut self, handler: UnauthorizedHandler) -> Self {
        self.on_unauthorized = Some(handler);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Build the authorization headers for the current credential.
    /// No credential means no Authorization header at all.
    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        let token = self.credentials.as_ref().and_then(|provider| provider());
        if let Some(token) = token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Request interceptor: every request goes through here so the current
    /// credential is attached at send time, not captured earlier.
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self
            .http
            .request(method, self.url(path))
            .headers(self.auth_headers()?))
    }

    /// Response interceptor: map a non-success status to an `ApiError`,
    /// firing the unauthorized handler on 401 before the error is returned.
    fn map_error(&self, status: reqwest::StatusCode, body: &str) -> ApiError {
        let err = ApiError::from_status(status, body);
        if matches!(err, ApiError::Unauthorized) {
            warn!("received 401, dropping session");
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
        }
        err
    }

    async fn check_response(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(self.map_error(status, &body).into())
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder, url: &str) -> Result<T> {
        let response = builder
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", url))?;
        let response = self.check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Typed verbs used by the resource modules =====

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        debug!(path, "GET");
        self.send_json(self.request(Method::GET, path)?, path).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        debug!(path, "GET");
        self.send_json(self.request(Method::GET, path)?.query(query), path)
            .await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "POST");
        self.send_json(self.request(Method::POST, path)?.json(body), path)
            .await
    }

    /// POST with a form-encoded body (the login endpoint requires this).
    pub(crate) async fn post_form<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &B,
    ) -> Result<T> {
        debug!(path, "POST (form)");
        self.send_json(self.request(Method::POST, path)?.form(form), path)
            .await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        debug!(path, "PUT");
        self.send_json(self.request(Method::PUT, path)?.json(body), path)
            .await
    }

    /// PATCH carrying only query parameters, no body.
    pub(crate) async fn patch_with_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<T> {
        debug!(path, "PATCH");
        self.send_json(self.request(Method::PATCH, path)?.query(query), path)
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Result<()> {
        debug!(path, "DELETE");
        let response = self
            .request(Method::DELETE, path)?
            .send()
            .await
            .with_context(|| format!("Failed to send DELETE request to {}", path))?;
        self.check_response(response).await?;
        Ok(())
    }

    /// GET returning the raw body, for PDF and report downloads.
    pub(crate) async fn get_bytes<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> Result<Vec<u8>> {
        debug!(path, "GET (bytes)");
        let response = self
            .request(Method::GET, path)?
            .query(query)
            .send()
            .await
            .with_context(|| format!("Failed to send request to {}", path))?;
        let response = self.check_response(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    /// Fire-and-forget POST: failures are logged, never surfaced. Still
    /// goes through the response interceptor, so a 401 here drops the
    /// session like anywhere else.
    pub(crate) async fn post_best_effort(&self, path: &str) {
        let Ok(builder) = self.request(Method::POST, path) else {
            return;
        };
        match builder.send().await {
            Ok(response) => {
                if let Err(e) = self.check_response(response).await {
                    debug!(path, error = %e, "best-effort POST rejected");
                }
            }
            Err(e) => debug!(path, error = %e, "best-effort POST failed"),
        }
    }
}

/// Parse a list payload that may arrive bare or wrapped in a `data` envelope.
pub(crate) fn parse_maybe_wrapped<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    if let Ok(items) = serde_json::from_str::<Vec<T>>(text) {
        return Ok(items);
    }

    // `default = "Vec::new"` keeps the derive from demanding `T: Default`
    #[derive(Deserialize)]
    struct Wrapper<T> {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    }

    let wrapper: Wrapper<T> =
        serde_json::from_str(text).context("Failed to parse list response")?;
    Ok(wrapper.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn client() -> ApiClient {
        ApiClient::new("http://localhost:8000/").unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        assert_eq!(client().base_url(), "http://localhost:8000");
        assert_eq!(client().url("/patients/"), "http://localhost:8000/patients/");
    }

    #[test]
    fn test_no_credential_means_no_header() {
        let headers = client().auth_headers().unwrap();
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_credential_attached_as_bearer() {
        let client = client().with_credential_provider(Arc::new(|| Some("tok-123".to_string())));
        let headers = client.auth_headers().unwrap();
        assert_eq!(
            headers.get(header::AUTHORIZATION).unwrap(),
            "Bearer tok-123"
        );
    }

    #[test]
    fn test_credential_read_at_send_time() {
        // The provider is consulted per request, so a token swap is
        // picked up without rebuilding the client.
        let token = Arc::new(std::sync::Mutex::new(Some("first".to_string())));
        let provider_token = token.clone();
        let client = client()
            .with_credential_provider(Arc::new(move || provider_token.lock().unwrap().clone()));

        let headers = client.auth_headers().unwrap();
        assert_eq!(headers.get(header::AUTHORIZATION).unwrap(), "Bearer first");

        *token.lock().unwrap() = None;
        let headers = client.auth_headers().unwrap();
        assert!(headers.get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_unauthorized_handler_fires_on_401_only() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let client = client().with_unauthorized_handler(Arc::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        let err = client.map_error(reqwest::StatusCode::UNAUTHORIZED, "");
        assert!(matches!(err, ApiError::Unauthorized));
        assert_eq!(calls.load(Ordering::SeqCst), 1);

        // Other failures propagate without touching the session
        let err = client.map_error(reqwest::StatusCode::NOT_FOUND, "missing");
        assert!(matches!(err, ApiError::NotFound(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_parse_bare_list() {
        let items: Vec<i64> = parse_maybe_wrapped("[1, 2, 3]").unwrap();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_parse_enveloped_list() {
        let items: Vec<i64> = parse_maybe_wrapped(r#"{"data": [4, 5]}"#).unwrap();
        assert_eq!(items, vec![4, 5]);
    }

    #[test]
    fn test_parse_enveloped_list_of_records() {
        // Payload type deliberately has no Default impl
        #[derive(Debug, PartialEq, Deserialize)]
        struct Row {
            id: i64,
        }
        let items: Vec<Row> = parse_maybe_wrapped(r#"{"data": [{"id": 1}, {"id": 2}]}"#).unwrap();
        assert_eq!(items, vec![Row { id: 1 }, Row { id: 2 }]);
    }

    #[test]
    fn test_parse_garbage_list_fails() {
        assert!(parse_maybe_wrapped::<i64>("not json").is_err());
    }
}
