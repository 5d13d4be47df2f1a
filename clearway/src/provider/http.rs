//! HTTP client abstraction for testability.
//!
//! Unlike a plain "bytes or error" client, responses carry their status
//! code and content type: the tile orchestrator needs to distinguish an
//! authorization rejection (refresh and retry once) from other upstream
//! failures, and the proxy forwards upstream content types verbatim.

use super::types::ProviderError;
use bytes::Bytes;
use std::future::Future;
use std::time::Duration;
use tracing::{trace, warn};

/// An upstream HTTP response with its status preserved.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-success response into a [`ProviderError::Status`].
    pub fn error_for_status(self) -> Result<Self, ProviderError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ProviderError::Status {
                status: self.status,
            })
        }
    }
}

/// Trait for asynchronous HTTP operations against the upstream provider.
///
/// Allows dependency injection of mock transports in tests.
pub trait AsyncHttpClient: Send + Sync {
    /// Perform an HTTP GET request.
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse, ProviderError>> + Send;

    /// Perform an HTTP POST request with a JSON body.
    fn post_json(
        &self,
        url: &str,
        json_body: &str,
    ) -> impl Future<Output = Result<HttpResponse, ProviderError>> + Send;
}

/// Real HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Create a client with the given per-request timeout.
    ///
    /// Connection pooling and TCP keepalive are tuned for bursts of
    /// parallel tile fetches.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying client cannot be built.
    pub fn with_timeout(timeout: Duration) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(32)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(30))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| ProviderError::Http(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    async fn read_response(
        url: &str,
        response: reqwest::Response,
    ) -> Result<HttpResponse, ProviderError> {
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        let body = response.bytes().await.map_err(|e| {
            warn!(url, error = %e, "failed to read upstream response body");
            ProviderError::Http(format!("failed to read response: {e}"))
        })?;

        trace!(url, status, bytes = body.len(), "upstream response read");
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }

    fn map_send_error(url: &str, error: reqwest::Error) -> ProviderError {
        if error.is_timeout() {
            warn!(url, "upstream request timed out");
            ProviderError::Timeout
        } else {
            warn!(
                url,
                error = %error,
                is_connect = error.is_connect(),
                "upstream request failed"
            );
            ProviderError::Http(format!("request failed: {error}"))
        }
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
        trace!(url, "HTTP GET starting");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Self::map_send_error(url, e))?;
        Self::read_response(url, response).await
    }

    async fn post_json(&self, url: &str, json_body: &str) -> Result<HttpResponse, ProviderError> {
        trace!(url, "HTTP POST starting");
        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(json_body.to_string())
            .send()
            .await
            .map_err(|e| Self::map_send_error(url, e))?;
        Self::read_response(url, response).await
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Mock HTTP client replaying a scripted sequence of responses.
    ///
    /// A script with a single entry replays it forever; longer scripts
    /// are consumed in order. Request URLs are recorded for assertions.
    pub struct MockHttpClient {
        script: Mutex<VecDeque<Result<HttpResponse, ProviderError>>>,
        pub requests: Mutex<Vec<String>>,
        pub calls: AtomicUsize,
    }

    impl MockHttpClient {
        pub fn replaying(response: Result<HttpResponse, ProviderError>) -> Self {
            Self::scripted(vec![response])
        }

        pub fn scripted(responses: Vec<Result<HttpResponse, ProviderError>>) -> Self {
            Self {
                script: Mutex::new(responses.into()),
                requests: Mutex::new(Vec::new()),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn ok_json(body: &str) -> Self {
            Self::replaying(Ok(HttpResponse {
                status: 200,
                content_type: Some("application/json".to_string()),
                body: Bytes::copy_from_slice(body.as_bytes()),
            }))
        }

        fn next(&self, url: &str) -> Result<HttpResponse, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(url.to_string());

            let mut script = self.script.lock().unwrap();
            if script.len() == 1 {
                script.front().cloned().unwrap()
            } else {
                script
                    .pop_front()
                    .unwrap_or(Err(ProviderError::Http("mock script exhausted".to_string())))
            }
        }
    }

    impl AsyncHttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<HttpResponse, ProviderError> {
            self.next(url)
        }

        async fn post_json(&self, url: &str, _json_body: &str) -> Result<HttpResponse, ProviderError> {
            self.next(url)
        }
    }

    #[test]
    fn test_is_success() {
        let ok = HttpResponse {
            status: 200,
            content_type: None,
            body: Bytes::new(),
        };
        let not_found = HttpResponse {
            status: 404,
            content_type: None,
            body: Bytes::new(),
        };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
    }

    #[test]
    fn test_error_for_status() {
        let bad = HttpResponse {
            status: 502,
            content_type: None,
            body: Bytes::new(),
        };
        assert_eq!(
            bad.error_for_status().unwrap_err(),
            ProviderError::Status { status: 502 }
        );
    }

    #[tokio::test]
    async fn test_mock_replays_single_response() {
        let mock = MockHttpClient::ok_json("{}");
        assert!(mock.get("http://one").await.is_ok());
        assert!(mock.get("http://two").await.is_ok());
        assert_eq!(mock.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_mock_consumes_script_in_order() {
        let mock = MockHttpClient::scripted(vec![
            Err(ProviderError::Timeout),
            Ok(HttpResponse {
                status: 200,
                content_type: None,
                body: Bytes::from_static(b"ok"),
            }),
        ]);
        assert_eq!(mock.get("http://a").await.unwrap_err(), ProviderError::Timeout);
        assert_eq!(mock.get("http://b").await.unwrap().body, Bytes::from_static(b"ok"));
    }
}
