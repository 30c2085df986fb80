use std::time::Duration;

use reqwest::Client;
use reqwest::header::{
    ACCEPT, ACCEPT_LANGUAGE, CONNECTION, DNT, HeaderMap, HeaderValue, UPGRADE_INSECURE_REQUESTS,
};
use zaitaku_core::error::AppError;
use zaitaku_core::traits::Fetcher;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP fetcher using reqwest.
///
/// Every request carries a desktop-browser header profile and shares one
/// cookie store, so the job board sees a single ordinary browsing session.
/// Gzip/deflate negotiation is left to reqwest's decompression support.
/// Retries are not handled here; wrap in
/// [`RetryingFetcher`](zaitaku_core::retry::RetryingFetcher).
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: Client,
    timeout_secs: u64,
}

impl ReqwestFetcher {
    pub fn new() -> Result<Self, AppError> {
        Self::with_timeout(Duration::from_secs(10))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, AppError> {
        let timeout_secs = timeout.as_secs();
        let client = Client::builder()
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(browser_headers())
            .cookie_store(true)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::HttpError(e.to_string()))?;

        Ok(Self {
            client,
            timeout_secs,
        })
    }
}

/// Headers sent with every request, besides the User-Agent.
fn browser_headers() -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT,
        HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
    );
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_static("ja,en-US;q=0.7,en;q=0.3"),
    );
    headers.insert(DNT, HeaderValue::from_static("1"));
    headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
    headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));
    headers
}

impl Fetcher for ReqwestFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout(self.timeout_secs)
            } else if e.is_connect() {
                AppError::NetworkError(format!("Connection failed: {e}"))
            } else {
                AppError::HttpError(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::HttpError(format!(
                "HTTP {} for {}",
                status.as_u16(),
                url
            )));
        }

        response
            .text()
            .await
            .map_err(|e| AppError::HttpError(format!("Failed to read response body: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    use super::*;

    /// Serve a single canned HTTP response; the handle yields the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: text/html; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
            String::from_utf8_lossy(&request).to_string()
        });

        (url, handle)
    }

    #[test]
    fn header_profile_mimics_browser() {
        let headers = browser_headers();
        assert_eq!(headers[ACCEPT_LANGUAGE], "ja,en-US;q=0.7,en;q=0.3");
        assert_eq!(headers[DNT], "1");
        assert_eq!(headers[CONNECTION], "keep-alive");
        assert_eq!(headers[UPGRADE_INSECURE_REQUESTS], "1");
        assert!(headers[ACCEPT].to_str().unwrap().starts_with("text/html"));
    }

    #[tokio::test]
    async fn fetch_returns_body_and_sends_profile() {
        let (url, server) = serve_once("200 OK", "<html>求人一覧</html>").await;
        let fetcher = ReqwestFetcher::new().unwrap();

        let body = fetcher.fetch(&url).await.unwrap();
        assert_eq!(body, "<html>求人一覧</html>");

        let request = server.await.unwrap().to_lowercase();
        assert!(request.contains("user-agent: mozilla/5.0"));
        assert!(request.contains("accept-language: ja,en-us;q=0.7,en;q=0.3"));
        assert!(request.contains("dnt: 1"));
    }

    #[tokio::test]
    async fn non_success_status_is_http_error() {
        let (url, server) = serve_once("503 Service Unavailable", "busy").await;
        let fetcher = ReqwestFetcher::new().unwrap();

        let err = fetcher.fetch(&url).await.unwrap_err();
        assert!(matches!(err, AppError::HttpError(ref msg) if msg.contains("503")));
        assert!(err.is_retryable());
        server.await.unwrap();
    }

    #[tokio::test]
    async fn refused_connection_is_network_error() {
        // Bind then drop to get a port nothing is listening on.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let fetcher = ReqwestFetcher::new().unwrap();
        let err = fetcher.fetch(&format!("http://{addr}/")).await.unwrap_err();
        assert!(err.is_retryable());
    }
}
