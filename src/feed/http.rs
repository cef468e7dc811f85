use crate::errors::{AppError, Result};
use crate::feed::{PriceFeed, decode_quotes};
use crate::models::TokenQuote;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

/// Fetches the price list with a single `GET` per call. No retry.
#[derive(Debug, Clone)]
pub struct HttpPriceFeed {
    http_client: HttpClient,
    url: Url,
}

impl HttpPriceFeed {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self { http_client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl PriceFeed for HttpPriceFeed {
    async fn fetch(&self) -> Result<Vec<TokenQuote>> {
        debug!(url = %self.url, "[FEED] requesting prices");
        let response = self
            .http_client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "[FEED] request failed");
                AppError::FeedUnavailable(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "[FEED] unexpected status");
            return Err(AppError::FeedUnavailable(format!("HTTP {status}")));
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::FeedUnavailable(e.to_string()))?;
        let quotes = decode_quotes(&body)?;
        debug!(count = quotes.len(), "[FEED] prices received");
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serve one canned HTTP response on a local port and return its URL.
    async fn serve_once(status_line: &'static str, body: &'static str) -> Url {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let response = format!(
                "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
        });
        Url::parse(&format!("http://{addr}/prices.json")).unwrap()
    }

    fn feed_for(url: Url) -> HttpPriceFeed {
        HttpPriceFeed::new(url, Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn server_error_status_is_feed_unavailable() {
        let url = serve_once("500 Internal Server Error", "").await;
        let err = feed_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(msg) if msg.contains("500")));
    }

    #[tokio::test]
    async fn malformed_body_is_feed_unavailable() {
        let url = serve_once("200 OK", r#"{"not":"a list"}"#).await;
        let err = feed_for(url).fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(msg) if msg.contains("malformed")));
    }

    #[tokio::test]
    async fn ok_response_decodes_quotes() {
        let body = r#"[{"currency":"ETH","date":"2023-08-29T07:10:52.000Z","price":1645.93}]"#;
        let url = serve_once("200 OK", body).await;
        let quotes = feed_for(url).fetch().await.unwrap();
        assert_eq!(quotes.len(), 1);
        assert_eq!(quotes[0].symbol, "ETH");
        assert_eq!(quotes[0].unit_price_usd, 1645.93);
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_feed_unavailable() {
        // Port 9 (discard) on localhost is not expected to serve HTTP.
        let url = Url::parse("http://127.0.0.1:9/prices.json").unwrap();
        let feed = HttpPriceFeed::new(url, Duration::from_millis(500)).unwrap();
        let err = feed.fetch().await.unwrap_err();
        assert!(matches!(err, AppError::FeedUnavailable(_)));
    }
}
