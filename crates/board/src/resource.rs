// ABOUTME: Page fetching and HTML parsing for the board client.
// ABOUTME: Maps transport failures onto Timeout, NoConnection and Io errors.

use std::collections::HashMap;

use scraper::Html;
use tracing::{debug, warn};

use crate::error::BoardError;

/// Maximum accepted page size (10 MB).
pub const MAX_CONTENT_LENGTH: usize = 10 * 1024 * 1024;

/// Classifies a transport error.
///
/// Timeouts are checked first since a connect timeout is also a connect error.
pub fn classify_error(err: &reqwest::Error) -> BoardError {
    if err.is_timeout() {
        BoardError::Timeout
    } else if err.is_connect() {
        BoardError::NoConnection
    } else {
        BoardError::io(err)
    }
}

/// Fetches a page and returns its body as text.
pub async fn fetch(
    client: &reqwest::Client,
    url: &str,
    headers: &HashMap<String, String>,
) -> Result<String, BoardError> {
    if url.is_empty() {
        return Err(BoardError::InvalidUrl("empty URL".to_string()));
    }

    let parsed = url::Url::parse(url).map_err(|e| BoardError::InvalidUrl(format!("{url}: {e}")))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(BoardError::InvalidUrl(format!(
            "{url}: scheme must be http or https"
        )));
    }

    let mut request = client.get(parsed);
    for (key, value) in headers {
        request = request.header(key, value);
    }

    debug!(url, "fetching page");
    let response = request.send().await.map_err(|e| {
        warn!(url, error = %e, "page request failed");
        classify_error(&e)
    })?;

    let status = response.status();
    if !status.is_success() {
        warn!(url, status = status.as_u16(), "unexpected HTTP status");
        return Err(BoardError::Io(format!("HTTP status {}", status.as_u16())));
    }

    if let Some(len) = response.content_length() {
        if len > MAX_CONTENT_LENGTH as u64 {
            return Err(BoardError::io("content too large"));
        }
    }

    let body = response.text().await.map_err(|e| classify_error(&e))?;
    if body.len() > MAX_CONTENT_LENGTH {
        return Err(BoardError::io("content too large"));
    }

    Ok(body)
}

/// Parses raw HTML into a document.
///
/// The HTML parser recovers from any malformed markup, so the only rejected
/// input is a blank one.
pub fn parse_html(raw: &str) -> Result<Html, BoardError> {
    if raw.trim().is_empty() {
        return Err(BoardError::parse("empty document"));
    }
    Ok(Html::parse_document(raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::time::Duration;

    fn create_test_client() -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent("test-agent")
            .timeout(Duration::from_millis(300))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_fetch_ok() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/g/").header("x-extra", "yes");
                then.status(200)
                    .header("content-type", "text/html; charset=utf-8")
                    .body("<html><body>ok</body></html>");
            })
            .await;

        let mut headers = HashMap::new();
        headers.insert("x-extra".to_string(), "yes".to_string());
        let body = fetch(&create_test_client(), &server.url("/g/"), &headers)
            .await
            .unwrap();

        mock.assert_async().await;
        assert!(body.contains("ok"));
    }

    #[tokio::test]
    async fn test_fetch_non_200_is_io() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/missing");
                then.status(404);
            })
            .await;

        let err = fetch(&create_test_client(), &server.url("/missing"), &HashMap::new())
            .await
            .unwrap_err();
        assert_eq!(err, BoardError::Io("HTTP status 404".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_oversized_body_is_rejected() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/huge");
                then.status(200).body("a".repeat(MAX_CONTENT_LENGTH + 1));
            })
            .await;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .unwrap();
        let err = fetch(&client, &server.url("/huge"), &HashMap::new())
            .await
            .unwrap_err();
        assert_eq!(err, BoardError::Io("content too large".to_string()));
    }

    #[tokio::test]
    async fn test_fetch_slow_server_times_out() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/slow");
                then.status(200).delay(Duration::from_secs(3)).body("late");
            })
            .await;

        let err = fetch(&create_test_client(), &server.url("/slow"), &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.is_timeout(), "expected timeout, got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_refused_is_no_connection() {
        let err = fetch(&create_test_client(), "http://127.0.0.1:1/", &HashMap::new())
            .await
            .unwrap_err();
        assert!(err.is_no_connection(), "expected no connection, got {err:?}");
    }

    #[tokio::test]
    async fn test_fetch_rejects_bad_urls() {
        let client = create_test_client();
        let headers = HashMap::new();
        assert!(matches!(
            fetch(&client, "", &headers).await,
            Err(BoardError::InvalidUrl(_))
        ));
        assert!(matches!(
            fetch(&client, "not a url", &headers).await,
            Err(BoardError::InvalidUrl(_))
        ));
        assert!(matches!(
            fetch(&client, "ftp://example.com/", &headers).await,
            Err(BoardError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_html_blank_is_error() {
        assert_eq!(
            parse_html("  \n ").unwrap_err(),
            BoardError::Parse("empty document".to_string())
        );
        assert!(parse_html("<p>x</p>").is_ok());
    }
}
