// ABOUTME: URL helpers for attachment links and board/thread page addresses.
// ABOUTME: Normalizes protocol-relative and scheme-less URLs to https.

use url::Url;

/// Default host serving board and thread pages.
pub const DEFAULT_BASE_URL: &str = "https://boards.4chan.org";

/// Default host accepting form posts.
pub const DEFAULT_POST_URL: &str = "https://sys.4chan.org";

/// Normalizes an attachment URL to an absolute https URL.
///
/// - `//host/path` becomes `https://host/path`
/// - `host/path` becomes `https://host/path`
/// - anything already carrying a scheme is returned unchanged
pub fn normalize_protocol(url: &str) -> String {
    if let Some(rest) = url.strip_prefix("//") {
        return format!("https://{}", rest);
    }
    if has_scheme(url) {
        return url.to_string();
    }
    format!("https://{}", url)
}

/// Normalizes an optional attribute value, treating blank values as absent.
pub fn normalize_attr(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    Some(normalize_protocol(value))
}

/// True when the URL parses with its own scheme. `host:port/path` is not a scheme.
fn has_scheme(url: &str) -> bool {
    if Url::parse(url).is_err() {
        return false;
    }
    let Some((_, rest)) = url.split_once(':') else {
        return false;
    };
    if rest.starts_with("//") {
        return true;
    }
    let port = rest.split(['/', '?', '#']).next().unwrap_or("");
    port.is_empty() || !port.bytes().all(|b| b.is_ascii_digit())
}

fn trim_base(base_url: &str) -> &str {
    base_url.trim_end_matches('/')
}

/// Index page of a board, e.g. `https://boards.4chan.org/g/`.
pub fn board_url(base_url: &str, board_id: &str) -> String {
    format!("{}/{}/", trim_base(base_url), board_id)
}

/// Page of a single thread, e.g. `https://boards.4chan.org/g/thread/123`.
pub fn thread_url(base_url: &str, board_id: &str, thread_id: &str) -> String {
    format!("{}/{}/thread/{}", trim_base(base_url), board_id, thread_id)
}

/// Form endpoint for replies and new threads on a board.
pub fn post_endpoint(post_url: &str, board_id: &str) -> String {
    format!("{}/{}/post", trim_base(post_url), board_id)
}

/// Extracts the origin (scheme + host + optional port) from a URL.
pub fn origin(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    match parsed.port() {
        Some(port) => Some(format!("{}://{}:{}", parsed.scheme(), host, port)),
        None => Some(format!("{}://{}", parsed.scheme(), host)),
    }
}
