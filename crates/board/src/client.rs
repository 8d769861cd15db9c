// ABOUTME: The board Client that loads board/thread pages and submits form posts.
// ABOUTME: Wraps fetch + parse + extraction and tags every Post with its board id.

use scraper::Html;
use tracing::{info, warn};

use crate::error::BoardError;
use crate::extract::{extract_post_list, extract_thread_list};
use crate::models::{NewThread, Post};
use crate::options::{ClientBuilder, Options};
use crate::resource::{classify_error, fetch, parse_html};
use crate::url_utils::{board_url, origin, post_endpoint, thread_url};

/// Client for a 4chan-style imageboard.
#[derive(Debug, Clone)]
pub struct Client {
    opts: Options,
    http_client: reqwest::Client,
}

impl Client {
    /// Create a new ClientBuilder for configuring the client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Create a new Client with the given options.
    pub fn new(opts: Options) -> Self {
        let http_client = opts.http_client.clone().unwrap_or_else(|| {
            reqwest::Client::builder()
                .user_agent(&opts.user_agent)
                .timeout(opts.timeout)
                .gzip(true)
                .brotli(true)
                .deflate(true)
                .build()
                .expect("failed to build HTTP client")
        });

        Self { opts, http_client }
    }

    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// URL of a board's index page.
    pub fn board_url(&self, board_id: &str) -> String {
        board_url(&self.opts.base_url, board_id)
    }

    /// URL of a thread page.
    pub fn thread_url(&self, board_id: &str, thread_id: &str) -> String {
        thread_url(&self.opts.base_url, board_id, thread_id)
    }

    /// Fetches and parses a page.
    pub async fn fetch_document(&self, url: &str) -> Result<Html, BoardError> {
        let raw = fetch(&self.http_client, url, &self.opts.headers).await?;
        parse_html(&raw)
    }

    /// Loads the opening post of every thread on a board's index page.
    pub async fn load_board(&self, board_id: &str) -> Result<Vec<Post>, BoardError> {
        let url = self.board_url(board_id);
        info!(board = board_id, "loading board");

        let raw = fetch(&self.http_client, &url, &self.opts.headers).await?;
        let doc = parse_html(&raw)?;
        Ok(tag_board(extract_thread_list(&doc), board_id))
    }

    /// Loads every post of a thread.
    pub async fn load_thread(
        &self,
        board_id: &str,
        thread_id: &str,
    ) -> Result<Vec<Post>, BoardError> {
        let url = self.thread_url(board_id, thread_id);
        info!(board = board_id, thread = thread_id, "loading thread");

        let raw = fetch(&self.http_client, &url, &self.opts.headers).await?;
        let doc = parse_html(&raw)?;
        Ok(tag_board(extract_post_list(&doc), board_id))
    }

    /// Posts a reply to a thread, or to the board when `thread_id` is `None`.
    pub async fn submit_reply(
        &self,
        board_id: &str,
        thread_id: Option<&str>,
        name: &str,
        comment: &str,
    ) -> Result<(), BoardError> {
        let form = [
            ("mode", "regist"),
            ("resto", thread_id.unwrap_or("0")),
            ("name", name),
            ("com", comment),
            ("pwd", ""),
            ("recaptcha_response", ""),
            ("email", ""),
            ("spoiler", "0"),
            ("json", "1"),
        ];
        info!(board = board_id, thread = thread_id.unwrap_or("0"), "submitting reply");
        self.post_form(board_id, &form).await
    }

    /// Starts a new thread on a board.
    pub async fn create_thread(&self, board_id: &str, thread: &NewThread) -> Result<(), BoardError> {
        let form = [
            ("mode", "regist"),
            ("name", thread.name.as_str()),
            ("sub", thread.subject.as_str()),
            ("com", thread.comment.as_str()),
            ("t-response", thread.captcha_response.as_str()),
        ];
        info!(board = board_id, "creating thread");
        self.post_form(board_id, &form).await
    }

    async fn post_form(&self, board_id: &str, form: &[(&str, &str)]) -> Result<(), BoardError> {
        let endpoint = post_endpoint(&self.opts.post_url, board_id);
        let page_origin = origin(&self.opts.base_url)
            .unwrap_or_else(|| self.opts.base_url.trim_end_matches('/').to_string());

        let mut request = self
            .http_client
            .post(&endpoint)
            .header("Referer", self.board_url(board_id))
            .header("Origin", page_origin)
            .form(form);
        for (key, value) in &self.opts.headers {
            request = request.header(key, value);
        }

        let response = request.send().await.map_err(|e| {
            warn!(endpoint = %endpoint, error = %e, "post request failed");
            classify_error(&e)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = %endpoint, status = status.as_u16(), "post rejected");
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(BoardError::Submit(format!("{} {}", status.as_u16(), reason)));
        }
        Ok(())
    }
}

fn tag_board(posts: Vec<Post>, board_id: &str) -> Vec<Post> {
    posts.into_iter().map(|p| p.with_board(board_id)).collect()
}
