// ABOUTME: Post extraction from parsed board index and thread pages.
// ABOUTME: Turns .thread/.post subtrees into Post records, defaulting any missing field.

//! Post extraction.
//!
//! Extraction is a pure, single pass over a parsed document. A missing
//! sub-node never fails the call: the affected field falls back to its
//! default (`"Anonymous"` author, empty id/timestamp/content, no image).
//!
//! Two entry points exist because the two page kinds identify posts
//! differently:
//! - [`extract_thread_list`] reads a board index and ids each opening post
//!   by its thread container (`t123` -> `123`).
//! - [`extract_post_list`] reads a thread page and ids every post by its
//!   own post number.

use scraper::{ElementRef, Html};
use tracing::{debug, trace};

use crate::models::{Post, DEFAULT_AUTHOR};
use crate::selectors;
use crate::text::{clean_message, post_id_from_label, quote_target, thread_id_from_container};
use crate::url_utils::normalize_attr;

/// Extracts the opening post of every thread on a board index page.
///
/// Containers without a `.post.op` node are skipped.
pub fn extract_thread_list(doc: &Html) -> Vec<Post> {
    let mut posts = Vec::new();
    let mut skipped = 0usize;

    for thread in doc.select(&selectors::THREAD) {
        let thread_id = thread
            .value()
            .attr("id")
            .map(thread_id_from_container)
            .unwrap_or_default();

        match thread.select(&selectors::OP_POST).next() {
            Some(op) => posts.push(extract_one(op, true, Some(&thread_id))),
            None => {
                trace!(thread_id = %thread_id, "thread container without op post");
                skipped += 1;
            }
        }
    }

    debug!(threads = posts.len(), skipped, "extracted thread list");
    posts
}

/// Extracts every post (opening post and replies) on a thread page.
pub fn extract_post_list(doc: &Html) -> Vec<Post> {
    let posts: Vec<Post> = doc
        .select(&selectors::POST)
        .map(|el| extract_one(el, is_op(&el), None))
        .collect();

    debug!(posts = posts.len(), "extracted post list");
    posts
}

/// Extracts a single post node.
///
/// A non-empty `override_id` replaces the post number as the record id.
pub fn extract_one(post: ElementRef<'_>, is_thread: bool, override_id: Option<&str>) -> Post {
    let post_info = post.select(&selectors::POST_INFO).next();
    let file_text = post.select(&selectors::FILE_TEXT).next();
    let post_message = post.select(&selectors::POST_MESSAGE).next();

    let image_url = file_text
        .and_then(|ft| ft.select(&selectors::LINK).next())
        .and_then(|a| normalize_attr(a.value().attr("href")));

    let thumbnail_url = post
        .select(&selectors::THUMB_IMG)
        .next()
        .and_then(|img| normalize_attr(img.value().attr("src")));

    let id = match override_id {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => post_info
            .and_then(|info| info.select(&selectors::POST_NUM_SPAN).last())
            .map(|span| post_id_from_label(&element_text(span)))
            .unwrap_or_default(),
    };

    let content = post_message
        .map(|msg| clean_message(&msg.inner_html()))
        .unwrap_or_default();

    let replies = post
        .select(&selectors::QUOTE_LINK)
        .filter_map(|link| quote_target(&element_text(link)))
        .collect();

    let author = post_info
        .and_then(|info| first_text(info, &selectors::NAME))
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| DEFAULT_AUTHOR.to_string());

    let timestamp = post_info
        .and_then(|info| first_text(info, &selectors::DATE_TIME))
        .unwrap_or_default();

    Post {
        id,
        author,
        timestamp,
        content,
        image_url,
        thumbnail_url,
        replies,
        is_thread,
        board_id: String::new(),
    }
}

fn is_op(el: &ElementRef<'_>) -> bool {
    el.value().classes().any(|c| c == selectors::OP_CLASS)
}

fn element_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn first_text(scope: ElementRef<'_>, selector: &scraper::Selector) -> Option<String> {
    scope.select(selector).next().map(element_text)
}
