// ABOUTME: Text utilities for post bodies, quote links and post/thread ids.
// ABOUTME: Message cleaning strips every tag with ammonia and decodes a fixed entity set.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Line break tags in any of the spellings serializers produce.
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<br\s*/?\s*>").unwrap());

/// Word-break opportunity tags.
static WBR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)<wbr\s*/?\s*>").unwrap());

/// In-text reference to another post.
static QUOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r">>(\d+)").unwrap());

/// Entities left behind by the stripper, decoded in this order.
const DECODED_ENTITIES: &[(&str, &str)] = &[("&gt;", ">"), ("&quot;", "\""), ("&amp;", "&")];

/// Number of characters of a post body used as a bookmark title.
pub const BOOKMARK_TITLE_CHARS: usize = 50;

/// Removes every tag, keeping text. Script and style bodies are dropped.
fn strip_all_tags(html: &str) -> String {
    ammonia::Builder::new()
        .tags(HashSet::new())
        .clean(html)
        .to_string()
}

/// Converts the inner markup of a post message into plain text.
///
/// `<br>` becomes a newline and `<wbr>` disappears before stripping, so line
/// structure survives. Only `&gt;`, `&quot;` and `&amp;` are decoded; other
/// entities the stripper emits (`&lt;`, `&nbsp;`) are left as they are.
pub fn clean_message(inner_html: &str) -> String {
    let with_breaks = BR_RE.replace_all(inner_html, "\n");
    let without_wbr = WBR_RE.replace_all(&with_breaks, "");

    let mut text = strip_all_tags(&without_wbr);
    for (entity, replacement) in DECODED_ENTITIES {
        text = text.replace(entity, replacement);
    }

    text.trim().to_string()
}

/// Resolves a quote link's text to the post number it points at.
///
/// `>>123` yields `123`. Anything that is not a bare post number after the
/// rewrite (no digits, cross-board links, `>>>123`) yields `None`.
pub fn quote_target(text: &str) -> Option<String> {
    let replaced = QUOTE_RE.replace_all(text.trim(), "$1");
    let target = replaced.trim();
    if target.is_empty() || !target.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(target.to_string())
}

/// Turns a post number label like `No.12345` into `12345`.
pub fn post_id_from_label(label: &str) -> String {
    let trimmed = label.trim();
    trimmed.strip_prefix("No.").unwrap_or(trimmed).to_string()
}

/// Turns a thread container id like `t12345` into `12345`.
pub fn thread_id_from_container(id_attr: &str) -> String {
    let trimmed = id_attr.trim();
    trimmed.strip_prefix('t').unwrap_or(trimmed).to_string()
}

/// First characters of a post body, used to title a bookmark.
pub fn bookmark_title(content: &str) -> String {
    content.chars().take(BOOKMARK_TITLE_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_message_breaks_become_newlines() {
        assert_eq!(clean_message("first<br>second<br/>third"), "first\nsecond\nthird");
    }

    #[test]
    fn test_clean_message_removes_wbr() {
        assert_eq!(
            clean_message("https://example.com/very<wbr>long<wbr>path"),
            "https://example.com/verylongpath"
        );
    }

    #[test]
    fn test_clean_message_strips_all_tags() {
        let html = r#"<span class="quote">&gt;implying</span><br><b>bold</b> <a href="/x">link</a>"#;
        assert_eq!(clean_message(html), ">implying\nbold link");
    }

    #[test]
    fn test_clean_message_decodes_fixed_entities() {
        assert_eq!(clean_message("&gt;&quot;&amp;"), ">\"&");
        assert_eq!(clean_message("Tom &amp; Jerry"), "Tom & Jerry");
    }

    #[test]
    fn test_clean_message_leaves_lt_escaped() {
        assert_eq!(clean_message("a &lt; b"), "a &lt; b");
    }

    #[test]
    fn test_clean_message_drops_script_bodies() {
        assert_eq!(clean_message("hi<script>alert(1)</script>"), "hi");
    }

    #[test]
    fn test_clean_message_trims() {
        assert_eq!(clean_message("  <br>body<br>  "), "body");
        assert_eq!(clean_message(""), "");
    }

    #[test]
    fn test_quote_target() {
        assert_eq!(quote_target(">>123456"), Some("123456".to_string()));
        assert_eq!(quote_target("  >>42 "), Some("42".to_string()));
        assert_eq!(quote_target(">>"), None);
        assert_eq!(quote_target(">>abc"), None);
        assert_eq!(quote_target(">>>/g/"), None);
        assert_eq!(quote_target(">>>123"), None);
        assert_eq!(quote_target(">>12 >>34"), None);
        assert_eq!(quote_target("   "), None);
    }

    #[test]
    fn test_post_id_from_label() {
        assert_eq!(post_id_from_label(" No.9001 "), "9001");
        assert_eq!(post_id_from_label("9001"), "9001");
        assert_eq!(post_id_from_label(""), "");
    }

    #[test]
    fn test_thread_id_from_container() {
        assert_eq!(thread_id_from_container("t570368"), "570368");
        assert_eq!(thread_id_from_container("570368"), "570368");
    }

    #[test]
    fn test_bookmark_title_counts_chars() {
        let long = "é".repeat(80);
        assert_eq!(bookmark_title(&long).chars().count(), 50);
        assert_eq!(bookmark_title("short"), "short");
    }
}
