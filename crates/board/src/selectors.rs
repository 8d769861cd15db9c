// ABOUTME: Pre-compiled CSS selectors for imageboard page markup.
// ABOUTME: Compiled once on first use and shared by every extraction call.

//! Selectors for the board and thread page markup.
//!
//! Board index pages wrap each thread in `div.thread#t<id>` with the opening
//! post marked `.post.op`. Thread pages list every post as `.post`, replies
//! carrying `.reply` instead of `.op`. Inside a post:
//!
//! - `.postInfo` holds `.name`, `.dateTime` and `.postNum span`
//! - `.fileText a` links the full attachment, `.fileThumb img` its thumbnail
//! - `.postMessage` holds the body, with `.quotelink` anchors for references

use once_cell::sync::Lazy;
use scraper::Selector;

fn compile(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid built-in selector {css:?}: {e:?}"))
}

pub static THREAD: Lazy<Selector> = Lazy::new(|| compile(".thread"));
pub static POST: Lazy<Selector> = Lazy::new(|| compile(".post"));
pub static OP_POST: Lazy<Selector> = Lazy::new(|| compile(".post.op"));

pub static POST_INFO: Lazy<Selector> = Lazy::new(|| compile(".postInfo"));
pub static NAME: Lazy<Selector> = Lazy::new(|| compile(".name"));
pub static DATE_TIME: Lazy<Selector> = Lazy::new(|| compile(".dateTime"));
pub static POST_NUM_SPAN: Lazy<Selector> = Lazy::new(|| compile(".postNum span"));

pub static FILE_TEXT: Lazy<Selector> = Lazy::new(|| compile(".fileText"));
pub static LINK: Lazy<Selector> = Lazy::new(|| compile("a"));
pub static THUMB_IMG: Lazy<Selector> = Lazy::new(|| compile(".fileThumb img"));

pub static POST_MESSAGE: Lazy<Selector> = Lazy::new(|| compile(".postMessage"));
pub static QUOTE_LINK: Lazy<Selector> = Lazy::new(|| compile(".quotelink"));

/// Class marking a thread-starting post.
pub const OP_CLASS: &str = "op";
