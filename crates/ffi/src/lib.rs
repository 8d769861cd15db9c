// ABOUTME: C FFI bindings for the uChan board core.
// ABOUTME: Exposes arena-allocated post lists extracted from board and thread pages to Swift/Kotlin.

use std::cell::RefCell;
use std::panic;
use std::ptr;

use bumpalo::Bump;
use uchan_board::{posts_from_html, threads_from_html, BoardError, Post};

/// FFI version constant for ABI compatibility checking.
pub const UCHAN_FFI_VERSION: u32 = 1;

/// Returns the FFI ABI version number.
/// Consumers should check this matches their expected version.
#[no_mangle]
pub extern "C" fn uchan_ffi_version() -> u32 {
    UCHAN_FFI_VERSION
}

// ----------------------------------------------------------------------------
// Error handling
// ----------------------------------------------------------------------------

/// Error codes matching the C ABI DErrorCode enum.
#[repr(u32)]
pub enum DErrorCode {
    Ok = 0,
    Parse = 1,
    Fetch = 2,
    Timeout = 3,
    Invalid = 4,
    NoConnection = 5,
    Internal = 255,
}

/// UTF-8 string slice for FFI. Not null-terminated.
/// Consumer must not mutate or free; memory owned by arena.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct DString {
    pub data: *const u8,
    pub len: usize,
}

impl DString {
    /// Creates an empty DString with null pointer and zero length.
    pub const fn empty() -> Self {
        DString {
            data: ptr::null(),
            len: 0,
        }
    }
}

impl Default for DString {
    fn default() -> Self {
        Self::empty()
    }
}

/// FFI error struct matching C ABI DError.
///
/// `message` points into a per-thread buffer and stays valid until the next
/// failing call on the same thread.
#[repr(C)]
pub struct DError {
    pub code: u32,
    pub message: DString,
}

impl DError {
    /// Creates a success (D_OK) error with empty message.
    pub const fn ok() -> Self {
        DError {
            code: DErrorCode::Ok as u32,
            message: DString::empty(),
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

// ----------------------------------------------------------------------------
// DPost / DPostList - match C ABI structs
// ----------------------------------------------------------------------------

#[derive(Copy, Clone)]
#[repr(C)]
pub struct DPost {
    pub id: DString,
    pub author: DString,
    pub timestamp: DString,
    pub content: DString,
    pub image_url: DString,
    pub thumbnail_url: DString,
    pub replies: *const DString,
    pub replies_len: usize,
    pub is_thread: bool,
    pub board_id: DString,
}

#[repr(C)]
pub struct DPostList {
    pub posts: *const DPost,
    pub posts_len: usize,
}

/// Arena holding an extracted post list.
/// All allocations for the list live in the bump allocator.
pub struct DPostArena {
    #[allow(dead_code)]
    bump: Bump,
    list: *const DPostList,
}

// ----------------------------------------------------------------------------
// Helper functions
// ----------------------------------------------------------------------------

/// Copies a string into the arena and returns a DString pointing to it.
fn copy_str_to_arena(bump: &Bump, s: &str) -> DString {
    if s.is_empty() {
        return DString::empty();
    }
    let bytes = bump.alloc_slice_copy(s.as_bytes());
    DString {
        data: bytes.as_ptr(),
        len: bytes.len(),
    }
}

/// Creates a DPostList in the arena from extracted posts.
fn make_post_list(bump: &Bump, posts: &[Post]) -> *const DPostList {
    let mut out = Vec::with_capacity(posts.len());
    for p in posts {
        let replies_iter = p.replies.iter().map(|r| copy_str_to_arena(bump, r));
        let replies = bump.alloc_slice_fill_iter(replies_iter);

        out.push(DPost {
            id: copy_str_to_arena(bump, &p.id),
            author: copy_str_to_arena(bump, &p.author),
            timestamp: copy_str_to_arena(bump, &p.timestamp),
            content: copy_str_to_arena(bump, &p.content),
            image_url: copy_str_to_arena(bump, p.image_url.as_deref().unwrap_or("")),
            thumbnail_url: copy_str_to_arena(bump, p.thumbnail_url.as_deref().unwrap_or("")),
            replies: replies.as_ptr(),
            replies_len: replies.len(),
            is_thread: p.is_thread,
            board_id: copy_str_to_arena(bump, &p.board_id),
        });
    }
    let slice = bump.alloc_slice_fill_iter(out);
    let list = bump.alloc(DPostList {
        posts: slice.as_ptr(),
        posts_len: slice.len(),
    });
    list as *const DPostList
}

/// Maps a BoardError to a DErrorCode.
fn map_error_code(err: &BoardError) -> u32 {
    match err {
        BoardError::Timeout => DErrorCode::Timeout as u32,
        BoardError::NoConnection => DErrorCode::NoConnection as u32,
        BoardError::Io(_) | BoardError::Submit(_) => DErrorCode::Fetch as u32,
        BoardError::Parse(_) => DErrorCode::Parse as u32,
        BoardError::InvalidUrl(_) => DErrorCode::Invalid as u32,
        BoardError::Storage(_) => DErrorCode::Internal as u32,
    }
}

/// Sets out_err with the given code and message.
/// If out_err is null, this is a no-op.
unsafe fn set_error(out_err: *mut DError, code: u32, message: &str) {
    if out_err.is_null() {
        return;
    }
    let msg = LAST_ERROR.with(|slot| {
        let mut slot = slot.borrow_mut();
        slot.clear();
        slot.push_str(message);
        DString {
            data: slot.as_ptr(),
            len: slot.len(),
        }
    });
    (*out_err).code = code;
    (*out_err).message = msg;
}

/// Sets out_err to success (D_OK with empty message).
/// If out_err is null, this is a no-op.
unsafe fn set_success(out_err: *mut DError) {
    if !out_err.is_null() {
        (*out_err).code = DErrorCode::Ok as u32;
        (*out_err).message = DString::empty();
    }
}

/// Reads a required UTF-8 argument, reporting `name` on failure.
unsafe fn read_required<'a>(
    data: *const u8,
    len: usize,
    name: &str,
    out_err: *mut DError,
) -> Option<&'a str> {
    if data.is_null() || len == 0 {
        set_error(
            out_err,
            DErrorCode::Invalid as u32,
            &format!("{name} is null or empty"),
        );
        return None;
    }
    let bytes = std::slice::from_raw_parts(data, len);
    match std::str::from_utf8(bytes) {
        Ok(s) => Some(s),
        Err(_) => {
            set_error(
                out_err,
                DErrorCode::Invalid as u32,
                &format!("{name} is not valid UTF-8"),
            );
            None
        }
    }
}

/// Reads an optional UTF-8 argument; null or empty means absent.
unsafe fn read_optional<'a>(
    data: *const u8,
    len: usize,
    name: &str,
    out_err: *mut DError,
) -> Result<Option<&'a str>, ()> {
    if data.is_null() || len == 0 {
        return Ok(None);
    }
    read_required(data, len, name, out_err).map(Some).ok_or(())
}

unsafe fn extract_into_arena(
    html: *const u8,
    html_len: usize,
    board: *const u8,
    board_len: usize,
    out_err: *mut DError,
    extract: fn(&str) -> Result<Vec<Post>, BoardError>,
) -> *mut DPostArena {
    let Some(html_str) = read_required(html, html_len, "html", out_err) else {
        return ptr::null_mut();
    };
    let Ok(board_id) = read_optional(board, board_len, "board", out_err) else {
        return ptr::null_mut();
    };

    // Catch panics to avoid unwinding across FFI boundary
    let result = panic::catch_unwind(|| extract(html_str));

    match result {
        Ok(Ok(posts)) => {
            let posts: Vec<Post> = match board_id {
                Some(b) => posts.into_iter().map(|p| p.with_board(b)).collect(),
                None => posts,
            };
            let bump = Bump::new();
            let list = make_post_list(&bump, &posts);
            set_success(out_err);
            Box::into_raw(Box::new(DPostArena { bump, list }))
        }
        Ok(Err(err)) => {
            set_error(out_err, map_error_code(&err), &err.to_string());
            ptr::null_mut()
        }
        Err(_) => {
            set_error(
                out_err,
                DErrorCode::Internal as u32,
                "internal panic during extraction",
            );
            ptr::null_mut()
        }
    }
}

// ----------------------------------------------------------------------------
// Extraction FFI functions
// ----------------------------------------------------------------------------

/// Extracts the opening post of every thread on a board index page.
///
/// # Arguments
/// * `html` - HTML content bytes (UTF-8)
/// * `html_len` - Length of HTML in bytes
/// * `board` - Board id bytes (UTF-8), may be null; stamped on every post
/// * `board_len` - Length of board id in bytes
/// * `out_err` - Output error struct (may be null)
///
/// # Returns
/// Pointer to DPostArena on success, null on failure.
///
/// # Safety
/// Pointers must be valid for their lengths.
/// Caller must free the returned arena via uchan_free_posts.
#[no_mangle]
pub unsafe extern "C" fn uchan_extract_threads(
    html: *const u8,
    html_len: usize,
    board: *const u8,
    board_len: usize,
    out_err: *mut DError,
) -> *mut DPostArena {
    extract_into_arena(html, html_len, board, board_len, out_err, threads_from_html)
}

/// Extracts every post on a thread page. Arguments as for uchan_extract_threads.
///
/// # Safety
/// Pointers must be valid for their lengths.
/// Caller must free the returned arena via uchan_free_posts.
#[no_mangle]
pub unsafe extern "C" fn uchan_extract_posts(
    html: *const u8,
    html_len: usize,
    board: *const u8,
    board_len: usize,
    out_err: *mut DError,
) -> *mut DPostArena {
    extract_into_arena(html, html_len, board, board_len, out_err, posts_from_html)
}

/// Returns a pointer to the DPostList inside the arena.
///
/// # Safety
/// The arena pointer must be valid or null.
/// The returned pointer is valid until uchan_free_posts is called.
#[no_mangle]
pub unsafe extern "C" fn uchan_posts_result(arena: *const DPostArena) -> *const DPostList {
    if arena.is_null() {
        return ptr::null();
    }
    (*arena).list
}

/// Frees the post arena and all associated allocations.
///
/// # Safety
/// The arena pointer must have been returned by an extraction function.
/// After this call, the arena pointer is invalid.
#[no_mangle]
pub unsafe extern "C" fn uchan_free_posts(arena: *mut DPostArena) {
    if !arena.is_null() {
        drop(Box::from_raw(arena));
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
