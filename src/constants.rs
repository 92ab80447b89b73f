// src/constants.rs
//! Domain constants that define the operational boundaries of the sync.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// Root of every Notion REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Root that Notion's page-relative links (`/<page id>`) resolve against.
pub const NOTION_WEB_BASE_URL: &str = "https://www.notion.so";

/// The `Notion-Version` header sent with every request.
pub const NOTION_API_VERSION: &str = "2022-06-28";

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. We use the maximum to minimize
/// round-trips when following cursors.
pub const NOTION_API_PAGE_SIZE: u32 = 100;

/// Environment variable holding the integration token.
pub const API_KEY_ENV: &str = "NOTION_API_KEY";

/// Environment variable holding the posts database id.
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

// ---------------------------------------------------------------------------
// Request scheduling
// ---------------------------------------------------------------------------

/// Child-block fetches in flight at once when nothing else is configured.
///
/// Notion documents an average of three requests per second per
/// integration, so the default stays at that figure.
pub const DEFAULT_CONCURRENCY: usize = 3;

/// Upper bound accepted for the child-block fetch pool.
pub const MAX_CONCURRENCY: usize = 16;

/// Seconds before an in-flight request is abandoned.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

// ---------------------------------------------------------------------------
// Post scoping
// ---------------------------------------------------------------------------

/// Select property every synced document is scoped by.
pub const BASE_PREDICATE_PROPERTY: &str = "Type";

/// Value of [`BASE_PREDICATE_PROPERTY`] that marks a document as a post.
pub const BASE_PREDICATE_VALUE: &str = "Post";

/// Status given to records whose status property is unset.
pub const DEFAULT_POST_STATUS: &str = "draft";

// ---------------------------------------------------------------------------
// Markup
// ---------------------------------------------------------------------------

/// The fragment emitted for a text block whose rich text is unusable.
pub const EMPTY_PARAGRAPH_FRAGMENT: &str = "<p></p>";

/// Class Gutenberg puts on its code block `<pre>` element.
pub const GUTENBERG_CODE_CLASS: &str = "wp-block-code";

// ---------------------------------------------------------------------------
// Error display
// ---------------------------------------------------------------------------

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 200;
