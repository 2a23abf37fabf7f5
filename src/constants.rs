// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Reading these constants should tell you how the service talks to Notion,
//! which headings structure a customer page, and what it will accept as an
//! upload.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
///
/// The Notion API maximum is 100. Listings follow `next_cursor` until the
/// API reports no more results, so this only controls round-trip count.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Pinned Notion API version sent with every request.
pub const NOTION_VERSION: &str = "2022-06-28";

/// Default Notion REST endpoint.
pub const NOTION_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;

// ---------------------------------------------------------------------------
// Database vocabulary
// ---------------------------------------------------------------------------

/// Select property that classifies every row of the database.
pub const TYPE_PROPERTY: &str = "Type";

pub const TYPE_LEAD: &str = "Lead";
pub const TYPE_SALE: &str = "Sale";
pub const TYPE_CANCELED: &str = "Canceled";

/// Value shown for unset payment flags.
pub const PAYMENT_FLAG_DEFAULT: &str = "No";

// ---------------------------------------------------------------------------
// Page body layout
// ---------------------------------------------------------------------------

pub const SALES_COMMENTS_HEADING: &str = "Sales Comments";
pub const SALES_DOCUMENTS_HEADING: &str = "Sales Documents";
pub const APPOINTMENT_COMMENTS_HEADING: &str = "Appointment Comments";
pub const APPOINTMENT_OWNER_DOCUMENTS_HEADING: &str = "Appointment Documents (Owner)";
pub const APPOINTMENT_LIVE_REP_DOCUMENTS_HEADING: &str =
    "Appointment Documents (Live Representative)";

/// Headings seeded, in order, into every new lead page. Each one is
/// followed by an empty paragraph placeholder.
pub const LEAD_TEMPLATE_HEADINGS: [&str; 5] = [
    SALES_COMMENTS_HEADING,
    SALES_DOCUMENTS_HEADING,
    APPOINTMENT_COMMENTS_HEADING,
    APPOINTMENT_OWNER_DOCUMENTS_HEADING,
    APPOINTMENT_LIVE_REP_DOCUMENTS_HEADING,
];

// ---------------------------------------------------------------------------
// Uploads
// ---------------------------------------------------------------------------

/// Largest accepted upload, inclusive: 20 MiB.
pub const MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

/// Request body limit for the upload route. Slightly above
/// `MAX_UPLOAD_BYTES` so oversized files reach validation and get a
/// descriptive 400 instead of a bare 413.
pub const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// chrono pattern for comment timestamps, e.g. `Jan 5, 2025, 3:45 PM`.
pub const COMMENT_TIMESTAMP_FORMAT: &str = "%b %-d, %Y, %-I:%M %p";
