//! Structured logging field names shared across mise crates.
//!
//! ## Log Level Contract
//!
//! | Level | Usage |
//! |-------|-------|
//! | ERROR | Degraded service, requires operator attention |
//! | WARN  | Recoverable issue, fallback applied |
//! | INFO  | Lifecycle events (startup, shutdown, migrations) |
//! | DEBUG | Repository operations, decision points |
//! | TRACE | Per-row iteration |
//!
//! The request span opened by the HTTP layer declares the fields below as
//! empty and fills them in as the request progresses.

/// Correlation ID propagated from the `x-request-id` header.
/// Format: UUIDv7 (time-ordered).
pub const REQUEST_ID: &str = "request_id";

/// Authenticated principal, recorded once the bearer token resolves.
pub const USER_ID: &str = "user_id";
