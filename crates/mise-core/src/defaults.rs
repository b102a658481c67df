//! Centralized default constants for mise.
//!
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// SEARCH
// =============================================================================

/// Maximum number of names returned by an autocomplete search.
pub const MAX_AUTOCOMPLETE_MATCHES: i64 = 10;

// =============================================================================
// FIELD LIMITS
// =============================================================================

/// Maximum length of a recipe title, in characters.
pub const TITLE_MAX_LEN: usize = 256;

/// Maximum length of a brand, unit, or tag name, in characters.
pub const NAME_MAX_LEN: usize = 256;

/// Highest rating a recipe can carry.
pub const RATING_MAX: i32 = 5;

/// Minimum password length accepted at signup.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum username length.
pub const USERNAME_MAX_LEN: usize = 150;

// =============================================================================
// CREDENTIALS
// =============================================================================

/// Prefix carried by every issued bearer token.
pub const TOKEN_PREFIX: &str = "mise_";

/// Number of random bytes in a bearer token (before hex encoding).
pub const TOKEN_BYTES: usize = 32;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Default request body limit (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Default maximum number of pooled database connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;
