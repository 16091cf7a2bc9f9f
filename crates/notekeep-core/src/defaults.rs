//! Centralized default constants for notekeep.
//!
//! Every crate reads these instead of repeating the numbers.

// =============================================================================
// NOTES
// =============================================================================

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 255;

// =============================================================================
// PAGINATION
// =============================================================================

/// Page used when the request omits `page`.
pub const PAGE: i64 = 1;

/// Page size used when the request omits `limit`.
pub const PAGE_LIMIT: i64 = 20;

/// Smallest accepted page size.
pub const PAGE_LIMIT_MIN: i64 = 1;

/// Largest accepted page size; bigger requests are clamped.
pub const PAGE_LIMIT_MAX: i64 = 100;

// =============================================================================
// SERVER
// =============================================================================

/// Default bind host.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default bind port.
pub const SERVER_PORT: u16 = 3000;

/// Default request body limit (1 MiB).
pub const MAX_BODY_BYTES: usize = 1024 * 1024;

// =============================================================================
// DATABASE
// =============================================================================

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_limit_within_bounds() {
        assert!(PAGE_LIMIT >= PAGE_LIMIT_MIN);
        assert!(PAGE_LIMIT <= PAGE_LIMIT_MAX);
    }
}
