//! Security subsystem: rate limiting and response headers.

pub mod headers;
pub mod rate_limit;
