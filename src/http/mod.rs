//! HTTP surface of the API.
//!
//! # Responsibilities
//! - Assemble the Axum router with all middleware layers
//! - Translate domain results and errors into JSON envelopes
//! - Serve requests with graceful shutdown

pub mod handlers;
pub mod response;
pub mod server;

pub use server::HttpServer;
