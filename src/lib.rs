//! Portfolio Contact Intake API Library

pub mod auth;
pub mod config;
pub mod http;
pub mod intake;
pub mod notify;
pub mod security;
pub mod store;

pub use config::schema::AppConfig;
pub use http::HttpServer;
