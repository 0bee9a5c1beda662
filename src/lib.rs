// Library root — exposes internals for integration tests.
// The binary entry point is src/main.rs.

pub mod bfhl;
pub mod config;
pub mod engine;
pub mod error;
pub mod http;
pub mod llm;
pub mod logger;
