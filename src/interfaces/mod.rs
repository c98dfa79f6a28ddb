//! Inbound interfaces (REST API)

pub mod http;
