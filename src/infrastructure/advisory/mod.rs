pub mod client;

pub use client::{AdvisoryConfig, HttpAdvisoryProvider};
