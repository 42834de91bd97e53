//! s3open - Signed GET access to S3-compatible object storage
//!
//! This crate provides:
//! - A single [`open`] operation: sign a GET request, dispatch it, and
//!   return the object body as a readable stream
//! - AWS Signature V2 signing via a pluggable [`Signer`] capability
//! - A pluggable blocking [`HttpClient`] transport (default: `reqwest`)
//! - Per-read transfer metrics reported through an optional callback
//!
//! # Example
//!
//! ```rust,ignore
//! use s3open::{open, Config, Keys};
//! use std::io::Read;
//!
//! let config = Config {
//!     keys: Keys::new("AKID", "secret"),
//!     ..Config::default()
//! };
//! let mut object = open("https://s3.example.com/bucket/key", Some(&config))?;
//! let mut bytes = Vec::new();
//! object.read_to_end(&mut bytes)?;
//! ```
//!
//! Everything is synchronous and blocking; `open` returns once the response
//! headers arrive and each read blocks for the underlying transfer plus the
//! metrics callback. Timeouts and retries belong to the transport and the
//! caller respectively.

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod open;
pub mod sign;

// Re-export core types
pub use client::{BodyStream, HttpClient, ReqwestClient};
pub use config::{Config, DEFAULT_CONFIG, Keys};
pub use error::{Error, Result};
pub use metrics::{Metrics, MetricsCallback, MetricsReader};
pub use open::open;
pub use sign::{SigV2Signer, Signer};
