pub mod client;
pub mod ingest;
pub mod proto;

pub use client::{ApiClient, ApiConfig};
