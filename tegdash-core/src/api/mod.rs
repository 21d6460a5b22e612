//! Simulation service client: query building, transport, typed responses.

pub mod client;
pub mod error;
pub mod models;
pub mod transport;

pub use client::{ApiClient, Endpoint};
pub use error::ApiError;
pub use models::*;
pub use reqwest::Url;
pub use transport::{HttpTransport, RawResponse, Transport};
