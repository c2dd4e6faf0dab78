pub mod client;
pub mod fetch;
pub mod headers;

pub use client::build_http_client;
pub use fetch::{Fetch, Fetched, HttpFetcher, MemoryFetcher};
pub use headers::parse_headers;
