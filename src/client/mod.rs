//! API client for reading markets from Kalshi.
//!
//! - [`rest`] - HTTP client for the public market-data endpoints

pub mod rest;

pub use rest::RestClient;
