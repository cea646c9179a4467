pub mod client;

pub use client::{Fetcher, HttpFetcher};
