pub mod client;
pub mod error;

pub use client::{Fetch, HttpClient};
pub use error::FetchError;
