/// Photo API module
///
/// This module handles:
/// - Talking to Lorem Picsum over HTTP (client.rs)
/// - The error taxonomy for list/detail fetches (error.rs)
/// - Downloading and decoding thumbnails (thumbnail.rs)

pub mod client;
pub mod error;
pub mod thumbnail;

pub use client::{PhotoSource, PicsumClient, PAGE_SIZE};
pub use error::ApiError;
