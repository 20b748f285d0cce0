/// Unsplash API module
///
/// This module handles all outbound HTTP:
/// - Searching photos with query/page/per_page parameters (client.rs)
/// - Downloading thumbnail and full-size renditions for display
///
/// Authentication uses the Client-ID scheme: the access key is injected
/// into the client at construction, never read from the environment here.

pub mod client;

pub use client::{ApiError, UnsplashClient, DEFAULT_PER_PAGE};
