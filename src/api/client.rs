use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode};
use thiserror::Error;

use crate::state::data::SearchPage;

/// Fixed search endpoint of the public Unsplash API
const SEARCH_ENDPOINT: &str = "https://api.unsplash.com/search/photos";

/// Page size used when the caller does not care
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Everything that can go wrong talking to the API.
/// One attempt per call; failures are surfaced, never retried.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("access key is not a valid header value")]
    InvalidAccessKey,
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("search endpoint returned {status}")]
    Status { status: StatusCode },
    #[error("could not parse search response: {source}")]
    Parse {
        #[source]
        source: serde_json::Error,
    },
}

/// Thin wrapper around `reqwest::Client` for the photo search API.
///
/// The client carries the `Authorization: Client-ID <key>` header on
/// every request, so callers only ever pass search parameters.
#[derive(Debug, Clone)]
pub struct UnsplashClient {
    http: Client,
    endpoint: String,
}

impl UnsplashClient {
    /// Create a client for the public Unsplash API.
    ///
    /// The access key is an explicit constructor argument; whoever owns
    /// configuration decides where it comes from.
    pub fn new(access_key: &str) -> Result<Self, ApiError> {
        Self::with_endpoint(access_key, SEARCH_ENDPOINT)
    }

    /// Create a client against a custom search endpoint.
    /// Tests use this to point the client at a local mock server.
    pub fn with_endpoint(access_key: &str, endpoint: &str) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();

        let authorization = HeaderValue::from_str(&format!("Client-ID {access_key}"))
            .map_err(|_| ApiError::InvalidAccessKey)?;
        headers.insert("Authorization", authorization);
        headers.insert("Accept-Version", HeaderValue::from_static("v1"));

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .connect_timeout(std::time::Duration::from_secs(10))
            .default_headers(headers)
            .build()?;

        Ok(UnsplashClient {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    /// Fetch one page of search results.
    ///
    /// The body is read as text first so that a malformed payload can be
    /// reported as a parse error instead of a bare deserialization panic.
    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<SearchPage, ApiError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[
                ("query", query.to_string()),
                ("page", page.to_string()),
                ("per_page", per_page.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }

        let raw = response.text().await?;
        serde_json::from_str(&raw).map_err(|source| ApiError::Parse { source })
    }

    /// Download the raw bytes of one photo rendition (thumbnail or
    /// full-size). The caller turns them into a displayable handle.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.http.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { status });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn search_body() -> serde_json::Value {
        json!({
            "total": 133,
            "total_pages": 12,
            "results": [
                {
                    "id": "abc123",
                    "urls": {
                        "small": "https://images.example/abc123?w=400",
                        "regular": "https://images.example/abc123?w=1080"
                    },
                    "alt_description": "a red fox in the snow",
                    "description": null,
                    "likes": 512,
                    "user": {
                        "name": "Jane Doe",
                        "location": "Oslo, Norway",
                        "total_photos": 87,
                        "portfolio_url": "https://example.com/janedoe"
                    }
                },
                {
                    "id": "def456",
                    "urls": {
                        "small": "https://images.example/def456?w=400",
                        "regular": "https://images.example/def456?w=1080"
                    },
                    "alt_description": null,
                    "likes": 3,
                    "user": {
                        "name": "No Portfolio",
                        "total_photos": 1
                    }
                }
            ]
        })
    }

    fn client_for(server: &MockServer) -> UnsplashClient {
        UnsplashClient::with_endpoint("test-access-key", &server.url("/search/photos"))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_sends_parameters_and_authorization() {
        let server = MockServer::start();

        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search/photos")
                .query_param("query", "fox")
                .query_param("page", "2")
                .query_param("per_page", "12")
                .header("Authorization", "Client-ID test-access-key");
            then.status(200).json_body(search_body());
        });

        let client = client_for(&server);
        let page = client
            .search_photos("fox", 2, DEFAULT_PER_PAGE)
            .await
            .unwrap();

        mock.assert();
        assert_eq!(page.total_pages, 12);
        assert_eq!(page.results.len(), 2);
    }

    #[tokio::test]
    async fn test_search_parses_optional_fields() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/photos");
            then.status(200).json_body(search_body());
        });

        let client = client_for(&server);
        let page = client.search_photos("fox", 1, 12).await.unwrap();

        let first = &page.results[0];
        assert_eq!(first.id, "abc123");
        assert_eq!(first.alt_description.as_deref(), Some("a red fox in the snow"));
        assert_eq!(first.likes, 512);
        assert_eq!(first.user.location.as_deref(), Some("Oslo, Norway"));
        assert_eq!(
            first.user.portfolio_url.as_deref(),
            Some("https://example.com/janedoe")
        );

        // Missing optionals deserialize to None, not errors
        let second = &page.results[1];
        assert!(second.alt_description.is_none());
        assert!(second.description.is_none());
        assert!(second.user.location.is_none());
        assert!(second.user.portfolio_url.is_none());
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/photos");
            then.status(403).body("Rate Limit Exceeded");
        });

        let client = client_for(&server);
        let err = client.search_photos("fox", 1, 12).await.unwrap_err();

        match err {
            ApiError::Status { status } => assert_eq!(status, StatusCode::FORBIDDEN),
            other => panic!("expected status error, got {other:?}"),
        }
        assert!(err.to_string().contains("403"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/search/photos");
            then.status(200).body("not json at all");
        });

        let client = client_for(&server);
        let err = client.search_photos("fox", 1, 12).await.unwrap_err();

        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[tokio::test]
    async fn test_fetch_image_returns_served_bytes() {
        let server = MockServer::start();
        let payload = vec![0xFFu8, 0xD8, 0xFF, 0xE0, 0x00, 0x10];
        server.mock(|when, then| {
            when.method(GET).path("/thumb.jpg");
            then.status(200).body(payload.clone());
        });

        let client = client_for(&server);
        let bytes = client.fetch_image(&server.url("/thumb.jpg")).await.unwrap();

        assert_eq!(bytes, payload);
    }

    #[tokio::test]
    async fn test_fetch_image_surfaces_missing_rendition() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone.jpg");
            then.status(404);
        });

        let client = client_for(&server);
        let err = client.fetch_image(&server.url("/gone.jpg")).await.unwrap_err();

        assert!(matches!(
            err,
            ApiError::Status {
                status: StatusCode::NOT_FOUND
            }
        ));
    }

    #[test]
    fn test_access_key_must_be_a_valid_header() {
        let err = UnsplashClient::new("bad\nkey").unwrap_err();
        assert!(matches!(err, ApiError::InvalidAccessKey));
    }
}
