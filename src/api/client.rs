//! Lorem Picsum HTTP client
//!
//! Endpoints used:
//! - `GET {base}/v2/list?page={page}&limit={limit}` - one page of photos
//! - `GET {base}/id/{id}/info` - a single photo record
//! - `GET {base}/id/{id}/{width}/{height}` - a resized image (see thumbnail.rs)

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::error::ApiError;
use crate::state::data::Photo;

/// Fixed number of photos requested per page
pub const PAGE_SIZE: u32 = 20;

/// Read-only access to photo records
///
/// The loaders only ever see this trait, so tests can script responses
/// without a network.
#[async_trait]
pub trait PhotoSource: Send + Sync {
    /// Fetch one page of photos (`page` is 1-indexed)
    async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, ApiError>;

    /// Fetch a single photo by id
    async fn photo(&self, id: &str) -> Result<Photo, ApiError>;
}

/// HTTP client for the Lorem Picsum API
#[derive(Debug, Clone)]
pub struct PicsumClient {
    http: Client,
    base_url: Url,
}

impl PicsumClient {
    /// Create a client rooted at `base_url` (e.g. https://picsum.photos)
    pub fn new(base_url: Url, timeout: Duration) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|e| {
                // Only fails if the TLS backend can't initialise
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });

        Self { http, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Append path segments to the base URL
    ///
    /// Segments are percent-encoded, so an id can never escape its slot.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn list_url(&self, page: u32, limit: u32) -> Url {
        let mut url = self.endpoint(&["v2", "list"]);
        url.query_pairs_mut()
            .append_pair("page", &page.to_string())
            .append_pair("limit", &limit.to_string());
        url
    }

    pub fn info_url(&self, id: &str) -> Url {
        self.endpoint(&["id", id, "info"])
    }

    /// Templated image URL, resized server-side
    pub fn image_url(&self, id: &str, width: u32, height: u32) -> Url {
        self.endpoint(&["id", id, &width.to_string(), &height.to_string()])
    }

    /// GET a URL and return the body of a successful response
    ///
    /// Non-success statuses are handed back untouched so callers can
    /// map 404 to their own error.
    pub(super) async fn get_body(
        &self,
        url: Url,
        what: &str,
    ) -> Result<Result<Vec<u8>, StatusCode>, ApiError> {
        debug!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::transport(what, e))?;

        let status = response.status();
        if !status.is_success() {
            return Ok(Err(status));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::transport(what, e))?;

        Ok(Ok(body.to_vec()))
    }
}

#[async_trait]
impl PhotoSource for PicsumClient {
    async fn list_photos(&self, page: u32, limit: u32) -> Result<Vec<Photo>, ApiError> {
        let url = self.list_url(page, limit);
        match self.get_body(url, "photos").await? {
            Ok(body) => parse_json("photos", &body),
            Err(status) => Err(status_error("photos", status)),
        }
    }

    async fn photo(&self, id: &str) -> Result<Photo, ApiError> {
        let url = self.info_url(id);
        match self.get_body(url, "photo").await? {
            Ok(body) => parse_json("photo", &body),
            Err(status) => Err(photo_status_error(id, status)),
        }
    }
}

/// Convert a non-success status into an error
pub(super) fn status_error(what: &str, status: StatusCode) -> ApiError {
    ApiError::from_status(what, status.as_u16(), status.canonical_reason())
}

/// Status mapping for the single-photo endpoint, where 404 means no such id
fn photo_status_error(id: &str, status: StatusCode) -> ApiError {
    match status {
        StatusCode::NOT_FOUND => ApiError::NotFound { id: id.to_string() },
        status => status_error("photo", status),
    }
}

/// Decode a JSON body, reporting malformed payloads as fetch failures
fn parse_json<T: DeserializeOwned>(what: &str, body: &[u8]) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::FetchFailed {
        status: None,
        message: format!("Failed to read {}: {}", what, e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PicsumClient {
        let base = Url::parse("https://picsum.photos").unwrap();
        PicsumClient::new(base, Duration::from_secs(5))
    }

    #[test]
    fn test_list_url() {
        let url = client().list_url(3, PAGE_SIZE);
        assert_eq!(url.as_str(), "https://picsum.photos/v2/list?page=3&limit=20");
    }

    #[test]
    fn test_info_and_image_urls() {
        let client = client();
        assert_eq!(client.info_url("237").as_str(), "https://picsum.photos/id/237/info");
        assert_eq!(
            client.image_url("237", 400, 300).as_str(),
            "https://picsum.photos/id/237/400/300"
        );
    }

    #[test]
    fn test_base_url_with_path() {
        let base = Url::parse("http://localhost:8080/mirror/").unwrap();
        let client = PicsumClient::new(base, Duration::from_secs(5));
        assert_eq!(
            client.list_url(1, 20).as_str(),
            "http://localhost:8080/mirror/v2/list?page=1&limit=20"
        );
    }

    #[test]
    fn test_id_is_escaped() {
        let url = client().info_url("../v2/list");
        assert_eq!(url.as_str(), "https://picsum.photos/id/..%2Fv2%2Flist/info");
    }

    #[test]
    fn test_status_error() {
        let err = status_error("photos", StatusCode::BAD_GATEWAY);
        assert_eq!(
            err,
            ApiError::FetchFailed {
                status: Some(502),
                message: "Failed to fetch photos: Bad Gateway".to_string(),
            }
        );
    }

    #[test]
    fn test_photo_status_error() {
        assert_eq!(
            photo_status_error("999", StatusCode::NOT_FOUND),
            ApiError::NotFound { id: "999".to_string() }
        );

        let err = photo_status_error("237", StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "Failed to fetch photo: Internal Server Error");
    }

    #[test]
    fn test_list_404_is_fetch_failure() {
        let err = status_error("photos", StatusCode::NOT_FOUND);
        assert!(!err.is_not_found());
        assert_eq!(
            err,
            ApiError::FetchFailed {
                status: Some(404),
                message: "Failed to fetch photos: Not Found".to_string(),
            }
        );
    }

    /// Serve one canned response on a loopback port, returning its base URL
    fn serve_once(status_line: &'static str) -> Url {
        use std::io::{Read, Write};
        use std::net::TcpListener;

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        std::thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 1024];
            let _ = stream.read(&mut buf);
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                status_line
            );
            stream.write_all(response.as_bytes()).unwrap();
        });

        Url::parse(&format!("http://{}", addr)).unwrap()
    }

    #[tokio::test]
    async fn test_photo_endpoint_maps_statuses() {
        let missing = PicsumClient::new(serve_once("404 Not Found"), Duration::from_secs(5));
        assert_eq!(
            missing.photo("999").await,
            Err(ApiError::NotFound { id: "999".to_string() })
        );

        let broken = PicsumClient::new(
            serve_once("500 Internal Server Error"),
            Duration::from_secs(5),
        );
        assert_eq!(broken.photo("237").await.unwrap_err().status(), Some(500));

        let list = PicsumClient::new(serve_once("404 Not Found"), Duration::from_secs(5));
        let err = list.list_photos(1, PAGE_SIZE).await.unwrap_err();
        assert!(!err.is_not_found());
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_parse_json() {
        let body = br#"[{"id":"1","author":"A","width":10,"height":5,"url":"u","download_url":"d"}]"#;
        let photos: Vec<Photo> = parse_json("photos", body).unwrap();
        assert_eq!(photos.len(), 1);
        assert_eq!(photos[0].author, "A");

        let err = parse_json::<Vec<Photo>>("photos", b"<html>").unwrap_err();
        assert!(err.to_string().starts_with("Failed to read photos:"));
        assert_eq!(err.status(), None);
    }
}
