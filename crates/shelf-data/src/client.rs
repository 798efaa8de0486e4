//! HTTP client for the catalog service.

use async_trait::async_trait;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use shelf_core::catalog::{Item, NewItem};
use shelf_core::ItemId;
use tracing::{debug, info, warn};

use crate::api::{CatalogApi, FetchError, HealthStatus};
use crate::timeout::TimeoutConfig;

/// Base URL used when nothing is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

const BOOKS_PATH: &str = "/api/v1/books";

/// Catalog client over the service's JSON API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    base_url: String,
    http_client: reqwest::Client,
    timeout: TimeoutConfig,
}

impl HttpCatalog {
    /// Create a client with the default timeouts.
    pub fn new(base_url: impl Into<String>) -> Result<Self, FetchError> {
        Self::with_timeout(base_url, TimeoutConfig::default())
    }

    /// Create a client with explicit timeouts.
    pub fn with_timeout(
        base_url: impl Into<String>,
        timeout: TimeoutConfig,
    ) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(timeout.connect)
            .timeout(timeout.total)
            .build()
            .map_err(|e| FetchError::Request(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http_client,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> TimeoutConfig {
        self.timeout
    }

    /// Absolute URL for a path on the service.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "GET");
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(transport_error)?;
        read_json(check_status(response, url)?).await
    }
}

#[async_trait]
impl CatalogApi for HttpCatalog {
    async fn list_items(&self) -> Result<Vec<Item>, FetchError> {
        let url = self.url(&format!("{}/", BOOKS_PATH));
        let items: Vec<Item> = self.get_json(&url).await?;
        info!(count = items.len(), "fetched catalog");
        Ok(items)
    }

    async fn new_items(&self) -> Result<Vec<Item>, FetchError> {
        let url = self.url(&format!("{}/new", BOOKS_PATH));
        let items: Vec<Item> = self.get_json(&url).await?;
        info!(count = items.len(), "fetched new arrivals");
        Ok(items)
    }

    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, FetchError> {
        let url = self.url(&format!("{}/{}", BOOKS_PATH, id));
        debug!(url = %url, "GET");
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%id, "item not found");
            return Ok(None);
        }
        let item = read_json(check_status(response, &url)?).await?;
        Ok(Some(item))
    }

    async fn create_item(&self, item: &NewItem) -> Result<Item, FetchError> {
        let url = self.url(&format!("{}/", BOOKS_PATH));
        debug!(url = %url, title = %item.title, "POST");
        let response = self
            .http_client
            .post(&url)
            .json(item)
            .send()
            .await
            .map_err(transport_error)?;

        let created: Item = read_json(check_status(response, &url)?).await?;
        info!(id = %created.id, title = %created.title, "created item");
        Ok(created)
    }

    async fn delete_item(&self, id: ItemId) -> Result<(), FetchError> {
        let url = self.url(&format!("{}/{}", BOOKS_PATH, id));
        debug!(url = %url, "DELETE");
        let response = self
            .http_client
            .delete(&url)
            .send()
            .await
            .map_err(transport_error)?;

        check_status(response, &url)?;
        info!(%id, "deleted item");
        Ok(())
    }

    async fn health(&self) -> Result<HealthStatus, FetchError> {
        let url = self.url("/health");
        debug!(url = %url, "GET");
        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(transport_error)?;

        // An unhealthy service answers 503 with the same body shape.
        if response.status() == StatusCode::SERVICE_UNAVAILABLE {
            return read_json(response).await;
        }
        read_json(check_status(response, &url)?).await
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, FetchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        warn!(status = status.as_u16(), url, "catalog request failed");
        Err(FetchError::Http {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}

async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, FetchError> {
    let bytes = response.bytes().await.map_err(transport_error)?;
    serde_json::from_slice(&bytes).map_err(|e| FetchError::Deserialization(e.to_string()))
}

fn transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(e.to_string())
    } else if e.is_connect() {
        FetchError::Connection(e.to_string())
    } else if e.is_decode() {
        FetchError::Deserialization(e.to_string())
    } else {
        FetchError::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    const ART_OF_WAR: &str = r#"{"id":7,"title":"The Art of War","author":"Sun Tzu","price":250}"#;

    /// Answer one request with a canned response. The handle yields the raw
    /// request text.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (HttpCatalog, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        let client =
            HttpCatalog::with_timeout(base_url, TimeoutConfig::from_millis(5_000)).unwrap();
        (client, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).into_owned();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn request_line(request: &str) -> &str {
        request.lines().next().unwrap_or_default()
    }

    fn request_body(request: &str) -> &str {
        request.split_once("\r\n\r\n").map(|(_, body)| body).unwrap_or_default()
    }

    #[tokio::test]
    async fn test_list_items() {
        let (client, server) = serve_once(
            "200 OK",
            r#"[{"id":7,"title":"The Art of War","author":"Sun Tzu","price":250}]"#,
        )
        .await;
        let items = client.list_items().await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, ItemId::new(7));
        assert_eq!(items[0].title, "The Art of War");

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "GET /api/v1/books/ HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_item_found() {
        let (client, server) = serve_once("200 OK", ART_OF_WAR).await;
        let item = client.get_item(ItemId::new(7)).await.unwrap().unwrap();
        assert_eq!(item.author, "Sun Tzu");
        assert_eq!(item.price, 250.0);

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "GET /api/v1/books/7 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_get_item_not_found_is_none() {
        let (client, server) = serve_once("404 Not Found", r#"{"error":"not found"}"#).await;
        assert_eq!(client.get_item(ItemId::new(99)).await.unwrap(), None);

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "GET /api/v1/books/99 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_error_status_maps_to_http_error() {
        let (client, server) = serve_once("400 Bad Request", r#"{"error":"invalid id"}"#).await;
        let err = client.new_items().await.unwrap_err();
        match err {
            FetchError::Http { status, url } => {
                assert_eq!(status, 400);
                assert!(url.ends_with("/api/v1/books/new"));
            }
            other => panic!("expected HTTP error, got {other:?}"),
        }

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "GET /api/v1/books/new HTTP/1.1");
    }

    #[tokio::test]
    async fn test_create_item_posts_json() {
        let (client, server) = serve_once(
            "201 Created",
            r#"{"id":16,"title":"Dune","author":"Frank Herbert","price":420,"isbn":"978-0441013593","year":1965}"#,
        )
        .await;
        let new_item = NewItem {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            isbn: "978-0441013593".into(),
            year: 1965,
            price: 420.0,
        };
        let created = client.create_item(&new_item).await.unwrap();
        assert_eq!(created.id, ItemId::new(16));
        assert_eq!(created.year, Some(1965));

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "POST /api/v1/books/ HTTP/1.1");
        assert!(request.to_lowercase().contains("content-type: application/json"));
        let sent: NewItem = serde_json::from_str(request_body(&request)).unwrap();
        assert_eq!(sent, new_item);
    }

    #[tokio::test]
    async fn test_delete_item() {
        let (client, server) = serve_once("204 No Content", "").await;
        client.delete_item(ItemId::new(7)).await.unwrap();

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "DELETE /api/v1/books/7 HTTP/1.1");
    }

    #[tokio::test]
    async fn test_delete_failure_keeps_status() {
        let (client, server) = serve_once("500 Internal Server Error", "").await;
        let err = client.delete_item(ItemId::new(7)).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn test_unhealthy_body_is_read() {
        let (client, server) =
            serve_once("503 Service Unavailable", r#"{"message":"unhealthy"}"#).await;
        let status = client.health().await.unwrap();
        assert_eq!(status.message, "unhealthy");
        assert!(!status.is_healthy());

        let request = server.await.unwrap();
        assert_eq!(request_line(&request), "GET /health HTTP/1.1");
    }

    #[test]
    fn test_base_url_is_normalised() {
        let client = HttpCatalog::new("http://localhost:8080/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(
            client.url("/api/v1/books/7"),
            "http://localhost:8080/api/v1/books/7"
        );
    }

    #[test]
    fn test_timeout_is_kept() {
        let client =
            HttpCatalog::with_timeout(DEFAULT_BASE_URL, TimeoutConfig::from_millis(400)).unwrap();
        assert_eq!(client.timeout().total, Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_a_transport_error() {
        // Port 9 (discard) on loopback is closed in test environments.
        let client =
            HttpCatalog::with_timeout("http://127.0.0.1:9", TimeoutConfig::from_millis(500))
                .unwrap();
        let err = client.list_items().await.unwrap_err();
        assert!(matches!(
            err,
            FetchError::Connection(_) | FetchError::Timeout(_) | FetchError::Request(_)
        ));
    }
}
