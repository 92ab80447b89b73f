// src/api/client.rs
//! Pure HTTP client wrapper for Notion API.
//!
//! This module provides a thin wrapper around reqwest for making
//! HTTP requests to the Notion API. It handles authentication, the
//! version header and the request timeout; parsing lives in `parser`.

use super::parser;
use super::types::PaginatedResponse;
use crate::constants::{NOTION_API_BASE_URL, NOTION_API_VERSION};
use crate::error::{AppError, ConfigError};
use crate::model::{Block, Document};
use crate::query::CollectionQuery;
use crate::types::{ApiKey, BlockId, DatabaseId, PageId};
use reqwest::{header, Client, Response};
use serde::Serialize;
use std::time::Duration;

/// A thin wrapper around reqwest Client for Notion API requests.
#[derive(Clone)]
pub struct NotionHttpClient {
    client: Client,
    base_url: String,
}

impl NotionHttpClient {
    /// Creates a new HTTP client with Notion API authentication.
    ///
    /// Every request is abandoned after `timeout`; the expiry surfaces as
    /// a [`crate::RemoteError`].
    pub fn new(api_key: &ApiKey, timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .default_headers(Self::create_headers(api_key)?)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: NOTION_API_BASE_URL.to_string(),
        })
    }

    /// Points the client at another API root, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Creates the default headers for Notion API requests.
    fn create_headers(api_key: &ApiKey) -> Result<header::HeaderMap, AppError> {
        let mut headers = header::HeaderMap::new();

        let auth_header = format!("Bearer {}", api_key.as_str());
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&auth_header).map_err(|e| ConfigError::Invalid {
                field: "api key",
                reason: format!("not usable in a header: {}", e),
            })?,
        );

        headers.insert(
            "Notion-Version",
            header::HeaderValue::from_static(NOTION_API_VERSION),
        );

        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        Ok(headers)
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint)
    }

    /// Makes a GET request; `params` become URL parameters, never a body.
    pub async fn get(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<Response, AppError> {
        let url = self.url(endpoint);
        log::debug!("GET {}", url);
        Ok(self.client.get(url).query(params).send().await?)
    }

    /// Makes a POST request with JSON body to the specified endpoint.
    pub async fn post<T: Serialize>(&self, endpoint: &str, body: &T) -> Result<Response, AppError> {
        let url = self.url(endpoint);

        if log::log_enabled!(log::Level::Debug) {
            log::debug!(
                "POST {} {}",
                url,
                serde_json::to_string(body).unwrap_or_else(|_| "<unserializable body>".to_string())
            );
        }

        Ok(self.client.post(url).json(body).send().await?)
    }
}

#[async_trait::async_trait]
impl super::NotionRepository for NotionHttpClient {
    async fn retrieve_document(&self, id: &PageId) -> Result<Document, AppError> {
        let endpoint = format!("pages/{}", id.as_str());
        let response = self.get(&endpoint, &[]).await?;
        let result = extract_response_text(response).await?;
        parser::parse_document_response(result)
    }

    async fn children_page(
        &self,
        parent: &BlockId,
        page_size: u32,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        let endpoint = format!("blocks/{}/children", parent.as_str());
        let mut params = vec![("page_size", page_size.to_string())];
        if let Some(cursor) = cursor {
            params.push(("start_cursor", cursor));
        }
        let response = self.get(&endpoint, &params).await?;
        let result = extract_response_text(response).await?;
        parser::parse_blocks_pagination(result)
    }

    async fn query_page(
        &self,
        database: &DatabaseId,
        query: &CollectionQuery,
    ) -> Result<PaginatedResponse<Document>, AppError> {
        let endpoint = format!("databases/{}/query", database.as_str());
        let response = self.post(&endpoint, query).await?;
        let result = extract_response_text(response).await?;
        parser::parse_documents_pagination(result)
    }
}

/// Result of an HTTP operation with response metadata.
#[derive(Debug)]
pub struct ApiResponse<T> {
    pub data: T,
    pub status: reqwest::StatusCode,
    pub url: String,
}

/// Extracts the response body as text with metadata.
pub async fn extract_response_text(response: Response) -> Result<ApiResponse<String>, AppError> {
    let status = response.status();
    let url = response.url().to_string();
    let text = response.text().await?;

    log::debug!("{} <- {}", status, url);

    Ok(ApiResponse {
        data: text,
        status,
        url,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::NotionRepository;
    use crate::error::RemoteError;
    use tokio::net::TcpListener;

    #[test]
    fn base_url_is_normalized() {
        let key = ApiKey::new("secret_test").unwrap();
        let client = NotionHttpClient::new(&key, Duration::from_secs(1))
            .unwrap()
            .with_base_url("http://localhost:8080/v1/");
        assert_eq!(client.url("pages/p1"), "http://localhost:8080/v1/pages/p1");
    }

    #[test]
    fn default_base_url_is_notion() {
        let key = ApiKey::new("secret_test").unwrap();
        let client = NotionHttpClient::new(&key, Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.url("databases/d/query"),
            "https://api.notion.com/v1/databases/d/query"
        );
    }

    #[test]
    fn headers_carry_bearer_token_and_version() {
        let key = ApiKey::new("secret_test").unwrap();
        let headers = NotionHttpClient::create_headers(&key).unwrap();
        assert_eq!(headers[header::AUTHORIZATION], "Bearer secret_test");
        assert_eq!(headers["Notion-Version"], NOTION_API_VERSION);
    }

    #[tokio::test]
    async fn unanswered_request_times_out() {
        // Accepts connections and never writes a response.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let key = ApiKey::new("secret_test").unwrap();
        let client = NotionHttpClient::new(&key, Duration::from_millis(200))
            .unwrap()
            .with_base_url(format!("http://{}/v1", addr));

        let started = std::time::Instant::now();
        let err = client
            .retrieve_document(&PageId::parse("p1").unwrap())
            .await
            .unwrap_err();
        server.abort();

        assert!(started.elapsed() < Duration::from_secs(5));
        match err {
            AppError::Remote(RemoteError {
                status: None,
                message,
                ..
            }) => assert!(message.contains("timed out"), "{}", message),
            other => panic!("expected a remote timeout, got {:?}", other),
        }
    }
}
