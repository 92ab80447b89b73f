// src/api/parser.rs
//! Turns raw Notion responses into typed values or a [`RemoteError`].
//!
//! A response is an error when its status is 400 or above, or when its
//! body is an error object (`"object": "error"`), whatever the status.

use super::client::ApiResponse;
use super::types::PaginatedResponse;
use crate::constants::ERROR_BODY_PREVIEW_LENGTH;
use crate::error::{AppError, NotionErrorCode, RemoteError};
use crate::model::{Block, Document};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse any Notion API response into `T`.
pub fn parse_api_response<T>(result: ApiResponse<String>) -> Result<T, AppError>
where
    T: DeserializeOwned,
{
    let status = result.status.as_u16();

    let body: Value = match serde_json::from_str(&result.data) {
        Ok(body) => body,
        Err(e) => {
            let message = if status >= 400 {
                format!("HTTP {} from {}: {}", status, result.url, preview(&result.data))
            } else {
                log::error!("Failed to parse response from {}: {}", result.url, e);
                format!("unreadable response body from {}: {}", result.url, e)
            };
            return Err(RemoteError {
                status: Some(status),
                code: None,
                message,
            }
            .into());
        }
    };

    if status >= 400 || is_error_object(&body) {
        return Err(error_from_body(&body, status, &result.url).into());
    }

    serde_json::from_value(body).map_err(|e| {
        log::error!("Unexpected response shape from {}: {}", result.url, e);
        RemoteError {
            status: Some(status),
            code: None,
            message: format!("unexpected response shape from {}: {}", result.url, e),
        }
        .into()
    })
}

fn is_error_object(body: &Value) -> bool {
    body.get("object").and_then(Value::as_str) == Some("error")
}

/// Builds the error for a failed response, preferring Notion's own fields.
fn error_from_body(body: &Value, http_status: u16, url: &str) -> RemoteError {
    let status = body
        .get("status")
        .and_then(Value::as_u64)
        .and_then(|s| u16::try_from(s).ok())
        .unwrap_or(http_status);
    let code = body
        .get("code")
        .and_then(Value::as_str)
        .map(NotionErrorCode::from_api_response);
    let message = body
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Unknown Notion API error from {}", url));

    RemoteError {
        status: Some(status),
        code,
        message,
    }
}

fn preview(body: &str) -> String {
    if body.chars().count() > ERROR_BODY_PREVIEW_LENGTH {
        let cut: String = body.chars().take(ERROR_BODY_PREVIEW_LENGTH).collect();
        format!("{}...", cut)
    } else {
        body.to_string()
    }
}

/// Parse a `GET /pages/{id}` response.
pub fn parse_document_response(result: ApiResponse<String>) -> Result<Document, AppError> {
    parse_api_response(result)
}

/// Parse one page of a `POST /databases/{id}/query` response.
pub fn parse_documents_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Document>, AppError> {
    parse_api_response(result)
}

/// Parse one page of a `GET /blocks/{id}/children` response.
pub fn parse_blocks_pagination(
    result: ApiResponse<String>,
) -> Result<PaginatedResponse<Block>, AppError> {
    parse_api_response(result)
}
