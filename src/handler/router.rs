//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: method/path recognition, body
//! size limits, and dispatch to the student handlers.

use crate::config::AppState;
use crate::handler::students;
use crate::logger;
use crate::response;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Recognized route for a (method, path) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Create,
    List,
    GetOne(String),
    Delete(String),
    Invalid,
}

/// Match a request line against the fixed route table.
///
/// Prefix matches are literal: any path beginning with `/students` lists the
/// collection regardless of trailing characters, and the id is whatever sits
/// in the second path segment. A method mismatch falls through to `Invalid`
/// like any unknown path.
pub fn recognize(method: &Method, path: &str) -> Route {
    if method == Method::POST && path == "/create-student" {
        return Route::Create;
    }
    if method == Method::GET && path.starts_with("/students") {
        return Route::List;
    }
    if method == Method::GET && path.starts_with("/student/") {
        return Route::GetOne(path_id(path));
    }
    if method == Method::DELETE && path.starts_with("/delete-student/") {
        return Route::Delete(path_id(path));
    }
    Route::Invalid
}

/// Second `/`-separated segment of the path, or empty when absent.
fn path_id(path: &str) -> String {
    path.split('/').nth(2).unwrap_or_default().to_string()
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let access_log = state.config.logging.access_log;
    if access_log {
        logger::log_request(req.method(), req.uri(), req.version());
    }

    if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
        return Ok(resp);
    }

    let route = recognize(req.method(), req.uri().path());

    let response = match route {
        Route::Create => match collect_body(req).await {
            Ok(body) => students::create(&state, &body).await,
            Err(resp) => resp,
        },
        Route::List => students::list(&state).await,
        Route::GetOne(id) => students::get_one(&state, &id).await,
        Route::Delete(id) => students::delete(&state, &id).await,
        Route::Invalid => response::invalid_url(),
    };

    if access_log {
        let size = response.body().size_hint().exact().unwrap_or(0);
        logger::log_response(response.status().as_u16(), size);
    }

    Ok(response)
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size(
    req: &Request<hyper::body::Incoming>,
    max_body_size: u64,
) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(response::payload_too_large())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Accumulate the full request body.
async fn collect_body(
    req: Request<hyper::body::Incoming>,
) -> Result<Bytes, Response<Full<Bytes>>> {
    match req.collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            logger::log_error(&format!("Failed to read request body: {e}"));
            Err(response::bad_request("Failed to read request body"))
        }
    }
}
