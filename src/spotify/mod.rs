//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API used by
//! Spotalyze: app-only authentication, catalog search and per-track audio
//! metadata retrieval. It is the only place in the application that talks
//! to the network.
//!
//! ## Architecture
//!
//! Each submodule handles one domain of Spotify API functionality:
//!
//! ```text
//! Application Layer (CLI)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (client-credentials grant)
//!     ├── Search Operations (artists, tracks)
//!     └── Resource Fetchers (top tracks, audio features, audio analysis)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Authentication Strategy
//!
//! The module uses the OAuth 2.0 client-credentials grant: the application's
//! id/secret pair is exchanged for an app-only bearer token. No end user is
//! involved, no refresh token exists; an expired token is simply replaced by
//! a fresh exchange. Token lifecycle and caching live in
//! [`crate::management::TokenProvider`] — functions in this module take the
//! bearer string they should present.
//!
//! ## Error Handling
//!
//! All functions return [`ApiError`], which classifies failures the way the
//! CLI needs to react to them:
//!
//! - [`ApiError::Auth`] - credential or token-endpoint failures, and 401/403
//!   on resource calls. Fatal to the session; never retried.
//! - [`ApiError::Search`] - non-2xx from the search endpoint. Recoverable;
//!   the CLI shows zero suggestions and a warning.
//! - [`ApiError::NotFound`] - exact-match lookup with no result, or 404 on
//!   an id-keyed resource endpoint.
//! - [`ApiError::SchemaMismatch`] - the response body did not match the
//!   expected shape. Raised instead of silently returning partial data.
//! - [`ApiError::Upstream`] - any other non-2xx from a resource endpoint.
//! - [`ApiError::Request`] - transport failures (connect, timeout, TLS).
//!
//! Resource fetchers honor `Retry-After` on 429 responses for delays up to
//! 60 seconds; the token and search endpoints are never retried.
//!
//! ## API Coverage
//!
//! - `POST /api/token` (accounts host) - client-credentials exchange
//! - `GET /search` - artist and track search
//! - `GET /artists/{id}/top-tracks` - top tracks for one market
//! - `GET /audio-features/{id}` - the seven-attribute feature vector
//! - `GET /audio-analysis/{id}` - detailed track analysis (tempo etc.)
//!
//! ## Dependencies
//!
//! - **reqwest** - HTTP client with JSON support and async capabilities
//! - **serde_json** - JSON deserialization of API payloads
//! - **chrono** - timestamps for token expiry arithmetic
//! - **thiserror** - the error taxonomy above

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

pub mod auth;
pub mod search;
pub mod tracks;

/// Upper bound for any single request. The reference behavior had no
/// timeout at all, which turns a slow upstream into a hung session.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Classified failures of the Spotify client.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("authentication failed: {reason}")]
    Auth { reason: String },

    #[error("search request failed with status {status}")]
    Search { status: StatusCode },

    #[error("not found: {resource}")]
    NotFound { resource: String },

    #[error("unexpected response shape from {endpoint}")]
    SchemaMismatch { endpoint: &'static str },

    #[error("{endpoint} returned status {status}")]
    Upstream {
        status: StatusCode,
        endpoint: &'static str,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Builds the HTTP client every API call goes through.
///
/// A fresh client per call keeps the call sites free of shared state; the
/// timeout applies to the whole request including body download.
pub(crate) fn http_client() -> Result<Client, ApiError> {
    let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
    Ok(client)
}

/// Deserializes a response body, mapping decode failures to
/// [`ApiError::SchemaMismatch`] so malformed payloads never surface as
/// partial data.
pub(crate) async fn parse_json<T: DeserializeOwned>(
    response: Response,
    endpoint: &'static str,
) -> Result<T, ApiError> {
    response.json::<T>().await.map_err(|err| {
        if err.is_decode() {
            ApiError::SchemaMismatch { endpoint }
        } else {
            ApiError::Request(err)
        }
    })
}
