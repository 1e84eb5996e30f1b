use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};

use crate::{
    config,
    spotify::{ApiError, http_client, parse_json},
    types::{Credentials, Token},
};

/// Exchanges client credentials for an app-only access token.
///
/// Posts a client-credentials grant to the token endpoint with the id/secret
/// pair encoded as a Basic authorization header. This is the only
/// authentication flow the application uses; no end user is involved and no
/// refresh token is issued.
///
/// # Arguments
///
/// * `credentials` - The application's client id and client secret
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Bearer token with expiry metadata and the acquisition
///   timestamp filled in
/// - `Err(ApiError::Auth)` - The token endpoint rejected the request
/// - `Err(ApiError::SchemaMismatch)` - The endpoint answered 2xx with an
///   unexpected body
/// - `Err(ApiError::Request)` - Network error or timeout
///
/// # Error Handling
///
/// A non-success response is fatal to the session: bad credentials will not
/// become good ones by retrying, so no retry is attempted here. Callers are
/// expected to surface the failure and stop.
///
/// # Example
///
/// ```
/// let credentials = Credentials {
///     client_id: config::spotify_client_id(),
///     client_secret: config::spotify_client_secret(),
/// };
/// let token = request_token(&credentials).await?;
/// println!("token expires in {} seconds", token.expires_in);
/// ```
pub async fn request_token(credentials: &Credentials) -> Result<Token, ApiError> {
    let auth = STANDARD.encode(format!(
        "{}:{}",
        credentials.client_id, credentials.client_secret
    ));

    let client = http_client()?;
    let response = client
        .post(&config::spotify_apitoken_url())
        .header(AUTHORIZATION, format!("Basic {}", auth))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::Auth {
            reason: format!("token endpoint returned {}: {}", status, body),
        });
    }

    let mut token: Token = parse_json(response, "token").await?;
    token.obtained_at = Utc::now().timestamp() as u64;
    Ok(token)
}
