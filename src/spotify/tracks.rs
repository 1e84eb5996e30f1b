use std::time::Duration;

use reqwest::{Response, StatusCode};
use tokio::time::sleep;

use crate::{
    config,
    spotify::{ApiError, http_client, parse_json},
    types::{AudioAnalysis, AudioFeatures, TopTracksResponse, Track},
    warning,
};

/// Longest `Retry-After` delay that is honored before giving up.
const MAX_RETRY_AFTER_SECS: u64 = 60;

/// Retrieves the top tracks for an artist from the Spotify Web API.
///
/// The endpoint dictates the ordering, which is treated as relevance-ranked.
/// Results are fixed to a single market (see [`config::spotify_market`],
/// default `US`); no pagination exists for this endpoint.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `artist_id` - Spotify ID of the artist
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Track>)` - The artist's top tracks in endpoint order
/// - `Err(ApiError::NotFound)` - Unknown or malformed artist id
/// - `Err(ApiError::Auth)` - The token was rejected (expired or revoked)
/// - `Err(ApiError::Upstream)` - Any other non-2xx response
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
///
/// # Rate Limiting
///
/// 429 responses are handled by honoring the `Retry-After` header for
/// delays up to 60 seconds and retrying; longer delays are given up on.
pub async fn top_tracks(token: &str, artist_id: &str) -> Result<Vec<Track>, ApiError> {
    let api_url = format!(
        "{uri}/artists/{id}/top-tracks?country={market}",
        uri = &config::spotify_apiurl(),
        id = artist_id,
        market = &config::spotify_market()
    );

    let response = get_resource(&api_url, token, "top-tracks", artist_id).await?;
    let res: TopTracksResponse = parse_json(response, "top-tracks").await?;
    Ok(res.tracks)
}

/// Retrieves the audio-feature vector for a single track.
///
/// One GET per track; the upstream batch endpoint is deliberately not used,
/// matching the reference behavior of fetching each track individually.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `track_id` - Spotify ID of the track
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(AudioFeatures)` - The seven bounded attributes plus tempo
/// - `Err(ApiError::NotFound)` - Unknown or malformed track id
/// - `Err(ApiError::Auth)` - The token was rejected (expired or revoked)
/// - `Err(ApiError::Upstream)` - Any other non-2xx response
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
pub async fn audio_features(token: &str, track_id: &str) -> Result<AudioFeatures, ApiError> {
    let api_url = format!(
        "{uri}/audio-features/{id}",
        uri = &config::spotify_apiurl(),
        id = track_id
    );

    let response = get_resource(&api_url, token, "audio-features", track_id).await?;
    let features: AudioFeatures = parse_json(response, "audio-features").await?;
    Ok(features)
}

/// Retrieves the detailed audio analysis for a single track.
///
/// The track-level record (tempo, key, mode, meter, loudness) is
/// deserialized into typed fields; the bar/beat/segment breakdown the
/// endpoint also carries is passed through untyped in `raw`.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `track_id` - Spotify ID of the track
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(AudioAnalysis)` - The track-level analysis record
/// - `Err(ApiError::NotFound)` - Unknown or malformed track id
/// - `Err(ApiError::Auth)` - The token was rejected (expired or revoked)
/// - `Err(ApiError::Upstream)` - Any other non-2xx response
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
pub async fn audio_analysis(token: &str, track_id: &str) -> Result<AudioAnalysis, ApiError> {
    let api_url = format!(
        "{uri}/audio-analysis/{id}",
        uri = &config::spotify_apiurl(),
        id = track_id
    );

    let response = get_resource(&api_url, token, "audio-analysis", track_id).await?;
    let analysis: AudioAnalysis = parse_json(response, "audio-analysis").await?;
    Ok(analysis)
}

/// One authenticated GET against an id-keyed resource endpoint, with the
/// status classification shared by all fetchers.
async fn get_resource(
    api_url: &str,
    token: &str,
    endpoint: &'static str,
    resource_id: &str,
) -> Result<Response, ApiError> {
    loop {
        let client = http_client()?;
        let response = client.get(api_url).bearer_auth(token).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status {
            StatusCode::NOT_FOUND => {
                return Err(ApiError::NotFound {
                    resource: format!("{} '{}'", endpoint, resource_id),
                });
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ApiError::Auth {
                    reason: format!("{} rejected the access token ({})", endpoint, status),
                });
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(0);

                if retry_after <= MAX_RETRY_AFTER_SECS {
                    sleep(Duration::from_secs(retry_after)).await;
                    continue; // retry
                }

                warning!(
                    "Rate limited on {} for {} seconds. Try again later.",
                    endpoint,
                    retry_after
                );
                return Err(ApiError::Upstream { status, endpoint });
            }
            _ => {
                return Err(ApiError::Upstream { status, endpoint });
            }
        }
    }
}
