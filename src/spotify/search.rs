use crate::{
    config,
    spotify::{ApiError, http_client, parse_json},
    types::{Artist, SearchArtistsResponse, SearchTracksResponse, TrackCandidate},
    utils,
};

/// Default number of artist suggestions presented to the user.
pub const ARTIST_SUGGESTION_LIMIT: u32 = 4;

/// Default number of track candidates presented to the user.
pub const TRACK_SUGGESTION_LIMIT: u32 = 5;

/// Searches the catalog for artists matching a free-text query.
///
/// Issues one authenticated GET to the search endpoint with `type=artist`
/// and returns the ranked candidate list, bounded to `limit` results.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `query` - Free-text (possibly partial) artist name
/// * `limit` - Maximum number of suggestions to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<Artist>)` - Ranked suggestions, possibly empty
/// - `Err(ApiError::Search)` - Non-2xx response from the search endpoint
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
/// - `Err(ApiError::Request)` - Network error or timeout
///
/// # Blank Queries
///
/// A blank or whitespace-only query returns an empty list immediately
/// without a network call, so callers can invoke this on every input change
/// before the user has typed anything meaningful.
///
/// # Example
///
/// ```
/// let suggestions = suggest_artists(&token, "radioh", ARTIST_SUGGESTION_LIMIT).await?;
/// for artist in &suggestions {
///     println!("{}", artist.name);
/// }
/// ```
pub async fn suggest_artists(
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<Artist>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());

    let client = http_client()?;
    let response = client
        .get(&api_url)
        .query(&[
            ("q", query),
            ("type", "artist"),
            ("limit", &limit.to_string()),
        ])
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Search {
            status: response.status(),
        });
    }

    let res: SearchArtistsResponse = parse_json(response, "search/artist").await?;
    return Ok(res.artists.items);
}

/// Searches the catalog for tracks matching a free-text query.
///
/// Issues one authenticated GET to the search endpoint with `type=track`
/// and maps every hit to a [`TrackCandidate`]: the track id plus a display
/// label of the form `"{name} - {artist1, artist2}"`.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `query` - Free-text (possibly partial) track name
/// * `limit` - Maximum number of candidates to return
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Vec<TrackCandidate>)` - Ranked candidates, possibly empty
/// - `Err(ApiError::Search)` - Non-2xx response from the search endpoint
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
/// - `Err(ApiError::Request)` - Network error or timeout
///
/// # Blank Queries
///
/// A blank or whitespace-only query returns an empty list immediately
/// without a network call.
pub async fn suggest_tracks(
    token: &str,
    query: &str,
    limit: u32,
) -> Result<Vec<TrackCandidate>, ApiError> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }

    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());

    let client = http_client()?;
    let response = client
        .get(&api_url)
        .query(&[
            ("q", query),
            ("type", "track"),
            ("limit", &limit.to_string()),
        ])
        .bearer_auth(token)
        .send()
        .await?;

    if !response.status().is_success() {
        return Err(ApiError::Search {
            status: response.status(),
        });
    }

    let res: SearchTracksResponse = parse_json(response, "search/track").await?;
    return Ok(utils::track_candidates(&res.tracks.items));
}

/// Resolves a confirmed artist name to its best catalog match.
///
/// For the case where the caller already has a full name rather than a
/// partial query: requests a single best match (`limit=1`) and unwraps it.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `name` - The artist name to resolve
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Artist)` - The best match for the name
/// - `Err(ApiError::NotFound)` - The catalog has no match for this name
/// - `Err(ApiError::Search)` - Non-2xx response from the search endpoint
/// - `Err(ApiError::SchemaMismatch)` - Unexpected response shape
/// - `Err(ApiError::Request)` - Network error or timeout
///
/// # Example
///
/// ```
/// match resolve_artist(&token, "Radiohead").await {
///     Ok(artist) => println!("{} ({})", artist.name, artist.id),
///     Err(ApiError::NotFound { .. }) => println!("no such artist"),
///     Err(e) => eprintln!("lookup failed: {}", e),
/// }
/// ```
pub async fn resolve_artist(token: &str, name: &str) -> Result<Artist, ApiError> {
    let mut matches = suggest_artists(token, name, 1).await?;

    if matches.is_empty() {
        return Err(ApiError::NotFound {
            resource: format!("artist '{}'", name),
        });
    }

    Ok(matches.remove(0))
}
