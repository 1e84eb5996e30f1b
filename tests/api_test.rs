use std::sync::{Mutex, MutexGuard};

use mockito::Matcher;

use spotalyze::management::TokenProvider;
use spotalyze::spotify::{ApiError, auth, search, tracks};
use spotalyze::types::Credentials;
use spotalyze::utils::track_label_mapping;

// The client resolves its endpoints through environment variables, so tests
// that repoint them must not run interleaved.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn env_guard() -> MutexGuard<'static, ()> {
    ENV_LOCK
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn point_api_at(server: &mockito::Server) {
    unsafe { std::env::set_var("SPOTIFY_API_URL", server.url()) };
}

fn point_token_endpoint_at(server: &mockito::Server) {
    unsafe {
        std::env::set_var(
            "SPOTIFY_API_TOKEN_URL",
            format!("{}/api/token", server.url()),
        )
    };
}

fn test_credentials() -> Credentials {
    Credentials {
        client_id: "test_client_id".to_string(),
        client_secret: "test_client_secret".to_string(),
    }
}

const TOKEN_BODY: &str = r#"{
    "access_token": "BQ_test_token",
    "token_type": "Bearer",
    "expires_in": 3600
}"#;

const ARTIST_ITEM: &str = r#"{
    "id": "4Z8W4fKeB5YxbusRsdQVPb",
    "name": "Radiohead",
    "genres": ["art rock", "alternative rock"],
    "external_urls": {"spotify": "https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb"}
}"#;

#[tokio::test]
async fn test_blank_query_makes_no_network_call() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .expect(0)
        .create_async()
        .await;
    point_api_at(&server);

    let artists = search::suggest_artists("token", "", 4).await.unwrap();
    assert!(artists.is_empty());

    let tracks = search::suggest_tracks("token", "   ", 5).await.unwrap();
    assert!(tracks.is_empty());

    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_is_acquired_once_within_validity_window() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/token")
        .match_body(Matcher::UrlEncoded(
            "grant_type".into(),
            "client_credentials".into(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_BODY)
        .expect(1)
        .create_async()
        .await;
    point_token_endpoint_at(&server);

    let mut provider = TokenProvider::new(test_credentials());

    let first = provider.get_valid_token().await.unwrap();
    let second = provider.get_valid_token().await.unwrap();
    let third = provider.get_valid_token().await.unwrap();

    assert_eq!(first, "BQ_test_token");
    assert_eq!(first, second);
    assert_eq!(second, third);

    // exactly one POST for three acquisitions
    mock.assert_async().await;
}

#[tokio::test]
async fn test_token_endpoint_rejection_is_auth_failure() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/api/token")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error": "invalid_client"}"#)
        .create_async()
        .await;
    point_token_endpoint_at(&server);

    let result = auth::request_token(&test_credentials()).await;
    assert!(matches!(result, Err(ApiError::Auth { .. })));
}

#[tokio::test]
async fn test_resolve_artist_returns_case_insensitive_match() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "RADIOHEAD".into()),
            Matcher::UrlEncoded("type".into(), "artist".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"artists": {{"items": [{}]}}}}"#, ARTIST_ITEM))
        .create_async()
        .await;
    point_api_at(&server);

    let artist = search::resolve_artist("token", "RADIOHEAD").await.unwrap();
    assert!(artist.name.eq_ignore_ascii_case("RADIOHEAD"));
    assert_eq!(artist.id, "4Z8W4fKeB5YxbusRsdQVPb");
    assert_eq!(
        artist.external_urls.spotify.as_deref(),
        Some("https://open.spotify.com/artist/4Z8W4fKeB5YxbusRsdQVPb")
    );
}

#[tokio::test]
async fn test_resolve_artist_not_found_on_empty_result() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"artists": {"items": []}}"#)
        .create_async()
        .await;
    point_api_at(&server);

    let result = search::resolve_artist("token", "no such band").await;
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[tokio::test]
async fn test_suggest_tracks_signals_search_failure_on_500() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;
    point_api_at(&server);

    let result = search::suggest_tracks("token", "karma police", 5).await;
    match result {
        Err(ApiError::Search { status }) => assert_eq!(status.as_u16(), 500),
        Ok(_) => panic!("expected SearchFailure, got Ok"),
        Err(e) => panic!("expected SearchFailure, got {:?}", e),
    }
}

#[tokio::test]
async fn test_suggest_tracks_builds_labels_and_mapping() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "get lucky".into()),
            Matcher::UrlEncoded("type".into(), "track".into()),
            Matcher::UrlEncoded("limit".into(), "5".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"tracks": {"items": [
                {"id": "t1", "name": "Get Lucky", "artists": [
                    {"id": "a1", "name": "Daft Punk"},
                    {"id": "a2", "name": "Pharrell Williams"}
                ]},
                {"id": "t2", "name": "Get Lucky (Remix)", "artists": [
                    {"id": "a1", "name": "Daft Punk"}
                ]}
            ]}}"#,
        )
        .create_async()
        .await;
    point_api_at(&server);

    let candidates = search::suggest_tracks("token", "get lucky", 5)
        .await
        .unwrap();

    assert_eq!(candidates.len(), 2);
    assert_eq!(
        candidates[0].label,
        "Get Lucky - Daft Punk, Pharrell Williams"
    );
    assert_eq!(candidates[1].label, "Get Lucky (Remix) - Daft Punk");

    // label round-trips to the id for every candidate
    let mapping = track_label_mapping(&candidates);
    for candidate in &candidates {
        assert_eq!(mapping.get(&candidate.label), Some(&candidate.id));
    }
}

#[tokio::test]
async fn test_artist_search_then_top_tracks_scenario() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _search_mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Radiohead".into()),
            Matcher::UrlEncoded("type".into(), "artist".into()),
            Matcher::UrlEncoded("limit".into(), "4".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(r#"{{"artists": {{"items": [{}]}}}}"#, ARTIST_ITEM))
        .create_async()
        .await;
    let _top_tracks_mock = server
        .mock("GET", "/artists/4Z8W4fKeB5YxbusRsdQVPb/top-tracks")
        .match_query(Matcher::UrlEncoded("country".into(), "US".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"tracks": [
                {"id": "t1", "name": "Creep", "artists": [{"id": "a1", "name": "Radiohead"}]},
                {"id": "t2", "name": "Karma Police", "artists": [{"id": "a1", "name": "Radiohead"}]}
            ]}"#,
        )
        .create_async()
        .await;
    point_api_at(&server);

    let suggestions = search::suggest_artists("token", "Radiohead", 4).await.unwrap();
    assert!(!suggestions.is_empty());
    assert!(suggestions.len() <= 4);

    let top = tracks::top_tracks("token", &suggestions[0].id).await.unwrap();
    assert!(!top.is_empty());
    assert!(top.iter().all(|t| !t.name.is_empty()));
    assert_eq!(top[0].name, "Creep");
}

#[tokio::test]
async fn test_audio_features_happy_path() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/audio-features/t1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "acousticness": 0.011,
                "danceability": 0.52,
                "energy": 0.85,
                "instrumentalness": 0.00034,
                "liveness": 0.129,
                "speechiness": 0.046,
                "valence": 0.324,
                "tempo": 147.96
            }"#,
        )
        .create_async()
        .await;
    point_api_at(&server);

    let features = tracks::audio_features("token", "t1").await.unwrap();
    assert_eq!(features.energy, 0.85);
    assert_eq!(features.tempo, 147.96);
}

#[tokio::test]
async fn test_audio_features_schema_mismatch_on_unexpected_shape() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/audio-features/t1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;
    point_api_at(&server);

    let result = tracks::audio_features("token", "t1").await;
    assert!(matches!(result, Err(ApiError::SchemaMismatch { .. })));
}

#[tokio::test]
async fn test_audio_features_not_found_on_unknown_id() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/audio-features/bogus")
        .match_query(Matcher::Any)
        .with_status(404)
        .create_async()
        .await;
    point_api_at(&server);

    let result = tracks::audio_features("token", "bogus").await;
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

#[tokio::test]
async fn test_audio_analysis_carries_tempo() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/audio-analysis/t1")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"track": {
                "tempo": 147.96,
                "key": 7,
                "mode": 1,
                "time_signature": 4,
                "loudness": -5.8,
                "duration": 263.88
            }}"#,
        )
        .create_async()
        .await;
    point_api_at(&server);

    let analysis = tracks::audio_analysis("token", "t1").await.unwrap();
    assert_eq!(analysis.track.tempo, 147.96);
    assert_eq!(analysis.track.key, Some(7));
}

#[tokio::test]
async fn test_top_tracks_rejected_token_is_auth_failure() {
    let _guard = env_guard();
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/artists/a1/top-tracks")
        .match_query(Matcher::Any)
        .with_status(401)
        .create_async()
        .await;
    point_api_at(&server);

    let result = tracks::top_tracks("stale-token", "a1").await;
    assert!(matches!(result, Err(ApiError::Auth { .. })));
}
