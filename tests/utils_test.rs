use spotalyze::types::{Track, TrackArtist};
use spotalyze::utils::*;

// Helper function to create a test track
fn create_test_track(id: &str, name: &str, artist_names: &[&str]) -> Track {
    Track {
        id: id.to_string(),
        name: name.to_string(),
        artists: artist_names
            .iter()
            .enumerate()
            .map(|(i, artist_name)| TrackArtist {
                id: format!("{}_artist_{}", id, i),
                name: artist_name.to_string(),
            })
            .collect(),
    }
}

#[test]
fn test_format_track_label_single_artist() {
    let track = create_test_track("t1", "Karma Police", &["Radiohead"]);
    assert_eq!(format_track_label(&track), "Karma Police - Radiohead");
}

#[test]
fn test_format_track_label_multiple_artists() {
    let track = create_test_track("t2", "Get Lucky", &["Daft Punk", "Pharrell Williams"]);
    assert_eq!(
        format_track_label(&track),
        "Get Lucky - Daft Punk, Pharrell Williams"
    );
}

#[test]
fn test_track_candidates_preserve_order_and_ids() {
    let tracks = vec![
        create_test_track("t1", "Track One", &["Artist A"]),
        create_test_track("t2", "Track Two", &["Artist B"]),
        create_test_track("t3", "Track Three", &["Artist C"]),
    ];

    let candidates = track_candidates(&tracks);

    assert_eq!(candidates.len(), 3);
    let ids: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["t1", "t2", "t3"]);
    assert_eq!(candidates[0].label, "Track One - Artist A");
}

#[test]
fn test_track_label_mapping_round_trip() {
    // Every candidate's label must map back to its id
    let tracks = vec![
        create_test_track("t1", "Track One", &["Artist A"]),
        create_test_track("t2", "Track Two", &["Artist B", "Artist C"]),
    ];

    let candidates = track_candidates(&tracks);
    let mapping = track_label_mapping(&candidates);

    for candidate in &candidates {
        assert_eq!(mapping.get(&candidate.label), Some(&candidate.id));
    }
}

#[test]
fn test_track_label_mapping_collision_last_wins() {
    // Two tracks with the same name and artist produce the same label
    let tracks = vec![
        create_test_track("t1", "Same Song", &["Same Artist"]),
        Track {
            id: "t2".to_string(),
            name: "Same Song".to_string(),
            artists: vec![TrackArtist {
                id: "x".to_string(),
                name: "Same Artist".to_string(),
            }],
        },
    ];

    let candidates = track_candidates(&tracks);
    let mapping = track_label_mapping(&candidates);

    assert_eq!(mapping.len(), 1);
    assert_eq!(
        mapping.get("Same Song - Same Artist"),
        Some(&"t2".to_string())
    );
}

#[test]
fn test_feature_bar_bounds() {
    // Zero fills nothing, one fills everything
    assert_eq!(feature_bar(0.0, 10), "░".repeat(10));
    assert_eq!(feature_bar(1.0, 10), "█".repeat(10));

    // Output always has exactly `width` glyphs
    let bar = feature_bar(0.5, 10);
    assert_eq!(bar.chars().count(), 10);
    assert_eq!(bar.chars().filter(|c| *c == '█').count(), 5);
}

#[test]
fn test_feature_bar_clamps_out_of_range() {
    assert_eq!(feature_bar(-0.5, 8), "░".repeat(8));
    assert_eq!(feature_bar(1.5, 8), "█".repeat(8));
}

#[test]
fn test_join_genres_truncates() {
    let genres = vec![
        "art rock".to_string(),
        "alternative".to_string(),
        "permanent wave".to_string(),
        "oxford indie".to_string(),
    ];

    assert_eq!(
        join_genres(&genres, 3),
        "art rock, alternative, permanent wave"
    );
    assert_eq!(join_genres(&genres, genres.len()).matches(", ").count(), 3);
    assert_eq!(join_genres(&[], 3), "");
}
