use std::collections::HashMap;

use crate::types::{Track, TrackCandidate};

pub fn format_track_label(track: &Track) -> String {
    let artist_names = track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{} - {}", track.name, artist_names)
}

pub fn track_candidates(tracks: &[Track]) -> Vec<TrackCandidate> {
    tracks
        .iter()
        .map(|track| TrackCandidate {
            id: track.id.clone(),
            label: format_track_label(track),
        })
        .collect()
}

// Label-keyed view of a candidate set for display layers. Labels are not
// guaranteed unique; on collision the last candidate wins.
pub fn track_label_mapping(candidates: &[TrackCandidate]) -> HashMap<String, String> {
    let mut mapping = HashMap::new();
    for candidate in candidates {
        mapping.insert(candidate.label.clone(), candidate.id.clone());
    }
    mapping
}

pub fn feature_bar(value: f64, width: usize) -> String {
    let clamped = value.clamp(0.0, 1.0);
    let filled = (clamped * width as f64).round() as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(width.saturating_sub(filled)));
    bar
}

pub fn join_genres(genres: &[String], max: usize) -> String {
    genres
        .iter()
        .take(max)
        .cloned()
        .collect::<Vec<_>>()
        .join(", ")
}
