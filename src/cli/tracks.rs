use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenProvider,
    radar,
    spotify::{self, ApiError, search::TRACK_SUGGESTION_LIMIT},
    types::{FeatureTableRow, TrackTableRow},
    utils, warning,
};

const BAR_WIDTH: usize = 20;

pub async fn search_tracks(query: String, pick: Option<usize>) {
    let mut token_provider = TokenProvider::from_env();
    let token = match token_provider.get_valid_token().await {
        Ok(t) => t,
        Err(e) => {
            error!("Authentication failed: {}", e);
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = spotify::search::suggest_tracks(&token, &query, TRACK_SUGGESTION_LIMIT).await;
    pb.finish_and_clear();

    let candidates = match result {
        Ok(candidates) => candidates,
        Err(ApiError::Search { status }) => {
            warning!("Error fetching track data (status {})", status);
            return;
        }
        Err(ApiError::Auth { reason }) => {
            error!("Authentication failed: {}", reason);
        }
        Err(e) => {
            warning!("Track search failed: {}", e);
            return;
        }
    };

    if candidates.is_empty() {
        warning!("No suggestions for '{}'", query);
        return;
    }

    match pick {
        // analyze the selected candidate instead of listing
        Some(selection) => {
            if selection == 0 || selection > candidates.len() {
                warning!(
                    "--pick {} is out of range (1-{})",
                    selection,
                    candidates.len()
                );
                return;
            }

            let candidate = &candidates[selection - 1];
            info!("Selected: {} ({})", candidate.label, candidate.id);
            analyze(&token, &candidate.id).await;
        }
        None => {
            let table_rows: Vec<TrackTableRow> = candidates
                .iter()
                .enumerate()
                .map(|(i, c)| TrackTableRow {
                    index: i + 1,
                    track: c.label.clone(),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
            info!("Re-run with --pick <#> to analyze a candidate.");
        }
    }
}

pub async fn analyze_track(track_id: String) {
    let mut token_provider = TokenProvider::from_env();
    let token = match token_provider.get_valid_token().await {
        Ok(t) => t,
        Err(e) => {
            error!("Authentication failed: {}", e);
        }
    };

    analyze(&token, &track_id).await;
}

async fn analyze(token: &str, track_id: &str) {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching audio features...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let features = spotify::tracks::audio_features(token, track_id).await;
    pb.set_message("Fetching audio analysis...");
    let analysis = spotify::tracks::audio_analysis(token, track_id).await;
    pb.finish_and_clear();

    let features = match features {
        Ok(features) => features,
        Err(ApiError::NotFound { resource }) => {
            warning!("Not found: {}", resource);
            return;
        }
        Err(ApiError::Auth { reason }) => {
            error!("Authentication failed: {}", reason);
        }
        Err(e) => {
            warning!("Failed to fetch audio features: {}", e);
            return;
        }
    };

    let series = radar::to_radar_series(&features);
    let table_rows: Vec<FeatureTableRow> = series
        .iter()
        .map(|(axis, value)| FeatureTableRow {
            attribute: axis.to_string(),
            value: format!("{:.3}", value),
            profile: utils::feature_bar(*value, BAR_WIDTH),
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);

    // tempo comes from the analysis endpoint; the feature vector carries
    // its own copy as a fallback
    match analysis {
        Ok(analysis) => {
            info!("Tempo: {:.1} BPM", analysis.track.tempo);
        }
        Err(e) => {
            warning!("Audio analysis unavailable ({})", e);
            info!("Tempo: {:.1} BPM", features.tempo);
        }
    }
}
