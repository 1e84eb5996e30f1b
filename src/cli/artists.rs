use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    error, info,
    management::TokenProvider,
    spotify::{self, ApiError, search::ARTIST_SUGGESTION_LIMIT},
    types::{Artist, ArtistTableRow, TopTrackTableRow},
    utils, warning,
};

pub async fn search_artists(query: String) {
    let mut token_provider = TokenProvider::from_env();
    let token = match token_provider.get_valid_token().await {
        Ok(t) => t,
        Err(e) => {
            error!("Authentication failed: {}", e);
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Searching artists...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = spotify::search::suggest_artists(&token, &query, ARTIST_SUGGESTION_LIMIT).await;
    pb.finish_and_clear();

    match result {
        Ok(artists) => {
            if artists.is_empty() {
                warning!("No suggestions for '{}'", query);
                return;
            }

            let table_rows: Vec<ArtistTableRow> = artists
                .into_iter()
                .map(|a| ArtistTableRow {
                    name: a.name,
                    genres: utils::join_genres(&a.genres, 3),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(ApiError::Search { status }) => {
            warning!("Error fetching artist data (status {})", status);
        }
        Err(ApiError::Auth { reason }) => {
            error!("Authentication failed: {}", reason);
        }
        Err(e) => {
            warning!("Artist search failed: {}", e);
        }
    }
}

pub async fn show_artist(name: String, with_top_tracks: bool) {
    let mut token_provider = TokenProvider::from_env();
    let token = match token_provider.get_valid_token().await {
        Ok(t) => t,
        Err(e) => {
            error!("Authentication failed: {}", e);
        }
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Resolving artist...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = spotify::search::resolve_artist(&token, &name).await;
    pb.finish_and_clear();

    let artist = match result {
        Ok(artist) => artist,
        Err(ApiError::NotFound { .. }) => {
            info!("No artist with this name exists...");
            return;
        }
        Err(ApiError::Auth { reason }) => {
            error!("Authentication failed: {}", reason);
        }
        Err(e) => {
            warning!("Artist lookup failed: {}", e);
            return;
        }
    };

    print_artist_details(&artist);

    if with_top_tracks {
        show_top_tracks(&token, &artist).await;
    }
}

fn print_artist_details(artist: &Artist) {
    println!("Name:    {}", artist.name);
    println!(
        "Genres:  {}",
        utils::join_genres(&artist.genres, artist.genres.len())
    );
    println!(
        "Spotify: {}",
        artist.external_urls.spotify.as_deref().unwrap_or("-")
    );
}

async fn show_top_tracks(token: &str, artist: &Artist) {
    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching top tracks...");
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let result = spotify::tracks::top_tracks(token, &artist.id).await;
    pb.finish_and_clear();

    match result {
        Ok(tracks) => {
            if tracks.is_empty() {
                warning!("No top tracks listed for {}", artist.name);
                return;
            }

            let table_rows: Vec<TopTrackTableRow> = tracks
                .iter()
                .enumerate()
                .map(|(i, t)| TopTrackTableRow {
                    rank: i + 1,
                    name: t.name.clone(),
                    artists: t
                        .artists
                        .iter()
                        .map(|a| a.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect();

            let table = Table::new(table_rows);
            println!("{}", table);
        }
        Err(ApiError::Auth { reason }) => {
            error!("Authentication failed: {}", reason);
        }
        Err(e) => {
            warning!("Failed to fetch top tracks: {}", e);
        }
    }
}
