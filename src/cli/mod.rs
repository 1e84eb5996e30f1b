//! # CLI Module
//!
//! This module provides the command-line interface layer for Spotalyze. It
//! implements the user-facing commands and coordinates between the Spotify
//! client, token management and terminal presentation.
//!
//! ## Command Categories
//!
//! ### Artist Operations
//!
//! - [`search_artists`] - Lists ranked artist suggestions for a free-text query
//! - [`show_artist`] - Resolves a confirmed artist name and prints its
//!   details, optionally together with the artist's top tracks
//!
//! ### Track Operations
//!
//! - [`search_tracks`] - Lists ranked track candidates for a free-text
//!   query; `--pick` analyzes one of them directly
//! - [`analyze_track`] - Prints the audio-feature radar profile and tempo
//!   for a track id
//!
//! ## Data Flow
//!
//! Every command follows the same chain:
//!
//! 1. **Token**: obtain a valid bearer token from the
//!    [`crate::management::TokenProvider`] (cached within its validity
//!    window, exchanged once otherwise)
//! 2. **API Interaction**: issue the read-only Spotify Web API calls
//! 3. **Presentation**: render the results as tables and status lines
//!
//! ## Error Handling Philosophy
//!
//! Failures are converted to user-visible messages at this boundary and
//! never crash the process:
//!
//! - Authentication failures are fatal to the session and exit via the
//!   `error!` macro - retrying with the same credentials cannot succeed
//! - Search failures degrade to zero suggestions plus a warning
//! - Exact-match misses print a short message
//! - Everything else is surfaced as a generic warning with the cause
//!
//! ## Progress and User Experience
//!
//! Network-bound operations display an indicatif spinner so the user sees
//! that a request is in flight. Results are rendered with tabled; status
//! lines use the colored output macros from the crate root.

mod artists;
mod tracks;

pub use artists::search_artists;
pub use artists::show_artist;
pub use tracks::analyze_track;
pub use tracks::search_tracks;
