//! Maps an audio-feature vector onto the fixed radar-chart axis set.
//!
//! The axis order is fixed so repeated renders of different tracks stay
//! visually comparable. This module is pure presentation shaping; it does no
//! I/O and cannot fail.

use crate::types::AudioFeatures;

/// The radar axes, in render order.
pub const RADAR_AXES: [&str; 7] = [
    "Acousticness",
    "Danceability",
    "Energy",
    "Instrumentalness",
    "Liveness",
    "Speechiness",
    "Valence",
];

/// Returns the `(axis label, value)` pairs for a feature vector, one per
/// axis in [`RADAR_AXES`] order. Values are forwarded unmodified; tempo is
/// not an axis (it is unbounded and rendered separately).
pub fn to_radar_series(features: &AudioFeatures) -> Vec<(&'static str, f64)> {
    vec![
        (RADAR_AXES[0], features.acousticness),
        (RADAR_AXES[1], features.danceability),
        (RADAR_AXES[2], features.energy),
        (RADAR_AXES[3], features.instrumentalness),
        (RADAR_AXES[4], features.liveness),
        (RADAR_AXES[5], features.speechiness),
        (RADAR_AXES[6], features.valence),
    ]
}
