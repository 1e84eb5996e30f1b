use spotalyze::radar::{RADAR_AXES, to_radar_series};
use spotalyze::types::AudioFeatures;

fn create_test_features() -> AudioFeatures {
    AudioFeatures {
        acousticness: 0.011,
        danceability: 0.52,
        energy: 0.85,
        instrumentalness: 0.00034,
        liveness: 0.129,
        speechiness: 0.046,
        valence: 0.324,
        tempo: 147.96,
    }
}

#[test]
fn test_radar_series_has_seven_axes() {
    let series = to_radar_series(&create_test_features());
    assert_eq!(series.len(), 7);
    assert_eq!(series.len(), RADAR_AXES.len());
}

#[test]
fn test_radar_series_axis_order_is_fixed() {
    let series = to_radar_series(&create_test_features());
    let labels: Vec<&str> = series.iter().map(|(label, _)| *label).collect();
    assert_eq!(
        labels,
        vec![
            "Acousticness",
            "Danceability",
            "Energy",
            "Instrumentalness",
            "Liveness",
            "Speechiness",
            "Valence",
        ]
    );

    // Order is stable across calls
    let again = to_radar_series(&create_test_features());
    let labels_again: Vec<&str> = again.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, labels_again);
}

#[test]
fn test_radar_series_forwards_values_unmodified() {
    let features = create_test_features();
    let series = to_radar_series(&features);

    assert_eq!(series[0].1, features.acousticness);
    assert_eq!(series[1].1, features.danceability);
    assert_eq!(series[2].1, features.energy);
    assert_eq!(series[3].1, features.instrumentalness);
    assert_eq!(series[4].1, features.liveness);
    assert_eq!(series[5].1, features.speechiness);
    assert_eq!(series[6].1, features.valence);
}

#[test]
fn test_radar_series_excludes_tempo() {
    // Tempo is unbounded and rendered separately, never as an axis
    let series = to_radar_series(&create_test_features());
    assert!(series.iter().all(|(label, _)| *label != "Tempo"));
    assert!(series.iter().all(|(_, value)| *value <= 1.0));
}
