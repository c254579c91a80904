use bufr_format::ValueKind;
use bufr_query::{GetOptions, QuerySetConfig, ResultSet};
use bufr_testkit::fixtures::FramesBuilder;

const CONFIG: &str = r#"{
    "targets": [
        {
            "name": "stationId",
            "paths": ["*/SSID"],
            "type": { "bits": 64, "unit": "CCITT IA5" }
        },
        {
            "name": "airTemperature",
            "paths": ["*/TMDB", "*/TMDBST"],
            "type": { "scale": 1, "reference": 0, "bits": 12, "unit": "K" }
        },
        {
            "name": "pressure",
            "paths": ["*/PLEV/PRLC"],
            "type": { "scale": -1, "reference": 0, "bits": 14, "unit": "Pa" },
            "dim_paths": ["*", "*/PLEV"]
        },
        {
            "name": "windGust",
            "paths": ["*/MXGS"],
            "kind": "float32",
            "optional": true
        }
    ],
    "filters": [
        { "bounding": { "variable": "airTemperature", "lowerBound": 200.0, "upperBound": 330.0 } }
    ]
}"#;

fn frames() -> bufr_frame::Frames {
    FramesBuilder::new(4)
        .string(0, "*/SSID", "72403")
        .string(1, "*/SSID", "72501")
        .string(2, "*/SSID", "72403")
        .string(3, "*/SSID", "72518")
        .scalar(0, "*/TMDB", 280.5)
        .scalar(1, "*/TMDBST", 150.0)
        .scalar(2, "*/TMDB", 290.0)
        .scalar(3, "*/TMDB", 300.5)
        .repeated(0, "*/PLEV", "*/PLEV/PRLC", vec![100000.0, 85000.0])
        .repeated(1, "*/PLEV", "*/PLEV/PRLC", vec![100000.0, 92500.0, 85000.0])
        .repeated(2, "*/PLEV", "*/PLEV/PRLC", vec![101000.0])
        .build()
}

#[test]
fn test_config_driven_extraction() {
    let config = QuerySetConfig::from_json(CONFIG).unwrap();
    let rs = ResultSet::from_config(&config, frames()).unwrap();
    assert_eq!(rs.frame_count(), 4);
    assert_eq!(rs.unit("pressure").unwrap(), "Pa");

    let pressure = rs.get("pressure", None, None).unwrap();
    assert_eq!(pressure.kind(), ValueKind::UInt32);
    assert_eq!(pressure.dims(), &[4, 3]);
    assert_eq!(pressure.values().as_u32().unwrap(), &[
        100000,
        85000,
        u32::MAX,
        100000,
        92500,
        85000,
        101000,
        u32::MAX,
        u32::MAX,
        u32::MAX,
        u32::MAX,
        u32::MAX,
    ]);

    let gust = rs.get("windGust", None, None).unwrap();
    assert_eq!(gust.dims(), &[4]);
    assert!((0..4).all(|i| gust.is_missing(i)));
}

#[test]
fn test_bounding_filter_over_all_fields() {
    let config = QuerySetConfig::from_json(CONFIG).unwrap();
    let rs = ResultSet::from_config(&config, frames()).unwrap();

    let mut arrays = rs.get_all(None).unwrap();
    let bounding = config.bounding_filters().next().unwrap();
    let filter = bounding.apply(&mut arrays).unwrap();
    assert_eq!(filter.rows.as_slice(), &[0, 2, 3]);

    assert_eq!(
        arrays["stationId"].values().as_strings().unwrap(),
        &["72403", "72403", "72518"]
    );
    // Slicing keeps the unfiltered inner dimensions.
    assert_eq!(arrays["pressure"].dims(), &[3, 3]);

    // Re-extracting with the computed filter recomputes the inner dimensions.
    let options = GetOptions {
        filter: Some(&filter),
        ..Default::default()
    };
    let pressure = rs.get_with("pressure", &options).unwrap();
    assert_eq!(pressure.dims(), &[3, 2]);
    assert_eq!(pressure.values().as_u32().unwrap(), &[
        100000,
        85000,
        101000,
        u32::MAX,
        u32::MAX,
        u32::MAX,
    ]);

    let temperature = rs
        .get_with(
            "airTemperature",
            &GetOptions {
                type_override: Some("double"),
                ..options
            },
        )
        .unwrap();
    assert_eq!(temperature.values().as_f64().unwrap(), &[280.5, 290.0, 300.5]);
}

#[test]
fn test_grouped_by_station() {
    let config = QuerySetConfig::from_json(CONFIG).unwrap();
    let rs = ResultSet::from_config(&config, frames()).unwrap();

    let temperature = rs.get("airTemperature", Some("stationId"), None).unwrap();
    assert_eq!(temperature.kind(), ValueKind::Float32);
    assert_eq!(temperature.dims(), &[3, 2]);
    assert_eq!(temperature.values().as_f32().unwrap(), &[
        280.5,
        290.0,
        150.0,
        f32::MAX,
        300.5,
        f32::MAX,
    ]);
}
