use bufr_common::error::ErrorKind;
use bufr_format::TypeInfo;
use bufr_frame::FieldData;
use bufr_testkit::fixtures::{FramesBuilder, dim_paths, repeated_frames, scalar_frames};

use super::{repeated_target, result_set, scalar_target};
use crate::{AssemblyOptions, ResultSet, Target};

#[test]
fn test_unknown_field() {
    let frames = scalar_frames("*/TMDB", &[Some(1.0), Some(2.0)]);
    let rs = result_set(
        vec![scalar_target("dewpoint", "*/TMDP", TypeInfo::float32())],
        frames,
    );

    let err = rs.get("dewpoint", None, None).unwrap_err();
    match err.kind() {
        ErrorKind::UnknownField { field, context } => {
            assert_eq!(field, "dewpoint");
            assert!(context.contains("*/TMDP"));
        }
        kind => panic!("unexpected error {kind}"),
    }

    let err = rs.get("humidity", None, None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::UnknownField { .. }));
    assert_eq!(err.field(), Some("humidity"));
    assert!(rs.unit("humidity").is_err());
}

#[test]
fn test_failed_get_does_not_affect_later_gets() {
    let frames = scalar_frames("*/TMDB", &[Some(1.0), None]);
    let rs = result_set(
        vec![
            scalar_target("temperature", "*/TMDB", TypeInfo::float64()),
            scalar_target("dewpoint", "*/TMDP", TypeInfo::float64()),
        ],
        frames,
    );
    let before = rs.get("temperature", None, None).unwrap();
    assert!(rs.get("dewpoint", None, None).is_err());
    assert!(rs.get("temperature", None, Some("int8")).is_err());
    assert_eq!(rs.get("temperature", None, None).unwrap(), before);
}

#[test]
fn test_unsupported_type_override() {
    let frames = FramesBuilder::new(1).string(0, "*/SSID", "A").build();
    let rs = result_set(
        vec![scalar_target("stationId", "*/SSID", TypeInfo::string())],
        frames,
    );
    let err = rs.get("stationId", None, Some("float")).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::UnsupportedTypeOverride { field, override_type, .. }
            if field == "stationId" && override_type == "float"
    ));
}

#[test]
fn test_mixed_depths_are_inconsistent() {
    let frames = FramesBuilder::new(2)
        .scalar(0, "*/V", 1.0)
        .field(
            1,
            "*/V",
            FieldData::new(vec![2.0], vec![vec![1]], dim_paths(&["*", "*/S"])).unwrap(),
        )
        .build();
    let rs = result_set(vec![scalar_target("v", "*/V", TypeInfo::float64())], frames);
    let err = rs.get("v", None, None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ShapeInconsistency { .. }));
}

#[test]
fn test_string_values_for_numeric_target() {
    let frames = FramesBuilder::new(1).string(0, "*/V", "oops").build();
    let rs = result_set(vec![scalar_target("v", "*/V", TypeInfo::float64())], frames);
    let err = rs.get("v", None, None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ShapeInconsistency { .. }));
}

#[test]
fn test_depth_limit() {
    let dims = ["*", "*/A", "*/A/B"];
    let frames = FramesBuilder::new(1)
        .nested(0, &dims, "*/A/B/V", vec![vec![1], vec![1]], vec![1.0])
        .build();
    let target = Target::parse("v", &["*/A/B/V"], TypeInfo::float64())
        .unwrap()
        .with_dim_paths(&dims)
        .unwrap();
    let rs = result_set(vec![target], frames).with_options(AssemblyOptions { max_depth: 1 });
    let err = rs.get("v", None, None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ShapeInconsistency { .. }));
}

#[test]
fn test_negative_repeat_count() {
    let err = FieldData::from_signed_counts(
        vec![1.0],
        vec![vec![-1]],
        dim_paths(&["*", "*/PLEV"]),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::ShapeInconsistency { .. }));
}

#[test]
fn test_duplicate_target_names() {
    let err = ResultSet::new(
        vec![
            scalar_target("t", "*/TMDB", TypeInfo::float64()),
            scalar_target("t", "*/TMDBST", TypeInfo::float64()),
        ],
        Default::default(),
    )
    .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
}

#[test]
fn test_invalid_group_by() {
    let frames = FramesBuilder::new(2)
        .scalar(0, "*/TMDB", 1.0)
        .scalar(1, "*/TMDB", 2.0)
        .repeated(0, "*/PLEV", "*/PLEV/PRES", vec![1.0, 2.0])
        .repeated(1, "*/PLEV", "*/PLEV/PRES", vec![3.0])
        .repeated(0, "*/WIND", "*/WIND/WSPD", vec![5.0, 6.0])
        .build();
    let rs = result_set(
        vec![
            scalar_target("temperature", "*/TMDB", TypeInfo::float64()),
            repeated_target("pressure", "*/PLEV", "*/PLEV/PRES", TypeInfo::float64()),
            repeated_target("windSpeed", "*/WIND", "*/WIND/WSPD", TypeInfo::float64()),
        ],
        frames,
    );

    // A key repeating below the message cannot group a per-message field.
    let err = rs.get("temperature", Some("pressure"), None).unwrap_err();
    assert!(matches!(
        err.kind(),
        ErrorKind::InvalidGroupBy { field, group_by, .. }
            if field == "temperature" && group_by == "pressure"
    ));

    // Keys repeating along a different sequence.
    let err = rs.get("pressure", Some("windSpeed"), None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidGroupBy { .. }));

    let err = rs.get("pressure", Some("nope"), None).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidGroupBy { .. }));
}

#[test]
fn test_group_by_failure_is_reported_before_override() {
    let frames = repeated_frames("*/PLEV", "*/PLEV/PRES", &[Some(vec![1.0])]);
    let rs = result_set(
        vec![repeated_target(
            "pressure",
            "*/PLEV",
            "*/PLEV/PRES",
            TypeInfo::float64(),
        )],
        frames,
    );
    let err = rs.get("pressure", Some("nope"), Some("int99")).unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidGroupBy { .. }));
}
