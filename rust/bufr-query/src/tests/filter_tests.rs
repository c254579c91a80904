use bufr_common::error::ErrorKind;
use bufr_format::TypeInfo;
use bufr_row_set::RowSet;
use bufr_testkit::fixtures::FramesBuilder;

use super::{repeated_target, result_set, scalar_target};
use crate::{GetOptions, ResultSet, RowFilter};

const FM: f64 = f64::MAX;

fn observations() -> ResultSet {
    let frames = FramesBuilder::new(6)
        .scalar(0, "*/TMDB", 1.0)
        .scalar(1, "*/TMDB", 2.0)
        .scalar(2, "*/TMDB", 3.0)
        .scalar(3, "*/TMDB", 4.0)
        .scalar(4, "*/TMDB", 5.0)
        .scalar(5, "*/TMDB", 6.0)
        .repeated(0, "*/PLEV", "*/PLEV/PRES", vec![10.0, 11.0, 12.0])
        .repeated(2, "*/PLEV", "*/PLEV/PRES", vec![30.0])
        .repeated(3, "*/PLEV", "*/PLEV/PRES", vec![40.0, 41.0])
        .repeated(5, "*/PLEV", "*/PLEV/PRES", vec![60.0])
        .build();
    result_set(
        vec![
            scalar_target("temperature", "*/TMDB", TypeInfo::float64()),
            repeated_target("pressure", "*/PLEV", "*/PLEV/PRES", TypeInfo::float64()),
        ],
        frames,
    )
}

fn get_filtered(rs: &ResultSet, field: &str, filter: &RowFilter) -> bufr_array::TypedArray {
    rs.get_with(
        field,
        &GetOptions {
            filter: Some(filter),
            ..Default::default()
        },
    )
    .unwrap()
}

#[test]
fn test_filter_keeps_selected_rows_in_order() {
    let rs = observations();
    let filter = RowFilter::frames(RowSet::from_positions(6, [0usize, 2, 3, 5].into_iter()));
    let array = get_filtered(&rs, "temperature", &filter);
    assert_eq!(array.dims(), &[4]);
    assert_eq!(array.values().as_f64().unwrap(), &[1.0, 3.0, 4.0, 6.0]);
}

#[test]
fn test_filter_of_subset() {
    let rs = observations();
    let outer = RowSet::from_positions(6, [0usize, 2, 3, 5].into_iter());
    let inner = RowSet::from_positions(6, [2usize, 5].into_iter());
    assert!(inner.is_subset_of(&outer));

    let outer_array = get_filtered(&rs, "temperature", &RowFilter::frames(outer.clone()));
    let inner_array = get_filtered(&rs, "temperature", &RowFilter::frames(inner.clone()));
    assert_eq!(inner_array.values().as_f64().unwrap(), &[3.0, 6.0]);

    // The subset taken from the already filtered output selects the same rows.
    let relative = outer.relative_to(&inner).unwrap();
    let sliced = outer_array.slice_rows(relative.as_slice()).unwrap();
    assert_eq!(sliced, inner_array);
}

#[test]
fn test_filter_shrinks_inner_dims() {
    let rs = observations();
    let filter = RowFilter::frames(RowSet::from_positions(6, [2usize, 3].into_iter()));
    let array = get_filtered(&rs, "pressure", &filter);
    assert_eq!(array.dims(), &[2, 2]);
    assert_eq!(array.values().as_f64().unwrap(), &[30.0, FM, 40.0, 41.0]);

    let unfiltered = rs.get("pressure", None, None).unwrap();
    assert_eq!(unfiltered.dims(), &[6, 3]);
}

#[test]
fn test_filtered_fields_stay_aligned() {
    let rs = observations();
    let filter = RowFilter::frames(RowSet::from_positions(6, [1usize, 3, 4].into_iter()));
    let temperature = get_filtered(&rs, "temperature", &filter);
    let pressure = get_filtered(&rs, "pressure", &filter);
    assert_eq!(temperature.row_count(), pressure.row_count());

    let temperature = temperature.values().as_f64().unwrap();
    let first_pressure = |row: usize| pressure.row_f64(row).next().flatten();
    // Frame 1 has no pressure, frame 3 has 40 and 41, frame 4 has none.
    assert_eq!(temperature, &[2.0, 4.0, 5.0]);
    assert_eq!(first_pressure(0), None);
    assert_eq!(first_pressure(1), Some(40.0));
    assert_eq!(first_pressure(2), None);
}

#[test]
fn test_full_and_empty_filters() {
    let rs = observations();
    let full = get_filtered(&rs, "pressure", &RowFilter::frames(RowSet::full(6)));
    assert_eq!(full, rs.get("pressure", None, None).unwrap());

    let empty = get_filtered(&rs, "pressure", &RowFilter::frames(RowSet::empty(6)));
    assert_eq!(empty.dims(), &[0, 1]);
    assert!(empty.is_empty());
}

#[test]
fn test_filter_span_must_match_frames() {
    let rs = observations();
    let filter = RowFilter::frames(RowSet::full(4));
    let err = rs
        .get_with(
            "temperature",
            &GetOptions {
                filter: Some(&filter),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
}

#[test]
fn test_row_filter_intersection() {
    let a = RowFilter::frames(RowSet::from_positions(6, [0usize, 1, 2].into_iter()));
    let b = RowFilter::frames(RowSet::from_positions(6, [1usize, 2, 3].into_iter()));
    assert_eq!(a.intersect(&b).unwrap().rows.as_slice(), &[1, 2]);

    let groups = RowFilter::groups("satellite", RowSet::full(6));
    assert!(a.intersect(&groups).is_none());
    assert!(groups.is_full());
}
