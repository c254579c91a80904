use crate::RowSetBuilder;

#[test]
fn test_builder_positions_and_ranges() {
    let mut builder = RowSetBuilder::new();
    assert_eq!(builder.next_pos(), 0);
    builder.push_position(2);
    builder.push_range(4..7);
    builder.push_range(9..9);
    builder.push_position(12);
    assert_eq!(builder.next_pos(), 13);

    let set = builder.build(10);
    assert_eq!(set.span(), 10);
    assert_eq!(set.as_slice(), &[2, 4, 5, 6]);
}

#[test]
#[should_panic]
fn test_builder_rejects_decreasing() {
    let mut builder = RowSetBuilder::new();
    builder.push_position(5);
    builder.push_position(5);
}
