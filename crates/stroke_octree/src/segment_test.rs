use super::*;

const SIZE: u32 = 512;

#[test]
fn test_horizontal_segment() {
  let record = LineSegment::new(0.0, 100.0, 100.0, 100.0).to_record(10, 'H', SIZE);
  assert_eq!(record.mid_x, 50);
  assert_eq!(record.mid_y, 100);
  assert_eq!(record.orientation, 256);
  assert_eq!(record.length, 100);
  assert_eq!(record.weight, 10);
  assert_eq!(record.label, 'H');
}

/// dx == 0 maps to 90°, which normalizes onto exactly SIZE.
#[test]
fn test_vertical_segment_normalizes_to_size() {
  let segment = LineSegment::new(10.0, 0.0, 10.0, 50.0);
  assert_eq!(segment.degrees(), 90);
  let record = segment.to_record(1, 'I', SIZE);
  assert_eq!(record.orientation, 512);
  assert_eq!(record.mid_x, 10);
  assert_eq!(record.mid_y, 25);
  assert_eq!(record.length, 50);
}

#[test]
fn test_diagonals() {
  let rising = LineSegment::new(0.0, 0.0, 100.0, 100.0);
  assert_eq!(rising.degrees(), 45);
  assert_eq!(rising.to_record(1, '/', SIZE).orientation, 384);
  assert_eq!(rising.to_record(1, '/', SIZE).length, 141);

  let falling = LineSegment::new(0.0, 100.0, 100.0, 0.0);
  assert_eq!(falling.degrees(), -45);
  assert_eq!(falling.to_record(1, '\\', SIZE).orientation, 128);
}

/// Degrees truncate toward zero before normalization.
#[test]
fn test_degrees_truncate() {
  // atan(30/52) = 29.98°
  let segment = LineSegment::new(0.0, 0.0, 52.0, 30.0);
  assert_eq!(segment.degrees(), 29);
  assert_eq!(segment.to_record(1, 'a', SIZE).orientation, 338);
}

#[test]
fn test_midpoint_truncates() {
  let record = LineSegment::new(3.0, 4.0, 6.0, 9.0).to_record(1, 'm', SIZE);
  assert_eq!(record.mid_x, 4); // 4.5
  assert_eq!(record.mid_y, 6); // 6.5
}

#[test]
fn test_glyph_records_share_budget() {
  let segments = [
    LineSegment::new(0.0, 0.0, 100.0, 0.0),
    LineSegment::new(0.0, 0.0, 0.0, 100.0),
    LineSegment::new(0.0, 0.0, 100.0, 100.0),
  ];
  let records = glyph_records('A', &segments, 50, SIZE).unwrap();
  assert_eq!(records.len(), 3);
  assert!(records.iter().all(|r| r.weight == 16 && r.label == 'A'));
}

#[test]
fn test_glyph_without_segments_fails() {
  assert_eq!(
    glyph_records('.', &[], 50, SIZE),
    Err(SourceError::NoStrokes('.'))
  );
}

#[test]
fn test_non_finite_segment_is_degenerate() {
  let segments = [LineSegment::new(0.0, f64::NAN, 1.0, 1.0)];
  assert_eq!(
    glyph_records('x', &segments, 50, SIZE),
    Err(SourceError::Degenerate('x'))
  );
}

#[test]
fn test_midpoint_outside_window_is_degenerate() {
  let segments = [
    LineSegment::new(10.0, 10.0, 100.0, 10.0),
    LineSegment::new(600.0, 10.0, 700.0, 20.0),
  ];
  assert_eq!(
    glyph_records('A', &segments, 50, SIZE),
    Err(SourceError::Degenerate('A'))
  );
}

/// Saturated coordinates are rejected instead of reaching the tree.
#[test]
fn test_huge_coordinates_are_degenerate() {
  let segments = [LineSegment::new(-1e10, 10.0, -1e10, 20.0)];
  assert_eq!(
    glyph_records('A', &segments, 50, SIZE),
    Err(SourceError::Degenerate('A'))
  );
}

#[test]
fn test_segment_json_is_array() {
  let segment: LineSegment = serde_json::from_str("[1.0, 2.0, 3.5, 4]").unwrap();
  assert_eq!(segment, LineSegment::new(1.0, 2.0, 3.5, 4.0));
  assert_eq!(
    serde_json::to_string(&segment).unwrap(),
    "[1.0,2.0,3.5,4.0]"
  );
}
