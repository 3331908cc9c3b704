use super::*;

#[test]
fn test_default_size_is_power_of_two() {
  assert!(DEFAULT_SIZE.is_power_of_two());
  assert_eq!(DEFAULT_SIZE, 512);
}

#[test]
fn test_octant_bits_are_distinct() {
  assert_eq!(X_BIT | Y_BIT | THETA_BIT, 0b111);
  assert_eq!(X_BIT & Y_BIT, 0);
  assert_eq!(Y_BIT & THETA_BIT, 0);
  assert_eq!((X_BIT | Y_BIT | THETA_BIT) as usize + 1, OCTANT_COUNT);
}

/// SIZE=512: half-extents 256, 128, ..., 1 give 9 levels.
#[test]
fn test_max_levels() {
  assert_eq!(max_levels(512), 9);
  assert_eq!(max_levels(2), 1);
  assert_eq!(max_levels(4), 2);
  assert_eq!(max_levels(1024), 10);
}
