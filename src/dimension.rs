
//! Marker types distinguishing the two supported measurement
//! dimensions at the type level.

use crate::table::{AREA_UNITS, DISTANCE_UNITS};

/// A measurement dimension, tying a quantity to its unit table and to
/// the base unit its canonical value is stored in.
///
/// Only [`Length`] and [`Area`] exist. The one interaction between
/// them, promotion of a length product to an area, is an explicit
/// operator on distance quantities rather than a general dimensional
/// algebra.
pub trait Dimension {
  /// Name used in the debug rendering of quantities of this dimension.
  const NAME: &'static str;

  /// The unit every canonical value of this dimension is stored in.
  const BASE_UNIT: &'static str;

  /// Table mapping each recognized unit name to the amount of the
  /// base unit equal to one of that unit.
  fn units() -> &'static phf::Map<&'static str, f64>;
}

/// Linear distance, canonically in meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Length;

/// Surface area, canonically in square meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Area;

impl Dimension for Length {
  const NAME: &'static str = "Distance";
  const BASE_UNIT: &'static str = "m";

  fn units() -> &'static phf::Map<&'static str, f64> {
    &DISTANCE_UNITS
  }
}

impl Dimension for Area {
  const NAME: &'static str = "Area";
  const BASE_UNIT: &'static str = "sq_m";

  fn units() -> &'static phf::Map<&'static str, f64> {
    &AREA_UNITS
  }
}
