
//! The fixed unit tables and the validated lookup over them.
//!
//! Each table maps a unit name to the amount of the base unit equal
//! to one of that unit (meters for distance units, square meters for
//! area units). The tables are compile-time constants and are never
//! mutated, so they are safe to read from any thread.

use crate::error::UnknownUnit;

use phf::phf_map;

/// Scale factors from each recognized distance unit to meters.
pub static DISTANCE_UNITS: phf::Map<&'static str, f64> = phf_map! {
  "m" => 1.0,
  "km" => 1000.0,
  "mi" => 1609.344,
  "ft" => 0.3048,
  "yd" => 0.9144,
  "nm" => 1852.0, // Nautical mile
};

/// Scale factors from each recognized area unit to square meters.
///
/// Each factor is specified independently rather than derived from
/// the distance table, though numerically each equals the square of
/// the corresponding linear factor.
pub static AREA_UNITS: phf::Map<&'static str, f64> = phf_map! {
  "sq_m" => 1.0,
  "sq_km" => 1000000.0,
  "sq_mi" => 2589988.110336,
  "sq_ft" => 0.09290304,
  "sq_yd" => 0.83612736,
  "sq_nm" => 3429904.0,
};

/// Looks up the scale factor for `unit` in `table`, reporting the
/// offending key on failure.
pub fn lookup(table: &phf::Map<&'static str, f64>, unit: &str) -> Result<f64, UnknownUnit> {
  table.get(unit).copied().ok_or_else(|| UnknownUnit::new(unit))
}
