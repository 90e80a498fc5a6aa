
//! The measurement value type shared by [`Distance`] and [`Area`].

use crate::dimension::{self, Dimension};
use crate::error::UnknownUnit;
use crate::table;

use approx::{AbsDiffEq, RelativeEq};
use num::Zero;

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::iter::Sum;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Sub, SubAssign};

/// A measurement in some [`Dimension`], stored canonically in that
/// dimension's base unit and tagged with a default unit.
///
/// The default unit affects display and the tag propagated into the
/// results of arithmetic; it never affects the stored magnitude.
/// Arithmetic results always carry the left operand's default unit,
/// and compound assignment leaves the tag untouched.
pub struct Quantity<D> {
  base: f64,
  default_unit: String,
  _dim: PhantomData<D>,
}

// Implemented by hand so that cloning does not demand anything of the
// marker type `D`.
impl<D> Clone for Quantity<D> {
  fn clone(&self) -> Self {
    Self {
      base: self.base,
      default_unit: self.default_unit.clone(),
      _dim: PhantomData,
    }
  }
}

/// A linear distance, canonically in meters.
pub type Distance = Quantity<dimension::Length>;

/// A surface area, canonically in square meters.
pub type Area = Quantity<dimension::Area>;

/// Builder assembling a [`Quantity`] from an ordered sequence of
/// (unit, magnitude) pairs.
///
/// Pairs accumulate additively, so a value can be given as a
/// composite of several units. The last applied pair's unit becomes
/// the result's default unit, unless an explicit
/// [`default_unit`](QuantityBuilder::default_unit) is set, which
/// takes final precedence.
pub struct QuantityBuilder<D> {
  parts: Vec<(String, f64)>,
  default_unit: Option<String>,
  _dim: PhantomData<D>,
}

impl<D: Dimension> Quantity<D> {
  /// The zero measurement, tagged with the dimension's base unit.
  pub fn new() -> Self {
    Self {
      base: 0.0,
      default_unit: D::BASE_UNIT.to_owned(),
      _dim: PhantomData,
    }
  }

  /// Starts building a quantity from (unit, magnitude) pairs.
  pub fn builder() -> QuantityBuilder<D> {
    QuantityBuilder {
      parts: Vec::new(),
      default_unit: None,
      _dim: PhantomData,
    }
  }

  /// Constructs a quantity of `magnitude` in `unit`, which also
  /// becomes the default unit.
  pub fn from_unit(unit: impl Into<String>, magnitude: f64) -> Result<Self, UnknownUnit> {
    Self::builder().value(unit, magnitude).build()
  }

  /// Constructor which does NOT validate the default unit tag.
  /// Dimensional promotion derives its tag textually from the left
  /// operand and keeps it even if the area table has no such key, in
  /// which case later conversions on that tag fail with
  /// [`UnknownUnit`]. Everything else goes through the builder.
  pub(crate) fn from_raw(base: f64, default_unit: String) -> Self {
    Self { base, default_unit, _dim: PhantomData }
  }

  /// The canonical value, in the dimension's base unit.
  pub fn base_value(&self) -> f64 {
    self.base
  }

  /// The unit used for display and propagated into the results of
  /// arithmetic on this quantity.
  pub fn default_unit(&self) -> &str {
    &self.default_unit
  }

  /// The measurement expressed in `unit`. This is the sole read path
  /// for any named unit, including the quantity's own default unit.
  pub fn value_in(&self, unit: &str) -> Result<f64, UnknownUnit> {
    let factor = table::lookup(D::units(), unit)?;
    Ok(self.base / factor)
  }

  /// Value and unit to render. A default unit absent from the table
  /// can only arise from dimensional promotion; formatting falls back
  /// to the base unit there instead of panicking.
  fn display_parts(&self) -> (f64, &str) {
    match table::lookup(D::units(), &self.default_unit) {
      Ok(factor) => (self.base / factor, self.default_unit.as_str()),
      Err(_) => (self.base, D::BASE_UNIT),
    }
  }
}

impl Distance {
  /// The canonical value in meters.
  pub fn meters(&self) -> f64 {
    self.base
  }
}

impl Area {
  /// The canonical value in square meters.
  pub fn sq_meters(&self) -> f64 {
    self.base
  }
}

impl<D: Dimension> QuantityBuilder<D> {
  /// Adds `magnitude` of `unit` to the value under construction and
  /// marks `unit` as the default-unit candidate.
  pub fn value(mut self, unit: impl Into<String>, magnitude: f64) -> Self {
    self.parts.push((unit.into(), magnitude));
    self
  }

  /// Sets the default unit of the result, overriding the
  /// last-pair-wins rule.
  pub fn default_unit(mut self, unit: impl Into<String>) -> Self {
    self.default_unit = Some(unit.into());
    self
  }

  /// Validates every unit key and produces the finished quantity.
  pub fn build(self) -> Result<Quantity<D>, UnknownUnit> {
    let mut base = 0.0;
    let mut default_unit = D::BASE_UNIT.to_owned();
    for (unit, magnitude) in self.parts {
      let factor = table::lookup(D::units(), &unit)?;
      base += magnitude * factor;
      default_unit = unit;
    }
    if let Some(unit) = self.default_unit {
      table::lookup(D::units(), &unit)?;
      default_unit = unit;
    }
    Ok(Quantity { base, default_unit, _dim: PhantomData })
  }
}

impl<D: Dimension> Default for Quantity<D> {
  fn default() -> Self {
    Self::new()
  }
}

/// Quantities compare by canonical value alone; the default units are
/// deliberately ignored.
impl<D: Dimension> PartialEq for Quantity<D> {
  fn eq(&self, other: &Self) -> bool {
    self.base == other.base
  }
}

impl<D: Dimension> PartialOrd for Quantity<D> {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    self.base.partial_cmp(&other.base)
  }
}

impl<D: Dimension> Add for Quantity<D> {
  type Output = Quantity<D>;

  fn add(self, other: Quantity<D>) -> Quantity<D> {
    Quantity::from_raw(self.base + other.base, self.default_unit)
  }
}

impl<D: Dimension> Add for &Quantity<D> {
  type Output = Quantity<D>;

  fn add(self, other: &Quantity<D>) -> Quantity<D> {
    self.clone() + other.clone()
  }
}

impl<D: Dimension> Sub for Quantity<D> {
  type Output = Quantity<D>;

  fn sub(self, other: Quantity<D>) -> Quantity<D> {
    Quantity::from_raw(self.base - other.base, self.default_unit)
  }
}

impl<D: Dimension> Sub for &Quantity<D> {
  type Output = Quantity<D>;

  fn sub(self, other: &Quantity<D>) -> Quantity<D> {
    self.clone() - other.clone()
  }
}

impl<D: Dimension> AddAssign for Quantity<D> {
  fn add_assign(&mut self, other: Quantity<D>) {
    self.base += other.base;
  }
}

impl<D: Dimension> SubAssign for Quantity<D> {
  fn sub_assign(&mut self, other: Quantity<D>) {
    self.base -= other.base;
  }
}

/// Scalar multiplication and division for the listed right-hand
/// types. Division by a zero scalar is not guarded and follows IEEE
/// semantics, yielding an infinite or NaN canonical value.
macro_rules! impl_scalar_ops {
  ($($t:ty),* $(,)?) => {
    $(
      impl<D: Dimension> Mul<$t> for Quantity<D> {
        type Output = Quantity<D>;

        fn mul(self, scalar: $t) -> Quantity<D> {
          Quantity::from_raw(self.base * scalar as f64, self.default_unit)
        }
      }

      impl<D: Dimension> Div<$t> for Quantity<D> {
        type Output = Quantity<D>;

        fn div(self, scalar: $t) -> Quantity<D> {
          Quantity::from_raw(self.base / scalar as f64, self.default_unit)
        }
      }

      impl<D: Dimension> MulAssign<$t> for Quantity<D> {
        fn mul_assign(&mut self, scalar: $t) {
          self.base *= scalar as f64;
        }
      }

      impl<D: Dimension> DivAssign<$t> for Quantity<D> {
        fn div_assign(&mut self, scalar: $t) {
          self.base /= scalar as f64;
        }
      }
    )*
  };
}

impl_scalar_ops!(f64, f32, i8, i16, i32, i64, u8, u16, u32, u64);

/// Dimensional promotion: the product of two distances is an area.
///
/// The canonical values multiply exactly (meters times meters is
/// square meters), and the result's default unit is `"sq_"` prepended
/// to the left operand's default unit. The derived tag is not checked
/// against the area table; see [`Quantity::value_in`] for the failure
/// mode of a tag with no table entry.
impl Mul for Distance {
  type Output = Area;

  fn mul(self, other: Distance) -> Area {
    Area::from_raw(self.base * other.base, format!("sq_{}", self.default_unit))
  }
}

impl Mul for &Distance {
  type Output = Area;

  fn mul(self, other: &Distance) -> Area {
    self.clone() * other.clone()
  }
}

impl<D: Dimension> Zero for Quantity<D> {
  fn zero() -> Self {
    Quantity::new()
  }

  fn is_zero(&self) -> bool {
    self.base == 0.0
  }
}

/// Summing keeps the first element's default unit, matching the
/// left-operand rule for addition. An empty sum is [`Quantity::new`].
impl<D: Dimension> Sum for Quantity<D> {
  fn sum<I: Iterator<Item = Quantity<D>>>(iter: I) -> Self {
    iter.reduce(Add::add).unwrap_or_else(Quantity::new)
  }
}

impl<D: Dimension> Display for Quantity<D> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let (value, unit) = self.display_parts();
    write!(f, "{} {}", value, unit)
  }
}

impl<D: Dimension> Debug for Quantity<D> {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    let (value, unit) = self.display_parts();
    write!(f, "{}({}={:?})", D::NAME, unit, value)
  }
}

impl<D: Dimension> AbsDiffEq for Quantity<D> {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    <f64 as AbsDiffEq>::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Self, epsilon: f64) -> bool {
    self.base.abs_diff_eq(&other.base, epsilon)
  }
}

impl<D: Dimension> RelativeEq for Quantity<D> {
  fn default_max_relative() -> f64 {
    <f64 as RelativeEq>::default_max_relative()
  }

  fn relative_eq(&self, other: &Self, epsilon: f64, max_relative: f64) -> bool {
    self.base.relative_eq(&other.base, epsilon, max_relative)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::table::DISTANCE_UNITS;

  use approx::assert_abs_diff_eq;

  fn m(value: f64) -> Distance {
    Distance::from_unit("m", value).unwrap()
  }

  fn km(value: f64) -> Distance {
    Distance::from_unit("km", value).unwrap()
  }

  #[test]
  fn test_new_is_zero_in_base_unit() {
    let d = Distance::new();
    assert_eq!(d.meters(), 0.0);
    assert_eq!(d.default_unit(), "m");
    let a = Area::new();
    assert_eq!(a.sq_meters(), 0.0);
    assert_eq!(a.default_unit(), "sq_m");
  }

  #[test]
  fn test_round_trip_through_every_distance_unit() {
    for &unit in DISTANCE_UNITS.keys() {
      let d = Distance::from_unit(unit, 7.25).unwrap();
      assert_abs_diff_eq!(d.value_in(unit).unwrap(), 7.25, epsilon = 1e-12);
      assert_eq!(d.default_unit(), unit);
    }
  }

  #[test]
  fn test_cross_unit_consistency() {
    assert_eq!(km(1.0).value_in("m").unwrap(), 1000.0);
    assert_eq!(Distance::from_unit("ft", 1.0).unwrap().value_in("m").unwrap(), 0.3048);
    assert_abs_diff_eq!(
      Distance::from_unit("mi", 1.0).unwrap().value_in("km").unwrap(),
      1.609344,
      epsilon = 1e-12
    );
  }

  #[test]
  fn test_additive_accumulation() {
    let d = Distance::builder()
      .value("m", 1.0)
      .value("km", 1.0)
      .build()
      .unwrap();
    assert_eq!(d.meters(), 1001.0);
    // Last applied pair wins as the default unit.
    assert_eq!(d.default_unit(), "km");
  }

  #[test]
  fn test_explicit_default_unit_takes_precedence() {
    let d = Distance::builder()
      .value("km", 2.0)
      .default_unit("ft")
      .build()
      .unwrap();
    assert_eq!(d.meters(), 2000.0);
    assert_eq!(d.default_unit(), "ft");
  }

  #[test]
  fn test_unknown_unit_at_construction() {
    let err = Distance::from_unit("parsec", 1.0).unwrap_err();
    assert_eq!(err, UnknownUnit::new("parsec"));
    let err = Distance::builder()
      .value("m", 1.0)
      .default_unit("parsec")
      .build()
      .unwrap_err();
    assert_eq!(err, UnknownUnit::new("parsec"));
  }

  #[test]
  fn test_unknown_unit_at_conversion() {
    let err = m(1.0).value_in("parsec").unwrap_err();
    assert_eq!(err, UnknownUnit::new("parsec"));
  }

  #[test]
  fn test_add_and_sub() {
    let d = km(1.0) + m(2.0);
    assert_eq!(d.meters(), 1002.0);
    assert_eq!(d.default_unit(), "km");
    let d = m(1.0) - m(5.0);
    assert_eq!(d.meters(), -4.0);
    let d = &km(1.0) - &m(500.0);
    assert_eq!(d.meters(), 500.0);
    assert_eq!(d.default_unit(), "km");
  }

  #[test]
  fn test_arithmetic_identity() {
    let d = km(3.0);
    assert_eq!(d.clone() + Distance::new(), d);
    assert!((d.clone() - d).is_zero());
  }

  #[test]
  fn test_dimensional_promotion() {
    let a = m(2.0) * m(3.0);
    assert_eq!(a.sq_meters(), 6.0);
    assert_eq!(a.default_unit(), "sq_m");

    let a = km(2.0) * km(3.0);
    assert_eq!(a.sq_meters(), 6000000.0);
    assert_eq!(a.default_unit(), "sq_km");
    assert_eq!(a.value_in("sq_km").unwrap(), 6.0);

    let a = &m(2.0) * &km(1.0);
    assert_eq!(a.sq_meters(), 2000.0);
    assert_eq!(a.default_unit(), "sq_m");
  }

  #[test]
  fn test_derived_default_unit_outside_table() {
    // Promotion derives its tag textually, so a tag with no table
    // entry stays on the value: conversion reports it, formatting
    // falls back to the base unit.
    let a = Area::from_raw(2.0, "sq_parsec".to_owned());
    assert_eq!(a.value_in("sq_parsec").unwrap_err(), UnknownUnit::new("sq_parsec"));
    assert_eq!(a.to_string(), "2 sq_m");
    assert_eq!(format!("{:?}", a), "Area(sq_m=2.0)");
  }

  #[test]
  fn test_scalar_scaling() {
    let d: Distance = m(10.0) * 2;
    assert_eq!(d.meters(), 20.0);
    assert_eq!(d.default_unit(), "m");
    let d: Distance = m(10.0) / 2;
    assert_eq!(d.meters(), 5.0);
    let d: Distance = m(10.0) * 2.5;
    assert_eq!(d.meters(), 25.0);
    let a: Area = Area::from_unit("sq_km", 3.0).unwrap() * 2.0;
    assert_eq!(a.value_in("sq_km").unwrap(), 6.0);
    assert_eq!(a.default_unit(), "sq_km");
  }

  #[test]
  fn test_division_by_zero_scalar() {
    let d: Distance = m(10.0) / 0.0;
    assert_eq!(d.meters(), f64::INFINITY);
    let d: Distance = m(-10.0) / 0;
    assert_eq!(d.meters(), f64::NEG_INFINITY);
  }

  #[test]
  fn test_comparison_ignores_default_unit() {
    assert!(km(1.0) > m(500.0));
    assert!(m(500.0) < km(1.0));
    assert_eq!(km(1.0), m(1000.0));
    assert!(km(1.0) >= m(1000.0));
    assert_ne!(m(1.0), m(2.0));
  }

  #[test]
  fn test_compound_assignment() {
    let mut d = km(1.0);
    d += m(5.0);
    assert_eq!(d.meters(), 1005.0);
    assert_eq!(d.default_unit(), "km");
    d -= m(5.0);
    assert_eq!(d.meters(), 1000.0);
    d *= 2.0;
    assert_eq!(d.meters(), 2000.0);
    d /= 4;
    assert_eq!(d.meters(), 500.0);
    assert_eq!(d.default_unit(), "km");
  }

  #[test]
  fn test_zero_check() {
    assert!(Distance::new().is_zero());
    assert!(Area::new().is_zero());
    assert!(Distance::zero().is_zero());
    assert!(!m(0.001).is_zero());
    assert!(!m(-1.0).is_zero());
  }

  #[test]
  fn test_sum() {
    let total: Distance = vec![km(1.0), m(250.0), m(250.0)].into_iter().sum();
    assert_eq!(total.meters(), 1500.0);
    assert_eq!(total.default_unit(), "km");
    let empty: Distance = std::iter::empty().sum();
    assert!(empty.is_zero());
  }

  #[test]
  fn test_display() {
    assert_eq!(m(1.5).to_string(), "1.5 m");
    assert_eq!(km(5.0).to_string(), "5 km");
    let d = Distance::builder()
      .value("m", 1500.0)
      .default_unit("km")
      .build()
      .unwrap();
    assert_eq!(d.to_string(), "1.5 km");
    assert_eq!(Area::from_unit("sq_ft", 2.0).unwrap().to_string(), "2 sq_ft");
  }

  #[test]
  fn test_debug() {
    assert_eq!(format!("{:?}", km(5.0)), "Distance(km=5.0)");
    assert_eq!(format!("{:?}", m(2.0) * m(3.0)), "Area(sq_m=6.0)");
  }

  #[test]
  fn test_approx_eq() {
    let a = m(0.1) + m(0.2);
    assert_abs_diff_eq!(a, m(0.3), epsilon = 1e-12);
  }

  #[test]
  fn test_default_is_new() {
    assert_eq!(Distance::default(), Distance::new());
    assert_eq!(Distance::default().default_unit(), "m");
  }
}
