
//! Distance and Area quantities with unit-aware construction,
//! conversion, and arithmetic.
//!
//! Every quantity stores a single canonical `f64` magnitude in its
//! dimension's base unit (meters, or square meters), together with a
//! default unit used only for display and for tagging the results of
//! arithmetic. Values can be built from any mix of recognized units
//! and read back in any recognized unit, and multiplying two
//! distances promotes the result to an area.
//!
//! ```
//! use measure::{Distance, UnknownUnit};
//!
//! # fn main() -> Result<(), UnknownUnit> {
//! let d = Distance::builder().value("km", 1.0).value("m", 500.0).build()?;
//! assert_eq!(d.meters(), 1500.0);
//! assert_eq!(d.value_in("km")?, 1.5);
//!
//! let area = Distance::from_unit("m", 2.0)? * Distance::from_unit("m", 3.0)?;
//! assert_eq!(area.sq_meters(), 6.0);
//! assert_eq!(area.default_unit(), "sq_m");
//! # Ok(())
//! # }
//! ```

pub mod dimension;
pub mod error;
pub mod quantity;
pub mod table;

pub use error::UnknownUnit;
pub use quantity::{Area, Distance, Quantity, QuantityBuilder};

/// Shorthand alias for [`Distance`].
pub type D = Distance;

/// Shorthand alias for [`Area`].
pub type A = Area;
