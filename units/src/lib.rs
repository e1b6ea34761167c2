//! Physical quantities used at the edges of the system (configuration and
//! reporting), built on `uom`.
//!
//! The projectors themselves work in voxel units with the plain `f32`
//! aliases from [`todo`].

pub mod todo;

pub use uom;
pub use float_eq;

pub use uom::si::f32::Length;

mod units {
  pub use uom::si::length::{millimeter, centimeter};
}

// Making values from float literals seems to be very long-winded, so provide
// some pithily-named convenience constructors.

/// Generate a function called NAME which returns QUANTITY by interpreting its
/// argument as UNIT
///
/// wrap!(NAME QUANTITY UNIT);
macro_rules! wrap {
  ($name:ident $quantity:ident $unit:ident ) => {
    pub fn $name(x: f32) -> $quantity { $quantity::new::<units::$unit>(x) }
  };
}

wrap!(cm     Length         centimeter);
wrap!(mm     Length         millimeter);

// Reverse direction of the above.
pub fn mm_(x: Length) -> f32 { x.get::<units::millimeter>() }

#[macro_export]
macro_rules! assert_uom_eq {
  ($unit:ident, $lhs:expr, $rhs:expr, $algo:ident <= $tol:expr) => {
    $crate::float_eq::assert_float_eq!($lhs.get::<$unit>(), $rhs.get::<$unit>(), $algo <= $tol)
  };
}

#[cfg(test)]
mod tests {
  use super::*;
  use units::millimeter;

  #[test]
  fn mixed_units_sum() {
    let v = vec![mm(1.0), cm(1.0)];
    let total: Length = v.into_iter().sum();
    assert_uom_eq!(millimeter, total, mm(11.0), rel <= 1e-6);
  }

  #[test]
  fn parse_length_with_units() -> Result<(), Box<dyn std::error::Error>> {
    let l: Length = "2 mm".parse()?;
    assert_uom_eq!(millimeter, l, mm(2.0), rel <= 1e-6);
    let l: Length = "0.5 cm".parse()?;
    assert_uom_eq!(millimeter, l, cm(0.5), rel <= 1e-6);
    Ok(())
  }

  #[test]
  fn round_trip_through_f32() {
    float_eq::assert_float_eq!(mm_(mm(3.25)), 3.25, rel <= 1e-6);
  }
}
