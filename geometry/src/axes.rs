//! Dropping one axis from a `D`-dimensional array of coordinates, and putting
//! it back again.
//!
//! Stable Rust cannot name `[T; D - 1]` in generic code, so the lower
//! dimension is carried as a second const parameter `L`, and every use checks
//! `L + 1 == D` at compile time via [`DropsOneAxis`].

use std::cmp::Ordering;

/// Compile-time witness that `L` is one less than `D`.
///
/// Referring to `DropsOneAxis::<D, L>::OK` fails monomorphization if the
/// dimensions do not match.
pub struct DropsOneAxis<const D: usize, const L: usize>;

impl<const D: usize, const L: usize> DropsOneAxis<D, L> {
    pub const OK: () = assert!(L + 1 == D, "restriction must drop exactly one axis");
}

/// Remove the component at `axis`
#[inline]
pub fn restrict<T: Copy, const D: usize, const L: usize>(a: [T; D], axis: usize) -> [T; L] {
    #[allow(clippy::let_unit_value)]
    let () = DropsOneAxis::<D, L>::OK;
    debug_assert!(axis < D, "axis {axis} out of range for {D} dimensions");
    std::array::from_fn(|i| if i < axis { a[i] } else { a[i + 1] })
}

/// Insert `value` at `axis`, shifting later components up by one
#[inline]
pub fn extend<T: Copy, const L: usize, const D: usize>(a: [T; L], axis: usize, value: T) -> [T; D] {
    #[allow(clippy::let_unit_value)]
    let () = DropsOneAxis::<D, L>::OK;
    debug_assert!(axis < D, "axis {axis} out of range for {D} dimensions");
    std::array::from_fn(|i| match i.cmp(&axis) {
        Ordering::Less    => a[i],
        Ordering::Equal   => value,
        Ordering::Greater => a[i - 1],
    })
}
