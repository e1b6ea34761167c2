use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};
use units::todo::Lengthf32;

/// Displacement in continuous `D`-dimensional voxel coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector<const D: usize>(pub [Lengthf32; D]);

impl<const D: usize> Vector<D> {

    pub fn new(components: [Lengthf32; D]) -> Self { Self(components) }

    pub fn zero() -> Self { Self([0.0; D]) }

    pub fn components(&self) -> [Lengthf32; D] { self.0 }

    pub fn map(self, f: impl Fn(Lengthf32) -> Lengthf32) -> Self { Self(self.0.map(f)) }

    pub fn abs(self) -> Self { self.map(Lengthf32::abs) }

    /// Position and value of the largest component. Ties go to the lowest
    /// axis.
    pub fn argmax(self) -> (usize, Lengthf32) {
        let mut best = (0, self.0[0]);
        for (i, &x) in self.0.iter().enumerate().skip(1) {
            if x > best.1 { best = (i, x) }
        }
        best
    }

    pub fn dot(self, other: Self) -> Lengthf32 {
        self.0.iter().zip(other.0.iter()).map(|(a, b)| a * b).sum()
    }

    pub fn norm(self) -> Lengthf32 { self.dot(self).sqrt() }

    pub fn is_finite(&self) -> bool { self.0.iter().all(|x| x.is_finite()) }
}

impl<const D: usize> Add for Vector<D> {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}

impl<const D: usize> Sub for Vector<D> {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}

impl<const D: usize> Neg for Vector<D> {
    type Output = Self;
    fn neg(self) -> Self::Output { self.map(|x| -x) }
}

impl<const D: usize> Mul<Lengthf32> for Vector<D> {
    type Output = Self;
    fn mul(self, rhs: Lengthf32) -> Self::Output { self.map(|x| x * rhs) }
}

impl<const D: usize> Div<Lengthf32> for Vector<D> {
    type Output = Self;
    fn div(self, rhs: Lengthf32) -> Self::Output { self.map(|x| x / rhs) }
}

impl<const D: usize> Index<usize> for Vector<D> {
    type Output = Lengthf32;
    fn index(&self, index: usize) -> &Self::Output {
        match self.0.get(index) {
            Some(x) => x,
            None => panic!("index {index} is out of bounds [0,{D})")
        }
    }
}

impl<const D: usize> IndexMut<usize> for Vector<D> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output { &mut self.0[index] }
}

impl<const D: usize> From<[Lengthf32; D]> for Vector<D> {
    fn from(components: [Lengthf32; D]) -> Self { Self(components) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_eq::assert_float_eq;
    use rstest::rstest;

    #[rstest(/**/ x,  y,  z,  magnitude,
             case(0.0,  0.0,  0.0,  0.0),
             case(1.0,  0.0,  0.0,  1.0),
             case(0.0,  1.0,  0.0,  1.0),
             case(0.0,  0.0,  1.0,  1.0),
             case(3.0,  4.0,  0.0,  5.0),
             case(0.0, -3.0,  4.0,  5.0),
             case(5.0,  0.0, 12.0, 13.0),
             case(3.0,  4.0,  5.0,  7.0710678),
    )]
    fn vector_norm(x: f32, y: f32, z: f32, magnitude: f32) {
        let v = Vector::new([x, y, z]);
        assert_float_eq!(v.norm(), magnitude, ulps <= 1);
    }

    #[rstest(/**/       v           , expected,
             case([ 1.0,  2.0,  3.0], (2,  3.0)),
             case([ 3.0,  2.0,  1.0], (0,  3.0)),
             case([-1.0, -5.0, -2.0], (0, -1.0)),
             case([ 2.0,  2.0,  1.0], (0,  2.0)), // ties go to lowest axis
             case([ 1.0,  4.0,  4.0], (1,  4.0)),
    )]
    fn vector_argmax(v: [f32; 3], expected: (usize, f32)) {
        assert_eq!(Vector::new(v).argmax(), expected);
    }

    #[test]
    fn abs_then_argmax_finds_dominant_axis() {
        let v = Vector::new([0.5, -3.0]);
        assert_eq!(v.abs().argmax(), (1, 3.0));
    }

    #[test]
    fn scalar_arithmetic() {
        let v = Vector::new([1.0, -2.0, 4.0]);
        assert_eq!(v * 2.0, Vector::new([2.0, -4.0, 8.0]));
        assert_eq!(v / 2.0, Vector::new([0.5, -1.0, 2.0]));
        assert_eq!(-v     , Vector::new([-1.0, 2.0, -4.0]));
        assert_eq!(v - v  , Vector::zero());
    }

    #[test]
    #[should_panic]
    fn index_out_of_bounds() {
        let v = Vector::new([1.0, 2.0]);
        let _ = v[2];
    }
}
