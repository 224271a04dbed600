use num_complex::{Complex32, Complex64};
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::error::{LinSolveError, Result};

/// Element type of a [`Matrix`](crate::matrix::matrix::Matrix) and of every solver.
///
/// `abs` and `compare` only have to agree with each other: pivoting and the
/// Gauss-Seidel stopping test compare absolute values and nothing else. Types
/// without a natural order (complex numbers, residues) may order by modulus or
/// by representative.
pub trait Scalar:  // Avoid repeating all the traits
    Clone
    + Debug
    + Display
    + PartialEq
    + Zero
    + One
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
{
    fn from_int(value: i64) -> Self;

    fn abs(&self) -> Self;

    fn compare(&self, other: &Self) -> Option<Ordering>;

    fn less_than(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Less)
    }

    fn greater_than(&self, other: &Self) -> bool {
        self.compare(other) == Some(Ordering::Greater)
    }

    fn eq_int(&self, value: i64) -> bool {
        *self == Self::from_int(value)
    }

    /// Division that reports an undefined quotient instead of panicking.
    fn try_div(&self, rhs: &Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(LinSolveError::NumberType("division by zero".into()));
        }
        Ok(self.clone() / rhs.clone())
    }
}

/// Scalars with a square root, needed by the Householder QR decomposition.
pub trait ScalarSqrt: Scalar {
    fn sqrt(&self) -> Self;
}

macro_rules! impl_scalar_float {
    ($($t:ty),*) => {$(
        impl Scalar for $t {
            fn from_int(value: i64) -> Self {
                value as $t
            }

            fn abs(&self) -> Self {
                <$t>::abs(*self)
            }

            fn compare(&self, other: &Self) -> Option<Ordering> {
                self.partial_cmp(other)
            }
        }

        impl ScalarSqrt for $t {
            fn sqrt(&self) -> Self {
                <$t>::sqrt(*self)
            }
        }
    )*};
}

// Complex numbers have no order, they are compared by modulus which is all pivoting needs
macro_rules! impl_scalar_complex {
    ($($t:ty => $re:ty),*) => {$(
        impl Scalar for $t {
            fn from_int(value: i64) -> Self {
                <$t>::new(value as $re, 0.0)
            }

            fn abs(&self) -> Self {
                <$t>::new(self.norm(), 0.0)
            }

            fn compare(&self, other: &Self) -> Option<Ordering> {
                self.norm().partial_cmp(&other.norm())
            }
        }

        impl ScalarSqrt for $t {
            fn sqrt(&self) -> Self {
                <$t>::sqrt(*self)
            }
        }
    )*};
}

impl_scalar_float!(f32, f64);
impl_scalar_complex!(Complex32 => f32, Complex64 => f64);

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
