use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::ops;
use std::str::FromStr;

use crate::error::{LinSolveError, Result};
use crate::rings::scalar::Scalar;

/// Residue class modulo `N`. Division only exists for elements coprime with `N`,
/// so `Zmod<N>` is a field exactly when `N` is prime.
///
/// `N` must be at least 1. Building any element of `Zmod<0>` is rejected at
/// compile time:
///
/// ```compile_fail
/// use lin_solve::rings::zmod::Zmod;
/// use lin_solve::Scalar;
///
/// let _ = Zmod::<0>::from_int(3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Zmod<const N: u64> {
    pub value: BigUint,
}

impl<const N: u64> Zmod<N> {
    const NONZERO_MODULUS: () = assert!(N > 0, "Zmod<N> needs a modulus of at least 1");

    pub fn new(value: BigUint) -> Self {
        Self {
            value: value % Self::modulus(),
        }
    }

    pub fn modulus() -> BigUint {
        let () = Self::NONZERO_MODULUS;
        BigUint::from(N)
    }

    /// Modular inverse by the extended Euclidean algorithm.
    pub fn inverse(&self) -> Result<Self> {
        let modulus = BigInt::from(N);
        let egcd = BigInt::from(self.value.clone()).extended_gcd(&modulus);
        if !egcd.gcd.is_one() {
            return Err(LinSolveError::NumberType(format!(
                "modular inverse of {} does not exist modulo {}",
                self.value, N
            )));
        }

        Ok(Self {
            value: egcd.x.mod_floor(&modulus).magnitude().clone(),
        })
    }
}

impl<const N: u64> ops::Add for Zmod<N> {
    type Output = Zmod<N>;

    fn add(self, rhs: Zmod<N>) -> Zmod<N> {
        Zmod::new(self.value + rhs.value)
    }
}

impl<const N: u64> ops::Sub for Zmod<N> {
    type Output = Zmod<N>;

    fn sub(self, rhs: Zmod<N>) -> Zmod<N> {
        if rhs.value > self.value {
            return Zmod::new(self.value + Self::modulus() - rhs.value);
        }
        Zmod::new(self.value - rhs.value)
    }
}

impl<const N: u64> ops::Mul for Zmod<N> {
    type Output = Zmod<N>;

    fn mul(self, rhs: Zmod<N>) -> Zmod<N> {
        Zmod::new(self.value * rhs.value)
    }
}

impl<const N: u64> ops::Neg for Zmod<N> {
    type Output = Zmod<N>;

    fn neg(self) -> Zmod<N> {
        Zmod::new(Self::modulus() - self.value)
    }
}

impl<const N: u64> ops::Div for Zmod<N> {
    type Output = Zmod<N>;

    /// Panics when `rhs` is not invertible, use [`Scalar::try_div`] to get an error instead.
    fn div(self, rhs: Zmod<N>) -> Zmod<N> {
        match self.try_div(&rhs) {
            Ok(quotient) => quotient,
            Err(error) => panic!("{}", error),
        }
    }
}

impl<const N: u64> Zero for Zmod<N> {
    fn zero() -> Zmod<N> {
        let () = Self::NONZERO_MODULUS;
        Zmod {
            value: BigUint::zero(),
        }
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }
}

impl<const N: u64> One for Zmod<N> {
    fn one() -> Zmod<N> {
        Zmod::new(BigUint::one())
    }
}

impl<const N: u64> Scalar for Zmod<N> {
    fn from_int(value: i64) -> Self {
        let () = Self::NONZERO_MODULUS;
        let modulus = i128::from(N);
        let value = (i128::from(value) % modulus + modulus) % modulus;
        Zmod {
            value: BigUint::from(value as u128),
        }
    }

    // residues have no sign
    fn abs(&self) -> Self {
        self.clone()
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        Some(self.value.cmp(&other.value))
    }

    fn try_div(&self, rhs: &Self) -> Result<Self> {
        Ok(self.clone() * rhs.inverse()?)
    }
}

impl<const N: u64> fmt::Display for Zmod<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl<const N: u64> FromStr for Zmod<N> {
    type Err = LinSolveError;

    fn from_str(s: &str) -> Result<Self> {
        let () = Self::NONZERO_MODULUS;
        let value = BigInt::parse_bytes(s.trim().as_bytes(), 10)
            .ok_or_else(|| LinSolveError::Parse(format!("invalid residue `{}`", s)))?;
        Ok(Zmod {
            value: value.mod_floor(&BigInt::from(N)).magnitude().clone(),
        })
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
