use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::fmt;
use std::fmt::Display;
use std::ops;
use std::str::FromStr;

use crate::error::{LinSolveError, Result};
use crate::rings::scalar::Scalar;

/// Exact rational number, always stored in lowest terms with a positive denominator.
#[derive(Debug, Clone)]
pub struct Fraction {
    pub num: BigInt,
    pub den: BigInt,
}

impl Fraction {
    pub fn try_new(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(LinSolveError::NumberType(
                "cannot create fraction, zero denominator".into(),
            ));
        }
        Ok(Self::reduced(num, den))
    }

    pub fn from_ints(num: i64, den: i64) -> Result<Self> {
        Self::try_new(BigInt::from(num), BigInt::from(den))
    }

    // `den` must be non-zero
    fn reduced(num: BigInt, den: BigInt) -> Self {
        let g = num.gcd(&den);
        let num = num / &g;
        let den = den / &g;

        if den.is_negative() {
            return Self {
                num: -num,
                den: -den,
            };
        }
        Self { num, den }
    }
}

impl FromStr for Fraction {
    type Err = LinSolveError;

    /// Accepts `a` or `a/b`.
    fn from_str(s: &str) -> Result<Self> {
        let parse = |part: &str| {
            BigInt::parse_bytes(part.trim().as_bytes(), 10)
                .ok_or_else(|| LinSolveError::Parse(format!("invalid fraction `{}`", s)))
        };

        let mut parts = s.split('/');
        let num = parse(parts.next().unwrap_or(""))?;
        let den = match parts.next() {
            Some(den) => parse(den)?,
            None => BigInt::one(),
        };
        if parts.next().is_some() {
            return Err(LinSolveError::Parse(format!("invalid fraction `{}`", s)));
        }

        Fraction::try_new(num, den).map_err(|_| {
            LinSolveError::Parse(format!("invalid fraction `{}`, zero denominator", s))
        })
    }
}

impl ops::Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        if self.den == rhs.den {
            return Fraction::reduced(self.num + rhs.num, self.den);
        }

        Fraction::reduced(
            &self.num * &rhs.den + &rhs.num * &self.den,
            &self.den * &rhs.den,
        )
    }
}

impl ops::Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + -rhs
    }
}

impl ops::Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl ops::Div for Fraction {
    type Output = Fraction;

    /// Panics on a zero divisor, use [`Scalar::try_div`] to get an error instead.
    fn div(self, rhs: Fraction) -> Fraction {
        if rhs.num.is_zero() {
            panic!("Error when dividing two fractions: dividing by zero");
        }
        Fraction::reduced(self.num * rhs.den, self.den * rhs.num)
    }
}

impl ops::Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::reduced(self.num * rhs.num, self.den * rhs.den)
    }
}

impl One for Fraction {
    fn one() -> Fraction {
        Fraction {
            num: BigInt::one(),
            den: BigInt::one(),
        }
    }
}

impl Zero for Fraction {
    fn zero() -> Fraction {
        Fraction {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }

    fn is_zero(&self) -> bool {
        self.num.is_zero()
    }
}

impl Scalar for Fraction {
    fn from_int(value: i64) -> Self {
        Fraction {
            num: BigInt::from(value),
            den: BigInt::one(),
        }
    }

    fn abs(&self) -> Self {
        Fraction {
            num: self.num.abs(),
            den: self.den.clone(),
        }
    }

    fn compare(&self, other: &Self) -> Option<Ordering> {
        self.partial_cmp(other)
    }
}

impl Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.den.is_one() {
            return write!(f, "{}", self.num);
        }
        write!(f, "{}/{}", self.num, self.den)
    }
}

impl PartialEq<Fraction> for Fraction {
    fn eq(&self, rhs: &Fraction) -> bool {
        &self.num * &rhs.den == &rhs.num * &self.den
    }
}

impl PartialEq<i64> for Fraction {
    fn eq(&self, rhs: &i64) -> bool {
        self.num == &self.den * rhs
    }
}

impl PartialOrd<Fraction> for Fraction {
    fn partial_cmp(&self, rhs: &Fraction) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}

impl Eq for Fraction {}
impl Ord for Fraction {
    // denominators are positive so cross multiplication keeps the order
    fn cmp(&self, rhs: &Fraction) -> Ordering {
        let a = &self.num * &rhs.den;
        let b = &rhs.num * &self.den;
        a.cmp(&b)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn fr(s: &str) -> Fraction {
        s.parse().unwrap()
    }

    #[test]
    fn test_fraction_normalized() {
        let f = Fraction::from_ints(6, -4).unwrap();
        assert_eq!(f.num, BigInt::from(-3));
        assert_eq!(f.den, BigInt::from(2));
        assert_eq!(f.to_string(), "-3/2");
        assert_eq!(fr("10/5").to_string(), "2");
        assert!(Fraction::from_ints(1, 0).is_err());
    }

    #[test]
    fn test_fraction_arithmetic() {
        assert_eq!(fr("1/2") + fr("1/3"), fr("5/6"));
        assert_eq!(fr("1/2") - fr("1/3"), fr("1/6"));
        assert_eq!(fr("2/3") * fr("9/4"), fr("3/2"));
        assert_eq!(fr("2/3") / fr("4/9"), fr("3/2"));
        assert_eq!(-fr("2/3"), fr("-2/3"));
        assert_eq!(fr("4/2"), 2);
        assert_ne!(fr("5/2"), 2);
    }

    #[test]
    fn test_fraction_scalar() {
        assert!(Fraction::from_int(0).is_zero());
        assert!(Fraction::from_int(1).eq_int(1));
        assert_eq!(Scalar::abs(&fr("-7/3")), fr("7/3"));
        assert!(fr("1/3").less_than(&fr("1/2")));
        assert!(fr("-1/2") < fr("-1/3"));
        assert_eq!(
            fr("1/2").try_div(&Fraction::zero()).unwrap_err().kind(),
            crate::error::ErrorKind::NumberType
        );
    }

    #[test]
    fn test_fraction_parse_errors() {
        assert!("1/x".parse::<Fraction>().is_err());
        assert!("1/2/3".parse::<Fraction>().is_err());
        assert!("3/0".parse::<Fraction>().is_err());
        assert_eq!(fr(" -12 "), -12);
    }
}
