//! The prime field Fq of BLS12-381 and the capability set shared by every
//! level of the extension tower.

use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;

use crate::rom;

/// Operations the generic group law and pairing code require of a field.
///
/// Implemented by `Fq`, `Fq2`, `Fq6` and `Fq12`; the projective group law is
/// written once against this trait and instantiated for Fq (G1) and Fq2 (G2).
pub trait Field: Clone + PartialEq + fmt::Debug {
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;
    fn add(&self, rhs: &Self) -> Self;
    fn sub(&self, rhs: &Self) -> Self;
    fn neg(&self) -> Self;
    fn mul(&self, rhs: &Self) -> Self;
    /// Multiplicative inverse; `None` only at zero, which must never occur
    /// on a valid protocol path.
    fn invert(&self) -> Option<Self>;
    /// Multiplication by a small integer constant.
    fn mul_u64(&self, k: u64) -> Self;

    fn square(&self) -> Self {
        self.mul(self)
    }

    /// Square-and-multiply exponentiation.
    fn pow(&self, exp: &BigUint) -> Self {
        let mut result = Self::one();
        let mut base = self.clone();
        for i in 0..exp.bits() {
            if exp.bit(i) {
                result = result.mul(&base);
            }
            base = base.square();
        }
        result
    }
}

/// An element of Fq, held as the canonical residue in [0, P).
///
/// Every constructor and operation reduces, so equality is plain value
/// equality.
#[derive(Clone, PartialEq, Eq)]
pub struct Fq {
    value: BigUint,
}

impl Fq {
    pub fn new(value: BigUint) -> Self {
        Fq {
            value: value % &*rom::P,
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Fq::new(BigUint::from(value))
    }

    /// Big-endian bytes of arbitrary length, reduced mod P.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Fq::new(BigUint::from_bytes_be(bytes))
    }

    /// Fixed-width 48-byte big-endian encoding.
    pub fn to_bytes_be(&self) -> [u8; 48] {
        let raw = self.value.to_bytes_be();
        let mut out = [0u8; 48];
        out[48 - raw.len()..].copy_from_slice(&raw);
        out
    }

    pub(crate) fn repr(&self) -> &BigUint {
        &self.value
    }

    /// Canonical square root for P = 3 mod 4: a^((P+1)/4), with a
    /// verification square so "no root" is a definite answer.
    pub fn sqrt(&self) -> Option<Fq> {
        let candidate = self.pow(&rom::P_PLUS_1_OVER_4);
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }

    /// The compressed-encoding sign flag, floor(2a / P): 1 for the larger
    /// of a and P - a.
    pub fn sign_flag(&self) -> bool {
        !((&self.value << 1u32) / &*rom::P).is_zero()
    }

    pub fn is_odd(&self) -> bool {
        self.value.bit(0)
    }

    /// Division by two; exact for every residue since P is odd.
    pub fn halve(&self) -> Fq {
        if self.value.bit(0) {
            Fq {
                value: (&self.value + &*rom::P) >> 1u32,
            }
        } else {
            Fq {
                value: &self.value >> 1u32,
            }
        }
    }
}

impl Field for Fq {
    fn zero() -> Self {
        Fq {
            value: BigUint::zero(),
        }
    }

    fn one() -> Self {
        Fq::from_u64(1)
    }

    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fq::new(&self.value + &rhs.value)
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fq::new(&self.value + &*rom::P - &rhs.value)
    }

    fn neg(&self) -> Self {
        if self.value.is_zero() {
            Field::zero()
        } else {
            Fq {
                value: &*rom::P - &self.value,
            }
        }
    }

    fn mul(&self, rhs: &Self) -> Self {
        Fq::new(&self.value * &rhs.value)
    }

    fn invert(&self) -> Option<Self> {
        if self.value.is_zero() {
            None
        } else {
            // Fermat: a^(P-2) = a^-1 in a prime field.
            Some(self.pow(&rom::P_MINUS_2))
        }
    }

    fn mul_u64(&self, k: u64) -> Self {
        Fq::new(&self.value * k)
    }
}

impl fmt::Debug for Fq {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fq(0x{:x})", self.value)
    }
}
