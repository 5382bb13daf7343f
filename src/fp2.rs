//! The quadratic extension Fq2 = Fq[i] / (i^2 + 1).

use std::fmt;

use crate::fp::{Field, Fq};
use crate::rom;

/// c0 + c1*i with i^2 = -1. G2 coordinates and all hash-to-curve field
/// elements live here.
#[derive(Clone, PartialEq, Eq)]
pub struct Fq2 {
    pub c0: Fq,
    pub c1: Fq,
}

impl Fq2 {
    pub fn new(c0: Fq, c1: Fq) -> Self {
        Fq2 { c0, c1 }
    }

    pub fn from_u64s(c0: u64, c1: u64) -> Self {
        Fq2::new(Fq::from_u64(c0), Fq::from_u64(c1))
    }

    /// Complex conjugate: c0 - c1*i. Also the p-power Frobenius on Fq2.
    pub fn conjugate(&self) -> Self {
        Fq2::new(self.c0.clone(), self.c1.neg())
    }

    /// The p^power Frobenius automorphism.
    pub fn frobenius(&self, power: usize) -> Self {
        if power % 2 == 1 {
            self.conjugate()
        } else {
            self.clone()
        }
    }

    /// Multiplication by the Fq6 non-residue xi = 1 + i.
    pub fn mul_by_nonresidue(&self) -> Self {
        Fq2::new(self.c0.sub(&self.c1), self.c0.add(&self.c1))
    }

    /// Scale both components by an Fq element.
    pub fn scale(&self, k: &Fq) -> Self {
        Fq2::new(self.c0.mul(k), self.c1.mul(k))
    }

    pub fn halve(&self) -> Self {
        Fq2::new(self.c0.halve(), self.c1.halve())
    }

    /// The hash-to-curve sign of an Fq2 element: the parity of c0, or of c1
    /// when c0 is zero.
    pub fn sgn0(&self) -> bool {
        self.c0.is_odd() || (self.c0.is_zero() && self.c1.is_odd())
    }

    /// Square root via the Frobenius-based closed form for p = 3 mod 4
    /// (exponentiations by (p-3)/4 and (p-1)/2), with a verification square
    /// so "no root" is a definite answer.
    pub fn sqrt(&self) -> Option<Fq2> {
        if self.is_zero() {
            return Some(Field::zero());
        }
        let a1 = self.pow(&rom::P_MINUS_3_OVER_4);
        let alpha = a1.mul(&a1.mul(self));
        let x0 = a1.mul(self);
        let candidate = if alpha == Fq2::one().neg() {
            // alpha = -1: the correction factor is i itself.
            Fq2::new(x0.c1.neg(), x0.c0.clone())
        } else {
            Fq2::one().add(&alpha).pow(&rom::P_MINUS_1_OVER_2).mul(&x0)
        };
        if candidate.square() == *self {
            Some(candidate)
        } else {
            None
        }
    }
}

impl Field for Fq2 {
    fn zero() -> Self {
        Fq2::new(Field::zero(), Field::zero())
    }

    fn one() -> Self {
        Fq2::new(Field::one(), Field::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fq2::new(self.c0.add(&rhs.c0), self.c1.add(&rhs.c1))
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fq2::new(self.c0.sub(&rhs.c0), self.c1.sub(&rhs.c1))
    }

    fn neg(&self) -> Self {
        Fq2::new(self.c0.neg(), self.c1.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        // (a0 + a1 i)(b0 + b1 i) = (a0b0 - a1b1) + (a0b1 + a1b0) i
        let t0 = self.c0.mul(&rhs.c0);
        let t1 = self.c1.mul(&rhs.c1);
        Fq2::new(
            t0.sub(&t1),
            self.c0.add(&self.c1).mul(&rhs.c0.add(&rhs.c1)).sub(&t0).sub(&t1),
        )
    }

    fn invert(&self) -> Option<Self> {
        // (a0 - a1 i) / (a0^2 + a1^2)
        let norm = self.c0.square().add(&self.c1.square());
        norm.invert()
            .map(|t| Fq2::new(self.c0.mul(&t), self.c1.neg().mul(&t)))
    }

    fn mul_u64(&self, k: u64) -> Self {
        Fq2::new(self.c0.mul_u64(k), self.c1.mul_u64(k))
    }
}

impl fmt::Debug for Fq2 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fq2({:?} + {:?}*i)", self.c0, self.c1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fq2 {
        Fq2::from_u64s(3, 7)
    }

    #[test]
    fn i_squared_is_minus_one() {
        let i = Fq2::from_u64s(0, 1);
        assert_eq!(i.square(), Fq2::one().neg());
    }

    #[test]
    fn multiplication_agrees_with_schoolbook() {
        let a = sample();
        let b = Fq2::from_u64s(11, 13);
        // (3 + 7i)(11 + 13i) = 33 - 91 + (39 + 77)i
        let expected = Fq2::new(Fq::from_u64(58).neg(), Fq::from_u64(116));
        assert_eq!(a.mul(&b), expected);
    }

    #[test]
    fn inversion_round_trips() {
        let a = sample();
        assert_eq!(a.mul(&a.invert().unwrap()), Fq2::one());
        assert_eq!(Fq2::zero().invert(), None);
    }

    #[test]
    fn nonresidue_is_multiplication_by_xi() {
        let a = sample();
        assert_eq!(a.mul_by_nonresidue(), a.mul(&Fq2::from_u64s(1, 1)));
    }

    #[test]
    fn sqrt_round_trips() {
        let a = sample();
        let sq = a.square();
        let root = sq.sqrt().unwrap();
        assert!(root == a || root == a.neg());
    }

    #[test]
    fn sqrt_of_nonsquare_fails() {
        // xi * a^2 is a non-square whenever a != 0 since xi is a non-residue.
        let nonsquare = sample().square().mul_by_nonresidue();
        assert!(nonsquare.sqrt().is_none());
    }

    #[test]
    fn conjugate_is_frobenius() {
        let a = sample();
        assert_eq!(a.frobenius(1), a.pow(&rom::P));
        assert_eq!(a.frobenius(2), a);
    }

    #[test]
    fn sgn0_tie_break() {
        assert!(Fq2::from_u64s(1, 0).sgn0());
        assert!(!Fq2::from_u64s(2, 1).sgn0());
        assert!(Fq2::from_u64s(0, 1).sgn0());
        assert!(!Fq2::zero().sgn0());
    }
}
