//! The full tower Fq12 = Fq6[w] / (w^2 - v): the pairing target group lives
//! in its r-th roots of unity.

use std::fmt;

use crate::fp::Field;
use crate::fp2::Fq2;
use crate::fp6::Fq6;
use crate::rom;

/// c0 + c1*w with w^2 = v.
#[derive(Clone, PartialEq, Eq)]
pub struct Fq12 {
    pub c0: Fq6,
    pub c1: Fq6,
}

impl Fq12 {
    pub fn new(c0: Fq6, c1: Fq6) -> Self {
        Fq12 { c0, c1 }
    }

    /// Conjugation over Fq6, i.e. the p^6 Frobenius. Inverts elements of the
    /// cyclotomic subgroup for free.
    pub fn conjugate(&self) -> Self {
        Fq12::new(self.c0.clone(), self.c1.neg())
    }

    /// The p^power Frobenius automorphism.
    pub fn frobenius(&self, power: usize) -> Self {
        let c0 = self.c0.frobenius(power);
        let t = self.c1.frobenius(power);
        let coeff = &rom::FROBENIUS_FQ12[power % 12];
        Fq12::new(
            c0,
            Fq6::new(t.c0.mul(coeff), t.c1.mul(coeff), t.c2.mul(coeff)),
        )
    }

    /// Scale all six Fq2 coefficients by an Fq2 element (multiplication by
    /// the canonical embedding of Fq2 into Fq12).
    pub fn scale(&self, k: &Fq2) -> Self {
        Fq12::new(self.c0.scale(k), self.c1.scale(k))
    }

    /// Sparse multiplication by an element with non-zero coefficients only
    /// in slots 0, 1 and 4 -- the shape of a Miller-loop line evaluation.
    pub fn mul_by_014(&self, o0: &Fq2, o1: &Fq2, o4: &Fq2) -> Self {
        let t0 = self.c0.mul_by_01(o0, o1);
        let t1 = self.c1.mul_by_1(o4);
        Fq12::new(
            t1.mul_by_nonresidue().add(&t0),
            self.c0.mul_by_1(o4).add(&self.c1.mul_by_01(o0, o1)),
        )
    }
}

impl Field for Fq12 {
    fn zero() -> Self {
        Fq12::new(Field::zero(), Field::zero())
    }

    fn one() -> Self {
        Fq12::new(Field::one(), Field::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fq12::new(self.c0.add(&rhs.c0), self.c1.add(&rhs.c1))
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fq12::new(self.c0.sub(&rhs.c0), self.c1.sub(&rhs.c1))
    }

    fn neg(&self) -> Self {
        Fq12::new(self.c0.neg(), self.c1.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        // (a0 + a1 w)(b0 + b1 w) over w^2 = v.
        let t0 = self.c0.mul(&rhs.c0);
        let t1 = self.c1.mul(&rhs.c1);
        Fq12::new(
            t0.add(&t1.mul_by_nonresidue()),
            self.c0.mul(&rhs.c1).add(&self.c1.mul(&rhs.c0)),
        )
    }

    fn invert(&self) -> Option<Self> {
        // (a0 - a1 w) / (a0^2 - v a1^2)
        let denom = self
            .c0
            .square()
            .sub(&self.c1.square().mul_by_nonresidue());
        denom
            .invert()
            .map(|t| Fq12::new(self.c0.mul(&t), self.c1.neg().mul(&t)))
    }

    fn mul_u64(&self, k: u64) -> Self {
        Fq12::new(self.c0.mul_u64(k), self.c1.mul_u64(k))
    }
}

impl fmt::Debug for Fq12 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fq12({:?} + {:?}*w)", self.c0, self.c1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Fq12 {
        Fq12::new(
            Fq6::new(
                Fq2::from_u64s(1, 2),
                Fq2::from_u64s(3, 4),
                Fq2::from_u64s(5, 6),
            ),
            Fq6::new(
                Fq2::from_u64s(7, 8),
                Fq2::from_u64s(9, 10),
                Fq2::from_u64s(11, 12),
            ),
        )
    }

    #[test]
    fn inversion_round_trips() {
        let a = sample();
        assert_eq!(a.mul(&a.invert().unwrap()), Fq12::one());
        assert_eq!(Fq12::zero().invert(), None);
    }

    #[test]
    fn w_squared_is_v() {
        let w = Fq12::new(Fq6::zero(), Fq6::one());
        let v = Fq12::new(
            Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero()),
            Fq6::zero(),
        );
        assert_eq!(w.mul(&w), v);
    }

    #[test]
    fn mul_by_014_agrees_with_full() {
        let a = sample();
        let (o0, o1, o4) = (
            Fq2::from_u64s(13, 14),
            Fq2::from_u64s(15, 16),
            Fq2::from_u64s(17, 18),
        );
        let sparse = Fq12::new(
            Fq6::new(o0.clone(), o1.clone(), Fq2::zero()),
            Fq6::new(Fq2::zero(), o4.clone(), Fq2::zero()),
        );
        assert_eq!(a.mul_by_014(&o0, &o1, &o4), a.mul(&sparse));
    }

    #[test]
    fn frobenius_matches_exponentiation() {
        let a = sample();
        assert_eq!(a.frobenius(1), a.pow(&rom::P));
        let mut by_squaring = a.clone();
        for _ in 0..6 {
            by_squaring = by_squaring.pow(&rom::P);
        }
        assert_eq!(a.frobenius(6), by_squaring);
        assert_eq!(a.frobenius(6), a.conjugate());
    }

    #[test]
    fn scale_matches_embedded_multiplication() {
        let a = sample();
        let k = Fq2::from_u64s(3, 5);
        let embedded = Fq12::new(
            Fq6::new(k.clone(), Fq2::zero(), Fq2::zero()),
            Fq6::zero(),
        );
        assert_eq!(a.scale(&k), a.mul(&embedded));
    }
}
