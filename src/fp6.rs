//! The cubic extension Fq6 = Fq2[v] / (v^3 - xi), xi = 1 + i.

use std::fmt;

use crate::fp::Field;
use crate::fp2::Fq2;
use crate::rom;

/// c0 + c1*v + c2*v^2. Intermediate step of the Fq12 tower.
#[derive(Clone, PartialEq, Eq)]
pub struct Fq6 {
    pub c0: Fq2,
    pub c1: Fq2,
    pub c2: Fq2,
}

impl Fq6 {
    pub fn new(c0: Fq2, c1: Fq2, c2: Fq2) -> Self {
        Fq6 { c0, c1, c2 }
    }

    /// Multiplication by v: (c0, c1, c2) -> (xi*c2, c0, c1).
    pub fn mul_by_nonresidue(&self) -> Self {
        Fq6::new(
            self.c2.mul_by_nonresidue(),
            self.c0.clone(),
            self.c1.clone(),
        )
    }

    /// Sparse multiplication by b1*v.
    pub fn mul_by_1(&self, b1: &Fq2) -> Self {
        Fq6::new(
            self.c2.mul(b1).mul_by_nonresidue(),
            self.c0.mul(b1),
            self.c1.mul(b1),
        )
    }

    /// Sparse multiplication by b0 + b1*v.
    pub fn mul_by_01(&self, b0: &Fq2, b1: &Fq2) -> Self {
        let t0 = self.c0.mul(b0);
        let t1 = self.c1.mul(b1);
        Fq6::new(
            t0.add(&self.c2.mul(b1).mul_by_nonresidue()),
            self.c0.mul(b1).add(&self.c1.mul(b0)),
            t1.add(&self.c2.mul(b0)),
        )
    }

    /// Scale all three coefficients by an Fq2 element.
    pub fn scale(&self, k: &Fq2) -> Self {
        Fq6::new(self.c0.mul(k), self.c1.mul(k), self.c2.mul(k))
    }

    /// The p^power Frobenius automorphism.
    pub fn frobenius(&self, power: usize) -> Self {
        Fq6::new(
            self.c0.frobenius(power),
            self.c1
                .frobenius(power)
                .mul(&rom::FROBENIUS_FQ6_C1[power % 6]),
            self.c2
                .frobenius(power)
                .mul(&rom::FROBENIUS_FQ6_C2[power % 6]),
        )
    }
}

impl Field for Fq6 {
    fn zero() -> Self {
        Fq6::new(Field::zero(), Field::zero(), Field::zero())
    }

    fn one() -> Self {
        Fq6::new(Field::one(), Field::zero(), Field::zero())
    }

    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    fn add(&self, rhs: &Self) -> Self {
        Fq6::new(
            self.c0.add(&rhs.c0),
            self.c1.add(&rhs.c1),
            self.c2.add(&rhs.c2),
        )
    }

    fn sub(&self, rhs: &Self) -> Self {
        Fq6::new(
            self.c0.sub(&rhs.c0),
            self.c1.sub(&rhs.c1),
            self.c2.sub(&rhs.c2),
        )
    }

    fn neg(&self) -> Self {
        Fq6::new(self.c0.neg(), self.c1.neg(), self.c2.neg())
    }

    fn mul(&self, rhs: &Self) -> Self {
        // Schoolbook over v^3 = xi.
        let (a0, a1, a2) = (&self.c0, &self.c1, &self.c2);
        let (b0, b1, b2) = (&rhs.c0, &rhs.c1, &rhs.c2);
        Fq6::new(
            a0.mul(b0)
                .add(&a1.mul(b2).add(&a2.mul(b1)).mul_by_nonresidue()),
            a0.mul(b1)
                .add(&a1.mul(b0))
                .add(&a2.mul(b2).mul_by_nonresidue()),
            a0.mul(b2).add(&a1.mul(b1)).add(&a2.mul(b0)),
        )
    }

    fn invert(&self) -> Option<Self> {
        let (a0, a1, a2) = (&self.c0, &self.c1, &self.c2);
        let t0 = a0.square().sub(&a1.mul(a2).mul_by_nonresidue());
        let t1 = a2.square().mul_by_nonresidue().sub(&a0.mul(a1));
        let t2 = a1.square().sub(&a0.mul(a2));
        let denom = a0
            .mul(&t0)
            .add(&a1.mul(&t2).add(&a2.mul(&t1)).mul_by_nonresidue());
        denom
            .invert()
            .map(|f| Fq6::new(t0.mul(&f), t1.mul(&f), t2.mul(&f)))
    }

    fn mul_u64(&self, k: u64) -> Self {
        Fq6::new(self.c0.mul_u64(k), self.c1.mul_u64(k), self.c2.mul_u64(k))
    }
}

impl fmt::Debug for Fq6 {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Fq6({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}
