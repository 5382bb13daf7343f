//! The projective group law shared by G1 and G2.
//!
//! One generic point type over the `Field` capability set, instantiated for
//! Fq and Fq2. Curve-specific concerns (generators, the b coefficient,
//! codecs, hashing) live in `g1` / `g2`.

use num_bigint::BigUint;

use crate::errors::BlsError;
use crate::fp::Field;
use crate::rom;

/// One Miller-loop line-evaluation triple.
pub type LineTriple<F> = [F; 3];

/// A point in standard projective coordinates: (X/Z, Y/Z) when Z != 0, the
/// group identity when Z = 0.
///
/// Construction is cheap and unchecked; the curve equation is asserted
/// explicitly at trust boundaries (`assert_validity` on the G1/G2
/// instantiations). Each point may own two derived caches -- a windowed
/// scalar-multiplication table and a Miller-loop line table. Caches are not
/// part of point identity, are built and cleared only through `&mut self`,
/// and are never touched by a read.
#[derive(Clone, Debug)]
pub struct ProjectivePoint<F: Field> {
    pub(crate) x: F,
    pub(crate) y: F,
    pub(crate) z: F,
    window_table: Option<WindowTable<F>>,
    line_table: Option<Vec<LineTriple<F>>>,
}

impl<F: Field> ProjectivePoint<F> {
    pub fn new(x: F, y: F, z: F) -> Self {
        ProjectivePoint {
            x,
            y,
            z,
            window_table: None,
            line_table: None,
        }
    }

    pub fn from_affine(x: F, y: F) -> Self {
        ProjectivePoint::new(x, y, F::one())
    }

    /// The group identity, represented (1, 1, 0).
    pub fn identity() -> Self {
        ProjectivePoint::new(F::one(), F::one(), F::zero())
    }

    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Coordinates only, caches left behind. Arithmetic results are always
    /// fresh points.
    pub(crate) fn strip(&self) -> Self {
        ProjectivePoint::new(self.x.clone(), self.y.clone(), self.z.clone())
    }

    /// Affine (X/Z, Y/Z); the identity maps to the (0, 0) sentinel.
    pub fn to_affine(&self) -> (F, F) {
        match self.z.invert() {
            Some(z_inv) => (self.x.mul(&z_inv), self.y.mul(&z_inv)),
            None => (F::zero(), F::zero()),
        }
    }

    pub fn negate(&self) -> Self {
        ProjectivePoint::new(self.x.clone(), self.y.neg(), self.z.clone())
    }

    pub fn double(&self) -> Self {
        if self.is_identity() {
            return Self::identity();
        }
        let w = self.x.square().mul_u64(3);
        let s = self.y.mul(&self.z);
        let ss = s.square();
        let sss = ss.mul(&s);
        let b = self.x.mul(&self.y).mul(&s);
        let h = w.square().sub(&b.mul_u64(8));
        let x3 = h.mul(&s).mul_u64(2);
        let y3 = w
            .mul(&b.mul_u64(4).sub(&h))
            .sub(&self.y.square().mul_u64(8).mul(&ss));
        let z3 = sss.mul_u64(8);
        ProjectivePoint::new(x3, y3, z3)
    }

    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.strip();
        }
        if other.is_identity() {
            return self.strip();
        }
        let u1 = other.y.mul(&self.z);
        let u2 = self.y.mul(&other.z);
        let v1 = other.x.mul(&self.z);
        let v2 = self.x.mul(&other.z);
        if v1 == v2 {
            if u1 == u2 {
                return self.double();
            }
            // P + (-P)
            return Self::identity();
        }
        let u = u1.sub(&u2);
        let v = v1.sub(&v2);
        let vv = v.square();
        let vvv = vv.mul(&v);
        let v2vv = v2.mul(&vv);
        let w = self.z.mul(&other.z);
        let a = u.square().mul(&w).sub(&vvv).sub(&v2vv.mul_u64(2));
        let x3 = v.mul(&a);
        let y3 = u.mul(&v2vv.sub(&a)).sub(&vvv.mul(&u2));
        let z3 = vvv.mul(&w);
        ProjectivePoint::new(x3, y3, z3)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.add(&other.negate())
    }

    /// Scalar multiplication. Answers from the windowed table when one has
    /// been built, otherwise by generic double-and-add.
    pub fn multiply(&self, scalar: &BigUint) -> Self {
        if let Some(table) = &self.window_table {
            if scalar.bits() as usize <= table.capacity_bits() {
                return table.multiply(scalar);
            }
        }
        self.multiply_double_and_add(scalar)
    }

    pub fn multiply_u64(&self, scalar: u64) -> Self {
        self.multiply(&BigUint::from(scalar))
    }

    fn multiply_double_and_add(&self, scalar: &BigUint) -> Self {
        let mut acc = Self::identity();
        let mut base = self.strip();
        for i in 0..scalar.bits() {
            if scalar.bit(i) {
                acc = acc.add(&base);
            }
            base = base.double();
        }
        acc
    }

    /// Build the fixed-base window table. Fails if a table is already
    /// present; call `clear_multiply_table` before rebuilding with a
    /// different window size.
    pub fn build_multiply_table(&mut self, window: usize) -> Result<(), BlsError> {
        if self.window_table.is_some() {
            return Err(BlsError::PrecomputesExist);
        }
        self.window_table = Some(WindowTable::build(self.strip(), window)?);
        Ok(())
    }

    pub fn clear_multiply_table(&mut self) {
        self.window_table = None;
    }

    pub fn multiply_table(&self) -> Option<&WindowTable<F>> {
        self.window_table.as_ref()
    }

    /// Attach Miller-loop line coefficients; managed by `pairing`.
    pub(crate) fn set_pairing_lines(&mut self, lines: Vec<LineTriple<F>>) {
        self.line_table = Some(lines);
    }

    pub fn pairing_lines(&self) -> Option<&[LineTriple<F>]> {
        self.line_table.as_deref()
    }

    pub fn clear_pairing_lines(&mut self) {
        self.line_table = None;
    }
}

/// Equality of the underlying group elements: projective representatives
/// are compared by cross products. Caches do not participate.
impl<F: Field> PartialEq for ProjectivePoint<F> {
    fn eq(&self, other: &Self) -> bool {
        self.x.mul(&other.z) == other.x.mul(&self.z)
            && self.y.mul(&other.z) == other.y.mul(&self.z)
    }
}

impl<F: Field> Eq for ProjectivePoint<F> {}

/// Fixed-base precompute: for each `window`-bit digit position, the table
/// holds the 2^window - 1 non-zero multiples of the position's shifted base,
/// so a multiplication is pure lookups and additions.
#[derive(Clone, Debug)]
pub struct WindowTable<F: Field> {
    window: usize,
    rows: usize,
    points: Vec<ProjectivePoint<F>>,
}

impl<F: Field> WindowTable<F> {
    pub fn build(base: ProjectivePoint<F>, window: usize) -> Result<Self, BlsError> {
        if window == 0 || window > 16 {
            return Err(BlsError::InvalidWindowSize);
        }
        let rows = (rom::SCALAR_BITS + window - 1) / window;
        let per_row = (1usize << window) - 1;
        let mut points = Vec::with_capacity(rows * per_row);
        let mut row_base = base;
        for _ in 0..rows {
            let mut acc = row_base.clone();
            for _ in 0..per_row {
                points.push(acc.clone());
                acc = acc.add(&row_base);
            }
            // acc is now 2^window * row_base, the next row's base.
            row_base = acc;
        }
        Ok(WindowTable {
            window,
            rows,
            points,
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn capacity_bits(&self) -> usize {
        self.window * self.rows
    }

    pub fn multiply(&self, scalar: &BigUint) -> ProjectivePoint<F> {
        let per_row = (1usize << self.window) - 1;
        let mut acc = ProjectivePoint::identity();
        for row in 0..self.rows {
            let mut digit = 0usize;
            for j in 0..self.window {
                if scalar.bit((row * self.window + j) as u64) {
                    digit |= 1 << j;
                }
            }
            if digit != 0 {
                acc = acc.add(&self.points[row * per_row + digit - 1]);
            }
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::Fq;
    use crate::g1::PointG1;

    #[test]
    fn identity_behaves() {
        let g = PointG1::generator();
        let id = PointG1::identity();
        assert_eq!(g.add(&id), g);
        assert_eq!(id.add(&g), g);
        assert_eq!(g.add(&g.negate()), id);
        assert_eq!(id.double(), id);
    }

    #[test]
    fn double_equals_add_self() {
        let g = PointG1::generator();
        assert_eq!(g.double(), g.add(&g));
    }

    #[test]
    fn multiplication_routes_agree() {
        let g = PointG1::generator();
        let three = g.add(&g).add(&g);
        assert_eq!(g.multiply_u64(3), three);
        assert_eq!(g.multiply_u64(6), three.double());
    }

    #[test]
    fn equality_ignores_representative() {
        let g = PointG1::generator();
        let scaled = ProjectivePoint::new(
            g.x.mul_u64(7),
            g.y.mul_u64(7),
            g.z.mul_u64(7),
        );
        assert_eq!(g, scaled);
    }

    #[test]
    fn subgroup_order_annihilates_generator() {
        let g = PointG1::generator();
        assert!(g.multiply(&rom::R).is_identity());
    }

    #[test]
    fn windowed_multiplication_matches_double_and_add() {
        let mut g = PointG1::generator();
        g.build_multiply_table(4).unwrap();
        let scalar = BigUint::parse_bytes(
            b"3a9d1f57c1fd1a79e66f9c74c2a1bd9677b3fd5be32f7cea4e5b898ed3dea735",
            16,
        )
        .unwrap();
        let expected = PointG1::generator().multiply(&scalar);
        assert_eq!(g.multiply(&scalar), expected);
    }

    #[test]
    fn rebuilding_table_requires_clear() {
        let mut g = PointG1::generator();
        g.build_multiply_table(4).unwrap();
        assert_eq!(g.build_multiply_table(5), Err(BlsError::PrecomputesExist));
        g.clear_multiply_table();
        g.build_multiply_table(5).unwrap();
        assert_eq!(g.multiply_table().unwrap().window(), 5);
    }

    #[test]
    fn window_size_is_bounded() {
        let g = PointG1::generator();
        assert_eq!(
            WindowTable::<Fq>::build(g.strip(), 0).err(),
            Some(BlsError::InvalidWindowSize)
        );
        assert_eq!(
            WindowTable::<Fq>::build(g.strip(), 17).err(),
            Some(BlsError::InvalidWindowSize)
        );
    }

    #[test]
    fn to_affine_sentinel_for_identity() {
        let (x, y) = PointG1::identity().to_affine();
        assert!(x.is_zero() && y.is_zero());
    }

    #[test]
    fn affine_round_trip() {
        let p = PointG1::generator().multiply_u64(5);
        let (x, y) = p.to_affine();
        assert_eq!(ProjectivePoint::from_affine(x, y), p);
    }
}
