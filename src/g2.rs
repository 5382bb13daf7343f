//! G2: the twist y^2 = x^3 + 4(1 + i) over Fq2. Signatures and hashed
//! messages live here.

use num_bigint::BigUint;

use crate::errors::BlsError;
use crate::fp::{Field, Fq};
use crate::fp2::Fq2;
use crate::hash_to_curve::{hash_to_field, isogeny_map, map_to_curve_sswu, MessageDigest, Sha256Digest};
use crate::pairing::clear_cofactor_g2;
use crate::point::ProjectivePoint;
use crate::rom;
use crate::DST;

pub type PointG2 = ProjectivePoint<Fq2>;

/// Compressed G2 size in bytes: two 48-byte big-endian limbs, imaginary
/// x-coordinate first.
pub const G2_BYTES: usize = 96;

impl ProjectivePoint<Fq2> {
    pub fn generator() -> Self {
        Self::from_affine(rom::G2_X.clone(), rom::G2_Y.clone())
    }

    /// The explicit trust gate: Y^2 Z = X^3 + b2 Z^3. The identity passes.
    pub fn assert_validity(&self) -> Result<(), BlsError> {
        if self.is_identity() {
            return Ok(());
        }
        let left = self.y.square().mul(&self.z);
        let z3 = self.z.square().mul(&self.z);
        let right = self.x.square().mul(&self.x).add(&rom::B2.mul(&z3));
        if left == right {
            Ok(())
        } else {
            Err(BlsError::PointNotOnCurve)
        }
    }

    /// Decode the 96-byte compressed form. Flags sit in the first limb as
    /// for G1; the sign is the flag of the imaginary y-coordinate, falling
    /// back to the real one when the imaginary part is zero.
    pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != G2_BYTES {
            return Err(BlsError::IncorrectSize);
        }
        let z1 = BigUint::from_bytes_be(&bytes[..G2_BYTES / 2]);
        let z2 = BigUint::from_bytes_be(&bytes[G2_BYTES / 2..]);
        if z1.bit(382) {
            return Ok(Self::identity());
        }
        let x = Fq2::new(Fq::new(z2), Fq::new(&z1 % &*rom::POW_2_381));
        let y2 = x.square().mul(&x).add(&rom::B2);
        let y = y2.sqrt().ok_or(BlsError::PointNotOnCurve)?;
        let aflag = z1.bit(381);
        let wrong_sign = if y.c1.is_zero() {
            y.c0.sign_flag() != aflag
        } else {
            y.c1.sign_flag() != aflag
        };
        let y = if wrong_sign { y.neg() } else { y };
        let point = Self::from_affine(x, y);
        point.assert_validity()?;
        Ok(point)
    }

    /// Compressed 96-byte form; the identity is the fixed flags-only
    /// pattern 0xc0 || 0...
    pub fn to_compressed_bytes(&self) -> [u8; G2_BYTES] {
        let mut out = [0u8; G2_BYTES];
        if self.is_identity() {
            out[0] = 0xc0;
            return out;
        }
        let (x, y) = self.to_affine();
        let aflag = if y.c1.is_zero() {
            y.c0.sign_flag()
        } else {
            y.c1.sign_flag()
        };
        let mut z1 = x.c1.repr().clone() + &*rom::POW_2_383;
        if aflag {
            z1 += &*rom::POW_2_381;
        }
        let raw = z1.to_bytes_be();
        out[G2_BYTES / 2 - raw.len()..G2_BYTES / 2].copy_from_slice(&raw);
        out[G2_BYTES / 2..].copy_from_slice(&x.c0.to_bytes_be());
        out
    }

    /// Deterministically map a message to the prime-order subgroup of G2,
    /// per the hash-to-curve standard: two field elements, simplified SWU
    /// plus 3-isogeny for each, point addition, cofactor clearing.
    pub fn hash_to_curve(msg: &[u8]) -> Result<Self, BlsError> {
        Self::hash_to_curve_with(&Sha256Digest, msg, DST)
    }

    /// As `hash_to_curve` with an injected digest and domain-separation
    /// tag. Values produced under different tags are mutually incompatible.
    pub fn hash_to_curve_with<D: MessageDigest>(
        digest: &D,
        msg: &[u8],
        dst: &[u8],
    ) -> Result<Self, BlsError> {
        let u = hash_to_field(digest, msg, dst, 2, true)?;
        let map_one = |e: &[Fq]| {
            let u_i = Fq2::new(e[0].clone(), e[1].clone());
            let (x, y) = map_to_curve_sswu(&u_i);
            let (x, y) = isogeny_map(&x, &y);
            Self::from_affine(x, y)
        };
        // Two-point construction keeps the output distribution unbiased.
        let r = map_one(&u[0]).add(&map_one(&u[1]));
        Ok(clear_cofactor_g2(&r))
    }
}
