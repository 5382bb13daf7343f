//! G1: the curve y^2 = x^3 + 4 over Fq. Public keys live here.

use num_bigint::BigUint;

use crate::errors::BlsError;
use crate::fp::{Field, Fq};
use crate::point::{ProjectivePoint, WindowTable};
use crate::rom;
use crate::DEFAULT_WINDOW_SIZE;

pub type PointG1 = ProjectivePoint<Fq>;

/// Compressed G1 size in bytes.
pub const G1_BYTES: usize = 48;

lazy_static! {
    /// Fixed-base table for the G1 generator, built once at startup and
    /// shared by all public-key derivations.
    pub static ref G1_BASE_TABLE: WindowTable<Fq> =
        WindowTable::build(PointG1::generator(), DEFAULT_WINDOW_SIZE).unwrap();
}

impl ProjectivePoint<Fq> {
    pub fn generator() -> Self {
        Self::from_affine(rom::G1_X.clone(), rom::G1_Y.clone())
    }

    /// The explicit trust gate: Y^2 Z = X^3 + b Z^3. The identity passes.
    pub fn assert_validity(&self) -> Result<(), BlsError> {
        if self.is_identity() {
            return Ok(());
        }
        let left = self.y.square().mul(&self.z);
        let z3 = self.z.square().mul(&self.z);
        let right = self.x.square().mul(&self.x).add(&rom::B.mul(&z3));
        if left == right {
            Ok(())
        } else {
            Err(BlsError::PointNotOnCurve)
        }
    }

    /// Decode the 48-byte compressed form: bit 383 marks compression,
    /// bit 382 the identity, bit 381 carries the sign of y as floor(2y/P);
    /// the low 381 bits are x.
    pub fn from_compressed_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != G1_BYTES {
            return Err(BlsError::IncorrectSize);
        }
        let z = BigUint::from_bytes_be(bytes);
        if z.bit(382) {
            return Ok(Self::identity());
        }
        let x = Fq::new(&z % &*rom::POW_2_381);
        let y2 = x.square().mul(&x).add(&rom::B);
        let y = y2.sqrt().ok_or(BlsError::PointNotOnCurve)?;
        let y = if y.sign_flag() != z.bit(381) {
            y.neg()
        } else {
            y
        };
        Ok(Self::from_affine(x, y))
    }

    /// Compressed 48-byte form; the identity is the fixed flags-only
    /// pattern 0xc0 || 0...
    pub fn to_compressed_bytes(&self) -> [u8; G1_BYTES] {
        let mut out = [0u8; G1_BYTES];
        if self.is_identity() {
            out[0] = 0xc0;
            return out;
        }
        let (x, y) = self.to_affine();
        let mut acc = x.repr().clone() + &*rom::POW_2_383;
        if y.sign_flag() {
            acc += &*rom::POW_2_381;
        }
        let raw = acc.to_bytes_be();
        out[G1_BYTES - raw.len()..].copy_from_slice(&raw);
        out
    }

    /// Uncompressed 96-byte x || y form; the identity is all zeroes.
    pub fn to_uncompressed_bytes(&self) -> [u8; 2 * G1_BYTES] {
        let mut out = [0u8; 2 * G1_BYTES];
        if self.is_identity() {
            return out;
        }
        let (x, y) = self.to_affine();
        out[..G1_BYTES].copy_from_slice(&x.to_bytes_be());
        out[G1_BYTES..].copy_from_slice(&y.to_bytes_be());
        out
    }

    pub fn from_uncompressed_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        if bytes.len() != 2 * G1_BYTES {
            return Err(BlsError::IncorrectSize);
        }
        if bytes.iter().all(|b| *b == 0) {
            return Ok(Self::identity());
        }
        let point = Self::from_affine(
            Fq::from_bytes_be(&bytes[..G1_BYTES]),
            Fq::from_bytes_be(&bytes[G1_BYTES..]),
        );
        point.assert_validity()?;
        Ok(point)
    }

    /// sk * G1_BASE through the startup window table.
    pub fn from_secret_scalar(scalar: &BigUint) -> Self {
        if scalar.bits() as usize <= G1_BASE_TABLE.capacity_bits() {
            G1_BASE_TABLE.multiply(scalar)
        } else {
            Self::generator().multiply(scalar)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // The canonical compressed generator, shared by every BLS12-381
    // implementation.
    const G1_GENERATOR_COMPRESSED: &str =
        "97f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb";

    #[test]
    fn generator_is_on_curve() {
        PointG1::generator().assert_validity().unwrap();
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let bogus = PointG1::from_affine(Fq::from_u64(1), Fq::from_u64(1));
        assert_eq!(bogus.assert_validity(), Err(BlsError::PointNotOnCurve));
    }

    #[test]
    fn generator_compresses_to_known_bytes() {
        let bytes = PointG1::generator().to_compressed_bytes();
        assert_eq!(hex::encode(bytes), G1_GENERATOR_COMPRESSED);
    }

    #[test]
    fn compressed_round_trip() {
        for k in 1u64..=10 {
            let p = PointG1::generator().multiply_u64(k);
            let decoded = PointG1::from_compressed_bytes(&p.to_compressed_bytes()).unwrap();
            assert_eq!(decoded, p);
        }
    }

    #[test]
    fn identity_round_trip() {
        let bytes = PointG1::identity().to_compressed_bytes();
        assert_eq!(bytes[0], 0xc0);
        assert!(bytes[1..].iter().all(|b| *b == 0));
        assert!(PointG1::from_compressed_bytes(&bytes)
            .unwrap()
            .is_identity());
    }

    #[test]
    fn x_without_square_root_is_rejected() {
        // Roughly half of all x values have no matching y; find the first.
        let bad_x = (1u8..=255)
            .find(|&v| {
                let x = Fq::from_u64(u64::from(v));
                x.square().mul(&x).add(&rom::B).sqrt().is_none()
            })
            .unwrap();
        let mut bytes = [0u8; G1_BYTES];
        bytes[0] = 0x80;
        bytes[G1_BYTES - 1] = bad_x;
        assert_eq!(
            PointG1::from_compressed_bytes(&bytes),
            Err(BlsError::PointNotOnCurve)
        );
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            PointG1::from_compressed_bytes(&[0u8; 47]),
            Err(BlsError::IncorrectSize)
        );
        assert_eq!(
            PointG1::from_compressed_bytes(&[0u8; 49]),
            Err(BlsError::IncorrectSize)
        );
    }

    #[test]
    fn uncompressed_round_trip() {
        let p = PointG1::generator().multiply_u64(9);
        let decoded = PointG1::from_uncompressed_bytes(&p.to_uncompressed_bytes()).unwrap();
        assert_eq!(decoded, p);
        assert!(
            PointG1::from_uncompressed_bytes(&[0u8; 96])
                .unwrap()
                .is_identity()
        );
    }

    #[test]
    fn uncompressed_bad_point_is_rejected() {
        let mut bytes = [0u8; 96];
        bytes[47] = 1;
        bytes[95] = 1;
        assert_eq!(
            PointG1::from_uncompressed_bytes(&bytes),
            Err(BlsError::PointNotOnCurve)
        );
    }

    #[test]
    fn secret_scalar_multiplication_matches_generic() {
        let scalar = BigUint::parse_bytes(
            b"263dbd792f5b1be47ed85f8938c0f29586af0d3ac7b977f21c278fe1462040e3",
            16,
        )
        .unwrap();
        assert_eq!(
            PointG1::from_secret_scalar(&scalar),
            PointG1::generator().multiply(&scalar)
        );
    }
}
