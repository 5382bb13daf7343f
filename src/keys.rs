use std::fmt;

use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;
use zeroize::Zeroize;

use crate::errors::BlsError;
use crate::g1::{PointG1, G1_BYTES};
use crate::rom;

/// A BLS secret key: a scalar in (0, r), stored as its canonical 32-byte
/// big-endian encoding and scrubbed on drop.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey {
    bytes: [u8; 32],
}

impl SecretKey {
    /// Generate a fresh key from an Rng. 64 bytes are drawn so the
    /// reduction mod r is unbiased.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        loop {
            let mut seed = [0u8; 64];
            rng.fill(&mut seed[..]);
            let x = BigUint::from_bytes_be(&seed) % &*rom::R;
            seed.zeroize();
            if !x.is_zero() {
                return SecretKey::from_scalar(&x);
            }
        }
    }

    /// Instantiate from big-endian bytes, at most 48 of them. The value is
    /// reduced mod r; the group has order r, so reduction preserves every
    /// derived key and signature. A scalar of zero is rejected.
    pub fn from_bytes(input: &[u8]) -> Result<SecretKey, BlsError> {
        if input.len() > G1_BYTES {
            return Err(BlsError::IncorrectSize);
        }
        let x = BigUint::from_bytes_be(input) % &*rom::R;
        if x.is_zero() {
            return Err(BlsError::ZeroSecretKey);
        }
        Ok(SecretKey::from_scalar(&x))
    }

    /// Export the canonical 32-byte encoding.
    pub fn as_bytes(&self) -> [u8; 32] {
        self.bytes
    }

    pub(crate) fn scalar(&self) -> BigUint {
        BigUint::from_bytes_be(&self.bytes)
    }

    fn from_scalar(x: &BigUint) -> Self {
        let raw = x.to_bytes_be();
        let mut bytes = [0u8; 32];
        bytes[32 - raw.len()..].copy_from_slice(&raw);
        SecretKey { bytes }
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecretKey(0x{})", hex::encode(self.bytes))
    }
}

/// A BLS public key: the secret scalar times the G1 generator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    pub point: PointG1,
}

impl PublicKey {
    /// Instantiate a PublicKey from some SecretKey, through the startup
    /// fixed-base table.
    pub fn from_secret_key(sk: &SecretKey) -> Self {
        PublicKey {
            point: PointG1::from_secret_scalar(&sk.scalar()),
        }
    }

    /// Instantiate a PublicKey from 48 compressed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, BlsError> {
        let point = PointG1::from_compressed_bytes(bytes)?;
        Ok(PublicKey { point })
    }

    /// Export the PublicKey to 48 compressed bytes.
    pub fn as_bytes(&self) -> [u8; G1_BYTES] {
        self.point.to_compressed_bytes()
    }

    /// Export the public key to uncompressed (x, y) bytes.
    pub fn as_uncompressed_bytes(&self) -> [u8; 2 * G1_BYTES] {
        self.point.to_uncompressed_bytes()
    }

    /// Instantiate a PublicKey from uncompressed (x, y) bytes.
    pub fn from_uncompressed_bytes(bytes: &[u8]) -> Result<PublicKey, BlsError> {
        let point = PointG1::from_uncompressed_bytes(bytes)?;
        Ok(PublicKey { point })
    }
}

/// A helper which stores a BLS public and private key pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Keypair {
    pub sk: SecretKey,
    pub pk: PublicKey,
}

impl Keypair {
    /// Instantiate a Keypair using SecretKey::random().
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let sk = SecretKey::random(rng);
        let pk = PublicKey::from_secret_key(&sk);
        Keypair { sk, pk }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::Signature;

    #[test]
    fn secret_key_serialization_isomorphism() {
        let sk_bytes = [
            0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 78, 252, 122, 126, 32, 0, 75, 89,
            252, 31, 42, 130, 254, 88, 6, 90, 138, 202, 135, 194, 233, 117, 181, 75, 96, 238, 79,
            100, 237, 59, 140, 111,
        ];
        let sk = SecretKey::from_bytes(&sk_bytes).unwrap();
        // Canonical export is 32 bytes; the 16 leading zeroes drop off.
        assert_eq!(sk.as_bytes().to_vec(), sk_bytes[16..].to_vec());
    }

    #[test]
    fn secret_key_size_limits() {
        assert!(SecretKey::from_bytes(&[1u8; 1]).is_ok());
        assert!(SecretKey::from_bytes(&[1u8; 48]).is_ok());
        assert_eq!(
            SecretKey::from_bytes(&[1u8; 49]),
            Err(BlsError::IncorrectSize)
        );
    }

    #[test]
    fn zero_secret_key_is_rejected() {
        assert_eq!(
            SecretKey::from_bytes(&[0u8; 32]),
            Err(BlsError::ZeroSecretKey)
        );
        assert_eq!(SecretKey::from_bytes(&[]), Err(BlsError::ZeroSecretKey));
        // A multiple of r reduces to zero.
        let r_bytes = rom::R.to_bytes_be();
        assert_eq!(
            SecretKey::from_bytes(&r_bytes),
            Err(BlsError::ZeroSecretKey)
        );
    }

    #[test]
    fn oversize_scalar_is_reduced() {
        // r + 1 and 1 derive the same key.
        let r_plus_one = (&*rom::R + 1u32).to_bytes_be();
        let sk1 = SecretKey::from_bytes(&r_plus_one).unwrap();
        let sk2 = SecretKey::from_bytes(&[1u8]).unwrap();
        assert_eq!(sk1, sk2);
    }

    #[test]
    fn public_key_serialization_isomorphism() {
        for _ in 0..5 {
            let sk = SecretKey::random(&mut rand::thread_rng());
            let pk = PublicKey::from_secret_key(&sk);
            let decoded = pk.as_bytes();
            let encoded = PublicKey::from_bytes(&decoded).unwrap();
            assert_eq!(encoded.as_bytes().to_vec(), decoded.to_vec());
        }
    }

    #[test]
    fn public_key_uncompressed_serialization_isomorphism() {
        let sk = SecretKey::random(&mut rand::thread_rng());
        let pk = PublicKey::from_secret_key(&sk);
        let decoded = pk.as_uncompressed_bytes();
        let encoded = PublicKey::from_uncompressed_bytes(&decoded).unwrap();
        assert_eq!(encoded, pk);
    }

    #[test]
    fn public_key_uncompressed_serialization_incorrect_size() {
        for len in [1usize, 95, 97] {
            let bytes = vec![1u8; len];
            assert_eq!(
                PublicKey::from_uncompressed_bytes(&bytes),
                Err(BlsError::IncorrectSize)
            );
        }
    }

    #[test]
    fn public_key_uncompressed_serialization_bad_point() {
        // Point (1, 1) is not valid.
        let mut bytes = [0u8; 96];
        bytes[47] = 1;
        bytes[95] = 1;
        assert_eq!(
            PublicKey::from_uncompressed_bytes(&bytes),
            Err(BlsError::PointNotOnCurve)
        );
    }

    #[test]
    fn signature_verifies_with_serialized_public_key() {
        let sk_bytes = [
            78, 252, 122, 126, 32, 0, 75, 89, 252, 31, 42, 130, 254, 88, 6, 90, 138, 202, 135,
            194, 233, 117, 181, 75, 96, 238, 79, 100, 237, 59, 140, 111,
        ];
        let sk = SecretKey::from_bytes(&sk_bytes).unwrap();
        let pk = PublicKey::from_secret_key(&sk);

        let message = "cats".as_bytes();
        let signature = Signature::new(message, &sk).unwrap();
        assert!(signature.verify(message, &pk).unwrap());

        let pk = PublicKey::from_bytes(&pk.as_bytes()).unwrap();
        assert!(signature.verify(message, &pk).unwrap());
    }

    #[test]
    fn random_secret_key_can_sign() {
        let keypair = Keypair::random(&mut rand::thread_rng());
        let message = "cats".as_bytes();
        let signature = Signature::new(message, &keypair.sk).unwrap();
        assert!(signature.verify(message, &keypair.pk).unwrap());
    }
}
