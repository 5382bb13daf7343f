use crate::errors::BlsError;
use crate::fp::Field;
use crate::fp12::Fq12;
use crate::g1::{PointG1, G1_BYTES};
use crate::g2::{PointG2, G2_BYTES};
use crate::keys::PublicKey;
use crate::pairing::{final_exponentiation, pairing};
use crate::signature::Signature;

/// The sum of one or more BLS public keys.
///
/// Verifies an AggregateSignature over a shared message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregatePublicKey {
    pub point: PointG1,
}

impl AggregatePublicKey {
    /// Sum a non-empty slice of public keys.
    pub fn aggregate(keys: &[PublicKey]) -> Result<Self, BlsError> {
        if keys.is_empty() {
            return Err(BlsError::EmptyAggregateInput);
        }
        let mut point = PointG1::identity();
        for key in keys {
            point = point.add(&key.point);
        }
        Ok(AggregatePublicKey { point })
    }

    /// Fold one more public key into the aggregate.
    pub fn add(&mut self, public_key: &PublicKey) {
        self.point = self.point.add(&public_key.point);
    }

    /// The aggregate as an ordinary public key.
    pub fn to_public_key(&self) -> PublicKey {
        PublicKey {
            point: self.point.strip(),
        }
    }

    /// Instantiate from 48 compressed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let point = PointG1::from_compressed_bytes(bytes)?;
        Ok(AggregatePublicKey { point })
    }

    /// Export to 48 compressed bytes.
    pub fn as_bytes(&self) -> [u8; G1_BYTES] {
        self.point.to_compressed_bytes()
    }
}

/// The sum of one or more BLS signatures.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AggregateSignature {
    pub point: PointG2,
}

impl AggregateSignature {
    /// Sum a non-empty slice of signatures.
    pub fn aggregate(signatures: &[Signature]) -> Result<Self, BlsError> {
        if signatures.is_empty() {
            return Err(BlsError::EmptyAggregateInput);
        }
        let mut point = PointG2::identity();
        for signature in signatures {
            point = point.add(&signature.point);
        }
        Ok(AggregateSignature { point })
    }

    /// Fold one more signature into the aggregate.
    pub fn add(&mut self, signature: &Signature) {
        self.point = self.point.add(&signature.point);
    }

    /// Verify the aggregate over one shared message: every aggregated key
    /// must have signed `msg`.
    pub fn verify(&self, msg: &[u8], keys: &AggregatePublicKey) -> Result<bool, BlsError> {
        Signature {
            point: self.point.strip(),
        }
        .verify(msg, &keys.to_public_key())
    }

    /// Verify the aggregate over per-signer messages.
    ///
    /// `messages[i]` must have been signed by `public_keys[i]`. Length
    /// mismatch and empty input are reported as errors up front; past that
    /// gate the check is a total predicate over untrusted input -- every
    /// internal failure (malformed point, pairing at infinity) converts to
    /// `false`.
    ///
    /// Public keys are grouped by equality of their *hashed message
    /// points*, not by message bytes: each group costs one pairing, plus
    /// one for the aggregate itself, under a single final exponentiation.
    pub fn verify_batch(
        &self,
        messages: &[&[u8]],
        public_keys: &[PublicKey],
    ) -> Result<bool, BlsError> {
        if messages.len() != public_keys.len() {
            return Err(BlsError::InputLengthMismatch);
        }
        if messages.is_empty() {
            return Err(BlsError::EmptyInput);
        }
        Ok(self
            .paired_product(messages, public_keys)
            .map(|product| final_exponentiation(&product) == Fq12::one())
            .unwrap_or(false))
    }

    /// Instantiate from 96 compressed bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BlsError> {
        let point = PointG2::from_compressed_bytes(bytes)?;
        Ok(AggregateSignature { point })
    }

    /// Export to 96 compressed bytes.
    pub fn as_bytes(&self) -> [u8; G2_BYTES] {
        self.point.to_compressed_bytes()
    }

    fn paired_product(
        &self,
        messages: &[&[u8]],
        public_keys: &[PublicKey],
    ) -> Result<Fq12, BlsError> {
        let mut hashed = Vec::with_capacity(messages.len());
        for msg in messages {
            hashed.push(PointG2::hash_to_curve(msg)?);
        }
        // Group keys under equal hashed points. Two byte-distinct messages
        // hashing to one point are merged; that collision is negligible and
        // the merge is what the pairing optimization requires.
        let mut groups: Vec<(PointG2, PointG1)> = Vec::new();
        for (hash_point, key) in hashed.iter().zip(public_keys) {
            match groups.iter_mut().find(|(h, _)| *h == *hash_point) {
                Some((_, combined)) => *combined = combined.add(&key.point),
                None => groups.push((hash_point.strip(), key.point.strip())),
            }
        }
        let mut product = Fq12::one();
        for (hash_point, combined_key) in &groups {
            product = product.mul(&pairing(combined_key, hash_point, false)?);
        }
        let negated_generator = PointG1::generator().negate();
        product = product.mul(&pairing(&negated_generator, &self.point, false)?);
        Ok(product)
    }
}
