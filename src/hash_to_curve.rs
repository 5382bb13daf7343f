//! Deterministic hashing of byte messages to field elements and curve
//! points, per the hash-to-curve standard: expand_message_xmd over an
//! injected digest, hash_to_field, the simplified SWU map onto the
//! 3-isogenous curve and the rational map back to G2.

use sha2::{Digest, Sha256};

use crate::errors::BlsError;
use crate::fp::{Field, Fq};
use crate::fp2::Fq2;
use crate::rom;

/// The injected digest capability: a deterministic, collision-resistant
/// 32-byte hash. Substituting a different digest requires a new
/// domain-separation tag, or old and new outputs become ambiguous.
pub trait MessageDigest {
    fn digest(&self, data: &[u8]) -> [u8; 32];
}

/// The default SHA-256 backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha256Digest;

impl MessageDigest for Sha256Digest {
    fn digest(&self, data: &[u8]) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }
}

// Digest block/output size in bytes.
const B_IN_BYTES: usize = 32;
// Bytes drawn per field element: ceil((381 + 128) / 8) rounded to 64.
const L: usize = 64;

/// Expand `msg` into `len_in_bytes` uniform bytes under `dst`.
pub fn expand_message_xmd<D: MessageDigest>(
    digest: &D,
    msg: &[u8],
    dst: &[u8],
    len_in_bytes: usize,
) -> Result<Vec<u8>, BlsError> {
    let ell = (len_in_bytes + B_IN_BYTES - 1) / B_IN_BYTES;
    if ell > 255 {
        return Err(BlsError::InvalidXmdLength);
    }
    let mut dst_prime = dst.to_vec();
    dst_prime.push(dst.len() as u8);

    // b_0 = H(Z_pad || msg || len || 0x00 || DST')
    let mut msg_prime = Vec::with_capacity(2 * B_IN_BYTES + msg.len() + 3 + dst_prime.len());
    msg_prime.extend_from_slice(&[0u8; 2 * B_IN_BYTES]);
    msg_prime.extend_from_slice(msg);
    msg_prime.push((len_in_bytes >> 8) as u8);
    msg_prime.push(len_in_bytes as u8);
    msg_prime.push(0u8);
    msg_prime.extend_from_slice(&dst_prime);
    let b0 = digest.digest(&msg_prime);

    let mut out = Vec::with_capacity(ell * B_IN_BYTES);
    let mut block = Vec::with_capacity(B_IN_BYTES + 1 + dst_prime.len());
    block.extend_from_slice(&b0);
    block.push(1u8);
    block.extend_from_slice(&dst_prime);
    let mut prev = digest.digest(&block);
    out.extend_from_slice(&prev);
    for i in 1..ell {
        let mut block = Vec::with_capacity(B_IN_BYTES + 1 + dst_prime.len());
        for j in 0..B_IN_BYTES {
            block.push(b0[j] ^ prev[j]);
        }
        block.push((i + 1) as u8);
        block.extend_from_slice(&dst_prime);
        prev = digest.digest(&block);
        out.extend_from_slice(&prev);
    }
    out.truncate(len_in_bytes);
    Ok(out)
}

/// Hash `msg` to `count` field elements of extension degree `degree`, where
/// `count` is 2 in random-oracle mode and 1 otherwise. Each element is read
/// as `degree` 64-byte big-endian integers reduced mod P.
pub fn hash_to_field<D: MessageDigest>(
    digest: &D,
    msg: &[u8],
    dst: &[u8],
    degree: usize,
    random_oracle: bool,
) -> Result<Vec<Vec<Fq>>, BlsError> {
    let count = if random_oracle { 2 } else { 1 };
    let len_in_bytes = count * degree * L;
    let uniform = expand_message_xmd(digest, msg, dst, len_in_bytes)?;
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let mut element = Vec::with_capacity(degree);
        for j in 0..degree {
            let offset = L * (j + i * degree);
            element.push(Fq::from_bytes_be(&uniform[offset..offset + L]));
        }
        out.push(element);
    }
    Ok(out)
}

// inv0 of the map specification: 1/x, with 0 mapping to 0.
fn inv0(x: &Fq2) -> Fq2 {
    x.invert().unwrap_or_else(Fq2::zero)
}

/// The simplified SWU map onto the 3-isogenous curve
/// E': y^2 = x^3 + A'x + B'. Output is uniquely determined by `u`:
/// exactly one of the two candidate x-coordinates yields a square, and the
/// root's sign is tied to sgn0(u).
pub fn map_to_curve_sswu(u: &Fq2) -> (Fq2, Fq2) {
    let a = &*rom::ISO3_A;
    let b = &*rom::ISO3_B;
    let z = &*rom::SSWU_Z;

    let tv1 = z.mul(&u.square());
    let tv2 = tv1.square();
    let denom = tv1.add(&tv2);
    let x1 = if denom.is_zero() {
        // Exceptional case: x1 = B / (Z * A).
        b.mul(&inv0(&z.mul(a)))
    } else {
        b.neg().mul(&inv0(a)).mul(&Fq2::one().add(&inv0(&denom)))
    };
    let gx1 = x1.square().mul(&x1).add(&a.mul(&x1)).add(b);
    let (x, y) = match gx1.sqrt() {
        Some(y1) => (x1, y1),
        None => {
            // g(x2) = Z^3 u^6 g(x1) is a square exactly when g(x1) is not.
            let x2 = tv1.mul(&x1);
            let gx2 = x2.square().mul(&x2).add(&a.mul(&x2)).add(b);
            match gx2.sqrt() {
                Some(y2) => (x2, y2),
                None => (Fq2::zero(), Fq2::zero()),
            }
        }
    };
    let y = if u.sgn0() != y.sgn0() { y.neg() } else { y };
    (x, y)
}

fn horner(coefficients: &[Fq2; 4], x: &Fq2) -> Fq2 {
    let mut acc = coefficients[3].clone();
    for k in coefficients[..3].iter().rev() {
        acc = acc.mul(x).add(k);
    }
    acc
}

/// The published 3-isogeny rational map from E' onto G2's curve.
pub fn isogeny_map(x: &Fq2, y: &Fq2) -> (Fq2, Fq2) {
    let x_out = horner(&rom::ISO3_X_NUM, x).mul(&inv0(&horner(&rom::ISO3_X_DEN, x)));
    let y_out = y
        .mul(&horner(&rom::ISO3_Y_NUM, x))
        .mul(&inv0(&horner(&rom::ISO3_Y_DEN, x)));
    (x_out, y_out)
}
