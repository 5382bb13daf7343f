//! BLS12-381 aggregate signatures over a self-contained pairing
//! implementation.
//!
//! The whole computation stack lives in this crate: prime-field and tower
//! arithmetic (`fp` through `fp12`), the projective group law shared by G1
//! and G2 (`point`), the optimal ate pairing (`pairing`), standardized
//! hashing to G2 (`hash_to_curve`), compressed point codecs (`g1`, `g2`)
//! and the signature scheme itself (`keys`, `signature`, `aggregates`).
//!
//! Values are deterministic and interoperable bit-for-bit with the BLS
//! signature and hash-to-curve standards. This is not a constant-time
//! implementation; do not use it where timing side channels matter.

#[macro_use]
extern crate lazy_static;

mod aggregates;
mod errors;
mod fp;
mod fp12;
mod fp2;
mod fp6;
mod g1;
mod g2;
mod hash_to_curve;
mod keys;
mod pairing;
mod point;
mod rom;
mod signature;

pub use aggregates::{AggregatePublicKey, AggregateSignature};
pub use errors::BlsError;
pub use fp::{Field, Fq};
pub use fp12::Fq12;
pub use fp2::Fq2;
pub use fp6::Fq6;
pub use g1::{PointG1, G1_BYTES};
pub use g2::{PointG2, G2_BYTES};
pub use hash_to_curve::{
    expand_message_xmd, hash_to_field, isogeny_map, map_to_curve_sswu, MessageDigest,
    Sha256Digest,
};
pub use keys::{Keypair, PublicKey, SecretKey};
pub use pairing::{
    build_pairing_lines, clear_cofactor_g2, final_exponentiation, miller_loop, pairing,
};
pub use point::{LineTriple, ProjectivePoint, WindowTable};
pub use signature::Signature;

/// The process-wide domain-separation tag, fixed before any signing or
/// verification. Values produced under different tags are mutually
/// incompatible, and substituting the digest requires changing it.
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_NUL_";

/// Window size of the startup G1 fixed-base table.
pub const DEFAULT_WINDOW_SIZE: usize = 4;
