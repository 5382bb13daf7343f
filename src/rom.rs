//! Curve constants for BLS12-381.
//!
//! Everything here is fixed by the curve standard: the base-field modulus,
//! the subgroup order, the (negative) BLS parameter x, both generators and
//! the simplified-SWU / 3-isogeny coefficient tables for hashing to G2.
//! Frobenius coefficients are derived from the modulus at startup instead of
//! being transcribed, since they are pure functions of P.

use num_bigint::BigUint;
use num_traits::One;

use crate::fp::{Field, Fq};
use crate::fp2::Fq2;

/// Absolute value of the BLS parameter x. The parameter itself is negative;
/// call sites multiply by |x| and negate.
pub const BLS_X: u64 = 0xd201_0000_0001_0000;

/// Bit length of `BLS_X`, the Miller-loop iteration count driver.
pub const BLS_X_BITS: u32 = 64;

/// Scalars handled by the windowed multiplier are below 2^256.
pub const SCALAR_BITS: usize = 256;

fn big(hex: &str) -> BigUint {
    BigUint::from_bytes_be(&hex::decode(hex).unwrap())
}

fn fq(hex: &str) -> Fq {
    Fq::new(big(hex))
}

fn fq2(c0: &str, c1: &str) -> Fq2 {
    Fq2::new(fq(c0), fq(c1))
}

lazy_static! {
    /// Base field modulus P.
    pub static ref P: BigUint =
        big("1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaaab");

    /// Prime order r of G1, G2 and GT.
    pub static ref R: BigUint =
        big("73eda753299d7d483339d80809a1d80553bda402fffe5bfeffffffff00000001");

    // Fixed exponents of the closed-form field formulas.
    pub static ref P_MINUS_2: BigUint = &*P - 2u32;
    pub static ref P_PLUS_1_OVER_4: BigUint = (&*P + 1u32) >> 2u32;
    pub static ref P_MINUS_3_OVER_4: BigUint = (&*P - 3u32) >> 2u32;
    pub static ref P_MINUS_1_OVER_2: BigUint = (&*P - 1u32) >> 1u32;

    // Bit masks of the compressed encoding.
    pub static ref POW_2_381: BigUint = BigUint::one() << 381u32;
    pub static ref POW_2_383: BigUint = BigUint::one() << 383u32;

    /// G1 curve coefficient: y^2 = x^3 + 4.
    pub static ref B: Fq = Fq::from_u64(4);

    /// G2 (twist) curve coefficient: y^2 = x^3 + 4(1 + i).
    pub static ref B2: Fq2 = Fq2::from_u64s(4, 4);

    pub static ref G1_X: Fq =
        fq("17f1d3a73197d7942695638c4fa9ac0fc3688c4f9774b905a14e3a3f171bac586c55e83ff97a1aeffb3af00adb22c6bb");
    pub static ref G1_Y: Fq =
        fq("08b3f481e3aaa0f1a09e30ed741d8ae4fcf5e095d5d00af600db18cb2c04b3edd03cc744a2888ae40caa232946c5e7e1");

    pub static ref G2_X: Fq2 = fq2(
        "024aa2b2f08f0a91260805272dc51051c6e47ad4fa403b02b4510b647ae3d1770bac0326a805bbefd48056c8c121bdb8",
        "13e02b6052719f607dacd3a088274f65596bd0d09920b61ab5da61bbdc7f5049334cf11213945d57e5ac7d055d042b7e",
    );
    pub static ref G2_Y: Fq2 = fq2(
        "0ce5d527727d6e118cc9cdc6da2e351aadfd9baa8cbdd3a76d429a695160d12c923ac9cc3baca289e193548608b82801",
        "0606c4a02ea734cc32acd2b02bc28b99cb3e287e85a763af267492ab572e99ab3f370d275cec1da1aaa9075ff05f79be",
    );

    // Parameters of the 3-isogenous curve E': y^2 = x^3 + A'x + B' used by
    // the simplified SWU map, and the map's non-square Z = -(2 + i).
    pub static ref ISO3_A: Fq2 = Fq2::from_u64s(0, 240);
    pub static ref ISO3_B: Fq2 = Fq2::from_u64s(1012, 1012);
    pub static ref SSWU_Z: Fq2 = Fq2::from_u64s(2, 1).neg();

    // 3-isogeny rational map E' -> G2. Four numerator/denominator
    // polynomials, low-order coefficient first; short polynomials are
    // zero-padded so the Horner evaluation is uniform.
    pub static ref ISO3_X_NUM: [Fq2; 4] = [
        fq2(
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97d6",
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97d6",
        ),
        fq2(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71a",
        ),
        fq2(
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71e",
            "08ab05f8bdd54cde190937e76bc3e447cc27c3d6fbd7063fcd104635a790520c0a395554e5c6aaaa9354ffffffffe38d",
        ),
        fq2(
            "171d6541fa38ccfaed6dea691f5fb614cb14b4e7f4e810aa22d6108f142b85757098e38d0f671c7188e2aaaaaaaa5ed1",
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
        ),
    ];
    pub static ref ISO3_X_DEN: [Fq2; 4] = [
        fq2(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa63",
        ),
        fq2(
            "00000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000c",
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa9f",
        ),
        Fq2::from_u64s(1, 0),
        Fq2::from_u64s(0, 0),
    ];
    pub static ref ISO3_Y_NUM: [Fq2; 4] = [
        fq2(
            "1530477c7ab4113b59a4c18b076d11930f7da5d4a07f649bf54439d87d27e500fc8c25ebf8c92f6812cfc71c71c6d706",
            "1530477c7ab4113b59a4c18b076d11930f7da5d4a07f649bf54439d87d27e500fc8c25ebf8c92f6812cfc71c71c6d706",
        ),
        fq2(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            "05c759507e8e333ebb5b7a9a47d7ed8532c52d39fd3a042a88b58423c50ae15d5c2638e343d9c71c6238aaaaaaaa97be",
        ),
        fq2(
            "11560bf17baa99bc32126fced787c88f984f87adf7ae0c7f9a208c6b4f20a4181472aaa9cb8d555526a9ffffffffc71c",
            "08ab05f8bdd54cde190937e76bc3e447cc27c3d6fbd7063fcd104635a790520c0a395554e5c6aaaa9354ffffffffe38f",
        ),
        fq2(
            "124c9ad43b6cf79bfbf7043de3811ad0761b0f37a1e26286b0e977c69aa274524e79097a56dc4bd9e1b371c71c718b10",
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
        ),
    ];
    pub static ref ISO3_Y_DEN: [Fq2; 4] = [
        fq2(
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa8fb",
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa8fb",
        ),
        fq2(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000",
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffa9d3",
        ),
        fq2(
            "000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000012",
            "1a0111ea397fe69a4b1ba7b6434bacd764774b84f38512bf6730d2a0f6b0f6241eabfffeb153ffffb9feffffffffaa99",
        ),
        Fq2::from_u64s(1, 0),
    ];

    // Frobenius coefficients of the tower, derived from P at startup.
    // xi = 1 + i is the Fq6 non-residue; v^p^k = xi^((p^k - 1)/3) * v and
    // w^p^k = xi^((p^k - 1)/6) * w.
    pub static ref FROBENIUS_FQ6_C1: [Fq2; 6] =
        core::array::from_fn(|k| frobenius_coeff(k as u32, 3u32));
    pub static ref FROBENIUS_FQ6_C2: [Fq2; 6] =
        core::array::from_fn(|k| FROBENIUS_FQ6_C1[k].square());
    pub static ref FROBENIUS_FQ12: [Fq2; 12] =
        core::array::from_fn(|k| frobenius_coeff(k as u32, 6u32));
}

fn frobenius_coeff(power: u32, divisor: u32) -> Fq2 {
    let xi = Fq2::from_u64s(1, 1);
    let exp = (P.pow(power) - 1u32) / divisor;
    xi.pow(&exp)
}
