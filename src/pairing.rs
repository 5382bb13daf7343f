//! The optimal ate pairing e: G1 x G2 -> GT.
//!
//! Line coefficients for a fixed G2 point are computed once and walked by
//! the Miller loop; the final exponentiation uses the cyclotomic-subgroup
//! route (Frobenius easy part, x-keyed hard part) rather than a naive
//! big-integer power. Callers that multiply several pairings together pass
//! `with_final_exp = false` and exponentiate the product once.

use crate::errors::BlsError;
use crate::fp::{Field, Fq};
use crate::fp2::Fq2;
use crate::fp6::Fq6;
use crate::fp12::Fq12;
use crate::g1::PointG1;
use crate::g2::PointG2;
use crate::point::LineTriple;
use crate::rom;

lazy_static! {
    // w^2 and w^3 as Fq12 values; the untwist-Frobenius-twist endomorphism
    // conjugates coordinates through them.
    static ref WSQ: Fq12 = Fq12::new(
        Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero()),
        Fq6::zero(),
    );
    static ref WSQ_INV: Fq12 = WSQ.invert().unwrap();
    static ref WCU: Fq12 = Fq12::new(
        Fq6::zero(),
        Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero()),
    );
    static ref WCU_INV: Fq12 = WCU.invert().unwrap();
}

/// The ordered line-evaluation triples for the Miller loop over a fixed
/// affine G2 point.
pub fn line_coefficients(qx: &Fq2, qy: &Fq2) -> Vec<LineTriple<Fq2>> {
    let mut ell = Vec::with_capacity(rom::BLS_X.count_ones() as usize + 63);
    let mut rx = qx.clone();
    let mut ry = qy.clone();
    let mut rz = Fq2::one();
    for i in (0..=rom::BLS_X_BITS - 2).rev() {
        // Doubling step.
        let t0 = ry.square();
        let t1 = rz.square();
        let t2 = t1.mul_u64(3).mul(&rom::B2);
        let t3 = t2.mul_u64(3);
        let t4 = ry.add(&rz).square().sub(&t1).sub(&t0);
        ell.push([t2.sub(&t0), rx.square().mul_u64(3), t4.neg()]);
        let new_rx = t0.sub(&t3).mul(&rx).mul(&ry).halve();
        let new_ry = t0.add(&t3).halve().square().sub(&t2.square().mul_u64(3));
        let new_rz = t0.mul(&t4);
        rx = new_rx;
        ry = new_ry;
        rz = new_rz;
        if (rom::BLS_X >> i) & 1 == 1 {
            // Addition step.
            let t0 = ry.sub(&qy.mul(&rz));
            let t1 = rx.sub(&qx.mul(&rz));
            ell.push([t0.mul(qx).sub(&t1.mul(qy)), t0.neg(), t1.clone()]);
            let t2 = t1.square();
            let t3 = t2.mul(&t1);
            let t4 = t2.mul(&rx);
            let t5 = t3.sub(&t4.mul_u64(2)).add(&t0.square().mul(&rz));
            let new_rx = t1.mul(&t5);
            let new_ry = t4.sub(&t5).mul(&t0).sub(&t3.mul(&ry));
            let new_rz = rz.mul(&t3);
            rx = new_rx;
            ry = new_ry;
            rz = new_rz;
        }
    }
    ell
}

/// Derive and cache the line table on a G2 point. Must be rebuilt if the
/// point changes; `clear_pairing_lines` drops it.
pub fn build_pairing_lines(q: &mut PointG2) -> Result<(), BlsError> {
    if q.is_identity() {
        return Err(BlsError::PairingAtInfinity);
    }
    if q.pairing_lines().is_some() {
        return Err(BlsError::PrecomputesExist);
    }
    let (qx, qy) = q.to_affine();
    q.set_pairing_lines(line_coefficients(&qx, &qy));
    Ok(())
}

/// Walk |x|'s bits from the second-most-significant down, squaring the
/// accumulator and folding in line evaluations at the affine G1 point; the
/// final conjugation accounts for x being negative.
pub fn miller_loop(lines: &[LineTriple<Fq2>], px: &Fq, py: &Fq) -> Fq12 {
    let mut f = Fq12::one();
    let mut j = 0;
    for i in (0..=rom::BLS_X_BITS - 2).rev() {
        let c = &lines[j];
        f = f.mul_by_014(&c[0], &c[1].scale(px), &c[2].scale(py));
        if (rom::BLS_X >> i) & 1 == 1 {
            j += 1;
            let c = &lines[j];
            f = f.mul_by_014(&c[0], &c[1].scale(px), &c[2].scale(py));
        }
        if i != 0 {
            f = f.square();
        }
        j += 1;
    }
    f.conjugate()
}

// f^|x| by square-and-multiply; callers conjugate for the parameter's sign.
fn exp_by_x(f: &Fq12) -> Fq12 {
    let mut out = Fq12::one();
    for i in (0..rom::BLS_X_BITS).rev() {
        out = out.square();
        if (rom::BLS_X >> i) & 1 == 1 {
            out = out.mul(f);
        }
    }
    out
}

/// Map a Miller-loop output to the canonical pairing value: raise to
/// (P^12 - 1) / r. Easy part by Frobenius and division, hard part by the
/// published x-keyed chain. A non-invertible input (never produced by valid
/// points) maps to zero.
pub fn final_exponentiation(f: &Fq12) -> Fq12 {
    let f_inv = match f.invert() {
        Some(inv) => inv,
        None => return Fq12::zero(),
    };
    let t0 = f.frobenius(6).mul(&f_inv);
    let t1 = t0.frobenius(2).mul(&t0);
    let t2 = exp_by_x(&t1).conjugate();
    let t3 = t1.square().conjugate().mul(&t2);
    let t4 = exp_by_x(&t3).conjugate();
    let t5 = exp_by_x(&t4).conjugate();
    let t6 = exp_by_x(&t5).conjugate().mul(&t2.square());
    let t7 = exp_by_x(&t6).conjugate();
    t2.mul(&t5)
        .frobenius(2)
        .mul(&t4.mul(&t1).frobenius(3))
        .mul(&t6.mul(&t1.conjugate()).frobenius(1))
        .mul(&t7.mul(&t3.conjugate()).mul(&t1))
}

/// The optimal ate pairing. Identity arguments are rejected, both points
/// pass the curve-equation gate, and the raw Miller value is returned when
/// the caller defers a shared final exponentiation.
pub fn pairing(p: &PointG1, q: &PointG2, with_final_exp: bool) -> Result<Fq12, BlsError> {
    if p.is_identity() || q.is_identity() {
        return Err(BlsError::PairingAtInfinity);
    }
    p.assert_validity()?;
    q.assert_validity()?;
    let (px, py) = p.to_affine();
    let f = match q.pairing_lines() {
        Some(lines) => miller_loop(lines, &px, &py),
        None => {
            let (qx, qy) = q.to_affine();
            miller_loop(&line_coefficients(&qx, &qy), &px, &py)
        }
    };
    Ok(if with_final_exp {
        final_exponentiation(&f)
    } else {
        f
    })
}

/// The untwist-Frobenius-twist endomorphism on affine G2 coordinates:
/// untwist into Fq12, apply the p-power Frobenius, twist back.
pub fn psi(x: &Fq2, y: &Fq2) -> (Fq2, Fq2) {
    let x2 = WSQ_INV.scale(x).frobenius(1).mul(&WSQ).c0.c0.clone();
    let y2 = WCU_INV.scale(y).frobenius(1).mul(&WCU).c0.c0.clone();
    (x2, y2)
}

/// The endomorphism applied twice.
pub fn psi2(x: &Fq2, y: &Fq2) -> (Fq2, Fq2) {
    let (x1, y1) = psi(x, y);
    psi(&x1, &y1)
}

/// Send an arbitrary G2 point into the prime-order subgroup via the
/// published psi-based recipe: psi2(2P) - T2 + (T1 + T2)*(-x) - T1 - P with
/// T1 = -x*P and T2 = psi(P). x is negative, so "multiply by x" is
/// "multiply by |x|, then negate".
pub fn clear_cofactor_g2(p: &PointG2) -> PointG2 {
    let t1 = p.multiply_u64(rom::BLS_X).negate();
    let (px, py) = p.to_affine();
    let (psi_x, psi_y) = psi(&px, &py);
    let t2 = PointG2::from_affine(psi_x, psi_y);
    let (dx, dy) = p.double().to_affine();
    let (psi2_x, psi2_y) = psi2(&dx, &dy);
    let p2 = PointG2::from_affine(psi2_x, psi2_y);
    p2.sub(&t2)
        .add(&t1.add(&t2).multiply_u64(rom::BLS_X).negate())
        .sub(&t1)
        .sub(p)
}
