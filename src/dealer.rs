//! Correlated-randomness dealer (spec.md §4.4).
//!
//! Produces, once per `(K, l, theta)` batch, everything the two parties
//! need to run the online distance protocol: masks for the Beaver-style
//! variant (`setup`) or the additive-sharing variant (`setup_ss`), plus the
//! FSS sign-gate keys for the final threshold comparison (shared by both
//! variants). This plays the role of the "Semi-Honest third party, TEE, 2PC
//! interaction" in the original protocol description — key distribution by
//! a trusted dealer is assumed, not implemented here (spec.md §1).

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use rand_core::RngCore;

use crate::config::GateParams;
use crate::dcf::{self, FssKeyBatch};
use crate::error::Result;
use crate::ring::{self, RingElem};

fn random_vec(len: usize, rng: &mut impl RngCore) -> Vec<RingElem> {
    (0..len)
        .map(|_| {
            let mut buf = [0u8; 8];
            rng.fill_bytes(&mut buf[..core::mem::size_of::<RingElem>()]);
            RingElem::from_le_bytes(buf[..core::mem::size_of::<RingElem>()].try_into().unwrap())
        })
        .collect()
}

/// Beaver-style correlated randomness for one party (spec.md §4.4, `setup`).
pub struct BeaverShare {
    /// Mask share applied to the tiled live vector `x`, length `K * l`.
    pub d_x: Vec<RingElem>,
    /// Mask share applied to the reference database `Y`, length `K * l`.
    pub d_y: Vec<RingElem>,
    /// Additive share of the per-row Beaver product `c_k = sum_i d_x[k,i] * d_y[k,i]`, length `K`.
    pub d_xy: Vec<RingElem>,
    /// Input mask share for the FSS sign gate, length `K`.
    pub r_in: Vec<RingElem>,
    /// FSS sign-gate keys, one per row.
    pub key: FssKeyBatch,
}

/// Additive-sharing correlated randomness for one party (spec.md §4.4, `setup_ss`).
///
/// Same algebraic shape as [`BeaverShare`] under different names — see
/// `SPEC_FULL.md` §4 for why the two variants share one construction.
pub struct AdditiveShare {
    pub a: Vec<RingElem>,
    pub b: Vec<RingElem>,
    pub c: Vec<RingElem>,
    pub r_in: Vec<RingElem>,
    pub key: FssKeyBatch,
}

struct RawRandomness {
    mask_x_0: Vec<RingElem>,
    mask_x_1: Vec<RingElem>,
    mask_y_0: Vec<RingElem>,
    mask_y_1: Vec<RingElem>,
    cross_0: Vec<RingElem>,
    cross_1: Vec<RingElem>,
    r_in_0: Vec<RingElem>,
    r_in_1: Vec<RingElem>,
    key_0: FssKeyBatch,
    key_1: FssKeyBatch,
}

/// Shared core of `setup`/`setup_ss`: sample independent masks for `x` and
/// `Y`, collapse their per-row cross product into an additively shared
/// Beaver triple, sample the FSS input mask, and generate the sign-gate
/// keys per row via [`dcf::gen_sign_batch`] (spec.md §4.3's sign-gate
/// wrapping).
fn correlated_randomness(params: GateParams, rng: &mut impl RngCore) -> Result<RawRandomness> {
    params.validate()?;
    let kl = params.kl();

    let mask_x_0 = random_vec(kl, rng);
    let mask_x_1 = random_vec(kl, rng);
    let mask_y_0 = random_vec(kl, rng);
    let mask_y_1 = random_vec(kl, rng);

    let mut cross_0 = vec![0 as RingElem; params.k];
    let mut cross_1 = vec![0 as RingElem; params.k];
    for k in 0..params.k {
        let mut c_k: RingElem = 0;
        for i in 0..params.l {
            let idx = k * params.l + i;
            let mx = ring::add(mask_x_0[idx], mask_x_1[idx]);
            let my = ring::add(mask_y_0[idx], mask_y_1[idx]);
            c_k = ring::add(c_k, ring::mul(mx, my));
        }
        let mut share0_buf = [0u8; 8];
        rng.fill_bytes(&mut share0_buf[..core::mem::size_of::<RingElem>()]);
        let share0 = RingElem::from_le_bytes(
            share0_buf[..core::mem::size_of::<RingElem>()].try_into().unwrap(),
        );
        cross_0[k] = share0;
        cross_1[k] = ring::sub(c_k, share0);
    }

    let r_in_0 = random_vec(params.k, rng);
    let r_in_1 = random_vec(params.k, rng);
    let (key_0, key_1) = dcf::gen_sign_batch(&r_in_0, &r_in_1, params.theta, rng);

    Ok(RawRandomness {
        mask_x_0,
        mask_x_1,
        mask_y_0,
        mask_y_1,
        cross_0,
        cross_1,
        r_in_0,
        r_in_1,
        key_0,
        key_1,
    })
}

/// `setup(K, l, theta)` (spec.md §4.4, §6).
pub fn setup(params: GateParams, rng: &mut impl RngCore) -> Result<(BeaverShare, BeaverShare)> {
    let r = correlated_randomness(params, rng)?;
    Ok((
        BeaverShare { d_x: r.mask_x_0, d_y: r.mask_y_0, d_xy: r.cross_0, r_in: r.r_in_0, key: r.key_0 },
        BeaverShare { d_x: r.mask_x_1, d_y: r.mask_y_1, d_xy: r.cross_1, r_in: r.r_in_1, key: r.key_1 },
    ))
}

/// `setup_ss(K, l, theta)` (spec.md §4.4, §6).
pub fn setup_ss(params: GateParams, rng: &mut impl RngCore) -> Result<(AdditiveShare, AdditiveShare)> {
    let r = correlated_randomness(params, rng)?;
    Ok((
        AdditiveShare { a: r.mask_x_0, b: r.mask_y_0, c: r.cross_0, r_in: r.r_in_0, key: r.key_0 },
        AdditiveShare { a: r.mask_x_1, b: r.mask_y_1, c: r.cross_1, r_in: r.r_in_1, key: r.key_1 },
    ))
}

/// `FssGenSign(K, theta)` (spec.md §6): a standalone sign gate without the
/// distance-protocol masks, for directly comparing already-shared scores.
pub fn fss_gen_sign(
    k: usize,
    theta: RingElem,
    rng: &mut impl RngCore,
) -> Result<(Vec<RingElem>, Vec<RingElem>, FssKeyBatch, FssKeyBatch)> {
    GateParams::new(k, 1, theta)?;
    let r_in_0 = random_vec(k, rng);
    let r_in_1 = random_vec(k, rng);
    let (key_0, key_1) = dcf::gen_sign_batch(&r_in_0, &r_in_1, theta, rng);
    Ok((r_in_0, r_in_1, key_0, key_1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn setup_produces_matching_lengths() {
        let params = GateParams::new(4, 8, 100).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let (p0, p1) = setup(params, &mut rng).unwrap();
        assert_eq!(p0.d_x.len(), 32);
        assert_eq!(p1.d_y.len(), 32);
        assert_eq!(p0.d_xy.len(), 4);
        assert_eq!(p0.r_in.len(), 4);
        assert_eq!(p0.key.0.len(), 4);
        assert_eq!(p1.key.0.len(), 4);
    }

    #[test]
    fn beaver_triple_is_consistent() {
        let params = GateParams::new(3, 5, 0).unwrap();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let (p0, p1) = setup(params, &mut rng).unwrap();
        for k in 0..3 {
            let mut expected: RingElem = 0;
            for i in 0..5 {
                let idx = k * 5 + i;
                let dx = ring::add(p0.d_x[idx], p1.d_x[idx]);
                let dy = ring::add(p0.d_y[idx], p1.d_y[idx]);
                expected = ring::add(expected, ring::mul(dx, dy));
            }
            let got = ring::add(p0.d_xy[k], p1.d_xy[k]);
            assert_eq!(got, expected);
        }
    }
}
