//! Distributed Comparison Function / FSS sign gate (spec.md §4.3).
//!
//! `Gen(alpha, beta)` splits `f_{alpha,beta}(x) = beta * [x < alpha]` into two
//! keys; `Eval(j, k_j, x)` reconstructs an additive share of `f(x)` such
//! that `Eval(0, k0, x) + Eval(1, k1, x) == f(x)` in `R`. `alpha`/`x` are
//! `RingElem`, i.e. signed; `<` is the signed comparison (spec.md §4.1).
//!
//! Construction: a GGM-style key tree (one level per bit of `alpha`, MSB
//! first) in the style of the `Node`/`CodeWord` layout used by
//! `ryanleh-fss-rs`'s interval-FSS implementation, specialized to a single
//! seed-based PRG (spec.md §4.2) instead of a field-valued one. At each
//! level the two parties' seeds are masked-equal while still matching
//! `alpha`'s prefix and collapse to literally identical values once they
//! diverge, which is what makes every level past the true divergence point
//! cancel out between the two shares. A single per-level value correction,
//! always keyed to the *left* child, carries `beta` across the one level
//! where `x` first differs from `alpha` in the "x is smaller" direction;
//! every other level contributes zero. This is a strict "<" comparison
//! (spec.md §4.3's tie-break).
//!
//! The tree walk above branches MSB first on the raw bit pattern, which is
//! an unsigned lexicographic comparison. `gen`/`eval` apply [`bias`] to
//! `alpha`/`x` on entry to turn that into the signed comparison the rest of
//! this crate assumes.

#[cfg(not(feature = "std"))]
use alloc::rc::Rc;
#[cfg(feature = "std")]
use std::rc::Rc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use rand_core::RngCore;
use serde::{Deserialize, Serialize};

use crate::error::{GateError, Result};
use crate::prg::{g, Seed};
use crate::ring::{self, RingElem, RING_BITS};

/// Per-level correction word, shared verbatim between the two keys of a
/// gate (spec.md §3: "CorrectionWord"). Public key material, not
/// independently secret — only the per-party initial seed needs zeroing
/// (handled by [`Seed`]'s own `Drop`).
#[derive(Clone, Serialize, Deserialize)]
pub struct CorrectionWord {
    s_cw: Seed,
    t_cw_l: bool,
    t_cw_r: bool,
    v_cw: RingElem,
}

impl Serialize for Seed {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        serializer.serialize_bytes(&self.0)
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> core::result::Result<Self, D::Error> {
        let bytes: Vec<u8> = serde::Deserialize::deserialize(deserializer)?;
        let arr: [u8; 16] = bytes
            .try_into()
            .map_err(|_| serde::de::Error::custom("seed must be 16 bytes"))?;
        Ok(Seed(arr))
    }
}

/// One party's half of a DCF key. `cws` and `v_final` are identical between
/// `k0` and `k1` (an [`Rc`] avoids duplicating them); only `party`,
/// `seed0`, and `t0` differ (spec.md §3: "not interchangeable; each carries
/// its party index").
#[derive(Clone, Serialize, Deserialize)]
pub struct FssKey {
    party: u8,
    seed0: Seed,
    t0: bool,
    cws: Rc<Vec<CorrectionWord>>,
    v_final: RingElem,
}

impl FssKey {
    pub fn party(&self) -> u8 {
        self.party
    }
}

fn xor_seed(a: &Seed, b: &Seed) -> Seed {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a.0[i] ^ b.0[i];
    }
    Seed(out)
}

/// `i`-th bit of `v`, MSB first (`i = 0` is the most significant bit of the
/// `RING_BITS`-wide ring element).
fn msb_bit(v: RingElem, i: u32) -> bool {
    ring::bit(v, RING_BITS - 1 - i)
}

/// Maps signed order onto the unsigned order of the bit pattern by flipping
/// the sign bit (`v + 2^(n-1) mod 2^n`, same as `v XOR` the sign bit since
/// the top bit has nothing above it to carry into). The GGM-tree walk below
/// branches MSB first, i.e. compares bit patterns as unsigned integers;
/// biasing both `alpha` and `x` this way before that walk turns it into the
/// signed comparison spec.md §4.1 defines.
fn bias(v: RingElem) -> RingElem {
    ring::add(v, RingElem::MIN)
}

fn fresh_seed(rng: &mut impl RngCore) -> Seed {
    let mut bytes = [0u8; 16];
    rng.fill_bytes(&mut bytes);
    Seed(bytes)
}

/// Generate a key pair for `f_{alpha,beta}(x) = beta * [x < alpha]`.
pub fn gen(alpha: RingElem, beta: RingElem, rng: &mut impl RngCore) -> (FssKey, FssKey) {
    let alpha = bias(alpha);
    let mut s0 = fresh_seed(rng);
    let mut s1 = fresh_seed(rng);
    let seed0_0 = s0.clone();
    let seed0_1 = s1.clone();
    let mut t0 = false;
    let mut t1 = true;

    let mut cws = Vec::with_capacity(RING_BITS as usize);

    for i in 0..RING_BITS {
        let (sl0, tl0, sr0, tr0) = g(&s0);
        let (sl1, tl1, sr1, tr1) = g(&s1);

        let alpha_i = msb_bit(alpha, i);
        let keep_left = !alpha_i;

        let (lose_raw_0, lose_raw_1) = if keep_left {
            (sr0.clone(), sr1.clone())
        } else {
            (sl0.clone(), sl1.clone())
        };
        let s_cw = xor_seed(&lose_raw_0, &lose_raw_1);
        let t_cw_l = tl0 ^ tl1 ^ alpha_i ^ true;
        let t_cw_r = tr0 ^ tr1 ^ alpha_i;

        // Only one of the two parties ever reads `v_cw` at this level: `eval`
        // adds it when its incoming `t` is true and contributes a hard `0`
        // otherwise (no seed-derived term on either side), and while still on
        // the original path exactly one of `t0`/`t1` is true here. So `v_cw`
        // only needs to net out to `target` for whichever party that turns
        // out to be, not cancel any PRG-derived difference.
        let target = if alpha_i { beta } else { 0 };
        let v_cw = if t1 { ring::neg(target) } else { target };

        cws.push(CorrectionWord { s_cw: s_cw.clone(), t_cw_l, t_cw_r, v_cw });

        let (keep_raw_0, keep_tbit_0, keep_cw_bit) = if keep_left {
            (sl0, tl0, t_cw_l)
        } else {
            (sr0, tr0, t_cw_r)
        };
        let (keep_raw_1, keep_tbit_1, _) = if keep_left { (sl1, tl1, t_cw_l) } else { (sr1, tr1, t_cw_r) };

        s0 = if t0 { xor_seed(&keep_raw_0, &s_cw) } else { keep_raw_0 };
        t0 = if t0 { keep_tbit_0 ^ keep_cw_bit } else { keep_tbit_0 };
        s1 = if t1 { xor_seed(&keep_raw_1, &s_cw) } else { keep_raw_1 };
        t1 = if t1 { keep_tbit_1 ^ keep_cw_bit } else { keep_tbit_1 };
    }

    let cws = Rc::new(cws);
    let k0 = FssKey { party: 0, seed0: seed0_0, t0: false, cws: cws.clone(), v_final: 0 };
    let k1 = FssKey { party: 1, seed0: seed0_1, t0: true, cws, v_final: 0 };
    (k0, k1)
}

/// Evaluate party `j`'s share of `f_{alpha,beta}(x)`.
pub fn eval(j: u8, key: &FssKey, x: RingElem) -> Result<RingElem> {
    if j > 1 || key.party != j {
        return Err(GateError::PreconditionViolation("party index must match key's party"));
    }
    let x = bias(x);

    let mut s = key.seed0.clone();
    let mut t = key.t0;
    let mut acc: RingElem = 0;

    for i in 0..RING_BITS {
        let (mut sl, mut tl, mut sr, mut tr) = g(&s);
        let cw = &key.cws[i as usize];
        if t {
            sl = xor_seed(&sl, &cw.s_cw);
            sr = xor_seed(&sr, &cw.s_cw);
            tl ^= cw.t_cw_l;
            tr ^= cw.t_cw_r;
        }

        let x_i = msb_bit(x, i);
        if !x_i {
            let contribution = if t { cw.v_cw } else { 0 };
            let signed = if j == 1 { ring::neg(contribution) } else { contribution };
            acc = ring::add(acc, signed);
            s = sl;
            t = tl;
        } else {
            s = sr;
            t = tr;
        }
    }

    let final_term = if j == 1 { ring::neg(key.v_final) } else { key.v_final };
    acc = ring::add(acc, final_term);
    Ok(acc)
}

/// A batch of `K` independent DCF keys, one per row of a `setup`/`setup_ss`
/// call (spec.md §4.4: the dealer runs `Gen` once per row with
/// `alpha = r_in_0[k] + r_in_1[k] + theta`).
#[derive(Clone, Serialize, Deserialize)]
pub struct FssKeyBatch(pub Vec<FssKey>);

/// Generate one key pair per entry of `alphas`, all sharing the same `beta`.
pub fn gen_batch(alphas: &[RingElem], beta: RingElem, rng: &mut impl RngCore) -> (FssKeyBatch, FssKeyBatch) {
    let mut k0 = Vec::with_capacity(alphas.len());
    let mut k1 = Vec::with_capacity(alphas.len());
    for &alpha in alphas {
        let (a, b) = gen(alpha, beta, rng);
        k0.push(a);
        k1.push(b);
    }
    (FssKeyBatch(k0), FssKeyBatch(k1))
}

/// Generate the batch of sign-gate keys used by `setup`/`setup_ss`/
/// `fss_gen_sign` (spec.md §4.3 "Sign-gate wrapping", tie-break resolved
/// strict in §9). The ground truth is `z > theta`, but `Gen`/`Eval` natively
/// realize `beta * [x < alpha]`. Using `beta = -1` at
/// `alpha = r_in_0 + r_in_1 + theta + 1` makes `Eval`'s two shares sum to
/// `-[ẑ <= theta + r_in]`; [`crate::distance::eval_sign`] adds the public
/// constant `1` to party 0's share alone to complete
/// `1 - [ẑ <= theta + r_in] = [ẑ > theta + r_in] = [z > theta]`.
pub fn gen_sign_batch(
    r_in_0: &[RingElem],
    r_in_1: &[RingElem],
    theta: RingElem,
    rng: &mut impl RngCore,
) -> (FssKeyBatch, FssKeyBatch) {
    let alphas: Vec<RingElem> = r_in_0
        .iter()
        .zip(r_in_1)
        .map(|(&a, &b)| ring::add(ring::add(a, b), ring::add(theta, 1)))
        .collect();
    gen_batch(&alphas, -1, rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn reconstruct(alpha: RingElem, beta: RingElem, x: RingElem) -> RingElem {
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let (k0, k1) = gen(alpha, beta, &mut rng);
        let o0 = eval(0, &k0, x).unwrap();
        let o1 = eval(1, &k1, x).unwrap();
        ring::add(o0, o1)
    }

    #[test]
    fn less_than_indicator() {
        assert_eq!(reconstruct(10, 1, 3), 1);
        assert_eq!(reconstruct(10, 1, 10), 0);
        assert_eq!(reconstruct(10, 1, 11), 0);
        assert_eq!(reconstruct(0, 1, -1), 1);
        assert_eq!(reconstruct(0, 1, 0), 0);
    }

    #[test]
    fn deterministic_given_same_seed() {
        let mut rng_a = ChaCha20Rng::seed_from_u64(42);
        let mut rng_b = ChaCha20Rng::seed_from_u64(42);
        let (a0, _a1) = gen(5, 1, &mut rng_a);
        let (b0, _b1) = gen(5, 1, &mut rng_b);
        assert_eq!(a0.seed0.0, b0.seed0.0);
    }

    #[test]
    fn rejects_mismatched_party() {
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        let (k0, _k1) = gen(5, 1, &mut rng);
        assert!(eval(1, &k0, 3).is_err());
    }

    /// Spec scenario S1: K = 4, theta = 0, z = [-3, 0, 7, i32::MAX].
    #[test]
    fn sign_gate_matches_strict_greater_than_scenario_s1() {
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        let theta: RingElem = 0;
        let z = [-3, 0, 7, RingElem::MAX];
        let r_in_0 = [11, -4, 100, 7];
        let r_in_1 = [3, 9, -40, 2];
        let (k0, k1) = gen_sign_batch(&r_in_0, &r_in_1, theta, &mut rng);

        let expect = [0, 0, 1, 1];
        for i in 0..4 {
            let z_hat_0 = ring::add(z[i], r_in_0[i]);
            let z_hat_1 = r_in_1[i];
            let z_hat = ring::add(z_hat_0, z_hat_1);
            let s0 = ring::add(eval(0, &k0.0[i], z_hat).unwrap(), 1);
            let s1 = eval(1, &k1.0[i], z_hat).unwrap();
            assert_eq!(ring::add(s0, s1), expect[i]);
        }
    }

    /// Spec scenario S2: threshold tie is not a match (strict >).
    #[test]
    fn sign_gate_tie_is_not_greater() {
        let mut rng = ChaCha20Rng::seed_from_u64(6);
        let theta: RingElem = 100;
        let z = 100;
        let r_in_0 = [50];
        let r_in_1 = [-20];
        let (k0, k1) = gen_sign_batch(&r_in_0, &r_in_1, theta, &mut rng);
        let z_hat = ring::add(ring::add(z, r_in_0[0]), r_in_1[0]);
        let s0 = ring::add(eval(0, &k0.0[0], z_hat).unwrap(), 1);
        let s1 = eval(1, &k1.0[0], z_hat).unwrap();
        assert_eq!(ring::add(s0, s1), 0);
    }

    #[test]
    fn batch_reconstructs_rowwise() {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let alphas = [10, -3, 0, 7];
        let (b0, b1) = gen_batch(&alphas, 1, &mut rng);
        let xs = [3, -3, 1, 6];
        let expect = [1, 0, 0, 1];
        for i in 0..alphas.len() {
            let o0 = eval(0, &b0.0[i], xs[i]).unwrap();
            let o1 = eval(1, &b1.0[i], xs[i]).unwrap();
            assert_eq!(ring::add(o0, o1), expect[i]);
        }
    }
}
