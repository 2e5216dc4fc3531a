//! Online distance-then-threshold protocol (spec.md §4.5).
//!
//! Three steps, run after the dealer's offline `setup`/`setup_ss`:
//! 1. `share`/`share_ss`: each party locally masks its input vector.
//! 2. `eval_dist`/`eval_dist_ss`: after exchanging masked vectors, each
//!    party locally folds the Beaver cross terms into a masked-distance
//!    share `z_hat_j`.
//! 3. `eval_sign`: after exchanging `z_hat_j`, each party reconstructs the
//!    masked distance and runs the FSS sign gate to get its share of
//!    `[distance < theta]`.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::config::{check_len, check_party};
use crate::dcf::{self, FssKeyBatch};
use crate::error::Result;
use crate::ring::{self, RingElem};

/// `share(K, l, V, d)` / `share_ss(K, l, V, d)` (spec.md §4.5, §6): mask a
/// length-`K * l` input vector with the dealer-provided mask share `d`.
pub fn share(v: &[RingElem], mask: &[RingElem]) -> Result<Vec<RingElem>> {
    check_len("v and mask must have equal length", v.len(), mask.len())?;
    Ok(v.iter().zip(mask).map(|(&vi, &di)| ring::sub(vi, di)).collect())
}

/// Identical operation to [`share`] under the name spec.md's additive-share
/// variant uses at the call site (`SPEC_FULL.md` §4).
pub fn share_ss(v: &[RingElem], mask: &[RingElem]) -> Result<Vec<RingElem>> {
    share(v, mask)
}

/// Shared core of `eval_dist`/`eval_dist_ss`: fold the Beaver cross terms
/// for each of `k` rows of `l` elements into a masked-distance share.
///
/// `masked_x`/`masked_y` are the reconstructed masked vectors (`D_x = x -
/// d_x`, `D_y = Y - d_y`, length `K * l`); `mask_x_j`/`mask_y_j`/`cross_j`
/// and `r_in_j` are this party's shares from `setup`/`setup_ss`.
fn eval_dist_core(
    k: usize,
    l: usize,
    j: u8,
    r_in_j: &[RingElem],
    masked_x: &[RingElem],
    masked_y: &[RingElem],
    mask_x_j: &[RingElem],
    mask_y_j: &[RingElem],
    cross_j: &[RingElem],
) -> Result<Vec<RingElem>> {
    check_party(j)?;
    let kl = k * l;
    check_len("masked_x must be K * l long", masked_x.len(), kl)?;
    check_len("masked_y must be K * l long", masked_y.len(), kl)?;
    check_len("mask_x_j must be K * l long", mask_x_j.len(), kl)?;
    check_len("mask_y_j must be K * l long", mask_y_j.len(), kl)?;
    check_len("cross_j must be K long", cross_j.len(), k)?;
    check_len("r_in_j must be K long", r_in_j.len(), k)?;

    let jn = j as RingElem;
    let mut z_hat = vec![0 as RingElem; k];
    for row in 0..k {
        let mut sum: RingElem = 0;
        for i in 0..l {
            let idx = row * l + i;
            let dx = masked_x[idx];
            let dy = masked_y[idx];
            let term = ring::add(
                ring::mul(jn, ring::mul(dx, dy)),
                ring::add(ring::mul(dx, mask_y_j[idx]), ring::mul(dy, mask_x_j[idx])),
            );
            sum = ring::add(sum, term);
        }
        sum = ring::add(sum, cross_j[row]);
        z_hat[row] = ring::add(r_in_j[row], sum);
    }
    Ok(z_hat)
}

/// `eval_dist(K, l, j, r_in_j, D_x, D_y, d_x_j, d_y_j, d_xy_j)` (spec.md §4.5, §6).
#[allow(clippy::too_many_arguments)]
pub fn eval_dist(
    k: usize,
    l: usize,
    j: u8,
    r_in_j: &[RingElem],
    masked_x: &[RingElem],
    masked_y: &[RingElem],
    d_x_j: &[RingElem],
    d_y_j: &[RingElem],
    d_xy_j: &[RingElem],
) -> Result<Vec<RingElem>> {
    eval_dist_core(k, l, j, r_in_j, masked_x, masked_y, d_x_j, d_y_j, d_xy_j)
}

/// `eval_dist_ss(K, l, j, r_in_j, D_x, D_y, a_j, b_j, c_j)` (spec.md §4.5, §6):
/// same algebra as [`eval_dist`] under the additive-share naming.
#[allow(clippy::too_many_arguments)]
pub fn eval_dist_ss(
    k: usize,
    l: usize,
    j: u8,
    r_in_j: &[RingElem],
    masked_x: &[RingElem],
    masked_y: &[RingElem],
    a_j: &[RingElem],
    b_j: &[RingElem],
    c_j: &[RingElem],
) -> Result<Vec<RingElem>> {
    eval_dist_core(k, l, j, r_in_j, masked_x, masked_y, a_j, b_j, c_j)
}

/// `FssEvalSign`/`eval_sign(K, j, k_j, z_hat_j, z_hat_nj)` (spec.md §6):
/// reconstruct each row's masked distance and run the FSS sign gate to
/// recover this party's share of `[distance < theta]`.
pub fn eval_sign(
    j: u8,
    keys: &FssKeyBatch,
    z_hat_j: &[RingElem],
    z_hat_nj: &[RingElem],
) -> Result<Vec<RingElem>> {
    check_party(j)?;
    let k = keys.0.len();
    check_len("z_hat_j must be K long", z_hat_j.len(), k)?;
    check_len("z_hat_nj must be K long", z_hat_nj.len(), k)?;

    let mut out = Vec::with_capacity(k);
    for row in 0..k {
        let z_hat = ring::add(z_hat_j[row], z_hat_nj[row]);
        let share = dcf::eval(j, &keys.0[row], z_hat)?;
        // keys from `gen_sign_batch` realize `-[z_hat <= theta + r_in]`; party
        // 0 adds the public constant 1 to complete `1 - [...] = [z > theta]`.
        out.push(if j == 0 { ring::add(share, 1) } else { share });
    }
    Ok(out)
}
