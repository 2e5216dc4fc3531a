//! Party state records (spec.md §9, "Party objects"): opaque bundles of key
//! material and correlated-randomness shares produced by the dealer and
//! consumed by the stateless functions in [`crate::distance`]. Deliberately
//! not a class hierarchy — just tagged records the caller drives by hand.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
#[cfg(feature = "std")]
use std::vec::Vec;

use crate::config::GateParams;
use crate::dealer::{self, AdditiveShare, BeaverShare};
use crate::distance;
use crate::error::Result;
use crate::ring::RingElem;

use rand_core::RngCore;

/// One party's view of a Beaver-variant protocol run (spec.md §9's "Two
/// protocol variants"): this party's index plus the randomness `setup`
/// handed it.
pub struct BeaverParty {
    pub index: u8,
    pub randomness: BeaverShare,
}

/// One party's view of an additive-sharing-variant protocol run.
pub struct AdditiveParty {
    pub index: u8,
    pub randomness: AdditiveShare,
}

impl BeaverParty {
    /// Run the dealer once and return both parties' records.
    pub fn setup_pair(params: GateParams, rng: &mut impl RngCore) -> Result<(Self, Self)> {
        let (r0, r1) = dealer::setup(params, rng)?;
        Ok((
            BeaverParty { index: 0, randomness: r0 },
            BeaverParty { index: 1, randomness: r1 },
        ))
    }

    pub fn mask_x(&self, x: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::share(x, &self.randomness.d_x)
    }

    pub fn mask_y(&self, y: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::share(y, &self.randomness.d_y)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn eval_dist(&self, k: usize, l: usize, masked_x: &[RingElem], masked_y: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::eval_dist(
            k,
            l,
            self.index,
            &self.randomness.r_in,
            masked_x,
            masked_y,
            &self.randomness.d_x,
            &self.randomness.d_y,
            &self.randomness.d_xy,
        )
    }

    pub fn eval_sign(&self, z_hat_self: &[RingElem], z_hat_other: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::eval_sign(self.index, &self.randomness.key, z_hat_self, z_hat_other)
    }
}

impl AdditiveParty {
    pub fn setup_pair(params: GateParams, rng: &mut impl RngCore) -> Result<(Self, Self)> {
        let (r0, r1) = dealer::setup_ss(params, rng)?;
        Ok((
            AdditiveParty { index: 0, randomness: r0 },
            AdditiveParty { index: 1, randomness: r1 },
        ))
    }

    pub fn mask_x(&self, x: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::share_ss(x, &self.randomness.a)
    }

    pub fn mask_y(&self, y: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::share_ss(y, &self.randomness.b)
    }

    pub fn eval_dist(&self, k: usize, l: usize, masked_x: &[RingElem], masked_y: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::eval_dist_ss(
            k,
            l,
            self.index,
            &self.randomness.r_in,
            masked_x,
            masked_y,
            &self.randomness.a,
            &self.randomness.b,
            &self.randomness.c,
        )
    }

    pub fn eval_sign(&self, z_hat_self: &[RingElem], z_hat_other: &[RingElem]) -> Result<Vec<RingElem>> {
        distance::eval_sign(self.index, &self.randomness.key, z_hat_self, z_hat_other)
    }
}
