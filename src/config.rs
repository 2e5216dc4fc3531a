//! Batch parameters for a single (K, l, theta) gate instance.

use crate::error::{GateError, Result};
use crate::ring::RingElem;

/// The public parameters of one offline/online batch: `K` rows, `l`
/// elements per row, and the public threshold `theta`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateParams {
    pub k: usize,
    pub l: usize,
    pub theta: RingElem,
}

impl GateParams {
    pub fn new(k: usize, l: usize, theta: RingElem) -> Result<Self> {
        let params = Self { k, l, theta };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(GateError::PreconditionViolation("K must be positive"));
        }
        if self.l == 0 {
            return Err(GateError::PreconditionViolation("l must be positive"));
        }
        Ok(())
    }

    /// Total number of ring elements across all rows (`K * l`).
    #[inline]
    pub fn kl(&self) -> usize {
        self.k * self.l
    }
}

pub(crate) fn check_party(j: u8) -> Result<()> {
    if j > 1 {
        return Err(GateError::PreconditionViolation("party index must be 0 or 1"));
    }
    Ok(())
}

pub(crate) fn check_len(name: &'static str, actual: usize, expected: usize) -> Result<()> {
    if actual != expected {
        return Err(GateError::PreconditionViolation(name));
    }
    Ok(())
}
