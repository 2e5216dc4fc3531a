//! Two-party secure comparison gate: `f_{alpha,beta}(x) = beta * [x < alpha]`
//! built from Function Secret Sharing, plus a distance-then-threshold
//! protocol layered on top for private dot-product matching (cosine
//! similarity on secret-shared vectors, thresholded without revealing the
//! score). Semi-honest, two-party, trusted-dealer correlated randomness.
//!
//! Typical use: a dealer runs [`dealer::setup`] (or [`dealer::setup_ss`])
//! once per batch shape, each party calls [`distance::share`] to mask its
//! input, the parties exchange masked vectors and call
//! [`distance::eval_dist`], exchange the resulting shares, and call
//! [`distance::eval_sign`] to recover a share of the threshold indicator.
//! [`party`] wraps this sequence behind two small per-party records.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod config;
pub mod dcf;
pub mod dealer;
pub mod distance;
pub mod error;
pub mod party;
pub mod prg;
pub mod ring;

pub use config::GateParams;
pub use dcf::{FssKey, FssKeyBatch};
pub use dealer::{fss_gen_sign, setup, setup_ss, AdditiveShare, BeaverShare};
pub use distance::{eval_dist, eval_dist_ss, eval_sign, share, share_ss};
pub use error::{GateError, Result};
pub use party::{AdditiveParty, BeaverParty};
pub use ring::RingElem;
