//! Two-party private matching demo.
//!
//! Usage: cargo run --example two_party_demo --features std
//!
//! Simulates both parties in one process: an enrolled template `y` held by
//! party 1 and a live probe `x` held by party 0, compared via a secret-shared
//! dot product and thresholded without either party learning the score.

use funshade::{party::BeaverParty, ring, GateParams, RingElem};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn main() {
    let probe: Vec<RingElem> = vec![10, 20, 30, 40];
    let template: Vec<RingElem> = vec![9, 19, 31, 41];
    let theta: RingElem = 50;

    let k = 1;
    let l = probe.len();
    let params = GateParams::new(k, l, theta).expect("valid batch shape");

    let mut rng = ChaCha20Rng::from_entropy();
    let (party0, party1) = BeaverParty::setup_pair(params, &mut rng).expect("dealer setup");

    let dx0 = party0.mask_x(&probe).expect("mask probe");
    let dx1 = party1.mask_x(&probe).expect("mask probe");
    let masked_x: Vec<RingElem> = dx0.iter().zip(&dx1).map(|(&a, &b)| ring::add(a, b)).collect();

    let dy0 = party0.mask_y(&template).expect("mask template");
    let dy1 = party1.mask_y(&template).expect("mask template");
    let masked_y: Vec<RingElem> = dy0.iter().zip(&dy1).map(|(&a, &b)| ring::add(a, b)).collect();

    let z0 = party0.eval_dist(k, l, &masked_x, &masked_y).expect("party 0 dist share");
    let z1 = party1.eval_dist(k, l, &masked_x, &masked_y).expect("party 1 dist share");

    let o0 = party0.eval_sign(&z0, &z1).expect("party 0 sign share");
    let o1 = party1.eval_sign(&z1, &z0).expect("party 1 sign share");

    let matched = ring::add(o0[0], o1[0]) != 0;

    let plain_dot: RingElem = probe.iter().zip(&template).map(|(&a, &b)| a * b).sum();

    println!("probe:          {probe:?}");
    println!("template:       {template:?}");
    println!("threshold:      {theta}");
    println!("plaintext inner product (for reference only): {plain_dot}");
    println!("party 0 sign share: {}", o0[0]);
    println!("party 1 sign share: {}", o1[0]);
    println!("reconstructed match: {matched}");
}
