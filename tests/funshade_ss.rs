//! Mirrors the Python reference's `test_ass.py`: the additive-sharing
//! distance-protocol variant, checked against the same cleartext dot
//! product as the Beaver variant.

use funshade::{ring, setup_ss, share_ss, GateParams, RingElem};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

fn random_vec(len: usize, rng: &mut impl rand::RngCore) -> Vec<RingElem> {
    (0..len).map(|_| rng.gen_range(-4096..4096)).collect()
}

#[test]
fn end_to_end_matches_cleartext_dot_product() {
    let k = 12usize;
    let l = 10usize;
    let theta: RingElem = 300;

    let mut rng = ChaCha20Rng::seed_from_u64(17);
    let x = random_vec(l, &mut rng);
    let y = random_vec(k * l, &mut rng);
    let x_tiled: Vec<RingElem> = x.iter().cycle().take(k * l).copied().collect();

    let params = GateParams::new(k, l, theta).unwrap();
    let (p0, p1) = setup_ss(params, &mut rng).unwrap();

    let dx0 = share_ss(&x_tiled, &p0.a).unwrap();
    let dx1 = share_ss(&x_tiled, &p1.a).unwrap();
    let masked_x: Vec<RingElem> = dx0.iter().zip(&dx1).map(|(&a, &b)| ring::add(a, b)).collect();

    let dy0 = share_ss(&y, &p0.b).unwrap();
    let dy1 = share_ss(&y, &p1.b).unwrap();
    let masked_y: Vec<RingElem> = dy0.iter().zip(&dy1).map(|(&a, &b)| ring::add(a, b)).collect();

    let z0 = funshade::eval_dist_ss(k, l, 0, &p0.r_in, &masked_x, &masked_y, &p0.a, &p0.b, &p0.c).unwrap();
    let z1 = funshade::eval_dist_ss(k, l, 1, &p1.r_in, &masked_x, &masked_y, &p1.a, &p1.b, &p1.c).unwrap();

    for row in 0..k {
        let lo = row * l;
        let expected: RingElem = (0..l).map(|i| x_tiled[lo + i] * y[lo + i]).sum();
        let got = ring::sub(ring::add(z0[row], z1[row]), ring::add(p0.r_in[row], p1.r_in[row]));
        assert_eq!(got, expected, "row {row}");
    }

    let o0 = funshade::eval_sign(0, &p0.key, &z0, &z1).unwrap();
    let o1 = funshade::eval_sign(1, &p1.key, &z1, &z0).unwrap();

    for row in 0..k {
        let lo = row * l;
        let dot: RingElem = (0..l).map(|i| x_tiled[lo + i] * y[lo + i]).sum();
        let want = if dot > theta { 1 } else { 0 };
        assert_eq!(ring::add(o0[row], o1[row]), want, "row {row}");
    }
}

#[test]
fn zero_inputs_never_exceed_zero_threshold() {
    let k = 1usize;
    let l = 4usize;
    let theta: RingElem = 0;
    let mut rng = ChaCha20Rng::seed_from_u64(1);
    let x = vec![0 as RingElem; l];
    let y = vec![0 as RingElem; l];

    let params = GateParams::new(k, l, theta).unwrap();
    let (p0, p1) = setup_ss(params, &mut rng).unwrap();

    let dx0 = share_ss(&x, &p0.a).unwrap();
    let dx1 = share_ss(&x, &p1.a).unwrap();
    let masked_x: Vec<RingElem> = dx0.iter().zip(&dx1).map(|(&a, &b)| ring::add(a, b)).collect();
    let dy0 = share_ss(&y, &p0.b).unwrap();
    let dy1 = share_ss(&y, &p1.b).unwrap();
    let masked_y: Vec<RingElem> = dy0.iter().zip(&dy1).map(|(&a, &b)| ring::add(a, b)).collect();

    let z0 = funshade::eval_dist_ss(k, l, 0, &p0.r_in, &masked_x, &masked_y, &p0.a, &p0.b, &p0.c).unwrap();
    let z1 = funshade::eval_dist_ss(k, l, 1, &p1.r_in, &masked_x, &masked_y, &p1.a, &p1.b, &p1.c).unwrap();
    let o0 = funshade::eval_sign(0, &p0.key, &z0, &z1).unwrap();
    let o1 = funshade::eval_sign(1, &p1.key, &z1, &z0).unwrap();

    assert_eq!(ring::add(o0[0], o1[0]), 0);
}
