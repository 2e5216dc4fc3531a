//! Length-doubling PRG built from a fixed-key AES-128 permutation in
//! Matyas-Meyer-Oseas mode (spec.md §4.2).
//!
//! `G(seed) -> (s_L, s_R, t_L, t_R)` is deterministic and, absent knowledge
//! of `seed`, indistinguishable from random. The AES key is a public
//! constant shared by both parties and every gate instance — it is *not*
//! secret, only the seeds that flow through it are.

use aes::Aes128;
use cipher::{BlockEncrypt, KeyInit};
use zeroize::Zeroize;

/// A 128-bit opaque seed. Zeroed on drop (spec.md §5: "Seeds ... MUST be
/// zeroed after last use").
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct Seed(pub [u8; 16]);

impl Seed {
    pub fn from_bytes(bytes: [u8; 16]) -> Self {
        Seed(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl core::fmt::Debug for Seed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("Seed(..)")
    }
}

/// Public, process-wide AES-128 key. Both parties and every gate instance
/// share this constant; it is not secret material.
const FIXED_KEY: [u8; 16] = [
    0x24, 0x6a, 0x95, 0xe0, 0x3a, 0x1c, 0x7f, 0x4d, 0xb8, 0x5e, 0x61, 0x02, 0xe9, 0x33, 0x0b, 0xd7,
];

fn fixed_cipher() -> Aes128 {
    Aes128::new_from_slice(&FIXED_KEY).expect("AES-128 key is exactly 16 bytes")
}

/// Matyas-Meyer-Oseas single-block compression: `AES_k(x) xor x`.
fn mmo(cipher: &Aes128, mut block: [u8; 16]) -> [u8; 16] {
    let mut buf = cipher::generic_array::GenericArray::clone_from_slice(&block);
    cipher.encrypt_block(&mut buf);
    for i in 0..16 {
        block[i] = buf[i] ^ block[i];
    }
    block
}

/// `G(seed) -> (s_L, t_L, s_R, t_R)`.
pub fn g(seed: &Seed) -> (Seed, bool, Seed, bool) {
    let cipher = fixed_cipher();

    let left_in = seed.0;
    let mut right_in = seed.0;
    right_in[15] ^= 1;

    let mut left_out = mmo(&cipher, left_in);
    let mut right_out = mmo(&cipher, right_in);

    let t_l = (left_out[15] & 1) != 0;
    let t_r = (right_out[15] & 1) != 0;
    left_out[15] &= 0xFE;
    right_out[15] &= 0xFE;

    (Seed(left_out), t_l, Seed(right_out), t_r)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        let seed = Seed::from_bytes([7u8; 16]);
        let a = g(&seed);
        let b = g(&seed);
        assert_eq!(a.0 .0, b.0 .0);
        assert_eq!(a.1, b.1);
        assert_eq!(a.2 .0, b.2 .0);
        assert_eq!(a.3, b.3);
    }

    #[test]
    fn left_and_right_differ() {
        let seed = Seed::from_bytes([9u8; 16]);
        let (s_l, _, s_r, _) = g(&seed);
        assert_ne!(s_l.0, s_r.0);
    }

    #[test]
    fn distinct_seeds_diverge() {
        let (a, ..) = g(&Seed::from_bytes([1u8; 16]));
        let (b, ..) = g(&Seed::from_bytes([2u8; 16]));
        assert_ne!(a.0, b.0);
    }
}
