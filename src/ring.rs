//! Ring arithmetic over R = Z/2^n.
//!
//! `n` is fixed at compile time: 32 bits by default, or 64 bits under the
//! `ring64` feature. All protocol values live in [`RingElem`]; overflow is
//! wraparound, never a panic, matching spec.md's "the library does not
//! enforce [the no-overflow precondition] — it is a documented precondition".

#[cfg(not(feature = "ring64"))]
pub type RingElem = i32;
#[cfg(feature = "ring64")]
pub type RingElem = i64;

/// Bit width of the ring, `n` in spec.md's notation.
pub const RING_BITS: u32 = RingElem::BITS;

/// `a + b (mod 2^n)`.
#[inline]
pub fn add(a: RingElem, b: RingElem) -> RingElem {
    a.wrapping_add(b)
}

/// `a - b (mod 2^n)`.
#[inline]
pub fn sub(a: RingElem, b: RingElem) -> RingElem {
    a.wrapping_sub(b)
}

/// `a * b (mod 2^n)`.
#[inline]
pub fn mul(a: RingElem, b: RingElem) -> RingElem {
    a.wrapping_mul(b)
}

/// `-a (mod 2^n)`.
#[inline]
pub fn neg(a: RingElem) -> RingElem {
    a.wrapping_neg()
}

/// Signed two's-complement sign: true iff the top bit is set (`a < 0`).
#[inline]
pub fn is_negative(a: RingElem) -> bool {
    a < 0
}

/// Read bit `i` of `a`'s unsigned bit-decomposition, MSB at `i = n - 1`.
#[inline]
pub fn bit(a: RingElem, i: u32) -> bool {
    ((a as u64 >> i) & 1) != 0
}
