// Tripling under 32-bit unsigned wraparound.

/// Returns `(a * 3) mod 2^32`. Overflow wraps; it is not an error.
pub fn compute_triple(a: u32) -> u32 {
    a.wrapping_mul(3)
}
