//! Deterministic ratings for stalls the backend sent without one.
//!
//! The formula is a compatibility contract: every client derives the same
//! rating for the same seed, so it must not change.

/// Polynomial rolling hash (`h = h * 31 + unit`, wrapping at 32 bits) over
/// the UTF-16 code units of `seed`.
#[must_use]
pub fn seed_hash(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |h, unit| h.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Rating in `[2.0, 4.99]` before rounding, rounded half-up to one decimal.
#[must_use]
pub fn seeded_rating(seed: &str) -> f64 {
    let raw = f64::from(seed_hash(seed) % 300) / 100.0 + 2.0;
    round_half_up_1dp(raw)
}

/// Rounds to one decimal place, deciding ties on the exact binary value of
/// `x` rather than its shortest decimal rendering. `2.55` is stored as
/// `2.54999...` and rounds down; `2.25` is exact and rounds up.
///
/// Only meaningful for finite non-negative inputs.
#[allow(clippy::cast_precision_loss)]
fn round_half_up_1dp(x: f64) -> f64 {
    let bits = x.to_bits();
    let exp_bits = (bits >> 52) & 0x7ff;
    if exp_bits == 0 {
        return 0.0;
    }
    let mantissa = (bits & ((1u64 << 52) - 1)) | (1u64 << 52);
    #[allow(clippy::cast_possible_wrap)]
    let exponent = exp_bits as i64 - 1075;
    if exponent >= 0 {
        return x;
    }
    let shift = exponent.unsigned_abs();
    if shift > 64 {
        return 0.0;
    }
    // x * 10 = mantissa * 10 / 2^shift, computed exactly in 128 bits.
    let scaled = u128::from(mantissa) * 10;
    let mut tenths = scaled >> shift;
    let remainder = scaled & ((1u128 << shift) - 1);
    if remainder >= 1u128 << (shift - 1) {
        tenths += 1;
    }
    tenths as f64 / 10.0
}
