/// `value * num / den` with truncating division, integer only.
///
/// Equal to multiply-then-divide whenever that product fits in `u128`:
/// with `value = q * den + r`, `value * num / den == q * num + (r * num) / den`.
/// Beyond that range the result saturates at `u128::MAX`.
#[inline]
pub(crate) fn scale_floor(value: u128, num: u128, den: u128) -> u128 {
    debug_assert!(den > 0);
    let q = value / den;
    let r = value % den;
    match r.checked_mul(num) {
        Some(rn) => q.saturating_mul(num).saturating_add(rn / den),
        None => u128::MAX,
    }
}

/// `value * pct / 100`.
#[inline]
pub(crate) fn percent_of(value: u128, pct: u32) -> u128 {
    scale_floor(value, pct as u128, 100)
}
