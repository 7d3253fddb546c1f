//! Pure reward arithmetic for the farm.
//!
//! Nothing in here touches contract storage. Every division truncates toward
//! zero, and since all operands are non-negative that is floor division:
//! fractional remainders are dropped, never carried into the next round.

/// Fee rates are expressed in basis points; 10 000 bps is 100 %.
pub const BPS_DENOMINATOR: i128 = 10_000;

/// Largest fee the operator may configure.
pub const MAX_FEE_BPS: u32 = 10_000;

/// Ticks a participant has been accruing for since it was last reconciled.
///
/// A participant is never credited for ticks before the later of its own
/// checkpoint and the last pool-wide distribution, so running a distribution
/// twice at the same tick yields zero the second time.
pub fn elapsed_ticks(current_tick: u32, checkpoint_tick: u32, last_distribution_tick: u32) -> u32 {
    current_tick.saturating_sub(checkpoint_tick.max(last_distribution_tick))
}

/// Pro-rata share of the emission over `elapsed` ticks:
///
/// ```text
/// accrual = reward_per_tick × elapsed × stake / total_staked
/// ```
///
/// Returns `None` on `i128` overflow. An empty pool or an empty position
/// accrues nothing.
pub fn pro_rata_accrual(
    reward_per_tick: i128,
    elapsed: u32,
    stake: i128,
    total_staked: i128,
) -> Option<i128> {
    if total_staked <= 0 || stake <= 0 || elapsed == 0 || reward_per_tick <= 0 {
        return Some(0);
    }

    reward_per_tick
        .checked_mul(i128::from(elapsed))?
        .checked_mul(stake)?
        .checked_div(total_staked)
}

/// Split a gross claim into `(net, fee)` where `fee = gross × fee_bps / 10 000`.
///
/// `net + fee == gross` always holds; the rounding dust of the fee goes to
/// the participant.
pub fn split_fee(gross: i128, fee_bps: u32) -> Option<(i128, i128)> {
    let fee = gross
        .checked_mul(i128::from(fee_bps))?
        .checked_div(BPS_DENOMINATOR)?;
    let net = gross.checked_sub(fee)?;
    Some((net, fee))
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure-math tests with no Soroban environment dependency.
