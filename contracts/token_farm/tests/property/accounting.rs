#![allow(clippy::unwrap_used, clippy::expect_used, clippy::arithmetic_side_effects)]
//! Property-based tests for claim and fee accounting.
//!
//! Invariants tested:
//! - A claim of `P` at fee `F` mints `P − floor(P × F / 10 000)` and adds
//!   `floor(P × F / 10 000)` to the vault
//! - Minted rewards plus swept fees equal everything ever distributed
//! - Fees above 10 000 bps are always rejected

use proptest::prelude::*;
use soroban_sdk::{testutils::Address as _, Address};
use token_farm::ContractError;

use crate::common::{advance, create_participant, reward_balance, setup_test_env};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_claim_splits_fee_by_floor(
        pending in 1i128..1_000_000_000,
        fee_bps in 0u32..=10_000,
    ) {
        // A sole staker at `pending` per tick for one tick holds exactly `pending`.
        let ctx = setup_test_env(pending, fee_bps);
        let user = create_participant(&ctx, 1);
        ctx.client.deposit(&user, &1);
        advance(&ctx, 1);
        ctx.client.distribute_all(&ctx.operator);
        prop_assert_eq!(ctx.client.get_pending_rewards(&user), pending);

        let fee = pending * i128::from(fee_bps) / 10_000;
        let net = ctx.client.claim_rewards(&user);

        prop_assert_eq!(net, pending - fee);
        prop_assert_eq!(reward_balance(&ctx, &user), pending - fee);
        prop_assert_eq!(ctx.client.get_accumulated_fees(), fee);
    }

    #[test]
    fn prop_payouts_and_fees_cover_every_distribution(
        rate in 1i128..10_000,
        fee_bps in 0u32..=10_000,
        stakes in prop::collection::vec(1i128..1_000, 1..5),
        elapsed in 1u32..50,
    ) {
        let ctx = setup_test_env(rate, fee_bps);
        let users: std::vec::Vec<_> = stakes
            .iter()
            .map(|stake| {
                let user = create_participant(&ctx, *stake);
                ctx.client.deposit(&user, stake);
                user
            })
            .collect();

        advance(&ctx, elapsed);
        let summary = ctx.client.distribute_all(&ctx.operator);

        let mut paid: i128 = 0;
        for user in users.iter() {
            if ctx.client.get_pending_rewards(user) > 0 {
                paid += ctx.client.claim_rewards(user);
            }
        }
        let fees = ctx.client.get_accumulated_fees();
        prop_assert_eq!(paid + fees, summary.total_accrued);

        if fees > 0 {
            let treasury = Address::generate(&ctx.env);
            prop_assert_eq!(
                ctx.client.withdraw_accumulated_fees(&ctx.operator, &treasury),
                fees
            );
            prop_assert_eq!(reward_balance(&ctx, &treasury), fees);
        }
    }

    #[test]
    fn prop_fee_above_hundred_percent_rejected(fee_bps in 10_001u32..=u32::MAX) {
        let ctx = setup_test_env(10, 0);
        let result = ctx.client.try_set_fee_basis_points(&ctx.operator, &fee_bps);
        match result {
            Err(Ok(e)) => prop_assert_eq!(e, ContractError::InvalidFee),
            _ => prop_assert!(false, "Expected InvalidFee error"),
        }
        prop_assert_eq!(ctx.client.get_fee_basis_points(), 0);
    }
}
