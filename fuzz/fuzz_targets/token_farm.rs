#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use token_farm::{TokenFarmContract, TokenFarmContractClient};

#[derive(Arbitrary, Debug)]
pub enum FuzzAction {
    Deposit { amount: u64 },
    Withdraw,
    ClaimRewards,
    Distribute,
    Advance { ticks: u8 },
    SetRewardPerTick { rate: u64 },
    SetFee { bps: u32 },
    SweepFees,
}

fuzz_target!(|actions: Vec<FuzzAction>| {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(1);

    let stake_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let reward_token = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(TokenFarmContract, ());
    let client = TokenFarmContractClient::new(&env, &contract_id);
    StellarAssetClient::new(&env, &reward_token).set_admin(&contract_id);

    let operator = Address::generate(&env);
    client.initialize(&operator, &stake_token, &reward_token, &1_000i128, &500u32);

    let mut users = vec![operator.clone()];
    for _ in 0..5 {
        users.push(Address::generate(&env));
    }
    for user in users.iter() {
        StellarAssetClient::new(&env, &stake_token).mint(user, &i128::from(u64::MAX));
        TokenClient::new(&env, &stake_token).approve(
            user,
            &contract_id,
            &i128::from(u64::MAX),
            &5_000,
        );
    }

    // Looking for panics (unchecked arithmetic, bad indexing) and for any
    // sequence that breaks the stake-sum invariant.
    for (i, action) in actions.into_iter().enumerate() {
        let caller = &users[i % users.len()];
        match action {
            FuzzAction::Deposit { amount } => {
                let _ = client.try_deposit(caller, &i128::from(amount));
            }
            FuzzAction::Withdraw => {
                let _ = client.try_withdraw(caller);
            }
            FuzzAction::ClaimRewards => {
                let _ = client.try_claim_rewards(caller);
            }
            FuzzAction::Distribute => {
                let _ = client.try_distribute_all(&operator);
            }
            FuzzAction::Advance { ticks } => {
                // Stay inside the default entry TTL so nothing gets archived.
                let next = (env.ledger().sequence() + u32::from(ticks)).min(4_000);
                env.ledger().set_sequence_number(next);
            }
            FuzzAction::SetRewardPerTick { rate } => {
                let _ = client.try_set_reward_per_tick(caller, &i128::from(rate));
            }
            FuzzAction::SetFee { bps } => {
                let _ = client.try_set_fee_basis_points(caller, &bps);
            }
            FuzzAction::SweepFees => {
                let _ = client.try_withdraw_accumulated_fees(caller, caller);
            }
        }

        let staked: i128 = client
            .get_stakers()
            .iter()
            .map(|p| client.get_staker(&p).stake_amount)
            .sum();
        assert_eq!(staked, client.get_total_staked());
        assert!(client.get_accumulated_fees() >= 0);
    }
});
