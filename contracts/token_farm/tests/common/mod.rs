#![allow(dead_code)]

use soroban_sdk::{
    testutils::{Address as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    Address, Env,
};
use token_farm::{TokenFarmContract, TokenFarmContractClient};

pub const START_TICK: u32 = 1_000;

pub struct TestContext {
    pub env: Env,
    pub client: TokenFarmContractClient<'static>,
    pub operator: Address,
    pub stake_token: Address,
    pub reward_token: Address,
}

/// Creates a mocked Soroban environment with two Stellar asset contracts,
/// deploys the farm, hands it the reward token's admin role, and initializes
/// it with `reward_per_tick` and `fee_bps`.
pub fn setup_test_env(reward_per_tick: i128, fee_bps: u32) -> TestContext {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_sequence_number(START_TICK);

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
    client.initialize(
        &operator,
        &stake_token,
        &reward_token,
        &reward_per_tick,
        &fee_bps,
    );

    TestContext {
        env,
        client,
        operator,
        stake_token,
        reward_token,
    }
}

/// Generates a participant holding `balance` stake tokens, all of them
/// approved for the farm.
pub fn create_participant(ctx: &TestContext, balance: i128) -> Address {
    let participant = Address::generate(&ctx.env);
    fund_and_approve(ctx, &participant, balance);
    participant
}

pub fn fund_and_approve(ctx: &TestContext, participant: &Address, amount: i128) {
    StellarAssetClient::new(&ctx.env, &ctx.stake_token).mint(participant, &amount);
    let stake = TokenClient::new(&ctx.env, &ctx.stake_token);
    let allowance = stake.allowance(participant, &ctx.client.address);
    let expiration = ctx.env.ledger().sequence() + 50_000;
    stake.approve(
        participant,
        &ctx.client.address,
        &(allowance + amount),
        &expiration,
    );
}

pub fn advance(ctx: &TestContext, ticks: u32) {
    let next = ctx.env.ledger().sequence() + ticks;
    ctx.env.ledger().set_sequence_number(next);
}

pub fn stake_balance(ctx: &TestContext, who: &Address) -> i128 {
    TokenClient::new(&ctx.env, &ctx.stake_token).balance(who)
}

pub fn reward_balance(ctx: &TestContext, who: &Address) -> i128 {
    TokenClient::new(&ctx.env, &ctx.reward_token).balance(who)
}

/// Sum of every enumerated participant's stake.
pub fn sum_of_stakes(ctx: &TestContext) -> i128 {
    ctx.client
        .get_stakers()
        .iter()
        .map(|p| ctx.client.get_staker(&p).stake_amount)
        .sum()
}
