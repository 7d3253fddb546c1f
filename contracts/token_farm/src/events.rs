#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired once when the farm is bootstrapped.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct InitializedEvent {
    pub operator: Address,
    pub stake_token: Address,
    pub reward_token: Address,
    pub reward_per_tick: i128,
    pub fee_basis_points: u32,
    pub tick: u32,
}

/// Fired when a participant deposits stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositEvent {
    pub participant: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub tick: u32,
}

/// Fired when a participant withdraws its whole stake.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawEvent {
    pub participant: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub tick: u32,
}

/// Fired on a claim. `gross_amount` is what was earned before the fee;
/// `net_amount` is what was actually minted to the participant.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardsClaimedEvent {
    pub participant: Address,
    pub gross_amount: i128,
    pub net_amount: i128,
    pub fee: i128,
    pub tick: u32,
}

/// Fired after a pool-wide distribution commits rewards.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributedEvent {
    pub participants: u32,
    pub total_accrued: i128,
    pub reward_per_tick: i128,
    pub tick: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPerTickSetEvent {
    pub new_rate: i128,
    pub tick: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeSetEvent {
    pub new_fee_basis_points: u32,
    pub tick: u32,
}

/// Fired when the operator sweeps the fee vault.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeesWithdrawnEvent {
    pub destination: Address,
    pub amount: i128,
    pub tick: u32,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OperatorTransferredEvent {
    pub old_operator: Address,
    pub new_operator: Address,
    pub tick: u32,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(
    env: &Env,
    operator: Address,
    stake_token: Address,
    reward_token: Address,
    reward_per_tick: i128,
    fee_basis_points: u32,
) {
    env.events().publish(
        (symbol_short!("INIT"),),
        InitializedEvent {
            operator,
            stake_token,
            reward_token,
            reward_per_tick,
            fee_basis_points,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_deposit(env: &Env, participant: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), participant.clone()),
        DepositEvent {
            participant,
            amount,
            new_total_staked,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_withdraw(env: &Env, participant: Address, amount: i128, new_total_staked: i128) {
    env.events().publish(
        (symbol_short!("WITHDRAW"), participant.clone()),
        WithdrawEvent {
            participant,
            amount,
            new_total_staked,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_rewards_claimed(
    env: &Env,
    participant: Address,
    gross_amount: i128,
    net_amount: i128,
    fee: i128,
) {
    env.events().publish(
        (symbol_short!("CLAIMED"), participant.clone()),
        RewardsClaimedEvent {
            participant,
            gross_amount,
            net_amount,
            fee,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_distributed(env: &Env, participants: u32, total_accrued: i128, reward_per_tick: i128) {
    env.events().publish(
        (symbol_short!("DISTRIB"),),
        DistributedEvent {
            participants,
            total_accrued,
            reward_per_tick,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_reward_per_tick_set(env: &Env, new_rate: i128) {
    env.events().publish(
        (symbol_short!("RATE_SET"),),
        RewardPerTickSetEvent {
            new_rate,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_fee_set(env: &Env, new_fee_basis_points: u32) {
    env.events().publish(
        (symbol_short!("FEE_SET"),),
        FeeSetEvent {
            new_fee_basis_points,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_fees_withdrawn(env: &Env, destination: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("FEE_WDRW"), destination.clone()),
        FeesWithdrawnEvent {
            destination,
            amount,
            tick: env.ledger().sequence(),
        },
    );
}

pub fn publish_operator_transferred(env: &Env, old_operator: Address, new_operator: Address) {
    env.events().publish(
        (symbol_short!("OPER_XFER"), new_operator.clone()),
        OperatorTransferredEvent {
            old_operator,
            new_operator,
            tick: env.ledger().sequence(),
        },
    );
}
