#![no_std]

pub mod events;
pub mod registry;
pub mod rewards;

use soroban_sdk::{
    contract, contractimpl, contracttype, log, symbol_short, token, Address, Env, Symbol, Vec,
};

pub use registry::ParticipantRecord;

// ── Storage key constants ────────────────────────────────────────────────────

const OPERATOR: Symbol = symbol_short!("OPERATOR");
const INITIALIZED: Symbol = symbol_short!("INIT");
const STAKE_TOKEN: Symbol = symbol_short!("STK_TOK");
const REWARD_TOKEN: Symbol = symbol_short!("RWD_TOK");
const REWARD_PER_TICK: Symbol = symbol_short!("RWD_TICK");
const FEE_BPS: Symbol = symbol_short!("FEE_BPS");
const TOTAL_STAKED: Symbol = symbol_short!("TOT_STK");
const ACCUMULATED_FEES: Symbol = symbol_short!("ACC_FEES");
const LAST_DISTRIBUTION: Symbol = symbol_short!("LAST_DST");
const OPERATOR_TRANSFERRED: Symbol = symbol_short!("OPER_XFER");

const INSTANCE_LIFETIME_THRESHOLD: u32 = 100_800; // ~7 days
const INSTANCE_BUMP_AMOUNT: u32 = 518_400; // ~30 days

// ── Contract errors ──────────────────────────────────────────────────────────

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidInput = 4,
    ZeroAmount = 5,
    /// The stake ledger refused to move the deposit (missing allowance or
    /// balance).
    InsufficientAuthorization = 6,
    NothingStaked = 7,
    NothingToClaim = 8,
    /// Fee above 10 000 basis points.
    InvalidFee = 9,
    NoFeesToWithdraw = 10,
    TokensIdentical = 11,
    /// The farm is not the admin of the reward token and cannot mint.
    MintingRightsMissing = 12,
    /// A payout (stake return or reward mint) was rejected by its ledger.
    LedgerTransferFailed = 13,
    MathOverflow = 14,
    /// The operator role has already been handed over once.
    OperatorAlreadyTransferred = 15,
}

// ── Public-facing types ──────────────────────────────────────────────────────

/// Pool-wide aggregates, returned by `get_pool_state`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolState {
    pub total_staked: i128,
    pub reward_per_tick: i128,
    pub fee_basis_points: u32,
    pub accumulated_fees: i128,
    pub last_distribution_tick: u32,
}

/// Result of a single `distribute_all` call.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DistributionSummary {
    pub tick: u32,
    /// Number of staked participants credited in this round.
    pub participants: u32,
    pub total_accrued: i128,
}

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct TokenFarmContract;

#[contractimpl]
impl TokenFarmContract {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the farm.
    ///
    /// * `stake_token`      – token participants deposit.
    /// * `reward_token`     – Stellar asset whose admin has already been set
    ///   to this contract, so that only the farm can mint rewards.
    /// * `reward_per_tick`  – reward units emitted per ledger across the pool.
    /// * `fee_basis_points` – fee withheld from every claim.
    pub fn initialize(
        env: Env,
        operator: Address,
        stake_token: Address,
        reward_token: Address,
        reward_per_tick: i128,
        fee_basis_points: u32,
    ) -> Result<(), ContractError> {
        if env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::AlreadyInitialized);
        }
        if reward_per_tick < 0 {
            return Err(ContractError::InvalidInput);
        }
        if fee_basis_points > rewards::MAX_FEE_BPS {
            return Err(ContractError::InvalidFee);
        }
        if stake_token == reward_token {
            return Err(ContractError::TokensIdentical);
        }
        match token::StellarAssetClient::new(&env, &reward_token).try_admin() {
            Ok(Ok(admin)) if admin == env.current_contract_address() => {}
            _ => return Err(ContractError::MintingRightsMissing),
        }

        let now = env.ledger().sequence();

        env.storage().instance().set(&OPERATOR, &operator);
        env.storage().instance().set(&INITIALIZED, &true);
        env.storage().instance().set(&STAKE_TOKEN, &stake_token);
        env.storage().instance().set(&REWARD_TOKEN, &reward_token);
        env.storage().instance().set(&REWARD_PER_TICK, &reward_per_tick);
        env.storage().instance().set(&FEE_BPS, &fee_basis_points);
        env.storage().instance().set(&LAST_DISTRIBUTION, &now);
        // TOTAL_STAKED and ACCUMULATED_FEES start at zero;
        // unwrap_or(0) handles absent keys.
        Self::bump_instance(&env);

        events::publish_initialized(
            &env,
            operator,
            stake_token,
            reward_token,
            reward_per_tick,
            fee_basis_points,
        );

        Ok(())
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Deposit `amount` stake tokens.
    ///
    /// The participant must have approved the farm as spender on the stake
    /// token beforehand. Entering the pool from an empty position starts the
    /// participant's accrual at the current tick; topping up an existing
    /// position keeps its checkpoint.
    pub fn deposit(env: Env, participant: Address, amount: i128) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        participant.require_auth();

        if amount == 0 {
            return Err(ContractError::ZeroAmount);
        }
        if amount < 0 {
            return Err(ContractError::InvalidInput);
        }

        // 1. Pull tokens from the participant using its allowance.
        let stake_token = Self::read_address(&env, &STAKE_TOKEN)?;
        let farm = env.current_contract_address();
        match token::Client::new(&env, &stake_token).try_transfer_from(
            &farm,
            &participant,
            &farm,
            &amount,
        ) {
            Ok(Ok(())) => {}
            _ => return Err(ContractError::InsufficientAuthorization),
        }

        // 2. Credit the position, enrolling first-time depositors.
        let now = env.ledger().sequence();
        let mut record = match registry::load(&env, &participant) {
            Some(record) => record,
            None => {
                registry::enroll(&env, &participant);
                ParticipantRecord::default()
            }
        };
        if record.stake_amount == 0 {
            record.last_checkpoint_tick = now;
        }
        record.stake_amount = record
            .stake_amount
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        registry::store(&env, &participant, &record);

        // 3. Grow the pool.
        let new_total = Self::read_i128(&env, &TOTAL_STAKED)
            .checked_add(amount)
            .ok_or(ContractError::MathOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::bump_instance(&env);

        events::publish_deposit(&env, participant, amount, new_total);

        Ok(())
    }

    /// Return the participant's entire stake.
    ///
    /// Pending rewards are left untouched and stay claimable.
    pub fn withdraw(env: Env, participant: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        participant.require_auth();

        let mut record = registry::load_or_default(&env, &participant);
        if record.stake_amount <= 0 {
            return Err(ContractError::NothingStaked);
        }
        let amount = record.stake_amount;

        // Zero the position before paying out (checks-effects-interactions).
        record.stake_amount = 0;
        registry::store(&env, &participant, &record);

        let new_total = Self::read_i128(&env, &TOTAL_STAKED)
            .checked_sub(amount)
            .ok_or(ContractError::MathOverflow)?;
        env.storage().instance().set(&TOTAL_STAKED, &new_total);
        Self::bump_instance(&env);

        let stake_token = Self::read_address(&env, &STAKE_TOKEN)?;
        match token::Client::new(&env, &stake_token).try_transfer(
            &env.current_contract_address(),
            &participant,
            &amount,
        ) {
            Ok(Ok(())) => {}
            _ => return Err(ContractError::LedgerTransferFailed),
        }

        events::publish_withdraw(&env, participant, amount, new_total);

        Ok(amount)
    }

    // ── Distribution ────────────────────────────────────────────────────────

    /// Commit pro-rata rewards for every staked participant up to the
    /// current ledger.
    ///
    /// Each staked participant is credited exactly once per call for the
    /// ticks since the later of its checkpoint and the previous distribution.
    /// With nothing staked the call changes nothing.
    pub fn distribute_all(
        env: Env,
        operator: Address,
    ) -> Result<DistributionSummary, ContractError> {
        Self::require_initialized(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        let now = env.ledger().sequence();
        let total_staked = Self::read_i128(&env, &TOTAL_STAKED);
        if total_staked <= 0 {
            log!(&env, "distribution skipped: empty pool", now);
            return Ok(DistributionSummary {
                tick: now,
                participants: 0,
                total_accrued: 0,
            });
        }

        let reward_per_tick = Self::read_i128(&env, &REWARD_PER_TICK);
        let last_distribution: u32 = env
            .storage()
            .instance()
            .get(&LAST_DISTRIBUTION)
            .unwrap_or(0);

        let mut participants: u32 = 0;
        let mut total_accrued: i128 = 0;

        for staker in registry::stakers(&env).iter() {
            let mut record = match registry::load(&env, &staker) {
                Some(record) if record.stake_amount > 0 => record,
                _ => continue,
            };

            let elapsed =
                rewards::elapsed_ticks(now, record.last_checkpoint_tick, last_distribution);
            let accrual = rewards::pro_rata_accrual(
                reward_per_tick,
                elapsed,
                record.stake_amount,
                total_staked,
            )
            .ok_or(ContractError::MathOverflow)?;

            record.pending_reward = record
                .pending_reward
                .checked_add(accrual)
                .ok_or(ContractError::MathOverflow)?;
            record.last_checkpoint_tick = now;
            registry::store(&env, &staker, &record);

            participants = participants.saturating_add(1);
            total_accrued = total_accrued
                .checked_add(accrual)
                .ok_or(ContractError::MathOverflow)?;
        }

        env.storage().instance().set(&LAST_DISTRIBUTION, &now);
        Self::bump_instance(&env);

        log!(&env, "distributed", now, participants, total_accrued);
        events::publish_distributed(&env, participants, total_accrued, reward_per_tick);

        Ok(DistributionSummary {
            tick: now,
            participants,
            total_accrued,
        })
    }

    // ── Rewards ─────────────────────────────────────────────────────────────

    /// Claim every committed reward for `participant`.
    ///
    /// The fee is withheld into the vault and the remainder is minted to the
    /// participant. Returns the net amount minted.
    pub fn claim_rewards(env: Env, participant: Address) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        participant.require_auth();

        let mut record = registry::load_or_default(&env, &participant);
        if record.pending_reward <= 0 {
            return Err(ContractError::NothingToClaim);
        }
        let gross = record.pending_reward;

        let fee_bps: u32 = env.storage().instance().get(&FEE_BPS).unwrap_or(0);
        let (net, fee) = rewards::split_fee(gross, fee_bps).ok_or(ContractError::MathOverflow)?;

        record.pending_reward = 0;
        registry::store(&env, &participant, &record);

        let fees = Self::read_i128(&env, &ACCUMULATED_FEES)
            .checked_add(fee)
            .ok_or(ContractError::MathOverflow)?;
        env.storage().instance().set(&ACCUMULATED_FEES, &fees);
        Self::bump_instance(&env);

        if net > 0 {
            Self::mint_reward(&env, &participant, net)?;
        }

        events::publish_rewards_claimed(&env, participant, gross, net, fee);

        Ok(net)
    }

    // ── View functions ───────────────────────────────────────────────────────

    /// Snapshot of a participant's position; the zero record for unknown
    /// addresses.
    pub fn get_staker(env: Env, participant: Address) -> ParticipantRecord {
        registry::load_or_default(&env, &participant)
    }

    /// Rewards committed by past distributions. Accrual since the last
    /// distribution is not included.
    pub fn get_pending_rewards(env: Env, participant: Address) -> i128 {
        registry::load_or_default(&env, &participant).pending_reward
    }

    pub fn is_staking(env: Env, participant: Address) -> bool {
        registry::load_or_default(&env, &participant).stake_amount > 0
    }

    /// Every address that has ever deposited, in first-deposit order.
    pub fn get_stakers(env: Env) -> Vec<Address> {
        registry::stakers(&env)
    }

    pub fn get_total_staked(env: Env) -> i128 {
        Self::read_i128(&env, &TOTAL_STAKED)
    }

    pub fn get_reward_per_tick(env: Env) -> i128 {
        Self::read_i128(&env, &REWARD_PER_TICK)
    }

    pub fn get_fee_basis_points(env: Env) -> u32 {
        env.storage().instance().get(&FEE_BPS).unwrap_or(0)
    }

    pub fn get_accumulated_fees(env: Env) -> i128 {
        Self::read_i128(&env, &ACCUMULATED_FEES)
    }

    pub fn get_last_distribution_tick(env: Env) -> u32 {
        env.storage()
            .instance()
            .get(&LAST_DISTRIBUTION)
            .unwrap_or(0)
    }

    pub fn get_pool_state(env: Env) -> PoolState {
        PoolState {
            total_staked: Self::get_total_staked(env.clone()),
            reward_per_tick: Self::get_reward_per_tick(env.clone()),
            fee_basis_points: Self::get_fee_basis_points(env.clone()),
            accumulated_fees: Self::get_accumulated_fees(env.clone()),
            last_distribution_tick: Self::get_last_distribution_tick(env),
        }
    }

    pub fn get_stake_token(env: Env) -> Result<Address, ContractError> {
        Self::read_address(&env, &STAKE_TOKEN)
    }

    pub fn get_reward_token(env: Env) -> Result<Address, ContractError> {
        Self::read_address(&env, &REWARD_TOKEN)
    }

    pub fn is_initialized(env: Env) -> bool {
        env.storage().instance().has(&INITIALIZED)
    }

    pub fn get_operator(env: Env) -> Result<Address, ContractError> {
        Self::read_address(&env, &OPERATOR)
    }

    // ── Operator functions ───────────────────────────────────────────────────

    /// Update the emission rate. Accrual is only committed by
    /// `distribute_all`, which applies the rate stored at that moment to the
    /// whole span since the previous distribution. Distribute first to settle
    /// the elapsed span at the old rate.
    pub fn set_reward_per_tick(
        env: Env,
        operator: Address,
        new_rate: i128,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        if new_rate < 0 {
            return Err(ContractError::InvalidInput);
        }

        env.storage().instance().set(&REWARD_PER_TICK, &new_rate);
        Self::bump_instance(&env);

        events::publish_reward_per_tick_set(&env, new_rate);

        Ok(())
    }

    /// Update the claim fee. Applies to every later claim.
    pub fn set_fee_basis_points(
        env: Env,
        operator: Address,
        new_fee: u32,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        if new_fee > rewards::MAX_FEE_BPS {
            return Err(ContractError::InvalidFee);
        }

        env.storage().instance().set(&FEE_BPS, &new_fee);
        Self::bump_instance(&env);

        events::publish_fee_set(&env, new_fee);

        Ok(())
    }

    /// Mint the whole fee vault to `destination` and empty it.
    pub fn withdraw_accumulated_fees(
        env: Env,
        operator: Address,
        destination: Address,
    ) -> Result<i128, ContractError> {
        Self::require_initialized(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        let fees = Self::read_i128(&env, &ACCUMULATED_FEES);
        if fees <= 0 {
            return Err(ContractError::NoFeesToWithdraw);
        }

        env.storage().instance().set(&ACCUMULATED_FEES, &0i128);
        Self::bump_instance(&env);

        Self::mint_reward(&env, &destination, fees)?;

        events::publish_fees_withdrawn(&env, destination, fees);

        Ok(fees)
    }

    /// Hand the operator role to `new_operator`. Takes effect immediately and
    /// can happen only once in the farm's lifetime; the previous operator
    /// loses every privilege for good.
    pub fn transfer_operator(
        env: Env,
        operator: Address,
        new_operator: Address,
    ) -> Result<(), ContractError> {
        Self::require_initialized(&env)?;
        operator.require_auth();
        Self::require_operator(&env, &operator)?;

        if env.storage().instance().has(&OPERATOR_TRANSFERRED) {
            return Err(ContractError::OperatorAlreadyTransferred);
        }

        env.storage().instance().set(&OPERATOR, &new_operator);
        env.storage().instance().set(&OPERATOR_TRANSFERRED, &true);
        Self::bump_instance(&env);

        events::publish_operator_transferred(&env, operator, new_operator);

        Ok(())
    }

    // ── Internal helpers ─────────────────────────────────────────────────────

    /// Guard: revert if the contract is not yet initialized.
    fn require_initialized(env: &Env) -> Result<(), ContractError> {
        if !env.storage().instance().has(&INITIALIZED) {
            return Err(ContractError::NotInitialized);
        }
        Ok(())
    }

    /// Guard: revert if `caller` is not the stored operator.
    fn require_operator(env: &Env, caller: &Address) -> Result<(), ContractError> {
        let operator = Self::read_address(env, &OPERATOR)?;
        if *caller != operator {
            return Err(ContractError::Unauthorized);
        }
        Ok(())
    }

    fn read_address(env: &Env, key: &Symbol) -> Result<Address, ContractError> {
        env.storage()
            .instance()
            .get(key)
            .ok_or(ContractError::NotInitialized)
    }

    fn read_i128(env: &Env, key: &Symbol) -> i128 {
        env.storage().instance().get(key).unwrap_or(0)
    }

    fn bump_instance(env: &Env) {
        env.storage()
            .instance()
            .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
    }

    /// Mint `amount` reward tokens to `to` using the farm's admin right on
    /// the reward asset.
    fn mint_reward(env: &Env, to: &Address, amount: i128) -> Result<(), ContractError> {
        let reward_token = Self::read_address(env, &REWARD_TOKEN)?;
        match token::StellarAssetClient::new(env, &reward_token).try_mint(to, &amount) {
            Ok(Ok(())) => Ok(()),
            _ => Err(ContractError::LedgerTransferFailed),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
