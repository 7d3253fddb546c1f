use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

// ── Storage keys ─────────────────────────────────────────────────────────────

// Per-participant records use tuple keys: (STAKER, participant)
const STAKER: Symbol = symbol_short!("STAKER");
const STAKERS: Symbol = symbol_short!("STAKERS");

const TTL_THRESHOLD: u32 = 518_400; // ~30 days
const TTL_EXTEND_TO: u32 = 3_110_400; // ~180 days

// ── Participant record ───────────────────────────────────────────────────────

/// Staking position of a single participant.
///
/// The zero record (no stake, no pending reward) is what unknown addresses
/// read as.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ParticipantRecord {
    pub stake_amount: i128,
    /// Tick at which `pending_reward` was last reconciled.
    pub last_checkpoint_tick: u32,
    /// Gross reward committed by distributions and not yet claimed.
    pub pending_reward: i128,
}

fn record_key(participant: &Address) -> (Symbol, Address) {
    (STAKER, participant.clone())
}

// ── Records ──────────────────────────────────────────────────────────────────

/// Returns the stored record, or `None` if the address never deposited.
pub fn load(env: &Env, participant: &Address) -> Option<ParticipantRecord> {
    env.storage().persistent().get(&record_key(participant))
}

pub fn load_or_default(env: &Env, participant: &Address) -> ParticipantRecord {
    load(env, participant).unwrap_or_default()
}

pub fn store(env: &Env, participant: &Address, record: &ParticipantRecord) {
    let key = record_key(participant);
    env.storage().persistent().set(&key, record);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Staker enumeration ───────────────────────────────────────────────────────

/// Every address that has ever deposited, in first-deposit order.
pub fn stakers(env: &Env) -> Vec<Address> {
    env.storage()
        .persistent()
        .get(&STAKERS)
        .unwrap_or(Vec::new(env))
}

/// Appends `participant` to the enumeration. Callers must only enrol an
/// address that has no stored record yet, which keeps the list free of
/// duplicates.
pub fn enroll(env: &Env, participant: &Address) {
    let mut all = stakers(env);
    all.push_back(participant.clone());
    env.storage().persistent().set(&STAKERS, &all);
    env.storage()
        .persistent()
        .extend_ttl(&STAKERS, TTL_THRESHOLD, TTL_EXTEND_TO);
}
