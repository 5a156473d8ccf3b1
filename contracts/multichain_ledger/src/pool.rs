//! Per-chain configuration and staking pool registry.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

const CHAIN: Symbol = symbol_short!("CHAIN");
const POOL: Symbol = symbol_short!("POOL");
const RWD_RES: Symbol = symbol_short!("RWD_RES");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Chain id reserved as the "never configured" sentinel.
pub const ABSENT_CHAIN: u32 = 0;

/// Token and relay wiring for one chain partition.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainConfig {
    pub chain_id: u32,
    /// Token contract holding this chain's custody.
    pub token: Address,
    /// Only address allowed to complete bridge transfers targeting this chain.
    pub relayer: Address,
    /// Inactive chains refuse new stake, deposits and transfers but still
    /// let users exit.
    pub active: bool,
}

/// Staking pool accrual state for one chain.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool {
    pub chain_id: u32,
    pub total_staked: i128,
    /// Reward units emitted per second across all stakers.
    pub reward_rate: i128,
    pub last_update_time: u64,
    /// Cumulative reward per staked unit, scaled by [`crate::rewards::SCALE`].
    pub reward_per_token_stored: i128,
}

impl Pool {
    pub fn new(chain_id: u32, now: u64) -> Self {
        Pool {
            chain_id,
            total_staked: 0,
            reward_rate: 0,
            last_update_time: now,
            reward_per_token_stored: 0,
        }
    }
}

// ── Chain configuration ──────────────────────────────────────────────────────

fn chain_key(chain_id: u32) -> (Symbol, u32) {
    (CHAIN, chain_id)
}

pub fn get_chain(env: &Env, chain_id: u32) -> Option<ChainConfig> {
    if chain_id == ABSENT_CHAIN {
        return None;
    }
    let key = chain_key(chain_id);
    let config: Option<ChainConfig> = env.storage().persistent().get(&key);
    if config.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    config
}

pub fn store_chain(env: &Env, config: &ChainConfig) {
    let key = chain_key(config.chain_id);
    env.storage().persistent().set(&key, config);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Configuration of a chain that currently accepts inflows.
pub fn require_active_chain(env: &Env, chain_id: u32) -> Result<ChainConfig, ContractError> {
    match get_chain(env, chain_id) {
        Some(config) if config.active => Ok(config),
        _ => Err(ContractError::UnsupportedChain),
    }
}

/// Configuration of a chain that was ever configured, active or not.
pub fn require_known_chain(env: &Env, chain_id: u32) -> Result<ChainConfig, ContractError> {
    get_chain(env, chain_id).ok_or(ContractError::UnsupportedChain)
}

// ── Pools ────────────────────────────────────────────────────────────────────

fn pool_key(chain_id: u32) -> (Symbol, u32) {
    (POOL, chain_id)
}

pub fn get_pool(env: &Env, chain_id: u32) -> Option<Pool> {
    if chain_id == ABSENT_CHAIN {
        return None;
    }
    let key = pool_key(chain_id);
    let pool: Option<Pool> = env.storage().persistent().get(&key);
    if pool.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    pool
}

pub fn load_pool(env: &Env, chain_id: u32) -> Result<Pool, ContractError> {
    get_pool(env, chain_id).ok_or(ContractError::UnknownChain)
}

pub fn store_pool(env: &Env, pool: &Pool) {
    let key = pool_key(pool.chain_id);
    env.storage().persistent().set(&key, pool);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Create the pool for a freshly configured chain. Existing pools are kept
/// as they are so reconfiguring a chain never resets accrual.
pub fn ensure_pool(env: &Env, chain_id: u32) {
    if get_pool(env, chain_id).is_none() {
        store_pool(env, &Pool::new(chain_id, env.ledger().timestamp()));
    }
}

// ── Reward reserve ───────────────────────────────────────────────────────────

/// Tokens set aside to pay rewards on `chain_id`. Claims draw only from
/// here, never from staked principal or free balances.
pub fn get_reward_reserve(env: &Env, chain_id: u32) -> i128 {
    let key = (RWD_RES, chain_id);
    let reserve: Option<i128> = env.storage().persistent().get(&key);
    if reserve.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    reserve.unwrap_or(0)
}

pub fn store_reward_reserve(env: &Env, chain_id: u32, reserve: i128) {
    let key = (RWD_RES, chain_id);
    env.storage().persistent().set(&key, &reserve);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
