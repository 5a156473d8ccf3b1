//! Ledger-wide configuration and role checks.
//!
//! The owner configures chains, reward rates and operators. Operators can
//! only pause and unpause. Bridge relays are authorised per chain through
//! [`crate::pool::ChainConfig::relayer`], not here.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

// ── Storage keys ─────────────────────────────────────────────────────────────

const CONFIG: Symbol = symbol_short!("CONFIG");
const PENDING_OWNER: Symbol = symbol_short!("PEND_OWN");
const OPERATOR: Symbol = symbol_short!("OPERATOR");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// Process-wide ledger configuration, held in instance storage.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LedgerConfig {
    pub owner: Address,
    pub paused: bool,
}

pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&CONFIG)
}

pub fn load_config(env: &Env) -> Result<LedgerConfig, ContractError> {
    env.storage()
        .instance()
        .get(&CONFIG)
        .ok_or(ContractError::NotInitialized)
}

pub fn store_config(env: &Env, config: &LedgerConfig) {
    env.storage().instance().set(&CONFIG, config);
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Guard: revert unless `caller` is the stored owner.
pub fn require_owner(env: &Env, caller: &Address) -> Result<LedgerConfig, ContractError> {
    let config = load_config(env)?;
    if config.owner != *caller {
        return Err(ContractError::Unauthorized);
    }
    Ok(config)
}

/// Guard: revert unless `caller` is the owner or an enabled operator.
pub fn require_operator(env: &Env, caller: &Address) -> Result<LedgerConfig, ContractError> {
    let config = load_config(env)?;
    if config.owner == *caller || is_operator(env, caller) {
        return Ok(config);
    }
    Err(ContractError::Unauthorized)
}

/// Fail fast with `SystemPaused` for balance-mutating entry points.
pub fn require_not_paused(env: &Env) -> Result<(), ContractError> {
    if load_config(env)?.paused {
        return Err(ContractError::SystemPaused);
    }
    Ok(())
}

// ── Operators ────────────────────────────────────────────────────────────────

fn operator_key(operator: &Address) -> (Symbol, Address) {
    (OPERATOR, operator.clone())
}

pub fn is_operator(env: &Env, address: &Address) -> bool {
    let key = operator_key(address);
    let enabled = env.storage().persistent().get(&key).unwrap_or(false);
    if enabled {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    enabled
}

pub fn set_operator(env: &Env, operator: &Address, enabled: bool) {
    let key = operator_key(operator);
    if enabled {
        env.storage().persistent().set(&key, &true);
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ── Ownership hand-over ──────────────────────────────────────────────────────

pub fn pending_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&PENDING_OWNER)
}

pub fn set_pending_owner(env: &Env, new_owner: &Address) {
    env.storage().instance().set(&PENDING_OWNER, new_owner);
}

pub fn clear_pending_owner(env: &Env) {
    env.storage().instance().remove(&PENDING_OWNER);
}
