use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

use crate::errors::ContractError;

// Per-user persistent storage uses tuple keys: (prefix, user, chain_id)
const USER_STAKE: Symbol = symbol_short!("STK");
const USER_BALANCE: Symbol = symbol_short!("BAL");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

/// A user's staking position on one chain.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct UserStakeInfo {
    pub staked_amount: i128,
    /// Settled but unclaimed rewards.
    pub rewards: i128,
    /// Pool accumulator value at this user's last settlement.
    pub reward_per_token_paid: i128,
}

fn stake_key(user: &Address, chain_id: u32) -> (Symbol, Address, u32) {
    (USER_STAKE, user.clone(), chain_id)
}

fn balance_key(user: &Address, chain_id: u32) -> (Symbol, Address, u32) {
    (USER_BALANCE, user.clone(), chain_id)
}

pub fn get_stake(env: &Env, user: &Address, chain_id: u32) -> UserStakeInfo {
    let key = stake_key(user, chain_id);
    match env.storage().persistent().get(&key) {
        Some(info) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            info
        }
        None => UserStakeInfo::default(),
    }
}

pub fn store_stake(env: &Env, user: &Address, chain_id: u32, info: &UserStakeInfo) {
    let key = stake_key(user, chain_id);
    env.storage().persistent().set(&key, info);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Free balances ────────────────────────────────────────────────────────────

pub fn get_balance(env: &Env, user: &Address, chain_id: u32) -> i128 {
    let key = balance_key(user, chain_id);
    let balance: Option<i128> = env.storage().persistent().get(&key);
    if balance.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    balance.unwrap_or(0)
}

fn store_balance(env: &Env, user: &Address, chain_id: u32, balance: i128) {
    let key = balance_key(user, chain_id);
    env.storage().persistent().set(&key, &balance);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn credit(
    env: &Env,
    user: &Address,
    chain_id: u32,
    amount: i128,
) -> Result<i128, ContractError> {
    let balance = get_balance(env, user, chain_id)
        .checked_add(amount)
        .ok_or(ContractError::ArithmeticOverflow)?;
    store_balance(env, user, chain_id, balance);
    Ok(balance)
}

pub fn debit(
    env: &Env,
    user: &Address,
    chain_id: u32,
    amount: i128,
) -> Result<i128, ContractError> {
    let current = get_balance(env, user, chain_id);
    if current < amount {
        return Err(ContractError::InsufficientBalance);
    }
    let balance = current - amount;
    store_balance(env, user, chain_id, balance);
    Ok(balance)
}
