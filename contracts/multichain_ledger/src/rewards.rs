//! Lazy reward accrual.
//!
//! Each pool keeps a cumulative reward-per-token accumulator and each user a
//! checkpoint of that accumulator from their last settlement. Settling costs
//! O(1) no matter how many users stake on the chain.

use soroban_sdk::{log, Address, Env, I256};

use crate::{
    account::{self, UserStakeInfo},
    errors::ContractError,
    pool::{self, Pool},
};

/// Fixed-point scaling factor for the reward-per-token accumulator.
pub const SCALE: i128 = 1_000_000_000_000_000_000;

// ── Core reward engine ──────────────────────────────────────────────────────

/// Floor of `factors[0] × … × factors[n] / divisor` for non-negative factors
/// and a positive divisor.
///
/// The product is formed in 256 bits. Any product of an `i128`, a `u64` and
/// [`SCALE`] fits there, so only a quotient that does not fit back into
/// `i128` is reported as overflow.
fn mul_div(env: &Env, factors: &[i128], divisor: i128) -> Result<i128, ContractError> {
    let mut product = I256::from_i128(env, 1);
    for factor in factors {
        product = product.mul(&I256::from_i128(env, *factor));
    }
    product
        .div(&I256::from_i128(env, divisor))
        .to_i128()
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Accumulator value at `now`.
///
/// ```text
/// rpt = stored + elapsed × reward_rate × SCALE / total_staked
/// ```
///
/// An empty pool does not accumulate, and a clock reading earlier than
/// `last_update_time` counts as zero elapsed time.
pub fn reward_per_token(env: &Env, pool: &Pool, now: u64) -> Result<i128, ContractError> {
    if pool.total_staked == 0 {
        return Ok(pool.reward_per_token_stored);
    }

    let elapsed = i128::from(now.saturating_sub(pool.last_update_time));
    if elapsed == 0 || pool.reward_rate == 0 {
        return Ok(pool.reward_per_token_stored);
    }
    let delta = mul_div(env, &[elapsed, pool.reward_rate, SCALE], pool.total_staked)?;

    pool.reward_per_token_stored
        .checked_add(delta)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Rewards owed to `user` against accumulator value `current_rpt`.
///
/// ```text
/// earned = staked × (current_rpt − paid) / SCALE + rewards
/// ```
pub fn earned(env: &Env, user: &UserStakeInfo, current_rpt: i128) -> Result<i128, ContractError> {
    let delta = current_rpt
        .checked_sub(user.reward_per_token_paid)
        .ok_or(ContractError::ArithmeticOverflow)?;
    if delta == 0 || user.staked_amount == 0 {
        return Ok(user.rewards);
    }
    let accrued = mul_div(env, &[user.staked_amount, delta], SCALE)?;

    user.rewards
        .checked_add(accrued)
        .ok_or(ContractError::ArithmeticOverflow)
}

/// Bring the pool accumulator up to `now`.
pub fn accrue(env: &Env, pool: &mut Pool, now: u64) -> Result<(), ContractError> {
    pool.reward_per_token_stored = reward_per_token(env, pool, now)?;
    if now > pool.last_update_time {
        pool.last_update_time = now;
    }
    Ok(())
}

/// Fold everything `user` earned since their checkpoint into `rewards` and
/// move the checkpoint to the pool's current accumulator.
pub fn checkpoint(
    env: &Env,
    user: &mut UserStakeInfo,
    pool: &Pool,
) -> Result<(), ContractError> {
    user.rewards = earned(env, user, pool.reward_per_token_stored)?;
    user.reward_per_token_paid = pool.reward_per_token_stored;
    Ok(())
}

// ── Settlement ──────────────────────────────────────────────────────────────

/// Settle `chain_id` and persist the result. Must run before any mutation of
/// stake, rewards or rate on that chain.
pub fn settle_pool(env: &Env, chain_id: u32) -> Result<Pool, ContractError> {
    let mut pool = pool::load_pool(env, chain_id)?;
    let now = env.ledger().timestamp();
    if now < pool.last_update_time {
        log!(
            env,
            "clock behind pool checkpoint, no accrual",
            chain_id,
            now,
            pool.last_update_time
        );
    }
    accrue(env, &mut pool, now)?;
    pool::store_pool(env, &pool);
    Ok(pool)
}

/// Settle `chain_id` and then `user` within it, persisting both.
pub fn settle_user(
    env: &Env,
    chain_id: u32,
    user: &Address,
) -> Result<(Pool, UserStakeInfo), ContractError> {
    let pool = settle_pool(env, chain_id)?;
    let mut info = account::get_stake(env, user, chain_id);
    checkpoint(env, &mut info, &pool)?;
    account::store_stake(env, user, chain_id, &info);
    Ok((pool, info))
}

/// Read-only projection of a user's position at the current ledger time.
pub fn pending(env: &Env, chain_id: u32, user: &Address) -> Result<i128, ContractError> {
    let pool = pool::load_pool(env, chain_id)?;
    let rpt = reward_per_token(env, &pool, env.ledger().timestamp())?;
    earned(env, &account::get_stake(env, user, chain_id), rpt)
}

// ── Unit tests ──────────────────────────────────────────────────────────────
// Pure arithmetic, no contract invocation.
