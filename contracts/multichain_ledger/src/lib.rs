#![no_std]

//! Multi-chain token ledger.
//!
//! One contract hosts every chain partition: per-chain staking pools with
//! continuously accruing rewards, per-user free balances, recurring
//! subscriptions paid from those balances, and cross-chain transfer records
//! completed by a per-chain relay.
//!
//! Every entry point that changes stake, rewards or rate settles the pool
//! (and the caller, when there is one) before mutating anything.

pub mod access;
pub mod account;
pub mod bridge;
pub mod custody;
pub mod errors;
pub mod events;
pub mod guard;
pub mod pool;
pub mod rewards;
pub mod subscription;

use soroban_sdk::{contract, contractimpl, Address, BytesN, Env, Vec};

pub use access::LedgerConfig;
pub use account::UserStakeInfo;
pub use bridge::Transfer;
pub use errors::{ContractError, ErrorCategory};
pub use pool::{ChainConfig, Pool};
pub use subscription::Subscription;

use guard::ReentrancyGuard;

// ── Contract ─────────────────────────────────────────────────────────────────

#[contract]
pub struct MultiChainLedger;

#[contractimpl]
impl MultiChainLedger {
    // ── Initialisation ──────────────────────────────────────────────────────

    /// Bootstrap the ledger with its owner. Chains are added afterwards with
    /// `update_chain_config`.
    pub fn initialize(env: Env, owner: Address) -> Result<(), ContractError> {
        if access::is_initialized(&env) {
            return Err(ContractError::AlreadyInitialized);
        }
        owner.require_auth();

        access::store_config(
            &env,
            &LedgerConfig {
                owner: owner.clone(),
                paused: false,
            },
        );

        events::publish_initialized(&env, owner);

        Ok(())
    }

    // ── Chain configuration ─────────────────────────────────────────────────

    /// Create or reconfigure a chain partition. The first configuration also
    /// creates the chain's pool with a zero reward rate.
    pub fn update_chain_config(
        env: Env,
        caller: Address,
        chain_id: u32,
        token: Address,
        relayer: Address,
        active: bool,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        if chain_id == pool::ABSENT_CHAIN {
            return Err(ContractError::InvalidInput);
        }
        // Custody is denominated in the first token a chain was wired to.
        if let Some(existing) = pool::get_chain(&env, chain_id) {
            if existing.token != token {
                return Err(ContractError::InvalidInput);
            }
        }

        pool::store_chain(
            &env,
            &ChainConfig {
                chain_id,
                token: token.clone(),
                relayer: relayer.clone(),
                active,
            },
        );
        pool::ensure_pool(&env, chain_id);

        events::publish_chain_config_updated(&env, chain_id, token, relayer, active);

        Ok(())
    }

    /// Change a pool's emission rate.
    ///
    /// The accumulator is flushed at the old rate first, so time already
    /// elapsed is never repriced.
    pub fn set_reward_rate(
        env: Env,
        caller: Address,
        chain_id: u32,
        rate: i128,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;

        if rate < 0 {
            return Err(ContractError::InvalidAmount);
        }

        let mut pool = rewards::settle_pool(&env, chain_id)?;
        pool.reward_rate = rate;
        pool::store_pool(&env, &pool);

        events::publish_pool_updated(&env, chain_id, rate, pool.reward_per_token_stored);

        Ok(())
    }

    // ── Pause & roles ───────────────────────────────────────────────────────

    pub fn pause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let mut config = access::require_operator(&env, &caller)?;
        config.paused = true;
        access::store_config(&env, &config);
        events::publish_paused(&env, caller);
        Ok(())
    }

    pub fn unpause(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        let mut config = access::require_operator(&env, &caller)?;
        config.paused = false;
        access::store_config(&env, &config);
        events::publish_unpaused(&env, caller);
        Ok(())
    }

    pub fn is_paused(env: Env) -> bool {
        access::load_config(&env)
            .map(|config| config.paused)
            .unwrap_or(false)
    }

    /// Grant or revoke the operator role (pause / unpause only).
    pub fn set_operator(
        env: Env,
        caller: Address,
        operator: Address,
        enabled: bool,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::set_operator(&env, &operator, enabled);
        events::publish_operator_set(&env, operator, enabled);
        Ok(())
    }

    pub fn is_operator(env: Env, address: Address) -> bool {
        access::is_operator(&env, &address)
    }

    // ── Ownership transfer (two-step) ───────────────────────────────────────

    /// Propose a new owner. The proposed address must call `accept_owner`.
    pub fn propose_owner(
        env: Env,
        caller: Address,
        new_owner: Address,
    ) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        access::set_pending_owner(&env, &new_owner);
        events::publish_owner_proposed(&env, caller, new_owner);
        Ok(())
    }

    pub fn accept_owner(env: Env, new_owner: Address) -> Result<(), ContractError> {
        new_owner.require_auth();
        let mut config = access::load_config(&env)?;
        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        if pending != new_owner {
            return Err(ContractError::Unauthorized);
        }

        let previous = config.owner.clone();
        config.owner = new_owner.clone();
        access::store_config(&env, &config);
        access::clear_pending_owner(&env);

        events::publish_owner_accepted(&env, previous, new_owner);
        Ok(())
    }

    pub fn cancel_owner_transfer(env: Env, caller: Address) -> Result<(), ContractError> {
        caller.require_auth();
        access::require_owner(&env, &caller)?;
        let pending = access::pending_owner(&env).ok_or(ContractError::NoPendingOwner)?;
        access::clear_pending_owner(&env);
        events::publish_owner_transfer_cancelled(&env, caller, pending);
        Ok(())
    }

    pub fn get_owner(env: Env) -> Result<Address, ContractError> {
        access::load_config(&env).map(|config| config.owner)
    }

    pub fn get_pending_owner(env: Env) -> Option<Address> {
        access::pending_owner(&env)
    }

    // ── Staking ─────────────────────────────────────────────────────────────

    /// Stake `amount` on `chain_id`.
    ///
    /// Totals move only after the token pull succeeds, so a declined
    /// transfer leaves the position untouched.
    pub fn stake(
        env: Env,
        user: Address,
        chain_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_active_chain(&env, chain_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        // 1. Settle pool and user at the current time.
        let (mut pool, mut info) = rewards::settle_user(&env, chain_id, &user)?;

        // 2. Pull tokens into custody.
        custody::pull(&env, &chain.token, &user, amount)?;

        // 3. Grow the position and the pool total together.
        info.staked_amount = info
            .staked_amount
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool.total_staked = pool
            .total_staked
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        account::store_stake(&env, &user, chain_id, &info);
        pool::store_pool(&env, &pool);

        events::publish_staked(&env, chain_id, user, amount, pool.total_staked);

        Ok(())
    }

    /// Remove `amount` of stake from `chain_id` and return it to the user.
    ///
    /// Allowed on deactivated chains so positions can always be exited.
    pub fn unstake(
        env: Env,
        user: Address,
        chain_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_known_chain(&env, chain_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let (mut pool, mut info) = rewards::settle_user(&env, chain_id, &user)?;
        if info.staked_amount < amount {
            return Err(ContractError::InsufficientStake);
        }

        // Effects before the push.
        info.staked_amount -= amount;
        pool.total_staked -= amount;
        account::store_stake(&env, &user, chain_id, &info);
        pool::store_pool(&env, &pool);

        custody::push(&env, &chain.token, &user, amount)?;

        events::publish_withdrawn(&env, chain_id, user, amount, pool.total_staked);

        Ok(())
    }

    /// Pay out every settled reward the user holds on `chain_id`.
    ///
    /// Returns the amount paid; zero means nothing was owed and no transfer
    /// was attempted.
    pub fn claim_reward(env: Env, user: Address, chain_id: u32) -> Result<i128, ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_known_chain(&env, chain_id)?;
        let (_pool, mut info) = rewards::settle_user(&env, chain_id, &user)?;

        let reward = info.rewards;
        if reward == 0 {
            return Ok(0);
        }

        let reserve = pool::get_reward_reserve(&env, chain_id);
        if reserve < reward {
            return Err(ContractError::InsufficientPoolFunds);
        }
        pool::store_reward_reserve(&env, chain_id, reserve - reward);

        // Zeroing only survives if the payout succeeds; an error return
        // discards it together with every other write of this call.
        info.rewards = 0;
        account::store_stake(&env, &user, chain_id, &info);

        custody::push(&env, &chain.token, &user, reward)?;

        events::publish_reward_paid(&env, chain_id, user, reward);

        Ok(reward)
    }

    /// Add `amount` of the chain's token to its reward reserve. Anyone may
    /// fund; returns the new reserve.
    pub fn fund_rewards(
        env: Env,
        funder: Address,
        chain_id: u32,
        amount: i128,
    ) -> Result<i128, ContractError> {
        funder.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_known_chain(&env, chain_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        custody::pull(&env, &chain.token, &funder, amount)?;
        let reserve = pool::get_reward_reserve(&env, chain_id)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticOverflow)?;
        pool::store_reward_reserve(&env, chain_id, reserve);

        events::publish_reward_funded(&env, chain_id, funder, amount, reserve);

        Ok(reserve)
    }

    // ── Free balances ───────────────────────────────────────────────────────

    /// Credit the user's free balance on `chain_id` after pulling `amount`.
    pub fn deposit(
        env: Env,
        user: Address,
        chain_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_active_chain(&env, chain_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        custody::pull(&env, &chain.token, &user, amount)?;
        let new_balance = account::credit(&env, &user, chain_id, amount)?;

        events::publish_deposited(&env, chain_id, user, amount, new_balance);

        Ok(())
    }

    /// Debit the user's free balance on `chain_id` and send it out.
    pub fn withdraw(
        env: Env,
        user: Address,
        chain_id: u32,
        amount: i128,
    ) -> Result<(), ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_known_chain(&env, chain_id)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }

        let new_balance = account::debit(&env, &user, chain_id, amount)?;
        custody::push(&env, &chain.token, &user, amount)?;

        events::publish_balance_withdrawn(&env, chain_id, user, amount, new_balance);

        Ok(())
    }

    // ── Subscriptions ───────────────────────────────────────────────────────

    /// Register a recurring payment to `merchant`. The first payment becomes
    /// due `frequency` seconds from now. Returns the subscription index.
    pub fn create_subscription(
        env: Env,
        user: Address,
        merchant: Address,
        amount: i128,
        frequency: u64,
        chain_id: u32,
    ) -> Result<u32, ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;

        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if frequency == 0 || merchant == user {
            return Err(ContractError::InvalidInput);
        }
        pool::require_active_chain(&env, chain_id)?;

        let index = subscription::append(
            &env,
            &user,
            Subscription {
                merchant: merchant.clone(),
                amount,
                frequency,
                last_payment: env.ledger().timestamp(),
                active: true,
                chain_id,
            },
        );

        events::publish_subscription_created(
            &env,
            user,
            index,
            merchant,
            amount,
            frequency,
            chain_id,
        );

        Ok(index)
    }

    /// Execute a due subscription payment.
    ///
    /// Anyone may trigger this; the due time and the subscriber's balance
    /// are the only gates.
    pub fn process_payment(env: Env, user: Address, index: u32) -> Result<(), ContractError> {
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let sub = subscription::process(&env, &user, index)?;

        events::publish_payment_processed(
            &env,
            user,
            index,
            sub.merchant,
            sub.amount,
            sub.chain_id,
        );

        Ok(())
    }

    pub fn cancel_subscription(env: Env, user: Address, index: u32) -> Result<(), ContractError> {
        user.require_auth();
        access::require_not_paused(&env)?;

        subscription::cancel(&env, &user, index)?;

        events::publish_subscription_cancelled(&env, user, index);

        Ok(())
    }

    // ── Bridge ──────────────────────────────────────────────────────────────

    /// Lock `amount` on `source_chain` for delivery to `recipient` on
    /// `target_chain`. Returns the transfer id the relay completes against.
    pub fn initiate_transfer(
        env: Env,
        sender: Address,
        source_chain: u32,
        target_chain: u32,
        recipient: Address,
        amount: i128,
    ) -> Result<BytesN<32>, ContractError> {
        sender.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let source = pool::require_active_chain(&env, source_chain)?;
        pool::require_active_chain(&env, target_chain)?;
        if amount <= 0 {
            return Err(ContractError::InvalidAmount);
        }
        if recipient == sender {
            return Err(ContractError::InvalidInput);
        }
        if source_chain == target_chain {
            return Err(ContractError::SameChain);
        }

        let timestamp = env.ledger().timestamp();
        let transfer_id = bridge::derive_id(
            &env,
            source_chain,
            target_chain,
            &sender,
            &recipient,
            amount,
            timestamp,
        );
        if bridge::exists(&env, &transfer_id) {
            return Err(ContractError::DuplicateTransfer);
        }

        bridge::store(
            &env,
            &transfer_id,
            &Transfer {
                source_chain,
                target_chain,
                sender: sender.clone(),
                recipient: recipient.clone(),
                amount,
                completed: false,
                timestamp,
            },
        );

        custody::pull(&env, &source.token, &sender, amount)?;

        events::publish_transfer_initiated(
            &env,
            transfer_id.clone(),
            source_chain,
            target_chain,
            sender,
            recipient,
            amount,
        );

        Ok(transfer_id)
    }

    /// Release a transfer on its target chain.
    ///
    /// `chain_id` is the chain the relay acts for; only that chain's
    /// configured relay may call this, and only for transfers targeting it.
    pub fn complete_transfer(
        env: Env,
        relayer: Address,
        chain_id: u32,
        transfer_id: BytesN<32>,
    ) -> Result<(), ContractError> {
        relayer.require_auth();
        access::require_not_paused(&env)?;
        let _guard = ReentrancyGuard::acquire(&env)?;

        let chain = pool::require_known_chain(&env, chain_id)?;
        if chain.relayer != relayer {
            return Err(ContractError::Unauthorized);
        }

        let mut transfer = bridge::get(&env, &transfer_id).ok_or(ContractError::TransferNotFound)?;
        if transfer.completed {
            return Err(ContractError::AlreadyCompleted);
        }
        if transfer.target_chain != chain_id {
            return Err(ContractError::WrongTargetChain);
        }

        transfer.completed = true;
        bridge::store(&env, &transfer_id, &transfer);

        custody::push(&env, &chain.token, &transfer.recipient, transfer.amount)?;

        events::publish_transfer_completed(
            &env,
            transfer_id,
            chain_id,
            transfer.recipient,
            transfer.amount,
        );

        Ok(())
    }

    // ── View functions ──────────────────────────────────────────────────────

    pub fn is_initialized(env: Env) -> bool {
        access::is_initialized(&env)
    }

    pub fn get_chain_config(env: Env, chain_id: u32) -> Option<ChainConfig> {
        pool::get_chain(&env, chain_id)
    }

    pub fn get_pool(env: Env, chain_id: u32) -> Option<Pool> {
        pool::get_pool(&env, chain_id)
    }

    pub fn get_total_staked(env: Env, chain_id: u32) -> i128 {
        pool::get_pool(&env, chain_id)
            .map(|pool| pool.total_staked)
            .unwrap_or(0)
    }

    pub fn get_reward_reserve(env: Env, chain_id: u32) -> i128 {
        pool::get_reward_reserve(&env, chain_id)
    }

    pub fn get_user_stake(env: Env, chain_id: u32, user: Address) -> UserStakeInfo {
        account::get_stake(&env, &user, chain_id)
    }

    /// Accumulator value the pool would hold if settled now.
    pub fn reward_per_token(env: Env, chain_id: u32) -> Result<i128, ContractError> {
        let pool = pool::load_pool(&env, chain_id)?;
        rewards::reward_per_token(&env, &pool, env.ledger().timestamp())
    }

    /// Rewards the user could claim if they settled now.
    pub fn earned(env: Env, chain_id: u32, user: Address) -> Result<i128, ContractError> {
        rewards::pending(&env, chain_id, &user)
    }

    pub fn get_balance(env: Env, chain_id: u32, user: Address) -> i128 {
        account::get_balance(&env, &user, chain_id)
    }

    pub fn get_subscriptions(env: Env, user: Address) -> Vec<Subscription> {
        subscription::list(&env, &user)
    }

    pub fn get_subscription(
        env: Env,
        user: Address,
        index: u32,
    ) -> Result<Subscription, ContractError> {
        subscription::get(&env, &user, index)
    }

    pub fn get_transfer(env: Env, transfer_id: BytesN<32>) -> Option<Transfer> {
        bridge::get(&env, &transfer_id)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod test_utils;


#[cfg(test)]
mod test_access;
