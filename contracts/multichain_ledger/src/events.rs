#![allow(deprecated)] // events().publish migration tracked separately

use soroban_sdk::{symbol_short, Address, BytesN, Env};

// ── Event payloads ──────────────────────────────────────────────────────────

/// Fired when a user adds stake on a chain.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StakedEvent {
    pub chain_id: u32,
    pub user: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when a user removes stake from a chain.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WithdrawnEvent {
    pub chain_id: u32,
    pub user: Address,
    pub amount: i128,
    pub new_total_staked: i128,
    pub timestamp: u64,
}

/// Fired when settled rewards are paid out.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardPaidEvent {
    pub chain_id: u32,
    pub user: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when tokens are added to a chain's reward reserve.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RewardFundedEvent {
    pub chain_id: u32,
    pub funder: Address,
    pub amount: i128,
    pub new_reserve: i128,
    pub timestamp: u64,
}

/// Fired when a pool's reward rate changes.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PoolUpdatedEvent {
    pub chain_id: u32,
    pub reward_rate: i128,
    pub reward_per_token_stored: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChainConfigUpdatedEvent {
    pub chain_id: u32,
    pub token: Address,
    pub relayer: Address,
    pub active: bool,
    pub timestamp: u64,
}

/// Fired on free-balance deposits and withdrawals.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BalanceChangedEvent {
    pub chain_id: u32,
    pub user: Address,
    pub amount: i128,
    pub new_balance: i128,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCreatedEvent {
    pub user: Address,
    pub index: u32,
    pub merchant: Address,
    pub amount: i128,
    pub frequency: u64,
    pub chain_id: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentProcessedEvent {
    pub user: Address,
    pub index: u32,
    pub merchant: Address,
    pub amount: i128,
    pub chain_id: u32,
    pub timestamp: u64,
}

#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubscriptionCancelledEvent {
    pub user: Address,
    pub index: u32,
    pub timestamp: u64,
}

/// Fired when funds are locked for a cross-chain transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferInitiatedEvent {
    pub transfer_id: BytesN<32>,
    pub source_chain: u32,
    pub target_chain: u32,
    pub sender: Address,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when the target chain's relay releases a transfer.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransferCompletedEvent {
    pub transfer_id: BytesN<32>,
    pub target_chain: u32,
    pub recipient: Address,
    pub amount: i128,
    pub timestamp: u64,
}

/// Fired when an ownership hand-over is proposed or accepted.
#[soroban_sdk::contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnershipEvent {
    pub previous_owner: Address,
    pub new_owner: Address,
    pub timestamp: u64,
}

// ── Publishers ──────────────────────────────────────────────────────────────

pub fn publish_initialized(env: &Env, owner: Address) {
    env.events().publish((symbol_short!("INIT"),), owner);
}

pub fn publish_staked(
    env: &Env,
    chain_id: u32,
    user: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("STAKED"), chain_id, user.clone()),
        StakedEvent {
            chain_id,
            user,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_withdrawn(
    env: &Env,
    chain_id: u32,
    user: Address,
    amount: i128,
    new_total_staked: i128,
) {
    env.events().publish(
        (symbol_short!("WITHDRAWN"), chain_id, user.clone()),
        WithdrawnEvent {
            chain_id,
            user,
            amount,
            new_total_staked,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_paid(env: &Env, chain_id: u32, user: Address, amount: i128) {
    env.events().publish(
        (symbol_short!("RWD_PAID"), chain_id, user.clone()),
        RewardPaidEvent {
            chain_id,
            user,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_reward_funded(
    env: &Env,
    chain_id: u32,
    funder: Address,
    amount: i128,
    new_reserve: i128,
) {
    env.events().publish(
        (symbol_short!("RWD_FUND"), chain_id, funder.clone()),
        RewardFundedEvent {
            chain_id,
            funder,
            amount,
            new_reserve,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_pool_updated(
    env: &Env,
    chain_id: u32,
    reward_rate: i128,
    reward_per_token_stored: i128,
) {
    env.events().publish(
        (symbol_short!("POOL_UPD"), chain_id),
        PoolUpdatedEvent {
            chain_id,
            reward_rate,
            reward_per_token_stored,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_chain_config_updated(
    env: &Env,
    chain_id: u32,
    token: Address,
    relayer: Address,
    active: bool,
) {
    env.events().publish(
        (symbol_short!("CHAIN_CFG"), chain_id),
        ChainConfigUpdatedEvent {
            chain_id,
            token,
            relayer,
            active,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_deposited(env: &Env, chain_id: u32, user: Address, amount: i128, new_balance: i128) {
    env.events().publish(
        (symbol_short!("DEPOSIT"), chain_id, user.clone()),
        BalanceChangedEvent {
            chain_id,
            user,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_balance_withdrawn(
    env: &Env,
    chain_id: u32,
    user: Address,
    amount: i128,
    new_balance: i128,
) {
    env.events().publish(
        (symbol_short!("BAL_WD"), chain_id, user.clone()),
        BalanceChangedEvent {
            chain_id,
            user,
            amount,
            new_balance,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_subscription_created(
    env: &Env,
    user: Address,
    index: u32,
    merchant: Address,
    amount: i128,
    frequency: u64,
    chain_id: u32,
) {
    env.events().publish(
        (symbol_short!("SUB_NEW"), user.clone()),
        SubscriptionCreatedEvent {
            user,
            index,
            merchant,
            amount,
            frequency,
            chain_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_payment_processed(
    env: &Env,
    user: Address,
    index: u32,
    merchant: Address,
    amount: i128,
    chain_id: u32,
) {
    env.events().publish(
        (symbol_short!("SUB_PAID"), user.clone(), merchant.clone()),
        PaymentProcessedEvent {
            user,
            index,
            merchant,
            amount,
            chain_id,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_subscription_cancelled(env: &Env, user: Address, index: u32) {
    env.events().publish(
        (symbol_short!("SUB_END"), user.clone()),
        SubscriptionCancelledEvent {
            user,
            index,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transfer_initiated(
    env: &Env,
    transfer_id: BytesN<32>,
    source_chain: u32,
    target_chain: u32,
    sender: Address,
    recipient: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("XFER_INIT"), source_chain, target_chain),
        TransferInitiatedEvent {
            transfer_id,
            source_chain,
            target_chain,
            sender,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_transfer_completed(
    env: &Env,
    transfer_id: BytesN<32>,
    target_chain: u32,
    recipient: Address,
    amount: i128,
) {
    env.events().publish(
        (symbol_short!("XFER_DONE"), target_chain),
        TransferCompletedEvent {
            transfer_id,
            target_chain,
            recipient,
            amount,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_paused(env: &Env, caller: Address) {
    env.events()
        .publish((symbol_short!("PAUSED"),), (caller, env.ledger().timestamp()));
}

pub fn publish_unpaused(env: &Env, caller: Address) {
    env.events()
        .publish((symbol_short!("UNPAUSED"),), (caller, env.ledger().timestamp()));
}

pub fn publish_operator_set(env: &Env, operator: Address, enabled: bool) {
    env.events()
        .publish((symbol_short!("OPERATOR"), operator), enabled);
}

pub fn publish_owner_proposed(env: &Env, current_owner: Address, proposed_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_PROP"),),
        OwnershipEvent {
            previous_owner: current_owner,
            new_owner: proposed_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_accepted(env: &Env, previous_owner: Address, new_owner: Address) {
    env.events().publish(
        (symbol_short!("OWN_ACPT"),),
        OwnershipEvent {
            previous_owner,
            new_owner,
            timestamp: env.ledger().timestamp(),
        },
    );
}

pub fn publish_owner_transfer_cancelled(env: &Env, owner: Address, cancelled: Address) {
    env.events()
        .publish((symbol_short!("OWN_CNCL"), owner), cancelled);
}
