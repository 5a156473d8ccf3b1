//! Recurring merchant payments settled from free balances.
//!
//! Subscriptions are kept in an append-only list per subscriber; cancelling
//! only clears the `active` flag so indices stay stable.

use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol, Vec};

use crate::{account, errors::ContractError};

const SUBSCRIPTIONS: Symbol = symbol_short!("SUBS");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Subscription {
    pub merchant: Address,
    pub amount: i128,
    /// Minimum number of seconds between two payments.
    pub frequency: u64,
    pub last_payment: u64,
    pub active: bool,
    pub chain_id: u32,
}

impl Subscription {
    /// Earliest ledger time at which the next payment may run.
    pub fn next_due(&self) -> u64 {
        self.last_payment.saturating_add(self.frequency)
    }

    pub fn is_due(&self, now: u64) -> bool {
        now >= self.next_due()
    }
}

fn subscriptions_key(user: &Address) -> (Symbol, Address) {
    (SUBSCRIPTIONS, user.clone())
}

pub fn list(env: &Env, user: &Address) -> Vec<Subscription> {
    let key = subscriptions_key(user);
    match env.storage().persistent().get(&key) {
        Some(subs) => {
            env.storage()
                .persistent()
                .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
            subs
        }
        None => Vec::new(env),
    }
}

fn store_list(env: &Env, user: &Address, subs: &Vec<Subscription>) {
    let key = subscriptions_key(user);
    env.storage().persistent().set(&key, subs);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

pub fn get(env: &Env, user: &Address, index: u32) -> Result<Subscription, ContractError> {
    list(env, user)
        .get(index)
        .ok_or(ContractError::SubscriptionNotFound)
}

/// Append a new active subscription and return its index.
pub fn append(env: &Env, user: &Address, subscription: Subscription) -> u32 {
    let mut subs = list(env, user);
    let index = subs.len();
    subs.push_back(subscription);
    store_list(env, user, &subs);
    index
}

/// Run one due payment: move `amount` between free balances on the
/// subscription's chain and advance `last_payment` to now.
pub fn process(env: &Env, user: &Address, index: u32) -> Result<Subscription, ContractError> {
    let mut subs = list(env, user);
    let mut sub = subs.get(index).ok_or(ContractError::SubscriptionNotFound)?;

    if !sub.active {
        return Err(ContractError::InactiveSubscription);
    }
    let now = env.ledger().timestamp();
    if !sub.is_due(now) {
        return Err(ContractError::PaymentNotDue);
    }

    account::debit(env, user, sub.chain_id, sub.amount)?;
    account::credit(env, &sub.merchant, sub.chain_id, sub.amount)?;

    sub.last_payment = now;
    subs.set(index, sub.clone());
    store_list(env, user, &subs);

    Ok(sub)
}

/// Deactivate a subscription; the entry itself is kept.
pub fn cancel(env: &Env, user: &Address, index: u32) -> Result<(), ContractError> {
    let mut subs = list(env, user);
    let mut sub = subs.get(index).ok_or(ContractError::SubscriptionNotFound)?;
    if !sub.active {
        return Err(ContractError::InactiveSubscription);
    }
    sub.active = false;
    subs.set(index, sub);
    store_list(env, user, &subs);
    Ok(())
}
