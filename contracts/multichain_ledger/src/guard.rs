use soroban_sdk::{symbol_short, Env, Symbol};

use crate::errors::ContractError;

const LOCKED: Symbol = symbol_short!("LOCKED");

/// Exclusive lock held for the whole of a mutating entry point.
///
/// The flag lives in instance storage and is cleared when the guard drops,
/// whichever path the entry point returns through.
pub struct ReentrancyGuard<'a> {
    env: &'a Env,
}

impl<'a> ReentrancyGuard<'a> {
    pub fn acquire(env: &'a Env) -> Result<Self, ContractError> {
        if env.storage().instance().has(&LOCKED) {
            return Err(ContractError::Reentrant);
        }
        env.storage().instance().set(&LOCKED, &true);
        Ok(ReentrancyGuard { env })
    }

    pub fn is_held(env: &Env) -> bool {
        env.storage().instance().has(&LOCKED)
    }
}

impl Drop for ReentrancyGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&LOCKED);
    }
}
