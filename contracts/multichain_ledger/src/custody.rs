//! Token movements between external accounts and the ledger's custody.
//!
//! Both directions use the fallible token client so a declined transfer
//! surfaces as a ledger error instead of aborting the host.

use soroban_sdk::{token, Address, Env};

use crate::errors::ContractError;

/// Pull `amount` of `token` from `from` into the contract.
pub fn pull(env: &Env, token: &Address, from: &Address, amount: i128) -> Result<(), ContractError> {
    match token::Client::new(env, token).try_transfer(
        from,
        &env.current_contract_address(),
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::TransferFailed),
    }
}

/// Push `amount` of `token` from the contract to `to`.
pub fn push(env: &Env, token: &Address, to: &Address, amount: i128) -> Result<(), ContractError> {
    match token::Client::new(env, token).try_transfer(
        &env.current_contract_address(),
        to,
        &amount,
    ) {
        Ok(Ok(())) => Ok(()),
        _ => Err(ContractError::InsufficientPoolFunds),
    }
}
