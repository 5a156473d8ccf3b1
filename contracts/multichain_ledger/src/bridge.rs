//! Cross-chain transfer records.
//!
//! A transfer is recorded when funds are locked on the source chain and
//! flipped to completed exactly once when the target chain's relay releases
//! them. Records are never deleted. There is no refund path: a transfer the
//! relay never completes stays locked.

use soroban_sdk::{contracttype, symbol_short, xdr::ToXdr, Address, BytesN, Env, Symbol};

const TRANSFER: Symbol = symbol_short!("XFER");

const TTL_THRESHOLD: u32 = 17_280; // ~1 day
const TTL_EXTEND_TO: u32 = 518_400; // ~30 days

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Transfer {
    pub source_chain: u32,
    pub target_chain: u32,
    pub sender: Address,
    pub recipient: Address,
    pub amount: i128,
    pub completed: bool,
    pub timestamp: u64,
}

/// SHA-256 over the XDR encoding of the transfer's identifying fields.
pub fn derive_id(
    env: &Env,
    source_chain: u32,
    target_chain: u32,
    sender: &Address,
    recipient: &Address,
    amount: i128,
    timestamp: u64,
) -> BytesN<32> {
    let preimage = (
        source_chain,
        target_chain,
        sender.clone(),
        recipient.clone(),
        amount,
        timestamp,
    )
        .to_xdr(env);
    env.crypto().sha256(&preimage).to_bytes()
}

fn transfer_key(id: &BytesN<32>) -> (Symbol, BytesN<32>) {
    (TRANSFER, id.clone())
}

pub fn get(env: &Env, id: &BytesN<32>) -> Option<Transfer> {
    let key = transfer_key(id);
    let transfer: Option<Transfer> = env.storage().persistent().get(&key);
    if transfer.is_some() {
        env.storage()
            .persistent()
            .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
    }
    transfer
}

pub fn exists(env: &Env, id: &BytesN<32>) -> bool {
    env.storage().persistent().has(&transfer_key(id))
}

pub fn store(env: &Env, id: &BytesN<32>, transfer: &Transfer) {
    let key = transfer_key(id);
    env.storage().persistent().set(&key, transfer);
    env.storage()
        .persistent()
        .extend_ttl(&key, TTL_THRESHOLD, TTL_EXTEND_TO);
}
