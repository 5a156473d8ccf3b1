#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{
    testutils::{Address as _, Events as _, Ledger as _},
    token::{Client as TokenClient, StellarAssetClient},
    xdr, Address, Env, Symbol, TryFromVal, Val, Vec,
};

use crate::{MultiChainLedger, MultiChainLedgerClient};

pub const CHAIN_A: u32 = 1;
pub const CHAIN_B: u32 = 2;

/// Reward reserve minted into custody on every configured chain.
pub const RESERVE: i128 = 1_000_000_000;

pub struct TestCtx {
    pub env: Env,
    pub client: MultiChainLedgerClient<'static>,
    pub contract_id: Address,
    pub owner: Address,
    pub token_a: Address,
    pub token_b: Address,
    pub relayer_a: Address,
    pub relayer_b: Address,
}

impl TestCtx {
    pub fn mint(&self, token: &Address, to: &Address, amount: i128) {
        StellarAssetClient::new(&self.env, token).mint(to, &amount);
    }

    pub fn token_balance(&self, token: &Address, of: &Address) -> i128 {
        TokenClient::new(&self.env, token).balance(of)
    }

    /// A fresh user holding `amount` of chain A's token.
    pub fn funded_user(&self, amount: i128) -> Address {
        let user = Address::generate(&self.env);
        self.mint(&self.token_a, &user, amount);
        user
    }

    pub fn set_time(&self, timestamp: u64) {
        self.env.ledger().set_timestamp(timestamp);
    }

    /// Topics and payloads of the ledger's own events whose first topic is
    /// `name`, oldest first. Token contract events are skipped.
    pub fn events_named(&self, name: Symbol) -> std::vec::Vec<(Vec<Val>, Val)> {
        let all: std::vec::Vec<(Address, Vec<Val>, Val)> = self
            .env
            .events()
            .all()
            .filter_by_contract(&self.contract_id)
            .events()
            .iter()
            .map(|event| {
                let xdr::ContractEventBody::V0(body) = &event.body;
                let mut topics = Vec::new(&self.env);
                for topic in body.topics.iter() {
                    topics.push_back(Val::try_from_val(&self.env, topic).unwrap());
                }
                let data = Val::try_from_val(&self.env, &body.data).unwrap();
                (self.contract_id.clone(), topics, data)
            })
            .collect();
        all.into_iter()
            .filter(|(contract, topics, _)| {
                *contract == self.contract_id
                    && topics
                        .get(0)
                        .and_then(|topic| Symbol::try_from_val(&self.env, &topic).ok())
                        .is_some_and(|topic| topic == name)
            })
            .map(|(_, topics, data)| (topics, data))
            .collect()
    }

    /// Most recent ledger event named `name`.
    pub fn last_event(&self, name: Symbol) -> (Vec<Val>, Val) {
        self.events_named(name)
            .pop()
            .expect("no event with that topic")
    }
}

/// Ledger with chains A and B configured and active, both with an empty
/// custody. Time starts at zero.
pub fn setup_bare() -> TestCtx {
    let env = Env::default();
    env.mock_all_auths();
    env.ledger().set_timestamp(0);

    let token_a = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();
    let token_b = env
        .register_stellar_asset_contract_v2(Address::generate(&env))
        .address();

    let contract_id = env.register(MultiChainLedger, ());
    let client = MultiChainLedgerClient::new(&env, &contract_id);

    let owner = Address::generate(&env);
    let relayer_a = Address::generate(&env);
    let relayer_b = Address::generate(&env);

    client.initialize(&owner);
    client.update_chain_config(&owner, &CHAIN_A, &token_a, &relayer_a, &true);
    client.update_chain_config(&owner, &CHAIN_B, &token_b, &relayer_b, &true);

    TestCtx {
        env,
        client,
        contract_id,
        owner,
        token_a,
        token_b,
        relayer_a,
        relayer_b,
    }
}

/// Like [`setup_bare`], with `reward_rate` on chain A and a funded reward
/// reserve on both chains.
pub fn setup(reward_rate: i128) -> TestCtx {
    let ctx = setup_bare();
    ctx.client
        .set_reward_rate(&ctx.owner, &CHAIN_A, &reward_rate);
    ctx.mint(&ctx.token_a, &ctx.owner, RESERVE);
    ctx.mint(&ctx.token_b, &ctx.owner, RESERVE);
    ctx.client.fund_rewards(&ctx.owner, &CHAIN_A, &RESERVE);
    ctx.client.fund_rewards(&ctx.owner, &CHAIN_B, &RESERVE);
    ctx
}
