#![allow(clippy::unwrap_used, clippy::expect_used)]
extern crate std;

use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::{
    test_utils::{setup, CHAIN_A, CHAIN_B},
    ChainConfig, ContractError, MultiChainLedger, MultiChainLedgerClient,
};

// ── Initialisation ────────────────────────────────────────────────────────────

#[test]
fn test_initialize_once() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MultiChainLedger, ());
    let client = MultiChainLedgerClient::new(&env, &contract_id);

    assert!(!client.is_initialized());
    assert!(!client.is_paused());

    let owner = Address::generate(&env);
    client.initialize(&owner);
    assert!(client.is_initialized());
    assert_eq!(client.get_owner(), owner);

    assert_eq!(
        client.try_initialize(&owner),
        Err(Ok(ContractError::AlreadyInitialized))
    );
}

#[test]
fn test_entry_points_require_initialisation() {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(MultiChainLedger, ());
    let client = MultiChainLedgerClient::new(&env, &contract_id);

    let user = Address::generate(&env);
    assert_eq!(
        client.try_stake(&user, &CHAIN_A, &10),
        Err(Ok(ContractError::NotInitialized))
    );
    assert_eq!(
        client.try_pause(&user),
        Err(Ok(ContractError::NotInitialized))
    );
}

// ── Chain configuration ───────────────────────────────────────────────────────

#[test]
fn test_chain_config_creates_pool_once() {
    let ctx = setup(100);

    let config = ctx.client.get_chain_config(&CHAIN_A).unwrap();
    assert_eq!(
        config,
        ChainConfig {
            chain_id: CHAIN_A,
            token: ctx.token_a.clone(),
            relayer: ctx.relayer_a.clone(),
            active: true,
        }
    );

    let staker = ctx.funded_user(1_000);
    ctx.client.stake(&staker, &CHAIN_A, &1_000);

    // Reconfiguring swaps the relay but keeps pool state.
    let new_relayer = Address::generate(&ctx.env);
    ctx.client
        .update_chain_config(&ctx.owner, &CHAIN_A, &ctx.token_a, &new_relayer, &true);
    assert_eq!(
        ctx.client.get_chain_config(&CHAIN_A).unwrap().relayer,
        new_relayer
    );
    let pool = ctx.client.get_pool(&CHAIN_A).unwrap();
    assert_eq!(pool.total_staked, 1_000);
    assert_eq!(pool.reward_rate, 100);
}

#[test]
fn test_chain_token_cannot_be_swapped() {
    let ctx = setup(100);
    let staker = ctx.funded_user(1_000);
    ctx.client.stake(&staker, &CHAIN_A, &1_000);

    assert_eq!(
        ctx.client
            .try_update_chain_config(&ctx.owner, &CHAIN_A, &ctx.token_b, &ctx.relayer_a, &true),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(ctx.client.get_chain_config(&CHAIN_A).unwrap().token, ctx.token_a);

    // Principal still comes back in the token it was staked in.
    let token_b_custody = ctx.token_balance(&ctx.token_b, &ctx.contract_id);
    ctx.client.unstake(&staker, &CHAIN_A, &1_000);
    assert_eq!(ctx.token_balance(&ctx.token_a, &staker), 1_000);
    assert_eq!(ctx.token_balance(&ctx.token_b, &staker), 0);
    assert_eq!(
        ctx.token_balance(&ctx.token_b, &ctx.contract_id),
        token_b_custody
    );
}

#[test]
fn test_chain_config_rejects_sentinel_and_strangers() {
    let ctx = setup(100);
    let intruder = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client
            .try_update_chain_config(&ctx.owner, &0, &ctx.token_a, &ctx.relayer_a, &true),
        Err(Ok(ContractError::InvalidInput))
    );
    assert_eq!(
        ctx.client
            .try_update_chain_config(&intruder, &9, &ctx.token_a, &ctx.relayer_a, &true),
        Err(Ok(ContractError::Unauthorized))
    );
    assert!(ctx.client.get_chain_config(&9).is_none());
    assert!(ctx.client.get_pool(&0).is_none());
}

// ── Pause ─────────────────────────────────────────────────────────────────────

#[test]
fn test_pause_blocks_mutations_but_not_configuration() {
    let ctx = setup(100);
    let staker = ctx.funded_user(1_000);
    ctx.client.stake(&staker, &CHAIN_A, &500);

    ctx.client.pause(&ctx.owner);
    assert!(ctx.client.is_paused());

    assert_eq!(
        ctx.client.try_stake(&staker, &CHAIN_A, &100),
        Err(Ok(ContractError::SystemPaused))
    );
    assert_eq!(
        ctx.client.try_unstake(&staker, &CHAIN_A, &100),
        Err(Ok(ContractError::SystemPaused))
    );
    assert_eq!(
        ctx.client.try_claim_reward(&staker, &CHAIN_A),
        Err(Ok(ContractError::SystemPaused))
    );
    assert_eq!(
        ctx.client.try_deposit(&staker, &CHAIN_A, &100),
        Err(Ok(ContractError::SystemPaused))
    );
    assert_eq!(
        ctx.client.try_fund_rewards(&staker, &CHAIN_A, &100),
        Err(Ok(ContractError::SystemPaused))
    );

    // Configuration still goes through.
    ctx.client.set_reward_rate(&ctx.owner, &CHAIN_A, &50);
    ctx.client
        .update_chain_config(&ctx.owner, &CHAIN_B, &ctx.token_b, &ctx.relayer_b, &false);

    ctx.client.unpause(&ctx.owner);
    assert!(!ctx.client.is_paused());
    ctx.client.stake(&staker, &CHAIN_A, &100);
    assert_eq!(ctx.client.get_total_staked(&CHAIN_A), 600);
}

#[test]
fn test_operator_can_pause_but_not_configure() {
    let ctx = setup(100);
    let operator = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client.try_pause(&operator),
        Err(Ok(ContractError::Unauthorized))
    );

    ctx.client.set_operator(&ctx.owner, &operator, &true);
    assert!(ctx.client.is_operator(&operator));

    ctx.client.pause(&operator);
    assert!(ctx.client.is_paused());
    ctx.client.unpause(&operator);
    assert!(!ctx.client.is_paused());

    assert_eq!(
        ctx.client.try_set_reward_rate(&operator, &CHAIN_A, &1),
        Err(Ok(ContractError::Unauthorized))
    );
    assert_eq!(
        ctx.client.try_set_operator(&operator, &operator, &false),
        Err(Ok(ContractError::Unauthorized))
    );

    ctx.client.set_operator(&ctx.owner, &operator, &false);
    assert!(!ctx.client.is_operator(&operator));
    assert_eq!(
        ctx.client.try_pause(&operator),
        Err(Ok(ContractError::Unauthorized))
    );
}

// ── Ownership transfer ────────────────────────────────────────────────────────

#[test]
fn test_two_step_ownership_transfer() {
    let ctx = setup(100);
    let successor = Address::generate(&ctx.env);
    let impostor = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client.try_accept_owner(&successor),
        Err(Ok(ContractError::NoPendingOwner))
    );

    ctx.client.propose_owner(&ctx.owner, &successor);
    assert_eq!(ctx.client.get_pending_owner(), Some(successor.clone()));
    // Proposal alone changes nothing.
    assert_eq!(ctx.client.get_owner(), ctx.owner);

    assert_eq!(
        ctx.client.try_accept_owner(&impostor),
        Err(Ok(ContractError::Unauthorized))
    );

    ctx.client.accept_owner(&successor);
    assert_eq!(ctx.client.get_owner(), successor);
    assert_eq!(ctx.client.get_pending_owner(), None);

    // The previous owner lost its privileges.
    assert_eq!(
        ctx.client.try_set_reward_rate(&ctx.owner, &CHAIN_A, &1),
        Err(Ok(ContractError::Unauthorized))
    );
    ctx.client.set_reward_rate(&successor, &CHAIN_A, &1);
}

#[test]
fn test_cancel_ownership_transfer() {
    let ctx = setup(100);
    let successor = Address::generate(&ctx.env);

    assert_eq!(
        ctx.client.try_cancel_owner_transfer(&ctx.owner),
        Err(Ok(ContractError::NoPendingOwner))
    );

    ctx.client.propose_owner(&ctx.owner, &successor);
    ctx.client.cancel_owner_transfer(&ctx.owner);
    assert_eq!(ctx.client.get_pending_owner(), None);
    assert_eq!(
        ctx.client.try_accept_owner(&successor),
        Err(Ok(ContractError::NoPendingOwner))
    );
}
