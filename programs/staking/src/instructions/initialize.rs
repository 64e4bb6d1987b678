use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::{REWARD_VAULT_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::state::StakingPool;

/// Initialize a new staking pool
///
/// # Accounts
/// * `owner` - The owner who will control this pool (signer, payer)
/// * `staking_pool` - The staking pool PDA to create
/// * `stake_mint` - Mint of the staked (principal) token
/// * `reward_mint` - Mint of the reward token
/// * `stake_vault` - Vault to hold staked principal
/// * `reward_vault` - Vault to hold reward tokens; funding it is a plain
///   token transfer, no instruction required
///
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// Owner who will control this staking pool
    #[account(mut)]
    pub owner: Signer<'info>,

    /// Staking pool PDA
    #[account(
        init,
        payer = owner,
        space = StakingPool::SIZE,
        seeds = [STAKING_POOL_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Mint of the staked token
    pub stake_mint: Account<'info, Mint>,

    /// Mint of the reward token
    pub reward_mint: Account<'info, Mint>,

    /// Vault to hold staked principal
    #[account(
        init,
        payer = owner,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault to hold reward tokens
    #[account(
        init,
        payer = owner,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_initialize(ctx: Context<Initialize>) -> Result<()> {
    let staking_pool = &mut ctx.accounts.staking_pool;

    staking_pool.owner = ctx.accounts.owner.key();
    staking_pool.stake_mint = ctx.accounts.stake_mint.key();
    staking_pool.reward_mint = ctx.accounts.reward_mint.key();
    staking_pool.stake_vault = ctx.accounts.stake_vault.key();
    staking_pool.reward_vault = ctx.accounts.reward_vault.key();

    staking_pool.total_staked = 0;
    staking_pool.reward_per_token_stored = 0;
    staking_pool.last_update_block = 0;
    staking_pool.reward_per_block = 0;
    staking_pool.first_block_with_reward = 0;
    staking_pool.last_block_with_reward = 0;
    staking_pool.reward_tokens_committed = 0;
    staking_pool.cooldown_seconds = 0;
    staking_pool.paused = false;

    staking_pool.bump = ctx.bumps.staking_pool;
    staking_pool.stake_vault_bump = ctx.bumps.stake_vault;
    staking_pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!(
        "Staking pool initialized: stake_mint={}, reward_mint={}",
        staking_pool.stake_mint,
        staking_pool.reward_mint
    );

    Ok(())
}
