use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKER_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::RewardPaid;
use crate::state::{StakerPosition, StakingPool};

/// Claim accrued rewards. A no-op when nothing has accrued. Stays available
/// while the pool is paused.
#[derive(Accounts)]
pub struct ClaimReward<'info> {
    /// User claiming their rewards
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's position
    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump = staker.bump,
        constraint = staker.owner == user.key() @ StakingError::InvalidAuthority
    )]
    pub staker: Account<'info, StakerPosition>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// User's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = user
    )]
    pub user_reward_account: Account<'info, TokenAccount>,

    /// Pool's reward vault
    #[account(
        mut,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump,
        token::mint = reward_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

pub fn handler_claim_reward(ctx: Context<ClaimReward>) -> Result<()> {
    let clock = Clock::get()?;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    staking_pool.update_reward(clock.slot)?;
    staker.settle_rewards(staking_pool.reward_per_token_stored)?;

    let reward = staker.rewards;
    if reward == 0 {
        return Ok(());
    }

    staker.rewards = 0;
    staking_pool.record_reward_paid(reward)?;

    // Transfer reward tokens to the user, pool PDA signing
    let stake_mint_key = staking_pool.stake_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        stake_mint_key.as_ref(),
        &[staking_pool.bump],
    ];
    let signer_seeds = &[&seeds[..]];

    token::transfer(
        CpiContext::new_with_signer(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.reward_vault.to_account_info(),
                to: ctx.accounts.user_reward_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        reward,
    )?;

    emit!(RewardPaid {
        user: ctx.accounts.user.key(),
        reward,
    });

    msg!("Paid {} reward tokens", reward);

    Ok(())
}
