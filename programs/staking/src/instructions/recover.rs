use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::RewardTokensRecovered;
use crate::state::StakingPool;

/// Recover reward tokens not committed to stakers (owner only). The only
/// path for the operator to reclaim tokens never promised to stakers;
/// everything still owed under the window, plus rewards accrued but not yet
/// claimed, stays in the vault.
#[derive(Accounts)]
pub struct RecoverRewards<'info> {
    #[account(
        constraint = owner.key() == staking_pool.owner @ StakingError::Unauthorized
    )]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Reward token mint
    #[account(
        constraint = reward_mint.key() == staking_pool.reward_mint @ StakingError::InvalidRewardMint
    )]
    pub reward_mint: Account<'info, Mint>,

    /// Owner's reward token account
    #[account(
        mut,
        token::mint = reward_mint,
        token::authority = owner
    )]
    pub owner_reward_account: Account<'info, TokenAccount>,

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

pub fn handler_recover_rewards(ctx: Context<RecoverRewards>) -> Result<()> {
    let staking_pool = &ctx.accounts.staking_pool;

    let amount = ctx
        .accounts
        .reward_vault
        .amount
        .checked_sub(staking_pool.reward_tokens_committed)
        .ok_or(StakingError::MathUnderflow)?;

    if amount == 0 {
        return Ok(());
    }

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
                to: ctx.accounts.owner_reward_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(RewardTokensRecovered { amount });

    msg!("Recovered {} unreserved reward tokens", amount);

    Ok(())
}
