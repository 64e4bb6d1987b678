use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::Staked;
use crate::state::{StakerPosition, StakingPool};

/// Stake principal tokens
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to stake
///
/// # Flow
/// 1. Validate amount; rejected while the pool is paused
/// 2. Settle pool accrual, then the caller's pending reward
/// 3. Transfer principal from user to stake vault
/// 4. Update position and pool totals, lock the new deposit
///
#[derive(Accounts)]
pub struct Stake<'info> {
    /// User staking their tokens
    #[account(mut)]
    pub user: Signer<'info>,

    /// Staking pool
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        constraint = !staking_pool.paused @ StakingError::PoolPaused
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// User's position (created if first time)
    #[account(
        init_if_needed,
        payer = user,
        space = StakerPosition::SIZE,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), user.key().as_ref()],
        bump
    )]
    pub staker: Account<'info, StakerPosition>,

    /// Mint of the staked token
    #[account(
        constraint = stake_mint.key() == staking_pool.stake_mint @ StakingError::InvalidStakeMint
    )]
    pub stake_mint: Account<'info, Mint>,

    /// User's principal token account
    #[account(
        mut,
        token::mint = stake_mint,
        token::authority = user
    )]
    pub user_stake_account: Account<'info, TokenAccount>,

    /// Pool's stake vault
    #[account(
        mut,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.stake_vault_bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token>,
}

pub fn handler_stake(ctx: Context<Stake>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let clock = Clock::get()?;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    // Settle accrual before any principal change
    staking_pool.update_reward(clock.slot)?;
    staker.settle_rewards(staking_pool.reward_per_token_stored)?;

    // Initialize position if new
    if staker.pool == Pubkey::default() {
        staker.pool = staking_pool.key();
        staker.owner = ctx.accounts.user.key();
        staker.bump = ctx.bumps.staker;
    }

    // Transfer principal from user to stake vault
    token::transfer(
        CpiContext::new(
            ctx.accounts.token_program.to_account_info(),
            Transfer {
                from: ctx.accounts.user_stake_account.to_account_info(),
                to: ctx.accounts.stake_vault.to_account_info(),
                authority: ctx.accounts.user.to_account_info(),
            },
        ),
        amount,
    )?;

    // Update position (locks the full deposit from now) and pool total
    staker.record_stake(amount, staking_pool.cooldown_seconds, clock.unix_timestamp)?;
    staking_pool.total_staked = staking_pool
        .total_staked
        .checked_add(amount)
        .ok_or(StakingError::MathOverflow)?;

    emit!(Staked {
        user: ctx.accounts.user.key(),
        amount,
    });

    msg!(
        "Staked {}. User total: {}, pool total: {}",
        amount,
        staker.staked,
        staking_pool.total_staked
    );

    Ok(())
}
