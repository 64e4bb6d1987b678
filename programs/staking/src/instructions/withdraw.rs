use anchor_lang::prelude::*;
use anchor_spl::token::{self, Mint, Token, TokenAccount, Transfer};

use crate::constants::{STAKER_SEED, STAKE_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::Withdrawn;
use crate::state::{StakerPosition, StakingPool};

/// Withdraw staked principal. Gated by the decaying lock: only the portion
/// whose cooldown has decayed away may leave. Stays available while the
/// pool is paused.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `amount` - Amount of principal to withdraw
///
#[derive(Accounts)]
pub struct Withdraw<'info> {
    /// User withdrawing their tokens
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

    pub token_program: Program<'info, Token>,
}

pub fn handler_withdraw(ctx: Context<Withdraw>, amount: u64) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);
    require!(
        ctx.accounts.staker.staked >= amount,
        StakingError::InsufficientStake
    );

    let clock = Clock::get()?;
    let staking_pool = &mut ctx.accounts.staking_pool;
    let staker = &mut ctx.accounts.staker;

    // Settle accrual before any principal change
    staking_pool.update_reward(clock.slot)?;
    staker.settle_rewards(staking_pool.reward_per_token_stored)?;

    // May fail with CooldownNotReached; all state writes precede the CPI
    staker.record_withdraw(amount, staking_pool.cooldown_seconds, clock.unix_timestamp)?;
    staking_pool.total_staked = staking_pool
        .total_staked
        .checked_sub(amount)
        .ok_or(StakingError::MathUnderflow)?;

    // Transfer principal from stake vault back to user, pool PDA signing
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
                from: ctx.accounts.stake_vault.to_account_info(),
                to: ctx.accounts.user_stake_account.to_account_info(),
                authority: staking_pool.to_account_info(),
            },
            signer_seeds,
        ),
        amount,
    )?;

    emit!(Withdrawn {
        user: ctx.accounts.user.key(),
        amount,
    });

    msg!(
        "Withdrew {}. User remaining: {}, pool total: {}",
        amount,
        staker.staked,
        staking_pool.total_staked
    );

    Ok(())
}
