use anchor_lang::prelude::*;

use crate::constants::STAKING_POOL_SEED;
use crate::error::StakingError;
use crate::state::StakingPool;

// =============================================================================
// Pause / Unpause
// =============================================================================

#[derive(Accounts)]
pub struct SetPaused<'info> {
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
}

/// Gate new deposits. Withdrawals and reward claims stay available while
/// paused.
pub fn set_paused(ctx: Context<SetPaused>, paused: bool) -> Result<()> {
    ctx.accounts.staking_pool.paused = paused;

    msg!(
        "Staking pool {} {}",
        ctx.accounts.staking_pool.key(),
        if paused { "PAUSED" } else { "RESUMED" }
    );

    Ok(())
}

// =============================================================================
// Transfer Ownership
// =============================================================================

#[derive(Accounts)]
pub struct TransferOwnership<'info> {
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

    /// CHECK: New owner address, validated to not be default
    #[account(
        constraint = new_owner.key() != Pubkey::default() @ StakingError::InvalidAuthority,
        constraint = new_owner.key() != owner.key() @ StakingError::InvalidAuthority
    )]
    pub new_owner: UncheckedAccount<'info>,
}

pub fn transfer_ownership(ctx: Context<TransferOwnership>) -> Result<()> {
    let old_owner = ctx.accounts.staking_pool.owner;
    ctx.accounts.staking_pool.owner = ctx.accounts.new_owner.key();

    msg!(
        "Ownership transferred from {} to {}",
        old_owner,
        ctx.accounts.new_owner.key()
    );

    Ok(())
}
