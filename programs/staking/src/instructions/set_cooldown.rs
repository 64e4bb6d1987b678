use anchor_lang::prelude::*;

use crate::constants::{MAX_COOLDOWN_SECONDS, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::state::StakingPool;

/// Set the withdrawal cooldown (owner only)
///
/// Existing locks are not rescaled; the new duration governs decay from
/// each position's next principal-changing event onward.
#[derive(Accounts)]
pub struct SetCooldown<'info> {
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

pub fn handler_set_cooldown(ctx: Context<SetCooldown>, cooldown_seconds: i64) -> Result<()> {
    require!(cooldown_seconds >= 0, StakingError::InvalidAmount);
    require!(
        cooldown_seconds <= MAX_COOLDOWN_SECONDS,
        StakingError::CooldownTooLong
    );

    ctx.accounts.staking_pool.cooldown_seconds = cooldown_seconds;

    msg!("Cooldown set to {} seconds", cooldown_seconds);

    Ok(())
}
