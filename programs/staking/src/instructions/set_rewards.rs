use anchor_lang::prelude::*;
use anchor_spl::token::TokenAccount;

use crate::constants::{REWARD_VAULT_SEED, STAKING_POOL_SEED};
use crate::error::StakingError;
use crate::events::RewardsSet;
use crate::state::StakingPool;

/// Replace the reward schedule (owner only)
///
/// Settles accrual under the old schedule first, then atomically swaps in
/// the new rate and window. Fails with InsufficientRewardReserve when the
/// new window plus rewards already owed commit more tokens than the reward
/// vault holds.
///
/// # Arguments
/// * `ctx` - The context containing all accounts
/// * `reward_per_block` - Reward tokens distributed per slot
/// * `from_slot` - First slot of the new window
/// * `duration_blocks` - Window length in slots; the last rewarded slot is
///   `from_slot + duration_blocks - 1`
///
#[derive(Accounts)]
pub struct SetRewards<'info> {
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

    /// Pool's reward vault; its balance bounds the new commitment
    #[account(
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump = staking_pool.reward_vault_bump
    )]
    pub reward_vault: Account<'info, TokenAccount>,
}

pub fn handler_set_rewards(
    ctx: Context<SetRewards>,
    reward_per_block: u64,
    from_slot: u64,
    duration_blocks: u64,
) -> Result<()> {
    let clock = Clock::get()?;
    let staking_pool = &mut ctx.accounts.staking_pool;

    // Settle the old schedule up to the current slot before replacing it
    staking_pool.update_reward(clock.slot)?;

    staking_pool.set_reward_schedule(
        reward_per_block,
        from_slot,
        duration_blocks,
        ctx.accounts.reward_vault.amount,
        clock.slot,
    )?;

    emit!(RewardsSet {
        reward_per_block,
        first_block_with_reward: staking_pool.first_block_with_reward,
        last_block_with_reward: staking_pool.last_block_with_reward,
    });

    msg!(
        "Rewards set: {} per block over slots [{}, {}]",
        reward_per_block,
        staking_pool.first_block_with_reward,
        staking_pool.last_block_with_reward
    );

    Ok(())
}
