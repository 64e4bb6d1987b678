use anchor_lang::prelude::*;

use crate::constants::{APY_PRECISION, BLOCKS_PER_YEAR, REWARD_PRECISION};
use crate::error::StakingError;

/// Global staking pool state
/// PDA: ["staking_pool", stake_mint]
#[account]
#[derive(Default)]
pub struct StakingPool {
    /// Owner who can set the reward schedule, cooldown and pause flag
    pub owner: Pubkey,

    /// Mint of the staked (principal) token
    pub stake_mint: Pubkey,

    /// Mint of the reward token
    pub reward_mint: Pubkey,

    /// Vault holding staked principal
    /// PDA: ["stake_vault", staking_pool]
    pub stake_vault: Pubkey,

    /// Vault holding reward tokens to distribute
    /// PDA: ["reward_vault", staking_pool]
    pub reward_vault: Pubkey,

    /// Total principal currently staked across all users
    pub total_staked: u64,

    /// Accumulated reward per staked token (scaled by REWARD_PRECISION)
    pub reward_per_token_stored: u128,

    /// Last slot at which the accumulator was advanced
    pub last_update_block: u64,

    /// Reward tokens distributed per slot while the window is active
    pub reward_per_block: u64,

    /// First slot of the active reward window
    pub first_block_with_reward: u64,

    /// Last slot of the active reward window (inclusive)
    pub last_block_with_reward: u64,

    /// Reward tokens committed to stakers: the active window's remaining
    /// commitment plus rewards accrued but not yet paid out. Decremented
    /// only on payout; the owner can recover vault balance above this.
    pub reward_tokens_committed: u64,

    /// Wall-clock cooldown governing withdrawal lock decay (seconds)
    pub cooldown_seconds: i64,

    /// Gate on new deposits; withdrawals and claims stay open
    pub paused: bool,

    /// PDA bump seed
    pub bump: u8,

    /// Stake vault bump seed
    pub stake_vault_bump: u8,

    /// Reward vault bump seed
    pub reward_vault_bump: u8,
}

impl StakingPool {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // owner
        32 + // stake_mint
        32 + // reward_mint
        32 + // stake_vault
        32 + // reward_vault
        8 +  // total_staked
        16 + // reward_per_token_stored (u128)
        8 +  // last_update_block
        8 +  // reward_per_block
        8 +  // first_block_with_reward
        8 +  // last_block_with_reward
        8 +  // reward_tokens_committed
        8 +  // cooldown_seconds
        1 +  // paused
        1 +  // bump
        1 +  // stake_vault_bump
        1 +  // reward_vault_bump
        64;  // padding for future fields

    /// Number of slots since the last update that pay rewards. The window's
    /// opening slot itself pays nothing; accrual covers each slot elapsed
    /// after it, through `last_block_with_reward` inclusive.
    pub fn blocks_with_reward(&self, current_slot: u64) -> u64 {
        let from = self.last_update_block.max(self.first_block_with_reward);
        let to = current_slot.min(self.last_block_with_reward);
        to.saturating_sub(from)
    }

    /// Current reward per staked token, including accrual since the last
    /// update. Read-only; `update_reward` freezes this into storage.
    pub fn reward_per_token(&self, current_slot: u64) -> Result<u128> {
        if self.total_staked == 0 {
            return Ok(self.reward_per_token_stored);
        }

        let blocks = self.blocks_with_reward(current_slot);

        let accrued = (self.reward_per_block as u128)
            .checked_mul(blocks as u128)
            .ok_or(StakingError::MathOverflow)?
            .checked_mul(REWARD_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(StakingError::DivisionByZero)?;

        self.reward_per_token_stored
            .checked_add(accrued)
            .ok_or(StakingError::MathOverflow.into())
    }

    /// Advance the accumulator to `current_slot`. Called at the top of every
    /// mutating instruction so each user settles against the correct
    /// historical rate. The update height is never advanced past the window
    /// end, so accrual stops there without further calls.
    pub fn update_reward(&mut self, current_slot: u64) -> Result<()> {
        self.reward_per_token_stored = self.reward_per_token(current_slot)?;
        self.last_update_block = current_slot.min(self.last_block_with_reward);
        Ok(())
    }

    /// Reward tokens still owed under the active schedule: the full window
    /// when it has not started, the remaining tail while in progress, zero
    /// once it has elapsed. These tokens are not recoverable by the owner.
    pub fn reserved_rewards(&self, current_slot: u64) -> Result<u64> {
        let from = current_slot.max(self.first_block_with_reward);
        if from > self.last_block_with_reward {
            return Ok(0);
        }

        let blocks_left = self.last_block_with_reward - from + 1;
        let reserved = (self.reward_per_block as u128)
            .checked_mul(blocks_left as u128)
            .ok_or(StakingError::MathOverflow)?;

        u64::try_from(reserved).map_err(|_| StakingError::MathOverflow.into())
    }

    /// Replace the reward schedule. The caller must have settled accrual
    /// under the old schedule first. The old window's remaining commitment is
    /// released and the new window's commitment taken on; rewards already
    /// accrued stay committed until paid. Fails when the resulting commitment
    /// exceeds `available`.
    pub fn set_reward_schedule(
        &mut self,
        reward_per_block: u64,
        from_slot: u64,
        duration_blocks: u64,
        available: u64,
        current_slot: u64,
    ) -> Result<()> {
        require!(duration_blocks > 0, StakingError::InvalidAmount);

        let last_block = from_slot
            .checked_add(duration_blocks - 1)
            .ok_or(StakingError::MathOverflow)?;

        // Commitment of the new window, checked before anything is written so
        // a rejected call leaves the prior schedule untouched.
        let from = current_slot.max(from_slot);
        let new_future = if from > last_block {
            0u64
        } else {
            let owed = (reward_per_block as u128)
                .checked_mul((last_block - from + 1) as u128)
                .ok_or(StakingError::MathOverflow)?;
            u64::try_from(owed).map_err(|_| StakingError::MathOverflow)?
        };

        let old_future = self.reserved_rewards(current_slot)?;
        let committed = self
            .reward_tokens_committed
            .checked_sub(old_future)
            .ok_or(StakingError::MathUnderflow)?
            .checked_add(new_future)
            .ok_or(StakingError::MathOverflow)?;
        require!(committed <= available, StakingError::InsufficientRewardReserve);

        self.reward_per_block = reward_per_block;
        self.first_block_with_reward = from_slot;
        self.last_block_with_reward = last_block;
        self.last_update_block = current_slot;
        self.reward_tokens_committed = committed;

        Ok(())
    }

    /// Release part of the committed balance when rewards are paid out.
    pub fn record_reward_paid(&mut self, amount: u64) -> Result<()> {
        self.reward_tokens_committed = self
            .reward_tokens_committed
            .checked_sub(amount)
            .ok_or(StakingError::MathUnderflow)?;
        Ok(())
    }

    /// Annualized yield projection as a percentage scaled by APY_PRECISION.
    /// Point-in-time estimate: assumes the current rate and principal hold
    /// for a full year. Zero when nothing is staked or the window is over.
    pub fn apy(&self, current_slot: u64) -> Result<u128> {
        if self.total_staked == 0 || current_slot > self.last_block_with_reward {
            return Ok(0);
        }

        (self.reward_per_block as u128)
            .checked_mul(BLOCKS_PER_YEAR as u128)
            .ok_or(StakingError::MathOverflow)?
            .checked_mul(APY_PRECISION)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(self.total_staked as u128)
            .ok_or(StakingError::DivisionByZero.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with_schedule(rate: u64, first: u64, last: u64, staked: u64) -> StakingPool {
        StakingPool {
            reward_per_block: rate,
            first_block_with_reward: first,
            last_block_with_reward: last,
            last_update_block: first.saturating_sub(1),
            reward_tokens_committed: rate * (last - first + 1),
            total_staked: staked,
            ..Default::default()
        }
    }

    #[test]
    fn no_accrual_before_window_start() {
        let mut pool = pool_with_schedule(100, 50, 149, 10);
        pool.last_update_block = 10;

        assert_eq!(pool.blocks_with_reward(40), 0);
        assert_eq!(pool.reward_per_token(40).unwrap(), 0);
    }

    #[test]
    fn accrual_clips_at_window_end() {
        let pool = pool_with_schedule(100, 10, 109, 10);

        // window fully elapsed, queried well past the end: 99 rewarded slots
        // after the opening one
        assert_eq!(pool.blocks_with_reward(500), 99);
        assert_eq!(
            pool.reward_per_token(500).unwrap(),
            100u128 * 99 * REWARD_PRECISION / 10
        );
    }

    #[test]
    fn accrual_mid_window() {
        let pool = pool_with_schedule(100, 10, 109, 50);

        assert_eq!(pool.blocks_with_reward(14), 4);
        assert_eq!(
            pool.reward_per_token(14).unwrap(),
            100u128 * 4 * REWARD_PRECISION / 50
        );
    }

    #[test]
    fn window_opening_slot_pays_nothing() {
        // schedule installed before the window opens, principal staked just
        // after: accrual starts at the slot following the window start
        let mut pool = pool_with_schedule(100, 105, 204, 0);
        pool.last_update_block = 101;

        pool.update_reward(102).unwrap();
        pool.total_staked = 50;

        assert_eq!(pool.blocks_with_reward(105), 0);
        assert_eq!(pool.blocks_with_reward(107), 2);
        assert_eq!(
            pool.reward_per_token(107).unwrap(),
            100u128 * 2 * REWARD_PRECISION / 50
        );
    }

    #[test]
    fn zero_principal_freezes_accumulator() {
        let mut pool = pool_with_schedule(100, 10, 109, 0);
        pool.reward_per_token_stored = 42;

        assert_eq!(pool.reward_per_token(50).unwrap(), 42);
    }

    #[test]
    fn accumulator_is_monotonic_across_updates() {
        let mut pool = pool_with_schedule(100, 10, 109, 10);

        let mut prev = 0u128;
        for slot in [10, 30, 60, 109, 200, 300] {
            pool.update_reward(slot).unwrap();
            assert!(pool.reward_per_token_stored >= prev);
            prev = pool.reward_per_token_stored;
        }

        // never advanced past the window end
        assert_eq!(pool.last_update_block, 109);
    }

    #[test]
    fn update_is_idempotent_at_same_slot() {
        let mut pool = pool_with_schedule(100, 10, 109, 10);

        pool.update_reward(50).unwrap();
        let stored = pool.reward_per_token_stored;
        pool.update_reward(50).unwrap();
        assert_eq!(pool.reward_per_token_stored, stored);
    }

    #[test]
    fn reserved_covers_full_window_before_start() {
        let pool = pool_with_schedule(100, 50, 149, 0);
        assert_eq!(pool.reserved_rewards(10).unwrap(), 100 * 100);
    }

    #[test]
    fn reserved_shrinks_mid_window_and_zeroes_after() {
        let pool = pool_with_schedule(100, 10, 109, 0);

        // slots 12..=109 still owed
        assert_eq!(pool.reserved_rewards(12).unwrap(), 100 * 98);
        assert_eq!(pool.reserved_rewards(109).unwrap(), 100);
        assert_eq!(pool.reserved_rewards(110).unwrap(), 0);
    }

    #[test]
    fn schedule_rejected_when_overcommitted() {
        let mut pool = pool_with_schedule(7, 1, 5, 0);

        let err = pool
            .set_reward_schedule(101, 10, 100, 10_000, 5)
            .unwrap_err();
        assert_eq!(err, StakingError::InsufficientRewardReserve.into());

        // prior schedule untouched
        assert_eq!(pool.reward_per_block, 7);
        assert_eq!(pool.first_block_with_reward, 1);
        assert_eq!(pool.last_block_with_reward, 5);
        assert_eq!(pool.reward_tokens_committed, 35);
    }

    #[test]
    fn schedule_accepted_at_exact_balance() {
        let mut pool = pool_with_schedule(0, 0, 0, 0);

        pool.set_reward_schedule(100, 10, 100, 10_000, 5).unwrap();
        assert_eq!(pool.reward_per_block, 100);
        assert_eq!(pool.first_block_with_reward, 10);
        assert_eq!(pool.last_block_with_reward, 109);
        assert_eq!(pool.last_update_block, 5);
        assert_eq!(pool.reward_tokens_committed, 10_000);
    }

    #[test]
    fn schedule_rejects_zero_duration() {
        let mut pool = pool_with_schedule(0, 0, 0, 0);

        let err = pool.set_reward_schedule(100, 10, 0, 10_000, 5).unwrap_err();
        assert_eq!(err, StakingError::InvalidAmount.into());
    }

    #[test]
    fn mid_window_replacement_reserves_only_the_tail() {
        let mut pool = pool_with_schedule(100, 10, 109, 50);

        pool.update_reward(60).unwrap();
        // new rate 50 over the remaining 49 slots of the same window: the
        // old tail's 4_900 is released, the 5_100 already owed stays
        // committed alongside the new tail
        pool.set_reward_schedule(50, 10, 100, 10_000, 61).unwrap();
        assert_eq!(pool.reserved_rewards(61).unwrap(), 50 * 49);
        assert_eq!(pool.reward_tokens_committed, 5_100 + 50 * 49);
    }

    #[test]
    fn committed_rewards_stay_fenced_after_window_elapses() {
        let mut pool = pool_with_schedule(100, 10, 109, 50);
        pool.update_reward(200).unwrap();

        // nothing left to schedule, but the full commitment stands until the
        // accrued rewards are actually paid out
        assert_eq!(pool.reserved_rewards(200).unwrap(), 0);
        assert_eq!(pool.reward_tokens_committed, 10_000);

        pool.record_reward_paid(9_900).unwrap();
        assert_eq!(pool.reward_tokens_committed, 100);
    }

    #[test]
    fn apy_zero_without_stake_or_after_window() {
        let pool = pool_with_schedule(100, 10, 109, 0);
        assert_eq!(pool.apy(50).unwrap(), 0);

        let pool = pool_with_schedule(100, 10, 109, 10);
        assert_eq!(pool.apy(110).unwrap(), 0);
    }

    #[test]
    fn apy_scales_inversely_with_principal() {
        let mut pool = pool_with_schedule(100, 10, 109, 1_000_000);

        let apy = pool.apy(50).unwrap();
        assert_eq!(
            apy,
            100u128 * BLOCKS_PER_YEAR as u128 * APY_PRECISION / 1_000_000
        );

        pool.total_staked = 2_000_000;
        assert_eq!(pool.apy(50).unwrap(), apy / 2);
    }
}
