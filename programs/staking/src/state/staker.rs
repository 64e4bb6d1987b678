use anchor_lang::prelude::*;

use crate::constants::REWARD_PRECISION;
use crate::error::StakingError;

/// Per-user staking position
/// PDA: ["staker", staking_pool, owner]
///
/// Created on first stake and never closed; a position with zero balances is
/// a valid steady state for later re-staking.
#[account]
#[derive(Default)]
pub struct StakerPosition {
    /// The staking pool this position belongs to
    pub pool: Pubkey,

    /// Owner of this position
    pub owner: Pubkey,

    /// Principal currently staked
    pub staked: u64,

    /// Snapshot of the pool accumulator at the last settlement
    pub reward_per_token_paid: u128,

    /// Settled but unclaimed reward
    pub rewards: u64,

    /// Portion of `staked` under withdrawal lock at `lock_updated_at`,
    /// decaying linearly to zero over the pool cooldown
    pub locked: u64,

    /// Wall-clock timestamp of the last event that recomputed the lock
    pub lock_updated_at: i64,

    /// PDA bump seed
    pub bump: u8,
}

impl StakerPosition {
    /// Account size for allocation
    pub const SIZE: usize = 8 + // discriminator
        32 + // pool
        32 + // owner
        8 +  // staked
        16 + // reward_per_token_paid (u128)
        8 +  // rewards
        8 +  // locked
        8 +  // lock_updated_at
        1 +  // bump
        32;  // padding for future fields

    /// Reward accrued since the last settlement, not yet added to `rewards`.
    fn pending(&self, reward_per_token: u128) -> Result<u64> {
        if self.staked == 0 {
            return Ok(0);
        }

        let delta = reward_per_token
            .checked_sub(self.reward_per_token_paid)
            .ok_or(StakingError::MathUnderflow)?;

        let pending = (self.staked as u128)
            .checked_mul(delta)
            .ok_or(StakingError::MathOverflow)?
            .checked_div(REWARD_PRECISION)
            .ok_or(StakingError::DivisionByZero)?;

        u64::try_from(pending).map_err(|_| StakingError::MathOverflow.into())
    }

    /// Total reward this position could claim at the given accumulator value.
    /// Read-only counterpart of `settle_rewards`.
    pub fn earned(&self, reward_per_token: u128) -> Result<u64> {
        self.rewards
            .checked_add(self.pending(reward_per_token)?)
            .ok_or(StakingError::MathOverflow.into())
    }

    /// Fold accrual since the last settlement into `rewards` and move the
    /// snapshot forward. Called before any principal change so the earned
    /// amount is computed against the correct historical rate.
    pub fn settle_rewards(&mut self, reward_per_token: u128) -> Result<()> {
        self.rewards = self.earned(reward_per_token)?;
        self.reward_per_token_paid = reward_per_token;
        Ok(())
    }

    /// Locked principal at `now`: the recorded lock decays linearly to zero
    /// over `cooldown` seconds from `lock_updated_at`.
    pub fn current_locked(&self, cooldown: i64, now: i64) -> u64 {
        if cooldown == 0 {
            return 0;
        }

        let elapsed = now.saturating_sub(self.lock_updated_at);
        if elapsed >= cooldown {
            return 0;
        }

        let remaining = (self.locked as u128)
            .saturating_mul((cooldown - elapsed) as u128)
            / cooldown as u128;
        remaining as u64
    }

    /// Record a deposit: the new amount is fully locked on top of whatever
    /// lock remains from prior deposits, and the combined lock decays
    /// together from `now`.
    pub fn record_stake(&mut self, amount: u64, cooldown: i64, now: i64) -> Result<()> {
        self.locked = self
            .current_locked(cooldown, now)
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;
        self.lock_updated_at = now;

        self.staked = self
            .staked
            .checked_add(amount)
            .ok_or(StakingError::MathOverflow)?;

        Ok(())
    }

    /// Record a withdrawal. Fails with CooldownNotReached when the amount
    /// exceeds the unlocked portion. On success the decayed lock is scaled
    /// down by the fraction of principal remaining, so a shrinking balance
    /// never appears over-locked.
    pub fn record_withdraw(&mut self, amount: u64, cooldown: i64, now: i64) -> Result<()> {
        let locked_now = self.current_locked(cooldown, now);
        let unlocked = self
            .staked
            .checked_sub(locked_now)
            .ok_or(StakingError::MathUnderflow)?;
        require!(amount <= unlocked, StakingError::CooldownNotReached);

        let remaining_stake = self.staked - amount;
        self.locked = if self.staked == 0 {
            0
        } else {
            ((locked_now as u128)
                .checked_mul(remaining_stake as u128)
                .ok_or(StakingError::MathOverflow)?
                / self.staked as u128) as u64
        };
        self.lock_updated_at = now;
        self.staked = remaining_stake;

        Ok(())
    }
}
