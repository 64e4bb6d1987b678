use anchor_lang::prelude::*;

/// Emitted when a user stakes principal into the pool
#[event]
pub struct Staked {
    pub user: Pubkey,
    pub amount: u64,
}

/// Emitted when a user withdraws principal from the pool
#[event]
pub struct Withdrawn {
    pub user: Pubkey,
    pub amount: u64,
}

/// Emitted when accrued rewards are paid out
#[event]
pub struct RewardPaid {
    pub user: Pubkey,
    pub reward: u64,
}

/// Emitted when the owner replaces the reward schedule
#[event]
pub struct RewardsSet {
    pub reward_per_block: u64,
    pub first_block_with_reward: u64,
    pub last_block_with_reward: u64,
}

/// Emitted when the owner sweeps reward tokens not committed to the schedule
#[event]
pub struct RewardTokensRecovered {
    pub amount: u64,
}
