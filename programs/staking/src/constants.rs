// =============================================================================
// Staking Constants
// =============================================================================

// PDA Seeds
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";
pub const STAKER_SEED: &[u8] = b"staker";

// Precision for reward-per-token calculations (18 decimals)
// Using u128 to handle large numbers without overflow
pub const REWARD_PRECISION: u128 = 1_000_000_000_000_000_000; // 10^18

// APY is reported as a percentage scaled by 10^5 (100% == 10_000_000)
pub const APY_PRECISION: u128 = 100_000;

// Slots per year at the 400ms slot target, used for the APY projection
pub const BLOCKS_PER_YEAR: u64 = 78_840_000;

// Ceiling on the withdrawal cooldown the owner may configure (30 days)
pub const MAX_COOLDOWN_SECONDS: i64 = 2_592_000;
