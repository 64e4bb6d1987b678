use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // Pool State Errors
    #[msg("Staking pool is paused")]
    PoolPaused,

    // Amount Errors
    #[msg("Invalid amount: must be greater than zero")]
    InvalidAmount,

    #[msg("Insufficient staked balance")]
    InsufficientStake,

    #[msg("Withdrawal cooldown not reached")]
    CooldownNotReached,

    #[msg("Not enough unreserved tokens for the rewards")]
    InsufficientRewardReserve,

    // Configuration Errors
    #[msg("Cooldown period too high")]
    CooldownTooLong,

    // Authorization Errors
    #[msg("Unauthorized: owner only")]
    Unauthorized,

    #[msg("Invalid authority")]
    InvalidAuthority,

    // Math Errors
    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,

    #[msg("Division by zero")]
    DivisionByZero,

    // Account Validation Errors
    #[msg("Invalid stake mint")]
    InvalidStakeMint,

    #[msg("Invalid reward mint")]
    InvalidRewardMint,
}
