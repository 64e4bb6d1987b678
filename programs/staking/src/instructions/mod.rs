// =============================================================================
// Instructions Module
// =============================================================================

pub mod admin;
pub mod claim;
pub mod exit;
pub mod initialize;
pub mod recover;
pub mod set_cooldown;
pub mod set_rewards;
pub mod stake;
pub mod withdraw;

pub use admin::*;
pub use claim::*;
pub use exit::*;
pub use initialize::*;
pub use recover::*;
pub use set_cooldown::*;
pub use set_rewards::*;
pub use stake::*;
pub use withdraw::*;
