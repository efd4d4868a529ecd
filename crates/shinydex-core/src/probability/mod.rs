//! Probability model.
//!
//! Pure, side-effect-free derivation of encounter odds from session
//! configuration.
//!
//! # Module Structure
//!
//! - `table`: rate data (`ProbabilityTable`, chain tiers, game base rates)
//! - `rates`: the odds functions (`current_rate`, `cumulative_probability`,
//!   `luck_factor`)

mod rates;
mod table;

// Re-export public API
pub use rates::{BASE_ROLL_POOL, cumulative_probability, current_rate, luck_factor};
pub use table::{ChainTier, GameRates, HuntMethod, MethodRates, ProbabilityTable};
