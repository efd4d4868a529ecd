//! Application layer.
//!
//! `HuntingUseCase` is the composition root the UI talks to: it owns the
//! session store and coordinates persistence, team broadcast and collection
//! reconciliation around it.

mod hunting_usecase;

// Re-export public API
pub use hunting_usecase::{DexMode, HuntOdds, HuntingUseCase};
