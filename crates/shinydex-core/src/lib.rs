pub mod collection;
pub mod error;
pub mod probability;
pub mod session;
pub mod team;

// Re-export common error type
pub use error::ShinydexError;
