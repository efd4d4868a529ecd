//! Rate tables behind the probability model.
//!
//! The table carries the data the rate computation cannot derive: per-game
//! base shiny rates and the chain tiers of streak-based methods. A built-in
//! table ships with the crate; the whole structure deserializes from TOML so
//! the application config can override it.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Recognized hunting methods.
///
/// Method ids arrive as free-form strings from configuration; anything that
/// does not parse falls back to the game's base rate in the rate computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HuntMethod {
    /// Plain random encounters, no method bonus
    FullOdds,
    /// Breeding with parents from different language games
    Masuda,
    /// Sparkling-power sandwich encounters
    Sandwich,
    /// Research-level based encounters
    Research,
    /// SOS ally chaining
    SosChain,
    /// Catch combo chaining
    CatchCombo,
    /// Horde encounters (five targets per battle)
    Horde,
}

impl HuntMethod {
    /// Parses a method id string. Returns `None` for unknown ids.
    pub fn parse(id: &str) -> Option<Self> {
        match id {
            "Full Odds" => Some(Self::FullOdds),
            "Masuda" => Some(Self::Masuda),
            "Sandwich" => Some(Self::Sandwich),
            "Research" => Some(Self::Research),
            "SOS Battle" => Some(Self::SosChain),
            "Catch Combo" => Some(Self::CatchCombo),
            "Horde" => Some(Self::Horde),
            _ => None,
        }
    }
}

/// One tier of a chained-encounter table: the rate that applies from a
/// minimum streak length upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainTier {
    /// Minimum attempt count for this tier to apply
    pub min: u32,
    /// Rate denominator at this tier
    pub rate: u32,
}

/// Rates for one chained method: a base rate plus streak tiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodRates {
    /// Rate denominator when no tier applies
    pub base_rate: u32,
    /// Streak tiers, ascending by `min`
    #[serde(default)]
    pub chains: Vec<ChainTier>,
}

impl MethodRates {
    /// Rate for a given attempt count: the tier with the highest `min` not
    /// exceeding the count, or the base rate when no tier matches.
    pub fn rate_for(&self, attempt_count: u32) -> u32 {
        self.chains
            .iter()
            .rev()
            .find(|tier| attempt_count >= tier.min)
            .map(|tier| tier.rate)
            .unwrap_or(self.base_rate)
    }
}

/// Per-game rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRates {
    /// Full-odds shiny rate denominator for the game
    pub base_shiny_rate: u32,
}

/// The complete rate table consulted by the probability model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityTable {
    /// Chained-method rates, keyed by method id
    pub methods: HashMap<String, MethodRates>,
    /// Game base rates, keyed by game id
    pub games: HashMap<String, GameRates>,
}

impl ProbabilityTable {
    /// Rates for a chained method, if the table knows it.
    pub fn method(&self, method_id: &str) -> Option<&MethodRates> {
        self.methods.get(method_id)
    }

    /// Base shiny rate for a game, if the table knows it.
    pub fn game_base_rate(&self, game_id: &str) -> Option<u32> {
        self.games.get(game_id).map(|g| g.base_shiny_rate)
    }
}

impl Default for ProbabilityTable {
    fn default() -> Self {
        let mut methods = HashMap::new();
        methods.insert(
            "SOS Battle".to_string(),
            MethodRates {
                base_rate: 4096,
                chains: vec![
                    ChainTier { min: 11, rate: 1365 },
                    ChainTier { min: 21, rate: 683 },
                    ChainTier { min: 31, rate: 315 },
                ],
            },
        );
        methods.insert(
            "Catch Combo".to_string(),
            MethodRates {
                base_rate: 4096,
                chains: vec![
                    ChainTier { min: 11, rate: 2048 },
                    ChainTier { min: 21, rate: 1024 },
                    ChainTier { min: 31, rate: 341 },
                ],
            },
        );

        let mut games = HashMap::new();
        for game in [
            "Scarlet/Violet",
            "Sword/Shield",
            "Brilliant Diamond/Shining Pearl",
            "Legends: Arceus",
            "Let's Go Pikachu/Eevee",
            "Ultra Sun/Ultra Moon",
            "Sun/Moon",
            "Omega Ruby/Alpha Sapphire",
            "X/Y",
        ] {
            games.insert(game.to_string(), GameRates {
                base_shiny_rate: 4096,
            });
        }
        // Generation 1-5 titles predate the rate change
        for game in [
            "Black 2/White 2",
            "Black/White",
            "HeartGold/SoulSilver",
            "Diamond/Pearl/Platinum",
        ] {
            games.insert(game.to_string(), GameRates {
                base_shiny_rate: 8192,
            });
        }

        Self { methods, games }
    }
}
