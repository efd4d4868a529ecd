//! Odds derivation for a hunting session.
//!
//! Pure functions from session configuration to display statistics. All three
//! are total: malformed or unknown configuration degrades to documented
//! defaults instead of failing, so the odds display stays responsive with
//! incomplete data.

use crate::session::{HuntSession, ResearchLevel, SandwichLevel};

use super::table::{HuntMethod, ProbabilityTable};

/// Roll pool every rate is carved out of (the modern full-odds denominator).
pub const BASE_ROLL_POOL: u32 = 4096;

/// Extra rolls granted by the Shiny Charm.
const CHARM_BONUS_ROLLS: u32 = 2;

/// Masuda-method rolls without / with the charm.
const MASUDA_ROLLS: u32 = 6;
const MASUDA_CHARM_ROLLS: u32 = 8;

/// Extra rolls at maximum sandwich power.
const SANDWICH_MAX_ROLLS: u32 = 3;

/// Extra rolls per research tier, and during a massive outbreak.
const RESEARCH_COMPLETED_ROLLS: u32 = 1;
const RESEARCH_PERFECT_ROLLS: u32 = 3;
const OUTBREAK_ROLLS: u32 = 25;

/// Horde battles roll five targets at once.
const HORDE_MULTIPLIER: u32 = 5;

/// Returns the denominator of the "1 in N" encounter rate for a session.
///
/// Unknown method or game ids fall back to the game's base rate (4096 when
/// the game is unknown as well); chained methods consult the table's streak
/// tiers. Deterministic and never fails.
pub fn current_rate(table: &ProbabilityTable, session: &HuntSession) -> u32 {
    let game_base = table.game_base_rate(&session.game_id);
    let method = HuntMethod::parse(&session.method_id);

    let (Some(method), Some(game_base)) = (method, game_base) else {
        return game_base.unwrap_or(BASE_ROLL_POOL);
    };

    let mut rolls = 1;
    if session.has_charm {
        rolls += CHARM_BONUS_ROLLS;
    }

    match method {
        HuntMethod::Masuda => {
            let rolls = if session.has_charm {
                MASUDA_CHARM_ROLLS
            } else {
                MASUDA_ROLLS
            };
            BASE_ROLL_POOL / rolls
        }
        HuntMethod::Sandwich => {
            if session.modifiers.sandwich_level == SandwichLevel::MaxPower {
                rolls += SANDWICH_MAX_ROLLS;
            }
            BASE_ROLL_POOL / rolls
        }
        HuntMethod::Research => {
            match session.modifiers.research_level {
                ResearchLevel::Completed => rolls += RESEARCH_COMPLETED_ROLLS,
                ResearchLevel::Perfect => rolls += RESEARCH_PERFECT_ROLLS,
                ResearchLevel::Base => {}
            }
            if session.modifiers.massive_outbreak {
                rolls += OUTBREAK_ROLLS;
            }
            BASE_ROLL_POOL / rolls
        }
        HuntMethod::SosChain | HuntMethod::CatchCombo => match table.method(&session.method_id) {
            Some(rates) => rates.rate_for(session.attempt_count),
            None => game_base,
        },
        HuntMethod::Horde => BASE_ROLL_POOL / (rolls * HORDE_MULTIPLIER),
        HuntMethod::FullOdds => BASE_ROLL_POOL / rolls,
    }
}

/// Probability (percent, 2 decimals) of at least one success in `attempts`
/// tries at a 1-in-`rate` chance. Zero attempts yields 0.
pub fn cumulative_probability(rate: u32, attempts: u32) -> f64 {
    if attempts == 0 || rate == 0 {
        return 0.0;
    }
    let p = 1.0 / rate as f64;
    let cumulative = 1.0 - (1.0 - p).powf(attempts as f64);
    round2(cumulative * 100.0)
}

/// Ratio of attempts made to the expected rate, 2 decimals.
///
/// Zero attempts yields the neutral 1.00. Values below 0.5 read as favorable
/// luck, 1.5 and above as unfavorable; the thresholds are a presentation
/// concern and not enforced here.
pub fn luck_factor(rate: u32, attempts: u32) -> f64 {
    if attempts == 0 || rate == 0 {
        return 1.0;
    }
    round2(attempts as f64 / rate as f64)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{HuntConfig, HuntModifiers};

    fn session(game_id: &str, method_id: &str, has_charm: bool) -> HuntSession {
        HuntSession::new(HuntConfig {
            pokemon_id: "eevee".to_string(),
            pokemon_name: "Eevee".to_string(),
            game_id: game_id.to_string(),
            method_id: method_id.to_string(),
            has_charm,
            modifiers: HuntModifiers::default(),
            is_group_hunt: false,
            team_id: None,
        })
    }

    #[test]
    fn masuda_rates_match_known_denominators() {
        let table = ProbabilityTable::default();
        let without = session("Scarlet/Violet", "Masuda", false);
        let with = session("Scarlet/Violet", "Masuda", true);

        assert_eq!(current_rate(&table, &without), 682);
        assert_eq!(current_rate(&table, &with), 512);
    }

    #[test]
    fn sandwich_max_power_adds_three_rolls() {
        let table = ProbabilityTable::default();
        let mut hunt = session("Scarlet/Violet", "Sandwich", false);
        assert_eq!(current_rate(&table, &hunt), 4096);

        hunt.modifiers.sandwich_level = SandwichLevel::MaxPower;
        assert_eq!(current_rate(&table, &hunt), 1024);

        hunt.has_charm = true;
        assert_eq!(current_rate(&table, &hunt), 682);
    }

    #[test]
    fn research_tiers_and_outbreak_stack() {
        let table = ProbabilityTable::default();
        let mut hunt = session("Legends: Arceus", "Research", false);
        assert_eq!(current_rate(&table, &hunt), 4096);

        hunt.modifiers.research_level = ResearchLevel::Completed;
        assert_eq!(current_rate(&table, &hunt), 2048);

        hunt.modifiers.research_level = ResearchLevel::Perfect;
        assert_eq!(current_rate(&table, &hunt), 1024);

        hunt.modifiers.massive_outbreak = true;
        assert_eq!(current_rate(&table, &hunt), 141);
    }

    #[test]
    fn chained_method_follows_streak_tiers() {
        let table = ProbabilityTable::default();
        let mut hunt = session("Ultra Sun/Ultra Moon", "SOS Battle", false);

        assert_eq!(current_rate(&table, &hunt), 4096);
        hunt.attempt_count = 15;
        assert_eq!(current_rate(&table, &hunt), 1365);
        hunt.attempt_count = 31;
        assert_eq!(current_rate(&table, &hunt), 315);
    }

    #[test]
    fn horde_divides_by_group_size() {
        let table = ProbabilityTable::default();
        let without = session("X/Y", "Horde", false);
        let with = session("X/Y", "Horde", true);

        assert_eq!(current_rate(&table, &without), 819);
        assert_eq!(current_rate(&table, &with), 273);
    }

    #[test]
    fn unknown_method_falls_back_to_game_base() {
        let table = ProbabilityTable::default();
        let modern = session("Scarlet/Violet", "Soft Reset", false);
        let legacy = session("HeartGold/SoulSilver", "Soft Reset", false);

        assert_eq!(current_rate(&table, &modern), 4096);
        assert_eq!(current_rate(&table, &legacy), 8192);
    }

    #[test]
    fn unknown_game_falls_back_to_default_pool() {
        let table = ProbabilityTable::default();
        let hunt = session("Ranger Shadows of Almia", "Masuda", false);
        assert_eq!(current_rate(&table, &hunt), 4096);
    }

    #[test]
    fn charm_never_worsens_the_rate() {
        let table = ProbabilityTable::default();
        for method in ["Full Odds", "Masuda", "Sandwich", "Research", "Horde"] {
            let without = session("Scarlet/Violet", method, false);
            let with = session("Scarlet/Violet", method, true);
            assert!(
                current_rate(&table, &with) <= current_rate(&table, &without),
                "charm worsened {method}"
            );
        }
    }

    #[test]
    fn cumulative_probability_starts_at_zero_and_never_decreases() {
        assert_eq!(cumulative_probability(4096, 0), 0.0);

        let mut previous = 0.0;
        for attempts in (0..=5000).step_by(50) {
            let current = cumulative_probability(512, attempts);
            assert!(current >= previous, "decreased at {attempts}");
            previous = current;
        }
    }

    #[test]
    fn cumulative_probability_known_value() {
        // 1 - (1 - 1/512)^512 ~ 63.25%
        assert_eq!(cumulative_probability(512, 512), 63.25);
    }

    #[test]
    fn luck_factor_is_neutral_at_zero_attempts() {
        assert_eq!(luck_factor(4096, 0), 1.0);
        assert_eq!(luck_factor(1, 0), 1.0);
    }

    #[test]
    fn luck_factor_known_value() {
        assert_eq!(luck_factor(512, 500), 0.98);
        assert_eq!(luck_factor(512, 1024), 2.0);
    }
}
