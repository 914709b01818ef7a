//! Fixed game rules: board dimensions, combat odds and strength templates.

/// Protocol/version string reported by the engine.
pub const VERSION: &str = "1.4.0";

/// Grid width in cells.
pub const GRID_COLS: i32 = 6;

/// Grid height in cells.
pub const GRID_ROWS: i32 = 7;

/// Nodes placed on a standard board.
pub const TOTAL_NODES: usize = 30;

/// Nodes each faction starts with.
pub const NODES_PER_FACTION: usize = 6;

/// Total starting strength of each faction.
pub const STRENGTH_PER_FACTION: u32 = 20;

/// A faction owning this many nodes wins.
pub const VICTORY_THRESHOLD: usize = 24;

/// Probability that the attacker wins a single combat round.
pub const ATTACKER_WIN_CHANCE: f64 = 0.52;

/// Sources weaker than this cannot attack.
pub const MIN_ATTACK_STRENGTH: u32 = 2;

/// Units that stay on the source node and never join combat.
pub const UNITS_LEFT_BEHIND: u32 = 1;

/// Secret prefix mixed into every game-number seed.
pub const SECRET_BASE_SEED: &str = "ONW_PWA_SEED_v1";

/// Starting strength templates, one drawn per faction at generation time.
pub const STRENGTH_DISTRIBUTIONS: [[u32; NODES_PER_FACTION]; 3] = [
    [8, 8, 1, 1, 1, 1], // two strongholds
    [4, 8, 4, 2, 1, 1], // one major, two medium
    [8, 6, 1, 1, 1, 3], // heavy + medium spread
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::faction::FACTION_COUNT;

    #[test]
    fn distributions_sum_to_faction_strength() {
        for dist in &STRENGTH_DISTRIBUTIONS {
            assert_eq!(dist.iter().sum::<u32>(), STRENGTH_PER_FACTION);
        }
    }

    #[test]
    fn node_budget_fits_grid() {
        assert_eq!(NODES_PER_FACTION * FACTION_COUNT, TOTAL_NODES);
        assert!(TOTAL_NODES <= (GRID_COLS * GRID_ROWS) as usize);
        assert!(VICTORY_THRESHOLD <= TOTAL_NODES);
    }
}
