//! Deterministic board generation.
//!
//! A board is fully determined by the [`Prng`] it is generated from:
//!
//! 1. All grid cells are listed row by row, shuffled, and the first
//!    `TOTAL_NODES` cells become nodes `0..N` in that order.
//! 2. Nodes on 8-neighbouring cells are connected; isolated nodes are tied to
//!    their Manhattan-nearest node.
//! 3. Node ids are shuffled and cut into equal blocks, one per faction in
//!    turn order.
//! 4. Each faction draws a strength template, shuffles it, and hands the
//!    values out in block order.
//!
//! The draw order above is part of the contract: changing it changes every
//! board for every game number.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::board::adjacency::{repair_isolated, wire_grid};
use crate::board::faction::{FACTION_COUNT, TURN_ORDER};
use crate::board::node::{Node, NodeId};
use crate::board::rules::{GRID_COLS, GRID_ROWS, NODES_PER_FACTION, STRENGTH_DISTRIBUTIONS};
use crate::board::state::Board;
use crate::error::BoardError;
use crate::prng::Prng;

/// Board layout used by the generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub grid_cols: i32,
    pub grid_rows: i32,
    /// Nodes handed to each faction; the board holds this times `FACTION_COUNT`.
    pub nodes_per_faction: usize,
    /// Strength templates; each must list exactly `nodes_per_faction` values.
    pub distributions: Vec<Vec<u32>>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            grid_cols: GRID_COLS,
            grid_rows: GRID_ROWS,
            nodes_per_faction: NODES_PER_FACTION,
            distributions: STRENGTH_DISTRIBUTIONS.iter().map(|d| d.to_vec()).collect(),
        }
    }
}

impl GenerationConfig {
    /// Total nodes placed on the board.
    pub fn total_nodes(&self) -> usize {
        self.nodes_per_faction * FACTION_COUNT
    }

    /// Number of grid cells available.
    pub fn cells(&self) -> usize {
        (self.grid_cols.max(0) as usize) * (self.grid_rows.max(0) as usize)
    }

    /// Checks that the layout can be partitioned and fits on the grid.
    pub fn validate(&self) -> Result<(), BoardError> {
        if self.nodes_per_faction == 0 {
            return Err(BoardError::InvalidFactionPartition(
                "each faction needs at least one node".to_string(),
            ));
        }
        if self.distributions.is_empty() {
            return Err(BoardError::InvalidFactionPartition(
                "no strength templates".to_string(),
            ));
        }
        if let Some(bad) = self
            .distributions
            .iter()
            .find(|d| d.len() != self.nodes_per_faction)
        {
            return Err(BoardError::InvalidFactionPartition(format!(
                "template of {} values for {} nodes per faction",
                bad.len(),
                self.nodes_per_faction
            )));
        }
        if self.total_nodes() > self.cells() {
            return Err(BoardError::GridTooSmall {
                cells: self.cells(),
                nodes: self.total_nodes(),
            });
        }
        Ok(())
    }
}

/// Generates a standard board from `rng`.
pub fn generate(rng: &mut Prng) -> Board {
    build(rng, &GenerationConfig::default())
}

/// Generates the standard board for a game number.
pub fn generate_for_game(game_number: u32) -> Board {
    let mut rng = Prng::for_game(game_number);
    let mut board = generate(&mut rng);
    board.game_number = game_number;
    board
}

/// Generates a board with a custom layout.
pub fn generate_with(rng: &mut Prng, config: &GenerationConfig) -> Result<Board, BoardError> {
    config.validate()?;
    Ok(build(rng, config))
}

/// Runs the generation steps; `config` must already be valid.
fn build(rng: &mut Prng, config: &GenerationConfig) -> Board {
    let mut cells = Vec::with_capacity(config.cells());
    for y in 0..config.grid_rows {
        for x in 0..config.grid_cols {
            cells.push((x, y));
        }
    }
    let shuffled = rng.shuffle(&cells);

    let mut nodes: Vec<Node> = shuffled
        .iter()
        .take(config.total_nodes())
        .enumerate()
        .map(|(id, &(x, y))| Node::new(id, x, y))
        .collect();

    let edges = wire_grid(&mut nodes);
    let repaired = repair_isolated(&mut nodes);
    debug!(nodes = nodes.len(), edges, repaired, "wired board");

    let ids: Vec<NodeId> = (0..nodes.len()).collect();
    let ids = rng.shuffle(&ids);
    let blocks: Vec<&[NodeId]> = ids.chunks(config.nodes_per_faction).collect();

    for (block, faction) in blocks.iter().zip(TURN_ORDER) {
        for &id in block.iter() {
            nodes[id].faction = faction;
        }
    }

    let last_template = config.distributions.len() as i32 - 1;
    for (block, faction) in blocks.iter().zip(TURN_ORDER) {
        let pick = rng.next_int(0, last_template) as usize;
        let strengths = rng.shuffle(&config.distributions[pick]);
        for (&id, &strength) in block.iter().zip(&strengths) {
            nodes[id].strength = strength;
        }
        debug!(%faction, template = pick, "assigned strength template");
    }

    Board::assemble(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::adjacency::is_symmetric;
    use crate::board::faction::Faction;
    use crate::board::rules::{STRENGTH_PER_FACTION, TOTAL_NODES};

    fn summary(board: &Board, count: usize) -> Vec<(usize, i32, i32, u8, u32, Vec<usize>)> {
        board
            .nodes()
            .iter()
            .take(count)
            .map(|n| {
                (
                    n.id,
                    n.grid_x,
                    n.grid_y,
                    u8::from(n.faction),
                    n.strength,
                    n.connections.clone(),
                )
            })
            .collect()
    }

    #[test]
    fn game_one_matches_reference_board() {
        let board = generate_for_game(1);
        assert_eq!(board.game_number, 1);
        assert_eq!(
            summary(&board, 6),
            vec![
                (0, 0, 4, 4, 1, vec![18, 15, 16, 17]),
                (1, 5, 0, 3, 1, vec![25, 20]),
                (2, 2, 3, 1, 4, vec![27, 17, 8, 3, 29, 12]),
                (3, 2, 2, 4, 1, vec![2, 12, 29, 7, 27, 6, 17]),
                (4, 1, 0, 3, 8, vec![24, 9, 6, 7, 26]),
                (5, 0, 6, 2, 3, vec![10, 18, 16]),
            ]
        );
        let degrees: Vec<usize> = board.nodes().iter().map(|n| n.connections.len()).collect();
        assert_eq!(
            degrees,
            vec![
                4, 2, 6, 7, 5, 3, 8, 6, 4, 3, 4, 3, 6, 5, 5, 4, 6, 7, 4, 4, 3, 4, 1, 3, 3, 2, 5,
                7, 2, 8
            ]
        );
    }

    #[test]
    fn game_forty_two_matches_reference_board() {
        let board = generate_for_game(42);
        assert_eq!(
            summary(&board, 6),
            vec![
                (0, 5, 2, 3, 4, vec![1, 27, 28, 11, 20]),
                (1, 4, 2, 0, 1, vec![0, 18, 20, 11, 27, 23, 28]),
                (2, 5, 4, 1, 2, vec![12, 8, 27, 20, 3]),
                (3, 4, 5, 2, 1, vec![2, 8, 13, 16, 12, 24, 29, 14]),
                (4, 0, 2, 4, 1, vec![21, 25, 10]),
                (5, 2, 5, 2, 1, vec![13, 26, 17, 14, 29]),
            ]
        );
    }

    #[test]
    fn same_game_number_same_board() {
        assert_eq!(generate_for_game(9), generate_for_game(9));
        assert_ne!(generate_for_game(9), generate_for_game(10));
    }

    #[test]
    fn standard_board_invariants() {
        for game in 1..=10 {
            let board = generate_for_game(game);
            assert_eq!(board.len(), TOTAL_NODES);
            for faction in TURN_ORDER {
                assert_eq!(board.count_nodes(faction), NODES_PER_FACTION);
                assert_eq!(board.total_strength(faction), STRENGTH_PER_FACTION);
            }
            assert_eq!(board.count_nodes(Faction::Unowned), 0);
            assert!(board.nodes().iter().all(|n| !n.connections.is_empty()));
            assert!(is_symmetric(board.nodes()));
        }
    }

    #[test]
    fn custom_layout_is_honoured() {
        let config = GenerationConfig {
            grid_cols: 4,
            grid_rows: 4,
            nodes_per_faction: 3,
            distributions: vec![vec![5, 3, 2], vec![4, 4, 2]],
        };
        let board = generate_with(&mut Prng::new(5), &config).unwrap();
        assert_eq!(board.len(), 15);
        for faction in TURN_ORDER {
            assert_eq!(board.count_nodes(faction), 3);
            assert_eq!(board.total_strength(faction), 10);
        }
        assert!(board
            .nodes()
            .iter()
            .all(|n| (0..4).contains(&n.grid_x) && (0..4).contains(&n.grid_y)));
    }

    #[test]
    fn mismatched_template_is_invalid_partition() {
        let config = GenerationConfig {
            distributions: vec![vec![10, 10]],
            ..GenerationConfig::default()
        };
        let err = generate_with(&mut Prng::new(1), &config).unwrap_err();
        assert!(matches!(err, BoardError::InvalidFactionPartition(_)));
    }

    #[test]
    fn zero_nodes_per_faction_is_invalid_partition() {
        let config = GenerationConfig {
            nodes_per_faction: 0,
            distributions: vec![Vec::new()],
            ..GenerationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BoardError::InvalidFactionPartition(_))
        ));
    }

    #[test]
    fn oversized_layout_is_rejected() {
        let config = GenerationConfig {
            grid_cols: 3,
            grid_rows: 3,
            ..GenerationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(BoardError::GridTooSmall { cells: 9, nodes: 30 })
        );
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: GenerationConfig = serde_json::from_str(r#"{"grid_cols": 8}"#).unwrap();
        assert_eq!(config.grid_cols, 8);
        assert_eq!(config.grid_rows, GRID_ROWS);
        assert_eq!(config.distributions.len(), STRENGTH_DISTRIBUTIONS.len());
    }
}
