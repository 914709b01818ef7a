//! Greedy chain-attack turn for a computer-controlled faction.
//!
//! The strongest unexhausted node attacks its weakest weaker enemy
//! neighbour, repeatedly, until it drops below `MIN_ATTACK_STRENGTH` or runs
//! out of targets; then the next strongest node takes over. Nodes captured
//! during the turn become sources in their own right.
//!
//! After every combat the caller's hook is awaited, then the shared
//! game-over flag and the victory check are polled. Either one ends the turn
//! immediately, leaving the board as it stands.

use std::fmt;
use std::future::Future;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::faction::Faction;
use crate::board::node::NodeId;
use crate::board::rules::{MIN_ATTACK_STRENGTH, UNITS_LEFT_BEHIND};
use crate::board::state::Board;
use crate::resolve::combat::{resolve_combat, CombatResult};
use crate::resolve::victory::{check, update_eliminations, Outcome};

/// A completed attack, handed to the hook after the board is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub attacker: NodeId,
    pub defender: NodeId,
    pub result: CombatResult,
}

/// Why a turn stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEnd {
    /// No node can attack any more.
    Exhausted,
    /// The driver raised the game-over flag.
    GameOverFlag,
    /// The victory check reported a finished game.
    Terminal(Outcome),
}

impl fmt::Display for TurnEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnEnd::Exhausted => f.write_str("exhausted"),
            TurnEnd::GameOverFlag => f.write_str("gameover"),
            TurnEnd::Terminal(_) => f.write_str("terminal"),
        }
    }
}

/// Summary of one faction's turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub faction: Faction,
    pub attacks: u32,
    pub captures: u32,
    pub end: TurnEnd,
}

/// Hook that ignores every combat.
pub async fn ignore_combat(_event: CombatEvent) {}

/// Plays `faction`'s turn on `board`.
///
/// `rng` drives combat rolls and tie-breaks. `on_attack` is awaited after each
/// combat, before the next one starts. `Unowned` never acts.
pub async fn execute_turn<R, H, Fut>(
    faction: Faction,
    board: &mut Board,
    rng: &mut R,
    mut on_attack: H,
) -> TurnReport
where
    R: Rng,
    H: FnMut(CombatEvent) -> Fut,
    Fut: Future<Output = ()>,
{
    let mut exhausted = vec![false; board.len()];
    let mut report = TurnReport {
        faction,
        attacks: 0,
        captures: 0,
        end: TurnEnd::Exhausted,
    };
    if !faction.is_playable() {
        return finish(report);
    }

    while let Some(source) = pick_source(faction, board, &exhausted, rng) {
        while board.node(source).strength >= MIN_ATTACK_STRENGTH {
            let Some(target) = pick_target(faction, source, board, rng) else {
                break;
            };

            let result = resolve_combat(
                board.node(source).strength,
                board.node(target).strength,
                rng,
            );
            board.node_mut(source).strength = UNITS_LEFT_BEHIND;
            let defender = board.node_mut(target);
            if result.attacker_won {
                defender.faction = faction;
                defender.strength = result.attacker_remaining;
                report.captures += 1;
            } else {
                defender.strength = result.defender_remaining;
            }
            report.attacks += 1;
            debug!(
                %faction,
                attacker = source,
                defender = target,
                won = result.attacker_won,
                "attack"
            );

            on_attack(CombatEvent { attacker: source, defender: target, result }).await;

            if board.game_over.get() {
                report.end = TurnEnd::GameOverFlag;
                return finish(report);
            }
            let outcome = check(board);
            if outcome.is_over() {
                report.end = TurnEnd::Terminal(outcome);
                return finish(report);
            }
            update_eliminations(board);
        }
        exhausted[source] = true;
    }

    finish(report)
}

fn finish(report: TurnReport) -> TurnReport {
    info!(
        faction = %report.faction,
        attacks = report.attacks,
        captures = report.captures,
        end = %report.end,
        "turn finished"
    );
    report
}

/// Strongest unexhausted node able to attack, random among equals.
fn pick_source<R: Rng>(
    faction: Faction,
    board: &Board,
    exhausted: &[bool],
    rng: &mut R,
) -> Option<NodeId> {
    let ready: Vec<(NodeId, u32)> = board
        .nodes_of(faction)
        .filter(|n| n.strength >= MIN_ATTACK_STRENGTH && !exhausted[n.id])
        .map(|n| (n.id, n.strength))
        .collect();
    let best = ready.iter().map(|&(_, s)| s).max()?;
    let ties: Vec<NodeId> = ready
        .iter()
        .filter(|&&(_, s)| s == best)
        .map(|&(id, _)| id)
        .collect();
    pick(&ties, rng)
}

/// Weakest enemy neighbour strictly weaker than the source, random among equals.
fn pick_target<R: Rng>(
    faction: Faction,
    source: NodeId,
    board: &Board,
    rng: &mut R,
) -> Option<NodeId> {
    let strength = board.node(source).strength;
    let targets: Vec<(NodeId, u32)> = board
        .node(source)
        .connections
        .iter()
        .map(|&id| board.node(id))
        .filter(|n| {
            n.faction != faction && n.faction != Faction::Unowned && n.strength < strength
        })
        .map(|n| (n.id, n.strength))
        .collect();
    let weakest = targets.iter().map(|&(_, s)| s).min()?;
    let ties: Vec<NodeId> = targets
        .iter()
        .filter(|&&(_, s)| s == weakest)
        .map(|&(id, _)| id)
        .collect();
    pick(&ties, rng)
}

fn pick<R: Rng>(ids: &[NodeId], rng: &mut R) -> Option<NodeId> {
    match ids {
        [] => None,
        [only] => Some(*only),
        _ => ids.choose(rng).copied(),
    }
}

#[cfg(test)]
mod tests {
    use std::future::ready;

    use super::*;
    use crate::board::node::Node;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn node(id: NodeId, faction: Faction, strength: u32, connections: &[NodeId]) -> Node {
        Node {
            id,
            grid_x: id as i32,
            grid_y: 0,
            faction,
            strength,
            connections: connections.to_vec(),
        }
    }

    fn board(nodes: Vec<Node>) -> Board {
        Board::from_nodes(nodes).unwrap()
    }

    /// Combat rolls always favour the attacker; tie-breaks take the first entry.
    fn attacker_rolls() -> StepRng {
        StepRng::new(0, 0)
    }

    fn defender_rolls() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[tokio::test]
    async fn captures_weaker_neighbour() {
        let mut b = board(vec![
            node(0, Faction::Red, 5, &[1]),
            node(1, Faction::Blue, 2, &[0]),
        ]);
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 1);
        assert_eq!(report.captures, 1);
        assert_eq!(report.end, TurnEnd::Exhausted);
        assert_eq!(b.node(0).strength, UNITS_LEFT_BEHIND);
        assert_eq!(b.node(1).faction, Faction::Red);
        assert_eq!(b.node(1).strength, 4);
        assert!(b.eliminated.contains(&Faction::Blue));
    }

    #[tokio::test]
    async fn failed_attack_leaves_defender_remainder() {
        let mut b = board(vec![
            node(0, Faction::Red, 4, &[1]),
            node(1, Faction::Blue, 3, &[0]),
        ]);
        let report = execute_turn(Faction::Red, &mut b, &mut defender_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 1);
        assert_eq!(report.captures, 0);
        assert_eq!(b.node(0).strength, 1);
        assert_eq!(b.node(1).faction, Faction::Blue);
        assert_eq!(b.node(1).strength, 3);
    }

    #[tokio::test]
    async fn weak_sources_do_not_attack() {
        let mut b = board(vec![
            node(0, Faction::Red, 1, &[1]),
            node(1, Faction::Blue, 0, &[0]),
        ]);
        let before = b.clone();
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 0);
        assert_eq!(b, before);
    }

    #[tokio::test]
    async fn equal_or_stronger_neighbours_are_left_alone() {
        let mut b = board(vec![
            node(0, Faction::Red, 3, &[1, 2]),
            node(1, Faction::Blue, 3, &[0]),
            node(2, Faction::Green, 7, &[0]),
        ]);
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 0);
        assert_eq!(report.end, TurnEnd::Exhausted);
    }

    #[tokio::test]
    async fn unowned_nodes_are_never_attacked() {
        let mut b = board(vec![
            node(0, Faction::Red, 6, &[1]),
            node(1, Faction::Unowned, 0, &[0]),
        ]);
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 0);
        assert_eq!(b.node(1).faction, Faction::Unowned);
    }

    #[tokio::test]
    async fn weakest_target_is_chosen() {
        let mut b = board(vec![
            node(0, Faction::Red, 6, &[1, 2]),
            node(1, Faction::Blue, 4, &[0]),
            node(2, Faction::Green, 2, &[0]),
        ]);
        let mut events = Vec::new();
        execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), |event| {
            events.push((event.attacker, event.defender));
            ready(())
        })
        .await;
        assert_eq!(events, vec![(0, 2)]);
    }

    #[tokio::test]
    async fn strongest_source_attacks_first() {
        let mut b = board(vec![
            node(0, Faction::Red, 3, &[2]),
            node(1, Faction::Red, 7, &[3]),
            node(2, Faction::Blue, 1, &[0]),
            node(3, Faction::Blue, 1, &[1]),
        ]);
        let mut attackers = Vec::new();
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), |event| {
            attackers.push(event.attacker);
            ready(())
        })
        .await;
        assert_eq!(attackers, vec![1, 0]);
        assert_eq!(report.captures, 2);
    }

    #[tokio::test]
    async fn hook_is_awaited_between_combats() {
        let mut b = board(vec![
            node(0, Faction::Red, 5, &[2]),
            node(1, Faction::Red, 4, &[3]),
            node(2, Faction::Blue, 1, &[0]),
            node(3, Faction::Blue, 1, &[1]),
        ]);
        let mut seen = Vec::new();
        execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), |event| {
            seen.push(event.defender);
            async {
                tokio::task::yield_now().await;
            }
        })
        .await;
        assert_eq!(seen, vec![2, 3]);
    }

    #[tokio::test]
    async fn game_over_flag_stops_after_current_combat() {
        let mut b = board(vec![
            node(0, Faction::Red, 9, &[2]),
            node(1, Faction::Red, 8, &[3]),
            node(2, Faction::Blue, 1, &[0]),
            node(3, Faction::Blue, 1, &[1]),
        ]);
        let flag = b.game_over_handle();
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), move |_| {
            flag.set(true);
            ready(())
        })
        .await;
        assert_eq!(report.attacks, 1);
        assert_eq!(report.end, TurnEnd::GameOverFlag);
        assert_eq!(b.node(3).faction, Faction::Blue);
    }

    #[tokio::test]
    async fn flag_raised_before_turn_is_polled_after_first_combat() {
        let mut b = board(vec![
            node(0, Faction::Red, 9, &[2]),
            node(1, Faction::Red, 8, &[3]),
            node(2, Faction::Blue, 1, &[0]),
            node(3, Faction::Blue, 1, &[1]),
        ]);
        b.game_over.set(true);
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 1);
        assert_eq!(report.end, TurnEnd::GameOverFlag);
    }

    #[tokio::test]
    async fn victory_ends_the_turn() {
        // Red holds 23 nodes; one capture reaches the threshold.
        let mut nodes: Vec<Node> = (0..21).map(|id| node(id, Faction::Red, 1, &[])).collect();
        nodes.push(node(21, Faction::Red, 5, &[22]));
        nodes.push(node(22, Faction::Blue, 1, &[21]));
        nodes.push(node(23, Faction::Red, 4, &[24]));
        nodes.push(node(24, Faction::Blue, 1, &[23]));
        let mut b = board(nodes);
        let report = execute_turn(Faction::Red, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 1);
        assert_eq!(report.end, TurnEnd::Terminal(Outcome::Winner(Faction::Red)));
        assert_eq!(b.node(24).faction, Faction::Blue);
    }

    #[tokio::test]
    async fn capturing_the_last_player_node_is_terminal() {
        let mut b = board(vec![
            node(0, Faction::Blue, 5, &[1]),
            node(1, Faction::Red, 1, &[0]),
        ]);
        let report = execute_turn(Faction::Blue, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.end, TurnEnd::Terminal(Outcome::PlayerEliminated));
        assert_eq!(b.count_nodes(Faction::Red), 0);
    }

    #[tokio::test]
    async fn random_turns_preserve_node_count_and_terminate() {
        for game in 1..=5 {
            let mut b = crate::generate::generate_for_game(game);
            let mut rng = SmallRng::seed_from_u64(u64::from(game));
            let report = execute_turn(Faction::Blue, &mut b, &mut rng, ignore_combat).await;
            assert_eq!(b.len(), 30);
            assert!(report.captures <= report.attacks);
            assert!(b.nodes().iter().all(|n| n.faction != Faction::Unowned));
        }
    }

    #[tokio::test]
    async fn unowned_faction_never_acts() {
        let mut b = board(vec![
            node(0, Faction::Unowned, 5, &[1]),
            node(1, Faction::Red, 1, &[0]),
        ]);
        let before = b.clone();
        let report =
            execute_turn(Faction::Unowned, &mut b, &mut attacker_rolls(), ignore_combat).await;
        assert_eq!(report.attacks, 0);
        assert_eq!(report.end, TurnEnd::Exhausted);
        assert_eq!(b, before);
    }

    #[test]
    fn tied_sources_are_drawn_at_random() {
        let b = board(vec![
            node(0, Faction::Red, 5, &[2]),
            node(1, Faction::Red, 5, &[3]),
            node(2, Faction::Blue, 1, &[0]),
            node(3, Faction::Blue, 1, &[1]),
        ]);
        let exhausted = vec![false; b.len()];
        let mut rng = SmallRng::seed_from_u64(7);
        let mut seen = [0u32; 2];
        for _ in 0..200 {
            let id = pick_source(Faction::Red, &b, &exhausted, &mut rng).unwrap();
            seen[id] += 1;
        }
        assert!(seen.iter().all(|&n| n > 0), "picks {:?}", seen);
    }

    #[test]
    fn tied_targets_are_drawn_at_random() {
        let b = board(vec![
            node(0, Faction::Red, 6, &[1, 2, 3]),
            node(1, Faction::Blue, 2, &[0]),
            node(2, Faction::Green, 2, &[0]),
            node(3, Faction::Yellow, 4, &[0]),
        ]);
        let mut rng = SmallRng::seed_from_u64(11);
        let mut seen = [0u32; 4];
        for _ in 0..200 {
            let id = pick_target(Faction::Red, 0, &b, &mut rng).unwrap();
            seen[id] += 1;
        }
        assert!(seen[1] > 0 && seen[2] > 0, "picks {:?}", seen);
        assert_eq!(seen[3], 0);
    }
}
