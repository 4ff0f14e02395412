use crate::game::{ParityGraph, Player, Sink, VertexId};
use crate::index::IndexedVec;
use crate::lift::Lifter;

use super::solve;

struct TestGame {
    priority: IndexedVec<VertexId, usize>,
    owner: IndexedVec<VertexId, Player>,
    disabled: IndexedVec<VertexId, bool>,
    successors: IndexedVec<VertexId, Vec<VertexId>>,
    predecessors: IndexedVec<VertexId, Vec<VertexId>>,
    winner: IndexedVec<VertexId, Option<Player>>,
    strategy: IndexedVec<VertexId, Option<VertexId>>,
    pending: Vec<VertexId>,
    unsolved_at_flush: Vec<usize>,
}

impl TestGame {
    fn new(vertices: &[(usize, Player, &[usize])]) -> Self {
        assert!(vertices.windows(2).all(|w| w[0].0 <= w[1].0), "priorities must be sorted");

        let n = vertices.len();
        let mut successors = (0..n).map(|_| Vec::new()).collect::<IndexedVec<VertexId, Vec<_>>>();
        let mut predecessors = (0..n).map(|_| Vec::new()).collect::<IndexedVec<VertexId, Vec<_>>>();
        for (i, &(_, _, succs)) in vertices.iter().enumerate() {
            for &s in succs {
                successors[VertexId(i)].push(VertexId(s));
                predecessors[VertexId(s)].push(VertexId(i));
            }
        }

        TestGame {
            priority: vertices.iter().map(|v| v.0).collect(),
            owner: vertices.iter().map(|v| v.1).collect(),
            disabled: (0..n).map(|_| false).collect(),
            successors,
            predecessors,
            winner: (0..n).map(|_| None).collect(),
            strategy: (0..n).map(|_| None).collect(),
            pending: Vec::new(),
            unsolved_at_flush: Vec::new(),
        }
    }
}

impl ParityGraph for TestGame {
    fn vertex_count(&self) -> usize {
        self.priority.len()
    }

    fn priority_of(&self, v: VertexId) -> usize {
        self.priority[v]
    }

    fn owner_of(&self, v: VertexId) -> Player {
        self.owner[v]
    }

    fn is_disabled(&self, v: VertexId) -> bool {
        self.disabled[v]
    }

    fn successors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        self.successors[v].iter().copied()
    }

    fn predecessors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId> {
        self.predecessors[v].iter().copied()
    }
}

impl Sink for TestGame {
    fn solved(&mut self, v: VertexId, winner: Player, strategy: Option<VertexId>) {
        assert!(self.winner[v].is_none(), "vertex solved twice");
        self.winner[v] = Some(winner);
        self.strategy[v] = strategy;
        self.pending.push(v);
    }

    fn flush(&mut self) {
        self.unsolved_at_flush.push(self.count_unsolved());
        for v in self.pending.drain(..) {
            self.disabled[v] = true;
        }
    }

    fn count_unsolved(&self) -> usize {
        self.winner.iter().filter(|w| w.is_none()).count()
    }
}

/// Round-robin lifting until nothing changes. Order-independent, so it pins
/// down the least fixpoint the worklist driver must reach as well.
fn chaotic_fixpoint(game: &TestGame, l: usize, h: i32, player: Player) -> Lifter {
    let n = game.vertex_count();
    let mut lifter = Lifter::new(n, l, h, player);
    loop {
        let mut changed = false;
        for v in (0..n).map(VertexId) {
            if !game.is_disabled(v) {
                changed |= lifter.lift(game, v, None);
            }
        }
        if !changed {
            break lifter;
        }
    }
}

#[test]
fn self_loop_even_vertex_is_won_by_p0() {
    let mut game = TestGame::new(&[(0, Player::P0, &[0])]);
    let stats = solve(&mut game);

    assert_eq!(game.winner[VertexId(0)], Some(Player::P0));
    assert_eq!(game.strategy[VertexId(0)], Some(VertexId(0)));
    assert!(stats.lifts <= stats.attempts);

    // In the odd pass the vertex never needs to move: its measure stays at
    // the minimum, well away from ⊤.
    let game = TestGame::new(&[(0, Player::P0, &[0])]);
    let mut lifter = Lifter::new(1, 1, 0, Player::P1);
    assert!(!lifter.lift(&game, VertexId(0), None));
    assert!(!lifter.measure(VertexId(0)).is_top());
}

#[test]
fn two_vertex_cycle_needs_the_odd_pass() {
    // a: priority 1, owned by P0, → b; b: priority 2, owned by P1, → a.
    let mut game = TestGame::new(&[(1, Player::P0, &[1]), (2, Player::P1, &[0])]);
    solve(&mut game);

    // The even pass certifies nothing, so both vertices are still unsolved
    // when it flushes and the odd pass has to run.
    assert_eq!(game.unsolved_at_flush, vec![2, 0]);

    assert_eq!(game.winner[VertexId(0)], Some(Player::P0));
    assert_eq!(game.winner[VertexId(1)], Some(Player::P0));
    assert_eq!(game.strategy[VertexId(0)], Some(VertexId(1)));
    assert_eq!(game.strategy[VertexId(1)], None);
}

#[test]
fn dead_end_considers_only_enabled_successors() {
    let mut game = TestGame::new(&[(0, Player::P0, &[1]), (1, Player::P1, &[1])]);
    game.disabled[VertexId(1)] = true;
    solve(&mut game);

    // The only successor is disabled, so the vertex can never lift and P0
    // loses it by being unable to move.
    assert_eq!(game.winner[VertexId(0)], Some(Player::P1));
    assert_eq!(game.strategy[VertexId(0)], None);
    assert_eq!(game.winner[VertexId(1)], None);
}

#[test]
fn owner_escapes_a_losing_loop() {
    // P0 leaves the odd self-loop for the even one and wins everywhere.
    let mut game = TestGame::new(&[(1, Player::P0, &[0, 1]), (2, Player::P0, &[1])]);
    solve(&mut game);

    assert_eq!(game.winner[VertexId(0)], Some(Player::P0));
    assert_eq!(game.winner[VertexId(1)], Some(Player::P0));
    assert_eq!(game.strategy[VertexId(0)], Some(VertexId(1)));
    assert_eq!(game.strategy[VertexId(1)], Some(VertexId(1)));
}

#[test]
fn both_players_keep_their_self_loops() {
    let mut game = TestGame::new(&[(0, Player::P0, &[0]), (1, Player::P1, &[1])]);
    solve(&mut game);

    assert_eq!(game.winner[VertexId(0)], Some(Player::P0));
    assert_eq!(game.winner[VertexId(1)], Some(Player::P1));
    assert_eq!(game.strategy[VertexId(1)], Some(VertexId(1)));
}

fn tower() -> TestGame {
    // P1 owns an odd self-loop with an escape towards P0's region, where P0
    // can always fall back on an even self-loop.
    TestGame::new(&[
        (1, Player::P1, &[0, 1]),
        (2, Player::P0, &[2, 3]),
        (3, Player::P1, &[1]),
        (4, Player::P0, &[3]),
    ])
}

#[test]
fn passes_match_the_chaotic_fixpoint() {
    let mut solved = tower();
    solve(&mut solved);

    assert_eq!(solved.winner[VertexId(0)], Some(Player::P1));
    assert_eq!(solved.winner[VertexId(1)], Some(Player::P0));
    assert_eq!(solved.winner[VertexId(2)], Some(Player::P0));
    assert_eq!(solved.winner[VertexId(3)], Some(Player::P0));

    // P1 stays on its loop; P0 must sidestep the priority-3 vertex.
    assert_eq!(solved.strategy[VertexId(0)], Some(VertexId(0)));
    assert_eq!(solved.strategy[VertexId(1)], Some(VertexId(3)));
    assert_eq!(solved.strategy[VertexId(2)], None);
    assert_eq!(solved.strategy[VertexId(3)], Some(VertexId(3)));

    // Both passes agree with plain round-robin iteration on the full game:
    // a finite measure certifies the win for the pass's opponent.
    let game = tower();
    let even = chaotic_fixpoint(&game, 2, 3, Player::P0);
    let odd = chaotic_fixpoint(&game, 2, 2, Player::P1);
    for v in (0..4).map(VertexId) {
        assert_eq!(even.measure(v).is_top(), solved.winner[v] != Some(Player::P1), "{v:?}");
        assert_eq!(odd.measure(v).is_top(), solved.winner[v] != Some(Player::P0), "{v:?}");
    }
}

#[test]
fn extra_lifts_after_the_fixpoint_do_nothing() {
    let game = tower();
    for (h, player) in [(3, Player::P0), (2, Player::P1)] {
        let mut lifter = chaotic_fixpoint(&game, 2, h, player);
        for v in (0..4).map(VertexId) {
            assert!(!lifter.lift(&game, v, None));
            for to in game.successors[v].clone() {
                assert!(!lifter.lift(&game, v, Some(to)));
            }
        }
    }
}
