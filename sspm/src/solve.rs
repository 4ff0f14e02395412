use std::collections::VecDeque;

use crate::game::{ParityGraph, Player, Sink, VertexId};
use crate::index::IndexedVec;
use crate::lift::Lifter;

#[cfg(test)]
mod test;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    pub lifts: u64,
    pub attempts: u64,
}

/// Solve the whole game with adaptive counters: one pass for even priorities
/// certifying the vertices won by P1, then, if anything is left unsolved, one
/// pass for odd priorities certifying the vertices won by P0.
pub fn solve<G: ParityGraph + Sink>(game: &mut G) -> Stats {
    let mut stats = Stats::default();
    let n = game.vertex_count();
    if n == 0 {
        return stats;
    }

    let max_priority = game.max_priority();
    // One bit per halving of the vertex count, but at least one slot so that
    // the degenerate single-vertex game still has a measure to advance.
    let l = ceil_log2(n).max(1);
    let h0 = max_priority / 2 + 1;
    let h1 = (max_priority + 1) / 2;

    run(game, l, h0, Player::P0, &mut stats);
    if game.count_unsolved() != 0 {
        run(game, l, h1, Player::P1, &mut stats);
    }

    stats
}

/// One pass of the fixpoint: sweep, drain the worklist, derive the
/// opponent's strategies and report the finite vertices to the sink.
fn run<G: ParityGraph + Sink>(game: &mut G, l: usize, h: usize, player: Player, stats: &mut Stats) {
    let n = game.vertex_count();
    let mut lifter = Lifter::new(n, l, h as i32, player);
    let mut todo = Worklist::new(n);

    // Initial sweep, highest priority first. Every vertex that lifts has its
    // predecessors re-lifted right away with the lifted vertex as target.
    for v in (0..n).rev().map(VertexId) {
        if game.is_disabled(v) {
            continue;
        }
        stats.attempts += 1;
        if lifter.lift(game, v, None) {
            stats.lifts += 1;
            lift_predecessors(game, &mut lifter, &mut todo, v, stats);
        }
    }

    while let Some(v) = todo.pop() {
        lift_predecessors(game, &mut lifter, &mut todo, v, stats);
    }

    // Pin down the opponent's strategy with one more full scan per vertex.
    // The fixpoint is stable, so none of these lifts may change a measure.
    for v in (0..n).map(VertexId) {
        if game.is_disabled(v) || lifter.measure(v).is_top() {
            continue;
        }
        if game.owner_of(v) != player && lifter.lift(game, v, None) {
            panic!("vertex {} is not progressive after the fixpoint", game.label_of(v));
        }
    }

    // Vertices that never reached ⊤ are won by the opponent of the solved
    // player; the recorded strategy certifies it for the ones they own.
    for v in (0..n).map(VertexId) {
        if game.is_disabled(v) || lifter.measure(v).is_top() {
            continue;
        }
        let strategy = match game.owner_of(v) != player {
            true => lifter.strategy_of(v),
            false => None,
        };
        game.solved(v, player.opponent(), strategy);
    }
    game.flush();
}

fn lift_predecessors(
    game: &impl ParityGraph,
    lifter: &mut Lifter,
    todo: &mut Worklist,
    v: VertexId,
    stats: &mut Stats,
) {
    for from in game.predecessors_of(v) {
        if game.is_disabled(from) {
            continue;
        }
        stats.attempts += 1;
        if lifter.lift(game, from, Some(v)) {
            stats.lifts += 1;
            todo.push(from);
        }
    }
}

/// FIFO worklist with set membership: a vertex already waiting is not pushed
/// a second time.
struct Worklist {
    queue: VecDeque<VertexId>,
    queued: IndexedVec<VertexId, bool>,
}

impl Worklist {
    fn new(n: usize) -> Self {
        Worklist { queue: VecDeque::new(), queued: (0..n).map(|_| false).collect() }
    }

    fn push(&mut self, v: VertexId) {
        if !std::mem::replace(&mut self.queued[v], true) {
            self.queue.push_back(v);
        }
    }

    fn pop(&mut self) -> Option<VertexId> {
        let v = self.queue.pop_front()?;
        self.queued[v] = false;
        Some(v)
    }
}

fn ceil_log2(n: usize) -> usize {
    n.next_power_of_two().trailing_zeros() as usize
}
