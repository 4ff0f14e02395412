use std::iter;

use either::Either::{Left, Right};

use crate::game::{ParityGraph, Player, VertexId};
use crate::index::IndexedVec;
use crate::measure::Measure;

/// Per-run lifting state: one measure per vertex, the scratch measures reused
/// by every lift, and the strategy edge recorded by the latest full scan.
pub(crate) struct Lifter {
    player: Player,
    h: i32,
    pm: IndexedVec<VertexId, Measure>,
    tmp: Measure,
    best: Measure,
    strategy: IndexedVec<VertexId, Option<VertexId>>,
}

impl Lifter {
    pub fn new(n: usize, l: usize, h: i32, player: Player) -> Self {
        Lifter {
            player,
            h,
            pm: (0..n).map(|_| Measure::min(l)).collect(),
            tmp: Measure::min(l),
            best: Measure::min(l),
            strategy: (0..n).map(|_| None).collect(),
        }
    }

    pub fn measure(&self, v: VertexId) -> &Measure {
        &self.pm[v]
    }

    pub fn strategy_of(&self, v: VertexId) -> Option<VertexId> {
        self.strategy[v]
    }

    /// One relaxation step: recompute the measure of `v` from its enabled
    /// successors and commit it if it strictly increased. Returns whether the
    /// stored measure changed.
    ///
    /// When `target` is given and `v` is owned by the solved player, only the
    /// target successor is probed: the owner picks its own successor, so one
    /// improved edge is enough to lift. In every other case all enabled
    /// successors are rescanned.
    pub fn lift(&mut self, game: &impl ParityGraph, v: VertexId, target: Option<VertexId>) -> bool {
        if self.pm[v].is_top() {
            return false;
        }

        let pr = game.priority_of(v) as i32;
        // The level this vertex's priority maps to, counted from the coarsest
        // class down. One parity class higher than every priority in the game
        // maps to -1, which makes truncate round down to the minimum.
        let pindex = match self.player {
            Player::P0 => self.h - (pr + 1) / 2 - 1,
            Player::P1 => self.h - pr / 2 - 1,
        };
        // Priorities of the solved player must show progress at their level;
        // the other parity is only allowed to round down.
        let progress = Player::of_priority(pr as usize) == self.player;

        let candidates = match target {
            Some(target) if game.owner_of(v) == self.player => Left(iter::once(target)),
            _ => Right(game.successors_of(v).filter(|&to| !game.is_disabled(to))),
        };

        let mut chosen = None;
        for to in candidates {
            self.tmp.clone_from(&self.pm[to]);
            if progress {
                self.tmp.successor(pindex, self.h);
            } else {
                self.tmp.truncate(pindex);
            }

            // The owner of the vertex maximizes over successors, the
            // opponent minimizes; ties keep the first successor seen.
            let better = match chosen {
                None => true,
                Some(_) if game.owner_of(v) == self.player => {
                    self.tmp.cmp_up_to(&self.best, pindex).is_gt()
                }
                Some(_) => self.tmp.cmp_up_to(&self.best, pindex).is_lt(),
            };
            if better {
                self.best.clone_from(&self.tmp);
                chosen = Some(to);
            }
        }

        // Every successor disabled: nothing to improve from.
        let Some(chosen) = chosen else { return false };
        self.strategy[v] = Some(chosen);

        if self.best.cmp_up_to(&self.pm[v], pindex).is_gt() {
            self.pm[v].clone_from(&self.best);
            true
        } else {
            false
        }
    }
}
