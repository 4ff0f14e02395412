use sspm::game::{ParityGraph, Player, Sink, VertexId};
use sspm::index::IndexedVec;
use sspm::{Map, Set};

use crate::ParityGame;

/// A parsed game reindexed for the solver: vertices sorted by priority (the
/// driver reads the maximum priority off the last index) with inverse edges
/// and solution bookkeeping.
///
/// The sink side disables solved vertices when a pass flushes, so the odd
/// pass only ever works on the residual region.
pub struct SolverGame {
    priority: IndexedVec<VertexId, usize>,
    owner: IndexedVec<VertexId, Player>,
    label: IndexedVec<VertexId, Option<String>>,
    original_id: IndexedVec<VertexId, usize>,
    successors: IndexedVec<VertexId, Vec<VertexId>>,
    predecessors: IndexedVec<VertexId, Vec<VertexId>>,
    disabled: IndexedVec<VertexId, bool>,
    winner: IndexedVec<VertexId, Option<Player>>,
    strategy: IndexedVec<VertexId, Option<VertexId>>,
    pending: Set<VertexId>,
}

impl SolverGame {
    pub fn new(pg: &ParityGame) -> Self {
        let mut sorted = pg.vertices.iter().collect::<Vec<_>>();
        sorted.sort_by_key(|v| v.priority);

        let vertex_id =
            sorted.iter().enumerate().map(|(i, v)| (v.id, VertexId(i))).collect::<Map<_, _>>();

        let n = sorted.len();
        let mut successors = (0..n).map(|_| Vec::new()).collect::<IndexedVec<VertexId, Vec<_>>>();
        let mut predecessors = (0..n).map(|_| Vec::new()).collect::<IndexedVec<VertexId, Vec<_>>>();
        for (i, v) in sorted.iter().enumerate() {
            for s in &v.successors {
                let (from, to) = (VertexId(i), vertex_id[s]);
                successors[from].push(to);
                predecessors[to].push(from);
            }
        }

        SolverGame {
            priority: sorted.iter().map(|v| v.priority).collect(),
            owner: sorted.iter().map(|v| v.owner).collect(),
            label: sorted.iter().map(|v| v.label.clone()).collect(),
            original_id: sorted.iter().map(|v| v.id).collect(),
            successors,
            predecessors,
            disabled: (0..n).map(|_| false).collect(),
            winner: (0..n).map(|_| None).collect(),
            strategy: (0..n).map(|_| None).collect(),
            pending: Set::default(),
        }
    }

    /// Solution rows `(id, winner, strategy successor)` in original-id order.
    pub fn solution(&self) -> Vec<(usize, Player, Option<usize>)> {
        let mut rows = self
            .winner
            .enumerate()
            .filter_map(|(v, &winner)| {
                let winner = winner?;
                let strategy = self.strategy[v].map(|s| self.original_id[s]);
                Some((self.original_id[v], winner, strategy))
            })
            .collect::<Vec<_>>();
        rows.sort_unstable_by_key(|&(id, _, _)| id);
        rows
    }
}

impl ParityGraph for SolverGame {
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

    fn label_of(&self, v: VertexId) -> String {
        match &self.label[v] {
            Some(label) => label.clone(),
            None => self.original_id[v].to_string(),
        }
    }
}

impl Sink for SolverGame {
    fn solved(&mut self, v: VertexId, winner: Player, strategy: Option<VertexId>) {
        if self.winner[v].is_none() {
            self.winner[v] = Some(winner);
            self.strategy[v] = strategy;
            self.pending.insert(v);
        }
    }

    fn flush(&mut self) {
        for v in self.pending.drain(..) {
            self.disabled[v] = true;
        }
    }

    fn count_unsolved(&self) -> usize {
        self.winner.iter().filter(|w| w.is_none()).count()
    }
}
