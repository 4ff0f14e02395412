use crate::index::{new_index, AsIndex};

new_index!(pub index VertexId);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Player {
    P0,
    P1,
}

impl Player {
    pub fn of_priority(priority: usize) -> Player {
        match priority % 2 {
            0 => Player::P0,
            _ => Player::P1,
        }
    }

    pub fn opponent(self) -> Player {
        match self {
            Player::P0 => Player::P1,
            Player::P1 => Player::P0,
        }
    }
}

/// Read-only view of the game consumed by the solver.
///
/// Vertices must be sorted so that priority is non-decreasing in index order;
/// the solver reads the maximum priority off the last vertex.
pub trait ParityGraph {
    fn vertex_count(&self) -> usize;

    fn priority_of(&self, v: VertexId) -> usize;
    fn owner_of(&self, v: VertexId) -> Player;
    fn is_disabled(&self, v: VertexId) -> bool;

    fn successors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId>;
    fn predecessors_of(&self, v: VertexId) -> impl Iterator<Item = VertexId>;

    fn label_of(&self, v: VertexId) -> String {
        v.to_usize().to_string()
    }

    fn max_priority(&self) -> usize {
        self.priority_of(VertexId(self.vertex_count() - 1))
    }
}

/// Receives the vertices solved by one pass of the solver.
///
/// `flush` commits a batch of solved vertices; the implementation may disable
/// them so that the next pass only sees the residual game.
pub trait Sink {
    fn solved(&mut self, v: VertexId, winner: Player, strategy: Option<VertexId>);
    fn flush(&mut self);
    fn count_unsolved(&self) -> usize;
}
