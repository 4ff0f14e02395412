mod conv;
mod parser;


pub use conv::SolverGame;
pub use parser::parse_parity_game;
use sspm::game::Player;

/// A vertex as written in the input file.
#[derive(Debug)]
pub struct Vertex {
    pub id: usize,
    pub priority: usize,
    pub owner: Player,
    pub successors: Vec<usize>,
    pub label: Option<String>,
}

#[derive(Debug)]
pub struct ParityGame {
    pub vertices: Vec<Vertex>,
}
