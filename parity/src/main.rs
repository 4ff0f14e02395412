use std::time::Instant;

use anyhow::{bail, Context, Result};
use parity::{parse_parity_game, SolverGame};
use sspm::game::Player;

fn main() -> Result<()> {
    let Some(path) = std::env::args().nth(1) else { bail!("no parity game file provided") };

    let source =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;
    let game = match parse_parity_game(&source) {
        Ok(game) => game,
        Err(errors) => bail!("failed to parse {path}: {errors:?}"),
    };

    let now = Instant::now();
    let mut game = SolverGame::new(&game);
    println!("Preprocessing took {:?}", now.elapsed());

    let now = Instant::now();
    let stats = sspm::solve::solve(&mut game);
    println!(
        "Solve took {:?} ({} lifts out of {} attempts)",
        now.elapsed(),
        stats.lifts,
        stats.attempts
    );

    let rows = game.solution();
    println!("paritysol {};", rows.last().map_or(0, |&(id, _, _)| id));
    for (id, winner, strategy) in rows {
        let winner = match winner {
            Player::P0 => 0,
            Player::P1 => 1,
        };
        match strategy {
            Some(s) => println!("{id} {winner} {s};"),
            None => println!("{id} {winner};"),
        }
    }

    Ok(())
}
