use chumsky::error::Simple;
use chumsky::primitive::{choice, just, none_of};
use chumsky::text::TextParser;
use chumsky::{text, Parser};
use sspm::game::Player;

use crate::{ParityGame, Vertex};

/// Parse the pgsolver parity game format: a `parity <max id>;` header
/// followed by `<id> <priority> <owner> <successors> ["<label>"];` rows.
pub fn parse_parity_game(source: &str) -> Result<ParityGame, Vec<Simple<char>>> {
    let parity = just("parity").padded();
    let number = text::int(10).map(|n: String| n.parse::<usize>().unwrap()).padded();
    let comma = just(',').padded();
    let semi = just(';');
    let newline = text::newline();

    let header = parity.then(number).then(semi).then(newline);

    let owner = choice((just('0').to(Player::P0), just('1').to(Player::P1)));
    let successors = number.separated_by(comma);
    let label = none_of("\"")
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
        .padded();
    let row = number.then(number).then(owner).then(successors).then(label.or_not());
    let row = row.map(|((((id, priority), owner), successors), label)| Vertex {
        id,
        priority,
        owner,
        successors,
        label,
    });

    let rows = row.then_ignore(semi).separated_by(newline).allow_trailing();
    let game = header.ignore_then(rows).map(|vertices| ParityGame { vertices });

    game.parse(source)
}
