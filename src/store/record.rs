//! Line-oriented record encoding: `white_king black_king hawk side`, whitespace separated.
//!
//! Squares are 0x88 indices and `side` is `1` when White is to move, `0` when Black is.
//! `true`/`false` are accepted on input as well.

use std::fmt;
use std::str::FromStr;

use crate::core::position::{Position, Side};
use crate::core::square::Square;

/// A [`Position`] in its persisted text form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Record(pub Position);

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        let side = match p.to_move() {
            Side::White => 1,
            Side::Black => 0,
        };
        write!(
            f,
            "{} {} {} {side}",
            p.white_king().index(),
            p.black_king().index(),
            p.hawk().index()
        )
    }
}

impl FromStr for Record {
    type Err = String;

    fn from_str(line: &str) -> Result<Record, String> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        let [wk, bk, hawk, side] = fields.as_slice() else {
            return Err(format!("expected 4 fields, found {}", fields.len()));
        };

        let to_move = match *side {
            "1" | "true" => Side::White,
            "0" | "false" => Side::Black,
            other => return Err(format!("side to move must be 0 or 1, found {other:?}")),
        };

        let pos = Position::new(
            parse_square(wk, "white king")?,
            parse_square(bk, "black king")?,
            parse_square(hawk, "hawk")?,
            to_move,
        )
        .map_err(|e| e.to_string())?;

        Ok(Record(pos))
    }
}

fn parse_square(field: &str, what: &str) -> Result<Square, String> {
    let index: u8 = field
        .parse()
        .map_err(|_| format!("{what} square {field:?} is not an integer in 0..=255"))?;
    Square::new(index).ok_or_else(|| format!("{what} square {index} is off the board"))
}
