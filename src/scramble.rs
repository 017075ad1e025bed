use std::str::FromStr;

use rand::Rng;

use crate::constants::{ALL_MOVES, N_MOVE};
use crate::error::Error;
use crate::moves::Move;

/// Parse a whitespace separated scramble string. Tokens are case-sensitive,
/// anything outside the 18 move alphabet is rejected.
pub fn scramble_from_str(s: &str) -> Result<Vec<Move>, Error> {
    s.split_whitespace().map(Move::from_str).collect()
}

/// Join a move sequence with single spaces.
pub fn scramble_to_str(moves: &[Move]) -> String {
    moves
        .iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Generate a random scramble of the given length, never turning the same
/// face twice in a row.
pub fn gen_scramble(length: usize) -> Vec<Move> {
    let mut rng = rand::thread_rng();
    let mut scramble: Vec<Move> = Vec::with_capacity(length);
    while scramble.len() < length {
        let m = ALL_MOVES[rng.gen_range(0..N_MOVE)];
        if let Some(&last) = scramble.last() {
            if m.is_same_layer(last) {
                continue;
            }
        }
        scramble.push(m);
    }
    scramble
}
