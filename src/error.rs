use thiserror::Error;

/// Errors surfaced by scramble parsing, table generation and the two phase search.
#[derive(Error, Debug)]
pub enum Error {
    /// The scramble contains a token outside the 18 move alphabet.
    #[error("invalid move in scramble string")]
    InvalidMove,
    /// A table file is absent or does not have the expected size.
    #[error("solver table missing or wrong size: {0}")]
    TablesMissing(String),
    #[error("Phase 1 search exceeded depth limit.")]
    Phase1DepthExceeded,
    #[error("Phase 2 search exceeded depth limit.")]
    Phase2DepthExceeded,
    /// The search ran out of successors below the bound. Only possible with
    /// corrupt tables.
    #[error("search exhausted without reaching the phase goal")]
    PhaseUnreachable,
    /// BFS left coordinates unassigned while generating a pruning table.
    #[error("pruning table generation left unreachable coordinates")]
    IncompleteTable,
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Encode(#[from] bincode::error::EncodeError),
    #[error(transparent)]
    Decode(#[from] bincode::error::DecodeError),
}
