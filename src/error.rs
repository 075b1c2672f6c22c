use thiserror::Error;

/// Failures the library reports to its caller.  Everything here is
/// recoverable: a failed score write leaves the in-memory table
/// authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum Error {
    #[error("score file i/o: {0}")]
    Io(#[from] std::io::Error),

    #[error("score file format: {0}")]
    ScoreFormat(#[from] serde_json::Error),
}
