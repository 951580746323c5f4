use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed chart entry at rank {rank}: {reason}")]
    MalformedEntry { rank: u32, reason: &'static str },

    #[error("duplicate rank {0} in chart")]
    DuplicateRank(u32),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type Result<T> = std::result::Result<T, Error>;
