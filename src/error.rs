use std::path::PathBuf;
use thiserror::Error;

/// Problems with the settings file, detected before any allocation happens
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read settings from {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("unknown squad color `{0}`")]
    UnknownColor(String),
    #[error("group {group} has negative size {size}")]
    NegativeGroupSize { group: usize, size: i64 },
    #[error("same-squad weight multiplier must not be negative (got {0})")]
    NegativeMultiplier(i64),
    #[error("same-squad weight multiplier {0} is out of range")]
    MultiplierOutOfRange(i64),
}

/// Failures while shuffling members into groups.
///
/// Apart from `Config`, these indicate a broken precondition inside the
/// allocator rather than bad input.
#[derive(Error, Debug)]
pub enum ShuffleError {
    #[error("cannot pick a member from empty squad `{squad}`")]
    EmptySquad { squad: String },
    #[error("no squad can be drawn from ({remaining} members remaining)")]
    NoDrawableSquads { remaining: usize },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
