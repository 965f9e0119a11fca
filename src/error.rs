use alloc::string::String;

use thiserror::Error;

/// Errors raised while splitting, combining or decoding shares.
///
/// Every error is raised at the point of detection and leaves the engine untouched;
/// retrying only makes sense once the offending input has been corrected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("no primitive polynomial for {0}-bit fields; bits must be between 3 and 20")]
    UnsupportedFieldSize(u8),

    #[error("radix must be between 2 and 36, got {0}")]
    InvalidRadix(u32),

    #[error("number of shares must be between 2 and {max}, got {got}")]
    InvalidShareCount { got: usize, max: usize },

    #[error("threshold must be between 2 and {max}, got {got}")]
    InvalidThreshold { got: usize, max: usize },

    #[error("zero-pad length must be between 0 and 1024, got {0}")]
    InvalidPadLength(usize),

    #[error("share id must be between 1 and {max}, got {got}")]
    InvalidShareId { got: u64, max: u32 },

    #[error("number of random bits must be between 2 and 65536, got {0}")]
    InvalidRandomBits(usize),

    #[error("interpolation point must be between 0 and {max}, got {got}")]
    InvalidPoint { got: u32, max: u32 },

    #[error("invalid hex character {0:?}")]
    InvalidHex(char),

    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    #[error("malformed share: {0}")]
    MalformedShare(String),

    #[error("mismatched shares: expected {expected}-bit shares, found {found}-bit")]
    MismatchedConfig { expected: u8, found: u8 },

    #[error("insufficient shares: got {got}, need {need}")]
    InsufficientShares { got: usize, need: usize },

    #[error("no shares provided")]
    NoShares,
}

impl Error {
    /// Whether this error reports an out-of-range argument rather than a bad share set.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Error::InvalidRadix(_)
                | Error::InvalidShareCount { .. }
                | Error::InvalidThreshold { .. }
                | Error::InvalidPadLength(_)
                | Error::InvalidShareId { .. }
                | Error::InvalidRandomBits(_)
                | Error::InvalidPoint { .. }
                | Error::InvalidHex(_)
                | Error::InvalidEncoding(_)
        )
    }
}

pub type Result<T> = core::result::Result<T, Error>;
