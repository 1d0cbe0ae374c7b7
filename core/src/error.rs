use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrainerError {
    #[error("character {0:?} has no Morse mapping")]
    UnknownSymbol(char),

    #[error("required asset not found: {0}")]
    AssetMissing(PathBuf),

    #[error("clip format mismatch in {path}: expected {expected}, got {actual}")]
    FormatMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("frame size mismatch: expected {expected_width}x{expected_height}, got {width}x{height}")]
    FrameSizeMismatch {
        expected_width: u32,
        expected_height: u32,
        width: u32,
        height: u32,
    },

    #[error("unreadable asset {path}: {reason}")]
    AssetUnreadable { path: PathBuf, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrainerError>;
