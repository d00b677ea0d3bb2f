//! Crate error type
//!
//! The tick itself never fails; errors only surface at the edges
//! (settings storage, the commentary producer).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("settings I/O failed: {0}")]
    SettingsIo(#[from] std::io::Error),

    #[error("settings format invalid: {0}")]
    SettingsFormat(#[from] serde_json::Error),

    #[error("commentary unavailable: {0}")]
    Commentary(String),
}

pub type Result<T> = std::result::Result<T, Error>;
